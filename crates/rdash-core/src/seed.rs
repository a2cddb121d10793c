//! Randomly seeded mock datasets backing every panel.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::project::Project;
use crate::request::DURATION_OPTIONS;
use crate::status::ProjectStatus;
use crate::token::{Token, ValidationStatus};

pub const TOKEN_COUNT: usize = 25;
pub const REQUEST_COUNT: usize = 15;
pub const MANAGED_PROJECT_COUNT: usize = 20;

/// Builds the dataset RNG: fixed when a seed is configured, entropy otherwise.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// All mock records at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockData {
    pub tokens: Vec<Token>,
    /// Onboarding requests awaiting an admin decision.
    pub requests: Vec<Project>,
    /// Projects already using the review system.
    pub projects: Vec<Project>,
    /// The signed-in user's own projects.
    pub my_projects: Vec<Project>,
}

impl MockData {
    pub fn generate(rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        Self {
            tokens: tokens(rng, now),
            requests: requests(rng, now),
            projects: managed_projects(rng, now),
            my_projects: my_projects(),
        }
    }
}

/// A random instant up to `max_ms` milliseconds away from `now`.
fn jitter(rng: &mut impl Rng, now: DateTime<Utc>, max_ms: i64, past: bool) -> DateTime<Utc> {
    let offset = Duration::milliseconds(rng.gen_range(0..max_ms));
    if past { now - offset } else { now + offset }
}

pub fn tokens(rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<Token> {
    (1..=TOKEN_COUNT)
        .map(|i| {
            let status = ValidationStatus::ALL[rng.gen_range(0..ValidationStatus::ALL.len())];
            Token {
                project_id: format!("project-{i}"),
                token: format!("token-{i}"),
                email: format!("dev{i}@company.com"),
                created_at: now,
                updated_at: now,
                validation_status: status,
                last_validation_date: now,
                validation_fail_date: rng.gen_bool(0.5).then_some(now),
            }
        })
        .collect()
}

pub fn requests(rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<Project> {
    (1..=REQUEST_COUNT)
        .map(|i| {
            let status = ProjectStatus::REQUEST[rng.gen_range(0..ProjectStatus::REQUEST.len())];
            let duration = DURATION_OPTIONS[rng.gen_range(0..DURATION_OPTIONS.len())];
            Project {
                id: format!("req-{i}"),
                name: format!("Project {i}"),
                repository_url: format!("https://bitbucket.org/project-{i}"),
                description: format!("Description of project {i}."),
                purpose: "Improve code quality and developer productivity".to_string(),
                expected_duration_months: duration.parse().unwrap_or(3),
                team_size: rng.gen_range(1..=10),
                status,
                created_at: jitter(rng, now, 10_000_000_000, true),
                updated_at: jitter(rng, now, 1_000_000_000, true),
                last_activity: None,
                usage_count: 0,
                reject_reason: None,
            }
        })
        .collect()
}

pub fn managed_projects(rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<Project> {
    (1..=MANAGED_PROJECT_COUNT)
        .map(|i| {
            let status = ProjectStatus::MANAGED[rng.gen_range(0..ProjectStatus::MANAGED.len())];
            let last_activity = jitter(rng, now, 10_000_000_000, true);
            let start = jitter(rng, now, 10_000_000_000, true);
            let end = jitter(rng, now, 10_000_000_000, false);
            Project {
                id: format!("proj-{i}"),
                name: format!("Project {i}"),
                repository_url: format!("https://bitbucket.org/project-{i}"),
                description: format!("Code review usage of project {i}."),
                purpose: String::new(),
                expected_duration_months: ((end - start).num_days() / 30).max(1) as u32,
                team_size: rng.gen_range(1..=20),
                status,
                created_at: start,
                updated_at: last_activity,
                last_activity: Some(last_activity),
                usage_count: rng.gen_range(0..1000),
                reject_reason: None,
            }
        })
        .collect()
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// The fixed list shown on the "My Projects" tab.
pub fn my_projects() -> Vec<Project> {
    #[rustfmt::skip]
    let rows: [(&str, &str, &str, &str, u32, u32, ProjectStatus, (i32, u32, u32), (i32, u32, u32), Option<&str>); 10] = [
        ("Code Review System", "code-review", "AI-assisted code review automation", "Raise code quality and streamline reviews", 6, 8, ProjectStatus::Enabled, (2024, 3, 15), (2024, 1, 15), None),
        ("Payment Revamp", "payment", "Performance work on the payment system", "Faster and more reliable payments", 3, 5, ProjectStatus::Working, (2024, 3, 14), (2024, 2, 1), None),
        ("Member Management", "user-management", "New member management system", "Efficient member data handling", 12, 10, ProjectStatus::Waiting, (2024, 3, 10), (2024, 3, 10), None),
        ("Mobile App Renewal", "mobile-app", "UI/UX refresh of the mobile app", "Better user experience", 6, 7, ProjectStatus::Accepted, (2024, 3, 12), (2024, 2, 20), None),
        ("Data Analytics Platform", "data-analytics", "Real-time analytics platform", "Data-driven decisions", 12, 15, ProjectStatus::Denied, (2024, 3, 1), (2024, 2, 15), Some("Declined due to limited resources")),
        ("Security Hardening", "security", "Company-wide security improvements", "Fix security weaknesses", 3, 4, ProjectStatus::Cancelled, (2024, 2, 28), (2024, 1, 20), None),
        ("Search Optimization", "search-engine", "Search performance improvements", "Faster and more accurate search", 6, 6, ProjectStatus::Working, (2024, 3, 13), (2024, 1, 10), None),
        ("Chat System", "chat", "Real-time chat service", "Real-time communication", 6, 5, ProjectStatus::Enabled, (2024, 3, 8), (2023, 12, 1), None),
        ("Notification System", "notification", "Push notification service", "Higher user engagement", 3, 3, ProjectStatus::Denied, (2024, 2, 25), (2024, 2, 10), Some("A similar project is already in progress")),
        ("Logging System", "logging", "Centralized logging", "Better system monitoring", 4, 4, ProjectStatus::Waiting, (2024, 3, 11), (2024, 3, 11), None),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, repo, description, purpose, months, team, status, updated, created, reason))| {
                Project {
                    id: (i + 1).to_string(),
                    name: name.to_string(),
                    repository_url: format!("https://github.com/team/{repo}"),
                    description: description.to_string(),
                    purpose: purpose.to_string(),
                    expected_duration_months: months,
                    team_size: team,
                    status,
                    created_at: day(created.0, created.1, created.2),
                    updated_at: day(updated.0, updated.1, updated.2),
                    last_activity: None,
                    usage_count: 0,
                    reject_reason: reason.map(str::to_string),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_dataset_sizes_and_keys() {
        let data = MockData::generate(&mut rng_from(Some(7)), Utc::now());
        assert_eq!(data.tokens.len(), TOKEN_COUNT);
        assert_eq!(data.requests.len(), REQUEST_COUNT);
        assert_eq!(data.projects.len(), MANAGED_PROJECT_COUNT);
        assert_eq!(data.my_projects.len(), 10);

        let keys: HashSet<_> = data.tokens.iter().map(|t| &t.project_id).collect();
        assert_eq!(keys.len(), TOKEN_COUNT);
        assert_eq!(data.tokens[0].email, "dev1@company.com");
    }

    #[test]
    fn test_generated_values_stay_in_range() {
        let now = Utc::now();
        let data = MockData::generate(&mut rng_from(Some(11)), now);
        for request in &data.requests {
            assert!(ProjectStatus::REQUEST.contains(&request.status));
            assert!((1..=10).contains(&request.team_size));
            assert!([3, 6, 12].contains(&request.expected_duration_months));
            assert!(request.created_at <= now);
        }
        for project in &data.projects {
            assert!(ProjectStatus::MANAGED.contains(&project.status));
            assert!((1..=20).contains(&project.team_size));
            assert!(project.usage_count < 1000);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let now = Utc::now();
        let a = MockData::generate(&mut rng_from(Some(42)), now);
        let b = MockData::generate(&mut rng_from(Some(42)), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_my_projects_cover_lifecycle() {
        let projects = my_projects();
        let statuses: HashSet<_> = projects.iter().map(|p| p.status).collect();
        for status in [
            ProjectStatus::Waiting,
            ProjectStatus::Accepted,
            ProjectStatus::Working,
            ProjectStatus::Enabled,
            ProjectStatus::Denied,
            ProjectStatus::Cancelled,
        ] {
            assert!(statuses.contains(&status));
        }
        let with_reason = projects.iter().filter(|p| p.reject_reason.is_some()).count();
        assert_eq!(with_reason, 2);
        assert_eq!(projects[0].created_at, day(2024, 1, 15));
    }
}
