use std::fmt;
use std::str::FromStr;

use crate::project::Project;
use crate::status::ProjectStatus;
use crate::token::{Token, ValidationStatus};

/// Record filter used by [`super::Repository::list`].
pub trait Query<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Matches every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl<T> Query<T> for MatchAll {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Case-insensitive substring test. An empty needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Token filter: project id and email substrings plus an optional status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenQuery {
    pub project_id: String,
    pub email: String,
    pub status: Option<ValidationStatus>,
}

impl Query<Token> for TokenQuery {
    fn matches(&self, token: &Token) -> bool {
        contains_ci(&token.project_id, &self.project_id)
            && contains_ci(&token.email, &self.email)
            && self.status.is_none_or(|s| s == token.validation_status)
    }
}

/// Team size ranges offered by the request filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSizeBucket {
    /// 1 to 3 members.
    Small,
    /// 4 to 6 members.
    Medium,
    /// 7 or more.
    Large,
}

impl TeamSizeBucket {
    pub const ALL: [TeamSizeBucket; 3] = [
        TeamSizeBucket::Small,
        TeamSizeBucket::Medium,
        TeamSizeBucket::Large,
    ];

    pub fn contains(self, team_size: u32) -> bool {
        match self {
            TeamSizeBucket::Small => (1..=3).contains(&team_size),
            TeamSizeBucket::Medium => (4..=6).contains(&team_size),
            TeamSizeBucket::Large => team_size >= 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamSizeBucket::Small => "1-3",
            TeamSizeBucket::Medium => "4-6",
            TeamSizeBucket::Large => "7+",
        }
    }
}

impl fmt::Display for TeamSizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamSizeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-3" | "small" => Ok(TeamSizeBucket::Small),
            "4-6" | "medium" => Ok(TeamSizeBucket::Medium),
            "7+" | "large" => Ok(TeamSizeBucket::Large),
            other => Err(format!("unknown team size range {other:?} (use 1-3, 4-6 or 7+)")),
        }
    }
}

/// Project filter: name substring, optional status and team size range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub name: String,
    pub status: Option<ProjectStatus>,
    pub team_size: Option<TeamSizeBucket>,
}

impl Query<Project> for ProjectQuery {
    fn matches(&self, project: &Project) -> bool {
        contains_ci(&project.name, &self.name)
            && self.status.is_none_or(|s| s == project.status)
            && self
                .team_size
                .is_none_or(|bucket| bucket.contains(project.team_size))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::store::{MemoryRepository, PageRequest, Repository};

    fn token(project_id: &str, email: &str, status: ValidationStatus) -> Token {
        let now = Utc::now();
        Token {
            project_id: project_id.into(),
            token: "t".into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
            validation_status: status,
            last_validation_date: now,
            validation_fail_date: None,
        }
    }

    #[test]
    fn test_token_query_is_case_insensitive_substring() {
        let t = token("Project-12", "Dev12@Company.com", ValidationStatus::Valid);
        let q = TokenQuery {
            project_id: "ject-1".into(),
            email: "DEV12@".into(),
            status: None,
        };
        assert!(q.matches(&t));

        let q = TokenQuery {
            status: Some(ValidationStatus::Invalid),
            ..TokenQuery::default()
        };
        assert!(!q.matches(&t));
    }

    #[test]
    fn test_empty_token_query_matches_all() {
        let t = token("x", "y", ValidationStatus::Pending);
        assert!(TokenQuery::default().matches(&t));
    }

    fn seeded() -> crate::seed::MockData {
        let mut rng = crate::seed::rng_from(Some(42));
        crate::seed::MockData::generate(&mut rng, Utc::now())
    }

    fn lower_contains(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    #[test]
    fn test_token_query_lists_exactly_the_matching_tokens() {
        let data = seeded();
        let repo = MemoryRepository::from_records(data.tokens.clone()).unwrap();
        let statuses = [
            None,
            Some(ValidationStatus::Valid),
            Some(ValidationStatus::Invalid),
            Some(ValidationStatus::Pending),
        ];

        let needles = [
            ("", ""),
            ("PROJECT-1", ""),
            ("", "Dev2"),
            ("ject-2", "@COMPANY"),
            ("nope", ""),
        ];
        for (project_id, email) in needles {
            for status in statuses {
                let q = TokenQuery {
                    project_id: project_id.into(),
                    email: email.into(),
                    status,
                };
                let listed: Vec<String> = repo
                    .list(&q, PageRequest::new(1, usize::MAX))
                    .items
                    .into_iter()
                    .map(|t| t.project_id)
                    .collect();
                let expected: Vec<String> = data
                    .tokens
                    .iter()
                    .filter(|t| lower_contains(&t.project_id, project_id))
                    .filter(|t| lower_contains(&t.email, email))
                    .filter(|t| status.is_none_or(|s| s == t.validation_status))
                    .map(|t| t.project_id.clone())
                    .collect();
                assert_eq!(listed, expected, "query {q:?}");
            }
        }

        let all = repo.list(&TokenQuery::default(), PageRequest::new(1, usize::MAX));
        assert_eq!(all.total_items, 25);
        let dev1 = TokenQuery {
            email: "DEV1".into(),
            ..TokenQuery::default()
        };
        // dev1 and dev10..=dev19
        assert_eq!(repo.list(&dev1, PageRequest::first(5)).total_items, 11);
    }

    #[test]
    fn test_project_query_lists_exactly_the_matching_projects() {
        let data = seeded();
        let projects: Vec<Project> = data
            .requests
            .iter()
            .chain(&data.projects)
            .chain(&data.my_projects)
            .cloned()
            .enumerate()
            .map(|(i, mut p)| {
                p.id = format!("p{i}");
                p
            })
            .collect();
        let repo = MemoryRepository::from_records(projects.clone()).unwrap();

        let statuses = [
            None,
            Some(ProjectStatus::Waiting),
            Some(ProjectStatus::Enabled),
            Some(ProjectStatus::Denied),
        ];
        let buckets = [
            None,
            Some(TeamSizeBucket::Small),
            Some(TeamSizeBucket::Medium),
            Some(TeamSizeBucket::Large),
        ];
        for name in ["", "SYSTEM", "chat", "zzz"] {
            for status in statuses {
                for team_size in buckets {
                    let q = ProjectQuery {
                        name: name.into(),
                        status,
                        team_size,
                    };
                    let listed: Vec<String> = repo
                        .list(&q, PageRequest::new(1, usize::MAX))
                        .items
                        .into_iter()
                        .map(|p| p.id)
                        .collect();
                    let expected: Vec<String> = projects
                        .iter()
                        .filter(|p| lower_contains(&p.name, name))
                        .filter(|p| status.is_none_or(|s| s == p.status))
                        .filter(|p| match team_size {
                            None => true,
                            Some(TeamSizeBucket::Small) => (1..=3).contains(&p.team_size),
                            Some(TeamSizeBucket::Medium) => (4..=6).contains(&p.team_size),
                            Some(TeamSizeBucket::Large) => p.team_size >= 7,
                        })
                        .map(|p| p.id.clone())
                        .collect();
                    assert_eq!(listed, expected, "query {q:?}");
                }
            }
        }

        let system = ProjectQuery {
            name: "SYSTEM".into(),
            ..ProjectQuery::default()
        };
        let mine = MemoryRepository::from_records(data.my_projects.clone()).unwrap();
        // Code Review, Chat, Notification and Logging.
        assert_eq!(mine.list(&system, PageRequest::first(10)).total_items, 4);
    }

    #[test]
    fn test_team_size_buckets() {
        assert!(TeamSizeBucket::Small.contains(1));
        assert!(TeamSizeBucket::Small.contains(3));
        assert!(!TeamSizeBucket::Small.contains(0));
        assert!(TeamSizeBucket::Medium.contains(4));
        assert!(TeamSizeBucket::Medium.contains(6));
        assert!(TeamSizeBucket::Large.contains(7));
        assert!(TeamSizeBucket::Large.contains(20));
        assert_eq!("7+".parse::<TeamSizeBucket>(), Ok(TeamSizeBucket::Large));
    }
}
