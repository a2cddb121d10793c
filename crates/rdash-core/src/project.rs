//! Project records and migration from the historical shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::{ProjectStatus, UnknownStatus};
use crate::store::Record;

/// A project as tracked from onboarding request to active use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub repository_url: String,
    pub description: String,
    pub purpose: String,
    pub expected_duration_months: u32,
    pub team_size: u32,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u64,
    /// Why an admin denied the request.
    #[serde(
        default,
        alias = "rejectReason",
        alias = "denyReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub reject_reason: Option<String>,
}

impl Record for Project {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Project {
    /// Moves the project to `status`, stamping `updated_at`.
    pub fn set_status(&mut self, status: ProjectStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Status(#[from] UnknownStatus),
    #[error("project {id}: invalid timestamp in `{field}`: {value:?}")]
    Timestamp {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("project {id}: `{field}` is not a number: {value:?}")]
    Number {
        id: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyId {
    Number(u64),
    Text(String),
}

impl LegacyId {
    fn into_string(self) -> String {
        match self {
            LegacyId::Number(n) => n.to_string(),
            LegacyId::Text(s) => s,
        }
    }
}

/// Request-form based records: onboarding requests and the user's own
/// project list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySubmission {
    pub id: LegacyId,
    pub project_name: String,
    pub repository_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub purpose: String,
    pub expected_duration: String,
    pub team_size: String,
    pub status: String,
    #[serde(alias = "submittedAt")]
    pub created_at: String,
    #[serde(alias = "lastUpdated")]
    pub updated_at: String,
    #[serde(default, alias = "denyReason")]
    pub reject_reason: Option<String>,
}

/// Records from the project management screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyManaged {
    pub id: LegacyId,
    pub name: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub usage_count: u64,
    pub team_members: u32,
    pub last_activity: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// The short summary shape of the old shared store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySummary {
    pub id: LegacyId,
    pub name: String,
    pub status: String,
    pub request_date: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub reject_reason: Option<String>,
}

/// Any of the historical project shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyProject {
    Submission(LegacySubmission),
    Managed(LegacyManaged),
    Summary(LegacySummary),
}

fn parse_timestamp(
    id: &str,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, MigrationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| MigrationError::Timestamp {
            id: id.to_string(),
            field,
            value: value.to_string(),
        })
}

fn parse_number(id: &str, field: &'static str, value: &str) -> Result<u32, MigrationError> {
    value.trim().parse().ok().ok_or_else(|| MigrationError::Number {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

impl TryFrom<LegacyProject> for Project {
    type Error = MigrationError;

    fn try_from(legacy: LegacyProject) -> Result<Self, Self::Error> {
        match legacy {
            LegacyProject::Submission(s) => {
                let id = s.id.into_string();
                Ok(Project {
                    status: ProjectStatus::from_legacy(&s.status)?,
                    expected_duration_months: parse_number(
                        &id,
                        "expectedDuration",
                        &s.expected_duration,
                    )?,
                    team_size: parse_number(&id, "teamSize", &s.team_size)?,
                    created_at: parse_timestamp(&id, "createdAt", &s.created_at)?,
                    updated_at: parse_timestamp(&id, "updatedAt", &s.updated_at)?,
                    name: s.project_name,
                    repository_url: s.repository_url,
                    description: s.description,
                    purpose: s.purpose,
                    last_activity: None,
                    usage_count: 0,
                    reject_reason: s.reject_reason,
                    id,
                })
            }
            LegacyProject::Managed(m) => {
                let id = m.id.into_string();
                let last_activity = parse_timestamp(&id, "lastActivity", &m.last_activity)?;
                let created_at = parse_timestamp(&id, "startDate", &m.start_date)?;
                let expected_duration_months = match m.end_date.as_deref() {
                    Some(end) => {
                        let end = parse_timestamp(&id, "endDate", end)?;
                        months_between(created_at, end)
                    }
                    None => 0,
                };
                Ok(Project {
                    status: ProjectStatus::from_legacy(&m.status)?,
                    name: m.name,
                    repository_url: m.repository_url,
                    description: m.description,
                    purpose: String::new(),
                    expected_duration_months,
                    team_size: m.team_members,
                    created_at,
                    updated_at: last_activity,
                    last_activity: Some(last_activity),
                    usage_count: m.usage_count,
                    reject_reason: None,
                    id,
                })
            }
            LegacyProject::Summary(s) => {
                let id = s.id.into_string();
                let created_at = parse_timestamp(&id, "requestDate", &s.request_date)?;
                let expected_duration_months = match s.expiry_date.as_deref() {
                    Some(end) => {
                        months_between(created_at, parse_timestamp(&id, "expiryDate", end)?)
                    }
                    None => 0,
                };
                Ok(Project {
                    status: ProjectStatus::from_legacy(&s.status)?,
                    name: s.name,
                    repository_url: String::new(),
                    description: String::new(),
                    purpose: String::new(),
                    expected_duration_months,
                    team_size: 0,
                    created_at,
                    updated_at: created_at,
                    last_activity: None,
                    usage_count: s.review_count.unwrap_or(0),
                    reject_reason: s.reject_reason,
                    id,
                })
            }
        }
    }
}

/// Whole months from `start` to `end`, rounded to the nearest month.
fn months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let days = (end - start).num_days().max(0);
    ((days as f64) / 30.44).round() as u32
}

/// Converts a batch of legacy records, failing on the first bad one.
///
/// # Errors
/// Returns the first [`MigrationError`] encountered.
pub fn migrate_all(records: Vec<LegacyProject>) -> Result<Vec<Project>, MigrationError> {
    records.into_iter().map(Project::try_from).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_submission_with_deny_reason() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": "5",
            "projectName": "Analytics",
            "repositoryUrl": "https://github.com/team/data-analytics",
            "description": "d",
            "purpose": "p",
            "expectedDuration": "12",
            "teamSize": "15",
            "status": "denied",
            "lastUpdated": "2024-03-01",
            "createdAt": "2024-02-15",
            "denyReason": "not enough capacity"
        }))
        .unwrap();
        assert!(matches!(legacy, LegacyProject::Submission(_)));

        let project = Project::try_from(legacy).unwrap();
        assert_eq!(project.status, ProjectStatus::Denied);
        assert_eq!(project.team_size, 15);
        assert_eq!(project.expected_duration_months, 12);
        assert_eq!(project.reject_reason.as_deref(), Some("not enough capacity"));
    }

    #[test]
    fn test_request_shape_maps_review_vocabulary() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": "req-1",
            "projectName": "Project 1",
            "repositoryUrl": "https://bitbucket.org/project-1",
            "description": "",
            "purpose": "",
            "expectedDuration": "6",
            "teamSize": "3",
            "status": "approved",
            "submittedAt": "2024-01-01T10:00:00.000Z",
            "updatedAt": "2024-01-02T10:00:00Z"
        }))
        .unwrap();
        let project = Project::try_from(legacy).unwrap();
        assert_eq!(project.status, ProjectStatus::Accepted);
        assert!(project.updated_at > project.created_at);
    }

    #[test]
    fn test_managed_shape() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": "proj-1",
            "name": "Project 1",
            "repositoryUrl": "https://bitbucket.org/project-1",
            "status": "active",
            "usageCount": 42,
            "lastActivity": "2024-03-01T00:00:00Z",
            "teamMembers": 9,
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": "2024-07-01T00:00:00Z",
            "description": "usage"
        }))
        .unwrap();
        assert!(matches!(legacy, LegacyProject::Managed(_)));
        let project = Project::try_from(legacy).unwrap();
        assert_eq!(project.status, ProjectStatus::Enabled);
        assert_eq!(project.usage_count, 42);
        assert_eq!(project.team_size, 9);
        assert_eq!(project.expected_duration_months, 6);
        assert!(project.last_activity.is_some());
    }

    #[test]
    fn test_summary_shape_with_numeric_id() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": 3,
            "name": "Legacy",
            "status": "rejected",
            "requestDate": "2024-02-01",
            "rejectReason": "duplicate"
        }))
        .unwrap();
        let project = Project::try_from(legacy).unwrap();
        assert_eq!(project.id, "3");
        assert_eq!(project.status, ProjectStatus::Denied);
        assert_eq!(project.reject_reason.as_deref(), Some("duplicate"));
    }

    #[test]
    fn test_unknown_status_fails_migration() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": 1,
            "name": "x",
            "status": "archived",
            "requestDate": "2024-02-01"
        }))
        .unwrap();
        let err = Project::try_from(legacy).unwrap_err();
        assert!(matches!(err, MigrationError::Status(_)));
    }

    #[test]
    fn test_bad_team_size_fails_migration() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": "1",
            "projectName": "x",
            "repositoryUrl": "",
            "expectedDuration": "3",
            "teamSize": "many",
            "status": "waiting",
            "createdAt": "2024-02-01",
            "updatedAt": "2024-02-01"
        }))
        .unwrap();
        let err = Project::try_from(legacy).unwrap_err();
        assert!(err.to_string().contains("teamSize"));
    }

    #[test]
    fn test_canonical_record_accepts_reason_aliases() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["denyReason"] = json!("busy");
        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.reject_reason.as_deref(), Some("busy"));
    }

    fn sample() -> Project {
        let now = Utc::now();
        Project {
            id: "p".into(),
            name: "n".into(),
            repository_url: String::new(),
            description: String::new(),
            purpose: String::new(),
            expected_duration_months: 3,
            team_size: 1,
            status: ProjectStatus::Waiting,
            created_at: now,
            updated_at: now,
            last_activity: None,
            usage_count: 0,
            reject_reason: None,
        }
    }
}
