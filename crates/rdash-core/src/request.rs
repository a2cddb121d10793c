//! Onboarding request form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::project::Project;
use crate::status::ProjectStatus;

/// Selectable review periods, in months.
pub const DURATION_OPTIONS: [&str; 3] = ["3", "6", "12"];

pub const DEFAULT_DURATION: &str = "3";

/// Draft of an onboarding request. Every field is kept as typed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestForm {
    pub project_name: String,
    pub repository_url: String,
    pub description: String,
    pub purpose: String,
    pub expected_duration: String,
    pub team_size: String,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            repository_url: String::new(),
            description: String::new(),
            purpose: String::new(),
            expected_duration: DEFAULT_DURATION.to_string(),
            team_size: String::new(),
        }
    }
}

/// Partial update merged over a [`RequestForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestFormPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProjectName,
    RepositoryUrl,
    Description,
    Purpose,
    ExpectedDuration,
    TeamSize,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::ProjectName,
        FormField::RepositoryUrl,
        FormField::Description,
        FormField::Purpose,
        FormField::ExpectedDuration,
        FormField::TeamSize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::ProjectName => "Project name",
            FormField::RepositoryUrl => "Repository URL",
            FormField::Description => "Description",
            FormField::Purpose => "Purpose",
            FormField::ExpectedDuration => "Expected duration",
            FormField::TeamSize => "Team size",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::ProjectName => "Enter the project name",
            FormField::RepositoryUrl => "https://bitbucket.org/...",
            FormField::Description => "Short description of the project",
            FormField::Purpose => "How will the team use code review?",
            FormField::ExpectedDuration => "",
            FormField::TeamSize => "Number of team members",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(FormField),
    #[error("{0} must be an http(s) URL")]
    InvalidUrl(FormField),
    #[error("{0} must be one of 3, 6 or 12 months")]
    InvalidDuration(FormField),
    #[error("{0} must be a whole number of at least 1")]
    InvalidTeamSize(FormField),
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::Required(f)
            | FieldError::InvalidUrl(f)
            | FieldError::InvalidDuration(f)
            | FieldError::InvalidTeamSize(f) => *f,
        }
    }
}

impl RequestForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ProjectName => &self.project_name,
            FormField::RepositoryUrl => &self.repository_url,
            FormField::Description => &self.description,
            FormField::Purpose => &self.purpose,
            FormField::ExpectedDuration => &self.expected_duration,
            FormField::TeamSize => &self.team_size,
        }
    }

    /// Merges every present field of `patch` over the draft.
    pub fn apply(&mut self, patch: RequestFormPatch) {
        let RequestFormPatch {
            project_name,
            repository_url,
            description,
            purpose,
            expected_duration,
            team_size,
        } = patch;
        if let Some(v) = project_name {
            self.project_name = v;
        }
        if let Some(v) = repository_url {
            self.repository_url = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = purpose {
            self.purpose = v;
        }
        if let Some(v) = expected_duration {
            self.expected_duration = v;
        }
        if let Some(v) = team_size {
            self.team_size = v;
        }
    }

    /// Checks the draft. Returns one error per invalid field, in field order.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for field in FormField::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                errors.push(FieldError::Required(field));
                continue;
            }
            match field {
                FormField::RepositoryUrl => {
                    let ok = Url::parse(value)
                        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host());
                    if !ok {
                        errors.push(FieldError::InvalidUrl(field));
                    }
                }
                FormField::ExpectedDuration if !DURATION_OPTIONS.contains(&value) => {
                    errors.push(FieldError::InvalidDuration(field));
                }
                FormField::TeamSize if !value.parse::<u32>().is_ok_and(|n| n >= 1) => {
                    errors.push(FieldError::InvalidTeamSize(field));
                }
                _ => {}
            }
        }
        errors
    }

    /// Builds the waiting project record for a submitted draft.
    ///
    /// # Errors
    /// Returns the validation errors when the draft is incomplete.
    pub fn to_project(&self, id: String, now: DateTime<Utc>) -> Result<Project, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Project {
            id,
            name: self.project_name.trim().to_string(),
            repository_url: self.repository_url.trim().to_string(),
            description: self.description.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            expected_duration_months: self.expected_duration.trim().parse().unwrap_or(3),
            team_size: self.team_size.trim().parse().unwrap_or(1),
            status: ProjectStatus::Waiting,
            created_at: now,
            updated_at: now,
            last_activity: None,
            usage_count: 0,
            reject_reason: None,
        })
    }
}

/// Next selectable duration after `current`, wrapping around.
pub fn next_duration(current: &str) -> &'static str {
    let idx = DURATION_OPTIONS.iter().position(|d| *d == current);
    match idx {
        Some(i) => DURATION_OPTIONS[(i + 1) % DURATION_OPTIONS.len()],
        None => DEFAULT_DURATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RequestForm {
        RequestForm {
            project_name: "Payments".into(),
            repository_url: "https://bitbucket.org/team/payments".into(),
            description: "Payment service".into(),
            purpose: "Faster reviews".into(),
            expected_duration: "6".into(),
            team_size: "5".into(),
        }
    }

    #[test]
    fn test_default_duration_is_three_months() {
        let form = RequestForm::default();
        assert_eq!(form.expected_duration, "3");
        assert!(form.project_name.is_empty());
    }

    #[test]
    fn test_patch_touches_only_present_fields() {
        let mut form = filled();
        form.apply(RequestFormPatch {
            team_size: Some("9".into()),
            ..RequestFormPatch::default()
        });
        let mut expected = filled();
        expected.team_size = "9".into();
        assert_eq!(form, expected);
    }

    #[test]
    fn test_patch_deserializes_camel_case_partial() {
        let patch: RequestFormPatch =
            serde_json::from_str(r#"{"projectName":"X","teamSize":"2"}"#).unwrap();
        assert_eq!(patch.project_name.as_deref(), Some("X"));
        assert_eq!(patch.team_size.as_deref(), Some("2"));
        assert!(patch.purpose.is_none());
    }

    #[test]
    fn test_validate_empty_form() {
        let errors = RequestForm::default().validate();
        let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
        assert_eq!(
            fields,
            vec![
                FormField::ProjectName,
                FormField::RepositoryUrl,
                FormField::Description,
                FormField::Purpose,
                FormField::TeamSize,
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut form = filled();
        form.repository_url = "ftp://example.com".into();
        form.team_size = "0".into();
        form.expected_duration = "4".into();
        let errors = form.validate();
        assert_eq!(
            errors,
            vec![
                FieldError::InvalidUrl(FormField::RepositoryUrl),
                FieldError::InvalidDuration(FormField::ExpectedDuration),
                FieldError::InvalidTeamSize(FormField::TeamSize),
            ]
        );
    }

    #[test]
    fn test_to_project_is_waiting() {
        let now = Utc::now();
        let project = filled().to_project("req-99".into(), now).unwrap();
        assert_eq!(project.status, ProjectStatus::Waiting);
        assert_eq!(project.team_size, 5);
        assert_eq!(project.expected_duration_months, 6);
        assert_eq!(project.created_at, now);
    }

    #[test]
    fn test_next_duration_cycles() {
        assert_eq!(next_duration("3"), "6");
        assert_eq!(next_duration("6"), "12");
        assert_eq!(next_duration("12"), "3");
        assert_eq!(next_duration("4"), "3");
    }
}
