//! BitBucket access tokens registered per project.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    /// Not yet checked against BitBucket. Every created or edited token
    /// starts here.
    Pending,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 3] = [
        ValidationStatus::Valid,
        ValidationStatus::Invalid,
        ValidationStatus::Pending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::Pending => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::Invalid => "Invalid",
            ValidationStatus::Pending => "Awaiting validation",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValidationStatus {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "valid" => Ok(ValidationStatus::Valid),
            "invalid" => Ok(ValidationStatus::Invalid),
            "pending" => Ok(ValidationStatus::Pending),
            other => Err(TokenError::UnknownStatus(other.to_string())),
        }
    }
}

/// A registered token. `project_id` is the primary key and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub project_id: String,
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub validation_status: ValidationStatus,
    pub last_validation_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_fail_date: Option<DateTime<Utc>>,
}

impl Record for Token {
    fn key(&self) -> &str {
        &self.project_id
    }
}

/// Editable part of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDraft {
    pub project_id: String,
    pub token: String,
    pub email: String,
}

/// Partial update merged over a [`TokenDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0:?} is not an email address")]
    InvalidEmail(String),
    #[error("unknown validation status: {0:?}")]
    UnknownStatus(String),
}

impl TokenDraft {
    pub fn apply(&mut self, patch: TokenDraftPatch) {
        if let Some(v) = patch.project_id {
            self.project_id = v;
        }
        if let Some(v) = patch.token {
            self.token = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
    }

    /// # Errors
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.project_id.trim().is_empty() {
            return Err(TokenError::Required("Project ID"));
        }
        if self.token.trim().is_empty() {
            return Err(TokenError::Required("Token"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(TokenError::Required("Email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(TokenError::InvalidEmail(email.to_string())),
        }
    }
}

impl From<&Token> for TokenDraft {
    fn from(token: &Token) -> Self {
        Self {
            project_id: token.project_id.clone(),
            token: token.token.clone(),
            email: token.email.clone(),
        }
    }
}

impl Token {
    /// New token from a draft: status pending, every timestamp `now`.
    pub fn create(draft: TokenDraft, now: DateTime<Utc>) -> Self {
        Self {
            project_id: draft.project_id.trim().to_string(),
            token: draft.token,
            email: draft.email.trim().to_string(),
            created_at: now,
            updated_at: now,
            validation_status: ValidationStatus::Pending,
            last_validation_date: now,
            validation_fail_date: None,
        }
    }

    /// Replaces token and email from `draft`, forcing re-validation.
    ///
    /// The draft's project id is ignored.
    pub fn apply_edit(&mut self, draft: &TokenDraft, now: DateTime<Utc>) {
        self.token.clone_from(&draft.token);
        self.email = draft.email.trim().to_string();
        self.updated_at = now;
        self.last_validation_date = now;
        self.validation_status = ValidationStatus::Pending;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn draft() -> TokenDraft {
        TokenDraft {
            project_id: "project-1".into(),
            token: "secret".into(),
            email: "dev1@company.com".into(),
        }
    }

    #[test]
    fn test_create_is_pending_with_now_timestamps() {
        let now = Utc::now();
        let token = Token::create(draft(), now);
        assert_eq!(token.validation_status, ValidationStatus::Pending);
        assert_eq!(token.created_at, now);
        assert_eq!(token.updated_at, now);
        assert_eq!(token.last_validation_date, now);
        assert!(token.validation_fail_date.is_none());
    }

    #[test]
    fn test_edit_forces_pending_and_keeps_key() {
        let created = Utc::now() - Duration::days(3);
        let mut token = Token::create(draft(), created);
        token.validation_status = ValidationStatus::Valid;

        let now = Utc::now();
        let edit = TokenDraft {
            project_id: "project-999".into(),
            token: "rotated".into(),
            email: "ops@company.com".into(),
        };
        token.apply_edit(&edit, now);

        assert_eq!(token.project_id, "project-1");
        assert_eq!(token.token, "rotated");
        assert_eq!(token.email, "ops@company.com");
        assert_eq!(token.validation_status, ValidationStatus::Pending);
        assert_eq!(token.created_at, created);
        assert_eq!(token.updated_at, now);
        assert_eq!(token.last_validation_date, now);
    }

    #[test]
    fn test_validate_draft() {
        assert!(draft().validate().is_ok());

        let mut missing = draft();
        missing.token = "  ".into();
        assert_eq!(missing.validate(), Err(TokenError::Required("Token")));

        let mut bad = draft();
        bad.email = "nobody".into();
        assert!(matches!(bad.validate(), Err(TokenError::InvalidEmail(_))));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "INVALID".parse::<ValidationStatus>().unwrap(),
            ValidationStatus::Invalid
        );
        assert!("expired".parse::<ValidationStatus>().is_err());
    }
}
