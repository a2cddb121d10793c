//! Canonical project lifecycle status.
//!
//! Older data used three different vocabularies for the same lifecycle
//! (request review, managed project activity, user-facing progress). They
//! are accepted only as migration input through [`ProjectStatus::from_legacy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status shared by onboarding requests and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Submitted, awaiting an admin decision.
    Waiting,
    Accepted,
    /// Onboarding in progress.
    Working,
    /// Reviews are running for this project.
    Enabled,
    /// Previously enabled, switched off by an admin.
    Inactive,
    Denied,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project status: {0:?}")]
pub struct UnknownStatus(pub String);

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Waiting,
        ProjectStatus::Accepted,
        ProjectStatus::Working,
        ProjectStatus::Enabled,
        ProjectStatus::Inactive,
        ProjectStatus::Denied,
        ProjectStatus::Cancelled,
    ];

    /// Statuses an onboarding request moves through.
    pub const REQUEST: [ProjectStatus; 3] = [
        ProjectStatus::Waiting,
        ProjectStatus::Accepted,
        ProjectStatus::Denied,
    ];

    /// Statuses a managed project can be switched between.
    pub const MANAGED: [ProjectStatus; 3] = [
        ProjectStatus::Enabled,
        ProjectStatus::Inactive,
        ProjectStatus::Waiting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Waiting => "waiting",
            ProjectStatus::Accepted => "accepted",
            ProjectStatus::Working => "working",
            ProjectStatus::Enabled => "enabled",
            ProjectStatus::Inactive => "inactive",
            ProjectStatus::Denied => "denied",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Waiting => "Waiting",
            ProjectStatus::Accepted => "Accepted",
            ProjectStatus::Working => "In progress",
            ProjectStatus::Enabled => "Enabled",
            ProjectStatus::Inactive => "Inactive",
            ProjectStatus::Denied => "Denied",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }

    /// Maps any historical status name onto the canonical enum.
    ///
    /// | legacy   | canonical |
    /// |----------|-----------|
    /// | pending  | Waiting   |
    /// | approved | Accepted  |
    /// | rejected | Denied    |
    /// | active   | Enabled   |
    /// | inactive | Inactive  |
    ///
    /// The six lifecycle names map to themselves.
    ///
    /// # Errors
    /// Returns [`UnknownStatus`] for names outside the table.
    pub fn from_legacy(name: &str) -> Result<Self, UnknownStatus> {
        let status = match name.trim().to_ascii_lowercase().as_str() {
            "pending" | "waiting" => ProjectStatus::Waiting,
            "approved" | "accepted" => ProjectStatus::Accepted,
            "rejected" | "denied" => ProjectStatus::Denied,
            "active" | "enabled" => ProjectStatus::Enabled,
            "inactive" => ProjectStatus::Inactive,
            "working" => ProjectStatus::Working,
            "cancelled" => ProjectStatus::Cancelled,
            _ => return Err(UnknownStatus(name.to_string())),
        };
        Ok(status)
    }

    /// A user may withdraw a project until onboarding starts.
    pub fn is_cancellable(self) -> bool {
        matches!(self, ProjectStatus::Waiting | ProjectStatus::Accepted)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    /// Parses canonical names as well as the legacy vocabularies.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_legacy(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_table() {
        let cases = [
            ("approved", ProjectStatus::Accepted),
            ("pending", ProjectStatus::Waiting),
            ("rejected", ProjectStatus::Denied),
            ("active", ProjectStatus::Enabled),
            ("inactive", ProjectStatus::Inactive),
            ("Working", ProjectStatus::Working),
            (" cancelled ", ProjectStatus::Cancelled),
        ];
        for (legacy, expected) in cases {
            assert_eq!(ProjectStatus::from_legacy(legacy).unwrap(), expected);
        }
    }

    #[test]
    fn test_canonical_names_are_identity() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::from_legacy(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_legacy_is_error() {
        let err = ProjectStatus::from_legacy("archived").unwrap_err();
        assert_eq!(err, UnknownStatus("archived".to_string()));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: ProjectStatus = serde_json::from_str("\"enabled\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Enabled);
    }
}
