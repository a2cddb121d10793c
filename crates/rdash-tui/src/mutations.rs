//! Panel-data mutations requested by overlays.
//!
//! Overlays never touch panel repositories directly; they return these and
//! the reducer applies them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    /// Remove a token from the token repository.
    DeleteToken { project_id: String },
    /// Withdraw one of the user's projects.
    CancelProject { id: String },
    /// Deny an onboarding request, optionally with a reason.
    RejectRequest { id: String, reason: String },
}
