//! UI effect types.
//!
//! Effects are commands returned by the reducer that a runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! ## Cancellation Effects
//!
//! Task effects leave the reducer with `task: None`. The update layer assigns
//! the id and cancel token and starts tracking the task before the effect
//! reaches the runtime, so a cancel issued in the same batch finds it.
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The update layer fills in the active token and forgets the task, so its
//! completion is dropped as stale; the runtime then calls `token.cancel()`.

use rdash_core::request::RequestForm;
use rdash_core::review::ReviewRequest;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskKind, TaskStarted};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Ask the admin authority to check a password.
    VerifyAdmin {
        task: Option<TaskStarted>,
        password: String,
    },

    /// Run one mock review.
    StartReview {
        task: Option<TaskStarted>,
        request: ReviewRequest,
    },

    /// Cancel an in-flight task of the given kind.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// Copy text to the system clipboard.
    CopyToClipboard { text: String },

    /// Show a short acknowledgement in the status line.
    Notify { message: String },

    /// Record a submitted onboarding request.
    SubmitRequest { form: RequestForm },
}
