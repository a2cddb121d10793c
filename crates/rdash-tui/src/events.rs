//! UI event types.
//!
//! All external inputs (terminal, task results, scripted actions) are
//! converted to `UiEvent` before being processed by the reducer.

use crossterm::event::Event as CrosstermEvent;
use rdash_core::auth::{AdminGrant, AuthError};
use rdash_core::review::ReviewError;

use crate::common::{ClipboardError, TaskCompleted, TaskKind};
use crate::dashboard::Action;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick: animations, toast expiry, and the render cadence.
    Tick,

    /// Current terminal size, sent before the other events of a frame.
    Frame { width: u16, height: u16 },

    Terminal(CrosstermEvent),

    /// A shared-store action from outside the key handlers.
    Action(Action),

    /// Answer of the admin authority.
    AdminVerified(Result<AdminGrant, AuthError>),

    /// Outcome of a mock review.
    ReviewFinished(Result<String, ReviewError>),

    /// Wraps the event a task produced. Dropped unless the task is still
    /// the active one of its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    ClipboardCopied(Result<(), ClipboardError>),
}
