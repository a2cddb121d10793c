//! Shared utilities for the dashboard.

pub mod clipboard;
pub mod field;
pub mod task;
pub mod text;

pub use clipboard::ClipboardError;
pub use field::{edit_line, edit_multiline, field_line};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{mask_secret, truncate_start_with_ellipsis, truncate_with_ellipsis};
