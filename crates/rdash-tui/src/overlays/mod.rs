//! Overlay modules for the dashboard.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function. They change
//! panel data only by returning [`StateMutation`]s.
//!
//! The admin login modal is the exception: its visibility and input live in
//! the shared dashboard store, so it is handled in `admin_login.rs` outside
//! the [`Overlay`] enum.

pub mod admin_login;
pub mod confirm;
pub mod project_detail;
pub mod reject_reason;
pub mod render_utils;

pub use confirm::ConfirmState;
use crossterm::event::KeyEvent;
pub use project_detail::ProjectDetailState;
use ratatui::Frame;
use ratatui::layout::Rect;
use rdash_core::project::Project;
pub use reject_reason::RejectReasonState;

use crate::effects::UiEffect;
use crate::mutations::StateMutation;

/// Requests to open a new overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayRequest {
    ProjectDetail(Project),
    ConfirmCancelProject { id: String, name: String },
    ConfirmDeleteToken { project_id: String },
    RejectReason { id: String, name: String },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    ProjectDetail(ProjectDetailState),
    Confirm(ConfirmState),
    RejectReason(RejectReasonState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::ProjectDetail(project) => {
                Overlay::ProjectDetail(ProjectDetailState::open(project))
            }
            OverlayRequest::ConfirmCancelProject { id, name } => Overlay::Confirm(ConfirmState::open(
                "Cancel project",
                format!("Cancel the request for \"{name}\"?"),
                StateMutation::CancelProject { id },
            )),
            OverlayRequest::ConfirmDeleteToken { project_id } => {
                Overlay::Confirm(ConfirmState::open(
                    "Delete token",
                    format!("Delete the token for {project_id}?"),
                    StateMutation::DeleteToken { project_id },
                ))
            }
            OverlayRequest::RejectReason { id, name } => {
                Overlay::RejectReason(RejectReasonState::open(id, name))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::ProjectDetail(d) => d.render(frame, area),
            Overlay::Confirm(c) => c.render(frame, area),
            Overlay::RejectReason(r) => r.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::ProjectDetail(d) => d.handle_key(key),
            Overlay::Confirm(c) => c.handle_key(key),
            Overlay::RejectReason(r) => r.handle_key(key),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_delete_confirmation_carries_mutation() {
        let mut overlay = Overlay::open(OverlayRequest::ConfirmDeleteToken {
            project_id: "project-4".into(),
        });
        let update = overlay.handle_key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(
            update.mutations,
            vec![StateMutation::DeleteToken {
                project_id: "project-4".into()
            }]
        );
    }

    #[test]
    fn test_declined_confirmation_mutates_nothing() {
        let mut overlay = Overlay::open(OverlayRequest::ConfirmCancelProject {
            id: "3".into(),
            name: "Gamma".into(),
        });
        let update = overlay.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.mutations.is_empty());
    }
}
