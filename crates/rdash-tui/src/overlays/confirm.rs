//! Yes/no confirmation for destructive actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, Popup};
use crate::mutations::StateMutation;

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub title: &'static str,
    pub message: String,
    /// Applied when the user confirms.
    pub on_confirm: StateMutation,
}

impl ConfirmState {
    pub fn open(title: &'static str, message: String, on_confirm: StateMutation) -> Self {
        Self {
            title,
            message,
            on_confirm,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                OverlayUpdate::close().with_mutations(vec![self.on_confirm.clone()])
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("y", "confirm"), InputHint::new("n", "keep")];
        let body = Popup::new(self.title, Color::Red, 50, 6)
            .hints(&hints)
            .render(frame, area);
        frame.render_widget(
            Paragraph::new(self.message.as_str()).wrap(Wrap { trim: true }),
            body,
        );
    }
}
