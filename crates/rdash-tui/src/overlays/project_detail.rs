//! Read-only project details.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};
use rdash_core::project::Project;

use super::OverlayUpdate;
use super::render_utils::{InputHint, Popup};
use crate::features::my_projects::detail_lines;

#[derive(Debug, Clone)]
pub struct ProjectDetailState {
    pub project: Project,
    pub scroll: u16,
}

impl ProjectDetailState {
    pub fn open(project: Project) -> Self {
        Self { project, scroll: 0 }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                OverlayUpdate::stay()
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("Esc", "close"), InputHint::new("↑/↓", "scroll")];
        let body = Popup::new(&self.project.name, Color::Cyan, 72, 16)
            .hints(&hints)
            .render(frame, area);
        frame.render_widget(
            Paragraph::new(detail_lines(&self.project))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            body,
        );
    }
}
