//! Reason prompt shown before denying an onboarding request.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, Popup, input_line, rule};
use crate::common::edit_line;
use crate::mutations::StateMutation;

#[derive(Debug, Clone)]
pub struct RejectReasonState {
    pub id: String,
    pub name: String,
    pub input: String,
}

impl RejectReasonState {
    pub fn open(id: String, name: String) -> Self {
        Self {
            id,
            name,
            input: String::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => {
                OverlayUpdate::close().with_mutations(vec![StateMutation::RejectRequest {
                    id: self.id.clone(),
                    reason: self.input.trim().to_string(),
                }])
            }
            _ => {
                if let Some(input) = edit_line(&self.input, key) {
                    self.input = input;
                }
                OverlayUpdate::stay()
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [
            InputHint::new("Enter", "reject"),
            InputHint::new("Esc", "cancel"),
        ];
        let body = Popup::new("Reject request", Color::Red, 60, 7)
            .hints(&hints)
            .render(frame, area);
        let [input, separator, help] = Layout::vertical([Constraint::Length(1); 3]).areas(body);

        frame.render_widget(
            Paragraph::new(input_line(
                &self.input,
                "Reason (optional)",
                Color::Red,
                input.width,
            )),
            input,
        );
        frame.render_widget(Paragraph::new(rule(separator.width)), separator);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("The reason is shown to the owner of \"{}\".", self.name),
                Style::default().fg(Color::DarkGray),
            ))),
            help,
        );
    }
}
