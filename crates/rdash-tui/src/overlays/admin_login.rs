//! Admin password modal.
//!
//! Visibility, password and error all live in [`DashboardState`], so this
//! modal speaks in actions rather than overlay transitions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, Popup, input_line, rule};
use crate::common::edit_line;
use crate::dashboard::{Action, DashboardState};

pub fn handle_key(dashboard: &DashboardState, key: KeyEvent) -> Vec<Action> {
    if dashboard.authenticating {
        return vec![];
    }
    match key.code {
        KeyCode::Esc => vec![
            Action::ToggleAdminModal,
            Action::SetAdminPassword(String::new()),
            Action::SetAdminError(String::new()),
        ],
        KeyCode::Enter => vec![Action::Login],
        _ => edit_line(&dashboard.admin_password, key)
            .map(|password| vec![Action::SetAdminPassword(password)])
            .unwrap_or_default(),
    }
}

pub fn render(dashboard: &DashboardState, frame: &mut Frame, area: Rect) {
    let hints = [
        InputHint::new("Enter", "sign in"),
        InputHint::new("Esc", "cancel"),
    ];
    let body = Popup::new("Admin sign-in", Color::Yellow, 46, 7)
        .hints(&hints)
        .render(frame, area);
    let [input, separator, status_area] =
        Layout::vertical([Constraint::Length(1); 3]).areas(body);

    let masked = "•".repeat(dashboard.admin_password.chars().count());
    frame.render_widget(
        Paragraph::new(input_line(&masked, "Admin password", Color::Yellow, input.width)),
        input,
    );
    frame.render_widget(Paragraph::new(rule(separator.width)), separator);

    let status = if dashboard.authenticating {
        Span::styled("Checking…", Style::default().fg(Color::Cyan))
    } else if !dashboard.admin_error.is_empty() {
        Span::styled(
            dashboard.admin_error.as_str(),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled(
            "Enter the admin password",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_updates_password() {
        let state = DashboardState {
            admin_password: "dem".into(),
            show_admin_modal: true,
            ..DashboardState::default()
        };
        assert_eq!(
            handle_key(&state, key(KeyCode::Char('o'))),
            vec![Action::SetAdminPassword("demo".into())]
        );
        assert_eq!(handle_key(&state, key(KeyCode::Enter)), vec![Action::Login]);
    }

    #[test]
    fn test_input_locked_while_checking() {
        let state = DashboardState {
            authenticating: true,
            show_admin_modal: true,
            ..DashboardState::default()
        };
        assert!(handle_key(&state, key(KeyCode::Char('x'))).is_empty());
        assert!(handle_key(&state, key(KeyCode::Esc)).is_empty());
    }
}
