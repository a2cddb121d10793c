//! Pure view/render functions for the dashboard.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::overlays::render_utils::{InputHint, hints_line};
use crate::overlays::{OverlayExt, admin_login};
use crate::state::{AppState, TuiState};
use crate::tabs;

const HEADER_HEIGHT: u16 = 1;
const TABS_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the whole dashboard.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let [header, tabs_area, content, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(TABS_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    render_header(state, frame, header);
    render_tabs(state, frame, tabs_area);

    match state.dashboard.content() {
        Some(tab) => state
            .panels
            .render(tab, &state.panel_context(), frame, content),
        None => render_empty(frame, content),
    }

    render_status_line(state, frame, status);

    if state.dashboard.show_admin_modal {
        admin_login::render(&state.dashboard, frame, area);
    }
    app.overlay.render(frame, area);
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    let (role, color) = if state.dashboard.is_admin {
        ("Admin", Color::Yellow)
    } else {
        ("User", Color::Green)
    };
    let line = Line::from(vec![
        Span::styled(
            " Code Review Access ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(role, Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(state: &TuiState, frame: &mut Frame, area: Rect) {
    let visible = tabs::visible_tabs(state.dashboard.is_admin);
    let titles = visible
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("F{} {}", i + 1, tab.title()));
    let mut widget = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    if let Some(selected) = visible
        .iter()
        .position(|t| *t == state.dashboard.selected_tab)
    {
        widget = widget.select(selected);
    }
    frame.render_widget(widget, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Pick a tab with F1-F4.",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    if state.tasks.is_any_running() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} "),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some(toast) = &state.toast {
        let color = if toast.is_error {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(
            format!(" {} ", toast.message),
            Style::default().fg(color),
        ));
    } else {
        let role_hint = if state.dashboard.is_admin {
            InputHint::new("Ctrl+A", "leave admin")
        } else {
            InputHint::new("Ctrl+A", "admin")
        };
        let hints = [
            InputHint::new("F1-F4", "tabs"),
            role_hint,
            InputHint::new("Ctrl+Q", "quit"),
        ];
        spans.extend(hints_line(&hints, Color::Cyan).spans);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use rdash_core::config::Config;
    use rdash_core::seed::{self, MockData};
    use rdash_core::stats::StatsSnapshot;

    use super::*;
    use crate::dashboard::{Action, reduce};
    use crate::tabs::Tab;

    fn app() -> AppState {
        let mut rng = seed::rng_from(Some(2));
        let now = Utc::now();
        AppState::new(
            Config::default(),
            MockData::generate(&mut rng, now),
            StatsSnapshot::generate(&mut rng, now),
        )
        .unwrap()
    }

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_every_tab_renders() {
        let mut app = app();
        for tab in tabs::USER_TABS {
            reduce(&mut app.tui.dashboard, Action::SetSelectedTab(tab));
            draw(&app);
        }
        reduce(&mut app.tui.dashboard, Action::SetAdmin(true));
        for tab in tabs::ADMIN_TABS {
            reduce(&mut app.tui.dashboard, Action::SetSelectedTab(tab));
            draw(&app);
        }
    }

    #[test]
    fn test_user_tab_bar() {
        let screen = draw(&app());
        assert!(screen.contains("Request Form"));
        assert!(!screen.contains("Token Management"));
    }

    #[test]
    fn test_stale_admin_tab_renders_empty() {
        let mut app = app();
        app.tui.dashboard.selected_tab = Tab::Statistics;
        let screen = draw(&app);
        assert!(screen.contains("Pick a tab"));
    }
}
