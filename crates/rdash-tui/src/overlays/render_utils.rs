//! Drawing helpers shared by the modal dialogs and panel footers.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// A bordered, centered dialog box with an optional hint footer.
pub struct Popup<'a> {
    title: &'a str,
    accent: Color,
    width: u16,
    height: u16,
    hints: &'a [InputHint<'a>],
}

impl<'a> Popup<'a> {
    pub fn new(title: &'a str, accent: Color, width: u16, height: u16) -> Self {
        Self {
            title,
            accent,
            width,
            height,
            hints: &[],
        }
    }

    #[must_use]
    pub fn hints(mut self, hints: &'a [InputHint<'a>]) -> Self {
        self.hints = hints;
        self
    }

    /// Clears the background, draws the frame and footer, and returns the
    /// area left for the dialog's content.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> Rect {
        let popup = calculate_overlay_area(area, self.width, self.height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        if self.hints.is_empty() {
            return inner;
        }
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(hints_line(self.hints, self.accent)).alignment(Alignment::Center),
            footer,
        );
        body
    }
}

/// A key and what it does, shown in hint lines.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Single-line text entry: `> value█`, or the placeholder after the cursor
/// while empty. Long values keep their tail visible.
pub fn input_line(value: &str, placeholder: &str, accent: Color, width: u16) -> Line<'static> {
    const PROMPT: &str = "> ";
    let room = usize::from(width).saturating_sub(PROMPT.len() + 1);
    let cursor = Span::styled("█", Style::default().fg(accent));
    let prompt = Span::styled(PROMPT, Style::default().fg(Color::DarkGray));

    if value.is_empty() {
        let hint = truncate_start_with_ellipsis(placeholder, room);
        Line::from(vec![
            prompt,
            cursor,
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let shown = truncate_start_with_ellipsis(value, room);
        Line::from(vec![
            prompt,
            Span::styled(shown, Style::default().fg(accent)),
            cursor,
        ])
    }
}

/// A dim horizontal rule spanning `width` cells.
pub fn rule(width: u16) -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(usize::from(width)),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Builds a hint line: `key action · key action`.
pub fn hints_line(hints: &[InputHint<'_>], highlight_color: Color) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", dim));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default()
                .fg(highlight_color)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", hint.action), dim));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_overlay_area(area, 50, 10), Rect::new(25, 15, 50, 10));

        let small = Rect::new(0, 0, 30, 8);
        let popup = calculate_overlay_area(small, 50, 10);
        assert_eq!(popup.width, 26);
        assert_eq!(popup.height, 6);
    }

    #[test]
    fn test_input_line_shows_placeholder_when_empty() {
        let line = input_line("", "Admin password", Color::Yellow, 40);
        assert_eq!(text(&line), "> █Admin password");

        let line = input_line("abc", "Admin password", Color::Yellow, 40);
        assert_eq!(text(&line), "> abc█");
    }

    #[test]
    fn test_hints_line_joins_pairs() {
        let hints = [InputHint::new("Enter", "save"), InputHint::new("Esc", "cancel")];
        assert_eq!(text(&hints_line(&hints, Color::Cyan)), "Enter save · Esc cancel");
    }
}
