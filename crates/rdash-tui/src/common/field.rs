//! Single-line text editing over plain `String` values.
//!
//! Editable values live in the shared store or in panel state, so editing is
//! expressed as "old value + key -> new value". The cursor always sits at
//! the end of the text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;

/// Applies an editing key to `value`.
///
/// Returns the new text, or `None` when the key is not an edit.
/// Backspace removes one grapheme cluster, Ctrl+U clears the line.
pub fn edit_line(value: &str, key: KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(String::new()),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) => {
            let mut next = value.to_string();
            next.push(c);
            Some(next)
        }
        KeyCode::Backspace => {
            let cut = value
                .grapheme_indices(true)
                .next_back()
                .map_or(0, |(idx, _)| idx);
            Some(value[..cut].to_string())
        }
        _ => None,
    }
}

/// Like [`edit_line`], but Enter inserts a newline.
pub fn edit_multiline(value: &str, key: KeyEvent) -> Option<String> {
    if key.code == KeyCode::Enter {
        let mut next = value.to_string();
        next.push('\n');
        return Some(next);
    }
    edit_line(value, key)
}

/// Renders `label: value` with a block cursor when focused.
pub fn field_line<'a>(label: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, label_style),
        Span::styled(format!("{label}: "), label_style),
    ];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(value));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_appends() {
        assert_eq!(edit_line("ab", key(KeyCode::Char('c'))), Some("abc".into()));
    }

    #[test]
    fn test_backspace_removes_grapheme() {
        assert_eq!(edit_line("e\u{301}x", key(KeyCode::Backspace)), Some("e\u{301}".into()));
        assert_eq!(edit_line("e\u{301}", key(KeyCode::Backspace)), Some(String::new()));
        assert_eq!(edit_line("", key(KeyCode::Backspace)), Some(String::new()));
    }

    #[test]
    fn test_ctrl_u_clears_and_other_ctrl_keys_pass() {
        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(edit_line("abc", clear), Some(String::new()));
        let other = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(edit_line("abc", other), None);
        assert_eq!(edit_line("abc", key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_multiline_enter() {
        assert_eq!(edit_multiline("a", key(KeyCode::Enter)), Some("a\n".into()));
        assert_eq!(edit_line("a", key(KeyCode::Enter)), None);
    }
}
