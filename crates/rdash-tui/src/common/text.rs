//! Width-aware string helpers for cells and inputs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Collects chars from `chars` while they fit in `budget` display columns.
fn take_columns(chars: impl Iterator<Item = char>, budget: usize) -> Vec<char> {
    let mut used = 0;
    chars
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect()
}

/// Shortens `text` to `max_width` columns, replacing the end with `…`.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out: String = take_columns(text.chars(), max_width.saturating_sub(1))
        .into_iter()
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Shortens `text` to `max_width` columns from the left, so the end (where
/// the cursor sits in an input) stays visible.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let tail = take_columns(text.chars().rev(), max_width.saturating_sub(1));
    std::iter::once(ELLIPSIS).chain(tail.into_iter().rev()).collect()
}

/// Hides a token value except for its first and last two characters.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    secret
        .chars()
        .enumerate()
        .map(|(i, ch)| if i < 2 || i >= len - 2 { ch } else { '*' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_with_ellipsis("repo", 10), "repo");
        assert_eq!(truncate_start_with_ellipsis("short", 6), "short");
    }

    #[test]
    fn test_long_url_keeps_head() {
        assert_eq!(
            truncate_with_ellipsis("https://bitbucket.org/team", 12),
            "https://bit…"
        );
    }

    #[test]
    fn test_wide_chars_count_double() {
        assert_eq!(truncate_with_ellipsis("코드리뷰", 5), "코드…");
    }

    #[test]
    fn test_input_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("hello world", 6), "…world");
        assert_eq!(truncate_start_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("token-12"), "to****12");
        assert_eq!(mask_secret("abc"), "***");
    }
}
