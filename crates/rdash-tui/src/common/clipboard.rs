//! Copying prompts out of the dashboard.
//!
//! The OSC 52 escape goes through the terminal (and over SSH). The system
//! clipboard via `arboard` is the fallback.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("terminal clipboard failed: {0}")]
    Terminal(String),
    #[error("system clipboard failed: {0}")]
    System(String),
}

/// `ESC ] 52 ; c ; <base64> ESC \`
fn osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x1b\\", STANDARD.encode(text))
}

fn copy_via_terminal(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(osc52(text).as_bytes())?;
    out.flush()
}

fn copy_via_system(text: &str) -> Result<(), ClipboardError> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(text))
        .map_err(|e| ClipboardError::System(e.to_string()))
}

/// Copies `text`, trying the terminal escape before the system clipboard.
///
/// # Errors
/// Returns the system clipboard error when both transports fail.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    match copy_via_terminal(&mut io::stdout(), text) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!(%err, "OSC 52 copy failed, using the system clipboard");
            copy_via_system(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52("hi"), "\x1b]52;c;aGk=\x1b\\");
    }

    #[test]
    fn test_terminal_copy_writes_sequence() {
        let mut out = Vec::new();
        copy_via_terminal(&mut out, "review").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), osc52("review"));
    }
}
