//! Terminal ownership for the interactive dashboard.
//!
//! [`TerminalSession`] switches the terminal into raw mode on the alternate
//! screen and switches it back when dropped. A panic hook does the same, so
//! a crash never leaves the shell in raw mode.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

pub struct TerminalSession {
    terminal: DashboardTerminal,
    restored: bool,
}

impl TerminalSession {
    /// Takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if raw mode or the alternate screen is unavailable.
    pub fn enter() -> Result<Self> {
        PANIC_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let _ = leave();
                previous(info);
            }));
        });

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(err).context("Failed to enter alternate screen");
        }
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Gives the terminal back to the shell, reporting failures.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be switched back.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let _ = self.terminal.show_cursor();
        leave()
    }
}

fn leave() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

impl Deref for TerminalSession {
    type Target = DashboardTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "terminal restore failed");
        }
    }
}
