//! Raw-mode / alternate-screen session over crossterm.
//!
//! [`TerminalSession::start`] switches the terminal into raw mode on the
//! alternate screen and returns a guard; dropping the guard (normal return,
//! early `?`, or unwinding) puts the terminal back. The panic hook in the
//! binary calls [`restore`] directly because it runs before unwinding drops
//! anything.

use std::io::{Write, stdout};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, warn};

/// Active terminal session. Leaves raw mode and the alternate screen on drop.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        debug!(target: "runtime.terminal", "session_started");
        Ok(Self { active: true })
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    /// Leave the session now instead of at drop. Idempotent.
    pub fn finish(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            leave()?;
            debug!(target: "runtime.terminal", "session_finished");
        }
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!(target: "runtime.terminal", error = %e, "terminal_restore_failed");
        }
    }
}

/// Current terminal size as `(columns, rows)`.
pub fn size() -> Result<(u16, u16)> {
    Ok(terminal::size()?)
}

/// Best-effort restore for panic hooks. Errors are ignored.
pub fn restore() {
    let _ = leave();
    let _ = stdout().flush();
}

fn leave() -> Result<()> {
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}
