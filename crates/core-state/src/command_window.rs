//! Command window: the `:` (or search `/`) prompt plus the output lines commands produce.
//!
//! Lifecycle:
//! - Entering Command mode calls [`CommandWindow::activate`]: input cleared,
//!   window unlocked and shown.
//! - `RunCommand` takes the input with [`CommandWindow::take_input`], which
//!   locks the window until the next activation so a stray Enter cannot run
//!   the same line twice.
//! - Output persists after leaving Command mode and is cleared on the next
//!   entry (`ClearCommandOutput` precedes `SwitchMode(Command)` in the
//!   default bindings).
//! - A search session ([`CommandWindow::activate_search`]) reuses the same
//!   input line behind a `/` prompt. It remembers where the cursor was when
//!   the session began so every edit of the pattern searches from there.

use core_events::Key;
use core_text::Position;

use crate::search::SearchResults;

const COMMAND_PROMPT: &str = ":";
const SEARCH_PROMPT: &str = "/";

/// An incremental search in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Cursor position when the search began.
    pub anchor: Position,
    pub results: SearchResults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandWindow {
    input: String,
    output: Vec<String>,
    shown: bool,
    locked: bool,
    search: Option<SearchState>,
}

impl CommandWindow {
    pub fn activate(&mut self) {
        self.input.clear();
        self.locked = false;
        self.shown = true;
        self.search = None;
    }

    /// Turn the active window into a search prompt anchored at `anchor`.
    pub fn activate_search(&mut self, anchor: Position) {
        self.search = Some(SearchState {
            anchor,
            results: SearchResults::default(),
        });
    }

    pub fn is_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchState> {
        self.search.as_mut()
    }

    pub fn end_search(&mut self) -> Option<SearchState> {
        self.search.take()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_search() {
            SEARCH_PROMPT
        } else {
            COMMAND_PROMPT
        }
    }

    /// Append the key's text form. Keys without one are ignored and reported
    /// as `false`.
    pub fn push_input(&mut self, key: Key) -> bool {
        if self.locked {
            return false;
        }
        match key.as_insertable_char() {
            Some(c) => {
                self.input.push(c);
                true
            }
            None => false,
        }
    }

    pub fn pop_input(&mut self) -> Option<char> {
        self.input.pop()
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// Hand the current input to the command runner and lock the window.
    /// Returns `None` when already locked.
    pub fn take_input(&mut self) -> Option<String> {
        if self.locked {
            return None;
        }
        self.locked = true;
        Some(std::mem::take(&mut self.input))
    }

    pub fn push_output(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
        self.shown = true;
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Hide the window once it has nothing left to show.
    pub fn hide_if_idle(&mut self) {
        if self.output.is_empty() {
            self.shown = false;
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Rows the renderer reserves: one prompt row plus every output line.
    pub fn rows(&self) -> usize {
        if self.shown { 1 + self.output.len() } else { 0 }
    }
}
