//! Editor state: mode machine, buffer collection, command window with its
//! search session, and the line-ending metadata used when files round-trip
//! through the editor.
//!
//! Pane layout and per-pane cursors live in `core-model`; this crate stays
//! buffer-centric. `EditorModel` there pairs an `EditorState` with the pane
//! tree so action application can borrow both halves independently.
//!
//! Mode transitions:
//! - `ModeMachine::set_mode` is the only mutator of the current mode and is
//!   reached exclusively through the `SwitchMode` action.
//! - Every transition (including same-mode re-entries) is reported as a
//!   `ModeTransition` and logged under `state.mode`.

use tracing::debug;

pub mod buffers;
pub mod command_window;
pub mod search;

pub use buffers::{BufferEntry, BufferId, BufferManager, BufferSummary};
pub use command_window::{CommandWindow, SearchState};
pub use search::SearchResults;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Navigation and structural commands.
    #[default]
    Normal,
    /// Text entry into the active pane's buffer.
    Insert,
    /// Text entry into the command window.
    Command,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Insert, Mode::Command];

    /// Status line label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Old and new mode of one `set_mode` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
}

impl ModeTransition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    pub fn entered(&self, mode: Mode) -> bool {
        self.to == mode && self.from != mode
    }

    pub fn left(&self, mode: Mode) -> bool {
        self.from == mode && self.to != mode
    }
}

/// Holds the current mode out of the fixed set [`Mode::ALL`].
#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    current: Mode,
}

impl ModeMachine {
    pub fn new(initial: Mode) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn modes(&self) -> &'static [Mode] {
        &Mode::ALL
    }

    pub fn set_mode(&mut self, mode: Mode) -> ModeTransition {
        let transition = ModeTransition {
            from: self.current,
            to: mode,
        };
        self.current = mode;
        debug!(target: "state.mode", from = ?transition.from, to = ?transition.to, "mode_transition");
        transition
    }
}

/// Top-level editor state shared by every pane.
#[derive(Debug)]
pub struct EditorState {
    pub modes: ModeMachine,
    pub buffers: BufferManager,
    pub command: CommandWindow,
    /// Rows kept visible between the cursor and the pane edge when scrolling.
    pub config_vertical_margin: usize,
    /// Whether panes draw a line-number gutter.
    pub line_numbers: bool,
}

impl EditorState {
    pub fn new(buffers: BufferManager) -> Self {
        Self {
            modes: ModeMachine::default(),
            buffers,
            command: CommandWindow::default(),
            config_vertical_margin: 0,
            line_numbers: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }
}

/// Line ending style detected from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// File text converted to the LF-only form buffers store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub normalized: String,
    /// Majority style; ties resolve CRLF > LF > CR.
    pub original: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed: bool,
}

/// Count CRLF / LF / lone CR terminators and rewrite everything to LF.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                out.push('\n');
            }
            '\r' => {
                cr += 1;
                out.push('\n');
            }
            '\n' => {
                lf += 1;
                out.push('\n');
            }
            other => out.push(other),
        }
    }
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let styles_seen = [crlf, lf, cr].iter().filter(|c| **c > 0).count();
    NormalizedText {
        had_trailing_newline: out.ends_with('\n'),
        normalized: out,
        original,
        mixed: styles_seen > 1,
    }
}
