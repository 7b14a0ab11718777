//! Editor model: panes, the pane split tree, and the `EditorModel` that pairs
//! them with the shared `EditorState`.
//!
//! A `Pane` owns presentation state only (cursor, first visible line, sticky
//! column, gutter width). Text lives in `core-state`'s `BufferManager`; a pane
//! names its buffer by id, so the same buffer may be shown in several panes.
//!
//! Split duplication: splitting a pane gives the new sibling the same buffer
//! id plus a copy of the cursor and scroll state. Edits through either pane are
//! visible in both; cursor and scroll are independent from then on.
//!
//! Core invariants (must hold after every public call):
//! * The pane tree has at least one leaf and every split has two children.
//! * The manager's current node is a leaf reachable from the root.
//! * Every pane's buffer id names a live entry in the `BufferManager`.
//! * The active pane's cursor is inside its buffer except transiently inside
//!   mutation helpers before re-clamp.

use core_state::{BufferEntry, BufferId, EditorState};
use core_text::{Buffer, Position};

mod layout;
mod pane_manager;
mod pane_tree;

pub use layout::{Layout, LayoutRegion};
pub use pane_manager::PaneManager;
pub use pane_tree::{Direction, InvariantError, NodeId, PaneTree, SplitDirection};

/// Rows at the bottom of every pane region taken by its status line.
pub const PANE_STATUS_ROWS: u16 = 1;

/// Line-number gutter state for one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GutterState {
    pub enabled: bool,
    /// Columns including one trailing space; 0 when disabled.
    pub width: u16,
}

impl GutterState {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, width: 0 }
    }

    /// Recompute the width for a buffer of `line_count` lines. Returns true
    /// when it changed.
    pub fn update(&mut self, line_count: usize) -> bool {
        let width = if self.enabled {
            let digits = line_count.max(1).ilog10() as u16 + 1;
            digits.max(3) + 1
        } else {
            0
        };
        let changed = width != self.width;
        self.width = width;
        changed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    pub buffer: BufferId,
    pub cursor: Position,
    pub viewport_first_line: usize,
    /// Visual column kept across vertical motions; reset by horizontal ones.
    pub sticky_col: Option<usize>,
    pub gutter: GutterState,
}

impl Pane {
    pub fn new(buffer: BufferId) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            viewport_first_line: 0,
            sticky_col: None,
            gutter: GutterState::new(true),
        }
    }

    /// Sibling created by a split: same buffer, copied view state.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Point the pane at another buffer, resetting its view.
    pub fn show_buffer(&mut self, buffer: BufferId) {
        self.buffer = buffer;
        self.cursor = Position::origin();
        self.viewport_first_line = 0;
        self.sticky_col = None;
    }

    pub fn clamp_cursor(&mut self, buffer: &Buffer) {
        self.cursor.clamp_to(buffer);
    }

    /// Scroll so the cursor stays inside `text_height` rows with `margin`
    /// rows of context. Returns true if the first visible line changed.
    pub fn auto_scroll(&mut self, text_height: usize, margin: usize) -> bool {
        match compute_scroll_intent(self.viewport_first_line, self.cursor.line, text_height, margin) {
            Some(first) => {
                self.viewport_first_line = first;
                true
            }
            None => false,
        }
    }
}

/// New first visible line that keeps `cursor_line` inside the viewport with
/// `margin` rows above and below (margin clamped to half the height), or
/// `None` when no scroll is needed.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height / 2);
    let new_first = if cursor_line < first + m {
        cursor_line.saturating_sub(m)
    } else if cursor_line + m >= first + text_height {
        cursor_line + m + 1 - text_height
    } else {
        return None;
    };
    (new_first != first).then_some(new_first)
}

/// Editor state plus pane layout.
#[derive(Debug)]
pub struct EditorModel {
    pub state: EditorState,
    pub panes: PaneManager,
}

impl EditorModel {
    /// Model with a single pane showing `initial`.
    pub fn new(state: EditorState, initial: BufferId) -> Self {
        let mut pane = Pane::new(initial);
        pane.gutter = GutterState::new(state.line_numbers);
        if let Some(entry) = state.buffers.get(initial) {
            pane.gutter.update(entry.buffer.line_count());
        }
        Self {
            state,
            panes: PaneManager::new(pane),
        }
    }

    pub fn active_pane(&self) -> &Pane {
        self.panes.current_pane()
    }

    pub fn active_pane_mut(&mut self) -> &mut Pane {
        self.panes.current_pane_mut()
    }

    pub fn active_entry(&self) -> Option<&BufferEntry> {
        self.state.buffers.get(self.active_pane().buffer)
    }

    /// Disjoint borrows of the state and the active pane.
    pub fn split_state_and_active_pane(&mut self) -> (&mut EditorState, &mut Pane) {
        (&mut self.state, self.panes.current_pane_mut())
    }

    /// Re-clamp every pane showing `buffer` after its text changed (another
    /// pane may have deleted the lines it was looking at).
    pub fn clamp_panes_on(&mut self, buffer: BufferId) {
        let Some(entry) = self.state.buffers.get(buffer) else {
            return;
        };
        for pane in self.panes.panes_mut().filter(|p| p.buffer == buffer) {
            pane.clamp_cursor(&entry.buffer);
            pane.gutter.update(entry.buffer.line_count());
        }
    }
}
