//! Text edits through the active pane.
//!
//! Every edit marks the buffer modified when its byte length changes, then
//! re-clamps all panes showing the same buffer since a sibling pane may have
//! been looking at text that just disappeared.

use core_model::EditorModel;
use tracing::trace;

use super::ApplyResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    Insert(char),
    NewLine,
    OpenBelow,
    OpenAbove,
    Backspace,
    DeleteUnder,
    DeleteLine,
}

pub(crate) fn apply_edit(edit: Edit, model: &mut EditorModel) -> ApplyResult {
    let (state, pane) = model.split_state_and_active_pane();
    let Some(entry) = state.buffers.get_mut(pane.buffer) else {
        return ApplyResult::clean();
    };
    let buf = &mut entry.buffer;
    let before_len = buf.len_bytes();
    let before = pane.cursor;
    match edit {
        Edit::Insert(c) => buf.insert_char(&mut pane.cursor, c),
        Edit::NewLine => buf.insert_newline(&mut pane.cursor),
        Edit::OpenBelow => buf.open_line_below(&mut pane.cursor),
        Edit::OpenAbove => buf.open_line_above(&mut pane.cursor),
        Edit::Backspace => buf.delete_grapheme_before(&mut pane.cursor),
        Edit::DeleteUnder => buf.delete_grapheme_at(&pane.cursor),
        Edit::DeleteLine => {
            buf.delete_line(pane.cursor.line);
            pane.cursor.byte = 0;
        }
    }
    pane.cursor.clamp_to(buf);
    pane.sticky_col = None;
    let changed = buf.len_bytes() != before_len;
    if changed {
        entry.dirty = true;
    }
    trace!(
        target: "actions.apply",
        op = ?edit,
        line = before.line,
        byte = before.byte,
        to_line = pane.cursor.line,
        to_byte = pane.cursor.byte,
        changed,
        "edit"
    );
    let buffer = pane.buffer;
    if changed {
        model.clamp_panes_on(buffer);
    }
    ApplyResult::dirty_if(changed || model.active_pane().cursor != before)
}
