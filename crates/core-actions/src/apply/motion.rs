//! Cursor motion in the active pane.

use core_model::EditorModel;
use core_text::motion;

use super::ApplyResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Motion {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
}

pub(crate) fn apply_motion(m: Motion, model: &mut EditorModel) -> ApplyResult {
    let (state, pane) = model.split_state_and_active_pane();
    let Some(entry) = state.buffers.get(pane.buffer) else {
        return ApplyResult::clean();
    };
    let buf = &entry.buffer;
    let before = pane.cursor;
    match m {
        Motion::Up => pane.sticky_col = motion::up(buf, &mut pane.cursor, pane.sticky_col),
        Motion::Down => pane.sticky_col = motion::down(buf, &mut pane.cursor, pane.sticky_col),
        Motion::Left => {
            motion::left(buf, &mut pane.cursor);
            pane.sticky_col = None;
        }
        Motion::Right => {
            motion::right(buf, &mut pane.cursor);
            pane.sticky_col = None;
        }
        Motion::LineStart => {
            motion::line_start(&mut pane.cursor);
            pane.sticky_col = None;
        }
        Motion::LineEnd => {
            motion::line_end(buf, &mut pane.cursor);
            pane.sticky_col = None;
        }
    }
    ApplyResult::dirty_if(pane.cursor != before)
}
