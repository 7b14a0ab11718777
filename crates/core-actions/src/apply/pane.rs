use core_model::{Direction, EditorModel, SplitDirection};
use tracing::debug;

use super::ApplyResult;

pub(crate) fn split(direction: SplitDirection, model: &mut EditorModel) -> ApplyResult {
    let id = model.panes.split(direction);
    debug!(target: "layout.panes", ?direction, current = id.index(), panes = model.panes.pane_count(), "split");
    ApplyResult::dirty()
}

/// Close the active pane. The last pane stays open.
pub(crate) fn close(model: &mut EditorModel) -> ApplyResult {
    ApplyResult::dirty_if(model.panes.close_current())
}

pub(crate) fn focus(direction: Direction, model: &mut EditorModel) -> ApplyResult {
    ApplyResult::dirty_if(model.panes.focus(direction))
}
