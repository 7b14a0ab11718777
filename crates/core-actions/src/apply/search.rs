//! Incremental search behind the `/` prompt.
//!
//! Every change to the pattern re-runs the search from the position the
//! cursor had when the search began and jumps to the closest match at or
//! after it. With no match the cursor goes back to that anchor. Left/Right
//! step through the matches, wrapping at either end.

use core_model::{EditorModel, Pane};
use core_state::{Mode, SearchResults};
use core_text::Position;
use tracing::{debug, trace};

use super::ApplyResult;

pub(crate) fn begin(model: &mut EditorModel) -> ApplyResult {
    if model.state.mode() != Mode::Command {
        return ApplyResult::clean();
    }
    let anchor = model.active_pane().cursor;
    model.state.command.activate_search(anchor);
    debug!(target: "actions.apply", line = anchor.line, byte = anchor.byte, "search_begin");
    ApplyResult::dirty()
}

/// Search again for the current input and move the cursor to the result.
pub(crate) fn refresh(model: &mut EditorModel) -> ApplyResult {
    let (state, pane) = model.split_state_and_active_pane();
    let Some(entry) = state.buffers.get(pane.buffer) else {
        return ApplyResult::clean();
    };
    let pattern = state.command.input_text().to_owned();
    let Some(search) = state.command.search_mut() else {
        return ApplyResult::clean();
    };
    search.results = SearchResults::find(&pattern, &entry.buffer, search.anchor);
    trace!(target: "actions.apply", %pattern, matches = search.results.len(), "search_refresh");
    let target = search.results.current().unwrap_or(search.anchor);
    jump(pane, target);
    ApplyResult::dirty()
}

pub(crate) fn step(forward: bool, model: &mut EditorModel) -> ApplyResult {
    let (state, pane) = model.split_state_and_active_pane();
    let Some(search) = state.command.search_mut() else {
        return ApplyResult::clean();
    };
    let target = if forward {
        search.results.next()
    } else {
        search.results.prev()
    };
    match target {
        Some(pos) => ApplyResult::dirty_if(jump(pane, pos)),
        None => ApplyResult::clean(),
    }
}

/// Finish the search on Enter. The cursor stays on the selected match.
pub(crate) fn accept(model: &mut EditorModel) -> ApplyResult {
    let command = &mut model.state.command;
    let Some(pattern) = command.take_input() else {
        return ApplyResult::clean();
    };
    let found = command.search().is_some_and(|s| !s.results.is_empty());
    debug!(target: "actions.apply", %pattern, found, "search_accept");
    if !found && !pattern.is_empty() {
        command.push_output(format!("pattern not found: {pattern}"));
    }
    ApplyResult::dirty()
}

fn jump(pane: &mut Pane, to: Position) -> bool {
    pane.sticky_col = None;
    if pane.cursor == to {
        return false;
    }
    pane.cursor = to;
    true
}
