//! `SwitchMode`: the only path that writes the mode machine.
//!
//! Entering Command mode activates the command window (input cleared,
//! unlocked, shown). Leaving it drops any unsent input, ends a search
//! session and hides the window unless command output is still on display.

use core_state::{EditorState, Mode};

use super::ApplyResult;

pub(crate) fn switch_mode(mode: Mode, state: &mut EditorState) -> ApplyResult {
    let transition = state.modes.set_mode(mode);
    if transition.entered(Mode::Command) {
        state.command.activate();
    }
    if transition.left(Mode::Command) {
        state.command.end_search();
        state.command.clear_input();
        state.command.hide_if_idle();
    }
    ApplyResult::dirty_if(transition.is_change())
}
