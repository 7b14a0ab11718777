//! Applying `Action`s to an `EditorModel`.
//!
//! Sub-modules by concern:
//! * `motion`  - cursor movement in the active pane
//! * `mode`    - `SwitchMode`, the single writer of the mode machine
//! * `edit`    - buffer text mutation through the active pane
//! * `pane`    - splits, closes and focus moves on the pane tree
//! * `command` - command window editing and `RunCommand`
//! * `search`  - incremental search behind the `/` prompt

use core_model::{Direction, EditorModel, SplitDirection};
use tracing::trace;

use crate::Action;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod pane;
mod search;

pub use command_parser::{CommandError, ParsedCommand, parse_command};

/// Outcome of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyResult {
    /// Something visible changed; repaint.
    pub dirty: bool,
    /// Stop the main loop.
    pub quit: bool,
}

impl ApplyResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }

    pub fn clean() -> Self {
        Self::default()
    }

    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }

    pub(crate) fn dirty_if(changed: bool) -> Self {
        Self {
            dirty: changed,
            quit: false,
        }
    }

    pub fn merge(self, other: ApplyResult) -> Self {
        Self {
            dirty: self.dirty || other.dirty,
            quit: self.quit || other.quit,
        }
    }
}

pub fn apply(action: Action, model: &mut EditorModel) -> ApplyResult {
    use edit::Edit;
    use motion::Motion;

    let result = match action {
        Action::Exit => ApplyResult::quit(),
        Action::SwitchMode(mode) => mode::switch_mode(mode, &mut model.state),

        Action::CursorUp => motion::apply_motion(Motion::Up, model),
        Action::CursorDown => motion::apply_motion(Motion::Down, model),
        Action::CursorLeft => motion::apply_motion(Motion::Left, model),
        Action::CursorRight => motion::apply_motion(Motion::Right, model),
        Action::LineStart => motion::apply_motion(Motion::LineStart, model),
        Action::LineEnd => motion::apply_motion(Motion::LineEnd, model),

        Action::SplitVertical => pane::split(SplitDirection::Vertical, model),
        Action::SplitHorizontal => pane::split(SplitDirection::Horizontal, model),
        Action::ClosePane => pane::close(model),
        Action::PaneUp => pane::focus(Direction::Up, model),
        Action::PaneDown => pane::focus(Direction::Down, model),
        Action::PaneLeft => pane::focus(Direction::Left, model),
        Action::PaneRight => pane::focus(Direction::Right, model),

        Action::InsertChar(key) => match key.as_insertable_char() {
            Some(c) => edit::apply_edit(Edit::Insert(c), model),
            None => {
                trace!(target: "actions.apply", key = %key, "insert_ignored_non_text_key");
                ApplyResult::clean()
            }
        },
        Action::InsertNewLine => edit::apply_edit(Edit::NewLine, model),
        Action::InsertNewLineBelow => edit::apply_edit(Edit::OpenBelow, model),
        Action::InsertNewLineAbove => edit::apply_edit(Edit::OpenAbove, model),
        Action::Backspace => edit::apply_edit(Edit::Backspace, model),
        Action::DeleteChar => edit::apply_edit(Edit::DeleteUnder, model),
        Action::DeleteLine => edit::apply_edit(Edit::DeleteLine, model),

        Action::InsertCommandChar(key) => command::push_char(key, model),
        Action::DeleteCommandChar => command::pop_char(model),
        Action::ClearCommandInput => command::clear_input(&mut model.state),
        Action::ClearCommandOutput => command::clear_output(&mut model.state),
        Action::RunCommand => command::run(model),

        Action::BeginSearch => search::begin(model),
        Action::SearchNext => search::step(true, model),
        Action::SearchPrev => search::step(false, model),
    };
    trace!(
        target: "actions.apply",
        ?action,
        dirty = result.dirty,
        quit = result.quit,
        "applied"
    );
    result
}

/// Apply `actions` in order, stopping after the first one that quits.
pub fn apply_all(actions: &[Action], model: &mut EditorModel) -> ApplyResult {
    let mut acc = ApplyResult::clean();
    for action in actions {
        acc = acc.merge(apply(*action, model));
        if acc.quit {
            break;
        }
    }
    acc
}


#[cfg(test)]
mod tests {
    use super::test_support::model;
    use super::*;
    use core_events::Key;
    use core_state::Mode;

    #[test]
    fn exit_quits_and_stops_the_batch() {
        let mut m = model("abc");
        let r = apply_all(
            &[Action::Exit, Action::SwitchMode(Mode::Insert)],
            &mut m,
        );
        assert!(r.quit);
        assert_eq!(m.state.mode(), Mode::Normal);
    }

    #[test]
    fn non_text_insert_is_ignored() {
        let mut m = model("abc");
        let r = apply(Action::InsertChar(Key::Special(core_events::SpecialKey::F(5))), &mut m);
        assert!(!r.dirty);
        assert_eq!(m.active_entry().map(|e| e.buffer.contents()), Some("abc".into()));
    }

    #[test]
    fn merge_is_sticky() {
        let r = ApplyResult::clean().merge(ApplyResult::dirty()).merge(ApplyResult::clean());
        assert_eq!(r, ApplyResult::dirty());
    }
}
