//! Command window editing and `RunCommand` execution.
//!
//! `RunCommand` takes the window's input (locking it), parses it and runs
//! the command. Failures never abort the editor; they are pushed to the
//! command window as `error: <message>` and logged under `actions.apply`.
//! Behind the `/` prompt the input is a search pattern instead: edits
//! re-run the search and `RunCommand` accepts it.

use std::path::PathBuf;

use core_events::Key;
use core_model::{EditorModel, SplitDirection};
use core_state::{BufferId, EditorState};
use tracing::{debug, warn};

use super::command_parser::{CommandError, ParsedCommand, parse_command};
use super::{ApplyResult, search};
use crate::io_ops;

pub(crate) fn push_char(key: Key, model: &mut EditorModel) -> ApplyResult {
    let pushed = model.state.command.push_input(key);
    after_input_edit(pushed, model)
}

pub(crate) fn pop_char(model: &mut EditorModel) -> ApplyResult {
    let popped = model.state.command.pop_input().is_some();
    after_input_edit(popped, model)
}

fn after_input_edit(changed: bool, model: &mut EditorModel) -> ApplyResult {
    if changed && model.state.command.is_search() {
        return search::refresh(model);
    }
    ApplyResult::dirty_if(changed)
}

pub(crate) fn clear_input(state: &mut EditorState) -> ApplyResult {
    let had_input = !state.command.input_text().is_empty();
    state.command.clear_input();
    ApplyResult::dirty_if(had_input)
}

pub(crate) fn clear_output(state: &mut EditorState) -> ApplyResult {
    let had_output = !state.command.output().is_empty();
    state.command.clear_output();
    state.command.hide_if_idle();
    ApplyResult::dirty_if(had_output)
}

pub(crate) fn run(model: &mut EditorModel) -> ApplyResult {
    if model.state.command.is_search() {
        return search::accept(model);
    }
    let Some(line) = model.state.command.take_input() else {
        debug!(target: "actions.apply", "command_window_locked");
        return ApplyResult::clean();
    };
    debug!(target: "actions.apply", command = %line, "run_command");
    let outcome = parse_command(&line).and_then(|parsed| match parsed {
        Some(cmd) => execute(cmd, model),
        None => Ok(ApplyResult::dirty()),
    });
    match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(target: "actions.apply", command = %line, error = %e, "command_failed");
            model.state.command.push_output(format!("error: {e}"));
            ApplyResult::dirty()
        }
    }
}

fn execute(cmd: ParsedCommand, model: &mut EditorModel) -> Result<ApplyResult, CommandError> {
    match cmd {
        ParsedCommand::Quit => Ok(ApplyResult::quit()),
        ParsedCommand::Write(target) => write(target, model),
        ParsedCommand::Edit(path) => edit(path, model),
        ParsedCommand::ListBuffers => {
            for summary in model.state.buffers.list() {
                model.state.command.push_output(summary.to_string());
            }
            Ok(ApplyResult::dirty())
        }
        ParsedCommand::Echo(text) => {
            model.state.command.push_output(text);
            Ok(ApplyResult::dirty())
        }
        ParsedCommand::NextBuffer => {
            let current = model.active_pane().buffer;
            let next = model.state.buffers.next_id_after(current);
            Ok(switch_buffer(next, model))
        }
        ParsedCommand::PrevBuffer => {
            let current = model.active_pane().buffer;
            let prev = model.state.buffers.prev_id_before(current);
            Ok(switch_buffer(prev, model))
        }
        ParsedCommand::Split => {
            model.panes.split(SplitDirection::Horizontal);
            Ok(ApplyResult::dirty())
        }
        ParsedCommand::VSplit => {
            model.panes.split(SplitDirection::Vertical);
            Ok(ApplyResult::dirty())
        }
        ParsedCommand::Close => {
            if model.panes.close_current() {
                Ok(ApplyResult::dirty())
            } else {
                Err(CommandError::LastPane)
            }
        }
    }
}

fn write(target: Option<PathBuf>, model: &mut EditorModel) -> Result<ApplyResult, CommandError> {
    let id = model.active_pane().buffer;
    let state = &mut model.state;
    let Some(entry) = state.buffers.get_mut(id) else {
        return Err(CommandError::NoFileName);
    };
    let path = match target.or_else(|| entry.path.clone()) {
        Some(path) => path,
        None => return Err(CommandError::NoFileName),
    };
    let lines =
        io_ops::write_buffer(entry, &path).map_err(|e| CommandError::Io(format!("{e:#}")))?;
    entry.dirty = false;
    if entry.path.is_none() {
        entry.path = Some(path.clone());
    }
    state
        .command
        .push_output(format!("\"{}\" {lines}L written", path.display()));
    Ok(ApplyResult::dirty())
}

fn edit(path: PathBuf, model: &mut EditorModel) -> Result<ApplyResult, CommandError> {
    let id = match model.state.buffers.find_by_path(&path) {
        Some(id) => id,
        None => {
            let opened = io_ops::open_file(&path).map_err(|e| CommandError::Io(format!("{e:#}")))?;
            let message = if opened.is_new {
                format!("\"{}\" [New]", path.display())
            } else {
                let lines = io_ops::logical_lines(&opened.buffer);
                let mut msg = format!("\"{}\" {lines}L", path.display());
                if !opened.had_trailing_newline && opened.buffer.len_bytes() > 0 {
                    msg.push_str(" [noeol]");
                }
                msg
            };
            let id = io_ops::add_opened(&mut model.state.buffers, opened);
            model.state.command.push_output(message);
            id
        }
    };
    Ok(switch_buffer(Some(id), model))
}

fn switch_buffer(id: Option<BufferId>, model: &mut EditorModel) -> ApplyResult {
    let Some(id) = id else {
        return ApplyResult::clean();
    };
    let (state, pane) = model.split_state_and_active_pane();
    if pane.buffer == id {
        return ApplyResult::clean();
    }
    pane.show_buffer(id);
    if let Some(entry) = state.buffers.get(id) {
        pane.gutter.update(entry.buffer.line_count());
    }
    debug!(target: "actions.apply", buffer = id.get(), "switch_buffer");
    ApplyResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::test_support::model;
    use core_state::Mode;
    use pretty_assertions::assert_eq;

    fn type_command(model: &mut EditorModel, text: &str) {
        crate::apply::mode::switch_mode(Mode::Command, &mut model.state);
        for c in text.chars() {
            push_char(Key::char(c), model);
        }
    }

    #[test]
    fn unknown_command_reports_error() {
        let mut m = model("");
        type_command(&mut m, "nope");
        assert!(run(&mut m).dirty);
        assert_eq!(m.state.command.output(), ["error: command nope does not exist"]);
    }

    #[test]
    fn quit_command_quits() {
        let mut m = model("");
        type_command(&mut m, "q");
        assert!(run(&mut m).quit);
    }

    #[test]
    fn locked_window_does_not_run_twice() {
        let mut m = model("");
        type_command(&mut m, "echo hi");
        run(&mut m);
        assert_eq!(run(&mut m), ApplyResult::clean());
        assert_eq!(m.state.command.output(), ["hi"]);
    }

    #[test]
    fn backspace_and_clear_edit_input() {
        let mut m = model("");
        type_command(&mut m, "wq");
        assert!(pop_char(&mut m).dirty);
        assert_eq!(m.state.command.input_text(), "w");
        assert!(clear_input(&mut m.state).dirty);
        assert!(!pop_char(&mut m).dirty);
    }

    #[test]
    fn write_without_path_fails() {
        let mut m = model("abc");
        type_command(&mut m, "w");
        run(&mut m);
        assert_eq!(m.state.command.output(), ["error: no file name"]);
    }

    #[test]
    fn close_last_pane_is_an_error() {
        let mut m = model("");
        type_command(&mut m, "close");
        run(&mut m);
        assert_eq!(m.state.command.output(), ["error: cannot close the last pane"]);
        assert_eq!(m.panes.pane_count(), 1);
    }

    #[test]
    fn split_commands_add_panes() {
        let mut m = model("");
        type_command(&mut m, "vs");
        run(&mut m);
        type_command(&mut m, "sp");
        run(&mut m);
        assert_eq!(m.panes.pane_count(), 3);
        type_command(&mut m, "close");
        run(&mut m);
        assert_eq!(m.panes.pane_count(), 2);
    }
}
