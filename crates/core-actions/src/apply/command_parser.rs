//! Command line parsing.
//!
//! Turns the command window's text (without the `:` prompt) into a
//! [`ParsedCommand`]. Pure classification; execution lives in `command`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Quit,
    /// `:w` writes to the buffer's own path, `:w <path>` to `path`.
    Write(Option<PathBuf>),
    Edit(PathBuf),
    ListBuffers,
    Echo(String),
    NextBuffer,
    PrevBuffer,
    Split,
    VSplit,
    Close,
}

/// Failures reported to the command window as `error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command {0} does not exist")]
    Unknown(String),
    #[error("{0} requires an argument")]
    MissingArgument(&'static str),
    #[error("{0} takes no arguments")]
    UnexpectedArgument(&'static str),
    #[error("no file name")]
    NoFileName,
    #[error("cannot close the last pane")]
    LastPane,
    #[error("{0}")]
    Io(String),
}

/// `Ok(None)` for an empty line.
pub fn parse_command(line: &str) -> Result<Option<ParsedCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let no_args = |cmd: &'static str, parsed: ParsedCommand| match arg {
        None => Ok(Some(parsed)),
        Some(_) => Err(CommandError::UnexpectedArgument(cmd)),
    };

    match name {
        "q" | "quit" => no_args("quit", ParsedCommand::Quit),
        "w" | "write" => Ok(Some(ParsedCommand::Write(arg.map(PathBuf::from)))),
        "e" | "edit" => match arg {
            Some(path) => Ok(Some(ParsedCommand::Edit(PathBuf::from(path)))),
            None => Err(CommandError::MissingArgument("edit")),
        },
        "ls" | "buffers" => no_args("ls", ParsedCommand::ListBuffers),
        "echo" => Ok(Some(ParsedCommand::Echo(rest.to_string()))),
        "bn" | "bnext" => no_args("bnext", ParsedCommand::NextBuffer),
        "bp" | "bprev" => no_args("bprev", ParsedCommand::PrevBuffer),
        "sp" | "split" => no_args("split", ParsedCommand::Split),
        "vs" | "vsplit" => no_args("vsplit", ParsedCommand::VSplit),
        "close" => no_args("close", ParsedCommand::Close),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
