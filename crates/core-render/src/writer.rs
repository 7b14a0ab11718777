//! Queued terminal output.
//!
//! A [`Writer`] collects primitive commands for one frame and flushes them in
//! order to any `io::Write` sink with a single `flush` at the end. Positions
//! are absolute with a (0,0) origin.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
};

use crate::{CellFlags, Frame};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Print(String),
    Reverse(bool),
    ShowCursor(bool),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands that repaint every row of `frame` and place the cursor.
    pub fn from_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        w.cmds.push(Command::ShowCursor(false));
        let mut reverse = false;
        for y in 0..frame.height {
            w.move_to(0, y);
            let mut run = String::new();
            for (cluster, _, flags, _) in frame.row_leaders(y) {
                let want = flags.contains(CellFlags::REVERSE);
                if want != reverse {
                    w.print(std::mem::take(&mut run));
                    w.cmds.push(Command::Reverse(want));
                    reverse = want;
                }
                run.push_str(cluster);
            }
            w.print(run);
        }
        if reverse {
            w.cmds.push(Command::Reverse(false));
        }
        if let Some((x, y)) = frame.cursor {
            w.move_to(x, y);
            w.cmds.push(Command::ShowCursor(true));
        }
        w
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Reverse(true) => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::Reverse(false) => queue!(out, SetAttribute(Attribute::NoReverse))?,
                Command::ShowCursor(true) => queue!(out, Show)?,
                Command::ShowCursor(false) => queue!(out, Hide)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Paint `frame` to `out`.
pub fn paint<W: Write>(frame: &Frame, out: &mut W) -> Result<()> {
    let writer = Writer::from_frame(frame);
    tracing::trace!(target: "render", commands = writer.commands().len(), "paint");
    writer.flush_to(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reverse_runs_are_bracketed() {
        let mut f = Frame::new(3, 1);
        f.put_str(0, 0, 1, "a", CellFlags::empty());
        f.put_str(1, 0, 2, "bc", CellFlags::REVERSE);
        let w = Writer::from_frame(&f);
        assert_eq!(
            w.commands(),
            [
                Command::ShowCursor(false),
                Command::MoveTo(0, 0),
                Command::Print("a".into()),
                Command::Reverse(true),
                Command::Print("bc".into()),
                Command::Reverse(false),
            ]
        );
    }

    #[test]
    fn cursor_is_placed_last() {
        let mut f = Frame::new(2, 1);
        f.cursor = Some((1, 0));
        let w = Writer::from_frame(&f);
        assert_eq!(
            &w.commands()[w.commands().len() - 2..],
            [Command::MoveTo(1, 0), Command::ShowCursor(true)]
        );
    }

    #[test]
    fn flush_writes_escape_sequences() {
        let mut f = Frame::new(2, 1);
        f.put_str(0, 0, 2, "hi", CellFlags::empty());
        let mut out = Vec::new();
        paint(&f, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi"));
    }
}
