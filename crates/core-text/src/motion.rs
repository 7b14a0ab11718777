//! Cursor motion helpers over a `Buffer` + `Position` pair.
//!
//! Vertical motions carry a sticky visual column so that moving through a
//! short line and back restores the original column.

use crate::{Buffer, Position, grapheme};

/// Move left one grapheme; stops at column zero.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.byte == 0 {
        return;
    }
    if let Some(line) = buf.line(pos.line) {
        pos.byte = grapheme::prev_boundary(&line, pos.byte);
    }
}

/// Move right one grapheme; stops at end of line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if let Some(line) = buf.line(pos.line) {
        pos.byte = grapheme::next_boundary(&line, pos.byte);
    }
}

pub fn line_start(pos: &mut Position) {
    pos.byte = 0;
}

pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.byte = buf.line_byte_len(pos.line);
}

/// Move up one line. Returns the sticky column to feed into the next vertical move.
pub fn up(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    if pos.line == 0 {
        return sticky_col;
    }
    vertical(buf, pos, pos.line - 1, sticky_col)
}

/// Move down one line. Returns the sticky column to feed into the next vertical move.
pub fn down(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    if pos.line + 1 >= buf.line_count() {
        return sticky_col;
    }
    vertical(buf, pos, pos.line + 1, sticky_col)
}

fn vertical(
    buf: &Buffer,
    pos: &mut Position,
    target: usize,
    sticky_col: Option<usize>,
) -> Option<usize> {
    let col = sticky_col.unwrap_or_else(|| {
        buf.line(pos.line)
            .map(|l| grapheme::visual_col(&l, pos.byte))
            .unwrap_or(0)
    });
    pos.line = target;
    pos.byte = buf
        .line(target)
        .map(|l| grapheme::byte_at_col(&l, col))
        .unwrap_or(0);
    Some(col)
}
