//! Rope-backed text buffer consumed by panes through narrow edit and query calls.
//!
//! Positions are `(line, byte)` pairs where `byte` is an offset into the line
//! content (the trailing newline is never addressable). Edits keep positions on
//! grapheme boundaries; callers only ever hand back positions produced here or
//! by [`motion`].
//!
//! Only `'\n'` breaks lines. Form feeds, NEL and the Unicode line and
//! paragraph separators are ordinary characters inside a line.

use ropey::Rope;

pub mod motion;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// Cursor location inside a buffer: line index plus byte offset within that line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Pull the position back inside `buf` (last line, end of line).
    pub fn clamp_to(&mut self, buf: &Buffer) {
        let last = buf.line_count().saturating_sub(1);
        if self.line > last {
            self.line = last;
        }
        let len = buf.line_byte_len(self.line);
        if self.byte > len {
            self.byte = len;
        }
    }
}

impl Buffer {
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            name: name.into(),
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_str(name, "")
    }

    /// Number of lines. An empty buffer still has one (empty) line; a trailing
    /// newline opens a final empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its newline.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Byte length of a line excluding its newline; 0 past the end.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(idx);
        let len = line.len_bytes();
        if len > 0 && line.char(line.len_chars() - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Whole buffer as one string (LF line endings).
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    fn char_index(&self, pos: &Position) -> usize {
        let line_start = self.rope.line_to_byte(pos.line);
        self.rope.byte_to_char(line_start + pos.byte)
    }

    /// Insert one character; the position advances past it.
    pub fn insert_char(&mut self, pos: &mut Position, ch: char) {
        if ch == '\n' {
            self.insert_newline(pos);
            return;
        }
        let idx = self.char_index(pos);
        self.rope.insert_char(idx, ch);
        pos.byte += ch.len_utf8();
    }

    /// Split the line at the position; the position moves to the start of the new line.
    pub fn insert_newline(&mut self, pos: &mut Position) {
        let idx = self.char_index(pos);
        self.rope.insert_char(idx, '\n');
        pos.line += 1;
        pos.byte = 0;
    }

    /// Open an empty line below `pos.line` and move there.
    pub fn open_line_below(&mut self, pos: &mut Position) {
        pos.byte = self.line_byte_len(pos.line);
        self.insert_newline(pos);
    }

    /// Open an empty line above `pos.line` and move there.
    pub fn open_line_above(&mut self, pos: &mut Position) {
        let idx = self.rope.line_to_char(pos.line);
        self.rope.insert_char(idx, '\n');
        pos.byte = 0;
    }

    /// Delete the grapheme before the position (backspace). At column zero the
    /// line is joined onto the previous one.
    pub fn delete_grapheme_before(&mut self, pos: &mut Position) {
        if pos.byte == 0 {
            if pos.line == 0 {
                return;
            }
            let prev = pos.line - 1;
            let prev_len = self.line_byte_len(prev);
            let nl = self.char_index(&Position::new(prev, prev_len));
            if self.rope.get_char(nl) != Some('\n') {
                return;
            }
            self.rope.remove(nl..nl + 1);
            pos.line = prev;
            pos.byte = prev_len;
            return;
        }
        let Some(line) = self.line(pos.line) else {
            return;
        };
        let start = grapheme::prev_boundary(&line, pos.byte);
        let from = self.char_index(&Position::new(pos.line, start));
        let to = self.char_index(pos);
        self.rope.remove(from..to);
        pos.byte = start;
    }

    /// Delete the grapheme under the position. No-op at end of line.
    pub fn delete_grapheme_at(&mut self, pos: &Position) {
        let Some(line) = self.line(pos.line) else {
            return;
        };
        if pos.byte >= line.len() {
            return;
        }
        let end = grapheme::next_boundary(&line, pos.byte);
        let from = self.char_index(pos);
        let to = self.char_index(&Position::new(pos.line, end));
        self.rope.remove(from..to);
    }

    /// Remove a whole line (with its newline) and return its content. The last
    /// remaining line is emptied instead of removed.
    pub fn delete_line(&mut self, line: usize) -> Option<String> {
        let text = self.line(line)?;
        let count = self.line_count();
        let start = self.rope.line_to_char(line);
        let end = if line + 1 < count {
            self.rope.line_to_char(line + 1)
        } else if line > 0 {
            // Last line: take the preceding newline instead.
            let end = self.rope.len_chars();
            let start = start - 1;
            self.rope.remove(start..end);
            return Some(text);
        } else {
            self.rope.len_chars()
        };
        self.rope.remove(start..end);
        Some(text)
    }
}

/// Grapheme helpers operating on a single line of text.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    /// Start of the grapheme ending at or before `byte` (0 at line start).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        line.grapheme_indices(true)
            .map(|(idx, _)| idx)
            .take_while(|idx| *idx < byte)
            .last()
            .unwrap_or(0)
    }

    /// Start of the grapheme after the one at `byte` (line length at the end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        line.grapheme_indices(true)
            .map(|(idx, _)| idx)
            .find(|idx| *idx > byte)
            .unwrap_or(line.len())
    }

    /// Terminal cells a grapheme occupies; zero-width clusters still take one cell.
    pub fn cluster_width(g: &str) -> usize {
        if g == "\t" {
            return 4;
        }
        UnicodeWidthStr::width(g).max(1)
    }

    /// Visual column of `byte` within `line`.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        line.grapheme_indices(true)
            .take_while(|(idx, _)| *idx < byte)
            .map(|(_, g)| cluster_width(g))
            .sum()
    }

    /// Byte offset of the grapheme covering visual column `col`, clamped to line end.
    pub fn byte_at_col(line: &str, col: usize) -> usize {
        let mut acc = 0;
        for (idx, g) in line.grapheme_indices(true) {
            let w = cluster_width(g);
            if acc + w > col {
                return idx;
            }
            acc += w;
        }
        line.len()
    }
}
