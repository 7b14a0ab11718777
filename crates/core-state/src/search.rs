//! Plain-substring search over a buffer.
//!
//! Matches are collected line by line, may overlap, and are ordered by
//! position. [`SearchResults`] keeps a cursor into that list that wraps in
//! both directions.

use core_text::{Buffer, Position};

/// Start of every occurrence of `pattern`, in buffer order. An empty pattern
/// matches nothing.
pub fn find_all(pattern: &str, buffer: &Buffer) -> Vec<Position> {
    if pattern.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for line_idx in 0..buffer.line_count() {
        let Some(line) = buffer.line(line_idx) else {
            continue;
        };
        let mut start = 0;
        while let Some(offset) = line[start..].find(pattern) {
            let at = start + offset;
            found.push(Position::new(line_idx, at));
            // Step one char so overlapping occurrences are kept.
            start = at + line[at..].chars().next().map_or(1, char::len_utf8);
        }
    }
    found
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    matches: Vec<Position>,
    current: usize,
}

impl SearchResults {
    /// Search `buffer` and select the first match at or after `from`,
    /// wrapping to the first match of the buffer.
    pub fn find(pattern: &str, buffer: &Buffer, from: Position) -> Self {
        let matches = find_all(pattern, buffer);
        let current = matches.iter().position(|m| *m >= from).unwrap_or(0);
        Self { matches, current }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn current(&self) -> Option<Position> {
        self.matches.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<Position> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<Position> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = self.current.checked_sub(1).unwrap_or(self.matches.len() - 1);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_matches_are_found() {
        let b = Buffer::from_str("t", "aaa\nbaa");
        assert_eq!(
            find_all("aa", &b),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );
        assert!(find_all("", &b).is_empty());
        assert!(find_all("zz", &b).is_empty());
    }

    #[test]
    fn multibyte_lines_step_on_char_boundaries() {
        let b = Buffer::from_str("t", "éé x é");
        assert_eq!(
            find_all("é", &b),
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(0, 7)]
        );
    }

    #[test]
    fn selection_starts_at_or_after_origin() {
        let b = Buffer::from_str("t", "foo\nfoo\nfoo");
        let r = SearchResults::find("foo", &b, Position::new(1, 1));
        assert_eq!(r.current(), Some(Position::new(2, 0)));
        let r = SearchResults::find("foo", &b, Position::new(2, 1));
        assert_eq!(r.current(), Some(Position::new(0, 0)));
    }

    #[test]
    fn stepping_wraps_both_ways() {
        let b = Buffer::from_str("t", "x\nx");
        let mut r = SearchResults::find("x", &b, Position::origin());
        assert_eq!(r.next(), Some(Position::new(1, 0)));
        assert_eq!(r.next(), Some(Position::new(0, 0)));
        assert_eq!(r.prev(), Some(Position::new(1, 0)));
        assert_eq!(r.current(), Some(Position::new(1, 0)));
        let mut none = SearchResults::default();
        assert_eq!(none.next(), None);
        assert_eq!(none.prev(), None);
    }
}
