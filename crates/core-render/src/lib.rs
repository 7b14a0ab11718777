//! Full-frame painter.
//!
//! Every render builds a [`Frame`] from the editor model (pane text, gutters,
//! status lines, separators, command window) and then translates it into
//! queued crossterm commands through the [`writer::Writer`]. Building the
//! frame touches no terminal, so layout and content are testable in
//! isolation.
//!
//! Cells hold whole grapheme clusters. A cluster wider than one column owns
//! a leader cell followed by zero-width continuation cells; emission skips
//! continuations.

use bitflags::bitflags;

pub mod compose;
pub mod status;
pub mod writer;

pub use compose::{FrameInput, compose_frame};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Grapheme cluster for leader cells, empty for continuations.
    pub cluster: String,
    /// Columns covered; `0` marks a continuation cell.
    pub width: u8,
    pub flags: CellFlags,
}

impl Cell {
    pub fn leader(cluster: &str, width: u16, flags: CellFlags) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.clamp(1, u8::MAX as u16) as u8,
            flags,
        }
    }

    pub fn continuation(flags: CellFlags) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            flags,
        }
    }

    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::leader(" ", 1, CellFlags::empty())
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    /// Terminal cursor position, hidden when `None`.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            cursor: None,
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Place a cluster at (x, y), filling continuation cells for its width.
    /// Clusters that would straddle the right edge are dropped.
    pub fn set_cluster(&mut self, x: u16, y: u16, cluster: &str, width: u16, flags: CellFlags) {
        let width = width.max(1);
        if y >= self.height || x.saturating_add(width) > self.width {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(cluster, width, flags);
        }
        for dx in 1..width {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx] = Cell::continuation(flags);
            }
        }
    }

    /// Write `text` starting at (x, y) without crossing `max_width` columns.
    /// Tabs expand to blanks. Returns the columns consumed.
    pub fn put_str(&mut self, x: u16, y: u16, max_width: u16, text: &str, flags: CellFlags) -> u16 {
        use unicode_segmentation::UnicodeSegmentation;

        let mut used = 0u16;
        for g in text.graphemes(true) {
            let w = core_text::grapheme::cluster_width(g) as u16;
            if used + w > max_width {
                break;
            }
            if g == "\t" {
                for dx in 0..w {
                    self.set_cluster(x + used + dx, y, " ", 1, flags);
                }
            } else {
                self.set_cluster(x + used, y, g, w, flags);
            }
            used += w;
        }
        used
    }

    /// Blank `width` cells from (x, y) with the given flags.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, flags: CellFlags) {
        for dx in 0..width {
            self.set_cluster(x.saturating_add(dx), y, " ", 1, flags);
        }
    }

    /// Leader cells of a row as `(cluster, width, flags, x)`.
    pub fn row_leaders(&self, y: u16) -> impl Iterator<Item = (&str, u16, CellFlags, u16)> + '_ {
        let start = y as usize * self.width as usize;
        let row = if y < self.height {
            self.cells.get(start..start + self.width as usize).unwrap_or(&[])
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|(_, c)| c.is_leader())
            .map(|(x, c)| (c.cluster.as_str(), c.width as u16, c.flags, x as u16))
    }

    /// Row contents as plain text with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let text: String = self.row_leaders(y).map(|(c, ..)| c).collect();
        text.trim_end().to_string()
    }
}
