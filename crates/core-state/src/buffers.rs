//! Buffer collection. Panes reference buffers by [`BufferId`]; the manager is
//! the sole owner, so two panes naming the same id see the same text.

use std::path::{Path, PathBuf};

use core_text::Buffer;
use tracing::debug;

use crate::LineEnding;

/// Stable handle for a buffer. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u32);

impl BufferId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A buffer plus the file metadata needed to write it back.
#[derive(Debug, Clone)]
pub struct BufferEntry {
    pub id: BufferId,
    pub buffer: Buffer,
    pub path: Option<PathBuf>,
    pub dirty: bool,
    pub line_ending: LineEnding,
    pub had_trailing_newline: bool,
}

/// One row of `:ls` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSummary {
    pub id: BufferId,
    pub name: String,
    pub path: Option<PathBuf>,
    pub dirty: bool,
}

impl std::fmt::Display for BufferSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.dirty { "+" } else { " " };
        match &self.path {
            Some(p) => write!(f, "{:>3}{marker} \"{}\"", self.id.get(), p.display()),
            None => write!(f, "{:>3}{marker} [{}]", self.id.get(), self.name),
        }
    }
}

#[derive(Debug, Default)]
pub struct BufferManager {
    entries: Vec<BufferEntry>,
    next_id: u32,
}

impl BufferManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager holding a single scratch buffer; returns the manager and its id.
    pub fn with_scratch() -> (Self, BufferId) {
        let mut mgr = Self::new();
        let id = mgr.add(Buffer::empty("[scratch]"), None);
        (mgr, id)
    }

    pub fn add(&mut self, buffer: Buffer, path: Option<PathBuf>) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        debug!(target: "state.buffers", id = id.0, name = %buffer.name, "buffer_added");
        self.entries.push(BufferEntry {
            id,
            buffer,
            path,
            dirty: false,
            line_ending: LineEnding::Lf,
            had_trailing_newline: false,
        });
        id
    }

    pub fn get(&self, id: BufferId) -> Option<&BufferEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut BufferEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<BufferId> {
        self.entries
            .iter()
            .find(|e| e.path.as_deref() == Some(path))
            .map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: BufferId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Id following `id` in insertion order, wrapping around.
    pub fn next_id_after(&self, id: BufferId) -> Option<BufferId> {
        let idx = self.position(id)?;
        let next = (idx + 1) % self.entries.len();
        Some(self.entries[next].id)
    }

    /// Id preceding `id` in insertion order, wrapping around.
    pub fn prev_id_before(&self, id: BufferId) -> Option<BufferId> {
        let idx = self.position(id)?;
        let prev = (idx + self.entries.len() - 1) % self.entries.len();
        Some(self.entries[prev].id)
    }

    pub fn list(&self) -> Vec<BufferSummary> {
        self.entries
            .iter()
            .map(|e| BufferSummary {
                id: e.id,
                name: e.buffer.name.clone(),
                path: e.path.clone(),
                dirty: e.dirty,
            })
            .collect()
    }
}
