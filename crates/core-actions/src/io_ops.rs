//! File IO for `:e` and `:w` and the startup path argument.
//!
//! Buffers always hold LF text. Opening records the file's dominant line
//! ending on the buffer entry; writing expands LF back to that ending.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_state::{BufferEntry, BufferId, BufferManager, LineEnding, normalize_line_endings};
use core_text::Buffer;
use tracing::{info, warn};

/// A file read from disk (or a fresh empty buffer for a path that does not
/// exist yet).
#[derive(Debug)]
pub struct OpenedFile {
    pub buffer: Buffer,
    pub path: PathBuf,
    pub line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub is_new: bool,
}

pub fn open_file(path: &Path) -> Result<OpenedFile> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(target: "io", path = %path.display(), "open_new_file");
            return Ok(OpenedFile {
                buffer: Buffer::empty(name),
                path: path.to_path_buf(),
                line_ending: LineEnding::Lf,
                had_trailing_newline: false,
                is_new: true,
            });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("cannot read {}", path.display()));
        }
    };
    let norm = normalize_line_endings(&content);
    if norm.mixed {
        warn!(target: "io", path = %path.display(), "mixed_line_endings_detected");
    }
    info!(target: "io", path = %path.display(), bytes = content.len(), "file_opened");
    Ok(OpenedFile {
        buffer: Buffer::from_str(name, &norm.normalized),
        path: path.to_path_buf(),
        line_ending: norm.original,
        had_trailing_newline: norm.had_trailing_newline,
        is_new: false,
    })
}

/// Register an opened file with the buffer manager, carrying its line-ending
/// metadata onto the entry.
pub fn add_opened(buffers: &mut BufferManager, opened: OpenedFile) -> BufferId {
    let id = buffers.add(opened.buffer, Some(opened.path));
    if let Some(entry) = buffers.get_mut(id) {
        entry.line_ending = opened.line_ending;
        entry.had_trailing_newline = opened.had_trailing_newline;
    }
    id
}

/// Serialize `entry` to `path` using the entry's line ending. Returns the
/// number of lines written.
pub fn write_buffer(entry: &BufferEntry, path: &Path) -> Result<usize> {
    let text = entry.buffer.contents();
    let out = match entry.line_ending {
        LineEnding::Lf => text,
        other => text.replace('\n', other.as_str()),
    };
    fs::write(path, out.as_bytes()).with_context(|| format!("cannot write {}", path.display()))?;
    let lines = logical_lines(&entry.buffer);
    info!(target: "io", path = %path.display(), lines, "file_written");
    Ok(lines)
}

/// Line count as an editor reports it: a trailing newline does not start a
/// new line.
pub fn logical_lines(buffer: &Buffer) -> usize {
    let count = buffer.line_count();
    if count > 1 && buffer.line_byte_len(count - 1) == 0 {
        count - 1
    } else {
        count
    }
}
