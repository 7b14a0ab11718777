#![allow(dead_code)] // Shared across integration tests; each binary uses a subset.

use std::sync::Arc;

use core_actions::{Bindings, Editor};
use core_config::Config;
use core_events::parse_keys;
use core_model::EditorModel;
use core_state::{BufferManager, EditorState};
use core_text::{Buffer, Position};

pub fn editor(text: &str) -> Editor {
    let mut buffers = BufferManager::new();
    let id = buffers.add(Buffer::from_str("test", text), None);
    let model = EditorModel::new(EditorState::new(buffers), id);
    Editor::new(model, Arc::new(Bindings::default()), Config::default(), (80, 24))
}

pub fn type_keys(editor: &mut Editor, keys: &str) -> core_actions::ApplyResult {
    editor.feed(&parse_keys(keys))
}

pub fn contents(editor: &Editor) -> String {
    editor
        .model
        .active_entry()
        .map(|e| e.buffer.contents())
        .unwrap_or_default()
}

pub fn cursor(editor: &Editor) -> Position {
    editor.model.active_pane().cursor
}
