//! `Editor`: the model, one key dispatcher, and the terminal size, wired
//! together for the main loop.
//!
//! Per key: dispatch against the current mode, apply the resulting actions
//! in order, then scroll every pane so its cursor stays inside its region.
//! The scroll margin is re-clamped whenever the rows left for text change,
//! either from a resize or from the command window growing or shrinking.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use core_config::{Config, ConfigContext};
use core_events::{InputEvent, Key};
use core_model::{EditorModel, LayoutRegion, PANE_STATUS_ROWS};
use core_state::{BufferManager, EditorState, Mode};
use tracing::{debug, info};

use crate::{ApplyResult, Bindings, Dispatch, Dispatcher, apply_all, io_ops};

#[derive(Debug)]
pub struct Editor {
    pub model: EditorModel,
    dispatcher: Dispatcher,
    config: Config,
    width: u16,
    height: u16,
    /// Context the current scroll margin was clamped against.
    margin_context: Option<ConfigContext>,
}

impl Editor {
    pub fn new(model: EditorModel, bindings: Arc<Bindings>, config: Config, size: (u16, u16)) -> Self {
        let mut editor = Self {
            model,
            dispatcher: Dispatcher::new(bindings),
            config,
            width: size.0,
            height: size.1,
            margin_context: None,
        };
        editor.resize(size.0, size.1);
        editor
    }

    /// Build from configuration, opening `path` when given or starting on a
    /// scratch buffer.
    pub fn open(config: Config, path: Option<&Path>, size: (u16, u16)) -> Result<Self> {
        let (buffers, initial) = match path {
            Some(path) => {
                let mut buffers = BufferManager::new();
                let id = io_ops::add_opened(&mut buffers, io_ops::open_file(path)?);
                (buffers, id)
            }
            None => BufferManager::with_scratch(),
        };
        let mut state = EditorState::new(buffers);
        state.line_numbers = config.line_numbers();
        let bindings = Arc::new(Bindings::with_leader(config.leader()));
        info!(target: "runtime", leader = %config.leader(), "editor_open");
        Ok(Self::new(EditorModel::new(state, initial), bindings, config, size))
    }

    pub fn mode(&self) -> Mode {
        self.model.state.mode()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Screen area shared by the panes: everything above the command window.
    pub fn pane_area(&self) -> LayoutRegion {
        let reserved = u16::try_from(self.model.state.command.rows()).unwrap_or(u16::MAX);
        LayoutRegion::new(0, 0, self.width, self.height.saturating_sub(reserved))
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ApplyResult {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize(w, h) => {
                self.resize(w, h);
                ApplyResult::dirty()
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> ApplyResult {
        let mode = self.mode();
        match self.dispatcher.dispatch(mode, key) {
            Dispatch::Pending => ApplyResult::dirty_if(mode == Mode::Normal),
            Dispatch::Discarded => ApplyResult::dirty(),
            Dispatch::Ready(actions) => {
                let result = apply_all(&actions, &mut self.model);
                self.scroll_panes();
                result
            }
        }
    }

    /// Feed a sequence of keys; stops at the first quit.
    pub fn feed(&mut self, keys: &[Key]) -> ApplyResult {
        let mut acc = ApplyResult::clean();
        for key in keys {
            acc = acc.merge(self.handle_key(*key));
            if acc.quit {
                break;
            }
        }
        acc
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        debug!(target: "runtime", width, height, "resize");
        self.scroll_panes();
    }

    fn refresh_margin(&mut self) {
        let reserved = u16::try_from(self.model.state.command.rows())
            .unwrap_or(u16::MAX)
            .saturating_add(PANE_STATUS_ROWS);
        let ctx = ConfigContext::new(self.height, reserved);
        if self.margin_context == Some(ctx) {
            return;
        }
        self.margin_context = Some(ctx);
        if let Some(margin) = self.config.recompute_with_context(ctx) {
            debug!(target: "runtime", reserved, margin, "scroll_margin_changed");
        }
        self.model.state.config_vertical_margin = usize::from(self.config.effective_vertical_margin);
    }

    fn scroll_panes(&mut self) {
        self.refresh_margin();
        let layout = self.model.panes.layout(self.pane_area());
        let margin = self.model.state.config_vertical_margin;
        for (id, region) in layout.regions() {
            let text_height = usize::from(region.height.saturating_sub(PANE_STATUS_ROWS));
            if let Some(pane) = self.model.panes.pane_mut(*id) {
                pane.auto_scroll(text_height, margin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::parse_keys;
    use core_text::Position;

    fn editor(text: &str) -> Editor {
        let mut buffers = BufferManager::new();
        let id = buffers.add(core_text::Buffer::from_str("t", text), None);
        let model = EditorModel::new(EditorState::new(buffers), id);
        Editor::new(model, Arc::new(Bindings::default()), Config::default(), (80, 24))
    }

    #[test]
    fn counted_motion_moves_cursor() {
        let mut e = editor("a\nb\nc\nd\ne\n");
        e.feed(&parse_keys("3j"));
        assert_eq!(e.model.active_pane().cursor, Position::new(3, 0));
    }

    #[test]
    fn insert_session_edits_buffer() {
        let mut e = editor("");
        e.feed(&parse_keys("ihi<Esc>"));
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.model.active_entry().map(|x| x.buffer.contents()), Some("hi".into()));
    }

    #[test]
    fn cursor_down_scrolls_pane() {
        let text = "x\n".repeat(100);
        let mut e = editor(&text);
        e.resize(80, 10);
        e.feed(&parse_keys("50j"));
        let pane = e.model.active_pane();
        assert_eq!(pane.cursor.line, 50);
        // 10 rows minus one status row
        assert_eq!(pane.viewport_first_line, 42);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut e = editor("");
        assert!(e.handle_key(Key::ctrl('c')).quit);
    }

    #[test]
    fn margin_shrinks_while_command_output_is_shown() {
        let mut config = Config::default();
        config.file.scroll.margin.vertical = 10;
        let mut buffers = BufferManager::new();
        let id = buffers.add(core_text::Buffer::from_str("t", "a"), None);
        let model = EditorModel::new(EditorState::new(buffers), id);
        let mut e = Editor::new(model, Arc::new(Bindings::default()), config, (80, 12));
        // 12 rows minus the pane status row
        assert_eq!(e.model.state.config_vertical_margin, 4);
        e.feed(&parse_keys(":echo a<CR>"));
        // output line and prompt row leave 9 text rows
        assert_eq!(e.model.state.command.rows(), 2);
        assert_eq!(e.model.state.config_vertical_margin, 3);
        e.feed(&parse_keys(":<Esc>"));
        assert_eq!(e.model.state.config_vertical_margin, 4);
    }

    #[test]
    fn resize_event_updates_size() {
        let mut e = editor("");
        e.handle_event(InputEvent::Resize(100, 30));
        assert_eq!(e.size(), (100, 30));
        assert_eq!(e.pane_area(), LayoutRegion::new(0, 0, 100, 30));
    }
}
