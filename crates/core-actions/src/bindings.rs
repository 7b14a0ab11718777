//! Default per-mode binding tables.
//!
//! Each table is a literal list of `(key sequence) -> (actions)` rows built
//! once into a [`BindingTrie`] at startup. The resulting [`Bindings`] value is
//! immutable and shared by `Arc` with every dispatcher.

use core_events::{Key, SpecialKey};
use core_keymap::{BindingSpec, BindingTrie};
use core_state::Mode;
use tracing::{debug, warn};

use crate::Action;

#[derive(Debug, Clone)]
pub struct Bindings {
    normal: BindingTrie<Action>,
    insert: BindingTrie<Action>,
    command: BindingTrie<Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self::with_leader(Key::char('\\'))
    }
}

impl Bindings {
    pub fn with_leader(leader: Key) -> Self {
        Self::from_tables(normal_table(leader), insert_table(), command_table())
    }

    /// Build from explicit tables (tests and custom keymaps).
    pub fn from_tables(
        normal: Vec<BindingSpec<Action>>,
        insert: Vec<BindingSpec<Action>>,
        command: Vec<BindingSpec<Action>>,
    ) -> Self {
        let bindings = Self {
            normal: BindingTrie::build(normal),
            insert: BindingTrie::build(insert),
            command: BindingTrie::build(command),
        };
        for mode in Mode::ALL {
            let trie = bindings.for_mode(mode);
            if trie.is_empty() {
                warn!(target: "input.keymap", ?mode, "empty_binding_table");
            }
            debug!(target: "input.keymap", ?mode, nodes = trie.node_count(), "binding_table_built");
        }
        bindings
    }

    pub fn for_mode(&self, mode: Mode) -> &BindingTrie<Action> {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Insert => &self.insert,
            Mode::Command => &self.command,
        }
    }
}

fn one(key: impl Into<Key>, action: Action) -> BindingSpec<Action> {
    BindingSpec::single(key.into(), action)
}

fn seq(keys: &[Key], actions: &[Action]) -> BindingSpec<Action> {
    BindingSpec::new(keys, actions)
}

const SEARCH_START: &[Action] = &[
    Action::ClearCommandOutput,
    Action::SwitchMode(Mode::Command),
    Action::BeginSearch,
];

pub fn normal_table(leader: Key) -> Vec<BindingSpec<Action>> {
    vec![
        one('i', Action::SwitchMode(Mode::Insert)),
        one('h', Action::CursorLeft),
        one('j', Action::CursorDown),
        one('k', Action::CursorUp),
        one('l', Action::CursorRight),
        one(Key::LEFT, Action::CursorLeft),
        one(Key::DOWN, Action::CursorDown),
        one(Key::UP, Action::CursorUp),
        one(Key::RIGHT, Action::CursorRight),
        one('$', Action::LineEnd),
        one(Key::END, Action::LineEnd),
        one(Key::HOME, Action::LineStart),
        seq(&[Key::char('d'), Key::char('d')], &[Action::DeleteLine]),
        one('x', Action::DeleteChar),
        seq(
            &[Key::char('o')],
            &[Action::InsertNewLineBelow, Action::SwitchMode(Mode::Insert)],
        ),
        seq(
            &[Key::char('O')],
            &[Action::InsertNewLineAbove, Action::SwitchMode(Mode::Insert)],
        ),
        one('s', Action::SplitHorizontal),
        one('v', Action::SplitVertical),
        one('q', Action::ClosePane),
        seq(
            &[Key::char(':')],
            &[Action::ClearCommandOutput, Action::SwitchMode(Mode::Command)],
        ),
        seq(&[Key::char('/')], SEARCH_START),
        seq(&[Key::ctrl('f')], SEARCH_START),
        one(Key::ctrl('c'), Action::Exit),
        seq(&[leader, Key::char('k')], &[Action::PaneUp]),
        seq(&[leader, Key::char('j')], &[Action::PaneDown]),
        seq(&[leader, Key::char('h')], &[Action::PaneLeft]),
        seq(&[leader, Key::char('l')], &[Action::PaneRight]),
    ]
}

pub fn insert_table() -> Vec<BindingSpec<Action>> {
    vec![
        one(Key::ESC, Action::SwitchMode(Mode::Normal)),
        one(Key::ctrl('c'), Action::Exit),
        one(Key::LEFT, Action::CursorLeft),
        one(Key::DOWN, Action::CursorDown),
        one(Key::UP, Action::CursorUp),
        one(Key::RIGHT, Action::CursorRight),
        one(Key::HOME, Action::LineStart),
        one(Key::END, Action::LineEnd),
        one(Key::BACKSPACE, Action::Backspace),
        one(Key::ENTER, Action::InsertNewLine),
        one(Key::DELETE, Action::DeleteChar),
    ]
}

pub fn command_table() -> Vec<BindingSpec<Action>> {
    vec![
        seq(
            &[Key::ESC],
            &[Action::ClearCommandInput, Action::SwitchMode(Mode::Normal)],
        ),
        one(Key::ctrl('c'), Action::Exit),
        seq(
            &[Key::ENTER],
            &[Action::RunCommand, Action::SwitchMode(Mode::Normal)],
        ),
        one(Key::BACKSPACE, Action::DeleteCommandChar),
        one(SpecialKey::Tab, Action::InsertCommandChar(Key::TAB)),
        // Only meaningful behind the `/` prompt.
        one(Key::RIGHT, Action::SearchNext),
        one(Key::LEFT, Action::SearchPrev),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::parse_keys;

    fn lookup(b: &Bindings, mode: Mode, keys: &str) -> Option<Vec<Action>> {
        b.for_mode(mode)
            .lookup(&parse_keys(keys))
            .ok()
            .map(|a| a.to_vec())
    }

    #[test]
    fn normal_table_acceptance() {
        let b = Bindings::default();
        let n = Mode::Normal;
        assert_eq!(lookup(&b, n, "i"), Some(vec![Action::SwitchMode(Mode::Insert)]));
        assert_eq!(lookup(&b, n, "h"), Some(vec![Action::CursorLeft]));
        assert_eq!(lookup(&b, n, "j"), Some(vec![Action::CursorDown]));
        assert_eq!(lookup(&b, n, "k"), Some(vec![Action::CursorUp]));
        assert_eq!(lookup(&b, n, "l"), Some(vec![Action::CursorRight]));
        assert_eq!(lookup(&b, n, "<Left>"), Some(vec![Action::CursorLeft]));
        assert_eq!(lookup(&b, n, "<Down>"), Some(vec![Action::CursorDown]));
        assert_eq!(lookup(&b, n, "<Up>"), Some(vec![Action::CursorUp]));
        assert_eq!(lookup(&b, n, "<Right>"), Some(vec![Action::CursorRight]));
        assert_eq!(lookup(&b, n, "d"), None);
        assert_eq!(lookup(&b, n, "dd"), Some(vec![Action::DeleteLine]));
        assert_eq!(lookup(&b, n, "s"), Some(vec![Action::SplitHorizontal]));
        assert_eq!(lookup(&b, n, "v"), Some(vec![Action::SplitVertical]));
        assert_eq!(lookup(&b, n, "q"), Some(vec![Action::ClosePane]));
        assert_eq!(
            lookup(&b, n, ":"),
            Some(vec![Action::ClearCommandOutput, Action::SwitchMode(Mode::Command)])
        );
        let search = Some(SEARCH_START.to_vec());
        assert_eq!(lookup(&b, n, "/"), search);
        assert_eq!(lookup(&b, n, "<C-f>"), search);
        assert_eq!(lookup(&b, n, "<C-c>"), Some(vec![Action::Exit]));
        assert_eq!(lookup(&b, n, "\\k"), Some(vec![Action::PaneUp]));
        assert_eq!(lookup(&b, n, "\\j"), Some(vec![Action::PaneDown]));
        assert_eq!(lookup(&b, n, "\\h"), Some(vec![Action::PaneLeft]));
        assert_eq!(lookup(&b, n, "\\l"), Some(vec![Action::PaneRight]));
    }

    #[test]
    fn insert_table_acceptance() {
        let b = Bindings::default();
        let m = Mode::Insert;
        assert_eq!(lookup(&b, m, "<Esc>"), Some(vec![Action::SwitchMode(Mode::Normal)]));
        assert_eq!(lookup(&b, m, "<C-c>"), Some(vec![Action::Exit]));
        assert_eq!(lookup(&b, m, "<Up>"), Some(vec![Action::CursorUp]));
        assert_eq!(lookup(&b, m, "<BS>"), Some(vec![Action::Backspace]));
        assert_eq!(lookup(&b, m, "<CR>"), Some(vec![Action::InsertNewLine]));
        assert!(!b.for_mode(m).has_prefix(&parse_keys("x")));
    }

    #[test]
    fn command_table_acceptance() {
        let b = Bindings::default();
        let m = Mode::Command;
        assert_eq!(
            lookup(&b, m, "<Esc>"),
            Some(vec![Action::ClearCommandInput, Action::SwitchMode(Mode::Normal)])
        );
        assert_eq!(lookup(&b, m, "<C-c>"), Some(vec![Action::Exit]));
        assert_eq!(
            lookup(&b, m, "<CR>"),
            Some(vec![Action::RunCommand, Action::SwitchMode(Mode::Normal)])
        );
        assert_eq!(lookup(&b, m, "<BS>"), Some(vec![Action::DeleteCommandChar]));
        assert_eq!(lookup(&b, m, "<Right>"), Some(vec![Action::SearchNext]));
        assert_eq!(lookup(&b, m, "<Left>"), Some(vec![Action::SearchPrev]));
        assert!(!b.for_mode(m).has_prefix(&parse_keys("w")));
    }

    #[test]
    fn leader_is_configurable() {
        let b = Bindings::with_leader(Key::char(' '));
        assert_eq!(lookup(&b, Mode::Normal, " l"), Some(vec![Action::PaneRight]));
        assert_eq!(lookup(&b, Mode::Normal, "\\l"), None);
    }
}
