//! Core input symbols for jte.
//!
//! The terminal decoder (`core-input`) resolves raw escape sequences into
//! [`Key`] values; everything above it (keymap tries, the key dispatcher, the
//! editor loop) only ever sees this already-resolved abstraction.
//!
//! Invariants:
//! * `Key` is an immutable value compared by value. It is used as a trie edge
//!   label and never carries timing or repeat metadata.
//! * `KeySequence` is append-only between two calls to `clear`; the key
//!   dispatcher owns exactly one per gesture.

use std::fmt;

// -------------------------------------------------------------------------------------------------
// Named keys
// -------------------------------------------------------------------------------------------------

/// Control and special keys the decoder can resolve.
///
/// `Ctrl` always holds a lowercase ASCII letter (`'a'..='z'`); `F` holds the
/// function key number `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Backspace,
    Tab,
    Enter,
    Esc,
    Ctrl(char),
    F(u8),
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKey::ArrowUp => f.write_str("<Up>"),
            SpecialKey::ArrowDown => f.write_str("<Down>"),
            SpecialKey::ArrowLeft => f.write_str("<Left>"),
            SpecialKey::ArrowRight => f.write_str("<Right>"),
            SpecialKey::Home => f.write_str("<Home>"),
            SpecialKey::End => f.write_str("<End>"),
            SpecialKey::PageUp => f.write_str("<PageUp>"),
            SpecialKey::PageDown => f.write_str("<PageDown>"),
            SpecialKey::Insert => f.write_str("<Insert>"),
            SpecialKey::Delete => f.write_str("<Del>"),
            SpecialKey::Backspace => f.write_str("<BS>"),
            SpecialKey::Tab => f.write_str("<Tab>"),
            SpecialKey::Enter => f.write_str("<CR>"),
            SpecialKey::Esc => f.write_str("<Esc>"),
            SpecialKey::Ctrl(c) => write!(f, "<C-{c}>"),
            SpecialKey::F(n) => write!(f, "<F{n}>"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Key
// -------------------------------------------------------------------------------------------------

/// One resolved unit of terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Unicode(char),
    Special(SpecialKey),
}

impl Key {
    pub const ESC: Key = Key::Special(SpecialKey::Esc);
    pub const ENTER: Key = Key::Special(SpecialKey::Enter);
    pub const BACKSPACE: Key = Key::Special(SpecialKey::Backspace);
    pub const DELETE: Key = Key::Special(SpecialKey::Delete);
    pub const TAB: Key = Key::Special(SpecialKey::Tab);
    pub const UP: Key = Key::Special(SpecialKey::ArrowUp);
    pub const DOWN: Key = Key::Special(SpecialKey::ArrowDown);
    pub const LEFT: Key = Key::Special(SpecialKey::ArrowLeft);
    pub const RIGHT: Key = Key::Special(SpecialKey::ArrowRight);
    pub const HOME: Key = Key::Special(SpecialKey::Home);
    pub const END: Key = Key::Special(SpecialKey::End);

    /// `Ctrl` + letter. Uppercase input is folded to lowercase so `<C-C>` and
    /// `<C-c>` resolve to the same key.
    pub fn ctrl(c: char) -> Key {
        debug_assert!(c.is_ascii_alphabetic(), "ctrl keys are letters only");
        Key::Special(SpecialKey::Ctrl(c.to_ascii_lowercase()))
    }

    pub fn char(c: char) -> Key {
        Key::Unicode(c)
    }

    pub fn is_ascii_digit(&self) -> bool {
        matches!(self, Key::Unicode(c) if c.is_ascii_digit())
    }

    /// Numeric value for ASCII digit keys.
    pub fn digit_value(&self) -> Option<u32> {
        match self {
            Key::Unicode(c) => c.to_digit(10).filter(|_| c.is_ascii_digit()),
            Key::Special(_) => None,
        }
    }

    /// Character a buffer would receive if this key were typed as text.
    /// Tab is the only special key with a textual form.
    pub fn as_insertable_char(&self) -> Option<char> {
        match self {
            Key::Unicode(c) => Some(*c),
            Key::Special(SpecialKey::Tab) => Some('\t'),
            Key::Special(_) => None,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Unicode(c)
    }
}

impl From<SpecialKey> for Key {
    fn from(s: SpecialKey) -> Self {
        Key::Special(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unicode(' ') => f.write_str("<Space>"),
            Key::Unicode(c) => write!(f, "{c}"),
            Key::Special(s) => s.fmt(f),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// KeySequence
// -------------------------------------------------------------------------------------------------

/// Ordered keys of the gesture currently being accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySequence {
    keys: Vec<Key>,
}

impl KeySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }
}

impl From<Vec<Key>> for KeySequence {
    fn from(keys: Vec<Key>) -> Self {
        Self { keys }
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in &self.keys {
            write!(f, "{k}")?;
        }
        Ok(())
    }
}

/// Parse a compact textual key list (`"dd"`, `"<Esc>"`, `"\\k"`) into keys.
///
/// Recognized bracket names mirror the `Display` output. Unknown bracket
/// forms are taken literally character by character.
pub fn parse_keys(src: &str) -> Vec<Key> {
    let mut out = Vec::new();
    let mut rest = src;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
            && let Some(key) = parse_named(&rest[1..end])
        {
            out.push(key);
            rest = &rest[end + 1..];
            continue;
        }
        out.push(Key::Unicode(c));
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn parse_named(name: &str) -> Option<Key> {
    let special = match name {
        "Up" => SpecialKey::ArrowUp,
        "Down" => SpecialKey::ArrowDown,
        "Left" => SpecialKey::ArrowLeft,
        "Right" => SpecialKey::ArrowRight,
        "Home" => SpecialKey::Home,
        "End" => SpecialKey::End,
        "PageUp" => SpecialKey::PageUp,
        "PageDown" => SpecialKey::PageDown,
        "Insert" => SpecialKey::Insert,
        "Del" => SpecialKey::Delete,
        "BS" => SpecialKey::Backspace,
        "Tab" => SpecialKey::Tab,
        "CR" => SpecialKey::Enter,
        "Esc" => SpecialKey::Esc,
        "Space" => return Some(Key::Unicode(' ')),
        _ => {
            if let Some(letter) = name.strip_prefix("C-") {
                let mut chars = letter.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Some(Key::ctrl(c)),
                    _ => None,
                };
            }
            if let Some(num) = name.strip_prefix('F') {
                return num
                    .parse::<u8>()
                    .ok()
                    .filter(|n| (1..=12).contains(n))
                    .map(|n| Key::Special(SpecialKey::F(n)));
            }
            return None;
        }
    };
    Some(Key::Special(special))
}

// -------------------------------------------------------------------------------------------------
// Input events
// -------------------------------------------------------------------------------------------------

/// Events surfaced by the terminal decoder. Only keys reach the dispatcher;
/// resizes go straight to the layout/render collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}
