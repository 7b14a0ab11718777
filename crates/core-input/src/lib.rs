//! Blocking terminal input decoder.
//!
//! Crossterm already resolves escape sequences; this crate narrows its
//! events to the editor's [`Key`] / [`InputEvent`] vocabulary and drops
//! everything the editor has no use for (key releases, mouse, focus, paste,
//! media keys).
//!
//! Ctrl is only meaningful together with an ASCII letter and becomes
//! `SpecialKey::Ctrl`. Other modifiers are dropped: Shift is already folded
//! into the character, Alt and Super have no bindings.

use std::collections::VecDeque;

use anyhow::Result;
use core_events::{InputEvent, Key, SpecialKey};
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent,
    KeyEventKind as CKeyEventKind, KeyModifiers as CKeyModifiers,
};
use tracing::trace;

/// Source of decoded input events for the main loop.
pub trait EventSource {
    /// Block until the next event. `Ok(None)` means the source is exhausted.
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Reads from the controlling terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for TerminalInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            let raw = event::read()?;
            if let Some(ev) = translate_event(&raw) {
                return Ok(Some(ev));
            }
            trace!(target: "input.decode", event = ?raw, "event_ignored");
        }
    }
}

/// Pre-recorded events, replayed in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self::new(keys.into_iter().map(InputEvent::Key))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

pub fn translate_event(ev: &CEvent) -> Option<InputEvent> {
    match ev {
        CEvent::Key(key) => translate_key(key).map(InputEvent::Key),
        CEvent::Resize(w, h) => Some(InputEvent::Resize(*w, *h)),
        _ => None,
    }
}

/// Map one crossterm key event to a [`Key`]. `None` for releases and keys
/// without an editor meaning.
pub fn translate_key(ev: &CKeyEvent) -> Option<Key> {
    if ev.kind == CKeyEventKind::Release {
        return None;
    }
    let key = match ev.code {
        CKeyCode::Char(c) if ev.modifiers.contains(CKeyModifiers::CONTROL) => {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            Key::ctrl(c)
        }
        CKeyCode::Char(c) => Key::Unicode(c),
        CKeyCode::Enter => Key::ENTER,
        CKeyCode::Esc => Key::ESC,
        CKeyCode::Backspace => Key::BACKSPACE,
        CKeyCode::Tab | CKeyCode::BackTab => Key::TAB,
        CKeyCode::Up => Key::UP,
        CKeyCode::Down => Key::DOWN,
        CKeyCode::Left => Key::LEFT,
        CKeyCode::Right => Key::RIGHT,
        CKeyCode::Home => Key::HOME,
        CKeyCode::End => Key::END,
        CKeyCode::PageUp => Key::Special(SpecialKey::PageUp),
        CKeyCode::PageDown => Key::Special(SpecialKey::PageDown),
        CKeyCode::Insert => Key::Special(SpecialKey::Insert),
        CKeyCode::Delete => Key::DELETE,
        CKeyCode::F(n @ 1..=12) => Key::Special(SpecialKey::F(n)),
        _ => return None,
    };
    trace!(target: "input.decode", key = %key, "key");
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn press(code: CKeyCode, modifiers: CKeyModifiers) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind: CKeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn plain_and_shifted_chars() {
        assert_eq!(translate_key(&press(CKeyCode::Char('a'), CKeyModifiers::NONE)), Some(Key::char('a')));
        assert_eq!(translate_key(&press(CKeyCode::Char('O'), CKeyModifiers::SHIFT)), Some(Key::char('O')));
        assert_eq!(translate_key(&press(CKeyCode::Char('é'), CKeyModifiers::NONE)), Some(Key::char('é')));
    }

    #[test]
    fn ctrl_letters_fold_case() {
        assert_eq!(translate_key(&press(CKeyCode::Char('c'), CKeyModifiers::CONTROL)), Some(Key::ctrl('c')));
        assert_eq!(
            translate_key(&press(CKeyCode::Char('C'), CKeyModifiers::CONTROL | CKeyModifiers::SHIFT)),
            Some(Key::ctrl('c'))
        );
        assert_eq!(translate_key(&press(CKeyCode::Char('1'), CKeyModifiers::CONTROL)), None);
    }

    #[test]
    fn named_keys() {
        let none = CKeyModifiers::NONE;
        assert_eq!(translate_key(&press(CKeyCode::Esc, none)), Some(Key::ESC));
        assert_eq!(translate_key(&press(CKeyCode::Enter, none)), Some(Key::ENTER));
        assert_eq!(translate_key(&press(CKeyCode::BackTab, CKeyModifiers::SHIFT)), Some(Key::TAB));
        assert_eq!(translate_key(&press(CKeyCode::F(5), none)), Some(Key::Special(SpecialKey::F(5))));
        assert_eq!(translate_key(&press(CKeyCode::F(13), none)), None);
        assert_eq!(translate_key(&press(CKeyCode::CapsLock, none)), None);
    }

    #[test]
    fn releases_are_dropped() {
        let mut ev = press(CKeyCode::Char('x'), CKeyModifiers::NONE);
        ev.kind = CKeyEventKind::Release;
        assert_eq!(translate_key(&ev), None);
        ev.kind = CKeyEventKind::Repeat;
        assert_eq!(translate_key(&ev), Some(Key::char('x')));
    }

    #[test]
    fn resize_and_unrelated_events() {
        assert_eq!(translate_event(&CEvent::Resize(120, 40)), Some(InputEvent::Resize(120, 40)));
        assert_eq!(translate_event(&CEvent::FocusGained), None);
    }

    #[test]
    fn scripted_input_replays_in_order() {
        let mut src = ScriptedInput::from_keys([Key::char('a'), Key::ESC]);
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.next_event().unwrap(), Some(InputEvent::Key(Key::char('a'))));
        assert_eq!(src.next_event().unwrap(), Some(InputEvent::Key(Key::ESC)));
        assert_eq!(src.next_event().unwrap(), None);
    }
}
