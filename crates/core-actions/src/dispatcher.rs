//! Key dispatcher: groups incoming keys into binding gestures.
//!
//! One dispatcher holds the pending key sequence and the Normal-mode repeat
//! count. Each call to [`Dispatcher::dispatch`] feeds one key and reports
//! whether a gesture completed:
//!
//! * Normal mode folds a digit into the repeat count when no count is set yet
//!   or the previous key was also a folded digit. Any other key is appended;
//!   a sequence that no binding starts with is discarded silently, a complete
//!   binding yields its actions repeated `max(1, count)` times.
//! * Insert and Command modes never count. A sequence that no binding starts
//!   with falls back to literal input (`InsertChar` / `InsertCommandChar`),
//!   one action per pending key.
//!
//! Every outcome other than [`Dispatch::Pending`] clears the pending keys and
//! the count.

use std::sync::Arc;

use core_events::{Key, KeySequence};
use core_state::Mode;
use tracing::{debug, trace};

use crate::{Action, Bindings};

/// Largest repeat count a digit prefix can build; further digits saturate.
pub const MAX_REPEAT: u32 = 9_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// More keys are needed.
    Pending,
    /// Normal-mode sequence with no binding; dropped without actions.
    Discarded,
    /// Completed gesture. Never empty.
    Ready(Vec<Action>),
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    bindings: Arc<Bindings>,
    pending: KeySequence,
    repeat: u32,
    last_was_digit: bool,
}

impl Dispatcher {
    pub fn new(bindings: Arc<Bindings>) -> Self {
        Self {
            bindings,
            pending: KeySequence::new(),
            repeat: 0,
            last_was_digit: false,
        }
    }

    /// Keys of the gesture in progress.
    pub fn pending(&self) -> &KeySequence {
        &self.pending
    }

    /// Repeat count typed so far; 0 when unset.
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.repeat = 0;
        self.last_was_digit = false;
    }

    pub fn dispatch(&mut self, mode: Mode, key: Key) -> Dispatch {
        if mode == Mode::Normal
            && let Some(digit) = key.digit_value()
            && (self.repeat == 0 || self.last_was_digit)
        {
            self.repeat = self
                .repeat
                .saturating_mul(10)
                .saturating_add(digit)
                .min(MAX_REPEAT);
            self.last_was_digit = true;
            trace!(target: "input.dispatch", repeat = self.repeat, "repeat_fold");
            return Dispatch::Pending;
        }
        self.last_was_digit = false;
        self.pending.push(key);

        let trie = self.bindings.for_mode(mode);
        if !trie.has_prefix(self.pending.as_slice()) {
            return self.fallback(mode);
        }
        match trie.lookup(self.pending.as_slice()) {
            Ok(actions) => {
                let times = match mode {
                    Mode::Normal => self.repeat.max(1) as usize,
                    Mode::Insert | Mode::Command => 1,
                };
                let mut out = Vec::with_capacity(actions.len() * times);
                for _ in 0..times {
                    out.extend_from_slice(actions);
                }
                debug!(
                    target: "input.dispatch",
                    mode = mode.label(),
                    keys = %self.pending,
                    times,
                    actions = out.len(),
                    "flush"
                );
                self.reset();
                Dispatch::Ready(out)
            }
            Err(e) => {
                trace!(target: "input.dispatch", keys = %self.pending, reason = %e, "pending");
                Dispatch::Pending
            }
        }
    }

    fn fallback(&mut self, mode: Mode) -> Dispatch {
        let outcome = match mode {
            Mode::Normal => Dispatch::Discarded,
            Mode::Insert => {
                Dispatch::Ready(self.pending.iter().map(|k| Action::InsertChar(*k)).collect())
            }
            Mode::Command => Dispatch::Ready(
                self.pending
                    .iter()
                    .map(|k| Action::InsertCommandChar(*k))
                    .collect(),
            ),
        };
        debug!(
            target: "input.dispatch",
            mode = mode.label(),
            keys = %self.pending,
            discarded = matches!(outcome, Dispatch::Discarded),
            "flush_unbound"
        );
        self.reset();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::parse_keys;

    fn feed(d: &mut Dispatcher, mode: Mode, keys: &str) -> Vec<Dispatch> {
        parse_keys(keys)
            .into_iter()
            .map(|k| d.dispatch(mode, k))
            .collect()
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(Bindings::default()))
    }

    #[test]
    fn count_prefix_repeats_actions() {
        let mut d = dispatcher();
        let out = feed(&mut d, Mode::Normal, "3j");
        assert_eq!(out[0], Dispatch::Pending);
        assert_eq!(d.repeat(), 0);
        assert_eq!(out[1], Dispatch::Ready(vec![Action::CursorDown; 3]));
    }

    #[test]
    fn no_count_and_zero_count_run_once() {
        let mut d = dispatcher();
        assert_eq!(feed(&mut d, Mode::Normal, "j"), vec![Dispatch::Ready(vec![Action::CursorDown])]);
        let out = feed(&mut d, Mode::Normal, "0j");
        assert_eq!(out[1], Dispatch::Ready(vec![Action::CursorDown]));
    }

    #[test]
    fn multi_digit_counts_accumulate() {
        let mut d = dispatcher();
        feed(&mut d, Mode::Normal, "12");
        assert_eq!(d.repeat(), 12);
        let out = d.dispatch(Mode::Normal, Key::char('l'));
        assert_eq!(out, Dispatch::Ready(vec![Action::CursorRight; 12]));
    }

    #[test]
    fn count_saturates() {
        let mut d = dispatcher();
        feed(&mut d, Mode::Normal, "987654");
        assert_eq!(d.repeat(), MAX_REPEAT);
    }

    #[test]
    fn digit_inside_sequence_after_count_is_unbound() {
        let mut d = dispatcher();
        let out = feed(&mut d, Mode::Normal, "3d2");
        assert_eq!(out, vec![Dispatch::Pending, Dispatch::Pending, Dispatch::Discarded]);
        assert!(d.pending().is_empty());
        assert_eq!(d.repeat(), 0);
    }

    #[test]
    fn two_key_sequence_waits_for_second_key() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch(Mode::Normal, Key::char('d')), Dispatch::Pending);
        assert_eq!(d.pending().len(), 1);
        assert_eq!(
            d.dispatch(Mode::Normal, Key::char('d')),
            Dispatch::Ready(vec![Action::DeleteLine])
        );
        assert!(d.pending().is_empty());
    }

    #[test]
    fn unbound_normal_key_is_discarded() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch(Mode::Normal, Key::char('z')), Dispatch::Discarded);
        feed(&mut d, Mode::Normal, "5d");
        assert_eq!(d.dispatch(Mode::Normal, Key::char('z')), Dispatch::Discarded);
        assert_eq!(d.repeat(), 0);
        assert!(d.pending().is_empty());
    }

    #[test]
    fn insert_fallback_is_literal() {
        let mut d = dispatcher();
        assert_eq!(
            d.dispatch(Mode::Insert, Key::char('x')),
            Dispatch::Ready(vec![Action::InsertChar(Key::char('x'))])
        );
        assert_eq!(
            d.dispatch(Mode::Insert, Key::char('3')),
            Dispatch::Ready(vec![Action::InsertChar(Key::char('3'))])
        );
        assert_eq!(d.repeat(), 0);
    }

    #[test]
    fn command_fallback_is_command_text() {
        let mut d = dispatcher();
        assert_eq!(
            d.dispatch(Mode::Command, Key::char('w')),
            Dispatch::Ready(vec![Action::InsertCommandChar(Key::char('w'))])
        );
        assert_eq!(
            d.dispatch(Mode::Command, Key::ENTER),
            Dispatch::Ready(vec![Action::RunCommand, Action::SwitchMode(Mode::Normal)])
        );
    }

    #[test]
    fn insert_fallback_flushes_pending_prefix() {
        let bindings = Bindings::from_tables(
            Vec::new(),
            vec![core_keymap::BindingSpec::new(
                parse_keys("jk"),
                [Action::SwitchMode(Mode::Normal)],
            )],
            Vec::new(),
        );
        let mut d = Dispatcher::new(Arc::new(bindings));
        assert_eq!(d.dispatch(Mode::Insert, Key::char('j')), Dispatch::Pending);
        assert_eq!(
            d.dispatch(Mode::Insert, Key::char('x')),
            Dispatch::Ready(vec![
                Action::InsertChar(Key::char('j')),
                Action::InsertChar(Key::char('x')),
            ])
        );
    }

    #[test]
    fn same_input_same_output() {
        let keys = "2\\l3jdd:x<Esc>iab<Esc>zq";
        let run = |mut d: Dispatcher| {
            let mut mode = Mode::Normal;
            let mut out = Vec::new();
            for k in parse_keys(keys) {
                let r = d.dispatch(mode, k);
                if let Dispatch::Ready(actions) = &r {
                    for a in actions {
                        if let Action::SwitchMode(m) = a {
                            mode = *m;
                        }
                    }
                }
                out.push(r);
            }
            out
        };
        assert_eq!(run(dispatcher()), run(dispatcher()));
    }
}
