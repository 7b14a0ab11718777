//! Property tests for binding trie prefix semantics.

use core_events::{Key, SpecialKey};
use core_keymap::{BindingSpec, BindingTrie};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        prop::sample::select(vec!['a', 'd', 'g', 'j', 'k', '\\', ':']).prop_map(Key::Unicode),
        Just(Key::Special(SpecialKey::Esc)),
        Just(Key::Special(SpecialKey::Enter)),
        Just(Key::ctrl('c')),
    ]
}

fn table_strategy() -> impl Strategy<Value = Vec<Vec<Key>>> {
    prop::collection::vec(prop::collection::vec(key_strategy(), 1..4), 0..12)
}

proptest! {
    // Extending a non-prefix never turns it back into a prefix.
    #[test]
    fn prefix_monotonicity(
        table in table_strategy(),
        seq in prop::collection::vec(key_strategy(), 0..5),
        extra in key_strategy(),
    ) {
        let trie = BindingTrie::build(
            table.into_iter().map(|s| BindingSpec::new(s, vec![0u8])),
        );
        let mut extended = seq.clone();
        extended.push(extra);
        if !trie.has_prefix(&seq) {
            prop_assert!(!trie.has_prefix(&extended));
        }
        // Contrapositive through lookup: a found binding implies every prefix of it exists.
        if trie.lookup(&extended).is_ok() {
            prop_assert!(trie.has_prefix(&seq));
        }
    }

    // Every recorded sequence resolves to its (last written) actions.
    #[test]
    fn recorded_sequences_resolve(table in table_strategy()) {
        let specs: Vec<BindingSpec<usize>> = table
            .iter()
            .enumerate()
            .map(|(i, s)| BindingSpec::new(s.clone(), vec![i]))
            .collect();
        let trie = BindingTrie::build(specs);
        for (i, seq) in table.iter().enumerate() {
            let last = table.iter().rposition(|s| s == seq).unwrap();
            prop_assert!(last >= i);
            prop_assert_eq!(trie.lookup(seq).unwrap(), &[last][..]);
        }
    }
}
