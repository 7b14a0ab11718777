//! core-keymap: per-mode key binding tries.
//!
//! Design principles:
//! - Pure and deterministic: answers depend only on the trie and the queried
//!   key slice.
//! - Built once from a declarative table of `(key sequence) -> (actions)`
//!   entries and never mutated afterwards, so one trie can be shared by any
//!   number of dispatchers through a plain `&` or `Arc`.
//! - Arena layout (`Vec<Node>` + index edges) for cache locality; sequences that
//!   share a prefix share intermediate nodes (`d` then `d` again for a
//!   delete-line gesture).
//! - No side effects: logging only at TRACE for construction overrides and
//!   traversal steps.
//!
//! The trie is generic over the payload type so the crate stays independent of
//! the concrete `Action` set defined in `core-actions`.

use core_events::Key;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

// -------------------------------------------------------------------------------------------------
// Binding Specification
// -------------------------------------------------------------------------------------------------

/// One row of a binding table.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSpec<A> {
    pub sequence: Vec<Key>,
    pub actions: Vec<A>,
}

impl<A> BindingSpec<A> {
    pub fn new(sequence: impl Into<Vec<Key>>, actions: impl Into<Vec<A>>) -> Self {
        Self {
            sequence: sequence.into(),
            actions: actions.into(),
        }
    }

    /// Single key bound to a single action.
    pub fn single(key: Key, action: A) -> Self {
        Self {
            sequence: vec![key],
            actions: vec![action],
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Lookup errors
// -------------------------------------------------------------------------------------------------

/// Why a `lookup` did not produce actions. Internal signal for the key
/// dispatcher; never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The walk fell off the trie after consuming `consumed` keys.
    #[error("no binding continues after {consumed} key(s)")]
    NoSuchPath { consumed: usize },
    /// The whole sequence was consumed but the node carries no actions.
    #[error("key sequence is a prefix without a binding")]
    Incomplete,
}

// -------------------------------------------------------------------------------------------------
// Trie Representation
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Edge {
    key: Key,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node<A> {
    actions: Vec<A>,
    edges: SmallVec<[Edge; 4]>,
}

impl<A> Node<A> {
    fn new() -> Self {
        Self {
            actions: Vec::new(),
            edges: SmallVec::new(),
        }
    }

    fn child(&self, key: &Key) -> Option<usize> {
        self.edges.iter().find(|e| e.key == *key).map(|e| e.next)
    }
}

/// Prefix tree keyed by [`Key`] whose nodes carry an ordered action list.
///
/// A node with a non-empty action list terminates a binding. A node may carry
/// actions *and* children (a shorter sequence treated as complete although
/// longer continuations exist); the default tables never do this but the
/// structure supports it.
#[derive(Debug, Clone)]
pub struct BindingTrie<A> {
    nodes: Vec<Node<A>>,
}

impl<A> Default for BindingTrie<A> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }
}

impl<A> BindingTrie<A> {
    pub fn build(specs: impl IntoIterator<Item = BindingSpec<A>>) -> Self {
        let mut trie = Self::default();
        for (idx, spec) in specs.into_iter().enumerate() {
            trie.insert(idx, spec);
        }
        trie
    }

    fn insert(&mut self, idx: usize, spec: BindingSpec<A>) {
        debug_assert!(!spec.sequence.is_empty(), "binding needs at least one key");
        debug_assert!(!spec.actions.is_empty(), "binding needs at least one action");
        let mut cur = 0usize;
        for key in &spec.sequence {
            cur = match self.nodes[cur].child(key) {
                Some(next) => next,
                None => {
                    let new_idx = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[cur].edges.push(Edge {
                        key: *key,
                        next: new_idx,
                    });
                    new_idx
                }
            };
        }
        if !self.nodes[cur].actions.is_empty() {
            // Later table rows override earlier ones for the same sequence.
            trace!(
                target: "input.keymap",
                binding_index = idx,
                node = cur,
                "binding_override"
            );
        }
        self.nodes[cur].actions = spec.actions;
    }
}

impl<A> BindingTrie<A> {
    fn walk(&self, keys: &[Key]) -> Result<usize, LookupError> {
        let mut node_idx = 0usize;
        for (i, key) in keys.iter().enumerate() {
            match self.nodes[node_idx].child(key) {
                Some(next) => {
                    node_idx = next;
                    trace!(target: "input.keymap", step = i, key = %key, node = node_idx, "advance");
                }
                None => return Err(LookupError::NoSuchPath { consumed: i }),
            }
        }
        Ok(node_idx)
    }

    /// True iff `keys` is a prefix of some recorded path. The empty sequence is
    /// always a prefix.
    pub fn has_prefix(&self, keys: &[Key]) -> bool {
        self.walk(keys).is_ok()
    }

    /// Actions bound to exactly `keys`. Fails when the walk leaves the trie or
    /// lands on a node without actions.
    pub fn lookup(&self, keys: &[Key]) -> Result<&[A], LookupError> {
        let node = &self.nodes[self.walk(keys)?];
        if node.actions.is_empty() {
            Err(LookupError::Incomplete)
        } else {
            Ok(&node.actions)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].edges.is_empty()
    }

    /// Total nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
