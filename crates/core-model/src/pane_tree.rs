//! Binary split tree of panes, stored as an arena.
//!
//! Nodes live in a slot vector and refer to each other by [`NodeId`]; parent
//! links are plain indices, so there is no shared ownership and no back
//! pointer that can dangle. Freed slots are recycled through a free list.
//!
//! Structure invariants (checked by [`PaneTree::check_invariants`]):
//! * Every node is a leaf or a split with exactly two live children.
//! * `parent` of each child names the split holding it; the root has none.
//! * Every live slot is reachable from the root.
//! * Split ratios lie strictly inside `(0, 1)`.
//!
//! Misuse (splitting or deleting a node that is not a live leaf) is a caller
//! bug and panics.

use thiserror::Error;
use tracing::debug;

use crate::Pane;
use crate::layout::{Layout, LayoutRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Axis of a split. `Horizontal` stacks children top/bottom, `Vertical`
/// places them side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

/// Direction of a focus move between panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn axis(self) -> SplitDirection {
        match self {
            Direction::Left | Direction::Right => SplitDirection::Vertical,
            Direction::Up | Direction::Down => SplitDirection::Horizontal,
        }
    }

    /// Left and up move from a `second` child towards its `first` sibling.
    fn towards_first(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Which child to follow when descending to an extreme leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    First,
    Second,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Pane),
    Split {
        direction: SplitDirection,
        first: NodeId,
        second: NodeId,
        ratio: f32,
    },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("node {0} is referenced but its slot is free")]
    DeadReference(usize),
    #[error("node {node} records parent {recorded:?}, expected {expected:?}")]
    ParentMismatch {
        node: usize,
        recorded: Option<usize>,
        expected: Option<usize>,
    },
    #[error("split {0} has ratio {1} outside (0, 1)")]
    BadRatio(usize, f32),
    #[error("{live} live slots but {reachable} reachable from root")]
    Unreachable { live: usize, reachable: usize },
    #[error("node {0} is not a leaf")]
    NotALeaf(usize),
}

#[derive(Debug, Clone)]
pub struct PaneTree {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl PaneTree {
    /// Single-leaf tree.
    pub fn new(pane: Pane) -> Self {
        Self {
            slots: vec![Some(Node {
                parent: None,
                kind: NodeKind::Leaf(pane),
            })],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("pane node {} does not exist", id.0),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("pane node {} does not exist", id.0),
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.0]
            .take()
            .unwrap_or_else(|| panic!("double free of pane node {}", id.0));
        self.free.push(id.0);
        node
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.contains(id) && matches!(self.node(id).kind, NodeKind::Leaf(_))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of a split, `None` for a leaf.
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        match self.node(id).kind {
            NodeKind::Split { first, second, .. } => Some((first, second)),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn direction(&self, id: NodeId) -> Option<SplitDirection> {
        match self.node(id).kind {
            NodeKind::Split { direction, .. } => Some(direction),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn pane(&self, id: NodeId) -> Option<&Pane> {
        match self.slots.get(id.0) {
            Some(Some(Node {
                kind: NodeKind::Leaf(p),
                ..
            })) => Some(p),
            _ => None,
        }
    }

    pub fn pane_mut(&mut self, id: NodeId) -> Option<&mut Pane> {
        match self.slots.get_mut(id.0) {
            Some(Some(Node {
                kind: NodeKind::Leaf(p),
                ..
            })) => Some(p),
            _ => None,
        }
    }

    /// Mutable access to every pane in slot order.
    pub fn leaf_panes_mut(&mut self) -> impl Iterator<Item = &mut Pane> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Some(Node {
                kind: NodeKind::Leaf(p),
                ..
            }) => Some(p),
            _ => None,
        })
    }

    /// Leaves in tree order (first subtree before second).
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id).kind {
                NodeKind::Leaf(_) => out.push(id),
                NodeKind::Split { first, second, .. } => {
                    stack.push(second);
                    stack.push(first);
                }
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Turn leaf `id` into a split. The original pane moves into the new
    /// `first` leaf; the `second` leaf gets a duplicate viewing the same
    /// buffer. Returns the `first` leaf.
    pub fn split(&mut self, id: NodeId, direction: SplitDirection) -> NodeId {
        let pane = match &self.node(id).kind {
            NodeKind::Leaf(p) => p.clone(),
            NodeKind::Split { .. } => panic!("cannot split internal pane node {}", id.0),
        };
        let duplicate = pane.duplicate();
        let first = self.alloc(Node {
            parent: Some(id),
            kind: NodeKind::Leaf(pane),
        });
        let second = self.alloc(Node {
            parent: Some(id),
            kind: NodeKind::Leaf(duplicate),
        });
        self.node_mut(id).kind = NodeKind::Split {
            direction,
            first,
            second,
            ratio: 0.5,
        };
        debug!(target: "layout.panes", node = id.0, ?direction, first = first.0, second = second.0, "split");
        first
    }

    fn descend(&self, mut id: NodeId, side: Side) -> NodeId {
        while let NodeKind::Split { first, second, .. } = self.node(id).kind {
            id = match side {
                Side::First => first,
                Side::Second => second,
            };
        }
        id
    }

    /// Leaf adjacent to `id` in `dir`, or `id` itself when nothing lies that way.
    ///
    /// Walks up until an ancestor split on the matching axis holds the current
    /// subtree on the side the move leaves from, then descends the sibling to
    /// its extreme leaf facing the move (rightmost when moving left, and so on).
    pub fn neighbor(&self, id: NodeId, dir: Direction) -> NodeId {
        let mut child = id;
        while let Some(parent) = self.node(child).parent {
            if let NodeKind::Split {
                direction,
                first,
                second,
                ..
            } = self.node(parent).kind
                && direction == dir.axis()
            {
                if dir.towards_first() && child == second {
                    return self.descend(first, Side::Second);
                }
                if !dir.towards_first() && child == first {
                    return self.descend(second, Side::First);
                }
            }
            child = parent;
        }
        id
    }

    /// Remove leaf `id`, promoting its sibling into the parent's place.
    /// Returns the leaf that should become current: `id` unchanged when it is
    /// the only pane, otherwise the leaf of the promoted subtree adjacent to
    /// the removed pane.
    pub fn delete(&mut self, id: NodeId) -> NodeId {
        assert!(self.is_leaf(id), "cannot delete non-leaf pane node {}", id.0);
        let Some(parent) = self.node(id).parent else {
            debug!(target: "layout.panes", node = id.0, "delete_last_pane_ignored");
            return id;
        };
        let Some((first, second)) = self.children(parent) else {
            panic!("parent {} of pane node {} is a leaf", parent.0, id.0);
        };
        let (sibling, side) = if first == id {
            (second, Side::First)
        } else {
            (first, Side::Second)
        };
        let grandparent = self.node(parent).parent;
        self.release(id);
        self.release(parent);
        match grandparent {
            None => self.root = sibling,
            Some(gp) => {
                if let NodeKind::Split { first, second, .. } = &mut self.node_mut(gp).kind {
                    if *first == parent {
                        *first = sibling;
                    } else {
                        *second = sibling;
                    }
                }
            }
        }
        self.node_mut(sibling).parent = grandparent;
        let current = self.descend(sibling, side);
        debug!(
            target: "layout.panes",
            node = id.0,
            promoted = sibling.0,
            current = current.0,
            "delete"
        );
        current
    }

    /// Resolve every leaf into a screen region inside `area`.
    pub fn layout(&self, area: LayoutRegion) -> Layout {
        let mut out = Layout::default();
        let mut stack = vec![(self.root, area)];
        while let Some((id, region)) = stack.pop() {
            match self.node(id).kind {
                NodeKind::Leaf(_) => out.push_region(id, region),
                NodeKind::Split {
                    direction,
                    first,
                    second,
                    ratio,
                } => {
                    let (a, b) = match direction {
                        SplitDirection::Vertical => {
                            let (a, sep, b) = region.split_columns(ratio);
                            if let Some(sep) = sep {
                                out.push_separator(sep);
                            }
                            (a, b)
                        }
                        SplitDirection::Horizontal => region.split_rows(ratio),
                    };
                    stack.push((second, b));
                    stack.push((first, a));
                }
            }
        }
        out
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if !self.contains(self.root) {
            return Err(InvariantError::DeadReference(self.root.0));
        }
        let root_parent = self.node(self.root).parent;
        if root_parent.is_some() {
            return Err(InvariantError::ParentMismatch {
                node: self.root.0,
                recorded: root_parent.map(|p| p.0),
                expected: None,
            });
        }
        let mut reachable = 0usize;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            if let NodeKind::Split {
                first,
                second,
                ratio,
                ..
            } = self.node(id).kind
            {
                if !(ratio > 0.0 && ratio < 1.0) {
                    return Err(InvariantError::BadRatio(id.0, ratio));
                }
                for child in [first, second] {
                    if !self.contains(child) {
                        return Err(InvariantError::DeadReference(child.0));
                    }
                    let recorded = self.node(child).parent;
                    if recorded != Some(id) {
                        return Err(InvariantError::ParentMismatch {
                            node: child.0,
                            recorded: recorded.map(|p| p.0),
                            expected: Some(id.0),
                        });
                    }
                    stack.push(child);
                }
            }
        }
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        if live != reachable {
            return Err(InvariantError::Unreachable { live, reachable });
        }
        Ok(())
    }
}
