//! Owner of the pane tree and the active leaf.
//!
//! `current` always names a leaf reachable from the root. Every structural or
//! focus operation repairs it before returning.

use tracing::debug;

use crate::Pane;
use crate::layout::{Layout, LayoutRegion};
use crate::pane_tree::{Direction, InvariantError, NodeId, PaneTree, SplitDirection};

#[derive(Debug, Clone)]
pub struct PaneManager {
    tree: PaneTree,
    current: NodeId,
}

impl PaneManager {
    pub fn new(pane: Pane) -> Self {
        let tree = PaneTree::new(pane);
        let current = tree.root();
        Self { tree, current }
    }

    pub fn tree(&self) -> &PaneTree {
        &self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_pane(&self) -> &Pane {
        match self.tree.pane(self.current) {
            Some(p) => p,
            None => panic!("current pane node {:?} is not a leaf", self.current),
        }
    }

    pub fn current_pane_mut(&mut self) -> &mut Pane {
        let current = self.current;
        match self.tree.pane_mut(current) {
            Some(p) => p,
            None => panic!("current pane node {current:?} is not a leaf"),
        }
    }

    pub fn pane(&self, id: NodeId) -> Option<&Pane> {
        self.tree.pane(id)
    }

    pub fn pane_mut(&mut self, id: NodeId) -> Option<&mut Pane> {
        self.tree.pane_mut(id)
    }

    pub fn pane_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Leaves with their panes, in tree order.
    pub fn panes(&self) -> impl Iterator<Item = (NodeId, &Pane)> {
        self.tree
            .leaves()
            .into_iter()
            .filter_map(|id| self.tree.pane(id).map(|p| (id, p)))
    }

    /// Every pane, in no particular order.
    pub fn panes_mut(&mut self) -> impl Iterator<Item = &mut Pane> {
        self.tree.leaf_panes_mut()
    }

    pub fn split(&mut self, direction: SplitDirection) -> NodeId {
        self.current = self.tree.split(self.current, direction);
        self.current
    }

    pub fn split_vertical(&mut self) -> NodeId {
        self.split(SplitDirection::Vertical)
    }

    pub fn split_horizontal(&mut self) -> NodeId {
        self.split(SplitDirection::Horizontal)
    }

    /// Move focus; returns `true` when the active pane changed.
    pub fn focus(&mut self, dir: Direction) -> bool {
        let next = self.tree.neighbor(self.current, dir);
        let moved = next != self.current;
        debug!(target: "layout.panes", ?dir, from = self.current.index(), to = next.index(), moved, "focus");
        self.current = next;
        moved
    }

    pub fn left(&mut self) -> bool {
        self.focus(Direction::Left)
    }

    pub fn right(&mut self) -> bool {
        self.focus(Direction::Right)
    }

    pub fn up(&mut self) -> bool {
        self.focus(Direction::Up)
    }

    pub fn down(&mut self) -> bool {
        self.focus(Direction::Down)
    }

    /// Close the active pane. The last pane is never closed; returns `false` then.
    pub fn close_current(&mut self) -> bool {
        if self.tree.parent(self.current).is_none() {
            return false;
        }
        self.current = self.tree.delete(self.current);
        true
    }

    pub fn layout(&self, area: LayoutRegion) -> Layout {
        self.tree.layout(area)
    }

    /// Tree invariants plus: `current` is a leaf reachable from the root.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.tree.check_invariants()?;
        if !self.tree.is_leaf(self.current) {
            return Err(InvariantError::NotALeaf(self.current.index()));
        }
        let mut id = self.current;
        while let Some(parent) = self.tree.parent(id) {
            id = parent;
        }
        if id != self.tree.root() {
            return Err(InvariantError::DeadReference(self.current.index()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::BufferManager;

    fn manager() -> PaneManager {
        let (_, id) = BufferManager::with_scratch();
        PaneManager::new(Pane::new(id))
    }

    #[test]
    fn split_focuses_first_child() {
        let mut pm = manager();
        let first = pm.split_vertical();
        assert_eq!(pm.current(), first);
        assert_eq!(pm.pane_count(), 2);
        assert!(pm.check_invariants().is_ok());
    }

    #[test]
    fn last_pane_is_not_closed() {
        let mut pm = manager();
        let only = pm.current();
        assert!(!pm.close_current());
        assert_eq!(pm.current(), only);
        assert_eq!(pm.pane_count(), 1);
    }

    #[test]
    fn focus_moves_report_change() {
        let mut pm = manager();
        pm.split_vertical();
        assert!(!pm.left());
        assert!(pm.right());
        assert!(!pm.right());
        assert!(!pm.up());
        assert!(!pm.down());
        assert!(pm.left());
    }

    #[test]
    fn panes_mut_visits_every_leaf() {
        let mut pm = manager();
        pm.split_vertical();
        pm.split_horizontal();
        for pane in pm.panes_mut() {
            pane.viewport_first_line = 7;
        }
        assert!(pm.panes().all(|(_, p)| p.viewport_first_line == 7));
        assert_eq!(pm.panes().count(), 3);
    }
}
