//! End-to-end pane tree scenarios: split round trip and three-pane collapse.

use core_model::{Pane, PaneManager, PaneTree, SplitDirection};
use core_state::BufferManager;

fn pane() -> Pane {
    let (_, id) = BufferManager::with_scratch();
    Pane::new(id)
}

#[test]
fn split_then_delete_first_restores_single_leaf() {
    let mut tree = PaneTree::new(pane());
    let first = tree.split(tree.root(), SplitDirection::Vertical);
    let (_, second) = tree.children(tree.root()).unwrap();
    let current = tree.delete(first);
    assert_eq!(current, second);
    assert_eq!(tree.root(), second);
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.parent(second), None);
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn three_panes_collapse_without_dangling_current() {
    let mut pm = PaneManager::new(pane());
    let first = pm.split_vertical();
    // Focus the right half and split it top/bottom.
    assert!(pm.right());
    let top = pm.split_horizontal();
    let right = pm.tree().parent(top).unwrap();
    let (_, bottom) = pm.tree().children(right).unwrap();
    assert_eq!(pm.pane_count(), 3);

    // first.right() lands on the top-left leaf of the right half, and a
    // second right() has nowhere further to go.
    assert!(pm.left());
    assert_eq!(pm.current(), first);
    assert!(pm.right());
    assert_eq!(pm.current(), top);
    assert!(!pm.right());
    assert_eq!(pm.current(), top);

    assert!(pm.close_current());
    assert_eq!(pm.current(), bottom);
    assert!(pm.check_invariants().is_ok());

    assert!(pm.close_current());
    assert_eq!(pm.current(), first);
    assert_eq!(pm.tree().root(), first);
    assert!(pm.check_invariants().is_ok());

    assert!(!pm.close_current());
    assert_eq!(pm.current(), first);
    assert_eq!(pm.pane_count(), 1);
    assert!(pm.check_invariants().is_ok());
}

#[test]
fn down_mirrors_up() {
    let mut pm = PaneManager::new(pane());
    let top = pm.split_horizontal();
    let (_, bottom) = pm.tree().children(pm.tree().root()).unwrap();
    assert!(pm.down());
    assert_eq!(pm.current(), bottom);
    assert!(!pm.down());
    assert!(pm.up());
    assert_eq!(pm.current(), top);
}

#[test]
fn navigation_crosses_nested_splits() {
    // [ a | [ b / c ] ]: left from c reaches a; right from a reaches b (top).
    let mut pm = PaneManager::new(pane());
    let a = pm.split_vertical();
    pm.right();
    let b = pm.split_horizontal();
    pm.down();
    let c = pm.current();
    assert_ne!(b, c);
    assert!(pm.left());
    assert_eq!(pm.current(), a);
    assert!(pm.right());
    assert_eq!(pm.current(), b);
}
