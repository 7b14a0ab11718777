mod common;
use common::*;

use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn leader_moves_between_split_panes() {
    let mut e = editor("abc\n");
    type_keys(&mut e, "v");
    let left = e.model.panes.current();
    type_keys(&mut e, "\\l");
    let right = e.model.panes.current();
    assert_ne!(left, right);
    type_keys(&mut e, "\\l");
    assert_eq!(e.model.panes.current(), right);
    type_keys(&mut e, "\\h");
    assert_eq!(e.model.panes.current(), left);
}

#[test]
fn horizontal_split_navigates_up_and_down() {
    let mut e = editor("abc\n");
    type_keys(&mut e, "s");
    let top = e.model.panes.current();
    type_keys(&mut e, "\\j");
    let bottom = e.model.panes.current();
    assert_ne!(top, bottom);
    type_keys(&mut e, "\\j");
    assert_eq!(e.model.panes.current(), bottom);
    type_keys(&mut e, "\\k");
    assert_eq!(e.model.panes.current(), top);
}

#[test]
fn split_panes_share_text_but_not_cursors() {
    let mut e = editor("one\ntwo\n");
    type_keys(&mut e, "vj\\l");
    assert_eq!(cursor(&e), Position::origin());
    type_keys(&mut e, "iX<Esc>\\h");
    assert_eq!(contents(&e), "Xone\ntwo\n");
    assert_eq!(cursor(&e), Position::new(1, 0));
}

#[test]
fn q_closes_panes_down_to_one() {
    let mut e = editor("");
    type_keys(&mut e, "vsv");
    assert_eq!(e.model.panes.pane_count(), 4);
    type_keys(&mut e, "qqq");
    assert_eq!(e.model.panes.pane_count(), 1);
    let r = type_keys(&mut e, "q");
    assert!(!r.dirty);
    assert_eq!(e.model.panes.pane_count(), 1);
    assert!(e.model.panes.check_invariants().is_ok());
}

#[test]
fn layout_covers_screen_after_splits() {
    let mut e = editor("");
    type_keys(&mut e, "vs");
    let area = e.pane_area();
    let layout = e.model.panes.layout(area);
    let covered: u32 = layout.regions().iter().map(|(_, r)| r.area()).sum::<u32>()
        + layout.separators().iter().map(|r| r.area()).sum::<u32>();
    assert_eq!(covered, area.area());
}
