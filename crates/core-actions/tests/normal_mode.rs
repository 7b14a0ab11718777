mod common;
use common::*;

use core_state::Mode;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn counts_repeat_motions() {
    let mut e = editor("0\n1\n2\n3\n4\n5\n");
    type_keys(&mut e, "3j");
    assert_eq!(cursor(&e), Position::new(3, 0));
    type_keys(&mut e, "j");
    assert_eq!(cursor(&e), Position::new(4, 0));
    type_keys(&mut e, "0k");
    assert_eq!(cursor(&e), Position::new(3, 0));
    type_keys(&mut e, "10k");
    assert_eq!(cursor(&e), Position::origin());
}

#[test]
fn counted_delete_line() {
    let mut e = editor("a\nb\nc\nd\n");
    type_keys(&mut e, "2dd");
    assert_eq!(contents(&e), "c\nd\n");
    type_keys(&mut e, "d3d");
    assert_eq!(contents(&e), "");
}

#[test]
fn typo_aborts_pending_gesture() {
    let mut e = editor("a\nb\n");
    type_keys(&mut e, "dzj");
    assert_eq!(contents(&e), "a\nb\n");
    assert_eq!(cursor(&e), Position::new(1, 0));
    assert!(e.dispatcher().pending().is_empty());
}

#[test]
fn open_line_below_enters_insert() {
    let mut e = editor("one\ntwo");
    type_keys(&mut e, "oxy<Esc>");
    assert_eq!(contents(&e), "one\nxy\ntwo");
    assert_eq!(e.mode(), Mode::Normal);
    type_keys(&mut e, "Oz<Esc>");
    assert_eq!(contents(&e), "one\nz\nxy\ntwo");
}

#[test]
fn delete_char_and_line_end() {
    let mut e = editor("hello");
    type_keys(&mut e, "xx");
    assert_eq!(contents(&e), "llo");
    type_keys(&mut e, "$");
    assert_eq!(cursor(&e), Position::new(0, 3));
    type_keys(&mut e, "<Home>");
    assert_eq!(cursor(&e), Position::origin());
}

#[test]
fn insert_mode_treats_digits_and_unbound_keys_as_text() {
    let mut e = editor("");
    type_keys(&mut e, "i3jx<CR>q<BS><BS><Esc>");
    assert_eq!(contents(&e), "3jx");
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn ctrl_c_exits_from_every_mode() {
    for prefix in ["", "i", ":"] {
        let mut e = editor("");
        type_keys(&mut e, prefix);
        assert!(type_keys(&mut e, "<C-c>").quit, "prefix {prefix:?}");
    }
}

#[test]
fn form_feed_line_joins_on_backspace() {
    let mut e = editor("a\u{c}\nb");
    type_keys(&mut e, "ji<BS><Esc>");
    assert_eq!(contents(&e), "a\u{c}b");
    assert_eq!(cursor(&e), Position::new(0, 2));
}
