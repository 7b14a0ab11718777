//! Actions, default key bindings, the key dispatcher, and action application.
//!
//! Data flow per key: [`Dispatcher::dispatch`] groups keys against the
//! current mode's [`BindingTrie`](core_keymap::BindingTrie) and yields a
//! list of [`Action`]s; [`apply::apply_all`] runs them against an
//! [`EditorModel`](core_model::EditorModel). [`Editor`] wires both together
//! for the binary and for tests.
//!
//! `Action` is a closed enum applied by exhaustive `match`, so a binding
//! table cannot name an action the application loop does not implement.

use core_events::Key;
use core_state::Mode;

pub mod apply;
pub mod bindings;
pub mod dispatcher;
pub mod editor;
pub mod io_ops;

pub use apply::{ApplyResult, apply, apply_all};
pub use bindings::Bindings;
pub use dispatcher::{Dispatch, Dispatcher, MAX_REPEAT};
pub use editor::Editor;

/// One editor command produced by the dispatcher and consumed once by the
/// application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Stop the main loop.
    Exit,
    /// The only mutator of the mode machine.
    SwitchMode(Mode),

    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    LineStart,
    LineEnd,

    SplitVertical,
    SplitHorizontal,
    ClosePane,
    PaneUp,
    PaneDown,
    PaneLeft,
    PaneRight,

    InsertChar(Key),
    InsertNewLine,
    /// Open a line below the cursor line (`o`).
    InsertNewLineBelow,
    /// Open a line above the cursor line (`O`).
    InsertNewLineAbove,
    Backspace,
    DeleteChar,
    DeleteLine,

    InsertCommandChar(Key),
    DeleteCommandChar,
    ClearCommandInput,
    ClearCommandOutput,
    RunCommand,

    /// Turn the freshly activated command window into a `/` search prompt.
    BeginSearch,
    SearchNext,
    SearchPrev,
}
