use smartfill_core::Key;

/// Everything the app reacts to, after terminal events are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Navigation key pressed in the focused input (arrows, Enter, Esc).
    Nav(Key),
    FocusNext,
    FocusPrev,
    /// Re-announce focus on the current input, reopening the popup.
    Refocus,
    InsertChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClickAt(u16, u16),
    Reload,
    ToggleHelp,
    Resize(u16, u16),
    Tick,
    None,
}
