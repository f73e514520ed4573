use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use smartfill_core::Key;

use crate::action::Action;

/// Map a crossterm terminal event to an app action.
pub fn map_event(event: &Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char(' ') => Action::Refocus,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('a') => Action::CursorHome,
            KeyCode::Char('e') => Action::CursorEnd,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Down => Action::Nav(Key::Down),
        KeyCode::Up => Action::Nav(Key::Up),
        KeyCode::Enter => Action::Nav(Key::Enter),
        KeyCode::Esc => Action::Nav(Key::Escape),
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::F(1) => Action::ToggleHelp,
        KeyCode::F(5) => Action::Reload,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}
