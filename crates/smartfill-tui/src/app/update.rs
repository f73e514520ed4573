use ratatui::layout::Position;

use smartfill_core::{Key, KeyOutcome, Point};

use super::App;
use crate::action::Action;

impl App {
    /// Apply an action. Returns `true` once quit has been requested.
    pub fn update(&mut self, action: Action) -> bool {
        // Quit confirmation modal: Enter/y/q confirms, Esc/n cancels
        if self.confirm_quit {
            match action {
                Action::Quit
                | Action::Nav(Key::Enter)
                | Action::InsertChar('y')
                | Action::InsertChar('q') => {
                    self.should_quit = true;
                }
                Action::Nav(Key::Escape) | Action::InsertChar('n') => {
                    self.confirm_quit = false;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                }
                _ => {}
            }
            return self.should_quit;
        }

        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ToggleHelp | Action::Nav(Key::Escape) => self.show_help = false,
                Action::Tick => self.tick = self.tick.wrapping_add(1),
                _ => {}
            }
            return self.should_quit;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Nav(key) => self.handle_nav(key),
            Action::FocusNext => {
                if let Some(i) = self.form.focus_next() {
                    self.focus_field(i);
                }
            }
            Action::FocusPrev => {
                if let Some(i) = self.form.focus_prev() {
                    self.focus_field(i);
                }
            }
            Action::Refocus => self.focus_field(self.form.focused),
            Action::InsertChar(ch) => {
                if self.form.insert_char(ch) {
                    self.emit_input();
                }
            }
            Action::Backspace => {
                if self.form.backspace() {
                    self.emit_input();
                }
            }
            Action::Delete => {
                if self.form.delete() {
                    self.emit_input();
                }
            }
            Action::CursorLeft => self.form.cursor_left(),
            Action::CursorRight => self.form.cursor_right(),
            Action::CursorHome => self.form.cursor_home(),
            Action::CursorEnd => self.form.cursor_end(),
            Action::ClickAt(x, y) => self.handle_click(x, y),
            Action::Reload => {
                if let Some(ticket) = self.popup.reload() {
                    self.dispatch_load(ticket);
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Resize(..) | Action::None => {}
            Action::Tick => self.tick = self.tick.wrapping_add(1),
        }
        self.should_quit
    }

    /// Route a navigation key: the popup sees it first when it observes the
    /// focused input; unconsumed keys fall through to form navigation.
    fn handle_nav(&mut self, key: Key) {
        let focused = self.form.focused_field().map(|f| f.id.clone());
        if let Some(id) = focused
            && self.popup.is_observed(&id)
        {
            let outcome = self.popup.key(key, &mut self.form);
            if let KeyOutcome::Committed(ref report) = outcome {
                self.record_commit(report);
            }
            if outcome.is_consumed() {
                return;
            }
        }

        match key {
            Key::Up => {
                if let Some(i) = self.form.focus_prev() {
                    self.focus_field(i);
                }
            }
            Key::Down | Key::Enter => {
                if let Some(i) = self.form.focus_next() {
                    self.focus_field(i);
                }
            }
            Key::Escape => {
                if self.popup.is_visible() {
                    self.popup.hide();
                } else {
                    self.confirm_quit = true;
                }
            }
            Key::Other => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);

        if self.popup.is_visible()
            && let Some(&(_, record_index)) = self.popup_rows.iter().find(|(r, _)| r.contains(pos))
        {
            if let Some(report) = self.popup.commit(record_index, &mut self.form) {
                self.record_commit(&report);
            }
            return;
        }

        self.popup.pointer_down(Point { x, y });

        // A press on an already focused input does not refocus it.
        if let Some(i) = self.input_areas.iter().position(|r| r.contains(pos))
            && i != self.form.focused
        {
            self.focus_field(i);
        }
    }
}
