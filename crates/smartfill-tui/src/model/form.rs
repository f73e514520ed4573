use std::collections::VecDeque;

use smartfill_core::{InputHost, InputId};

/// A labelled single-line text input.
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: InputId,
    pub label: String,
    pub value: String,
    /// Cursor position as a byte offset into `value`, always on a char boundary.
    pub cursor: usize,
}

impl FormField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            id: InputId::new(id),
            label: label.into(),
            cursor: value.len(),
            value,
        }
    }
}

/// The host form: inputs addressed by id, one of which has focus.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
    /// Inputs that received a changed notification, oldest first.
    changes: VecDeque<InputId>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focused: 0,
            changes: VecDeque::new(),
        }
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused)
    }

    /// Move focus forward (wrapping). Returns the newly focused index.
    pub fn focus_next(&mut self) -> Option<usize> {
        if self.fields.is_empty() {
            return None;
        }
        self.focused = (self.focused + 1) % self.fields.len();
        Some(self.focused)
    }

    pub fn focus_prev(&mut self) -> Option<usize> {
        if self.fields.is_empty() {
            return None;
        }
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        Some(self.focused)
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(field) = self.focused_mut() else {
            return false;
        };
        field.value.insert(field.cursor, ch);
        field.cursor += ch.len_utf8();
        true
    }

    /// Delete the char before the cursor. Returns whether the value changed.
    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.focused_mut() else {
            return false;
        };
        if field.cursor == 0 {
            return false;
        }
        let prev = field.value[..field.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        field.value.drain(prev..field.cursor);
        field.cursor = prev;
        true
    }

    /// Delete the char under the cursor. Returns whether the value changed.
    pub fn delete(&mut self) -> bool {
        let Some(field) = self.focused_mut() else {
            return false;
        };
        let Some(ch) = field.value[field.cursor..].chars().next() else {
            return false;
        };
        let end = field.cursor + ch.len_utf8();
        field.value.drain(field.cursor..end);
        true
    }

    pub fn cursor_left(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.cursor = field.value[..field.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(field) = self.focused_mut()
            && let Some(ch) = field.value[field.cursor..].chars().next()
        {
            field.cursor += ch.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.cursor = field.value.len();
        }
    }

    /// Pop the oldest pending changed notification.
    pub fn take_change(&mut self) -> Option<InputId> {
        self.changes.pop_front()
    }

    fn field(&self, id: &InputId) -> Option<&FormField> {
        self.fields.iter().find(|f| &f.id == id)
    }
}

impl InputHost for Form {
    fn has_input(&self, id: &InputId) -> bool {
        self.field(id).is_some()
    }

    fn value(&self, id: &InputId) -> Option<String> {
        self.field(id).map(|f| f.value.clone())
    }

    fn set_value(&mut self, id: &InputId, value: String) {
        if let Some(field) = self.fields.iter_mut().find(|f| &f.id == id) {
            field.cursor = value.len();
            field.value = value;
        }
    }

    fn dispatch_changed(&mut self, id: &InputId) {
        self.changes.push_back(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(vec![
            FormField::new("nameInput", "Name", ""),
            FormField::new("cityInput", "City", "Rome"),
        ])
    }

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut form = form();
        form.insert_char('é');
        form.insert_char('x');
        assert!(form.backspace());
        assert_eq!(form.fields[0].value, "é");
        form.cursor_left();
        assert_eq!(form.fields[0].cursor, 0);
        assert!(form.delete());
        assert!(form.fields[0].value.is_empty());
        assert!(!form.backspace());
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = form();
        assert_eq!(form.focus_prev(), Some(1));
        assert_eq!(form.focus_next(), Some(0));
    }

    #[test]
    fn set_value_moves_cursor_to_end_and_queues_nothing() {
        let mut form = form();
        form.set_value(&InputId::from("nameInput"), "Ann".to_string());
        assert_eq!(form.fields[0].cursor, 3);
        assert!(form.take_change().is_none());
        form.dispatch_changed(&InputId::from("nameInput"));
        assert_eq!(form.take_change(), Some(InputId::from("nameInput")));
    }

    #[test]
    fn unknown_inputs_are_absent() {
        let mut form = form();
        assert!(!form.has_input(&InputId::from("zip")));
        form.set_value(&InputId::from("zip"), "123".to_string());
        assert_eq!(form.value(&InputId::from("zip")), None);
    }
}
