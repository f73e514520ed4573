//! The environment of already-rendered inputs the popup reads and fills.

use std::collections::BTreeMap;

use crate::binding::InputId;

/// Host-side inputs addressed by external id.
pub trait InputHost {
    fn has_input(&self, id: &InputId) -> bool;

    /// Current text of the input, `None` when no such input exists.
    fn value(&self, id: &InputId) -> Option<String>;

    fn set_value(&mut self, id: &InputId, value: String);

    /// Announce a programmatic change so listeners on the input observe it.
    /// Bubbles to the popup's own input observer like a user edit would.
    fn dispatch_changed(&mut self, id: &InputId);
}

/// In-memory host, for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    values: BTreeMap<InputId, String>,
    changed: Vec<InputId>,
}

impl MemoryHost {
    pub fn with_inputs<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: ids
                .into_iter()
                .map(|id| (InputId::new(id), String::new()))
                .collect(),
            changed: Vec::new(),
        }
    }

    /// Ids that received a changed notification, in dispatch order.
    pub fn changed(&self) -> &[InputId] {
        &self.changed
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(&InputId::new(id)).map(String::as_str)
    }

    /// Set a value as the user would, without dispatching a notification.
    pub fn type_into(&mut self, id: &str, value: &str) {
        if let Some(slot) = self.values.get_mut(&InputId::new(id)) {
            *slot = value.to_string();
        }
    }
}

impl InputHost for MemoryHost {
    fn has_input(&self, id: &InputId) -> bool {
        self.values.contains_key(id)
    }

    fn value(&self, id: &InputId) -> Option<String> {
        self.values.get(id).cloned()
    }

    fn set_value(&mut self, id: &InputId, value: String) {
        if let Some(slot) = self.values.get_mut(id) {
            *slot = value;
        }
    }

    fn dispatch_changed(&mut self, id: &InputId) {
        self.changed.push(id.clone());
    }
}
