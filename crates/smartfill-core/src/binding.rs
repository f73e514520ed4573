//! Field bindings and the set of host inputs the popup observes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::InputHost;
use crate::path::FieldPath;

/// External identifier of a host input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputId(String);

impl InputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One record field feeding one host input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub path: FieldPath,
    pub input: InputId,
}

impl Binding {
    pub fn new(path: impl Into<FieldPath>, input: impl Into<InputId>) -> Self {
        Self {
            path: path.into(),
            input: input.into(),
        }
    }
}

/// Ordered binding map, in the caller's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldBindings(Vec<Binding>);

impl FieldBindings {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self(bindings)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path edited through `input`. When several paths share an input the
    /// last one wins.
    pub fn path_for(&self, input: &InputId) -> Option<&FieldPath> {
        self.0
            .iter()
            .rev()
            .find(|b| &b.input == input)
            .map(|b| &b.path)
    }

    /// Distinct bound input ids.
    pub fn input_ids(&self) -> BTreeSet<InputId> {
        self.0.iter().map(|b| b.input.clone()).collect()
    }
}

impl FromIterator<Binding> for FieldBindings {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldBindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Inputs whose observers were attached or detached by a sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingDiff {
    pub attached: Vec<InputId>,
    pub detached: Vec<InputId>,
}

impl BindingDiff {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

/// Host inputs currently observed for focus, input and key events.
#[derive(Debug, Clone, Default)]
pub struct ObserverSet {
    observed: BTreeSet<InputId>,
}

impl ObserverSet {
    pub fn contains(&self, id: &InputId) -> bool {
        self.observed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Bring the observed set in line with `bindings`.
    ///
    /// Only inputs that are bound and present in the host are observed. Ids
    /// already observed are left alone, so repeated syncs with an unchanged
    /// binding set touch nothing.
    pub fn sync(&mut self, bindings: &FieldBindings, host: &impl InputHost) -> BindingDiff {
        let wanted: BTreeSet<InputId> = bindings
            .input_ids()
            .into_iter()
            .filter(|id| host.has_input(id))
            .collect();

        let detached: Vec<InputId> = self.observed.difference(&wanted).cloned().collect();
        let attached: Vec<InputId> = wanted.difference(&self.observed).cloned().collect();

        for id in &detached {
            self.observed.remove(id);
        }
        self.observed.extend(attached.iter().cloned());

        BindingDiff { attached, detached }
    }

    pub fn clear(&mut self) -> Vec<InputId> {
        std::mem::take(&mut self.observed).into_iter().collect()
    }
}
