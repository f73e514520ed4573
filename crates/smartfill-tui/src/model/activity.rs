use std::collections::VecDeque;

/// Maximum number of entries kept in the activity log.
const MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Load,
    Fill,
    Changed,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub message: String,
}

/// Bounded log of recent fills, change notifications and load outcomes.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, kind: ActivityKind, message: impl Into<String>) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            kind,
            message: message.into(),
        });
    }

    /// The newest `n` entries, newest last.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
