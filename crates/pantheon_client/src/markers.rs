//! Optimistic applied-state tracking for one workflow instance.

use std::collections::HashMap;

/// Local record that an entity has been actioned ahead of backend
/// confirmation.
///
/// A `pending` entry is in-flight optimism and may still be reverted.
/// A finalized entry is permanent for the session: the id is excluded
/// from every later submission by this workflow instance.
#[derive(Debug, Clone, Default)]
pub struct AppliedMarkers {
    /// id -> pending flag.
    entries: HashMap<String, bool>,
}

impl AppliedMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark ids as in-flight ahead of the remote call.
    pub fn mark_pending(&mut self, ids: &[String]) {
        for id in ids {
            self.entries.insert(id.clone(), true);
        }
    }

    /// Confirm an id as permanently actioned this session.
    pub fn finalize(&mut self, id: &str) {
        self.entries.insert(id.to_string(), false);
    }

    /// Drop an optimistic entry so the id is eligible again.
    pub fn revert(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Whether the id was confirmed actioned this session.
    pub fn is_actioned(&self, id: &str) -> bool {
        matches!(self.entries.get(id), Some(false))
    }

    /// Whether the id has an in-flight optimistic entry.
    pub fn is_pending(&self, id: &str) -> bool {
        matches!(self.entries.get(id), Some(true))
    }

    pub fn actioned_count(&self) -> usize {
        self.entries.values().filter(|pending| !**pending).count()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.values().filter(|pending| **pending).count()
    }
}
