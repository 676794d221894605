//! Aggregated feedback from one batch invocation.

use serde::{Deserialize, Serialize};

use pantheon_common::api::XpAwarded;

/// Terminal branch of a batch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    /// Every requested target was accepted.
    Success,
    /// A strict subset was accepted; the rest were reverted.
    Partial,
    /// The remote call failed; every optimistic change was reverted.
    Failed,
}

/// The single aggregated report produced by every batch invocation,
/// regardless of branch. The caller renders it as user feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcome: BatchOutcome,
    /// Targets confirmed by the backend, in submission order.
    pub succeeded_ids: Vec<String>,
    /// Targets rolled back to eligible, in submission order.
    pub reverted_ids: Vec<String>,
    /// XP granted per skill, for display.
    pub xp_awarded: XpAwarded,
    /// Informational messages passed through verbatim, in order.
    pub notifications: Vec<String>,
}

impl BatchReport {
    pub fn total_succeeded(&self) -> usize {
        self.succeeded_ids.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.outcome == BatchOutcome::Success
    }
}
