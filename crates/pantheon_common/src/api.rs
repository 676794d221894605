//! Wire protocol types for the dashboard backend.
//!
//! Field names mirror the backend's JSON (camelCase). The backend is
//! the authority for users, jobs, people, counters, and XP awards;
//! these types only describe what crosses the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::SkillKind;

/// XP granted per skill by a batch action.
pub type XpAwarded = BTreeMap<SkillKind, u64>;

/// Result of a batch job application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchApplyOutcome {
    /// Ids the backend confirmed as newly applied.
    #[serde(default)]
    pub succeeded_ids: Vec<String>,
    #[serde(default)]
    pub xp_awarded: XpAwarded,
    /// Informational messages to surface verbatim, in order.
    #[serde(default)]
    pub notifications: Vec<String>,
}

/// A generated outreach message. Immutable once drafted: a later send
/// uses the captured subject and body even if the live collection has
/// moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub target_id: String,
    pub subject: String,
    pub body: String,
}

/// Per-target delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Success,
    Failure,
}

/// Result of a batch send or follow-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSendOutcome {
    /// Delivery status keyed by target id.
    #[serde(default)]
    pub results_by_target_id: BTreeMap<String, SendStatus>,
    #[serde(default)]
    pub xp_awarded: XpAwarded,
    #[serde(default)]
    pub notifications: Vec<String>,
}

/// Result of a manual XP grant (the external action that completes a
/// manual quest).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpAddOutcome {
    pub skill: SkillKind,
    pub new_level: u32,
    pub new_xp: u64,
    pub total_level: u32,
}
