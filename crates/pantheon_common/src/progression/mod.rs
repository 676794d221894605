//! Skill progression: XP curve, radar normalization, daily quest derivation.
//!
//! Everything here is a pure transform over immutable snapshots. The
//! backend owns the counters and awards the XP; this module only
//! derives presentation state and is safe to re-evaluate on every poll.

pub mod levels;
pub mod quests;

pub use levels::{normalized_radar_value, overall_level, progress_fraction, required_xp};
pub use quests::{derive_quests, CounterField, Quest, QuestDef, QuestTarget, QUEST_DEFS};
