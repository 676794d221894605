//! Core domain types shared between the dashboard pages and the client layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the five progression tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Fitness,
    Networking,
    Careers,
    Relationships,
    Mental,
}

impl SkillKind {
    /// All tracks in dashboard display order.
    pub const ALL: [SkillKind; 5] = [
        SkillKind::Fitness,
        SkillKind::Networking,
        SkillKind::Careers,
        SkillKind::Relationships,
        SkillKind::Mental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Fitness => "fitness",
            SkillKind::Networking => "networking",
            SkillKind::Careers => "careers",
            SkillKind::Relationships => "relationships",
            SkillKind::Mental => "mental",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Level and XP state for a single skill.
///
/// `xp` counts toward the current level and stays below
/// `required_xp(level)`; `total_xp` only ever grows. The backend owns
/// both and enforces the invariants; the client treats them as a
/// read-only snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub level: u32,
    pub xp: u64,
    #[serde(rename = "totalXp")]
    pub total_xp: u64,
}

impl Skill {
    pub fn new(level: u32) -> Self {
        Self {
            level: level.max(1),
            xp: 0,
            total_xp: 0,
        }
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self::new(1)
    }
}

/// All skills keyed by track, in stable iteration order.
pub type SkillBook = BTreeMap<SkillKind, Skill>;

/// Daily raw activity counters, owned and reset at the day boundary by
/// the backend. The client only ever reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounters {
    #[serde(default)]
    pub miles_run: u32,
    #[serde(default)]
    pub emails_sent: u32,
    #[serde(default)]
    pub jobs_applied: u32,
}

/// A scheduled item from the synced calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl CalendarEvent {
    /// A well-formed event never ends before it starts.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn skill_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SkillKind::Careers).unwrap(),
            "\"careers\""
        );
        let parsed: SkillKind = serde_json::from_str("\"fitness\"").unwrap();
        assert_eq!(parsed, SkillKind::Fitness);
    }

    #[test]
    fn skill_level_floors_at_one() {
        assert_eq!(Skill::new(0).level, 1);
        assert_eq!(Skill::new(7).level, 7);
        assert_eq!(Skill::default().level, 1);
    }

    #[test]
    fn counters_tolerate_missing_fields() {
        let counters: TaskCounters = serde_json::from_str(r#"{"emails_sent": 2}"#).unwrap();
        assert_eq!(counters.emails_sent, 2);
        assert_eq!(counters.miles_run, 0);
        assert_eq!(counters.jobs_applied, 0);
    }

    #[test]
    fn event_well_formedness() {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let event = CalendarEvent {
            start,
            end: start + chrono::Duration::hours(1),
            subject: "Coffee chat".to_string(),
            location: None,
            preview: None,
        };
        assert!(event.is_well_formed());

        let backwards = CalendarEvent {
            end: start - chrono::Duration::minutes(5),
            ..event
        };
        assert!(!backwards.is_well_formed());
    }
}
