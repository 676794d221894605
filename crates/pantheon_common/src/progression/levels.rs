//! XP curve and level-derived values.
//!
//! XP required to clear level L: floor(100 * 1.5^(L-1)).
//! - Level 1: 100 XP
//! - Level 2: 150 XP
//! - Level 5: 506 XP
//! - Level 10: 3844 XP
//!
//! Levels grow unbounded; only the radar display caps at level 10.

use crate::types::{Skill, SkillBook};

const BASE_XP: f64 = 100.0;
const GROWTH_FACTOR: f64 = 1.5;

/// Radar presentation cap: levels past this all render at full scale.
pub const RADAR_LEVEL_CAP: u32 = 10;

/// XP needed to clear the given level and reach the next.
///
/// Defined for level >= 1; lower inputs are treated as level 1 rather
/// than rejected, since this sits on a presentation path.
pub fn required_xp(level: u32) -> u64 {
    let level = level.max(1);
    (BASE_XP * GROWTH_FACTOR.powi(level as i32 - 1)).floor() as u64
}

/// Fraction of the current level already earned, clamped to [0, 1].
pub fn progress_fraction(skill: &Skill) -> f64 {
    let required = required_xp(skill.level);
    if required == 0 {
        return 0.0;
    }
    (skill.xp as f64 / required as f64).clamp(0.0, 1.0)
}

/// Radar axis value for comparative multi-skill display.
///
/// Capped at [`RADAR_LEVEL_CAP`] so the chart scale stays stable as
/// levels grow past it.
pub fn normalized_radar_value(skill: &Skill) -> f64 {
    (skill.level as f64 / RADAR_LEVEL_CAP as f64).min(1.0)
}

/// Overall hero level across all tracks: floor(sqrt(total_xp / 100)) + 1.
pub fn overall_level(skills: &SkillBook) -> u32 {
    let total_xp: u64 = skills.values().map(|s| s.total_xp).sum();
    (total_xp as f64 / 100.0).sqrt() as u32 + 1
}
