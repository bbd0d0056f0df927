//! Pillar update rules.
//!
//! Every pillar action reduces to a clamped delta on a 0-100 score. The
//! deltas come from pillar-specific sub-actions: ritual checklist items,
//! healthy-meal registrations, and movement routine exercises.

use kaiteki_core::Score;

/// Credit for registering one healthy meal: three registrations reach 100.
pub const MEAL_CREDIT: Score = 34;

/// The tea ritual checklist.
pub const RITUAL_ITEMS: [&str; 5] = [
    "Green tea",
    "Matcha",
    "Ginger",
    "Lemon",
    "Meditation (5 min)",
];

/// Apply a completion delta to a score, staying within 0..=100.
///
/// Repeated application is idempotent with respect to the bounds: more
/// positive delta at 100 has no effect, negative delta at 0 has no effect.
pub fn apply_delta(score: Score, delta: i16) -> Score {
    (score as i16 + delta).clamp(0, 100) as Score
}

/// Credit for completing one ritual checklist item.
pub fn ritual_step_credit() -> Score {
    step_credit(RITUAL_ITEMS.len())
}

/// Even per-step credit so that completing every step reaches 100.
fn step_credit(steps: usize) -> Score {
    if steps == 0 {
        return 100;
    }
    100usize.div_ceil(steps).min(100) as Score
}

/// A movement routine from the daily catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Morning Energy: wake the body, fire up the metabolism
    Morning,
    /// Active Burn: calorie burn and strength
    Active,
    /// Night Wind-down: release tension before sleep
    Night,
}

impl Routine {
    /// All routines in the catalog.
    pub const ALL: [Routine; 3] = [Routine::Morning, Routine::Active, Routine::Night];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Routine::Morning => "Morning Energy",
            Routine::Active => "Active Burn",
            Routine::Night => "Night Wind-down",
        }
    }

    /// Number of exercises in the routine.
    pub fn exercise_count(&self) -> usize {
        match self {
            Routine::Morning => 5,
            Routine::Active => 9,
            Routine::Night => 5,
        }
    }

    /// Nominal duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            Routine::Morning => 5,
            Routine::Active => 10,
            Routine::Night => 7,
        }
    }

    /// Credit for completing one exercise of this routine.
    pub fn exercise_credit(&self) -> Score {
        step_credit(self.exercise_count())
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for Routine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Routine::Morning),
            "active" => Ok(Routine::Active),
            "night" => Ok(Routine::Night),
            other => Err(format!("unknown routine: {}", other)),
        }
    }
}

/// Total minutes of the full routine catalog. A movement score of 100
/// corresponds to this many minutes.
pub fn full_movement_minutes() -> u32 {
    Routine::ALL.iter().map(|r| r.duration_minutes()).sum()
}

/// Estimate movement minutes from the movement score, scaled against the
/// full catalog. The check-in report needs minutes while the daily record
/// only stores a percentage.
pub fn estimate_movement_minutes(score: Score) -> u32 {
    score as u32 * full_movement_minutes() / 100
}
