//! Daily progress record - one per user per calendar date.

use serde::{Deserialize, Serialize};

/// Pillar completion percentage, always within 0..=100.
pub type Score = u8;

/// The three tracked daily activity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    /// The daily tea ritual
    Ritual,
    /// Nutrition / healthy meals
    Nutrition,
    /// Movement / exercise routines
    Movement,
}

impl Pillar {
    /// All pillars, in display order.
    pub const ALL: [Pillar; 3] = [Pillar::Ritual, Pillar::Nutrition, Pillar::Movement];
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pillar::Ritual => "ritual",
            Pillar::Nutrition => "nutrition",
            Pillar::Movement => "movement",
        };
        f.write_str(name)
    }
}

/// Completion state for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Tea ritual completion (0-100)
    pub ritual: Score,

    /// Nutrition completion (0-100)
    pub nutrition: Score,

    /// Movement completion (0-100)
    pub movement: Score,

    /// Whether the day has been closed out
    pub day_finished: bool,
}

impl DailyProgress {
    /// Current score for a pillar.
    pub fn score(&self, pillar: Pillar) -> Score {
        match pillar {
            Pillar::Ritual => self.ritual,
            Pillar::Nutrition => self.nutrition,
            Pillar::Movement => self.movement,
        }
    }

    /// Set a pillar score, clamping to 100.
    pub fn set_score(&mut self, pillar: Pillar, score: Score) {
        let score = score.min(100);
        match pillar {
            Pillar::Ritual => self.ritual = score,
            Pillar::Nutrition => self.nutrition = score,
            Pillar::Movement => self.movement = score,
        }
    }

    /// Whether a pillar has reached full completion.
    pub fn is_complete(&self, pillar: Pillar) -> bool {
        self.score(pillar) >= 100
    }

    /// Apply a merge patch, overwriting only the fields the patch names.
    pub fn merge(&mut self, patch: &ProgressPatch) {
        if let Some(ritual) = patch.ritual {
            self.ritual = ritual.min(100);
        }
        if let Some(nutrition) = patch.nutrition {
            self.nutrition = nutrition.min(100);
        }
        if let Some(movement) = patch.movement {
            self.movement = movement.min(100);
        }
        if let Some(day_finished) = patch.day_finished {
            self.day_finished = day_finished;
        }
    }
}

impl Default for DailyProgress {
    fn default() -> Self {
        Self {
            ritual: 0,
            nutrition: 0,
            movement: 0,
            day_finished: false,
        }
    }
}

/// Partial [`DailyProgress`] for merge-writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPatch {
    /// New ritual score, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ritual: Option<Score>,

    /// New nutrition score, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Score>,

    /// New movement score, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Score>,

    /// New finished flag, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_finished: Option<bool>,
}

impl ProgressPatch {
    /// Patch updating a single pillar score.
    pub fn pillar(pillar: Pillar, score: Score) -> Self {
        let mut patch = Self::default();
        match pillar {
            Pillar::Ritual => patch.ritual = Some(score),
            Pillar::Nutrition => patch.nutrition = Some(score),
            Pillar::Movement => patch.movement = Some(score),
        }
        patch
    }

    /// Patch marking the day finished.
    pub fn finished() -> Self {
        Self {
            day_finished: Some(true),
            ..Self::default()
        }
    }
}

/// ISO calendar date key (`YYYY-MM-DD`) for one day's record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(chrono::NaiveDate);

impl DayKey {
    /// Key for the given calendar date.
    pub fn new(date: chrono::NaiveDate) -> Self {
        Self(date)
    }

    /// Key for the current local date.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// The underlying calendar date.
    pub fn date(&self) -> chrono::NaiveDate {
        self.0
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_open_and_zeroed() {
        let progress = DailyProgress::default();
        for pillar in Pillar::ALL {
            assert_eq!(progress.score(pillar), 0);
        }
        assert!(!progress.day_finished);
    }

    #[test]
    fn test_set_score_clamps_at_100() {
        let mut progress = DailyProgress::default();
        progress.set_score(Pillar::Nutrition, 250);
        assert_eq!(progress.nutrition, 100);
        assert!(progress.is_complete(Pillar::Nutrition));
    }

    #[test]
    fn test_merge_patches_only_named_fields() {
        let mut progress = DailyProgress {
            ritual: 40,
            nutrition: 34,
            movement: 0,
            day_finished: false,
        };
        progress.merge(&ProgressPatch::pillar(Pillar::Nutrition, 68));
        assert_eq!(progress.ritual, 40);
        assert_eq!(progress.nutrition, 68);
        assert_eq!(progress.movement, 0);
        assert!(!progress.day_finished);

        progress.merge(&ProgressPatch::finished());
        assert!(progress.day_finished);
        assert_eq!(progress.nutrition, 68);
    }

    #[test]
    fn test_patch_serializes_sparsely() {
        let patch = ProgressPatch::pillar(Pillar::Ritual, 20);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"ritual":20}"#);
    }

    #[test]
    fn test_day_key_round_trip() {
        let key: DayKey = "2024-03-09".parse().unwrap();
        assert_eq!(key.to_string(), "2024-03-09");
        assert!("09/03/2024".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_day_key_serde_is_iso_string() {
        let key: DayKey = "2024-03-09".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#""2024-03-09""#);
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
