//! Aggregate and gating computation for day finalization.

use kaiteki_core::{DailyProgress, Pillar};

/// Default average threshold required to finish a day.
pub const DEFAULT_FINISH_THRESHOLD: u8 = 50;

/// Mean of the three pillar scores, in [0, 100].
pub fn compute_average(progress: &DailyProgress) -> f32 {
    (progress.ritual as f32 + progress.nutrition as f32 + progress.movement as f32) / 3.0
}

/// Precondition for finishing a day.
///
/// Exactly one policy applies at a time; the default is the average gate
/// so partial effort across pillars still permits finishing the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishGate {
    /// Average of the three pillars must reach the threshold (inclusive).
    AverageAtLeast(u8),

    /// Every pillar must be at full completion.
    AllPillarsComplete,
}

impl FinishGate {
    /// Whether the gate permits finishing the day.
    pub fn permits(&self, progress: &DailyProgress) -> bool {
        match self {
            FinishGate::AverageAtLeast(threshold) => {
                compute_average(progress) >= *threshold as f32
            }
            FinishGate::AllPillarsComplete => {
                Pillar::ALL.iter().all(|p| progress.is_complete(*p))
            }
        }
    }
}

impl Default for FinishGate {
    fn default() -> Self {
        FinishGate::AverageAtLeast(DEFAULT_FINISH_THRESHOLD)
    }
}
