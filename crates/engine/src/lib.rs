//! Kaiteki daily progress engine.
//!
//! Owns the per-day progress record: pillar update rules, the
//! aggregate/gating computation, the day-finalization state machine, and
//! history queries. Persistence and message generation are delegated to
//! the [`kaiteki_storage::Store`] and [`kaiteki_coach::Coach`]
//! collaborators.

mod finalize;
mod gate;
mod pillars;
mod tracker;

pub use finalize::{affirmation_warranted, FinishOutcome};
pub use gate::{compute_average, FinishGate, DEFAULT_FINISH_THRESHOLD};
pub use pillars::{
    apply_delta, estimate_movement_minutes, full_movement_minutes, ritual_step_credit, Routine,
    MEAL_CREDIT, RITUAL_ITEMS,
};
pub use tracker::DayTracker;
