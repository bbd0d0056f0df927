//! Kaiteki core data models.
//!
//! This crate defines the data structures shared by the daily progress
//! engine, the storage backends, and the coach collaborator.

#![warn(missing_docs)]

// Core identities
mod id;

// User identity and goals
mod profile;

// Daily progress records
mod progress;
mod history;

// Re-exports
pub use id::UserId;

// Profile
pub use profile::{Medication, ProfileDraft, ProfileError, UserProfile, DEFAULT_DREAM};

// Progress
pub use progress::{DailyProgress, DayKey, Pillar, ProgressPatch, Score};
pub use history::ProgressHistory;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
