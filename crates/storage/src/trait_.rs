//! Storage trait abstraction.

use async_trait::async_trait;
use kaiteki_core::{DailyProgress, DayKey, ProgressHistory, ProgressPatch, UserId, UserProfile};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for Kaiteki data.
///
/// This trait allows different persistence backends to be plugged in. Each
/// user owns exactly one profile and one history of daily records; records
/// are keyed by ISO calendar date and never deleted.
#[async_trait]
pub trait Store: Send + Sync {
    // === Profile operations ===

    /// Load a user's profile. Absence is not an error.
    async fn load_profile(&self, user: UserId) -> Result<Option<UserProfile>>;

    /// Save a user's profile (create or replace).
    async fn save_profile(&mut self, user: UserId, profile: &UserProfile) -> Result<()>;

    // === Daily progress operations ===

    /// Load the record for one calendar date. Absence is a valid, common
    /// state until the first pillar write for that date.
    async fn load_day(&self, user: UserId, day: DayKey) -> Result<Option<DailyProgress>>;

    /// Overwrite the record for one calendar date.
    async fn save_day(&mut self, user: UserId, day: DayKey, progress: &DailyProgress)
        -> Result<()>;

    /// Merge-write a partial record for one calendar date, creating the
    /// record from a zeroed default if absent. Returns the merged record.
    async fn merge_day(
        &mut self,
        user: UserId,
        day: DayKey,
        patch: &ProgressPatch,
    ) -> Result<DailyProgress>;

    /// Load the user's full history, all dates with a record.
    async fn load_history(&self, user: UserId) -> Result<ProgressHistory>;
}
