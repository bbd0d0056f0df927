//! In-memory storage implementation, for tests and ephemeral runs.

use std::collections::HashMap;

use kaiteki_core::{DailyProgress, DayKey, ProgressHistory, ProgressPatch, UserId, UserProfile};

use super::{Result, Store};

/// HashMap-backed storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    profiles: HashMap<UserId, UserProfile>,
    days: HashMap<(UserId, DayKey), DailyProgress>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn load_profile(&self, user: UserId) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(&user).cloned())
    }

    async fn save_profile(&mut self, user: UserId, profile: &UserProfile) -> Result<()> {
        self.profiles.insert(user, profile.clone());
        Ok(())
    }

    async fn load_day(&self, user: UserId, day: DayKey) -> Result<Option<DailyProgress>> {
        Ok(self.days.get(&(user, day)).copied())
    }

    async fn save_day(
        &mut self,
        user: UserId,
        day: DayKey,
        progress: &DailyProgress,
    ) -> Result<()> {
        self.days.insert((user, day), *progress);
        Ok(())
    }

    async fn merge_day(
        &mut self,
        user: UserId,
        day: DayKey,
        patch: &ProgressPatch,
    ) -> Result<DailyProgress> {
        let progress = self.days.entry((user, day)).or_default();
        progress.merge(patch);
        Ok(*progress)
    }

    async fn load_history(&self, user: UserId) -> Result<ProgressHistory> {
        Ok(self
            .days
            .iter()
            .filter(|((owner, _), _)| *owner == user)
            .map(|((_, day), progress)| (*day, *progress))
            .collect())
    }
}
