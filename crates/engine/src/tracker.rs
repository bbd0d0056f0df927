//! Day tracker: pillar actions against one calendar day's record.
//!
//! The tracker holds an optimistic local copy of the day's record so the
//! caller sees updates without waiting for the store. Every action
//! merge-writes the changed field; when a write fails, the tracker adopts
//! the store's authoritative state again before surfacing the error.

use std::sync::Arc;

use kaiteki_core::{DailyProgress, DayKey, Pillar, ProgressHistory, ProgressPatch, Score, UserId};
use kaiteki_storage::{StorageError, Store};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::pillars::{apply_delta, ritual_step_credit, Routine, MEAL_CREDIT};

/// Pillar actions and history queries for one user and one calendar day.
pub struct DayTracker<S> {
    store: Arc<Mutex<S>>,
    user: UserId,
    day: DayKey,
    current: DailyProgress,
    /// Whether a record for this day exists in the store. Until the first
    /// write the day has no record; the zeroed `current` is only the
    /// optimistic working view.
    exists: bool,
}

impl<S: Store> DayTracker<S> {
    /// Open a tracker for the given day, loading the existing record if one
    /// exists. No record is created until the first pillar write.
    pub async fn open(
        store: Arc<Mutex<S>>,
        user: UserId,
        day: DayKey,
    ) -> Result<Self, StorageError> {
        let loaded = store.lock().await.load_day(user, day).await?;
        let exists = loaded.is_some();
        Ok(Self {
            store,
            user,
            day,
            current: loaded.unwrap_or_default(),
            exists,
        })
    }

    /// The calendar day this tracker operates on.
    pub fn day(&self) -> DayKey {
        self.day
    }

    /// The user this tracker belongs to.
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Current (optimistic) view of the day's record.
    pub fn progress(&self) -> &DailyProgress {
        &self.current
    }

    /// Explicitly write a zeroed record for the day, as onboarding does.
    pub async fn zero_init(&mut self) -> Result<(), StorageError> {
        let zeroed = DailyProgress::default();
        self.store
            .lock()
            .await
            .save_day(self.user, self.day, &zeroed)
            .await?;
        self.current = zeroed;
        self.exists = true;
        Ok(())
    }

    /// Complete one ritual checklist item.
    pub async fn complete_ritual_step(&mut self) -> Result<Score, StorageError> {
        let next = apply_delta(self.current.ritual, ritual_step_credit() as i16);
        self.commit_pillar(Pillar::Ritual, next).await
    }

    /// Register one healthy meal.
    pub async fn register_meal(&mut self) -> Result<Score, StorageError> {
        let next = apply_delta(self.current.nutrition, MEAL_CREDIT as i16);
        self.commit_pillar(Pillar::Nutrition, next).await
    }

    /// Complete one exercise of a movement routine.
    pub async fn complete_exercise(&mut self, routine: Routine) -> Result<Score, StorageError> {
        let next = apply_delta(self.current.movement, routine.exercise_credit() as i16);
        self.commit_pillar(Pillar::Movement, next).await
    }

    /// Finish all exercises of a routine, setting movement to full.
    pub async fn complete_routine(&mut self, routine: Routine) -> Result<Score, StorageError> {
        info!("Routine complete: {}", routine);
        self.commit_pillar(Pillar::Movement, 100).await
    }

    /// The record for any date, if one exists. Absence is a valid state:
    /// an unwritten date - including the tracker's own day before its
    /// first write - has no record, not a zeroed one.
    pub async fn get_day(&self, day: DayKey) -> Result<Option<DailyProgress>, StorageError> {
        if day == self.day {
            return Ok(self.exists.then_some(self.current));
        }
        self.store.lock().await.load_day(self.user, day).await
    }

    /// The user's full history.
    pub async fn history(&self) -> Result<ProgressHistory, StorageError> {
        self.store.lock().await.load_history(self.user).await
    }

    /// Dates whose day has been finished, for the calendar view.
    pub async fn finished_days(&self) -> Result<Vec<DayKey>, StorageError> {
        Ok(self.history().await?.finished_days().collect())
    }

    /// Optimistically apply a pillar score and merge-write it. On write
    /// failure the tracker re-fetches the authoritative record (falling
    /// back to the pre-action state if that also fails).
    async fn commit_pillar(
        &mut self,
        pillar: Pillar,
        next: Score,
    ) -> Result<Score, StorageError> {
        let before = self.current;
        self.current.set_score(pillar, next);

        let patch = ProgressPatch::pillar(pillar, next);
        let store = Arc::clone(&self.store);
        let mut store = store.lock().await;
        match store.merge_day(self.user, self.day, &patch).await {
            Ok(saved) => {
                self.current = saved;
                self.exists = true;
                Ok(saved.score(pillar))
            }
            Err(e) => {
                warn!("Failed to persist {} update: {}", pillar, e);
                self.reconcile(&mut *store, before).await;
                Err(e)
            }
        }
    }

    /// Merge-write the finished flag, with the same reconciliation rule.
    pub(crate) async fn commit_finished(&mut self) -> Result<(), StorageError> {
        let before = self.current;
        self.current.day_finished = true;

        let store = Arc::clone(&self.store);
        let mut store = store.lock().await;
        match store
            .merge_day(self.user, self.day, &ProgressPatch::finished())
            .await
        {
            Ok(saved) => {
                self.current = saved;
                self.exists = true;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to persist day finalization: {}", e);
                self.reconcile(&mut *store, before).await;
                Err(e)
            }
        }
    }

    /// Adopt the store's authoritative state after a failed write, falling
    /// back to the pre-action state when the re-fetch also fails.
    async fn reconcile(&mut self, store: &mut S, before: DailyProgress) {
        match store.load_day(self.user, self.day).await {
            Ok(Some(stored)) => {
                self.current = stored;
                self.exists = true;
            }
            Ok(None) => {
                self.current = before;
                self.exists = false;
            }
            Err(_) => self.current = before,
        }
    }
}
