//! Per-user history of daily progress records, keyed by calendar date.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::progress::{DailyProgress, DayKey};

/// All of a user's daily records, keyed by date.
///
/// Records are appended or updated, never deleted; the calendar view reads
/// finished days out of the full mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressHistory(BTreeMap<DayKey, DailyProgress>);

impl ProgressHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a date, if one exists.
    pub fn day(&self, key: DayKey) -> Option<&DailyProgress> {
        self.0.get(&key)
    }

    /// Insert or replace the record for a date.
    pub fn upsert(&mut self, key: DayKey, progress: DailyProgress) {
        self.0.insert(key, progress);
    }

    /// Dates whose day has been finished, in ascending date order.
    pub fn finished_days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.0
            .iter()
            .filter(|(_, p)| p.day_finished)
            .map(|(key, _)| *key)
    }

    /// All records in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &DailyProgress)> {
        self.0.iter().map(|(key, p)| (*key, p))
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no day has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DayKey, DailyProgress)> for ProgressHistory {
    fn from_iter<I: IntoIterator<Item = (DayKey, DailyProgress)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
