//! JSON file storage implementation.
//!
//! Stores data as JSON files under a data root, one directory per user:
//! `users/<user>/profile.json` and `users/<user>/days/<YYYY-MM-DD>.json`.

use std::path::{Path, PathBuf};

use kaiteki_core::{DailyProgress, DayKey, ProgressHistory, ProgressPatch, UserId, UserProfile};
use tokio::fs;
use tracing::warn;

use super::{Result, Store};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create storage rooted at the given directory. Creates the root if it
    /// does not exist; per-user directories are created on first write.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users")).await?;
        Ok(Self { root })
    }

    fn user_dir(&self, user: UserId) -> PathBuf {
        self.root.join("users").join(user.to_string())
    }

    fn profile_path(&self, user: UserId) -> PathBuf {
        self.user_dir(user).join("profile.json")
    }

    fn days_dir(&self, user: UserId) -> PathBuf {
        self.user_dir(user).join("days")
    }

    fn day_path(&self, user: UserId, day: DayKey) -> PathBuf {
        self.days_dir(user).join(format!("{}.json", day))
    }
}

#[async_trait::async_trait]
impl Store for JsonStore {
    async fn load_profile(&self, user: UserId) -> Result<Option<UserProfile>> {
        read_json(&self.profile_path(user)).await
    }

    async fn save_profile(&mut self, user: UserId, profile: &UserProfile) -> Result<()> {
        fs::create_dir_all(self.user_dir(user)).await?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.profile_path(user), json.as_bytes()).await?;
        Ok(())
    }

    async fn load_day(&self, user: UserId, day: DayKey) -> Result<Option<DailyProgress>> {
        read_json(&self.day_path(user, day)).await
    }

    async fn save_day(
        &mut self,
        user: UserId,
        day: DayKey,
        progress: &DailyProgress,
    ) -> Result<()> {
        fs::create_dir_all(self.days_dir(user)).await?;
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(self.day_path(user, day), json.as_bytes()).await?;
        Ok(())
    }

    async fn merge_day(
        &mut self,
        user: UserId,
        day: DayKey,
        patch: &ProgressPatch,
    ) -> Result<DailyProgress> {
        let mut progress = self.load_day(user, day).await?.unwrap_or_default();
        progress.merge(patch);
        self.save_day(user, day, &progress).await?;
        Ok(progress)
    }

    async fn load_history(&self, user: UserId) -> Result<ProgressHistory> {
        let dir = self.days_dir(user);
        let mut history = ProgressHistory::new();

        let mut rd = match fs::read_dir(&dir).await {
            Ok(rd) => rd,
            // No writes yet for this user
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(history),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(key) = stem.parse::<DayKey>() else {
                warn!("Skipping unrecognized day file: {}", path.display());
                continue;
            };
            if let Some(progress) = read_json::<DailyProgress>(&path).await? {
                history.upsert(key, progress);
            }
        }

        Ok(history)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiteki_core::{Pillar, ProfileDraft};

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    async fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        (dir, store)
    }

    fn profile() -> UserProfile {
        ProfileDraft {
            name: "Mina Sato".to_string(),
            age: 41,
            current_weight_kg: 74.0,
            weight_goal_kg: 65.0,
            height_m: None,
            takes_medication: false,
            medication_dose: None,
            personal_dream: String::new(),
        }
        .validate(chrono::Utc::now())
        .unwrap()
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let (_dir, mut store) = store().await;
        let user = UserId::new();

        assert!(store.load_profile(user).await.unwrap().is_none());

        store.save_profile(user, &profile()).await.unwrap();
        let loaded = store.load_profile(user).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Mina Sato");
        assert!(loaded.onboarded);
    }

    #[tokio::test]
    async fn test_day_absent_until_first_write() {
        let (_dir, mut store) = store().await;
        let user = UserId::new();
        let day = key("2024-03-09");

        assert!(store.load_day(user, day).await.unwrap().is_none());

        store
            .merge_day(user, day, &ProgressPatch::pillar(Pillar::Ritual, 20))
            .await
            .unwrap();
        let loaded = store.load_day(user, day).await.unwrap().unwrap();
        assert_eq!(loaded.ritual, 20);
        assert_eq!(loaded.nutrition, 0);
    }

    #[tokio::test]
    async fn test_merge_preserves_other_fields() {
        let (_dir, mut store) = store().await;
        let user = UserId::new();
        let day = key("2024-03-09");

        store
            .save_day(
                user,
                day,
                &DailyProgress {
                    ritual: 60,
                    nutrition: 34,
                    movement: 0,
                    day_finished: false,
                },
            )
            .await
            .unwrap();

        let merged = store
            .merge_day(user, day, &ProgressPatch::finished())
            .await
            .unwrap();
        assert!(merged.day_finished);
        assert_eq!(merged.ritual, 60);
        assert_eq!(merged.nutrition, 34);
    }

    #[tokio::test]
    async fn test_history_lists_all_days() {
        let (_dir, mut store) = store().await;
        let user = UserId::new();

        let history = store.load_history(user).await.unwrap();
        assert!(history.is_empty());

        store
            .merge_day(user, key("2024-03-08"), &ProgressPatch::finished())
            .await
            .unwrap();
        store
            .merge_day(
                user,
                key("2024-03-09"),
                &ProgressPatch::pillar(Pillar::Movement, 50),
            )
            .await
            .unwrap();

        let history = store.load_history(user).await.unwrap();
        assert_eq!(history.len(), 2);
        let finished: Vec<DayKey> = history.finished_days().collect();
        assert_eq!(finished, vec![key("2024-03-08")]);
    }

    #[tokio::test]
    async fn test_histories_are_per_user() {
        let (_dir, mut store) = store().await;
        let alice = UserId::new();
        let bob = UserId::new();

        store
            .merge_day(alice, key("2024-03-09"), &ProgressPatch::finished())
            .await
            .unwrap();

        assert!(store.load_history(bob).await.unwrap().is_empty());
        assert!(store
            .load_day(bob, key("2024-03-09"))
            .await
            .unwrap()
            .is_none());
    }
}
