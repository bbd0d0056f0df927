//! Day finalization: Open -> Finished, guarded by the gate.

use kaiteki_coach::{AffirmationRequest, Coach};
use kaiteki_core::{Pillar, UserProfile};
use kaiteki_storage::{StorageError, Store};
use tracing::{debug, warn};

use crate::gate::{compute_average, FinishGate};
use crate::pillars::{estimate_movement_minutes, full_movement_minutes};
use crate::tracker::DayTracker;

/// Result of a finish-day attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
    /// The gate rejected the attempt; nothing changed.
    Rejected {
        /// Average pillar completion at the time of the attempt
        average: f32,
    },

    /// The day was already finished; finishing is terminal.
    AlreadyFinished,

    /// The day is now finished. The affirmation is present only when the
    /// coach produced one and judged it worth sending; otherwise the
    /// caller shows a generic acknowledgment.
    Finished {
        /// Personalized affirmation to surface, if any
        affirmation: Option<String>,
    },
}

/// Local heuristic for whether an affirmation is warranted: both struggle
/// and excellence deserve a message. Informational only; the coach's
/// returned flag governs display.
///
/// Minute thresholds come from the routine catalog: under half of the full
/// catalog counts as struggling, the full catalog as excelling.
pub fn affirmation_warranted(request: &AffirmationRequest) -> bool {
    let full_minutes = full_movement_minutes();
    let struggled = request.weight_change_kg <= 0.0
        || request.nutrition_adherence_percent < 70
        || !request.ritual_completed
        || request.movement_minutes < full_minutes / 2;
    let excelled = request.weight_change_kg > 0.0
        && request.nutrition_adherence_percent >= 80
        && request.ritual_completed
        && request.movement_minutes >= full_minutes;
    struggled || excelled
}

impl<S: Store> DayTracker<S> {
    /// Attempt to finish the day.
    ///
    /// On gate success the check-in report is sent to the coach, then the
    /// finished flag is persisted regardless of the coach outcome; a coach
    /// failure only downgrades the response to the generic acknowledgment.
    /// A persistence failure is an error and leaves the day open.
    pub async fn finish_day(
        &mut self,
        coach: &dyn Coach,
        profile: &UserProfile,
        weight_change_kg: Option<f32>,
        gate: FinishGate,
    ) -> Result<FinishOutcome, StorageError> {
        if self.progress().day_finished {
            return Ok(FinishOutcome::AlreadyFinished);
        }

        let average = compute_average(self.progress());
        if !gate.permits(self.progress()) {
            debug!("Finish rejected at average {:.1}", average);
            return Ok(FinishOutcome::Rejected { average });
        }

        let request = AffirmationRequest {
            ritual_completed: self.progress().is_complete(Pillar::Ritual),
            nutrition_adherence_percent: self.progress().nutrition,
            movement_minutes: estimate_movement_minutes(self.progress().movement),
            weight_change_kg: weight_change_kg.unwrap_or(0.0),
            personal_dream: profile.personal_dream.clone(),
        };
        debug!(
            warranted = affirmation_warranted(&request),
            "Local affirmation heuristic"
        );

        let affirmation = match coach.affirmation(&request).await {
            Ok(response) if response.should_send_affirmation => Some(response.affirmation),
            Ok(_) => None,
            Err(e) => {
                // Non-fatal: the day still closes
                warn!("Affirmation request failed: {}", e);
                None
            }
        };

        self.commit_finished().await?;
        Ok(FinishOutcome::Finished { affirmation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiteki_coach::{AffirmationResponse, CoachError, MealSuggestion, MealSuggestionRequest};
    use kaiteki_core::{DayKey, ProfileDraft, ProgressPatch, UserId};
    use kaiteki_storage::MemoryStore;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Coach double recording the last request.
    struct MockCoach {
        response: Result<AffirmationResponse, ()>,
        last_request: Mutex<Option<AffirmationRequest>>,
    }

    impl MockCoach {
        fn sending(text: &str) -> Self {
            Self {
                response: Ok(AffirmationResponse {
                    affirmation: text.to_string(),
                    should_send_affirmation: true,
                }),
                last_request: Mutex::new(None),
            }
        }

        fn silent() -> Self {
            Self {
                response: Ok(AffirmationResponse {
                    affirmation: "unused".to_string(),
                    should_send_affirmation: false,
                }),
                last_request: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl Coach for MockCoach {
        async fn affirmation(
            &self,
            request: &AffirmationRequest,
        ) -> Result<AffirmationResponse, CoachError> {
            *self.last_request.lock().await = Some(request.clone());
            self.response
                .clone()
                .map_err(|_| CoachError::Unavailable("mock outage".to_string()))
        }

        async fn meal_suggestion(
            &self,
            _request: &MealSuggestionRequest,
        ) -> Result<MealSuggestion, CoachError> {
            Err(CoachError::Unavailable("not under test".to_string()))
        }
    }

    fn profile() -> UserProfile {
        ProfileDraft {
            name: "Akemi Tanaka".to_string(),
            age: 34,
            current_weight_kg: 82.0,
            weight_goal_kg: 68.0,
            height_m: None,
            takes_medication: false,
            medication_dose: None,
            personal_dream: "Hike Mount Fuji".to_string(),
        }
        .validate(chrono::Utc::now())
        .unwrap()
    }

    async fn tracker_with(
        ritual: u8,
        nutrition: u8,
        movement: u8,
    ) -> DayTracker<MemoryStore> {
        let store = Arc::new(Mutex::new(MemoryStore::new()));
        let user = UserId::new();
        let day: DayKey = "2024-03-09".parse().unwrap();
        store
            .lock()
            .await
            .merge_day(
                user,
                day,
                &ProgressPatch {
                    ritual: Some(ritual),
                    nutrition: Some(nutrition),
                    movement: Some(movement),
                    day_finished: None,
                },
            )
            .await
            .unwrap();
        DayTracker::open(store, user, day).await.unwrap()
    }

    #[tokio::test]
    async fn test_low_average_rejected() {
        let mut tracker = tracker_with(20, 0, 0).await;
        let coach = MockCoach::sending("unused");

        let outcome = tracker
            .finish_day(&coach, &profile(), None, FinishGate::default())
            .await
            .unwrap();

        match outcome {
            FinishOutcome::Rejected { average } => assert!((average - 20.0 / 3.0).abs() < 0.01),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(!tracker.progress().day_finished);
        assert!(coach.last_request.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_partial_effort_finishes_with_affirmation() {
        let mut tracker = tracker_with(100, 100, 0).await;
        let coach = MockCoach::sending("You showed up today.");

        let outcome = tracker
            .finish_day(&coach, &profile(), Some(-0.5), FinishGate::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FinishOutcome::Finished {
                affirmation: Some("You showed up today.".to_string())
            }
        );
        assert!(tracker.progress().day_finished);

        let request = coach.last_request.lock().await.clone().unwrap();
        assert!(request.ritual_completed);
        assert_eq!(request.nutrition_adherence_percent, 100);
        assert_eq!(request.movement_minutes, 0);
        assert_eq!(request.personal_dream, "Hike Mount Fuji");
    }

    #[tokio::test]
    async fn test_silent_coach_still_finishes() {
        let mut tracker = tracker_with(100, 68, 50).await;
        let coach = MockCoach::silent();

        let outcome = tracker
            .finish_day(&coach, &profile(), None, FinishGate::default())
            .await
            .unwrap();

        // Remote flag is authoritative: no affirmation surfaced
        assert_eq!(outcome, FinishOutcome::Finished { affirmation: None });
        assert!(tracker.progress().day_finished);
    }

    #[tokio::test]
    async fn test_coach_failure_still_finishes() {
        let mut tracker = tracker_with(100, 100, 100).await;
        let coach = MockCoach::failing();

        let outcome = tracker
            .finish_day(&coach, &profile(), None, FinishGate::default())
            .await
            .unwrap();

        assert_eq!(outcome, FinishOutcome::Finished { affirmation: None });
        assert!(tracker.progress().day_finished);

        // Finished state was persisted, not just held locally
        let stored = tracker.get_day(tracker.day()).await.unwrap().unwrap();
        assert!(stored.day_finished);
    }

    #[tokio::test]
    async fn test_finishing_twice_is_terminal() {
        let mut tracker = tracker_with(100, 100, 100).await;
        let coach = MockCoach::sending("First time.");

        tracker
            .finish_day(&coach, &profile(), None, FinishGate::default())
            .await
            .unwrap();
        let outcome = tracker
            .finish_day(&coach, &profile(), None, FinishGate::default())
            .await
            .unwrap();

        assert_eq!(outcome, FinishOutcome::AlreadyFinished);
    }

    #[test]
    fn test_heuristic_flags_struggle_and_excellence() {
        let base = AffirmationRequest {
            ritual_completed: true,
            nutrition_adherence_percent: 75,
            movement_minutes: estimate_movement_minutes(60),
            weight_change_kg: 0.3,
            personal_dream: String::new(),
        };

        // Middle ground: neither struggling nor excelling
        assert!(!affirmation_warranted(&base));

        let mut struggling = base.clone();
        struggling.nutrition_adherence_percent = 40;
        assert!(affirmation_warranted(&struggling));

        let mut barely_moving = base.clone();
        barely_moving.movement_minutes = estimate_movement_minutes(20);
        assert!(affirmation_warranted(&barely_moving));

        let mut excelling = base.clone();
        excelling.nutrition_adherence_percent = 90;
        excelling.movement_minutes = estimate_movement_minutes(100);
        assert!(affirmation_warranted(&excelling));
    }

    #[test]
    fn test_heuristic_thresholds_reachable_from_movement_score() {
        // A full movement score must be able to clear the excellence bar
        assert!(estimate_movement_minutes(100) >= full_movement_minutes());
        // ...and a mid score the struggle bar
        assert!(estimate_movement_minutes(60) >= full_movement_minutes() / 2);
    }
}
