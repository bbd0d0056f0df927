//! User profile - identity and goal data captured at onboarding.

use serde::{Deserialize, Serialize};

use crate::Time;

/// Personal dream used when the onboarding form leaves the field blank.
pub const DEFAULT_DREAM: &str = "Reach my wellness goals!";

/// A user's identity and goal data.
///
/// Created once when onboarding completes. Immutable afterwards except via
/// [`UserProfile::reset_onboarding`], which sends the user back through the
/// questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Current weight in kilograms
    pub current_weight_kg: f32,

    /// Target weight in kilograms
    pub weight_goal_kg: f32,

    /// Height in meters, if provided
    pub height_m: Option<f32>,

    /// Medication status
    pub medication: Medication,

    /// The user's personal dream, shown back in affirmations
    pub personal_dream: String,

    /// Whether onboarding has been completed
    pub onboarded: bool,

    /// When the profile was created
    pub created_at: Time,
}

impl UserProfile {
    /// Body mass index, if a plausible height is known.
    pub fn bmi(&self) -> Option<f32> {
        let height = self.height_m?;
        if !(ProfileDraft::HEIGHT_RANGE).contains(&height) {
            return None;
        }
        Some(self.current_weight_kg / (height * height))
    }

    /// Clear the onboarded flag, returning the user to onboarding.
    pub fn reset_onboarding(&mut self) {
        self.onboarded = false;
    }
}

/// Medication status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medication {
    /// Not taking medication
    NotTaking,
    /// Taking medication at the given dose
    Taking {
        /// Free-text dose description
        dose: String,
    },
}

/// Raw onboarding answers, validated into a [`UserProfile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Current weight in kilograms
    pub current_weight_kg: f32,
    /// Target weight in kilograms
    pub weight_goal_kg: f32,
    /// Height in meters, if provided
    pub height_m: Option<f32>,
    /// Whether the user takes medication
    pub takes_medication: bool,
    /// Dose text, required when `takes_medication` is set
    pub medication_dose: Option<String>,
    /// Personal dream, blank falls back to [`DEFAULT_DREAM`]
    pub personal_dream: String,
}

impl ProfileDraft {
    /// Valid age range in years.
    pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=100;
    /// Valid weight range in kilograms, for both current weight and goal.
    pub const WEIGHT_RANGE: std::ops::RangeInclusive<f32> = 30.0..=300.0;
    /// Valid height range in meters.
    pub const HEIGHT_RANGE: std::ops::RangeInclusive<f32> = 1.0..=2.3;

    /// Validate the draft and produce an onboarded profile.
    pub fn validate(self, now: Time) -> Result<UserProfile, ProfileError> {
        let name = self.name.trim().to_string();
        if name.chars().count() < 2 {
            return Err(ProfileError::NameTooShort);
        }
        if !Self::AGE_RANGE.contains(&self.age) {
            return Err(ProfileError::AgeOutOfRange(self.age));
        }
        if !Self::WEIGHT_RANGE.contains(&self.current_weight_kg) {
            return Err(ProfileError::WeightOutOfRange(self.current_weight_kg));
        }
        if !Self::WEIGHT_RANGE.contains(&self.weight_goal_kg) {
            return Err(ProfileError::WeightOutOfRange(self.weight_goal_kg));
        }
        if let Some(height) = self.height_m {
            if !Self::HEIGHT_RANGE.contains(&height) {
                return Err(ProfileError::HeightOutOfRange(height));
            }
        }

        let medication = if self.takes_medication {
            let dose = self
                .medication_dose
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .ok_or(ProfileError::MissingDose)?;
            Medication::Taking {
                dose: dose.to_string(),
            }
        } else {
            Medication::NotTaking
        };

        let dream = self.personal_dream.trim();
        let personal_dream = if dream.is_empty() {
            DEFAULT_DREAM.to_string()
        } else {
            dream.to_string()
        };

        Ok(UserProfile {
            name,
            age: self.age,
            current_weight_kg: self.current_weight_kg,
            weight_goal_kg: self.weight_goal_kg,
            height_m: self.height_m,
            medication,
            personal_dream,
            onboarded: true,
            created_at: now,
        })
    }
}

/// Field-level validation errors for onboarding answers.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Name shorter than two characters
    #[error("name must have at least 2 characters")]
    NameTooShort,

    /// Age outside the accepted range
    #[error("age {0} outside accepted range 18-100")]
    AgeOutOfRange(u32),

    /// Weight outside the accepted range
    #[error("weight {0}kg outside accepted range 30-300")]
    WeightOutOfRange(f32),

    /// Height outside the accepted range
    #[error("height {0}m outside accepted range 1.00-2.30")]
    HeightOutOfRange(f32),

    /// Medication flagged without a dose
    #[error("medication dose is required")]
    MissingDose,
}
