//! Coach trait and wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for coach operations.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    /// Transport-level failure reaching the service
    #[error("coach request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("coach service error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Service unavailable or disabled
    #[error("{0}")]
    Unavailable(String),
}

/// Check-in data sent when requesting an affirmation.
///
/// Field names follow the service schema (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffirmationRequest {
    /// Whether the daily tea ritual was completed
    pub ritual_completed: bool,

    /// Percentage of nutrition goals achieved (0-100)
    pub nutrition_adherence_percent: u8,

    /// Minutes spent on movement today
    pub movement_minutes: u32,

    /// Weight change in kg since the last check-in; can be negative
    pub weight_change_kg: f32,

    /// The user's personal dream
    pub personal_dream: String,
}

/// Affirmation produced by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffirmationResponse {
    /// The personalized affirmation text
    pub affirmation: String,

    /// The service's own judgment on whether to surface the message.
    /// This flag is authoritative for display.
    pub should_send_affirmation: bool,
}

/// Which meal a suggestion is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Between-meal snack
    Snack,
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("unknown meal type: {}", other)),
        }
    }
}

/// Input for a meal suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestionRequest {
    /// Which meal to suggest
    pub meal_type: MealType,

    /// The user's personal dream, woven into the suggestion
    pub personal_dream: String,
}

/// A suggested meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    /// Creative name of the meal
    pub meal_name: String,

    /// Short, appetizing description
    pub description: String,

    /// Ingredient list
    pub ingredients: Vec<String>,

    /// Step-by-step preparation instructions
    pub instructions: Vec<String>,

    /// Why this meal supports the user's goals
    pub why_it_works: String,
}

/// Generative coach collaborator.
///
/// Failure is generic: callers must not assume partial output is usable.
#[async_trait]
pub trait Coach: Send + Sync {
    /// Request a personalized affirmation for today's check-in.
    async fn affirmation(
        &self,
        request: &AffirmationRequest,
    ) -> Result<AffirmationResponse, CoachError>;

    /// Request a meal suggestion.
    async fn meal_suggestion(
        &self,
        request: &MealSuggestionRequest,
    ) -> Result<MealSuggestion, CoachError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmation_request_wire_form() {
        let request = AffirmationRequest {
            ritual_completed: true,
            nutrition_adherence_percent: 68,
            movement_minutes: 30,
            weight_change_kg: -0.4,
            personal_dream: "Run a 10k".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ritualCompleted"], true);
        assert_eq!(json["nutritionAdherencePercent"], 68);
        assert_eq!(json["movementMinutes"], 30);
        assert_eq!(json["personalDream"], "Run a 10k");
    }

    #[test]
    fn test_affirmation_response_wire_form() {
        let json = r#"{"affirmation":"Keep going!","shouldSendAffirmation":false}"#;
        let response: AffirmationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.affirmation, "Keep going!");
        assert!(!response.should_send_affirmation);
    }

    #[test]
    fn test_meal_suggestion_wire_form() {
        let json = r#"{
            "mealName": "Ginger Glow Bowl",
            "description": "A light rice bowl.",
            "ingredients": ["rice", "ginger"],
            "instructions": ["Cook rice.", "Top with ginger."],
            "whyItWorks": "Light and warming."
        }"#;
        let suggestion: MealSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.meal_name, "Ginger Glow Bowl");
        assert_eq!(suggestion.ingredients.len(), 2);
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
