//! Offline coach serving stock text.

use crate::interface::{
    AffirmationRequest, AffirmationResponse, Coach, CoachError, MealSuggestion,
    MealSuggestionRequest, MealType,
};

/// Coach used when no generative service is configured.
///
/// Always asks for the affirmation to be shown; the text weaves in the
/// user's personal dream the way the hosted prompts do.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedCoach;

impl CannedCoach {
    /// Create a canned coach.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Coach for CannedCoach {
    async fn affirmation(
        &self,
        request: &AffirmationRequest,
    ) -> Result<AffirmationResponse, CoachError> {
        let affirmation = if request.ritual_completed
            && request.nutrition_adherence_percent >= 80
        {
            format!(
                "Great job staying on track today! Keep pushing towards your dream: {}",
                request.personal_dream
            )
        } else {
            format!(
                "Every small step counts. Remember your dream: {} - and keep moving forward.",
                request.personal_dream
            )
        };

        Ok(AffirmationResponse {
            affirmation,
            should_send_affirmation: true,
        })
    }

    async fn meal_suggestion(
        &self,
        request: &MealSuggestionRequest,
    ) -> Result<MealSuggestion, CoachError> {
        let (meal_name, description, ingredients, instructions) = match request.meal_type {
            MealType::Breakfast => (
                "Matcha Morning Bowl",
                "Creamy yogurt with matcha, berries and toasted seeds.",
                vec!["natural yogurt", "matcha powder", "mixed berries", "pumpkin seeds"],
                vec![
                    "Whisk the matcha into the yogurt.",
                    "Top with berries and seeds.",
                ],
            ),
            MealType::Lunch => (
                "Ginger Salmon Plate",
                "Grilled salmon over greens with a ginger-lemon dressing.",
                vec!["salmon fillet", "mixed greens", "fresh ginger", "lemon", "olive oil"],
                vec![
                    "Grill the salmon for 4 minutes per side.",
                    "Whisk ginger, lemon and oil into a dressing.",
                    "Serve over the greens.",
                ],
            ),
            MealType::Dinner => (
                "Miso Vegetable Soup",
                "A light miso broth loaded with seasonal vegetables and tofu.",
                vec!["miso paste", "tofu", "shiitake mushrooms", "spring onion", "spinach"],
                vec![
                    "Simmer the vegetables until tender.",
                    "Stir in the miso off the heat.",
                    "Add tofu and spring onion before serving.",
                ],
            ),
            MealType::Snack => (
                "Citrus Green Tea Cooler",
                "Chilled green tea with lemon and a handful of almonds.",
                vec!["green tea", "lemon", "almonds"],
                vec!["Brew and chill the tea.", "Serve with lemon and almonds."],
            ),
        };

        Ok(MealSuggestion {
            meal_name: meal_name.to_string(),
            description: description.to_string(),
            ingredients: ingredients.into_iter().map(String::from).collect(),
            instructions: instructions.into_iter().map(String::from).collect(),
            why_it_works: format!(
                "Light, protein-forward and fiber-rich - it complements your daily teas \
                 and keeps you moving towards your dream: {}",
                request.personal_dream
            ),
        })
    }
}
