//! Coach collaborator: AI-generated affirmations and meal suggestions.
//!
//! The generative service is a black box behind the [`Coach`] trait:
//! structured input in, structured text out. [`HttpCoach`] talks to a
//! hosted service; [`CannedCoach`] serves stock text when no service is
//! configured.

mod canned;
mod http;
mod interface;

pub use canned::CannedCoach;
pub use http::HttpCoach;
pub use interface::{
    AffirmationRequest, AffirmationResponse, Coach, CoachError, MealSuggestion,
    MealSuggestionRequest, MealType,
};
