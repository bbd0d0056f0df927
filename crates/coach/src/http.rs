//! HTTP coach client.

use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::interface::{
    AffirmationRequest, AffirmationResponse, Coach, CoachError, MealSuggestion,
    MealSuggestionRequest,
};

/// Coach backed by a hosted generative service.
#[derive(Clone)]
pub struct HttpCoach {
    /// HTTP client
    client: Client,

    /// Service base URL
    url: String,
}

impl HttpCoach {
    /// Create a client for the service at the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, CoachError>
    where
        Req: serde::Serialize + Sync,
        Resp: serde::de::DeserializeOwned,
    {
        debug!("Calling coach service: {}{}", self.url, path);

        let response = self
            .client
            .post(format!("{}{}", self.url, path))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CoachError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl Coach for HttpCoach {
    async fn affirmation(
        &self,
        request: &AffirmationRequest,
    ) -> Result<AffirmationResponse, CoachError> {
        self.post_json("/v1/affirmation", request).await
    }

    async fn meal_suggestion(
        &self,
        request: &MealSuggestionRequest,
    ) -> Result<MealSuggestion, CoachError> {
        self.post_json("/v1/meal-suggestion", request).await
    }
}
