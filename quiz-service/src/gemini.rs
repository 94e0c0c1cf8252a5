use async_trait::async_trait;
use quiz_utils::error::Error;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::EnvVars;

/// Turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Any failure is reported as [`Error::Upstream`].
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// Client for Gemini's `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(env_vars: &EnvVars) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            &env_vars.gemini_api_key,
            &env_vars.gemini_base_url,
            &env_vars.gemini_model,
        )
    }

    pub fn with_client(
        client: reqwest::Client,
        api_key: &str,
        base_url: &str,
        model: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini request failed: {e:?}");
                Error::Upstream("Failed to reach Gemini".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(%status, body = %text, "Gemini returned an error");
            return Err(Error::Upstream(format!(
                "Gemini request failed with status {}",
                status.as_u16()
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Unable to deserialize Gemini response: {e:?}");
            Error::Upstream("Unreadable response from Gemini".to_string())
        })?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Upstream("Empty response from Gemini".to_string()));
        }

        debug!(len = text.len(), "received Gemini response");
        Ok(text)
    }
}
