use quiz_utils::{
    client::GENERIC_FAILURE,
    error::ShapeError,
    quiz::{Quiz, QuizRequest},
};
use serde_json::Value;
use tracing::{debug, warn};

pub struct Api {
    client: reqwest::Client,
    endpoint: String,
}

impl Api {
    pub fn new(server: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/generate-quiz", server.trim_end_matches('/')),
        }
    }

    /// Requests a quiz. The error is a message meant for the user.
    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<Quiz, String> {
        debug!(endpoint = %self.endpoint, "requesting quiz");
        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Unable to reach {}: {e:?}", self.endpoint);
                return Err(GENERIC_FAILURE.to_string());
            }
        };

        let success = response.status().is_success();
        let body = response.json().await.unwrap_or(Value::Null);
        interpret(success, body)
    }
}

/// Turns a service response into a quiz or a message for the user
pub fn interpret(success: bool, body: Value) -> Result<Quiz, String> {
    if !success {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_FAILURE);
        return Err(message.to_string());
    }

    let invalid_format = ShapeError::Questions.public_message().to_string();
    if !body.get("questions").is_some_and(Value::is_array) {
        return Err(invalid_format);
    }
    serde_json::from_value(body).map_err(|e| {
        warn!("Unable to deserialize quiz: {e}");
        invalid_format
    })
}
