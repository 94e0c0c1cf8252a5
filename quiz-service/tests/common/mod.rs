use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use quiz_service::{
    config::{AppState, EnvVars},
    gemini::TextGenerator,
};
use quiz_utils::error::Error;

/// Stands in for Gemini, always giving the same reply
pub struct FakeGenerator {
    reply: Result<String, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.reply.clone().map_err(Error::Upstream)
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub generator: Arc<FakeGenerator>,
}

impl TestApp {
    pub async fn generate_quiz(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/generate-quiz", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Serves the app on a random port with a generator replying `reply`
pub async fn spawn_app(reply: Result<&str, &str>) -> TestApp {
    spawn_app_with(reply, Duration::ZERO, &[]).await
}

/// Like [`spawn_app`], with a generator taking `delay` to reply and extra variables in the
/// environment
pub async fn spawn_app_with(
    reply: Result<&str, &str>,
    delay: Duration,
    env: &[(&str, &str)],
) -> TestApp {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let env_vars = EnvVars::try_from_lookup(|name| match name {
        "GOOGLE_API_KEY" => Some("test-key".to_string()),
        "PORT" => Some(port.to_string()),
        "ENVIRONMENT" => Some("development".to_string()),
        other => env
            .iter()
            .find(|(name, _)| *name == other)
            .map(|(_, value)| value.to_string()),
    })
    .expect("test configuration is valid");

    let generator = Arc::new(FakeGenerator {
        reply: reply.map(str::to_string).map_err(str::to_string),
        delay,
        calls: AtomicUsize::new(0),
    });
    let app = quiz_service::app(AppState {
        generator: generator.clone(),
        env_vars,
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    TestApp {
        address,
        api_client: reqwest::Client::new(),
        generator,
    }
}

pub fn valid_request() -> serde_json::Value {
    serde_json::json!({
        "topic": "Photosynthesis",
        "subject": "Biology",
        "grade": "9th Grade",
        "numQuestions": 5,
        "difficulty": "medium"
    })
}

pub fn quiz_json(num_questions: usize) -> serde_json::Value {
    let answers = ["A", "B", "C", "D"];
    let questions: Vec<serde_json::Value> = (0..num_questions)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {}", i + 1),
                "options": ["A) Light", "B) Water", "C) Carbon dioxide", "D) Glucose"],
                "correctAnswer": answers[i % 4],
                "explanation": format!("Explanation {}", i + 1)
            })
        })
        .collect();
    serde_json::json!({ "questions": questions })
}
