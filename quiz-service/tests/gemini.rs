use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use quiz_service::gemini::{GeminiClient, TextGenerator};
use quiz_utils::error::Error;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen {
    path: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    reply: Value,
    seen: Seen,
}

async fn generate_content(
    State(gemini): State<FakeGemini>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok());
    if api_key != Some("test-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "API key not valid" } })),
        )
            .into_response();
    }
    *gemini.seen.path.lock().unwrap() = Some(model_action);
    *gemini.seen.body.lock().unwrap() = Some(body);
    (gemini.status, Json(gemini.reply)).into_response()
}

/// Serves `reply` from a fake `generateContent` endpoint expecting API key `test-key`
async fn spawn_gemini(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1beta/models/{model_action}", post(generate_content))
        .with_state(FakeGemini {
            status,
            reply,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    (address, seen)
}

fn client(base_url: &str, api_key: &str) -> GeminiClient {
    GeminiClient::with_client(reqwest::Client::new(), api_key, base_url, "gemini-test")
}

fn candidate(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": parts }, "finishReason": "STOP" }
        ]
    })
}

#[tokio::test]
async fn sends_prompt_and_joins_parts() {
    let (address, seen) =
        spawn_gemini(StatusCode::OK, candidate(&["{\"questions\":", " []}"])).await;

    let text = client(&address, "test-key")
        .generate("Make a quiz")
        .await
        .unwrap();

    assert_eq!(text, "{\"questions\": []}");
    assert_eq!(
        seen.path.lock().unwrap().as_deref(),
        Some("gemini-test:generateContent")
    );
    assert_eq!(
        seen.body.lock().unwrap().clone().unwrap(),
        json!({ "contents": [{ "parts": [{ "text": "Make a quiz" }] }] })
    );
}

#[tokio::test]
async fn rejected_key_is_upstream_error() {
    let (address, _) = spawn_gemini(StatusCode::OK, candidate(&["unused"])).await;

    let err = client(&address, "wrong-key")
        .generate("Make a quiz")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream(_)));
    assert_eq!(err.public_message(), "Gemini request failed with status 401");
}

#[tokio::test]
async fn server_error_is_upstream_error() {
    let (address, _) = spawn_gemini(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "message": "overloaded" } }),
    )
    .await;

    let err = client(&address, "test-key")
        .generate("Make a quiz")
        .await
        .unwrap_err();

    assert_eq!(err.public_message(), "Gemini request failed with status 503");
}

#[tokio::test]
async fn empty_candidates_are_upstream_error() {
    for reply in [json!({ "candidates": [] }), json!({}), candidate(&["  "])] {
        let (address, _) = spawn_gemini(StatusCode::OK, reply).await;

        let err = client(&address, "test-key")
            .generate("Make a quiz")
            .await
            .unwrap_err();

        assert_eq!(err.public_message(), "Empty response from Gemini");
    }
}

#[tokio::test]
async fn unreachable_server_is_upstream_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let err = client(&address, "test-key")
        .generate("Make a quiz")
        .await
        .unwrap_err();

    assert_eq!(err.public_message(), "Failed to reach Gemini");
}
