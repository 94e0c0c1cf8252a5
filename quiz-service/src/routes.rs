use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use quiz_utils::quiz::{Quiz, QuizRequest};
use serde_json::Value;
use tracing::{info, warn};

use crate::{BODY_TOO_LARGE, config::AppState, error::Error, generation::generate_quiz};

pub const INVALID_BODY: &str = "Invalid request body";

/// Accepts any JSON body, whatever its `Content-Type`. An empty body counts as `{}`.
pub async fn post_generate_quiz(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Quiz>, Error> {
    let body = body.map_err(|rejection| {
        warn!("Rejected quiz request body: {rejection}");
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                Error::Server(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE.to_string())
            }
            _ => Error::Server(StatusCode::BAD_REQUEST, INVALID_BODY.to_string()),
        }
    })?;

    let body: Value = if body.trim_ascii().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Quiz request body is not JSON: {e}");
            Error::Server(StatusCode::BAD_REQUEST, INVALID_BODY.to_string())
        })?
    };

    let quiz_request = QuizRequest::from_json(&body);
    let quiz = generate_quiz(state.generator.as_ref(), &quiz_request).await?;

    Ok(Json(quiz))
}

pub async fn get_status_ping() -> impl IntoResponse {
    info!("Status");
    StatusCode::OK
}
