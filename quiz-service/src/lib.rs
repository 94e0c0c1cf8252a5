//! HTTP service generating multiple-choice quizzes with Gemini
//!
//! ## Routes
//!
//! - `GET /status/ping`
//! - `POST /api/generate-quiz`
//!
use axum::{
    Router,
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::signal;
use tower_http::{
    LatencyUnit,
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod routes;

use config::AppState;
use error::Error;

pub const BODY_TOO_LARGE: &str = "Request body too large";

pub fn app(app_state: AppState) -> Router {
    let request_body_size_limit = app_state.env_vars.request_body_size_limit;

    Router::new()
        .route("/status/ping", get(routes::get_status_ping))
        .route("/api/generate-quiz", post(routes::post_generate_quiz))
        .layer(RequestBodyLimitLayer::new(request_body_size_limit))
        .layer(middleware::map_response(json_body_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(app_state)
}

/// The body limit layer answers in plain text before any handler runs.
async fn json_body_limit(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return Error::Server(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE.to_string())
            .into_response();
    }
    response
}

/// Binds `0.0.0.0:{port}` and serves until a shutdown signal arrives.
pub async fn serve(app_state: AppState) -> std::io::Result<()> {
    let port = app_state.env_vars.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Listening on port {port}");

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}
