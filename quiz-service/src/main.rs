use std::sync::Arc;

use quiz_service::{
    config::{AppState, EnvVars},
    gemini::GeminiClient,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=debug,quiz_utils=debug", env!("CARGO_CRATE_NAME")).into()
        }))
        // Log to stdout
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(sentry::integrations::tracing::layer())
        .init();

    info!("Starting server...");
    let env_vars = EnvVars::new();

    let _guard = if let Some(sentry_dsn) = env_vars.sentry_dsn.clone() {
        info!("initializing Sentry");
        // NOTE: Events are only emitted, once the guard goes out of scope.
        Some(sentry::init((
            sentry_dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(env_vars.environment.to_string().into()),
                traces_sample_rate: 1.0,
                ..Default::default()
            },
        )))
    } else {
        None
    };

    let generator = GeminiClient::new(&env_vars);
    let app_state = AppState {
        generator: Arc::new(generator),
        env_vars,
    };

    if let Err(e) = quiz_service::serve(app_state).await {
        error!("Server error: {e}");
        drop(_guard);
        std::process::exit(1);
    }
}
