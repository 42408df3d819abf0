mod app;
mod config;
mod error;
mod notice;
mod state;
mod views;
mod workouts;

use crate::{app::build_app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fitlog=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.uses_dev_secret() {
        tracing::warn!("SESSION_SECRET not set; using the local development secret");
    }
    tracing::info!(storage_path = %config.storage_path.display(), "opening workout store");

    let app_state = AppState::init(config).await?;
    let config = app_state.config.clone();
    app::serve(build_app(app_state), &config).await
}
