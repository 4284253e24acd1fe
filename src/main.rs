mod app;
mod codes;
mod config;
mod confession;
mod db;
mod error;
mod llm;
mod mail;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "gobaek=debug,axum=info,tower_http=info".to_string());
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

    let app_state = AppState::init().await?;
    tracing::info!(
        model = %app_state.config.gemini.model,
        mail_enabled = app_state.mailer.is_some(),
        "application state ready"
    );

    app::serve(app::build_app(app_state)).await
}
