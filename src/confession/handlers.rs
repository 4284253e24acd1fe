use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::{AppError, AppResult},
    llm::LlmError,
    state::AppState,
};

use super::dto::{ConfessionRequest, ConfessionResponse};
use super::prompt::render_prompt;

pub fn confession_routes() -> Router<AppState> {
    Router::new().route("/generate-confession", post(generate_confession))
}

#[instrument(skip(state, payload), fields(crush = %payload.crush_info.name))]
pub async fn generate_confession(
    State(state): State<AppState>,
    Json(payload): Json<ConfessionRequest>,
) -> AppResult<Json<ConfessionResponse>> {
    let prompt = render_prompt(&payload);
    let scenario = state.llm.generate(&prompt).await?;

    // Generators other than Gemini are not bound to reject blank output.
    if scenario.trim().is_empty() {
        return Err(AppError::Generation(LlmError::EmptyResponse));
    }

    info!(scenario_len = scenario.len(), "scenario generated");
    Ok(Json(ConfessionResponse { scenario }))
}
