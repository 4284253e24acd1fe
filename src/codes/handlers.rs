use axum::{extract::State, routing::post, Json, Router};
use tracing::{debug, info, instrument};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

use super::dto::{CodeCheckRequest, CodeCheckResponse, CodeGenerationResponse};
use super::{repo, services};

pub fn code_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-code", post(generate_code))
        .route("/check-code", post(check_code))
}

#[instrument(skip(state))]
pub async fn generate_code(State(state): State<AppState>) -> AppResult<Json<CodeGenerationResponse>> {
    let issued = services::issue_code(&state.db)
        .await
        .map_err(AppError::CodeIssue)?;

    info!(id = issued.id, "code issued");
    debug!(id = issued.id, code = %issued.code, "issued code value");
    Ok(Json(CodeGenerationResponse {
        code: issued.code,
        message: "코드가 성공적으로 생성 및 저장되었습니다.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn check_code(
    State(state): State<AppState>,
    Json(payload): Json<CodeCheckRequest>,
) -> AppResult<Json<CodeCheckResponse>> {
    let input_code = payload.input_code;
    if !services::is_valid_code(&input_code) {
        return Err(AppError::BadRequest(
            "유효한 6자리 숫자 코드를 입력해야 합니다.".into(),
        ));
    }

    let exists = repo::code_exists(&state.db, &input_code).await?;
    let message = if exists {
        "코드가 데이터베이스에 존재합니다."
    } else {
        "코드가 데이터베이스에 존재하지 않습니다."
    };

    info!(exists, "code checked");
    Ok(Json(CodeCheckResponse {
        exists,
        message: message.into(),
    }))
}
