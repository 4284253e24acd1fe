//! Error type returned by every handler.
//!
//! Each variant maps to a status code and renders as `{"detail": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{llm::LlmError, mail::MailError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("Gemini API 호출 중 오류가 발생했습니다: {0}")]
    Generation(#[from] LlmError),

    #[error("이메일 전송을 위한 서버 설정이 완료되지 않았습니다.")]
    MailNotConfigured,

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("코드 생성 및 저장 중 오류가 발생했습니다: {0}")]
    CodeIssue(#[source] sqlx::Error),

    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(_)
            | Self::MailNotConfigured
            | Self::Mail(_)
            | Self::CodeIssue(_)
            | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
