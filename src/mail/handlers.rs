use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    codes::repo,
    error::{AppError, AppResult},
    state::AppState,
};

use super::dto::{EmailSendRequest, MessageResponse};
use super::services::{is_valid_email, render_email, SUBJECT};

pub fn mail_routes() -> Router<AppState> {
    Router::new().route("/send-email", post(send_email))
}

#[instrument(skip(state, payload))]
pub async fn send_email(
    State(state): State<AppState>,
    Json(mut payload): Json<EmailSendRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.recipient_email = payload.recipient_email.trim().to_string();
    if !is_valid_email(&payload.recipient_email) {
        warn!(email = %payload.recipient_email, "invalid recipient email");
        return Err(AppError::Validation(
            "recipient_email: 유효한 이메일 주소가 아닙니다.".into(),
        ));
    }

    let Some(mailer) = state.mailer.as_ref() else {
        return Err(AppError::MailNotConfigured);
    };

    let latest_code = repo::most_recent_code(&state.db).await?;
    let html = render_email(&payload.scenario_text, latest_code.as_deref());

    mailer
        .send_html(&payload.recipient_email, SUBJECT, html)
        .await?;

    info!(email = %payload.recipient_email, "scenario email sent");
    Ok(Json(MessageResponse {
        message: "이메일이 성공적으로 전송되었습니다!".into(),
    }))
}
