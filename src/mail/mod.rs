mod dto;
pub mod handlers;
pub mod services;
pub mod transport;

pub use transport::{MailError, Mailer, SmtpMailer};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::mail_routes()
}
