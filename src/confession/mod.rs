mod dto;
pub mod handlers;
pub mod prompt;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::confession_routes()
}
