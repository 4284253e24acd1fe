use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EmailSendRequest {
    pub recipient_email: String,
    pub scenario_text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
