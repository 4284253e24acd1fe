use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CodeGenerationResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeCheckRequest {
    pub input_code: String,
}

#[derive(Debug, Serialize)]
pub struct CodeCheckResponse {
    pub exists: bool,
    pub message: String,
}
