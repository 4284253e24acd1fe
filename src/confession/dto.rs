use serde::{Deserialize, Serialize};

/// Profile of either side of the confession.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonProfile {
    pub name: String,
    pub age: i64,
    pub personality: String,
    pub likes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfessionRequest {
    pub user_info: PersonProfile,
    pub crush_info: PersonProfile,
    /// How long the two have been "in some" (썸), free text such as "2주".
    pub sum_period: String,
    pub confession_method: String,
}

#[derive(Debug, Serialize)]
pub struct ConfessionResponse {
    pub scenario: String,
}
