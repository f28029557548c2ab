use crate::markup::Node;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TheoryQuery {
    #[validate(length(min = 1, max = 8))]
    pub grade: String,
    #[validate(length(min = 1, max = 200))]
    pub lesson: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TheoryResponse {
    pub grade: String,
    pub lesson_title: String,
    pub cached: bool,
    pub content: String,
    /// Pre-parsed markdown+LaTeX fragments for clients that render nodes
    /// instead of raw text.
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SimulationRequest {
    #[validate(length(min = 1, max = 200))]
    pub lesson_title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub request: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub html: String,
}
