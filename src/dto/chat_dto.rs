use crate::services::ai_service::HintMode;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(max = 8000))]
    pub prompt: Option<String>,
    #[serde(default = "default_mode")]
    pub mode: HintMode,
    #[serde(default)]
    pub attachment: Option<AttachmentDto>,
}

fn default_mode() -> HintMode {
    HintMode::Detailed
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentDto {
    pub mime_type: String,
    /// Base64 payload; callers encode before upload.
    pub data: String,
}
