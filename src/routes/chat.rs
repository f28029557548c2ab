use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use futures_util::StreamExt;
use validator::Validate;

use crate::dto::chat_dto::ChatRequest;
use crate::error::Error;
use crate::services::ai_service::Attachment;
use crate::AppState;

const DEFAULT_ATTACHMENT_PROMPT: &str = "Hãy giải bài tập trong hình/file này giúp mình.";

/// Streams tutor output as server-sent events. Backend trouble after the
/// connection is established arrives in-band as ordinary fragments, never
/// as an HTTP error.
#[axum::debug_handler]
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> crate::error::Result<impl IntoResponse> {
    req.validate()?;

    let attachment = match req.attachment {
        Some(att) => {
            if att.mime_type.trim().is_empty() {
                return Err(Error::BadRequest("Attachment is missing its mime type".into()));
            }
            BASE64
                .decode(att.data.as_bytes())
                .map_err(|_| Error::BadRequest("Attachment data is not valid base64".into()))?;
            Some(Attachment {
                mime_type: att.mime_type,
                data: att.data,
            })
        }
        None => None,
    };

    let prompt = match req.prompt.filter(|p| !p.trim().is_empty()) {
        Some(prompt) => prompt,
        None if attachment.is_some() => DEFAULT_ATTACHMENT_PROMPT.to_string(),
        None => {
            return Err(Error::BadRequest(
                "A prompt or an attachment is required".into(),
            ))
        }
    };

    // Asking the tutor anything counts as the day's activity.
    if let Err(e) = state.stats_service.register_daily_activity() {
        tracing::warn!("Failed to register chat activity: {}", e);
    }

    let stream = state
        .ai_service
        .stream_tutor(prompt, req.mode, attachment)
        .await?;
    let events = stream
        .map(|fragment| Event::default().json_data(fragment))
        .boxed();

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
