//! Audio processing endpoint: upload a clip, get a spoken reply back

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine;
use serde::Serialize;

use super::ApiState;

/// Maximum accepted upload size (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build audio router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/process", post(process))
        // headroom for multipart framing around the payload ceiling
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}

/// Successful processing envelope
#[derive(Serialize)]
struct ProcessResponse {
    success: bool,
    audio: String,
    #[serde(rename = "mimeType")]
    mime_type: &'static str,
}

/// Failure envelope
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Audio endpoint errors
#[derive(Debug)]
enum AudioError {
    /// Upload rejected before the pipeline ran
    Validation(String),
    /// Pipeline run failed
    Processing(String),
}

impl IntoResponse for AudioError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            Self::Processing(msg) => (
                StatusCode::BAD_REQUEST,
                "Failed to process audio".to_string(),
                Some(msg),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
                error,
            }),
        )
            .into_response()
    }
}

/// Process an uploaded audio clip through the voice pipeline
///
/// Accepts a single multipart `audio` field (wav, mp3, ogg, or webm; at
/// most 10 MiB) and responds with base64-encoded MP3 reply audio. Type and
/// size violations are rejected before any provider is called.
async fn process(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, AudioError> {
    let audio = extract_audio_field(&mut multipart).await?;

    if audio.len() > MAX_UPLOAD_BYTES {
        return Err(AudioError::Validation(format!(
            "audio exceeds maximum size of {MAX_UPLOAD_BYTES} bytes"
        )));
    }

    if detect_audio_type(&audio).is_none() {
        return Err(AudioError::Validation(
            "unsupported audio type; expected wav, mp3, ogg, or webm".to_string(),
        ));
    }

    let reply = state.pipeline.process(&audio).await.map_err(|e| {
        tracing::error!(error = %e, "audio processing failed");
        AudioError::Processing(e.to_string())
    })?;

    Ok(Json(ProcessResponse {
        success: true,
        audio: base64::engine::general_purpose::STANDARD.encode(reply),
        mime_type: "audio/mp3",
    }))
}

/// Pull the `audio` field out of the multipart body
async fn extract_audio_field(multipart: &mut Multipart) -> Result<Bytes, AudioError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AudioError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("audio") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AudioError::Validation(format!("failed to read audio field: {e}")))?;

            if data.is_empty() {
                return Err(AudioError::Validation("empty audio upload".to_string()));
            }
            return Ok(data);
        }
    }

    Err(AudioError::Validation("missing audio field".to_string()))
}

/// Accepted audio container formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AudioType {
    Wav,
    Mp3,
    Ogg,
    Webm,
}

/// Sniff the container signature of an uploaded clip
///
/// Returns `None` when the bytes match none of the accepted formats. The
/// MPEG frame-sync check runs last because its two-byte pattern is the
/// least specific.
fn detect_audio_type(data: &[u8]) -> Option<AudioType> {
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        return Some(AudioType::Wav);
    }
    if data.starts_with(b"OggS") {
        return Some(AudioType::Ogg);
    }
    // EBML header, shared by webm and mkv containers
    if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some(AudioType::Webm);
    }
    if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0) {
        return Some(AudioType::Mp3);
    }
    None
}
