//! Speech-to-text via the Google Cloud Speech `recognize` API

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::pipeline::{NO_SPEECH_SENTINEL, Transcribe};
use crate::{Error, Result};

const RECOGNIZE_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'a str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize, Default)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

/// Transcribes speech to text
///
/// The recognition configuration (LINEAR16, 16 kHz, en-US) is fixed per
/// deployment, not negotiated per request.
pub struct SpeechToText {
    client: reqwest::Client,
    api_key: String,
}

impl SpeechToText {
    /// Create a new STT adapter
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot
    /// be constructed.
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Google API key required for speech recognition".to_string(),
            ));
        }

        Ok(Self {
            client: super::http_client()?,
            api_key,
        })
    }
}

#[async_trait]
impl Transcribe for SpeechToText {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: 16_000,
                language_code: "en-US",
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        };

        let response = self
            .client
            .post(RECOGNIZE_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "recognize request failed");
                Error::Transcription(format!("recognize request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Speech API error");
            return Err(Error::Transcription(format!(
                "Speech API error {status}: {body}"
            )));
        }

        let result: RecognizeResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse recognize response");
            Error::Transcription(format!("failed to parse recognize response: {e}"))
        })?;

        let transcript = collect_transcript(&result);
        if transcript.is_empty() {
            tracing::info!("no speech detected");
            return Ok(NO_SPEECH_SENTINEL.to_string());
        }

        tracing::info!(transcript = %transcript, "transcription complete");
        Ok(transcript)
    }
}

/// Join the top alternative of every recognized segment with newlines
fn collect_transcript(response: &RecognizeResponse) -> String {
    response
        .results
        .iter()
        .filter_map(|r| r.alternatives.first())
        .map(|a| a.transcript.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
