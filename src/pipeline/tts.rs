//! Text-to-speech via the Google Cloud `text:synthesize` API

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::pipeline::Synthesize;
use crate::{Error, Result};

const SYNTHESIZE_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Synthesizes speech from text
///
/// Output encoding is fixed: MP3 with a neutral en-US voice.
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
}

impl TextToSpeech {
    /// Create a new TTS adapter
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot
    /// be constructed.
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Google API key required for speech synthesis".to_string(),
            ));
        }

        Ok(Self {
            client: super::http_client()?,
            api_key,
        })
    }
}

#[async_trait]
impl Synthesize for TextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        tracing::debug!(chars = text.len(), "starting synthesis");

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: "en-US",
                ssml_gender: "NEUTRAL",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "synthesize request failed");
                Error::Synthesis(format!("synthesize request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Text-to-Speech API error");
            return Err(Error::Synthesis(format!(
                "Text-to-Speech API error {status}: {body}"
            )));
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse synthesize response");
            Error::Synthesis(format!("failed to parse synthesize response: {e}"))
        })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(result.audio_content)
            .map_err(|e| Error::Synthesis(format!("invalid audio content: {e}")))?;

        tracing::info!(audio_bytes = audio.len(), "synthesis complete");
        Ok(audio)
    }
}
