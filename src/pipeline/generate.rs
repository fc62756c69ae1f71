//! Reply generation via the `HuggingFace` Inference API
//!
//! This stage is deliberately fail-open: any upstream failure is swallowed
//! and converted into a diagnostic reply so the pipeline always proceeds
//! to synthesis. Transcription and synthesis remain fail-closed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pipeline::{EMPTY_REPLY_FALLBACK, Generate};
use crate::{Error, Result};

const MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct GenerationResponse {
    generated_text: String,
}

/// Generates a conversational reply to a transcript
pub struct ReplyGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ReplyGenerator {
    /// Create a new reply generation adapter against the hosted
    /// inference API
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot
    /// be constructed.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_endpoint(api_key, MODEL_URL.to_string())
    }

    /// Create an adapter against a custom inference endpoint (e.g. a
    /// self-hosted text-generation-inference server)
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot
    /// be constructed.
    pub fn with_endpoint(api_key: String, endpoint: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "HuggingFace API key required for reply generation".to_string(),
            ));
        }

        Ok(Self {
            client: super::http_client()?,
            api_key,
            endpoint,
        })
    }

    /// Request raw generated text from the model
    async fn request_generation(&self, text: &str) -> Result<String> {
        let request = GenerationRequest {
            inputs: text,
            parameters: GenerationParameters {
                max_length: 100,
                temperature: 0.7,
                top_p: 0.9,
                do_sample: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("inference request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Inference API error {status}: {body}"
            )));
        }

        // The inference API wraps text-generation output in an array
        let result: Vec<GenerationResponse> = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("failed to parse inference response: {e}")))?;

        result
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or_else(|| Error::Generation("empty inference response".to_string()))
    }
}

#[async_trait]
impl Generate for ReplyGenerator {
    async fn generate(&self, text: &str) -> String {
        tracing::debug!(input = %text, "starting reply generation");

        match self.request_generation(text).await {
            Ok(generated) => {
                let reply = clean_reply(&generated, text);
                tracing::info!(reply = %reply, "reply generation complete");
                reply
            }
            Err(e) => {
                tracing::error!(error = %e, "reply generation failed, using fallback");
                error_reply(text)
            }
        }
    }
}

/// Strip an echoed input prefix and trim the remainder
///
/// Empty replies get a fixed fallback so synthesis always has something
/// to speak.
fn clean_reply(generated: &str, input: &str) -> String {
    let reply = generated
        .strip_prefix(input)
        .map_or(generated, str::trim);

    if reply.is_empty() {
        EMPTY_REPLY_FALLBACK.to_string()
    } else {
        reply.to_string()
    }
}

/// Diagnostic reply embedding the original input, used when the upstream
/// call fails
fn error_reply(input: &str) -> String {
    format!("I encountered an error while processing: {input}")
}
