//! The three-stage voice pipeline: transcription, reply generation, synthesis
//!
//! Each stage delegates to a vendor API behind a capability trait so tests
//! can substitute fakes. The orchestrator composes the stages in strict
//! sequence and holds no state across invocations.

pub mod generate;
pub mod stt;
pub mod tts;

pub use generate::ReplyGenerator;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Vendor calls are unbounded network operations; cap every request
pub(crate) const VENDOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client settings for the vendor adapters
pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(VENDOR_TIMEOUT).build()
}

/// Sentinel transcript returned when recognition yields no segments
pub const NO_SPEECH_SENTINEL: &str = "No speech detected";

/// Fallback reply when generation produces an empty string
pub const EMPTY_REPLY_FALLBACK: &str = "I'm not sure how to respond to that.";

/// Speech recognition capability
#[async_trait]
pub trait Transcribe: Send + Sync {
    /// Transcribe audio bytes to text, or the no-speech sentinel
    ///
    /// All-or-nothing: no partial transcript is available on failure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transcription`] when the upstream call fails.
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Reply generation capability
///
/// Infallible by contract: upstream failures are converted into a
/// diagnostic reply so the pipeline always proceeds to synthesis.
#[async_trait]
pub trait Generate: Send + Sync {
    /// Generate a conversational reply to the given text
    async fn generate(&self, text: &str) -> String;
}

/// Speech synthesis capability
#[async_trait]
pub trait Synthesize: Send + Sync {
    /// Synthesize text to MP3 audio bytes
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Synthesis`] when the upstream call fails or
    /// reports a non-success completion.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Composes the three adapters in strict sequence
///
/// Each stage's input is produced solely by the prior stage, so there is no
/// intra-request parallelism. Adapters are constructed once at startup and
/// shared across requests; every `process` call is an independent run.
pub struct Pipeline {
    stt: Box<dyn Transcribe>,
    generator: Box<dyn Generate>,
    tts: Box<dyn Synthesize>,
}

impl Pipeline {
    /// Create a pipeline from the three stage adapters
    #[must_use]
    pub fn new(
        stt: Box<dyn Transcribe>,
        generator: Box<dyn Generate>,
        tts: Box<dyn Synthesize>,
    ) -> Self {
        Self {
            stt,
            generator,
            tts,
        }
    }

    /// Run an audio clip through the full pipeline, returning MP3 reply audio
    ///
    /// A no-speech transcript is passed to generation as ordinary text, with
    /// no short-circuit. Generation never fails; a transcription or synthesis
    /// failure aborts the run immediately and propagates to the caller with
    /// no partial result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transcription`] or [`crate::Error::Synthesis`]
    /// when the corresponding stage fails.
    pub async fn process(&self, audio: &[u8]) -> Result<Vec<u8>> {
        let transcript = self.stt.transcribe(audio).await?;
        tracing::debug!(transcript = %transcript, "transcription stage complete");

        let reply = self.generator.generate(&transcript).await;
        tracing::debug!(reply = %reply, "generation stage complete");

        let audio = self.tts.synthesize(&reply).await?;
        tracing::debug!(audio_bytes = audio.len(), "synthesis stage complete");

        Ok(audio)
    }
}
