//! Shared fake adapters for pipeline and API tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use voicepipe::pipeline::{Generate, Synthesize, Transcribe};
use voicepipe::{Error, Result};

/// Transcriber returning a fixed transcript, counting invocations
pub struct FixedTranscriber {
    transcript: &'static str,
    calls: Arc<AtomicUsize>,
}

impl FixedTranscriber {
    pub fn new(transcript: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                transcript,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Transcribe for FixedTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.to_string())
    }
}

/// Transcriber that always fails
pub struct FailingTranscriber;

#[async_trait]
impl Transcribe for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        Err(Error::Transcription(
            "Speech API error 403: quota exceeded".to_string(),
        ))
    }
}

/// Generator returning a fixed reply, recording every input it sees
pub struct RecordingGenerator {
    reply: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingGenerator {
    pub fn new(reply: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply,
                seen: seen.clone(),
            },
            seen,
        )
    }
}

#[async_trait]
impl Generate for RecordingGenerator {
    async fn generate(&self, text: &str) -> String {
        self.seen.lock().unwrap().push(text.to_string());
        self.reply.to_string()
    }
}

/// Synthesizer returning fixed bytes, recording every input it sees
pub struct RecordingSynthesizer {
    audio: &'static [u8],
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingSynthesizer {
    pub fn new(audio: &'static [u8]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                audio,
                seen: seen.clone(),
            },
            seen,
        )
    }
}

#[async_trait]
impl Synthesize for RecordingSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.audio.to_vec())
    }
}

/// Synthesizer that always fails
pub struct FailingSynthesizer;

#[async_trait]
impl Synthesize for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(Error::Synthesis(
            "Text-to-Speech API error 500: voice unavailable".to_string(),
        ))
    }
}
