//! Voicepipe - voice conversation gateway
//!
//! Accepts a recorded audio clip over HTTP and returns a spoken reply.
//! Speech recognition, reply generation, and speech synthesis are each
//! delegated to a vendor API and composed as a strict three-stage pipeline
//! with fail-fast error propagation on the outer stages.
//!
//! # Architecture
//!
//! ```text
//! POST /audio/process (multipart upload)
//!        │
//!        ▼
//! ┌────────────┐    ┌──────────┐    ┌────────────┐
//! │ Transcribe │───▶│ Generate │───▶│ Synthesize │
//! └────────────┘    └──────────┘    └────────────┘
//!  Cloud Speech     HF Inference     Cloud TTS
//!        │
//!        ▼
//! {success, audio: <base64 MP3>, mimeType}
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Generate, Pipeline, Synthesize, Transcribe};
