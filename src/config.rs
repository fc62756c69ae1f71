//! Configuration for the voicepipe gateway
//!
//! Credentials come from the environment and are validated eagerly at
//! startup so a misconfigured deployment fails before accepting traffic.

use crate::{Error, Result};

/// Gateway configuration, assembled once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// `HuggingFace` Inference API key (reply generation)
    pub huggingface_api_key: String,

    /// Google Cloud API key (speech recognition and synthesis)
    pub google_api_key: String,

    /// Port to listen on
    pub port: u16,

    /// Frontend origin allowed by CORS
    pub frontend_url: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required credential is missing or empty.
    pub fn from_env(port: u16, frontend_url: String) -> Result<Self> {
        Ok(Self {
            huggingface_api_key: require(
                "HUGGINGFACE_API_KEY",
                std::env::var("HUGGINGFACE_API_KEY").ok(),
            )?,
            google_api_key: require("GOOGLE_API_KEY", std::env::var("GOOGLE_API_KEY").ok())?,
            port,
            frontend_url,
        })
    }
}

/// Reject missing or blank required settings
fn require(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{name} must be set"))),
    }
}
