//! Command-line configuration for the `rdescribe` binary.

use clap::Parser;

#[cfg(feature = "gemini")]
use std::time::Duration;

#[cfg(feature = "gemini")]
use crate::backend::{GeminiClient, GeminiModel};
#[cfg(feature = "gemini")]
use crate::error::Result;
#[cfg(feature = "logging")]
use crate::logging::LogLevel;

#[derive(Debug, Clone, Parser)]
#[command(name = "rdescribe")]
#[command(about = "Describe a product image as an e-commerce catalog record (JSON on stdout)")]
pub struct CliConfig {
    /// Path of the product image to describe
    pub image_path: String,

    /// Gemini model identifier
    #[arg(long, default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Base URL of a Gemini-compatible API
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Failures are reported once by the binary itself, so logging stays off
    /// unless `--verbose` is given (or `RDESCRIBE_LOG` overrides it).
    #[cfg(feature = "logging")]
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Off
        }
    }

    /// Build a Gemini client from the parsed options.
    #[cfg(feature = "gemini")]
    pub fn gemini_client(&self) -> Result<GeminiClient> {
        let mut client = match &self.api_key {
            Some(key) => GeminiClient::new(key.clone())?,
            None => GeminiClient::from_env()?,
        }
        .model(GeminiModel::from_string(self.model.clone()));

        if let Some(temperature) = self.temperature {
            client = client.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            client = client.max_tokens(max_tokens);
        }
        if let Some(secs) = self.timeout_secs {
            client = client.timeout(Duration::from_secs(secs));
        }
        if let Some(base_url) = &self.base_url {
            client = client.base_url(base_url.clone());
        }
        Ok(client)
    }
}
