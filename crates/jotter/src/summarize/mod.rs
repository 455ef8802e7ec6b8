//! AI summaries of note content.
//!
//! A summary is one request to a text-generation backend. The
//! [`TextGenerator`] trait is the seam between prompt handling and the HTTP
//! client, so the rest of the crate can be exercised without a network.
//!
//! [`summarize_text`] never fails: backend errors come back as a readable
//! string that is displayed exactly like a summary.

mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SummarizerConfig;
use crate::error::{Error, Result};

pub use gemini::GeminiClient;

/// Notice shown when a note is too short to summarize.
pub const TOO_SHORT_NOTICE: &str = "Please write a note with at least 50 characters to summarize.";

/// Prefix of the text returned when a request fails.
pub const FAILURE_PREFIX: &str = "Failed to generate summary: ";

const PROMPT_PREAMBLE: &str = "Summarize the following text for a notepad application. \
Provide a concise summary, capturing the key points in a few sentences or bullet points. \
The original text is:\n\n---\n\n";

/// Fixed sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Top-k cutoff.
    pub top_k: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            top_k: 20,
        }
    }
}

impl From<&SummarizerConfig> for SamplingParams {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
        }
    }
}

/// A backend that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name of the backend (for logging).
    fn name(&self) -> &str;

    /// Sampling parameters this backend sends.
    fn sampling(&self) -> SamplingParams;

    /// Generate text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or yields no text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Stand-in backend used when no API key is configured.
///
/// Every request fails immediately with [`Error::MissingCredential`] and
/// nothing is sent over the network.
#[derive(Debug, Clone)]
pub struct MissingCredential {
    var: String,
}

impl MissingCredential {
    /// Create a stand-in naming the variable that should hold the key.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TextGenerator for MissingCredential {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn sampling(&self) -> SamplingParams {
        SamplingParams::default()
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::missing_credential(&self.var))
    }
}

/// Build the configured backend.
///
/// Without an API key this returns a [`MissingCredential`] stand-in, so
/// callers still get the local length check and a readable failure.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn generator_from_config(config: &SummarizerConfig) -> Result<Box<dyn TextGenerator>> {
    match GeminiClient::from_config(config) {
        Ok(client) => Ok(Box::new(client)),
        Err(e) if e.is_missing_credential() => {
            warn!("{}; summaries are unavailable", e);
            Ok(Box::new(MissingCredential::new(&config.api_key_env)))
        }
        Err(e) => Err(e),
    }
}

/// Build the summary prompt around `text`.
#[must_use]
pub fn build_prompt(text: &str) -> String {
    format!("{PROMPT_PREAMBLE}{text}")
}

/// Notice for notes shorter than `min_chars`.
#[must_use]
pub fn too_short_notice(min_chars: usize) -> String {
    if min_chars == 50 {
        TOO_SHORT_NOTICE.to_string()
    } else {
        format!("Please write a note with at least {min_chars} characters to summarize.")
    }
}

/// Summarize `text`, turning any failure into a displayable message.
pub async fn summarize_text(generator: &dyn TextGenerator, text: &str) -> String {
    let prompt = build_prompt(text);
    debug!(
        "Requesting summary from {} ({} prompt bytes, {:?})",
        generator.name(),
        prompt.len(),
        generator.sampling()
    );

    match generator.generate(&prompt).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Error summarizing text with {}: {}", generator.name(), e);
            format!("{FAILURE_PREFIX}{e}")
        }
    }
}
