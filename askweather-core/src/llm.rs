use crate::{Credentials, GeminiConfig, ProviderError, config::DEFAULT_GEMINI_URL};
use async_trait::async_trait;
use std::{fmt::Debug, io::Write};

pub mod gemini;

pub use gemini::GeminiClient;

/// Returned in place of a reply when generation fails.
pub const REPLY_PLACEHOLDER: &str = "Couldn't generate response from Gemini";

#[async_trait]
pub trait LanguageModel: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub fn model_from_config(config: &GeminiConfig, credentials: &Credentials) -> Box<dyn LanguageModel> {
    let api_key = credentials.gemini_api_key.clone();
    if config.base_url == DEFAULT_GEMINI_URL {
        Box::new(GeminiClient::new(api_key, config.model.clone()))
    } else {
        Box::new(GeminiClient::with_base_url(api_key, config.model.clone(), config.base_url.clone()))
    }
}

/// Submit `prompt`; on failure report to `out` and return [`REPLY_PLACEHOLDER`].
pub async fn generate_reply<W: Write>(
    model: &dyn LanguageModel,
    prompt: &str,
    out: &mut W,
) -> std::io::Result<String> {
    match model.generate(prompt).await {
        Ok(reply) => Ok(reply),
        Err(err) => {
            tracing::debug!(error = ?err, "text generation failed");
            writeln!(out, "Error generating Gemini response: {err}")?;
            Ok(REPLY_PLACEHOLDER.to_string())
        }
    }
}
