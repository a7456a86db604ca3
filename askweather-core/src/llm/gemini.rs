use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::DEFAULT_GEMINI_URL,
    error::{ProviderError, truncate_body},
};

use super::LanguageModel;

const SERVICE: &str = "Gemini";

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_GEMINI_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn text(prompt: &'a str) -> Self {
        Self { contents: [RequestContent { parts: [RequestPart { text: prompt }] }] }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined in order.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!(model = %self.model, chars = prompt.len(), "sending prompt");

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::text(prompt))
            .send()
            .await
            .map_err(|source| ProviderError::Request { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Request { service: SERVICE, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|source| ProviderError::Decode { service: SERVICE, source })?;

        parsed.into_text().ok_or(ProviderError::EmptyReply { service: SERVICE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GEMINI_MODEL;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::text("hello")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::with_base_url("K".into(), "gemini-test".into(), "http://host/".into());
        assert_eq!(client.endpoint(), "http://host/v1beta/models/gemini-test:generateContent");
    }

    #[test]
    fn debug_hides_api_key() {
        let client = GeminiClient::new("SECRET".into(), DEFAULT_GEMINI_MODEL.into());
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains(DEFAULT_GEMINI_MODEL));
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"role": "model", "parts": [{"text": "Bring "}, {"text": "an umbrella."}]}, "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("Bring an umbrella."));
    }

    #[test]
    fn blocked_prompt_has_no_text() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(parsed.into_text().is_none());

        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(parsed.into_text().is_none());
    }
}
