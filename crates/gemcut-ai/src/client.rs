//! Transport to the generative language service.
//!
//! [`GenerativeBackend`] is the seam the storyboard and caption services
//! talk through. [`GeminiClient`] implements it over the REST
//! `generateContent` endpoint; tests substitute a scripted backend.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::AiConfig;
use crate::error::{AiError, AiResult};

/// One text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// When set, the service is asked for JSON matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    /// Free-form text answer.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// JSON answer constrained by `schema`.
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }

    /// Request body in the `generateContent` wire shape.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": self.prompt }] }],
        });
        if let Some(schema) = &self.response_schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        body
    }
}

/// Something that turns a prompt into text.
pub trait GenerativeBackend: Send + Sync {
    /// Run one request and return the concatenated answer text.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = AiResult<String>> + Send;
}

impl<B: GenerativeBackend> GenerativeBackend for Arc<B> {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = AiResult<String>> + Send {
        (**self).generate(request)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Pull the answer text out of a raw `generateContent` response.
///
/// Text parts of the first candidate are concatenated. A response with no
/// text at all is [`AiError::EmptyResponse`].
pub fn extract_text(raw: &str) -> AiResult<String> {
    let response: GenerateResponse = serde_json::from_str(raw)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

/// REST client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl GeminiClient {
    /// Build a client. A missing API key is not an error until a request
    /// is made.
    pub fn new(config: AiConfig) -> AiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        info!(model = %config.model, base = %config.api_base, "generation client ready");
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl GenerativeBackend for GeminiClient {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = AiResult<String>> + Send {
        let body = request.to_body();
        let structured = request.response_schema.is_some();
        async move {
            let key = self.config.api_key()?;
            debug!(model = %self.config.model, structured, "sending generateContent request");

            let response = self
                .http
                .post(self.config.generate_url())
                .header("x-goog-api-key", key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let raw = response.text().await?;
            if !status.is_success() {
                return Err(AiError::Status {
                    status: status.as_u16(),
                    body: raw,
                });
            }

            debug!(bytes = raw.len(), "received generateContent response");
            extract_text(&raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_body_shape() {
        let body = GenerateRequest::text("hello").to_body();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_json_body_carries_schema() {
        let schema = json!({ "type": "ARRAY" });
        let body = GenerateRequest::json("p", schema.clone()).to_body();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_extract_joins_parts_of_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(extract_text(raw).unwrap(), "Hello, world");
    }

    #[test]
    fn test_extract_empty_and_malformed() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text("<html>"),
            Err(AiError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = GeminiClient::new(AiConfig {
            api_base: "http://127.0.0.1:9".into(),
            ..AiConfig::default()
        })
        .unwrap();
        let err = client
            .generate(&GenerateRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }
}
