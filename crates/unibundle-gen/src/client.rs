use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, Result};
use crate::model::Model;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One generation call: which model, what standing instruction, what user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: Model,
    pub system_instruction: String,
    pub prompt: String,
}

/// Asynchronous text generation backend.
///
/// # Implementations
///
/// - [`GeminiClient`]: production implementation over `reqwest`
/// - Mock implementations for testing
pub trait GenerationClient: Send + Sync {
    /// Send one request and return the raw model text.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    /// Implementations do not retry; see [`Generator`](crate::Generator).
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Fails with [`GenError::MissingApiKey`] before any network activity when
    /// the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model.id())
    }
}

impl GenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = self.endpoint(request.model);
        let body = GenerateContentRequest::from(request);
        debug!(%url, prompt_bytes = request.prompt.len(), "sending generation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenError::Status {
                status: status.as_u16(),
                body: error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let output = parsed.text();
        debug!(status = status.as_u16(), output_bytes = output.len(), "generation response received");
        Ok(output)
    }
}

/// Prefers the structured `error.message` over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            model: Model::Flash,
            system_instruction: "be terse".into(),
            prompt: "hello".into(),
        }
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(GeminiClient::new(""), Err(GenError::MissingApiKey)));
        assert!(matches!(GeminiClient::new("  "), Err(GenError::MissingApiKey)));
        assert!(GeminiClient::new("key").is_ok());
    }

    #[test]
    fn endpoint_includes_model_id() {
        let client = GeminiClient::new("key")
            .unwrap()
            .with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(client.base_url(), "http://localhost:9000/v1beta");
        assert_eq!(
            client.endpoint(Model::Pro),
            "http://localhost:9000/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let req = request();
        let body = serde_json::to_value(GenerateContentRequest::from(&req)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "systemInstruction": { "parts": [{ "text": "be terse" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
            })
        );
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"<!DOCTYPE html>"},{"text":"<html></html>"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text(), "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let body = r#"{"error":{"code":400,"message":"model not found","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "model not found");
        assert_eq!(error_message(" upstream exploded \n"), "upstream exploded");
    }
}
