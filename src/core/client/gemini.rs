//! Minimal client for the Gemini `generateContent` endpoint.
//!
//! The HTTP call is kept deliberately raw: it returns either a transport
//! failure or the status plus body text, and the chat service owns all
//! classification (status taxonomy, body decoding, text extraction).

use async_trait::async_trait;
use http::{header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const USER_AGENT: &str = "Genibi-Healthcare/1.0";

/// One turn in Gemini wire format. Roles on the wire are `user` and `model`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

impl Content {
    pub fn text_turn(role: impl Into<String>, text: impl Into<String>) -> Self {
        Content {
            role: role.into(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// Success body shape. Fields default so a structurally valid but sparse
/// body decodes to "no candidates" instead of a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
    }
}

/// Raw outcome of an upstream call that produced an HTTP response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Failure before any HTTP response was produced (DNS, connect, send,
/// or an interrupted body read).
#[derive(Debug, Error)]
#[error("upstream transport failure: {0}")]
pub struct TransportError(pub String);

/// Seam for the upstream provider, so the gateway pipeline can be exercised
/// against stubs.
#[async_trait]
pub trait GenerateContentApi: Send + Sync {
    /// Submit one ordered turn sequence as a single completion call.
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        contents: &[Content],
    ) -> Result<UpstreamResponse, TransportError>;
}

pub struct GeminiHttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        GeminiHttpClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl GenerateContentApi for GeminiHttpClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        contents: &[Content],
    ) -> Result<UpstreamResponse, TransportError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            model,
            urlencoding::encode(api_key)
        );

        let request = GenerateContentRequest {
            contents: contents.to_vec(),
        };

        let resp = self
            .http
            .post(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_gemini_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![
                Content::text_turn("user", "hello"),
                Content::text_turn("model", "hi there"),
            ],
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hello" }] },
                    { "role": "model", "parts": [{ "text": "hi there" }] },
                ]
            })
        );
    }

    #[test]
    fn first_text_reads_the_expected_path() {
        let body = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "role": "model", "parts": [{ "text": "other" }] } },
            ]
        });
        let decoded: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(decoded.first_text(), Some("first"));
    }

    #[test]
    fn sparse_bodies_decode_to_no_candidates() {
        let decoded: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded.first_text(), None);

        let decoded: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{}] })).unwrap();
        assert_eq!(decoded.first_text(), None);
    }

    #[test]
    fn structural_mismatch_is_a_decode_error() {
        assert!(serde_json::from_str::<GenerateContentResponse>("[]").is_err());
        assert!(serde_json::from_value::<GenerateContentResponse>(json!({ "candidates": 3 })).is_err());
    }
}
