use std::sync::Arc;

use chrono::Utc;
use http::StatusCode;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::core::client::gemini::{
    Content, GenerateContentApi, GenerateContentResponse, TransportError, UpstreamResponse,
};
use crate::core::config::gateway_config::GatewayConfig;
use crate::domain::chat::dto::chat_reply::ChatReply;
use crate::domain::chat::dto::chat_request::{ChatCompletionRequest, ChatTurn};
use crate::errors::AppError;

/// Stateless per-request pipeline in front of the Gemini completion API.
pub struct ChatService {
    config: Arc<GatewayConfig>,
    upstream: Arc<dyn GenerateContentApi>,
}

impl ChatService {
    pub fn new(config: Arc<GatewayConfig>, upstream: Arc<dyn GenerateContentApi>) -> Self {
        ChatService { config, upstream }
    }

    /// Run one conversation turn through the gateway: config check, input
    /// validation, history cleanup, bounded upstream call, classification.
    /// Each checkpoint either advances or returns a terminal category.
    pub async fn complete(&self, payload: ChatCompletionRequest) -> Result<ChatReply, AppError> {
        let request_id = Uuid::new_v4();

        let api_key = match self.config.api_key() {
            Some(key) => key,
            None => {
                error!(%request_id, "GEMINI_API_KEY not found in environment");
                return Err(AppError::NotConfigured);
            }
        };

        let input = validate_input(payload.input.as_ref())?;

        let (mut contents, dropped) = clean_history(payload.history.as_ref());
        if dropped > 0 {
            warn!(%request_id, dropped, "dropped malformed history entries");
        }
        contents.push(Content::text_turn("user", input));

        let model = self.config.model.as_str();
        debug!(%request_id, model, turns = contents.len(), "dispatching upstream completion");

        // Timeout race. Dropping the losing call future is what cancels the
        // in-flight request; nothing keeps running in the background.
        let call = self.upstream.generate_content(model, api_key, &contents);
        let outcome = match timeout(self.config.upstream_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(
                    %request_id,
                    timeout_ms = self.config.upstream_timeout.as_millis() as u64,
                    "upstream call timed out"
                );
                return Err(AppError::Timeout);
            }
        };

        let response = outcome.map_err(|TransportError(detail)| {
            error!(%request_id, %detail, "upstream transport failure");
            AppError::Unreachable
        })?;

        let reply = classify_response(request_id, response)?;

        Ok(ChatReply {
            success: true,
            response: reply,
            model: model.to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// The current input must be text with at least one non-whitespace
/// character; the trimmed value is what goes upstream.
fn validate_input(input: Option<&Value>) -> Result<String, AppError> {
    input
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(AppError::InvalidInput)
}

/// Convert caller history into upstream turns, preserving order. Malformed
/// entries are dropped, never fatal; a non-array `history` is treated as
/// absent. Returns the turns plus the dropped-entry count.
fn clean_history(history: Option<&Value>) -> (Vec<Content>, usize) {
    let Some(entries) = history.and_then(Value::as_array) else {
        return (Vec::new(), 0);
    };

    let mut contents = Vec::with_capacity(entries.len() + 1);
    let mut dropped = 0;
    for entry in entries {
        match ChatTurn::from_value(entry) {
            Some(turn) => {
                contents.push(Content::text_turn(turn.role.as_gemini_role(), turn.content));
            }
            None => dropped += 1,
        }
    }

    (contents, dropped)
}

/// Classify a completed upstream call: status taxonomy, body decode, reply
/// text extraction. Upstream bodies are logged here and go no further.
fn classify_response(request_id: Uuid, response: UpstreamResponse) -> Result<String, AppError> {
    let UpstreamResponse { status, body } = response;

    if !status.is_success() {
        error!(%request_id, status = status.as_u16(), %body, "upstream returned non-success status");
        return Err(if status == StatusCode::TOO_MANY_REQUESTS {
            AppError::RateLimited
        } else if status.is_server_error() {
            AppError::UpstreamServiceError
        } else {
            AppError::UpstreamClientError
        });
    }

    let decoded: GenerateContentResponse = match serde_json::from_str(&body) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!(%request_id, error = %e, "failed to decode upstream response body");
            return Err(AppError::BadUpstreamResponse);
        }
    };

    // A successful call with no usable text is always an error; an empty
    // string never reaches the caller as a 200.
    match decoded.first_text().map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => Ok(text.to_string()),
        None => {
            error!(%request_id, "upstream response contained no reply text");
            Err(AppError::EmptyUpstreamResponse)
        }
    }
}
