use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::app_state::AppState;
use crate::domain::chat::dto::chat_reply::ChatReply;
use crate::domain::chat::dto::chat_request::ChatCompletionRequest;
use crate::errors::AppError;

pub struct ChatController;

impl ChatController {
    /// POST /api/v1/chat
    ///
    /// The body is taken as a fallible extraction so an unparsable payload
    /// classifies as `InvalidBody` instead of axum's default rejection.
    pub async fn chat(
        State(state): State<AppState>,
        payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
    ) -> Result<Json<ChatReply>, AppError> {
        let Json(payload) = payload.map_err(|rejection| {
            debug!(%rejection, "rejecting unparsable chat body");
            AppError::InvalidBody
        })?;

        let reply = state.chat_service.complete(payload).await?;
        Ok(Json(reply))
    }
}
