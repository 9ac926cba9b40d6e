use chrono::{DateTime, Utc};
use serde::Serialize;

/// Successful gateway reply, serialized exactly as the browser client
/// expects: `{ success, response, model, timestamp }`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}
