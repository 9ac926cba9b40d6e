//! System API DTOs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct LogQuery {
    pub cursor: Option<usize>,
    #[validate(range(min = 1, max = 5000))]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PaginatedLogResponse {
    pub date: String,
    pub lines: Vec<String>,
    pub next_cursor: Option<usize>,
}
