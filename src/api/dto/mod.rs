pub mod system_dto;

use serde::Serialize;

/// Uniform success envelope for operational endpoints. The chat endpoint
/// has its own fixed wire shape and does not use this.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data,
        }
    }
}
