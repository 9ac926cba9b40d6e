use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Classified gateway outcomes. Every failure path in the service is mapped
/// into exactly one of these at the boundary; nothing escapes as a panic.
///
/// Display strings are the caller-visible messages. Provider-side detail
/// (upstream bodies, transport errors) is logged where it is classified and
/// never carried here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON in request body")]
    InvalidBody,

    #[error("Invalid or empty input provided")]
    InvalidInput,

    #[error("API key not configured")]
    NotConfigured,

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Unable to reach AI service. Please try again later.")]
    Unreachable,

    #[error("AI service is busy. Please try again in a moment.")]
    RateLimited,

    #[error("AI service is temporarily unavailable.")]
    UpstreamServiceError,

    #[error("Invalid request to AI service.")]
    UpstreamClientError,

    #[error("Invalid response from AI service.")]
    BadUpstreamResponse,

    #[error("AI service returned an empty response.")]
    EmptyUpstreamResponse,

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected(String),
}

/// Helper for mapping any unknown error into the generic internal outcome.
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::Unexpected(err.to_string())
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidBody => StatusCode::BAD_REQUEST,
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamServiceError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamClientError => StatusCode::BAD_REQUEST,
            AppError::BadUpstreamResponse => StatusCode::BAD_GATEWAY,
            AppError::EmptyUpstreamResponse => StatusCode::BAD_GATEWAY,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable category flag set to `true` in the response body.
    pub fn flag(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::InvalidBody => "invalid_body",
            AppError::InvalidInput => "invalid_input",
            AppError::NotConfigured => "not_configured",
            AppError::Timeout => "timeout",
            AppError::Unreachable => "network_error",
            AppError::RateLimited => "rate_limited",
            AppError::UpstreamServiceError => "service_error",
            AppError::UpstreamClientError => "client_error",
            AppError::BadUpstreamResponse => "parse_error",
            AppError::EmptyUpstreamResponse => "empty_response",
            AppError::Unexpected(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Detail for Unexpected stays in the log; the caller gets the
        // generic Display message like every other category.
        if let AppError::Unexpected(detail) = &self {
            error!(%detail, "unhandled gateway error");
        }

        let mut body = json!({
            "success": false,
            "error": self.to_string(),
        });
        body[self.flag()] = json!(true);

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_maps_to_its_status_and_flag() {
        let cases = [
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            (AppError::InvalidBody, StatusCode::BAD_REQUEST, "invalid_body"),
            (AppError::InvalidInput, StatusCode::BAD_REQUEST, "invalid_input"),
            (AppError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR, "not_configured"),
            (AppError::Timeout, StatusCode::REQUEST_TIMEOUT, "timeout"),
            (AppError::Unreachable, StatusCode::SERVICE_UNAVAILABLE, "network_error"),
            (AppError::RateLimited, StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            (AppError::UpstreamServiceError, StatusCode::SERVICE_UNAVAILABLE, "service_error"),
            (AppError::UpstreamClientError, StatusCode::BAD_REQUEST, "client_error"),
            (AppError::BadUpstreamResponse, StatusCode::BAD_GATEWAY, "parse_error"),
            (AppError::EmptyUpstreamResponse, StatusCode::BAD_GATEWAY, "empty_response"),
            (AppError::Unexpected("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        ];

        for (err, status, flag) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.flag(), flag);
        }
    }

    #[test]
    fn unexpected_hides_detail_from_the_caller() {
        let err = internal_error("connection pool exploded");
        assert_eq!(err.to_string(), "An unexpected error occurred. Please try again.");
    }
}
