use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    // Chat and system subrouters live under /api/v1
    let api_v1 = Router::new()
        .merge(crate::api::routes::chat_routes::chat_routes())
        .nest("/system", crate::api::routes::system_routes::system_routes());

    Router::new()
        // Root route
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API v1
        .nest("/api/v1", api_v1)
        // Fallback handler for 404
        .fallback(handler_404)
        // Wrong method on a known route classifies instead of an empty 405
        .method_not_allowed_fallback(handler_405)
        // ✅ Apply CORS layer to all routes (the caller is a browser SPA)
        .layer(CorsLayer::very_permissive())
}

// Handler for root
async fn root() -> &'static str {
    "Genibi gateway is running!"
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

// Handler for 404 Not Found
async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}

// Handler for 405 Method Not Allowed
async fn handler_405() -> AppError {
    AppError::MethodNotAllowed
}
