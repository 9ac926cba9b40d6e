//! API route declarations (e.g., /api/v1/*)

pub mod chat_routes;
pub mod system_routes;
