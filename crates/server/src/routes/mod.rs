//! API route handlers
//!
//! - `analyse`: report for an uploaded email (`.eml` or plain text)
//! - `health`: liveness, readiness and Prometheus metrics
//! - `predict`: phishing classification of an email body

pub mod analyse;
pub mod health;
pub mod predict;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service information, served at `GET /`.
///
/// # Response
///
/// ```json
/// {
///   "name": "phishnet",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "phishnet",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/predict",
            "/analyse",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
