use crate::error::ServerResult;
use crate::middleware::RequestId;
use crate::state::ServerState;
use axum::extract::State;
use axum::{Extension, Json};
use phishnet::PredictionResult;
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Email text to classify. May be empty.
    pub body: String,
}

/// Classify an email body with both models.
///
/// # Example
/// ```json
/// // Request
/// { "body": "URGENT: verify your account now!!!" }
///
/// // Response
/// {
///   "logistic_regression": { "prediction": "phishing", "confidence": 0.8765 },
///   "random_forest": { "prediction": "phishing", "confidence": 0.825 }
/// }
/// ```
///
/// A body that is not a JSON object with a string `body` field is rejected
/// by the `Json` extractor before this handler runs.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<PredictRequest>,
) -> ServerResult<Json<PredictionResult>> {
    let result = state.detector.predict(&request.body)?;

    let request_id = request_id
        .map(|Extension(RequestId(id))| id)
        .unwrap_or_default();
    tracing::debug!(
        request_id = %request_id,
        body_len = request.body.len(),
        lr = %result.logistic_regression.prediction,
        rf = %result.random_forest.prediction,
        "predict"
    );

    Ok(Json(result))
}
