use crate::error::ServerResult;
use crate::middleware::RequestId;
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use phishnet::{parse_email, AnalysisReport, EmailFormat};
use serde::Deserialize;
use std::sync::Arc;

/// Query string of `POST /analyse`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyseParams {
    /// Name of the uploaded file. A `.eml` name selects MIME parsing.
    pub filename: Option<String>,
}

/// Analyse an uploaded email.
///
/// The request body is the raw upload. It is parsed as an RFC 822 message
/// when `filename` ends in `.eml` or, without a filename, when the content
/// type is `message/rfc822`; otherwise the whole body is the email text.
///
/// # Example
/// ```text
/// POST /analyse?filename=notice.eml
///
/// From: Security <security@bank.example>
/// Subject: Action required
///
/// URGENT: verify your account now at https://bank.example/verify
/// ```
///
/// ```json
/// {
///   "subject": "Action required",
///   "sender": "Security <security@bank.example>",
///   "analysisResult": {
///     "phishingDetected": true,
///     "confidence": 0.8765,
///     "rfConfidence": 0.825,
///     "lrConfidence": 0.8765,
///     "riskScore": 80,
///     "riskLevel": "High",
///     "suggestion": "Do not click links or respond",
///     "flaggedKeywords": [],
///     "urls": ["https://bank.example/verify"]
///   },
///   "modelResults": {
///     "logistic_regression": { "prediction": "phishing", "confidence": 0.8765 },
///     "random_forest": { "prediction": "phishing", "confidence": 0.825 }
///   }
/// }
/// ```
pub async fn analyse(
    State(state): State<Arc<ServerState>>,
    request_id: Option<Extension<RequestId>>,
    Query(params): Query<AnalyseParams>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<Json<AnalysisReport>> {
    let format = match params.filename.as_deref() {
        Some(name) => EmailFormat::from_filename(name),
        None => headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(EmailFormat::from_content_type)
            .unwrap_or(EmailFormat::PlainText),
    };

    let email = parse_email(&body, format)?;
    let report = state.detector.analyse(&email)?;

    let request_id = request_id
        .map(|Extension(RequestId(id))| id)
        .unwrap_or_default();
    tracing::debug!(
        request_id = %request_id,
        ?format,
        upload_len = body.len(),
        urls = report.analysis_result.urls.len(),
        phishing = report.analysis_result.phishing_detected,
        "analyse"
    );

    Ok(Json(report))
}
