use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] phishnet::PipelineError),

    #[error("Invalid upload: {0}")]
    Ingest(#[from] phishnet::IngestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// JSON body of every error response: `{"error": {"code", "message"}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Pipeline(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Ingest(err) => {
                StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Pipeline(_) => "PIPELINE_ERROR",
            ServerError::Ingest(_) => "INGEST_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<phishnet::ConfigLoadError> for ServerError {
    fn from(err: phishnet::ConfigLoadError) -> Self {
        ServerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishnet::{ClassifierError, PipelineError};

    #[test]
    fn pipeline_errors_are_unprocessable() {
        let err = ServerError::from(PipelineError::Classifier(
            ClassifierError::DimensionMismatch {
                model: "random forest",
                expected: 4,
                actual: 3,
            },
        ));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "PIPELINE_ERROR");
    }

    #[test]
    fn ingest_errors_are_bad_requests() {
        let err = ServerError::from(phishnet::IngestError::EmptyPayload);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INGEST_ERROR");
    }

    #[test]
    fn config_errors_are_internal() {
        let err = ServerError::from(phishnet::ConfigLoadError::Validation("bad".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn not_found_response() {
        let response = ServerError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn body_deserializes_as_error_response() {
        use http_body_util::BodyExt;

        let response = ServerError::Config("missing scaler".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let parsed: ErrorResponse = serde_json::from_slice(&bytes).expect("error json");
        assert_eq!(parsed.error.code, "CONFIG_ERROR");
        assert_eq!(parsed.error.message, "Configuration error: missing scaler");
    }
}
