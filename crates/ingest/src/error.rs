//! Errors produced while turning an uploaded email into text.

use thiserror::Error;

/// Intake failures. All of them are caused by the uploaded content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// Nothing was uploaded.
    #[error("no email content uploaded")]
    EmptyPayload,

    /// The content was declared as RFC 822 but carries no parsable message.
    #[error("malformed email: {0}")]
    MalformedEmail(String),
}

impl IngestError {
    /// Suggested HTTP status code. Every intake error is a bad request.
    ///
    /// ```rust
    /// use ingest::IngestError;
    ///
    /// assert_eq!(IngestError::EmptyPayload.http_status_code(), 400);
    /// ```
    pub fn http_status_code(&self) -> u16 {
        400
    }
}
