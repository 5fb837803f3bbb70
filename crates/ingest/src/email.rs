use std::borrow::Cow;

use mail_parser::{Addr, MessageParser};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::urls::extract_urls;

/// Sender reported when the upload has no usable `From` header.
pub const DEFAULT_SENDER: &str = "unknown@example.com";

/// Subject reported when the upload has no usable `Subject` header.
pub const DEFAULT_SUBJECT: &str = "(No Subject)";

/// How an upload should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailFormat {
    /// An RFC 822 message (`.eml`): headers, then a possibly multipart body.
    Eml,
    /// Anything else; the whole upload is the body.
    PlainText,
}

impl EmailFormat {
    /// `.eml` files are messages, everything else is plain text.
    pub fn from_filename(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".eml") {
            EmailFormat::Eml
        } else {
            EmailFormat::PlainText
        }
    }

    /// `message/rfc822` is a message, everything else is plain text.
    /// Parameters after `;` are ignored.
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("message/rfc822") {
            EmailFormat::Eml
        } else {
            EmailFormat::PlainText
        }
    }
}

/// The parts of an email the classifier and report need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub sender: String,
    /// Text handed to the classifier.
    pub body: String,
}

impl EmailMessage {
    /// A message whose body is `text`, with default sender and subject.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            sender: DEFAULT_SENDER.to_string(),
            body: text.into(),
        }
    }

    /// Links in the body, deduplicated in order of first appearance.
    pub fn urls(&self) -> Vec<String> {
        extract_urls(&self.body)
    }
}

/// Reads an uploaded email.
///
/// For [`EmailFormat::Eml`] the subject and sender come from the headers and
/// the body is the first text part. A message with only an HTML part gets
/// that part rendered as text, and one with no body at all falls back to
/// the raw upload. Missing or empty headers get [`DEFAULT_SUBJECT`] and
/// [`DEFAULT_SENDER`].
///
/// Invalid UTF-8 in a plain-text upload is replaced, not rejected.
///
/// ```rust
/// use ingest::{parse_email, EmailFormat};
///
/// let raw = b"From: Support <help@bank.example>\r\nSubject: Locked\r\n\r\nVerify now.\r\n";
/// let email = parse_email(raw, EmailFormat::Eml).unwrap();
/// assert_eq!(email.subject, "Locked");
/// assert_eq!(email.sender, "Support <help@bank.example>");
/// assert_eq!(email.body.trim_end(), "Verify now.");
/// ```
pub fn parse_email(raw: &[u8], format: EmailFormat) -> Result<EmailMessage, IngestError> {
    if raw.is_empty() {
        return Err(IngestError::EmptyPayload);
    }
    let content = String::from_utf8_lossy(raw);

    match format {
        EmailFormat::PlainText => Ok(EmailMessage::from_text(content)),
        EmailFormat::Eml => parse_eml(raw, content),
    }
}

fn parse_eml(raw: &[u8], content: Cow<'_, str>) -> Result<EmailMessage, IngestError> {
    let message = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| IngestError::MalformedEmail("no headers or body found".into()))?;

    let subject = message
        .subject()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string();

    let sender = message
        .from()
        .and_then(|from| from.first())
        .and_then(format_addr)
        .unwrap_or_else(|| DEFAULT_SENDER.to_string());

    let body = message
        .body_text(0)
        .filter(|b| !b.is_empty())
        .or_else(|| message.body_html(0).filter(|b| !b.is_empty()))
        .map(Cow::into_owned)
        .unwrap_or_else(|| content.into_owned());

    tracing::debug!(
        subject = %subject,
        sender = %sender,
        body_len = body.len(),
        "parsed eml upload"
    );

    Ok(EmailMessage {
        subject,
        sender,
        body,
    })
}

/// `Name <address>` when both are present, otherwise whichever one is.
fn format_addr(addr: &Addr<'_>) -> Option<String> {
    let name = addr.name().map(str::trim).filter(|n| !n.is_empty());
    let address = addr.address().map(str::trim).filter(|a| !a.is_empty());
    match (name, address) {
        (Some(name), Some(address)) => Some(format!("{name} <{address}>")),
        (None, Some(address)) => Some(address.to_string()),
        (Some(name), None) => Some(name.to_string()),
        (None, None) => None,
    }
}
