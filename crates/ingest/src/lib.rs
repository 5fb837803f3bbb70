//! Phishnet email intake.
//!
//! Turns an uploaded email into the text the classifier scores, plus the
//! details a report shows next to the verdict.
//!
//! ## What we do
//!
//! - Parse `.eml` uploads (MIME, via `mail-parser`): subject, sender and the
//!   text body, falling back to the HTML body and then the raw upload
//! - Take any other upload verbatim as the body
//! - Pull out `http(s)://` and `www.` links, deduplicated in order of first
//!   appearance
//!
//! ```rust
//! use ingest::{parse_email, EmailFormat};
//!
//! let email = parse_email(b"verify at www.bank.example", EmailFormat::PlainText).unwrap();
//! assert_eq!(email.sender, ingest::DEFAULT_SENDER);
//! assert_eq!(email.urls(), ["www.bank.example"]);
//! ```

mod email;
mod error;
mod urls;

pub use crate::email::{
    parse_email, EmailFormat, EmailMessage, DEFAULT_SENDER, DEFAULT_SUBJECT,
};
pub use crate::error::IngestError;
pub use crate::urls::extract_urls;
