//! phishnet server - HTTP inference endpoint for the phishing classifiers
//!
//! Loads the embedding table, scaler and both classifiers once at startup
//! and serves predictions over a small REST API.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /predict` - classify `{ "body": "<email text>" }`
//! - `POST /analyse` - report for a raw upload (`?filename=x.eml` or
//!   `Content-Type: message/rfc822` for MIME parsing)
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with loaded model shape
//! - `GET /metrics` - Prometheus metrics
//!
//! # Configuration
//!
//! Read from an optional `server.{toml,yaml,json}` file and
//! `PHISHNET_SERVER__*` environment variables, e.g.
//! `PHISHNET_SERVER__PORT=9000` or
//! `PHISHNET_SERVER__ARTIFACT_DIR=/srv/models`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
