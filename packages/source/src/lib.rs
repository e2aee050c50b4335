#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Conflict event source trait and the UCDP GED client.
//!
//! Callers depend on the [`EventSource`] trait so the HTTP surface and
//! view session can be exercised against in-memory sources. The only
//! production implementation is [`ucdp::UcdpClient`], which issues a
//! single capped request per query; there is no pagination or retry.

pub mod config;
pub mod query;
pub mod ucdp;

use async_trait::async_trait;
use conflict_map_event_models::ConflictEvent;

pub use config::UcdpConfig;
pub use query::{DEFAULT_LIMIT, EventQuery, MAX_LIMIT, QueryWindow, clamp_limit};
pub use ucdp::UcdpClient;

/// Errors that can occur while fetching events.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream returned a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

/// One page of events as returned upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPage {
    /// Event records in upstream order.
    pub events: Vec<ConflictEvent>,
    /// Total number of matching records upstream (may exceed
    /// `events.len()`).
    pub total_count: u64,
    /// URL of the next page, if any. Never followed.
    pub next_page: Option<String>,
}

/// A provider of conflict events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Human-readable name of the upstream.
    fn name(&self) -> &str;

    /// Fetches one page of events matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, upstream responds
    /// with a non-success status or the body cannot be parsed.
    async fn fetch(&self, query: &EventQuery) -> Result<EventPage, SourceError>;
}
