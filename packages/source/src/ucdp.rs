//! UCDP GED API client.
//!
//! See <https://ucdp.uu.se/apidocs/>

use async_trait::async_trait;
use conflict_map_event_models::ConflictEvent;
use serde::Deserialize;

use crate::config::UcdpConfig;
use crate::{EventPage, EventQuery, EventSource, SourceError};

/// Header carrying the optional access token.
const ACCESS_TOKEN_HEADER: &str = "x-ucdp-access-token";

/// Maximum length of the response body preview included in errors.
const BODY_PREVIEW_LEN: usize = 300;

/// Raw GED response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GedResponse {
    #[serde(default)]
    total_count: Option<u64>,
    #[serde(default)]
    next_page_url: Option<String>,
    #[serde(default)]
    result: Option<Vec<serde_json::Value>>,
}

/// [`EventSource`] backed by the UCDP GED API.
#[derive(Debug, Clone)]
pub struct UcdpClient {
    client: reqwest::Client,
    config: UcdpConfig,
}

impl UcdpClient {
    /// Creates a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: UcdpConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client from the embedded config and environment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the environment overrides are invalid or
    /// the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, SourceError> {
        Self::new(UcdpConfig::from_env()?)
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &UcdpConfig {
        &self.config
    }

    /// Upstream query parameters for `query`, with the page size capped
    /// to the configured maximum.
    #[must_use]
    pub fn request_params(&self, query: &EventQuery) -> Vec<(&'static str, String)> {
        let capped = EventQuery {
            limit: self.config.page_size(query.limit),
            ..*query
        };
        capped.params(self.config.country_code)
    }
}

#[async_trait]
impl EventSource for UcdpClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch(&self, query: &EventQuery) -> Result<EventPage, SourceError> {
        let url = self.config.events_url();
        let params = self.request_params(query);
        log::info!(
            "Requesting UCDP GED events for {} from {url}",
            self.config.country_name
        );
        log::debug!("UCDP query parameters: {params:?}");

        let mut request = self.client.get(&url).query(&params);
        if let Some(token) = &self.config.access_token {
            request = request.header(ACCESS_TOKEN_HEADER, token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            log::error!("UCDP returned HTTP {status}");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let page = parse_response(&body)?;
        log::info!(
            "UCDP returned {} events for {} (total {})",
            page.events.len(),
            self.config.country_name,
            page.total_count
        );
        Ok(page)
    }
}

/// Parses a GED response body.
///
/// A missing or null `Result` is an empty page. A missing `TotalCount`
/// falls back to the number of returned records.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the body is not a GED envelope.
pub fn parse_response(body: &str) -> Result<EventPage, SourceError> {
    let raw: GedResponse = serde_json::from_str(body)?;
    let events: Vec<ConflictEvent> = raw
        .result
        .unwrap_or_default()
        .into_iter()
        .map(ConflictEvent::from_value)
        .collect();
    let total_count = raw
        .total_count
        .unwrap_or_else(|| u64::try_from(events.len()).unwrap_or(u64::MAX));

    Ok(EventPage {
        events,
        total_count,
        next_page: raw.next_page_url.filter(|u| !u.trim().is_empty()),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LEN).collect()
}
