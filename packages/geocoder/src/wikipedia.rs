//! Wikipedia REST page summary client.
//!
//! See <https://es.wikipedia.org/api/rest_v1/#/Page%20content/get_page_summary__title_>

use async_trait::async_trait;
use conflict_map_region_models::{AdministrativeRegion, EncyclopediaSummary};

use crate::service_registry::{LookupService, ProviderConfig};
use crate::{EncyclopediaLookup, GeocodeError};

/// Encyclopedia lookup backed by the Wikipedia REST API.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    /// Creates a client for `base_url` (without trailing slug).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a client from a registry entry.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if `service` is not a Wikipedia
    /// summary service, or [`GeocodeError::Http`] if the HTTP client cannot
    /// be built.
    pub fn from_service(service: &LookupService) -> Result<Self, GeocodeError> {
        if !matches!(service.provider, ProviderConfig::WikipediaSummary { .. }) {
            return Err(GeocodeError::Config {
                message: format!("service '{}' is not a Wikipedia summary service", service.id),
            });
        }
        Ok(Self::new(service.http_client()?, service.base_url()))
    }

    fn page_url(&self, slug: &str) -> String {
        format!("{}/{slug}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EncyclopediaLookup for WikipediaClient {
    async fn summary(&self, slug: &str) -> Result<Option<EncyclopediaSummary>, GeocodeError> {
        let url = self.page_url(slug);
        log::debug!("Fetching encyclopedia summary {url}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_summary(&body).map(Some)
    }
}

/// Fetches the summary for `region`, logging and discarding any failure.
pub async fn summary_for_region(
    lookup: &dyn EncyclopediaLookup,
    region: &AdministrativeRegion,
) -> Option<EncyclopediaSummary> {
    match lookup.summary(region.wikipedia_slug).await {
        Ok(summary) => summary,
        Err(e) => {
            log::warn!("Encyclopedia lookup for {} failed: {e}", region.name);
            None
        }
    }
}

fn parse_summary(body: &serde_json::Value) -> Result<EncyclopediaSummary, GeocodeError> {
    let text = |v: &serde_json::Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let title = text(&body["title"]).ok_or_else(|| GeocodeError::Parse {
        message: "summary has no title".to_string(),
    })?;

    Ok(EncyclopediaSummary {
        title,
        extract: text(&body["extract"]),
        description: text(&body["description"]),
        thumbnail: text(&body["thumbnail"]["source"]),
    })
}
