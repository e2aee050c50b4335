//! Nominatim / OpenStreetMap reverse geocoder client.
//!
//! Resolves a coordinate pair to the address that contains it. Only the
//! state-level fields are used. The public instance allows at most
//! **1 request per second**; callers issue one lookup per panel open, well
//! under that limit.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use async_trait::async_trait;

use crate::service_registry::{LookupService, ProviderConfig};
use crate::{GeocodeError, ReverseGeocodeResult, ReverseGeocoder};

/// Reverse geocoder backed by a Nominatim endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    zoom: u8,
}

impl NominatimClient {
    /// Creates a client for `base_url` using an already-configured HTTP
    /// client (which must carry an identifying `User-Agent`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, zoom: u8) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            zoom,
        }
    }

    /// Creates a client from a registry entry.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if `service` is not a Nominatim
    /// reverse service, or [`GeocodeError::Http`] if the HTTP client cannot
    /// be built.
    pub fn from_service(service: &LookupService) -> Result<Self, GeocodeError> {
        let ProviderConfig::NominatimReverse { zoom, .. } = service.provider else {
            return Err(GeocodeError::Config {
                message: format!("service '{}' is not a Nominatim reverse service", service.id),
            });
        };
        Ok(Self::new(service.http_client()?, service.base_url(), zoom))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
        log::debug!("Nominatim reverse lookup for ({latitude}, {longitude})");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", self.zoom.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Nominatim `jsonv2` reverse response.
///
/// A body carrying an `error` field (e.g. coordinates over the ocean) is
/// a valid "nothing here" answer and yields `Ok(None)`.
fn parse_response(body: &serde_json::Value) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
    if !body.is_object() {
        return Err(GeocodeError::Parse {
            message: "Nominatim response is not an object".to_string(),
        });
    }
    if body.get("error").is_some() {
        return Ok(None);
    }

    let text = |v: &serde_json::Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    let degrees = |v: &serde_json::Value| {
        v.as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .or_else(|| v.as_f64())
    };

    let address = &body["address"];
    Ok(Some(ReverseGeocodeResult {
        state: text(&address["state"]),
        country: text(&address["country"]),
        display_name: text(&body["display_name"]),
        latitude: degrees(&body["lat"]),
        longitude: degrees(&body["lon"]),
    }))
}
