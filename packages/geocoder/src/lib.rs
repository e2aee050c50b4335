#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate-to-region resolution and region enrichment lookups.
//!
//! Two external services are used, both configured via TOML files in
//! `services/`:
//!
//! 1. **Nominatim / OpenStreetMap** reverse geocoding: maps a coordinate
//!    pair to the state that contains it. Results are normalized against
//!    the canonical region table by [`resolver::RegionResolver`].
//! 2. **Wikipedia REST summaries**: a short encyclopedia extract shown in
//!    the region panel.
//!
//! Both lookups are enrichment only. The resolver and
//! [`wikipedia::summary_for_region`] swallow failures and log them, so a
//! provider outage never breaks the data path.

pub mod nominatim;
pub mod resolver;
pub mod service_registry;
pub mod wikipedia;

use async_trait::async_trait;
use conflict_map_region_models::EncyclopediaSummary;
use thiserror::Error;

pub use nominatim::NominatimClient;
pub use resolver::{
    DEFAULT_MEMO_CAPACITY, RegionResolution, RegionResolver, ResolutionView, normalize_state,
};
pub use wikipedia::{WikipediaClient, summary_for_region};

/// Address fields returned by a reverse geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocodeResult {
    /// State (first-level administrative division) name as spelled by the
    /// provider.
    pub state: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// Full formatted address.
    pub display_name: Option<String>,
    /// Latitude of the matched feature.
    pub latitude: Option<f64>,
    /// Longitude of the matched feature.
    pub longitude: Option<f64>,
}

/// Maps coordinates to an address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Looks up the address containing `(latitude, longitude)`.
    ///
    /// `Ok(None)` means the provider answered but found nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] on transport failure, non-success status
    /// or an unparseable body.
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError>;
}

/// Fetches encyclopedia summaries by page slug.
#[async_trait]
pub trait EncyclopediaLookup: Send + Sync {
    /// Fetches the summary for `slug`. `Ok(None)` when the page does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] on transport failure, non-success status
    /// or an unparseable body.
    async fn summary(&self, slug: &str) -> Result<Option<EncyclopediaSummary>, GeocodeError>;
}

/// Errors that can occur during lookups.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a provider response.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// Provider returned a non-success status.
    #[error("Provider returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Provider asked us to slow down.
    #[error("Rate limited by provider")]
    RateLimited,

    /// Coordinates are out of range or not finite.
    #[error("Invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Latitude given.
        latitude: f64,
        /// Longitude given.
        longitude: f64,
    },

    /// Service configuration does not fit the client.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the mismatch.
        message: String,
    },
}

/// Validates a coordinate pair before it is sent to a provider.
///
/// `(0, 0)` is rejected along with out-of-range values: upstream records
/// use zero to mean "no coordinates".
///
/// # Errors
///
/// Returns [`GeocodeError::InvalidCoordinates`] if the pair is not
/// finite, out of range or exactly zero.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), GeocodeError> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
        && !(latitude == 0.0 && longitude == 0.0);

    if valid {
        Ok(())
    } else {
        Err(GeocodeError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mexican_coordinates() {
        assert!(validate_coordinates(19.4326, -99.1332).is_ok());
    }

    #[test]
    fn rejects_invalid_coordinates() {
        assert!(validate_coordinates(0.0, 0.0).is_err());
        assert!(validate_coordinates(91.0, -99.0).is_err());
        assert!(validate_coordinates(19.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, -99.0).is_err());
    }
}
