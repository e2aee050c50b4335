//! Compile-time registry of lookup service configurations.
//!
//! Each external lookup service is defined in a TOML file under
//! `services/`. The registry embeds these at compile time and exposes them
//! via [`all_services`] and [`service`]. A service's base URL can be
//! overridden at runtime with `<ID>_BASE_URL` (e.g. `NOMINATIM_BASE_URL`).

use std::time::Duration;

use serde::Deserialize;

/// A lookup service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupService {
    /// Unique identifier (e.g., `"nominatim"`, `"wikipedia"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether lookups against this service are attempted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Nominatim reverse geocoding endpoint.
    NominatimReverse {
        /// Endpoint URL (e.g., `"https://nominatim.openstreetmap.org/reverse"`).
        base_url: String,
        /// `User-Agent` header sent with every request.
        user_agent: String,
        /// Address detail level (6 = state).
        zoom: u8,
    },
    /// Wikipedia REST page summary endpoint.
    WikipediaSummary {
        /// Endpoint URL without the trailing page slug.
        base_url: String,
        /// `User-Agent` header sent with every request.
        user_agent: String,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    10
}

impl LookupService {
    /// The configured base URL, or the `<ID>_BASE_URL` environment
    /// override when set.
    #[must_use]
    pub fn base_url(&self) -> String {
        let var = format!("{}_BASE_URL", self.id.to_ascii_uppercase());
        std::env::var(&var).unwrap_or_else(|_| self.configured_base_url().to_string())
    }

    /// The base URL from the embedded TOML.
    #[must_use]
    pub fn configured_base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::NominatimReverse { base_url, .. }
            | ProviderConfig::WikipediaSummary { base_url, .. } => base_url,
        }
    }

    /// The `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        match &self.provider {
            ProviderConfig::NominatimReverse { user_agent, .. }
            | ProviderConfig::WikipediaSummary { user_agent, .. } => user_agent,
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds an HTTP client with this service's `User-Agent` and timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the TLS backend cannot be
    /// initialised.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(self.user_agent())
            .timeout(self.timeout())
            .build()
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("nominatim", include_str!("../services/nominatim.toml")),
    ("wikipedia", include_str!("../services/wikipedia.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all lookup service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<LookupService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse lookup service '{name}': {e}"))
        })
        .collect()
}

/// Returns the service with the given id, if it exists.
#[must_use]
pub fn service(id: &str) -> Option<LookupService> {
    all_services().into_iter().find(|s| s.id == id)
}
