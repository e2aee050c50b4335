//! Upstream API configuration.
//!
//! The UCDP endpoint definition lives in `services/ucdp.toml` and is
//! embedded at compile time. `UCDP_BASE_URL` overrides the base URL and
//! `UCDP_ACCESS_TOKEN` supplies the optional access token at runtime.

use std::time::Duration;

use serde::Deserialize;

use crate::SourceError;

const UCDP_TOML: &str = include_str!("../services/ucdp.toml");

/// Environment variable overriding [`UcdpConfig::base_url`].
pub const BASE_URL_ENV: &str = "UCDP_BASE_URL";

/// Environment variable holding the optional access token.
pub const ACCESS_TOKEN_ENV: &str = "UCDP_ACCESS_TOKEN";

/// UCDP GED endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UcdpConfig {
    /// Service identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// API root (e.g., `"https://ucdpapi.pcr.uu.se/api"`).
    pub base_url: String,
    /// GED release version (e.g., `"24.1"`).
    pub version: String,
    /// Gleditsch-Ward country code every query is scoped to.
    pub country_code: u32,
    /// Country display name.
    pub country_name: String,
    /// Largest page size the API accepts.
    pub max_page_size: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Access token sent as `x-ucdp-access-token`, if any.
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl UcdpConfig {
    /// The embedded configuration, without environment overrides.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (this is a compile-time
    /// guarantee since the config is embedded).
    #[must_use]
    pub fn embedded() -> Self {
        toml::de::from_str(UCDP_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded UCDP config: {e}"))
    }

    /// The embedded configuration with `UCDP_BASE_URL` and
    /// `UCDP_ACCESS_TOKEN` applied.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if `UCDP_BASE_URL` is set but is not
    /// an http(s) URL.
    pub fn from_env() -> Result<Self, SourceError> {
        let mut config = Self::embedded();

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(SourceError::Config {
                    message: format!("{BASE_URL_ENV} must be an http(s) URL, got '{base_url}'"),
                });
            }
            config.base_url = base_url;
        }

        config.access_token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(config)
    }

    /// Full GED events endpoint URL.
    #[must_use]
    pub fn events_url(&self) -> String {
        format!(
            "{}/gedevents/{}",
            self.base_url.trim_end_matches('/'),
            self.version
        )
    }

    /// `requested` capped to `1..=max_page_size`.
    #[must_use]
    pub fn page_size(&self, requested: u32) -> u32 {
        requested.min(self.max_page_size).max(1)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = UcdpConfig::embedded();
        assert_eq!(config.id, "ucdp");
        assert_eq!(config.country_code, 70);
        assert_eq!(config.max_page_size, 1000);
        assert!(config.access_token.is_none());
        assert!(config.timeout_secs > 0);
    }

    #[test]
    fn page_size_respects_configured_maximum() {
        let mut config = UcdpConfig::embedded();
        assert_eq!(config.page_size(1000), 1000);
        config.max_page_size = 250;
        assert_eq!(config.page_size(1000), 250);
        assert_eq!(config.page_size(40), 40);
        config.max_page_size = 0;
        assert_eq!(config.page_size(40), 1);
    }

    #[test]
    fn events_url_includes_version() {
        let mut config = UcdpConfig::embedded();
        assert_eq!(
            config.events_url(),
            "https://ucdpapi.pcr.uu.se/api/gedevents/24.1"
        );
        config.base_url = "http://localhost:9000/api/".to_string();
        assert_eq!(
            config.events_url(),
            "http://localhost:9000/api/gedevents/24.1"
        );
    }
}
