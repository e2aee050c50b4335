#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the conflict map application.
//!
//! Proxies the UCDP GED API for events in Mexico and serves the derived
//! views (per-type summaries, markers, region panels, coordinate-to-state
//! resolution) on top of it. Collaborators are injected through
//! [`AppState`] as trait objects so handlers can be tested against
//! in-memory sources.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use async_trait::async_trait;
use conflict_map_geocoder::service_registry::{self, LookupService};
use conflict_map_geocoder::{
    EncyclopediaLookup, GeocodeError, NominatimClient, RegionResolver, ReverseGeocodeResult,
    ReverseGeocoder, WikipediaClient,
};
use conflict_map_region_models::EncyclopediaSummary;
use conflict_map_source::{EventSource, SourceError, UcdpClient};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Errors that can occur while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Upstream client could not be configured.
    #[error("Event source error: {0}")]
    Source(#[from] SourceError),

    /// Lookup client could not be configured.
    #[error("Lookup service error: {0}")]
    Geocode(#[from] GeocodeError),

    /// A required service definition is missing.
    #[error("Lookup service '{id}' is not defined")]
    MissingService {
        /// Service id.
        id: String,
    },
}

/// Shared application state.
pub struct AppState {
    /// Upstream conflict event source.
    pub source: Arc<dyn EventSource>,
    /// Coordinate-to-region resolver (memoized for the server lifetime).
    pub resolver: Arc<RegionResolver>,
    /// Encyclopedia summaries for region panels.
    pub encyclopedia: Arc<dyn EncyclopediaLookup>,
}

impl AppState {
    /// Assembles the state from explicit collaborators.
    #[must_use]
    pub fn new(
        source: Arc<dyn EventSource>,
        geocoder: Arc<dyn ReverseGeocoder>,
        encyclopedia: Arc<dyn EncyclopediaLookup>,
    ) -> Self {
        Self {
            source,
            resolver: Arc::new(RegionResolver::new(geocoder)),
            encyclopedia,
        }
    }

    /// Assembles the production state from the embedded service configs
    /// and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if a service is missing or a client cannot
    /// be built.
    pub fn from_env() -> Result<Self, ServerError> {
        let source = UcdpClient::from_env()?;
        let config = source.config();
        log::info!(
            "Event source: {} ({}) for {}, up to {} events per request",
            source.name(),
            config.events_url(),
            config.country_name,
            config.max_page_size
        );

        let nominatim = required_service("nominatim")?;
        let geocoder: Arc<dyn ReverseGeocoder> = if nominatim.enabled {
            Arc::new(NominatimClient::from_service(&nominatim)?)
        } else {
            log::warn!("Reverse geocoding is disabled; regions will not resolve");
            Arc::new(DisabledLookup)
        };

        let wikipedia = required_service("wikipedia")?;
        let encyclopedia: Arc<dyn EncyclopediaLookup> = if wikipedia.enabled {
            Arc::new(WikipediaClient::from_service(&wikipedia)?)
        } else {
            log::warn!("Encyclopedia lookups are disabled");
            Arc::new(DisabledLookup)
        };

        Ok(Self::new(Arc::new(source), geocoder, encyclopedia))
    }
}

fn required_service(id: &str) -> Result<LookupService, ServerError> {
    service_registry::service(id).ok_or_else(|| ServerError::MissingService { id: id.to_string() })
}

/// Stand-in for a lookup service turned off in its config: every lookup
/// finds nothing.
struct DisabledLookup;

#[async_trait]
impl ReverseGeocoder for DisabledLookup {
    async fn reverse(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
        Ok(None)
    }
}

#[async_trait]
impl EncyclopediaLookup for DisabledLookup {
    async fn summary(&self, _slug: &str) -> Result<Option<EncyclopediaSummary>, GeocodeError> {
        Ok(None)
    }
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/mexico/eventos", web::get().to(handlers::events))
            .route("/mexico/recientes", web::get().to(handlers::recent_events))
            .route("/mexico/rango", web::get().to(handlers::events_in_range))
            .route("/mexico/resumen", web::get().to(handlers::summary))
            .route("/mexico/estados", web::get().to(handlers::regions))
            .route("/mexico/estados/{name}", web::get().to(handlers::region_panel))
            .route("/geo/estado", web::get().to(handlers::resolve_coordinates)),
    );
}

/// Starts the conflict map API server.
///
/// Builds the upstream and lookup clients from the embedded configs and
/// starts the Actix-Web HTTP server on `BIND_ADDR`:`PORT`. This is a
/// regular async function: the caller is responsible for providing the
/// async runtime (e.g. via `#[actix_web::main]`) and for initialising
/// logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if a client cannot be configured,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_env().map_err(std::io::Error::other)?);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
