//! HTTP handler functions for the conflict map API.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use conflict_map_analytics::{aggregate_by_type, apply_filter};
use conflict_map_geocoder::{ResolutionView, summary_for_region};
use conflict_map_markers::{RegionPanel, build_markers, count_summary, fit_bounds};
use conflict_map_region_models::{AdministrativeRegion, all, find};
use conflict_map_server_models::{
    ApiBadRequest, ApiData, ApiErrorResponse, ApiEventsResponse, ApiHealth, ApiServiceInfo,
    ApiSummary, COORDINATE_EXAMPLE, CoordinateQueryParams, EventsQueryParams, LimitQueryParams,
    RANGE_EXAMPLE, RangeQueryParams, RegionQueryParams, SummaryQueryParams,
};
use conflict_map_source::{EventPage, EventQuery, SourceError};

use crate::AppState;

/// `GET /`
///
/// Describes the service and lists the proxy endpoints.
pub async fn index() -> HttpResponse {
    let endpoints: BTreeMap<String, String> = [
        (
            "/api/mexico/eventos",
            "GET - Events in Mexico (?year=YYYY&limit=N optional)",
        ),
        (
            "/api/mexico/recientes",
            "GET - Events from the most recent complete year (?limit=N optional)",
        ),
        (
            "/api/mexico/rango",
            "GET - Events in a year range (?startYear=YYYY&endYear=YYYY)",
        ),
        (
            "/api/mexico/resumen",
            "GET - Per-type summary and markers (?year=YYYY&types=a,b optional)",
        ),
        ("/api/mexico/estados", "GET - Mexican state reference table"),
        (
            "/api/mexico/estados/{name}",
            "GET - State statistics and encyclopedia summary (?year=YYYY optional)",
        ),
        (
            "/api/geo/estado",
            "GET - State containing a coordinate pair (?lat=..&lon=..)",
        ),
    ]
    .into_iter()
    .map(|(path, description)| (path.to_string(), description.to_string()))
    .collect();

    HttpResponse::Ok().json(ApiServiceInfo {
        message: "Conflict Map - Mexico".to_string(),
        api: "UCDP (Uppsala Conflict Data Program)".to_string(),
        info: "Public API, no authentication required".to_string(),
        country: "Mexico".to_string(),
        endpoints,
    })
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/mexico/eventos`
///
/// Events for an optional year.
pub async fn events(
    state: web::Data<AppState>,
    params: web::Query<EventsQueryParams>,
) -> HttpResponse {
    let query = EventQuery::events(params.year(), params.limit());
    proxy_events(&state, &query, "Failed to fetch events for Mexico").await
}

/// `GET /api/mexico/recientes`
///
/// Events from the previous calendar year.
pub async fn recent_events(
    state: web::Data<AppState>,
    params: web::Query<LimitQueryParams>,
) -> HttpResponse {
    let query = EventQuery::recent(params.limit());
    proxy_events(&state, &query, "Failed to fetch recent events").await
}

/// `GET /api/mexico/rango`
///
/// Events between `startYear` and `endYear` inclusive. Both are required.
pub async fn events_in_range(
    state: web::Data<AppState>,
    params: web::Query<RangeQueryParams>,
) -> HttpResponse {
    let Some((start, end)) = params.bounds() else {
        return HttpResponse::BadRequest().json(ApiBadRequest::new(
            "The startYear and endYear parameters are required integers",
            RANGE_EXAMPLE,
        ));
    };

    let query = EventQuery::range(start, end, params.limit());
    proxy_events(&state, &query, "Failed to fetch events for range").await
}

/// `GET /api/mexico/resumen`
///
/// Per-type totals, markers and fit bounds for the events of a year,
/// restricted to the `types` filter when given.
pub async fn summary(
    state: web::Data<AppState>,
    params: web::Query<SummaryQueryParams>,
) -> HttpResponse {
    let query = EventQuery::events(params.year(), None);
    let page = match fetch(&state, &query).await {
        Ok(page) => page,
        Err(e) => return upstream_error("Failed to build summary", &e),
    };

    let filter = params.filter();
    let filtered = apply_filter(&page.events, &filter);

    HttpResponse::Ok().json(ApiData::new(ApiSummary {
        year: query.year(),
        total_events: page.events.len(),
        shown_events: filtered.len(),
        count_summary: count_summary(filtered.len(), page.events.len(), &filter),
        by_type: aggregate_by_type(filtered.iter().copied()),
        markers: build_markers(filtered.iter().copied()),
        bounds: fit_bounds(filtered.iter().copied()),
        filter,
    }))
}

/// `GET /api/mexico/estados`
///
/// The canonical state table.
pub async fn regions() -> HttpResponse {
    let regions: &[AdministrativeRegion] = all();
    HttpResponse::Ok().json(ApiData::new(regions))
}

/// `GET /api/mexico/estados/{name}`
///
/// Statistics for one state over the events of an optional year, with a
/// best-effort encyclopedia summary.
pub async fn region_panel(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<RegionQueryParams>,
) -> HttpResponse {
    let name = path.into_inner();
    let Some(region) = find(&name) else {
        return HttpResponse::NotFound().json(ApiErrorResponse::new(
            "Unknown region",
            format!("No Mexican state named '{name}'"),
        ));
    };

    let query = EventQuery::events(params.year(), None);
    let page = match fetch(&state, &query).await {
        Ok(page) => page,
        Err(e) => return upstream_error("Failed to build region panel", &e),
    };

    let encyclopedia = summary_for_region(state.encyclopedia.as_ref(), region).await;
    HttpResponse::Ok().json(ApiData::new(RegionPanel::build(
        region,
        &page.events,
        encyclopedia,
    )))
}

/// `GET /api/geo/estado`
///
/// Resolves a coordinate pair to a state. Lookup failures resolve to
/// `{"resolved": false}` rather than an error.
pub async fn resolve_coordinates(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    let Some((latitude, longitude)) = params.coordinates() else {
        return HttpResponse::BadRequest().json(ApiBadRequest::new(
            "The lat and lon parameters are required numbers",
            COORDINATE_EXAMPLE,
        ));
    };

    let resolution = state.resolver.resolve(latitude, longitude).await;
    HttpResponse::Ok().json(ApiData::new(ResolutionView::from(resolution)))
}

async fn fetch(state: &AppState, query: &EventQuery) -> Result<EventPage, SourceError> {
    state.source.fetch(query).await
}

async fn proxy_events(state: &AppState, query: &EventQuery, error: &str) -> HttpResponse {
    match fetch(state, query).await {
        Ok(page) => HttpResponse::Ok().json(ApiEventsResponse {
            success: true,
            count: page.total_count,
            data: page.events,
            next_page: page.next_page,
        }),
        Err(e) => upstream_error(error, &e),
    }
}

fn upstream_error(error: &str, e: &SourceError) -> HttpResponse {
    log::error!("{error}: {e}");
    HttpResponse::InternalServerError().json(ApiErrorResponse::new(error, e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::{App, test};
    use async_trait::async_trait;
    use conflict_map_event_models::ConflictEvent;
    use conflict_map_geocoder::{
        EncyclopediaLookup, GeocodeError, ReverseGeocodeResult, ReverseGeocoder,
    };
    use conflict_map_region_models::EncyclopediaSummary;
    use conflict_map_source::{EventSource, QueryWindow};
    use serde_json::{Value, json};

    use super::*;
    use crate::configure;

    #[derive(Default)]
    struct RecordingSource {
        queries: Mutex<Vec<EventQuery>>,
        fail: bool,
    }

    #[async_trait]
    impl EventSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        async fn fetch(&self, query: &EventQuery) -> Result<EventPage, SourceError> {
            self.queries.lock().unwrap().push(*query);
            if self.fail {
                return Err(SourceError::Status {
                    status: 503,
                    body: "maintenance".to_string(),
                });
            }
            let events = [
                json!({
                    "id": 1, "type_of_violence": 2, "deaths_a": 3, "deaths_b": 2,
                    "side_a": "Cartel A", "side_b": "Cartel B",
                    "where_description": "Acapulco, Guerrero",
                    "latitude": 16.86, "longitude": -99.88
                }),
                json!({
                    "id": 2, "type_of_violence": 3, "deaths_civilians": 1,
                    "admin1": "Sonora", "latitude": 29.07, "longitude": -110.95
                }),
            ]
            .into_iter()
            .map(ConflictEvent::from_value)
            .collect();
            Ok(EventPage {
                events,
                total_count: 2,
                next_page: None,
            })
        }
    }

    struct FixedGeocoder;

    #[async_trait]
    impl ReverseGeocoder for FixedGeocoder {
        async fn reverse(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
            Ok(Some(ReverseGeocodeResult {
                state: Some("Guerrero".to_string()),
                country: Some("México".to_string()),
                display_name: None,
                latitude: None,
                longitude: None,
            }))
        }
    }

    struct FailingEncyclopedia;

    #[async_trait]
    impl EncyclopediaLookup for FailingEncyclopedia {
        async fn summary(&self, _slug: &str) -> Result<Option<EncyclopediaSummary>, GeocodeError> {
            Err(GeocodeError::RateLimited)
        }
    }

    fn state(source: Arc<RecordingSource>) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            source,
            Arc::new(FixedGeocoder),
            Arc::new(FailingEncyclopedia),
        ))
    }

    async fn get_json(source: Arc<RecordingSource>, uri: &str) -> (u16, Value) {
        let app = test::init_service(App::new().app_data(state(source)).configure(configure)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn events_pass_through_upstream_records() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source.clone(), "/api/mexico/eventos?year=2020&limit=5").await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["where_description"], "Acapulco, Guerrero");

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries[0].window, QueryWindow::Year(2020));
        assert_eq!(queries[0].limit, 5);
    }

    #[actix_web::test]
    async fn malformed_year_and_limit_fall_back_to_defaults() {
        let source = Arc::new(RecordingSource::default());
        let (status, _) = get_json(source.clone(), "/api/mexico/eventos?year=abc&limit=xyz").await;
        assert_eq!(status, 200);
        let queries = source.queries.lock().unwrap();
        assert_eq!(queries[0].window, QueryWindow::All);
        assert_eq!(queries[0].limit, 1000);
    }

    #[actix_web::test]
    async fn upstream_failure_returns_error_envelope() {
        let source = Arc::new(RecordingSource {
            fail: true,
            ..RecordingSource::default()
        });
        let (status, body) = get_json(source, "/api/mexico/recientes").await;
        assert_eq!(status, 500);
        assert_eq!(body["success"], false);
        assert!(body["details"].as_str().unwrap().contains("503"));
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn range_requires_both_years() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source.clone(), "/api/mexico/rango?startYear=2020").await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["example"], RANGE_EXAMPLE);
        assert!(source.queries.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn range_queries_whole_years() {
        let source = Arc::new(RecordingSource::default());
        let (status, _) =
            get_json(source.clone(), "/api/mexico/rango?startYear=2020&endYear=2023").await;
        assert_eq!(status, 200);
        let queries = source.queries.lock().unwrap();
        assert_eq!(
            queries[0].window,
            QueryWindow::Range {
                start: 2020,
                end: 2023
            }
        );
    }

    #[actix_web::test]
    async fn summary_applies_type_filter() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source, "/api/mexico/resumen?year=2020&types=non-state").await;
        assert_eq!(status, 200);
        let data = &body["data"];
        assert_eq!(data["totalEvents"], 2);
        assert_eq!(data["shownEvents"], 1);
        assert_eq!(data["countSummary"], "1 of 2 events (filtered)");
        assert_eq!(data["byType"]["non-state"]["totalDeaths"], 5);
        assert_eq!(data["markers"][0]["color"], "orange");
        assert_eq!(data["bounds"]["maxZoom"], 10);
    }

    #[actix_web::test]
    async fn region_panel_survives_encyclopedia_failure() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source, "/api/mexico/estados/Guerrero?year=2020").await;
        assert_eq!(status, 200);
        let data = &body["data"];
        assert_eq!(data["statistics"]["eventCount"], 1);
        assert_eq!(data["statistics"]["totalDeaths"], 5);
        assert!(data["encyclopedia"].is_null());
        assert_eq!(data["region"]["capital"], "Chilpancingo de los Bravo");
    }

    #[actix_web::test]
    async fn unknown_region_is_not_found() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source.clone(), "/api/mexico/estados/Atlantis").await;
        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        assert!(source.queries.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn regions_lists_all_states() {
        let (status, body) =
            get_json(Arc::new(RecordingSource::default()), "/api/mexico/estados").await;
        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 32);
    }

    #[actix_web::test]
    async fn resolves_coordinates_to_state() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source.clone(), "/api/geo/estado?lat=16.86&lon=-99.88").await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["resolved"], true);
        assert_eq!(body["data"]["name"], "Guerrero");

        let (status, body) = get_json(source, "/api/geo/estado?lat=16.86").await;
        assert_eq!(status, 400);
        assert_eq!(body["example"], COORDINATE_EXAMPLE);
    }

    #[actix_web::test]
    async fn index_and_health() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = get_json(source.clone(), "/").await;
        assert_eq!(status, 200);
        assert!(body["endpoints"]["/api/mexico/rango"].is_string());

        let (status, body) = get_json(source, "/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["healthy"], true);
    }
}
