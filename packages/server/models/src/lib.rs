#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the conflict map server.
//!
//! Every JSON response carries a `success` flag. Event lists are passed
//! through exactly as the upstream returned them.
//!
//! Numeric query parameters are accepted as strings and parsed leniently:
//! a malformed `year` or `limit` is ignored rather than rejected.

use std::collections::BTreeMap;

use conflict_map_analytics::TypeFilter;
use conflict_map_analytics_models::TypeSummary;
use conflict_map_event_models::{ConflictEvent, ViolenceType};
use conflict_map_markers::{FitBoundsRequest, MapMarker};
use serde::{Deserialize, Serialize};

/// Example shown when the range endpoint is called without both bounds.
pub const RANGE_EXAMPLE: &str = "/api/mexico/rango?startYear=2020&endYear=2023";

/// Example shown when the coordinate endpoint is called without both
/// coordinates.
pub const COORDINATE_EXAMPLE: &str = "/api/geo/estado?lat=19.4326&lon=-99.1332";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceInfo {
    /// Service name.
    pub message: String,
    /// Upstream data provider.
    pub api: String,
    /// Access notes.
    pub info: String,
    /// Country the data is scoped to.
    pub country: String,
    /// Endpoint path to description.
    pub endpoints: BTreeMap<String, String>,
}

/// Successful event list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventsResponse {
    /// Always `true`.
    pub success: bool,
    /// Upstream records, unmodified.
    pub data: Vec<ConflictEvent>,
    /// Total matching records upstream.
    pub count: u64,
    /// Next upstream page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

/// Generic successful response wrapping `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData<T> {
    /// Always `true`.
    pub success: bool,
    /// Payload.
    pub data: T,
}

impl<T> ApiData<T> {
    /// Wraps `data` in a successful response.
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure response for upstream or internal errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// What the server was trying to do.
    pub error: String,
    /// Underlying error message.
    pub details: String,
}

impl ApiErrorResponse {
    /// Builds a failure response.
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: details.into(),
        }
    }
}

/// Failure response for invalid query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBadRequest {
    /// Always `false`.
    pub success: bool,
    /// What is missing or malformed.
    pub error: String,
    /// Example of a valid request.
    pub example: String,
}

impl ApiBadRequest {
    /// Builds a bad-request response.
    pub fn new(error: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            example: example.into(),
        }
    }
}

/// Summary of the filtered events for one year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    /// Year queried, if any.
    pub year: Option<i32>,
    /// Active type filter.
    pub filter: TypeFilter,
    /// Events returned upstream.
    pub total_events: usize,
    /// Events passing the filter.
    pub shown_events: usize,
    /// `"N of M events"` line.
    pub count_summary: String,
    /// Per-type counts and deaths over the filtered events.
    pub by_type: BTreeMap<ViolenceType, TypeSummary>,
    /// Markers for the filtered events.
    pub markers: Vec<MapMarker>,
    /// Viewport covering the markers.
    pub bounds: Option<FitBoundsRequest>,
}

/// Query parameters for `GET /api/mexico/eventos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQueryParams {
    /// Calendar year.
    pub year: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

impl EventsQueryParams {
    /// Parsed year, ignoring malformed values.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_int(self.year.as_deref())
    }

    /// Parsed limit, ignoring malformed values.
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

/// Query parameters for `GET /api/mexico/recientes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitQueryParams {
    /// Page size.
    pub limit: Option<String>,
}

impl LimitQueryParams {
    /// Parsed limit, ignoring malformed values.
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

/// Query parameters for `GET /api/mexico/rango`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQueryParams {
    /// First year of the range.
    pub start_year: Option<String>,
    /// Last year of the range.
    pub end_year: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

impl RangeQueryParams {
    /// Both bounds, or `None` if either is missing or not an integer.
    #[must_use]
    pub fn bounds(&self) -> Option<(i32, i32)> {
        Some((
            parse_int(self.start_year.as_deref())?,
            parse_int(self.end_year.as_deref())?,
        ))
    }

    /// Parsed limit, ignoring malformed values.
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

/// Query parameters for `GET /api/mexico/resumen`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQueryParams {
    /// Calendar year.
    pub year: Option<String>,
    /// Comma-separated violence type keys.
    pub types: Option<String>,
}

impl SummaryQueryParams {
    /// Parsed year, ignoring malformed values.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_int(self.year.as_deref())
    }

    /// Parsed type filter; unknown keys are skipped.
    #[must_use]
    pub fn filter(&self) -> TypeFilter {
        self.types
            .as_deref()
            .map(TypeFilter::parse_list)
            .unwrap_or_default()
    }
}

/// Query parameters for `GET /api/mexico/estados/{name}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionQueryParams {
    /// Calendar year.
    pub year: Option<String>,
}

impl RegionQueryParams {
    /// Parsed year, ignoring malformed values.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_int(self.year.as_deref())
    }
}

/// Query parameters for `GET /api/geo/estado`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateQueryParams {
    /// Latitude.
    pub lat: Option<String>,
    /// Longitude.
    pub lon: Option<String>,
}

impl CoordinateQueryParams {
    /// Both coordinates, or `None` if either is missing or not a number.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let parse = |v: Option<&str>| v?.trim().parse::<f64>().ok();
        Some((parse(self.lat.as_deref())?, parse(self.lon.as_deref())?))
    }
}

fn parse_int<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_numbers_are_ignored() {
        let params = EventsQueryParams {
            year: Some("twenty".to_string()),
            limit: Some(" 50 ".to_string()),
        };
        assert_eq!(params.year(), None);
        assert_eq!(params.limit(), Some(50));
    }

    #[test]
    fn range_requires_both_integer_bounds() {
        let mut params = RangeQueryParams {
            start_year: Some("2020".to_string()),
            end_year: None,
            limit: None,
        };
        assert!(params.bounds().is_none());
        params.end_year = Some("abc".to_string());
        assert!(params.bounds().is_none());
        params.end_year = Some("2023".to_string());
        assert_eq!(params.bounds(), Some((2020, 2023)));
    }

    #[test]
    fn summary_filter_parses_type_list() {
        let params = SummaryQueryParams {
            year: None,
            types: Some("one-sided,non-state,bogus".to_string()),
        };
        let filter = params.filter();
        assert_eq!(filter.len(), 2);
        assert!(filter.contains(&ViolenceType::OneSided));
        assert!(SummaryQueryParams::default().filter().is_empty());
    }

    #[test]
    fn coordinates_parse() {
        let params = CoordinateQueryParams {
            lat: Some("19.43".to_string()),
            lon: Some("-99.13".to_string()),
        };
        assert_eq!(params.coordinates(), Some((19.43, -99.13)));
        assert!(CoordinateQueryParams::default().coordinates().is_none());
    }

    #[test]
    fn error_envelopes_serialize() {
        let json = serde_json::to_value(ApiErrorResponse::new("failed", "timeout")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["details"], "timeout");

        let json = serde_json::to_value(ApiBadRequest::new("missing", RANGE_EXAMPLE)).unwrap();
        assert_eq!(json["example"], RANGE_EXAMPLE);
    }

    #[test]
    fn events_response_omits_missing_next_page() {
        let response = ApiEventsResponse {
            success: true,
            data: Vec::new(),
            count: 0,
            next_page: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("nextPage").is_none());
        assert_eq!(json["count"], 0);
    }
}
