//! Region side panel state.

use conflict_map_event_models::ConflictEvent;
use conflict_map_geocoder::RegionResolution;
use conflict_map_markers::RegionPanel;
use conflict_map_region_models::{AdministrativeRegion, EncyclopediaSummary};
use serde::Serialize;

use crate::fetch::{FetchState, RequestToken};

/// Region lookup the caller must perform after opening a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionLookup {
    /// Token to hand back to `finish_region_lookup`.
    pub token: RequestToken,
    /// Latitude of the panel's anchor event.
    pub latitude: f64,
    /// Longitude of the panel's anchor event.
    pub longitude: f64,
}

/// Encyclopedia lookup the caller must perform once a region resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncyclopediaRequest {
    /// Token to hand back to `finish_encyclopedia`.
    pub token: RequestToken,
    /// Region whose summary to fetch.
    pub region: &'static AdministrativeRegion,
}

/// An open region panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    /// Location text the panel was opened for.
    pub location: String,
    /// Event matching the location, if any.
    pub anchor: Option<ConflictEvent>,
    /// Region lookup for the anchor's coordinates.
    pub region: FetchState<RegionResolution>,
    /// Encyclopedia summary for the resolved region.
    pub encyclopedia: FetchState<Option<EncyclopediaSummary>>,
}

impl PanelState {
    /// Creates a panel for `location`, anchored at `anchor`.
    #[must_use]
    pub const fn new(
        location: String,
        anchor: Option<ConflictEvent>,
        region: FetchState<RegionResolution>,
    ) -> Self {
        Self {
            location,
            anchor,
            region,
            encyclopedia: FetchState::Idle,
        }
    }
}

/// Renderable snapshot of the open panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    /// Location text the panel was opened for.
    pub location: String,
    /// Whether the region lookup is still in flight.
    pub resolving_region: bool,
    /// Resolved region name (canonical or as spelled by the provider).
    pub region_name: Option<String>,
    /// Whether the encyclopedia lookup is still in flight.
    pub loading_encyclopedia: bool,
    /// Statistics and encyclopedia content, once a canonical region is
    /// known.
    pub details: Option<RegionPanel>,
}

/// Finds the event a panel location refers to: the first event whose
/// `where_description` equals, contains or is contained in `location`.
#[must_use]
pub fn find_event<'a>(events: &'a [ConflictEvent], location: &str) -> Option<&'a ConflictEvent> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    events.iter().find(|e| {
        e.text("where_description").is_some_and(|description| {
            description == location
                || description.contains(location)
                || location.contains(description.as_str())
        })
    })
}
