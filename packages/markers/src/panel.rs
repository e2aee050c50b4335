//! Region side panel and filter bar view-models.

use conflict_map_analytics::{TypeFilter, aggregate_by_region};
use conflict_map_analytics_models::RegionAggregate;
use conflict_map_event_models::{ConflictEvent, ViolenceType};
use conflict_map_region_models::{AdministrativeRegion, EncyclopediaSummary};
use serde::Serialize;

use crate::{MarkerColor, marker_color};

/// One toggle button in the type filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChip {
    /// The type this chip toggles.
    pub violence_type: ViolenceType,
    /// Button label.
    pub label: String,
    /// Highlight color when selected.
    pub color: MarkerColor,
    /// Whether the type is currently selected.
    pub selected: bool,
}

/// Builds the filter bar: one chip per known violence type.
#[must_use]
pub fn filter_chips(filter: &TypeFilter) -> Vec<FilterChip> {
    ViolenceType::KNOWN
        .iter()
        .map(|t| FilterChip {
            violence_type: t.clone(),
            label: t.display_name(),
            color: marker_color(t),
            selected: filter.contains(t),
        })
        .collect()
}

/// `"12 of 40 events (filtered)"`.
#[must_use]
pub fn count_summary(shown: usize, total: usize, filter: &TypeFilter) -> String {
    if filter.is_empty() {
        format!("{shown} of {total} events")
    } else {
        format!("{shown} of {total} events (filtered)")
    }
}

/// One row of the per-type breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRow {
    /// Violence type.
    pub violence_type: ViolenceType,
    /// Display label.
    pub label: String,
    /// Row accent color.
    pub color: MarkerColor,
    /// Number of events.
    pub count: u64,
    /// Deaths across those events.
    pub deaths: u64,
}

/// Everything the region side panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPanel {
    /// Canonical region record.
    pub region: AdministrativeRegion,
    /// Link to the full encyclopedia article.
    pub wikipedia_url: String,
    /// Encyclopedia summary, when the lookup succeeded.
    pub encyclopedia: Option<EncyclopediaSummary>,
    /// Statistics over the region's events.
    pub statistics: RegionAggregate,
    /// Per-type rows ordered by type key.
    pub type_rows: Vec<TypeRow>,
}

impl RegionPanel {
    /// Builds the panel from a precomputed aggregate.
    #[must_use]
    pub fn new(
        region: &AdministrativeRegion,
        statistics: RegionAggregate,
        encyclopedia: Option<EncyclopediaSummary>,
    ) -> Self {
        let type_rows = statistics
            .by_type
            .iter()
            .map(|(t, summary)| TypeRow {
                violence_type: t.clone(),
                label: t.display_name(),
                color: marker_color(t),
                count: summary.count,
                deaths: summary.total_deaths,
            })
            .collect();

        Self {
            region: *region,
            wikipedia_url: region.wikipedia_url(),
            encyclopedia,
            statistics,
            type_rows,
        }
    }

    /// Aggregates `events` for `region` and builds the panel.
    pub fn build<'a, I>(
        region: &AdministrativeRegion,
        events: I,
        encyclopedia: Option<EncyclopediaSummary>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a ConflictEvent>,
    {
        Self::new(region, aggregate_by_region(events, region), encyclopedia)
    }
}
