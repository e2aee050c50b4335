#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate result types for conflict event statistics.
//!
//! These are derived values: they are recomputed whenever the event list
//! or the selected region changes and are never persisted.

use std::collections::BTreeMap;

use conflict_map_event_models::{CasualtyBreakdown, ViolenceType};
use serde::{Deserialize, Serialize};

/// Maximum number of actors reported in [`RegionAggregate::top_actors`].
pub const TOP_ACTOR_LIMIT: usize = 5;

/// Event count and death total for one violence type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    /// Number of events.
    pub count: u64,
    /// Sum of total deaths across those events.
    pub total_deaths: u64,
}

impl TypeSummary {
    /// Adds one event with `deaths` total deaths.
    pub const fn record(&mut self, deaths: u64) {
        self.count += 1;
        self.total_deaths = self.total_deaths.saturating_add(deaths);
    }
}

/// Number of events an actor took part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorCount {
    /// Actor name as reported upstream.
    pub name: String,
    /// Events in which the actor appears on either side.
    pub event_count: u64,
}

/// Summary statistics for the events matched to one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    /// Canonical region name.
    pub region: String,
    /// Number of matched events.
    pub event_count: u64,
    /// Sum of total deaths across matched events.
    pub total_deaths: u64,
    /// Breakdown by violence type.
    pub by_type: BTreeMap<ViolenceType, TypeSummary>,
    /// Deaths split by party, with civilian-targeted side B folded into
    /// `civilians`.
    pub casualties: CasualtyBreakdown,
    /// Most frequent actors, at most [`TOP_ACTOR_LIMIT`].
    pub top_actors: Vec<ActorCount>,
    /// Year of the first matched event, when its date parses.
    pub year: Option<i32>,
}

impl RegionAggregate {
    /// Whether no event matched the region.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_summary_records_events() {
        let mut summary = TypeSummary::default();
        summary.record(3);
        summary.record(0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_deaths, 3);
    }

    #[test]
    fn by_type_serializes_with_key_strings() {
        let mut aggregate = RegionAggregate {
            region: "Sinaloa".to_string(),
            ..RegionAggregate::default()
        };
        aggregate
            .by_type
            .entry(ViolenceType::NonState)
            .or_default()
            .record(4);
        let value = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(value["byType"]["non-state"]["totalDeaths"], 4);
        assert_eq!(value["eventCount"], 0);
        assert!(aggregate.is_empty());
    }
}
