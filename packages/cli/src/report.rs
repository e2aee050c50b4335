//! Plain-text reports printed by the CLI.

use std::fmt::Write as _;

use conflict_map_analytics::{TypeFilter, aggregate_by_type, apply_filter};
use conflict_map_analytics_models::RegionAggregate;
use conflict_map_event_models::ConflictEvent;
use conflict_map_markers::{build_markers, count_summary};
use conflict_map_region_models::AdministrativeRegion;

/// Per-type breakdown of `events` after applying `filter`.
pub fn type_summary(events: &[ConflictEvent], filter: &TypeFilter) -> String {
    let filtered = apply_filter(events, filter);
    let mapped = build_markers(filtered.iter().copied()).len();
    let mut out = String::new();

    let _ = writeln!(out, "{}", count_summary(filtered.len(), events.len(), filter));
    let _ = writeln!(out, "{mapped} with coordinates");
    let _ = writeln!(out);
    for (violence_type, summary) in aggregate_by_type(filtered.iter().copied()) {
        let _ = writeln!(
            out,
            "  {:<24} {:>6} events {:>8} deaths",
            violence_type.display_name(),
            summary.count,
            summary.total_deaths
        );
    }
    out
}

/// Statistics block for one region.
pub fn region_report(region: &AdministrativeRegion, aggregate: &RegionAggregate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (capital: {})", region.name, region.capital);
    let _ = writeln!(out, "Population: {}", region.population);
    let _ = writeln!(out, "{}", region.wikipedia_url());
    let _ = writeln!(out);

    if aggregate.is_empty() {
        let _ = writeln!(out, "No events recorded for this region.");
        return out;
    }

    let _ = writeln!(out, "Events: {}", aggregate.event_count);
    let _ = writeln!(out, "Deaths: {}", aggregate.total_deaths);
    let c = &aggregate.casualties;
    let _ = writeln!(
        out,
        "  side A {} / side B {} / civilians {} / unknown {}",
        c.side_a, c.side_b, c.civilians, c.unknown
    );

    let _ = writeln!(out, "By type:");
    for (violence_type, summary) in &aggregate.by_type {
        let _ = writeln!(
            out,
            "  {:<24} {:>6} events {:>8} deaths",
            violence_type.display_name(),
            summary.count,
            summary.total_deaths
        );
    }

    if !aggregate.top_actors.is_empty() {
        let _ = writeln!(out, "Top actors:");
        for actor in &aggregate.top_actors {
            let _ = writeln!(out, "  {:<40} {:>4}", actor.name, actor.event_count);
        }
    }
    out
}

/// Table of every canonical region.
pub fn region_table(regions: &[AdministrativeRegion]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<22} {:<28} {:>12}", "State", "Capital", "Population");
    for region in regions {
        let _ = writeln!(
            out,
            "{:<22} {:<28} {:>12}",
            region.name, region.capital, region.population
        );
    }
    out
}
