//! Per-type and per-region aggregation.

use std::collections::{BTreeMap, HashMap};

use conflict_map_analytics_models::{ActorCount, RegionAggregate, TOP_ACTOR_LIMIT, TypeSummary};
use conflict_map_event_models::{CIVILIANS, ConflictEvent, NOT_AVAILABLE, ViolenceType};
use conflict_map_region_models::AdministrativeRegion;

/// Events whose `where_description`, `region`, `location` or `admin1`
/// text mentions `region`.
pub fn events_in_region<'a, I>(events: I, region: &AdministrativeRegion) -> Vec<&'a ConflictEvent>
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    events
        .into_iter()
        .filter(|e| region.matches_any(&e.region_candidates()))
        .collect()
}

/// Event count and death total per violence type, in a single pass.
pub fn aggregate_by_type<'a, I>(events: I) -> BTreeMap<ViolenceType, TypeSummary>
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    let mut by_type: BTreeMap<ViolenceType, TypeSummary> = BTreeMap::new();
    for event in events {
        by_type
            .entry(event.violence_type())
            .or_default()
            .record(event.total_deaths());
    }
    by_type
}

fn is_countable_actor(name: &str) -> bool {
    !name.is_empty() && name != CIVILIANS && name != NOT_AVAILABLE
}

/// Ranks actors by the number of events they appear in (either side).
///
/// `Civilians`, `N/A` and empty names are ignored. Ties keep the order in
/// which actors were first encountered. At most [`TOP_ACTOR_LIMIT`]
/// entries are returned.
pub fn top_actors<'a, I>(events: I) -> Vec<ActorCount>
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    let mut counts: Vec<ActorCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events {
        for name in [event.side_a(), event.side_b()].into_iter().flatten() {
            if !is_countable_actor(&name) {
                continue;
            }
            if let Some(&i) = index.get(&name) {
                counts[i].event_count += 1;
            } else {
                index.insert(name.clone(), counts.len());
                counts.push(ActorCount {
                    name,
                    event_count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.event_count.cmp(&a.event_count));
    counts.truncate(TOP_ACTOR_LIMIT);
    counts
}

/// Computes the statistics panel for `region` over `events`.
pub fn aggregate_by_region<'a, I>(events: I, region: &AdministrativeRegion) -> RegionAggregate
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    let matched = events_in_region(events, region);
    log::debug!(
        "aggregate_by_region: {} events matched {}",
        matched.len(),
        region.name
    );

    let mut aggregate = RegionAggregate {
        region: region.name.to_string(),
        event_count: matched.len() as u64,
        year: matched.first().and_then(|e| e.year()),
        ..RegionAggregate::default()
    };

    for event in &matched {
        let casualties = event.casualties();
        aggregate.total_deaths = aggregate.total_deaths.saturating_add(casualties.total());
        aggregate.casualties += casualties;
    }
    aggregate.by_type = aggregate_by_type(matched.iter().copied());
    aggregate.top_actors = top_actors(matched.iter().copied());

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use conflict_map_region_models::find;
    use serde_json::{Value, json};

    fn events(values: Vec<Value>) -> Vec<ConflictEvent> {
        values.into_iter().map(ConflictEvent::from_value).collect()
    }

    fn sinaloa_sample() -> Vec<ConflictEvent> {
        events(vec![
            json!({
                "type_of_violence": 2,
                "side_a": "Sinaloa Cartel",
                "side_b": "CJNG",
                "deaths_a": 3, "deaths_b": 2,
                "where_description": "Culiacan, Sinaloa",
                "date_start": "2021-05-01"
            }),
            json!({
                "type_of_violence": 3,
                "side_a": "CJNG",
                "side_b": "Civilians",
                "deaths_b": 4,
                "admin1": "Sinaloa state",
                "date_start": "2021-07-09"
            }),
            json!({
                "type_of_violence": 1,
                "side_a": "Government of Mexico",
                "side_b": "Sinaloa Cartel",
                "deaths_a": 1,
                "region": "SINALOA"
            }),
            json!({
                "type_of_violence": 2,
                "side_a": "Gulf Cartel",
                "side_b": "Los Zetas",
                "deaths_a": 10,
                "where_description": "Reynosa, Tamaulipas"
            }),
        ])
    }

    #[test]
    fn aggregates_region_by_any_text_field() {
        let events = sinaloa_sample();
        let sinaloa = find("Sinaloa").unwrap();
        let agg = aggregate_by_region(&events, sinaloa);

        assert_eq!(agg.region, "Sinaloa");
        assert_eq!(agg.event_count, 3);
        assert_eq!(agg.total_deaths, 10);
        assert_eq!(agg.year, Some(2021));
        assert_eq!(agg.by_type[&ViolenceType::NonState].count, 1);
        assert_eq!(agg.by_type[&ViolenceType::NonState].total_deaths, 5);
        assert_eq!(agg.by_type[&ViolenceType::OneSided].total_deaths, 4);
        assert_eq!(agg.by_type[&ViolenceType::StateBased].count, 1);
    }

    #[test]
    fn civilian_side_b_deaths_go_to_civilian_bucket() {
        let events = sinaloa_sample();
        let agg = aggregate_by_region(&events, find("Sinaloa").unwrap());
        assert_eq!(agg.casualties.civilians, 4);
        assert_eq!(agg.casualties.side_b, 2);
        assert_eq!(agg.casualties.side_a, 4);
        assert!(agg.top_actors.iter().all(|a| a.name != CIVILIANS));
    }

    #[test]
    fn ranks_actors_with_first_seen_tie_break() {
        let events = sinaloa_sample();
        let agg = aggregate_by_region(&events, find("Sinaloa").unwrap());
        let names: Vec<_> = agg.top_actors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Sinaloa Cartel", "CJNG", "Government of Mexico"]);
        assert_eq!(agg.top_actors[0].event_count, 2);
        assert_eq!(agg.top_actors[1].event_count, 2);
    }

    #[test]
    fn top_actors_caps_at_five_and_skips_placeholders() {
        let events = events(
            ["A", "B", "C", "D", "E", "F", "N/A", ""]
                .iter()
                .map(|name| json!({"side_a": name, "side_b": "Civilians"}))
                .collect(),
        );
        let ranked = top_actors(&events);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].name, "A");
        assert!(ranked.iter().all(|a| a.name != "N/A"));
    }

    #[test]
    fn empty_region_yields_empty_aggregate() {
        let events = sinaloa_sample();
        let agg = aggregate_by_region(&events, find("Yucatan").unwrap());
        assert!(agg.is_empty());
        assert_eq!(agg.total_deaths, 0);
        assert!(agg.top_actors.is_empty());
        assert!(agg.by_type.is_empty());
    }

    #[test]
    fn groups_all_events_by_type() {
        let events = sinaloa_sample();
        let by_type = aggregate_by_type(&events);
        assert_eq!(by_type[&ViolenceType::NonState].count, 2);
        assert_eq!(by_type[&ViolenceType::NonState].total_deaths, 15);
        let total: u64 = by_type.values().map(|s| s.count).sum();
        assert_eq!(total, 4);
    }
}
