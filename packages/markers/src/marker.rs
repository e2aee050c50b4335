//! Map markers and their popups.

use conflict_map_event_models::{CasualtyBreakdown, ConflictEvent, NOT_AVAILABLE, ViolenceType};
use serde::Serialize;

use crate::{MarkerColor, SizeTier, marker_color};

/// Popup content for one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupView {
    /// `"Side A vs Side B"` or side A alone.
    pub title: String,
    /// Sum of all casualty counts.
    pub total_deaths: u64,
    /// Violence type.
    pub violence_type: ViolenceType,
    /// Violence type display label.
    pub type_label: String,
    /// Side A actor, `"N/A"` when missing.
    pub side_a: String,
    /// Side B actor; omitted when missing or `"N/A"`.
    pub side_b: Option<String>,
    /// Event date, `"N/A"` when missing.
    pub date: String,
    /// Location description, `"N/A"` when missing.
    pub location: String,
    /// Region text, `"N/A"` when missing.
    pub region: String,
    /// Per-party death split.
    pub casualties: CasualtyBreakdown,
    /// Text used to open the region panel for this event's area.
    pub panel_query: Option<String>,
}

impl PopupView {
    /// Builds the popup for `event`.
    #[must_use]
    pub fn from_event(event: &ConflictEvent) -> Self {
        let violence_type = event.violence_type();
        Self {
            title: event.confrontation_title(),
            total_deaths: event.total_deaths(),
            type_label: violence_type.display_name(),
            violence_type,
            side_a: event.side_a().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            side_b: event.side_b().filter(|s| s != NOT_AVAILABLE),
            date: event.date().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            location: event
                .location_text()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            region: event
                .region_text()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            casualties: event.casualties(),
            panel_query: event.panel_query(),
        }
    }
}

/// A renderable map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Upstream id, or the event's position in the list.
    pub key: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Fill color.
    pub color: MarkerColor,
    /// Fill color as CSS hex.
    pub fill: &'static str,
    /// Size tier.
    pub size: SizeTier,
    /// Diameter in pixels.
    pub pixels: u32,
    /// Text drawn inside the marker (death count, empty when zero).
    pub label: String,
    /// Popup content.
    pub popup: PopupView,
}

impl MapMarker {
    /// Builds a marker for `event`, or `None` when it has no coordinates.
    #[must_use]
    pub fn from_event(index: usize, event: &ConflictEvent) -> Option<Self> {
        let (latitude, longitude) = event.coordinates()?;
        let popup = PopupView::from_event(event);
        let color = marker_color(&popup.violence_type);
        let size = SizeTier::for_deaths(popup.total_deaths);

        Some(Self {
            key: event.id().unwrap_or_else(|| index.to_string()),
            latitude,
            longitude,
            color,
            fill: color.hex(),
            size,
            pixels: size.pixels(),
            label: if popup.total_deaths > 0 {
                popup.total_deaths.to_string()
            } else {
                String::new()
            },
            popup,
        })
    }
}

/// Builds markers for every event that has coordinates, preserving order.
pub fn build_markers<'a, I>(events: I) -> Vec<MapMarker>
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    events
        .into_iter()
        .enumerate()
        .filter_map(|(i, e)| MapMarker::from_event(i, e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn example_event_becomes_orange_medium_marker() {
        let event = ConflictEvent::from_value(json!({
            "type_of_violence": "2",
            "deaths_a": 3, "deaths_b": 0, "deaths_civilians": 2, "deaths_unknown": 0,
            "side_a": "Cartel X", "side_b": "Cartel Y",
            "latitude": "19.4", "longitude": "-99.1"
        }));
        let marker = MapMarker::from_event(0, &event).unwrap();
        assert_eq!(marker.color, MarkerColor::Orange);
        assert_eq!(marker.size, SizeTier::Medium);
        assert_eq!(marker.label, "5");
        assert_eq!(marker.key, "0");
        assert_eq!(marker.popup.title, "Cartel X vs Cartel Y");
        assert_eq!(marker.popup.type_label, "Non-state conflict");
    }

    #[test]
    fn skips_events_without_coordinates() {
        let events: Vec<ConflictEvent> = [
            json!({"id": "a", "latitude": 19.0, "longitude": -99.0}),
            json!({"id": "b"}),
            json!({"id": "c", "latitude": "17.5", "longitude": "-92.1"}),
        ]
        .into_iter()
        .map(ConflictEvent::from_value)
        .collect();
        let keys: Vec<_> = build_markers(&events).into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn popup_fills_placeholders() {
        let popup = PopupView::from_event(&ConflictEvent::from_value(json!({
            "side_b": "N/A",
            "admin1": "Guerrero"
        })));
        assert_eq!(popup.side_a, NOT_AVAILABLE);
        assert!(popup.side_b.is_none());
        assert_eq!(popup.date, NOT_AVAILABLE);
        assert_eq!(popup.location, NOT_AVAILABLE);
        assert_eq!(popup.region, "Guerrero");
        assert_eq!(popup.violence_type, ViolenceType::Unspecified);
    }

    #[test]
    fn zero_deaths_has_empty_label() {
        let event = ConflictEvent::from_value(json!({
            "type_of_violence": 1, "latitude": 20.0, "longitude": -100.0
        }));
        let marker = MapMarker::from_event(3, &event).unwrap();
        assert!(marker.label.is_empty());
        assert_eq!(marker.fill, "#1e88e5");
    }
}
