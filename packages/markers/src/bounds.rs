//! Fit-to-markers bounds computation.

use conflict_map_event_models::ConflictEvent;
use serde::{Deserialize, Serialize};

/// Pixel padding applied around fitted bounds.
pub const FIT_PADDING_PX: u32 = 50;

/// Maximum zoom when fitting bounds, so a single event doesn't zoom to
/// street level.
pub const FIT_MAX_ZOOM: u8 = 10;

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// A degenerate box containing a single point.
    #[must_use]
    pub const fn point(latitude: f64, longitude: f64) -> Self {
        Self::new(longitude, latitude, longitude, latitude)
    }

    /// Grows the box to contain `(latitude, longitude)`.
    #[must_use]
    pub fn extend(self, latitude: f64, longitude: f64) -> Self {
        Self::new(
            self.west.min(longitude),
            self.south.min(latitude),
            self.east.max(longitude),
            self.north.max(latitude),
        )
    }

    /// Whether `(latitude, longitude)` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }
}

/// Instruction for the map to fit its viewport to a set of events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBoundsRequest {
    /// Area to show.
    pub bounds: BoundingBox,
    /// Padding in pixels on every side.
    pub padding: u32,
    /// Upper zoom limit.
    pub max_zoom: u8,
}

/// Computes the fit-bounds request covering every event with coordinates.
///
/// Returns `None` when no event has coordinates; the map keeps its current
/// viewport in that case.
pub fn fit_bounds<'a, I>(events: I) -> Option<FitBoundsRequest>
where
    I: IntoIterator<Item = &'a ConflictEvent>,
{
    let bounds = events
        .into_iter()
        .filter_map(ConflictEvent::coordinates)
        .fold(None, |acc: Option<BoundingBox>, (lat, lon)| {
            Some(acc.map_or_else(|| BoundingBox::point(lat, lon), |b| b.extend(lat, lon)))
        })?;

    Some(FitBoundsRequest {
        bounds,
        padding: FIT_PADDING_PX,
        max_zoom: FIT_MAX_ZOOM,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events(values: Vec<serde_json::Value>) -> Vec<ConflictEvent> {
        values.into_iter().map(ConflictEvent::from_value).collect()
    }

    #[test]
    fn covers_all_coordinates() {
        let events = events(vec![
            json!({"latitude": 19.4, "longitude": -99.1}),
            json!({"latitude": "25.7", "longitude": "-100.3"}),
            json!({"latitude": 16.8, "longitude": -93.1}),
            json!({"where_description": "no coordinates"}),
        ]);
        let request = fit_bounds(&events).unwrap();
        let b = request.bounds;
        assert!((b.west - -100.3).abs() < 1e-9);
        assert!((b.east - -93.1).abs() < 1e-9);
        assert!((b.south - 16.8).abs() < 1e-9);
        assert!((b.north - 25.7).abs() < 1e-9);
        assert_eq!(request.padding, FIT_PADDING_PX);
        assert_eq!(request.max_zoom, FIT_MAX_ZOOM);
        assert!(b.contains(19.4, -99.1));
    }

    #[test]
    fn no_coordinates_is_a_no_op() {
        let events = events(vec![json!({"id": 1}), json!({"latitude": 19.4})]);
        assert!(fit_bounds(&events).is_none());
        assert!(fit_bounds(&Vec::<ConflictEvent>::new()).is_none());
    }
}
