//! Coordinate-to-region resolution with per-instance memoization.
//!
//! Resolution never fails: any provider error collapses into
//! [`RegionResolution::Unresolved`] and is logged.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use conflict_map_region_models::{AdministrativeRegion, normalize_provider_state};
use serde::Serialize;

use crate::{ReverseGeocoder, validate_coordinates};

/// Memo key precision: coordinates are rounded to 1e-5 degrees.
const MEMO_SCALE: f64 = 100_000.0;

/// Default number of coordinate pairs a resolver remembers.
pub const DEFAULT_MEMO_CAPACITY: usize = 4096;

/// Outcome of resolving a coordinate pair to a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionResolution {
    /// The provider's state name matched a canonical region.
    Canonical(&'static AdministrativeRegion),
    /// The provider returned a state name not in the region table.
    PassThrough(String),
    /// No state could be determined.
    Unresolved,
}

impl RegionResolution {
    /// The region name to display, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Canonical(region) => Some(region.name),
            Self::PassThrough(name) => Some(name),
            Self::Unresolved => None,
        }
    }

    /// The canonical region, if the name matched the table.
    #[must_use]
    pub const fn region(&self) -> Option<&'static AdministrativeRegion> {
        match self {
            Self::Canonical(region) => Some(*region),
            Self::PassThrough(_) | Self::Unresolved => None,
        }
    }

    /// Whether a name was found.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Serialized form of a [`RegionResolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionView {
    /// Whether a name was found.
    pub resolved: bool,
    /// Display name.
    pub name: Option<String>,
    /// Canonical region record.
    pub region: Option<AdministrativeRegion>,
}

impl From<RegionResolution> for ResolutionView {
    fn from(resolution: RegionResolution) -> Self {
        Self {
            resolved: resolution.is_resolved(),
            name: resolution.name().map(String::from),
            region: resolution.region().copied(),
        }
    }
}

/// Maps a raw provider state name to a resolution.
///
/// Canonical names are looked up in the region table; unknown spellings
/// pass through unchanged.
#[must_use]
pub fn normalize_state(raw: &str) -> RegionResolution {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return RegionResolution::Unresolved;
    }
    normalize_provider_state(trimmed).map_or_else(
        || RegionResolution::PassThrough(trimmed.to_string()),
        RegionResolution::Canonical,
    )
}

type MemoKey = (i64, i64);

/// Bounded memo; the oldest entry is evicted once `capacity` is reached.
#[derive(Default)]
struct Memo {
    entries: BTreeMap<MemoKey, RegionResolution>,
    order: VecDeque<MemoKey>,
}

impl Memo {
    fn get(&self, key: &MemoKey) -> Option<RegionResolution> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: MemoKey, resolution: RegionResolution, capacity: usize) {
        if capacity == 0 {
            return;
        }
        if self.entries.insert(key, resolution).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }
}

/// Resolves coordinates to regions, remembering up to `capacity` recent
/// coordinate pairs.
pub struct RegionResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    capacity: usize,
    memo: Mutex<Memo>,
}

impl std::fmt::Debug for RegionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionResolver")
            .field("memoized", &self.memoized())
            .finish_non_exhaustive()
    }
}

impl RegionResolver {
    /// Creates a resolver with an empty memo of
    /// [`DEFAULT_MEMO_CAPACITY`] entries.
    #[must_use]
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self::with_capacity(geocoder, DEFAULT_MEMO_CAPACITY)
    }

    /// Creates a resolver that remembers at most `capacity` coordinate
    /// pairs. A capacity of zero disables memoization.
    #[must_use]
    pub fn with_capacity(geocoder: Arc<dyn ReverseGeocoder>, capacity: usize) -> Self {
        Self {
            geocoder,
            capacity,
            memo: Mutex::new(Memo::default()),
        }
    }

    /// Number of memoized coordinate pairs.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Resolves `(latitude, longitude)` to a region.
    ///
    /// Invalid coordinates resolve to `Unresolved` without a lookup.
    /// Provider answers (including "no state") are memoized; transport
    /// failures are not, so a later call may retry.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> RegionResolution {
        if let Err(e) = validate_coordinates(latitude, longitude) {
            log::debug!("Skipping region lookup: {e}");
            return RegionResolution::Unresolved;
        }

        let key = memo_key(latitude, longitude);
        if let Some(hit) = self
            .memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return hit;
        }

        let resolution = match self.geocoder.reverse(latitude, longitude).await {
            Ok(Some(result)) => result
                .state
                .as_deref()
                .map_or(RegionResolution::Unresolved, normalize_state),
            Ok(None) => RegionResolution::Unresolved,
            Err(e) => {
                log::warn!("Region lookup for ({latitude}, {longitude}) failed: {e}");
                return RegionResolution::Unresolved;
            }
        };

        if resolution == RegionResolution::Unresolved {
            log::debug!("No state found for ({latitude}, {longitude})");
        }

        self.memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, resolution.clone(), self.capacity);
        resolution
    }
}

#[allow(clippy::cast_possible_truncation)]
fn memo_key(latitude: f64, longitude: f64) -> MemoKey {
    (
        (latitude * MEMO_SCALE).round() as i64,
        (longitude * MEMO_SCALE).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeocodeError, ReverseGeocodeResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticGeocoder {
        state: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StaticGeocoder {
        fn new(state: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                state,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReverseGeocoder for StaticGeocoder {
        async fn reverse(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(ReverseGeocodeResult {
                state: self.state.map(String::from),
                country: Some("México".to_string()),
                display_name: None,
                latitude: Some(latitude),
                longitude: Some(longitude),
            }))
        }
    }

    struct FailingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReverseGeocoder for FailingGeocoder {
        async fn reverse(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GeocodeError::Status { status: 503 })
        }
    }

    #[tokio::test]
    async fn normalizes_provider_spelling() {
        let geocoder = StaticGeocoder::new(Some("Michoacán de Ocampo"));
        let resolver = RegionResolver::new(geocoder);
        let resolution = resolver.resolve(19.70, -101.19).await;
        assert_eq!(resolution.name(), Some("Michoacan"));
        assert!(resolution.region().is_some());
    }

    #[tokio::test]
    async fn passes_through_unknown_names() {
        let resolver = RegionResolver::new(StaticGeocoder::new(Some("Texas")));
        let resolution = resolver.resolve(29.42, -98.49).await;
        assert_eq!(resolution, RegionResolution::PassThrough("Texas".to_string()));
        assert!(resolution.region().is_none());
    }

    #[tokio::test]
    async fn missing_state_is_unresolved() {
        let resolver = RegionResolver::new(StaticGeocoder::new(None));
        assert_eq!(
            resolver.resolve(19.4, -99.1).await,
            RegionResolution::Unresolved
        );
    }

    #[tokio::test]
    async fn memoizes_by_coordinate_pair() {
        let geocoder = StaticGeocoder::new(Some("Sonora"));
        let resolver = RegionResolver::new(geocoder.clone());
        let first = resolver.resolve(29.0729, -110.9559).await;
        let second = resolver.resolve(29.0729, -110.9559).await;
        assert_eq!(first, second);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.memoized(), 1);

        resolver.resolve(27.0, -109.0).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn memo_stays_within_capacity() {
        let geocoder = StaticGeocoder::new(Some("Ciudad de México"));
        let resolver = RegionResolver::with_capacity(geocoder.clone(), 100);
        for i in 0..5_000_u32 {
            resolver.resolve(19.0 + f64::from(i) * 1e-5, -99.0).await;
        }
        assert_eq!(resolver.memoized(), 100);

        // Most recent pairs are still memoized, the oldest were evicted.
        resolver.resolve(19.0 + 4_999.0 * 1e-5, -99.0).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 5_000);
        resolver.resolve(19.0, -99.0).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 5_001);
        assert_eq!(resolver.memoized(), 100);
    }

    #[tokio::test]
    async fn zero_capacity_disables_memo() {
        let geocoder = StaticGeocoder::new(Some("Sonora"));
        let resolver = RegionResolver::with_capacity(geocoder.clone(), 0);
        resolver.resolve(29.07, -110.95).await;
        resolver.resolve(29.07, -110.95).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.memoized(), 0);
    }

    #[tokio::test]
    async fn failures_are_unresolved_and_not_memoized() {
        let geocoder = Arc::new(FailingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let resolver = RegionResolver::new(geocoder.clone());
        assert_eq!(
            resolver.resolve(19.4, -99.1).await,
            RegionResolution::Unresolved
        );
        resolver.resolve(19.4, -99.1).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.memoized(), 0);
    }

    #[tokio::test]
    async fn invalid_coordinates_skip_lookup() {
        let geocoder = StaticGeocoder::new(Some("Sonora"));
        let resolver = RegionResolver::new(geocoder.clone());
        assert_eq!(
            resolver.resolve(0.0, 0.0).await,
            RegionResolution::Unresolved
        );
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn normalize_state_is_idempotent() {
        let once = normalize_state("Estado de México");
        let twice = normalize_state(once.name().unwrap());
        assert_eq!(once, twice);
        assert_eq!(normalize_state("  "), RegionResolution::Unresolved);
    }

    #[test]
    fn resolution_view_serializes() {
        let view = ResolutionView::from(normalize_state("Nuevo León"));
        assert!(view.resolved);
        assert_eq!(view.name.as_deref(), Some("Nuevo Leon"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["region"]["capital"], "Monterrey");
    }
}
