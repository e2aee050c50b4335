#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View session state machine.
//!
//! A [`ViewSession`] holds everything a map view shows: the selected
//! year, the fetched events, the active type filter and the open region
//! panel. Each asynchronous target (events, region lookup, encyclopedia
//! summary) is a [`FetchState`]. Starting a request returns a
//! [`RequestToken`]; completing it with anything but the latest token is
//! a no-op, so a slow response can never overwrite a newer one.
//!
//! The session itself does no I/O. Callers either drive the
//! `select_year`/`finish_fetch` style transitions themselves, or use the
//! async helpers ([`ViewSession::load_year`], [`ViewSession::load_panel`])
//! which perform the lookups through the injected traits.

pub mod fetch;
pub mod panel;

use conflict_map_analytics::{TypeFilter, apply_filter};
use conflict_map_event_models::{ConflictEvent, ViolenceType};
use conflict_map_geocoder::{EncyclopediaLookup, RegionResolution, RegionResolver, summary_for_region};
use conflict_map_markers::{
    DEFAULT_YEAR, FilterChip, FitBoundsRequest, MapMarker, RegionPanel, build_markers,
    count_summary, filter_chips, fit_bounds,
};
use conflict_map_region_models::EncyclopediaSummary;
use conflict_map_source::{EventPage, EventQuery, EventSource, SourceError};

pub use fetch::{FetchState, RequestToken, TokenIssuer};
pub use panel::{EncyclopediaRequest, PanelState, PanelView, RegionLookup, find_event};

/// Events loaded for the selected year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedEvents {
    /// Event records in upstream order.
    pub events: Vec<ConflictEvent>,
    /// Total matching records upstream.
    pub total_count: u64,
}

impl From<EventPage> for LoadedEvents {
    fn from(page: EventPage) -> Self {
        Self {
            events: page.events,
            total_count: page.total_count,
        }
    }
}

/// State of one map view.
#[derive(Debug, Clone)]
pub struct ViewSession {
    year: i32,
    tokens: TokenIssuer,
    events: FetchState<LoadedEvents>,
    filter: TypeFilter,
    panel: Option<PanelState>,
}

impl Default for ViewSession {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR)
    }
}

impl ViewSession {
    /// Creates an idle session with `year` selected.
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            tokens: TokenIssuer::default(),
            events: FetchState::Idle,
            filter: TypeFilter::new(),
            panel: None,
        }
    }

    /// Selected year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Event fetch state.
    #[must_use]
    pub const fn events_state(&self) -> &FetchState<LoadedEvents> {
        &self.events
    }

    /// Active type filter.
    #[must_use]
    pub const fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    /// Open panel, if any.
    #[must_use]
    pub const fn panel(&self) -> Option<&PanelState> {
        self.panel.as_ref()
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Selects `year` and starts fetching its events. Any open panel is
    /// closed.
    pub fn select_year(&mut self, year: i32) -> RequestToken {
        let token = self.tokens.issue();
        log::debug!("Selecting year {year} (request {})", token.get());
        self.year = year;
        self.events = FetchState::Loading(token);
        self.panel = None;
        token
    }

    /// Completes the event fetch started with `token`.
    ///
    /// Returns `false` (and changes nothing) if `token` is stale.
    pub fn finish_fetch(
        &mut self,
        token: RequestToken,
        result: Result<EventPage, SourceError>,
    ) -> bool {
        if !self.events.accepts(token) {
            log::debug!("Discarding stale event response (request {})", token.get());
            return false;
        }
        self.events = match result {
            Ok(page) => {
                log::debug!(
                    "Loaded {} events for {} (total {})",
                    page.events.len(),
                    self.year,
                    page.total_count
                );
                FetchState::Ready(page.into())
            }
            Err(e) => {
                log::error!("Failed to load events for {}: {e}", self.year);
                FetchState::Error(e.to_string())
            }
        };
        true
    }

    /// Loaded events, empty unless the latest fetch succeeded.
    #[must_use]
    pub fn events(&self) -> &[ConflictEvent] {
        self.events
            .value()
            .map(|loaded| loaded.events.as_slice())
            .unwrap_or_default()
    }

    // ── Filtering ───────────────────────────────────────────────────

    /// Toggles `violence_type` in the filter.
    pub fn toggle_type(&mut self, violence_type: ViolenceType) {
        self.filter.toggle(violence_type);
    }

    /// Clears the filter so every event is shown.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Events passing the active filter, in upstream order.
    #[must_use]
    pub fn filtered_events(&self) -> Vec<&ConflictEvent> {
        apply_filter(self.events(), &self.filter)
    }

    /// Markers for the filtered events.
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker> {
        build_markers(self.filtered_events())
    }

    /// Viewport fitting the filtered events, or `None` to keep the current
    /// one.
    #[must_use]
    pub fn bounds(&self) -> Option<FitBoundsRequest> {
        fit_bounds(self.filtered_events())
    }

    /// Filter bar chips.
    #[must_use]
    pub fn filter_chips(&self) -> Vec<FilterChip> {
        filter_chips(&self.filter)
    }

    /// `"N of M events"` line for the filter bar.
    #[must_use]
    pub fn count_summary(&self) -> String {
        count_summary(
            self.filtered_events().len(),
            self.events().len(),
            &self.filter,
        )
    }

    // ── Region panel ────────────────────────────────────────────────

    /// Opens the panel for `location`.
    ///
    /// Returns the coordinate lookup to perform when the matching event
    /// has coordinates. Otherwise the panel opens with no resolved region.
    pub fn open_panel(&mut self, location: &str) -> Option<RegionLookup> {
        let anchor = find_event(self.events(), location).cloned();
        let lookup = anchor
            .as_ref()
            .and_then(ConflictEvent::coordinates)
            .map(|(latitude, longitude)| RegionLookup {
                token: self.tokens.issue(),
                latitude,
                longitude,
            });

        let region = lookup.as_ref().map_or(
            FetchState::Ready(RegionResolution::Unresolved),
            |l| FetchState::Loading(l.token),
        );
        if lookup.is_none() {
            log::debug!("No event with coordinates matches '{location}'");
        }

        self.panel = Some(PanelState::new(location.to_string(), anchor, region));
        lookup
    }

    /// Completes the region lookup started with `token`.
    ///
    /// Returns the encyclopedia lookup to perform when the resolution is a
    /// canonical region. Stale tokens and closed panels are ignored.
    pub fn finish_region_lookup(
        &mut self,
        token: RequestToken,
        resolution: RegionResolution,
    ) -> Option<EncyclopediaRequest> {
        if !self.panel.as_ref().is_some_and(|p| p.region.accepts(token)) {
            log::debug!("Discarding stale region lookup (request {})", token.get());
            return None;
        }

        let request = resolution.region().map(|region| EncyclopediaRequest {
            token: self.tokens.issue(),
            region,
        });

        if let Some(panel) = self.panel.as_mut() {
            panel.encyclopedia = request
                .as_ref()
                .map_or(FetchState::Idle, |r| FetchState::Loading(r.token));
            panel.region = FetchState::Ready(resolution);
        }
        request
    }

    /// Completes the encyclopedia lookup started with `token`.
    ///
    /// Returns `false` if `token` is stale or the panel was closed.
    pub fn finish_encyclopedia(
        &mut self,
        token: RequestToken,
        summary: Option<EncyclopediaSummary>,
    ) -> bool {
        match self.panel.as_mut() {
            Some(panel) if panel.encyclopedia.accepts(token) => {
                panel.encyclopedia = FetchState::Ready(summary);
                true
            }
            _ => {
                log::debug!("Discarding stale encyclopedia summary (request {})", token.get());
                false
            }
        }
    }

    /// Closes the panel. In-flight lookups for it become stale.
    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    /// Snapshot of the open panel. Statistics cover every loaded event in
    /// the resolved region, regardless of the type filter.
    #[must_use]
    pub fn panel_view(&self) -> Option<PanelView> {
        let panel = self.panel.as_ref()?;
        let resolution = panel.region.value();

        let details = resolution
            .and_then(RegionResolution::region)
            .map(|region| {
                RegionPanel::build(
                    region,
                    self.events(),
                    panel.encyclopedia.value().cloned().flatten(),
                )
            });

        Some(PanelView {
            location: panel.location.clone(),
            resolving_region: panel.region.is_loading(),
            region_name: resolution.and_then(RegionResolution::name).map(String::from),
            loading_encyclopedia: panel.encyclopedia.is_loading(),
            details,
        })
    }

    // ── Async drivers ───────────────────────────────────────────────

    /// Selects `year` and fetches its events from `source`.
    ///
    /// Returns whether the response was applied.
    pub async fn load_year(&mut self, source: &dyn EventSource, year: i32) -> bool {
        let token = self.select_year(year);
        let result = source.fetch(&EventQuery::events(Some(year), None)).await;
        self.finish_fetch(token, result)
    }

    /// Opens the panel for `location` and runs its lookups to completion.
    pub async fn load_panel(
        &mut self,
        location: &str,
        resolver: &RegionResolver,
        encyclopedia: &dyn EncyclopediaLookup,
    ) -> Option<PanelView> {
        if let Some(lookup) = self.open_panel(location) {
            let resolution = resolver.resolve(lookup.latitude, lookup.longitude).await;
            if let Some(request) = self.finish_region_lookup(lookup.token, resolution) {
                let summary = summary_for_region(encyclopedia, request.region).await;
                self.finish_encyclopedia(request.token, summary);
            }
        }
        self.panel_view()
    }
}
