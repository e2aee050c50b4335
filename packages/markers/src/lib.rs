#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map marker, popup, bounds and region panel view-models.
//!
//! Turns normalized events and aggregates into plain serializable values
//! a map frontend can render directly: colored, size-tiered markers with
//! popups, a fit-bounds request, filter chips and the region side panel.
//! Nothing here can fail; events without coordinates are simply left off
//! the map.

pub mod bounds;
pub mod marker;
pub mod panel;

use conflict_map_event_models::ViolenceType;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use bounds::{BoundingBox, FitBoundsRequest, fit_bounds};
pub use marker::{MapMarker, PopupView, build_markers};
pub use panel::{FilterChip, RegionPanel, TypeRow, count_summary, filter_chips};

/// Initial map center (geographic center of Mexico), `(lat, lon)`.
pub const MEXICO_CENTER: (f64, f64) = (23.6345, -102.5528);

/// Initial map zoom level.
pub const DEFAULT_ZOOM: u8 = 5;

/// Years offered by the year selector.
pub const SELECTABLE_YEARS: std::ops::RangeInclusive<i32> = 2010..=2024;

/// Year selected when a session starts.
pub const DEFAULT_YEAR: i32 = 2020;

/// Marker fill color per violence type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerColor {
    /// State-based conflict (a government is involved).
    Blue,
    /// Non-state conflict (between armed groups).
    Orange,
    /// One-sided violence (attacks on civilians).
    Red,
    /// Anything else.
    Gray,
}

impl MarkerColor {
    /// CSS hex color.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#1e88e5",
            Self::Orange => "#ff6f00",
            Self::Red => "#e53935",
            Self::Gray => "#95a5a6",
        }
    }
}

/// Maps a violence type to its marker color.
#[must_use]
pub const fn marker_color(violence_type: &ViolenceType) -> MarkerColor {
    match violence_type {
        ViolenceType::StateBased => MarkerColor::Blue,
        ViolenceType::NonState => MarkerColor::Orange,
        ViolenceType::OneSided => MarkerColor::Red,
        ViolenceType::Unknown(_) | ViolenceType::Unspecified => MarkerColor::Gray,
    }
}

/// Discrete marker size, chosen from an event's total deaths.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeTier {
    /// Default tier: up to 10 deaths.
    Medium,
    /// More than 10 deaths.
    Large,
    /// More than 50 deaths.
    ExtraLarge,
    /// More than 100 deaths.
    Huge,
}

impl SizeTier {
    /// Picks the tier for `deaths`.
    #[must_use]
    pub const fn for_deaths(deaths: u64) -> Self {
        if deaths > 100 {
            Self::Huge
        } else if deaths > 50 {
            Self::ExtraLarge
        } else if deaths > 10 {
            Self::Large
        } else {
            Self::Medium
        }
    }

    /// Marker diameter in pixels.
    #[must_use]
    pub const fn pixels(self) -> u32 {
        match self {
            Self::Medium => 16,
            Self::Large => 20,
            Self::ExtraLarge => 24,
            Self::Huge => 28,
        }
    }

    /// Font size of the death-count label in pixels.
    #[must_use]
    pub const fn label_font_pixels(self) -> u32 {
        match self {
            Self::Medium => 8,
            Self::Large | Self::ExtraLarge | Self::Huge => 10,
        }
    }
}
