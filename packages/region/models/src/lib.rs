#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical Mexican state reference table and region text matching.
//!
//! A single table ([`states::STATES`]) backs both ways of resolving a
//! region: normalizing the state name returned by a reverse geocoder, and
//! testing whether a free-text location string mentions a state.
//! Comparisons are case-insensitive and ignore Spanish diacritics.

pub mod states;

use serde::{Deserialize, Serialize};

pub use states::STATES;

/// Encyclopedia page summary shown alongside a region's statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncyclopediaSummary {
    /// Page title.
    pub title: String,
    /// Plain-text lead extract.
    pub extract: Option<String>,
    /// Short description line.
    pub description: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
}

/// A canonical administrative region (state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeRegion {
    /// Canonical name (ASCII, e.g. `"Nuevo Leon"`).
    pub name: &'static str,
    /// Spanish Wikipedia page slug.
    pub wikipedia_slug: &'static str,
    /// Capital city.
    pub capital: &'static str,
    /// Population (2020 census).
    pub population: u64,
    /// State names the reverse geocoder returns for this region.
    #[serde(skip)]
    pub provider_names: &'static [&'static str],
    /// Lowercase fragments identifying the region in free text.
    pub aliases: &'static [&'static str],
}

impl AdministrativeRegion {
    /// Whether `text` mentions this region: a case- and
    /// diacritic-insensitive substring test against every alias.
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        let folded = fold(text);
        self.aliases.iter().any(|alias| folded.contains(&fold(alias)))
    }

    /// Whether any of `texts` mentions this region.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, texts: &[S]) -> bool {
        texts.iter().any(|t| self.matches_text(t.as_ref()))
    }

    /// Full Spanish Wikipedia article URL.
    #[must_use]
    pub fn wikipedia_url(&self) -> String {
        format!("https://es.wikipedia.org/wiki/{}", self.wikipedia_slug)
    }
}

/// Lowercases and strips the diacritics used in Spanish place names.
#[must_use]
pub fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// All canonical regions.
#[must_use]
pub const fn all() -> &'static [AdministrativeRegion] {
    STATES
}

/// Looks up a region by canonical name (folded comparison).
#[must_use]
pub fn find(name: &str) -> Option<&'static AdministrativeRegion> {
    let folded = fold(name);
    STATES.iter().find(|r| fold(r.name) == folded)
}

/// Maps a reverse-geocoder state name (e.g. `"Michoacán de Ocampo"`) to
/// its canonical region. Returns `None` when the spelling is not in the
/// table; callers pass such names through unchanged.
#[must_use]
pub fn normalize_provider_state(raw: &str) -> Option<&'static AdministrativeRegion> {
    let folded = fold(raw);
    if folded.is_empty() {
        return None;
    }
    STATES.iter().find(|r| {
        fold(r.name) == folded || r.provider_names.iter().any(|p| fold(p) == folded)
    })
}

/// Regions mentioned by `text`, in table order.
#[must_use]
pub fn regions_in_text(text: &str) -> Vec<&'static AdministrativeRegion> {
    STATES.iter().filter(|r| r.matches_text(text)).collect()
}
