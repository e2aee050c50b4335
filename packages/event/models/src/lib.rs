#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Conflict event record types and violence type classification.
//!
//! Records arrive from the UCDP GED API as loosely-typed JSON objects whose
//! field names vary across API versions. [`ConflictEvent`] keeps the raw
//! object intact (so the proxy can forward it unchanged) and exposes
//! tolerant accessors that derive the canonical fields used by the rest of
//! the system. None of the accessors ever fail: missing or malformed
//! fields resolve to defaults.

pub mod normalize;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Literal actor name UCDP uses for the civilian side of one-sided violence.
pub const CIVILIANS: &str = "Civilians";

/// Placeholder actor name that carries no information.
pub const NOT_AVAILABLE: &str = "N/A";

/// Classification of a conflict event's nature.
///
/// The mapping from upstream codes is total: unrecognized codes become
/// [`ViolenceType::Unknown`] carrying the raw code, and records without any
/// type field become [`ViolenceType::Unspecified`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolenceType {
    /// Code 1: armed conflict where at least one party is a government.
    StateBased,
    /// Code 2: conflict between organized non-government groups.
    NonState,
    /// Code 3: organized violence against civilians.
    OneSided,
    /// Any other code, preserved for display.
    Unknown(String),
    /// No type field present on the record.
    Unspecified,
}

impl ViolenceType {
    /// The three types UCDP defines, in code order.
    pub const KNOWN: [Self; 3] = [Self::StateBased, Self::NonState, Self::OneSided];

    /// Maps a normalized upstream code to a violence type.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Self::StateBased,
            "2" => Self::NonState,
            "3" => Self::OneSided,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Stable machine key (`state-based`, `unknown:7`, ...).
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::StateBased => "state-based".to_string(),
            Self::NonState => "non-state".to_string(),
            Self::OneSided => "one-sided".to_string(),
            Self::Unknown(raw) => format!("unknown:{raw}"),
            Self::Unspecified => "unspecified".to_string(),
        }
    }

    /// Human-readable label shown in filters and popups.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::StateBased => "State-based conflict".to_string(),
            Self::NonState => "Non-state conflict".to_string(),
            Self::OneSided => "One-sided violence".to_string(),
            Self::Unknown(raw) => format!("Type {raw}"),
            Self::Unspecified => "Unspecified".to_string(),
        }
    }

    /// Whether this is one of the three UCDP-defined types.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::StateBased | Self::NonState | Self::OneSided)
    }
}

impl fmt::Display for ViolenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Error returned when a string is not a valid [`ViolenceType`] key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidViolenceTypeError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for InvalidViolenceTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid violence type '{}'", self.value)
    }
}

impl std::error::Error for InvalidViolenceTypeError {}

impl FromStr for ViolenceType {
    type Err = InvalidViolenceTypeError;

    /// Parses a key as produced by [`ViolenceType::key`]. Bare upstream
    /// codes (`"1"`, `"2"`, `"3"`) are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "state-based" | "1" => return Ok(Self::StateBased),
            "non-state" | "2" => return Ok(Self::NonState),
            "one-sided" | "3" => return Ok(Self::OneSided),
            "unspecified" => return Ok(Self::Unspecified),
            _ => {}
        }
        match trimmed.strip_prefix("unknown:") {
            Some(raw) if !raw.is_empty() => Ok(Self::Unknown(raw.to_string())),
            _ => Err(InvalidViolenceTypeError {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for ViolenceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for ViolenceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-party split of an event's death counts.
///
/// When side B is the literal `Civilians` actor, side B's deaths are
/// counted as civilian deaths rather than as a second party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyBreakdown {
    /// Deaths on side A.
    pub side_a: u64,
    /// Deaths on side B (zero when side B is `Civilians`).
    pub side_b: u64,
    /// Civilian deaths.
    pub civilians: u64,
    /// Deaths with unknown attribution.
    pub unknown: u64,
}

impl CasualtyBreakdown {
    /// Sum of all four buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.side_a
            .saturating_add(self.side_b)
            .saturating_add(self.civilians)
            .saturating_add(self.unknown)
    }
}

impl std::ops::AddAssign for CasualtyBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        self.side_a = self.side_a.saturating_add(rhs.side_a);
        self.side_b = self.side_b.saturating_add(rhs.side_b);
        self.civilians = self.civilians.saturating_add(rhs.civilians);
        self.unknown = self.unknown.saturating_add(rhs.unknown);
    }
}

/// A single georeferenced conflict event as returned by the upstream API.
///
/// Serializes transparently as the original JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictEvent {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for ConflictEvent {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl ConflictEvent {
    /// Builds an event from any JSON value. Non-object values produce an
    /// event with no fields.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Raw access to a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The raw JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Upstream identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.text("id")
    }

    /// Trimmed, non-empty string form of a field (numbers are rendered).
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        normalize::value_text(self.get(field)?)
    }

    /// First non-empty field among `fields`.
    #[must_use]
    pub fn first_text(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|f| self.text(f))
    }

    /// Derived violence type. See [`normalize::violence_type`].
    #[must_use]
    pub fn violence_type(&self) -> ViolenceType {
        normalize::violence_type(self)
    }

    /// Sum of the four casualty counts. See [`normalize::total_deaths`].
    #[must_use]
    pub fn total_deaths(&self) -> u64 {
        normalize::total_deaths(self)
    }

    /// Per-party death split.
    #[must_use]
    pub fn casualties(&self) -> CasualtyBreakdown {
        normalize::casualties(self)
    }

    /// Popup title. See [`normalize::confrontation_title`].
    #[must_use]
    pub fn confrontation_title(&self) -> String {
        normalize::confrontation_title(self)
    }

    /// `(latitude, longitude)` when both are present, numeric and non-zero.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        normalize::coordinates(self)
    }

    /// Side A actor (`side_a` or `actor1`).
    #[must_use]
    pub fn side_a(&self) -> Option<String> {
        self.first_text(&["side_a", "actor1"])
    }

    /// Side B actor (`side_b` or `actor2`).
    #[must_use]
    pub fn side_b(&self) -> Option<String> {
        self.first_text(&["side_b", "actor2"])
    }

    /// Raw date string (`date_start` or `event_date`).
    #[must_use]
    pub fn date(&self) -> Option<String> {
        self.first_text(&["date_start", "event_date"])
    }

    /// Calendar year of [`ConflictEvent::date`], if it parses.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        let date = self.date()?;
        let day = date.get(..10).unwrap_or(&date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Location description (`where_description` or `location`).
    #[must_use]
    pub fn location_text(&self) -> Option<String> {
        self.first_text(&["where_description", "location"])
    }

    /// Administrative region text (`region` or `admin1`).
    #[must_use]
    pub fn region_text(&self) -> Option<String> {
        self.first_text(&["region", "admin1"])
    }

    /// The text used to identify this event's area when opening a region
    /// panel (`where_description`, then `region`, then `location`).
    #[must_use]
    pub fn panel_query(&self) -> Option<String> {
        self.first_text(&["where_description", "region", "location"])
    }

    /// All free-text fields that may name the event's region.
    #[must_use]
    pub fn region_candidates(&self) -> Vec<String> {
        ["where_description", "region", "location", "admin1"]
            .iter()
            .filter_map(|f| self.text(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn violence_type_keys_parse_back() {
        for t in [
            ViolenceType::StateBased,
            ViolenceType::NonState,
            ViolenceType::OneSided,
            ViolenceType::Unknown("7".to_string()),
            ViolenceType::Unspecified,
        ] {
            assert_eq!(t.key().parse::<ViolenceType>().unwrap(), t);
        }
    }

    #[test]
    fn violence_type_accepts_bare_codes() {
        assert_eq!("2".parse::<ViolenceType>().unwrap(), ViolenceType::NonState);
        assert!("unknown:".parse::<ViolenceType>().is_err());
        assert!("bogus".parse::<ViolenceType>().is_err());
    }

    #[test]
    fn violence_type_serializes_as_key() {
        let s = serde_json::to_string(&ViolenceType::OneSided).unwrap();
        assert_eq!(s, "\"one-sided\"");
        let t: ViolenceType = serde_json::from_str("\"unknown:9\"").unwrap();
        assert_eq!(t, ViolenceType::Unknown("9".to_string()));
    }

    #[test]
    fn event_serializes_transparently() {
        let raw = json!({"id": 12, "side_a": "Cartel X", "deaths_a": "3"});
        let event = ConflictEvent::from_value(raw.clone());
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
        assert_eq!(event.id().as_deref(), Some("12"));
    }

    #[test]
    fn non_object_value_becomes_empty_event() {
        let event = ConflictEvent::from_value(json!([1, 2, 3]));
        assert!(event.fields().is_empty());
        assert_eq!(event.violence_type(), ViolenceType::Unspecified);
    }

    #[test]
    fn parses_year_from_date_start() {
        let event = ConflictEvent::from_value(json!({"date_start": "2020-03-14T00:00:00"}));
        assert_eq!(event.year(), Some(2020));
        let event = ConflictEvent::from_value(json!({"event_date": "garbage"}));
        assert_eq!(event.year(), None);
    }

    #[test]
    fn region_candidates_skip_blank_fields() {
        let event = ConflictEvent::from_value(json!({
            "where_description": "Culiacan",
            "region": "",
            "location": null,
            "admin1": "Sinaloa state"
        }));
        assert_eq!(event.region_candidates(), vec!["Culiacan", "Sinaloa state"]);
        assert_eq!(event.panel_query().as_deref(), Some("Culiacan"));
    }
}
