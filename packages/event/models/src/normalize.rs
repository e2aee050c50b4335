//! Event record normalization.
//!
//! Derives the canonical fields (violence type, death totals, titles,
//! coordinates) from raw upstream records. Every function here is total:
//! missing, null or wrong-typed fields fall back to defaults instead of
//! failing.

use serde_json::Value;

use crate::{CIVILIANS, CasualtyBreakdown, ConflictEvent, ViolenceType};

/// Fields checked, in order, for the violence type code.
pub const VIOLENCE_TYPE_FIELDS: &[&str] = &["type_of_violence", "type", "event_type"];

/// Side A actor fallback when no actor name is present.
pub const UNKNOWN_ACTOR: &str = "Unknown actor";

/// Renders a scalar JSON value as trimmed text. Returns `None` for null,
/// empty strings, arrays and objects.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Parses the leading integer of a value, the way lenient form parsers do
/// (`"12 deaths"` is 12, `"3.7"` is 3). Anything that doesn't start with a
/// digit, and any negative value, yields 0.
#[must_use]
pub fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, truncate_to_u64)
        }),
        Some(Value::String(s)) => parse_leading_u64(s),
        _ => 0,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn truncate_to_u64(f: f64) -> u64 {
    if f >= u64::MAX as f64 {
        u64::MAX
    } else {
        f.trunc() as u64
    }
}

fn parse_leading_u64(s: &str) -> u64 {
    let s = s.trim_start();
    let digits = s.strip_prefix('+').unwrap_or(s);
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return 0;
    }
    digits[..end].parse::<u64>().unwrap_or(u64::MAX)
}

/// Normalizes a type code value into a lookup key. Integral floats
/// (`2.0`) collapse to their integer form.
fn code_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i.to_string());
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.is_finite() => Some(format!("{f:.0}")),
                _ => Some(n.to_string()),
            }
        }
        Value::Array(_) | Value::Object(_) => {
            let text = value.to_string();
            if text.is_empty() { None } else { Some(text) }
        }
        _ => value_text(value),
    }
}

/// Derives the violence type from the first present type field.
///
/// Codes `1`, `2` and `3` (numeric or string) map to the three known
/// types; any other present value maps to [`ViolenceType::Unknown`]; a
/// record with none of the fields maps to [`ViolenceType::Unspecified`].
#[must_use]
pub fn violence_type(event: &ConflictEvent) -> ViolenceType {
    VIOLENCE_TYPE_FIELDS
        .iter()
        .filter_map(|f| event.get(f))
        .find_map(code_key)
        .map_or(ViolenceType::Unspecified, |code| {
            ViolenceType::from_code(&code)
        })
}

/// Sum of the four casualty counts; non-numeric or missing counts are 0.
#[must_use]
pub fn total_deaths(event: &ConflictEvent) -> u64 {
    ["deaths_a", "deaths_b", "deaths_civilians", "deaths_unknown"]
        .iter()
        .map(|f| parse_count(event.get(f)))
        .fold(0, u64::saturating_add)
}

/// Whether side B is the civilian population.
#[must_use]
pub fn is_civilian_side(name: &str) -> bool {
    name == CIVILIANS
}

/// Splits an event's deaths per party, folding side B into the civilian
/// bucket when side B is `Civilians`.
#[must_use]
pub fn casualties(event: &ConflictEvent) -> CasualtyBreakdown {
    let side_a = parse_count(event.get("deaths_a"));
    let side_b = parse_count(event.get("deaths_b"));
    let civilians = parse_count(event.get("deaths_civilians"));
    let unknown = parse_count(event.get("deaths_unknown"));

    if event.side_b().as_deref().is_some_and(is_civilian_side) {
        CasualtyBreakdown {
            side_a,
            side_b: 0,
            civilians: civilians.saturating_add(side_b),
            unknown,
        }
    } else {
        CasualtyBreakdown {
            side_a,
            side_b,
            civilians,
            unknown,
        }
    }
}

/// `"<side A> vs <side B>"`, or side A alone when side B is missing or is
/// the civilian population.
#[must_use]
pub fn confrontation_title(event: &ConflictEvent) -> String {
    let side_a = event
        .side_a()
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_string());
    match event.side_b() {
        Some(side_b) if !is_civilian_side(&side_b) => format!("{side_a} vs {side_b}"),
        _ => side_a,
    }
}

fn parse_degrees(value: Option<&Value>) -> Option<f64> {
    let degrees = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if degrees.is_finite() && degrees != 0.0 {
        Some(degrees)
    } else {
        None
    }
}

/// Parses `(latitude, longitude)`. Returns `None` if either is missing,
/// unparseable, or zero.
#[must_use]
pub fn coordinates(event: &ConflictEvent) -> Option<(f64, f64)> {
    let latitude = parse_degrees(event.get("latitude"))?;
    let longitude = parse_degrees(event.get("longitude"))?;
    Some((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> ConflictEvent {
        ConflictEvent::from_value(value)
    }

    #[test]
    fn maps_known_codes_as_numbers_and_strings() {
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": 1}))),
            ViolenceType::StateBased
        );
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": "2"}))),
            ViolenceType::NonState
        );
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": 3.0}))),
            ViolenceType::OneSided
        );
    }

    #[test]
    fn falls_back_through_type_fields() {
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": null, "type": "3"}))),
            ViolenceType::OneSided
        );
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": "", "event_type": 1}))),
            ViolenceType::StateBased
        );
    }

    #[test]
    fn unknown_code_preserves_raw_value() {
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": "9"}))),
            ViolenceType::Unknown("9".to_string())
        );
        assert_eq!(
            violence_type(&event(json!({"type": "battle"}))),
            ViolenceType::Unknown("battle".to_string())
        );
    }

    #[test]
    fn missing_type_is_unspecified() {
        assert_eq!(violence_type(&event(json!({}))), ViolenceType::Unspecified);
        assert_eq!(
            violence_type(&event(json!({"type_of_violence": null}))),
            ViolenceType::Unspecified
        );
    }

    #[test]
    fn total_deaths_is_zero_when_counts_are_missing_or_garbage() {
        assert_eq!(total_deaths(&event(json!({}))), 0);
        assert_eq!(
            total_deaths(&event(json!({
                "deaths_a": "abc",
                "deaths_b": null,
                "deaths_civilians": [],
                "deaths_unknown": {"x": 1}
            }))),
            0
        );
    }

    #[test]
    fn total_deaths_sums_coercible_counts() {
        let e = event(json!({
            "deaths_a": 3,
            "deaths_b": "4",
            "deaths_civilians": "2 people",
            "deaths_unknown": 1.9
        }));
        assert_eq!(total_deaths(&e), 10);
    }

    #[test]
    fn negative_counts_are_zero() {
        assert_eq!(parse_count(Some(&json!(-4))), 0);
        assert_eq!(parse_count(Some(&json!("-4"))), 0);
        assert_eq!(parse_count(Some(&json!(" +5"))), 5);
    }

    #[test]
    fn title_joins_both_sides() {
        let e = event(json!({"side_a": "Cartel X", "side_b": "Cartel Y"}));
        assert_eq!(confrontation_title(&e), "Cartel X vs Cartel Y");
        let e = event(json!({"actor1": "A", "actor2": "B"}));
        assert_eq!(confrontation_title(&e), "A vs B");
    }

    #[test]
    fn title_omits_civilians_and_missing_side_b() {
        let e = event(json!({"side_a": "Cartel X", "side_b": "Civilians"}));
        assert_eq!(confrontation_title(&e), "Cartel X");
        let e = event(json!({"side_a": "Cartel X"}));
        assert_eq!(confrontation_title(&e), "Cartel X");
        assert_eq!(confrontation_title(&event(json!({}))), UNKNOWN_ACTOR);
    }

    #[test]
    fn civilian_side_b_deaths_count_as_civilian() {
        let e = event(json!({
            "side_a": "Cartel X",
            "side_b": "Civilians",
            "deaths_a": 1,
            "deaths_b": 4,
            "deaths_civilians": 2
        }));
        let c = casualties(&e);
        assert_eq!(c.side_b, 0);
        assert_eq!(c.civilians, 6);
        assert_eq!(c.total(), total_deaths(&e));
    }

    #[test]
    fn example_record_normalizes() {
        let e = event(json!({
            "type_of_violence": "2",
            "deaths_a": 3,
            "deaths_b": 0,
            "deaths_civilians": 2,
            "deaths_unknown": 0,
            "side_a": "Cartel X",
            "side_b": "Cartel Y",
            "latitude": "19.4",
            "longitude": "-99.1"
        }));
        assert_eq!(e.violence_type(), ViolenceType::NonState);
        assert_eq!(e.total_deaths(), 5);
        assert_eq!(e.confrontation_title(), "Cartel X vs Cartel Y");
        let (lat, lon) = e.coordinates().unwrap();
        assert!((lat - 19.4).abs() < f64::EPSILON);
        assert!((lon - -99.1).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_missing_or_zero_coordinates() {
        assert!(coordinates(&event(json!({"latitude": 19.4}))).is_none());
        assert!(coordinates(&event(json!({"latitude": 0, "longitude": -99.1}))).is_none());
        assert!(coordinates(&event(json!({"latitude": "n/a", "longitude": "-99.1"}))).is_none());
    }
}
