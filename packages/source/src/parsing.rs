//! Field coercion for raw incident rows.
//!
//! Every consumer sees records coerced by [`normalize`], which runs once
//! per row at load time so all charts agree on what a field means.

use chrono::NaiveDate;
use hate_crime_incident_models::{IncidentRecord, RawIncident};

/// Parses an `incident_date` value.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a `T` or space and a time
/// of day (which is discarded). Anything else yields `None`.
#[must_use]
pub fn parse_incident_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    match (s.get(..10), s.as_bytes().get(10)) {
        (Some(day), Some(b'T' | b' ')) => NaiveDate::parse_from_str(day, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Coerces a numeric column to an integer, treating anything unparseable
/// as 0.
///
/// Whole-valued decimals such as `"3.0"` are accepted; fractional or
/// non-finite values are not.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_count(s: Option<&str>) -> i64 {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => f as i64,
        _ => 0,
    }
}

/// Trims a categorical value, mapping blank input to `None`.
#[must_use]
pub fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerces a raw row into an [`IncidentRecord`].
#[must_use]
pub fn normalize(raw: RawIncident) -> IncidentRecord {
    IncidentRecord {
        incident_date: raw.incident_date.as_deref().and_then(parse_incident_date),
        victim_count: coerce_count(raw.victim_count.as_deref()),
        adult_victim_count: coerce_count(raw.adult_victim_count.as_deref()),
        juvenile_victim_count: coerce_count(raw.juvenile_victim_count.as_deref()),
        total_offender_count: coerce_count(raw.total_offender_count.as_deref()),
        state_name: clean(raw.state_name),
        state_abbr: clean(raw.state_abbr),
        region_name: clean(raw.region_name),
        bias_desc: clean(raw.bias_desc),
        offense_name: clean(raw.offense_name),
    }
}
