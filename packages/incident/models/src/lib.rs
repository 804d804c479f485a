#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hate-crime incident record types.
//!
//! [`RawIncident`] mirrors one row of the published incident file with every
//! column still a string. [`IncidentRecord`] is the coerced form that every
//! aggregation consumes: dates are parsed, categorical values are trimmed
//! and non-empty, and numeric columns are plain integers.

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One row of the incident file exactly as it appears on disk.
///
/// Column names are case-sensitive and match the header row. Columns the
/// file doesn't carry deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIncident {
    pub incident_date: Option<String>,
    pub state_name: Option<String>,
    pub state_abbr: Option<String>,
    pub region_name: Option<String>,
    pub bias_desc: Option<String>,
    pub offense_name: Option<String>,
    pub victim_count: Option<String>,
    pub adult_victim_count: Option<String>,
    pub juvenile_victim_count: Option<String>,
    pub total_offender_count: Option<String>,
}

/// A single reported incident after field coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Date of the incident, `None` when the source value was missing or
    /// malformed.
    pub incident_date: Option<NaiveDate>,
    /// Full state name (e.g. "Texas").
    pub state_name: Option<String>,
    /// Two-letter postal abbreviation (e.g. "TX").
    pub state_abbr: Option<String>,
    /// Census region (e.g. "South").
    pub region_name: Option<String>,
    /// Bias motivation description.
    pub bias_desc: Option<String>,
    /// Offense type description.
    pub offense_name: Option<String>,
    /// Total victims.
    pub victim_count: i64,
    /// Adult victims.
    pub adult_victim_count: i64,
    /// Juvenile victims.
    pub juvenile_victim_count: i64,
    /// Total offenders.
    pub total_offender_count: i64,
}

impl IncidentRecord {
    /// Calendar year of the incident, if the date parsed.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.incident_date.map(|d| d.year())
    }

    /// Returns the value of a categorical column.
    #[must_use]
    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::StateName => self.state_name.as_deref(),
            CategoricalField::StateAbbr => self.state_abbr.as_deref(),
            CategoricalField::RegionName => self.region_name.as_deref(),
            CategoricalField::BiasDesc => self.bias_desc.as_deref(),
            CategoricalField::OffenseName => self.offense_name.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Returns the value of a numeric column.
    #[must_use]
    pub const fn numeric(&self, field: NumericField) -> i64 {
        match field {
            NumericField::VictimCount => self.victim_count,
            NumericField::AdultVictimCount => self.adult_victim_count,
            NumericField::JuvenileVictimCount => self.juvenile_victim_count,
            NumericField::TotalOffenderCount => self.total_offender_count,
        }
    }
}

/// Categorical columns usable as grouping keys.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CategoricalField {
    StateName,
    StateAbbr,
    RegionName,
    BiasDesc,
    OffenseName,
}

/// Numeric columns usable as sum targets and ranking metrics.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NumericField {
    VictimCount,
    AdultVictimCount,
    JuvenileVictimCount,
    TotalOffenderCount,
}

impl NumericField {
    /// Returns all variants of this enum, in column order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VictimCount,
            Self::AdultVictimCount,
            Self::JuvenileVictimCount,
            Self::TotalOffenderCount,
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn field_names_match_columns() {
        assert_eq!(CategoricalField::RegionName.to_string(), "region_name");
        assert_eq!(NumericField::TotalOffenderCount.as_ref(), "total_offender_count");
        assert_eq!(
            CategoricalField::from_str("bias_desc").unwrap(),
            CategoricalField::BiasDesc
        );
        assert!(NumericField::from_str("VictimCount").is_err());
    }

    #[test]
    fn empty_categorical_is_absent() {
        let record = IncidentRecord {
            region_name: Some(String::new()),
            bias_desc: Some("Anti-Jewish".to_string()),
            ..IncidentRecord::default()
        };
        assert_eq!(record.categorical(CategoricalField::RegionName), None);
        assert_eq!(
            record.categorical(CategoricalField::BiasDesc),
            Some("Anti-Jewish")
        );
    }

    #[test]
    fn year_requires_date() {
        let mut record = IncidentRecord::default();
        assert_eq!(record.year(), None);
        record.incident_date = NaiveDate::from_ymd_opt(1999, 6, 15);
        assert_eq!(record.year(), Some(1999));
    }

    #[test]
    fn numeric_accessor_covers_every_field() {
        let record = IncidentRecord {
            victim_count: 1,
            adult_victim_count: 2,
            juvenile_victim_count: 3,
            total_offender_count: 4,
            ..IncidentRecord::default()
        };
        let values: Vec<i64> = NumericField::all()
            .iter()
            .map(|f| record.numeric(*f))
            .collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
