#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection parameters and derived chart structures.
//!
//! Everything in this crate is produced fresh by the aggregation pipeline
//! for every selection change and handed to the presentation layer as-is.
//! Nothing here is ever edited after construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hate_crime_geography_models::Choropleth;
use hate_crime_incident_models::NumericField;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

// ── Selection ───────────────────────────────────────────────────────────

/// Year selector: either every record or a single calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Year {
    /// No year restriction.
    #[default]
    All,
    /// A single calendar year.
    Of(i32),
}

impl Year {
    /// The selected year, if any.
    #[must_use]
    pub const fn as_year(self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Of(y) => Some(y),
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Of(y) => write!(f, "{y}"),
        }
    }
}

/// Error returned when a year selector string is neither `"All"` nor an
/// integer year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearError {
    /// The rejected input.
    pub value: String,
}

impl std::fmt::Display for InvalidYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year '{}': expected \"All\" or an integer year",
            self.value
        )
    }
}

impl std::error::Error for InvalidYearError {}

impl std::str::FromStr for Year {
    type Err = InvalidYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<i32>().map(Self::Of).map_err(|_| InvalidYearError {
            value: s.to_string(),
        })
    }
}

impl Serialize for Year {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("All"),
            Self::Of(y) => serializer.serialize_i32(*y),
        }
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(y) => Ok(Self::Of(y)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Record-level filter parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Year restriction.
    pub year: Year,
    /// Exact `region_name` match, when set.
    pub region: Option<String>,
}

impl FilterParams {
    /// Filter on year alone.
    #[must_use]
    pub const fn year(year: Year) -> Self {
        Self { year, region: None }
    }
}

/// The full dashboard selection supplied by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Global year selector.
    pub year: Year,
    /// Region drill-down for the region × bias chart.
    pub region: Option<String>,
    /// Year shown by the daily time series. Falls back to `year` when that
    /// names a single year.
    pub series_year: Option<i32>,
}

impl Selection {
    /// Year the daily series should cover, if one can be determined.
    #[must_use]
    pub fn effective_series_year(&self) -> Option<i32> {
        self.series_year.or_else(|| self.year.as_year())
    }
}

// ── Ordering & ranking ─────────────────────────────────────────────────

/// Ordering policy for keys discovered during a two-key rollup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyOrder {
    /// Order of first appearance in the input.
    Discovery,
    /// Byte-wise ascending.
    #[default]
    Lexicographic,
    /// Largest total first, ties broken lexicographically.
    TotalDescending,
}

/// Value used to rank groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Metric {
    /// Number of records in the group.
    #[default]
    Count,
    /// Sum of a numeric column across the group.
    Sum(NumericField),
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Sum(field) => write!(f, "{field}"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "count" {
            return Ok(Self::Count);
        }
        s.parse::<NumericField>()
            .map(Self::Sum)
            .map_err(|_| format!("unknown metric '{s}': expected \"count\" or a numeric column"))
    }
}

impl From<Metric> for String {
    fn from(value: Metric) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ── Rollups ─────────────────────────────────────────────────────────────

/// Number of records sharing one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedCount {
    /// Distinct non-empty value of the grouping column.
    pub key: String,
    /// Records carrying `key`.
    pub count: u64,
}

/// Record count plus per-column sums for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSum {
    /// Distinct non-empty value of the grouping column.
    pub key: String,
    /// Records carrying `key`.
    pub count: u64,
    /// Sum of each requested numeric column.
    pub sums: BTreeMap<NumericField, i64>,
}

impl GroupedSum {
    /// Sum for `field`, 0 when the field wasn't aggregated.
    #[must_use]
    pub fn sum(&self, field: NumericField) -> i64 {
        self.sums.get(&field).copied().unwrap_or(0)
    }
}

/// One primary key's counts, broken down by secondary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    /// Value of the primary grouping column.
    pub primary_key: String,
    /// Count per secondary key; keys this row never saw are absent.
    pub values: BTreeMap<String, u64>,
}

impl MatrixRow {
    /// Count for `secondary_key`, 0 when the row never saw it.
    #[must_use]
    pub fn value(&self, secondary_key: &str) -> u64 {
        self.values.get(secondary_key).copied().unwrap_or(0)
    }

    /// Sum across every secondary key.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.values().sum()
    }
}

/// Result of a two-key rollup.
///
/// `secondary_keys` is the union across all rows so that every row can be
/// given a value for every key before stacking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoKeyMatrix {
    /// One row per primary key.
    pub rows: Vec<MatrixRow>,
    /// Every secondary key seen in any row.
    pub secondary_keys: Vec<String>,
}

// ── Stacking ────────────────────────────────────────────────────────────

/// One layer of a stacked bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSegment {
    /// Layer this segment draws.
    pub secondary_key: String,
    /// Cumulative count below the segment.
    pub start: u64,
    /// `start` plus this layer's count.
    pub end: u64,
}

/// A full stacked bar for one primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedRow {
    /// Bar label.
    pub primary_key: String,
    /// One segment per layer, bottom first.
    pub segments: Vec<StackSegment>,
}

impl StackedRow {
    /// Height of the bar.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.segments.last().map_or(0, |s| s.end)
    }
}

/// Stacked rows plus what an axis needs to size itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stacked {
    /// One bar per primary key.
    pub rows: Vec<StackedRow>,
    /// Layer order shared by every row.
    pub keys: Vec<String>,
    /// Tallest bar (0 when there are no rows).
    pub max_end: u64,
}

// ── Calendar & time series ──────────────────────────────────────────────

/// Incident count for one (month, day-of-week) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarBin {
    /// 0 = January.
    pub month: u8,
    /// 0 = Sunday.
    pub day_of_week: u8,
    /// Dated records falling in this cell (at least 1).
    pub count: u64,
}

/// Dense 12 × 7 view over sparse [`CalendarBin`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    /// `cells[month][day_of_week]`.
    pub cells: [[u64; 7]; 12],
}

impl CalendarGrid {
    /// Places every bin into its cell; cells without a bin stay 0.
    #[must_use]
    pub fn from_bins(bins: &[CalendarBin]) -> Self {
        let mut cells = [[0u64; 7]; 12];
        for bin in bins {
            if let Some(row) = cells.get_mut(usize::from(bin.month))
                && let Some(cell) = row.get_mut(usize::from(bin.day_of_week))
            {
                *cell += bin.count;
            }
        }
        Self { cells }
    }

    /// Largest cell value.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Incident count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Records dated on `date` (0 for quiet days).
    pub count: u64,
}

/// Least-squares line `count = slope * x + intercept`, where `x` is the
/// day's midnight UTC in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    /// Change in count per millisecond.
    pub slope: f64,
    /// Count at the Unix epoch.
    pub intercept: f64,
}

/// Value of a [`TrendLine`] on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Day the line was evaluated on.
    pub date: NaiveDate,
    /// Fitted count on `date`.
    pub value: f64,
}

/// A trend line evaluated at the first and last day of its series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSegment {
    /// The fitted line.
    pub line: TrendLine,
    /// Line value on the first day of the series.
    pub start: TrendPoint,
    /// Line value on the last day of the series.
    pub end: TrendPoint,
}

/// Gap-filled daily counts for one year with its trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    /// Calendar year covered.
    pub year: i32,
    /// One point per day, January 1 first.
    pub points: Vec<DailyPoint>,
    /// `None` when the series is too short to fit.
    pub trend: Option<TrendSegment>,
    /// Largest daily count.
    pub max_count: u64,
}

// ── Dashboard ───────────────────────────────────────────────────────────

/// Region × bias chart: stacked across regions, or flat for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RegionBiasView {
    /// Every region, one stacked bar each.
    Stacked(Stacked),
    /// A single region, one bar per bias.
    Region {
        /// The selected region.
        region: String,
        /// Bias counts within the region.
        biases: Vec<GroupedCount>,
    },
}

/// Every chart's input for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Selection the dashboard was built for.
    pub selection: Selection,
    /// Records surviving the year filter.
    pub record_count: u64,
    /// Incidents per state on the boundary map.
    pub choropleth: Choropleth,
    /// Incidents per state name, largest first.
    pub states: Vec<GroupedCount>,
    /// Top bias motivations.
    pub biases: Vec<GroupedCount>,
    /// Region × bias breakdown.
    pub region_bias: RegionBiasView,
    /// Top offenses with victim/offender sums.
    pub offenses: Vec<GroupedSum>,
    /// Sparse heat-map cells.
    pub calendar: Vec<CalendarBin>,
    /// Daily series, when a series year is known.
    pub time_series: Option<TimeSeries>,
}

/// Tunables for [`Dashboard`] construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DashboardConfig {
    /// Length of the truncated rankings (bias pie, offense bars).
    pub top_n: usize,
    /// Row order of the region × bias stack.
    pub stack_row_order: KeyOrder,
    /// Layer order of the region × bias stack.
    pub stack_key_order: KeyOrder,
    /// Metric ranking the offense bars.
    pub offense_metric: Metric,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 15,
            stack_row_order: KeyOrder::Lexicographic,
            stack_key_order: KeyOrder::TotalDescending,
            offense_metric: Metric::Sum(NumericField::VictimCount),
        }
    }
}
