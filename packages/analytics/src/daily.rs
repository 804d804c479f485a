//! Gap-filled daily series.

use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate};
use hate_crime_analytics_models::DailyPoint;
use hate_crime_incident_models::IncidentRecord;

use crate::AnalyticsError;

/// First and last day of `year`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidYear`] if `year` is outside the
/// calendar range chrono supports.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), AnalyticsError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    start.zip(end).ok_or(AnalyticsError::InvalidYear { year })
}

/// Builds one point per day of `year`, ascending, with zero-count days
/// included.
///
/// Records dated outside `year` or without a date are ignored, so the sum
/// of all counts equals the number of records dated within `year`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidYear`] if `year` can't be represented.
pub fn dense_daily_series<'a, I>(records: I, year: i32) -> Result<Vec<DailyPoint>, AnalyticsError>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let (start, end) = year_bounds(year)?;

    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for date in records
        .into_iter()
        .filter_map(|r| r.incident_date)
        .filter(|d| d.year() == year)
    {
        *by_day.entry(date).or_insert(0) += 1;
    }

    let points: Vec<DailyPoint> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DailyPoint {
            date,
            count: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    log::debug!(
        "daily series {year}: {} days, {} active",
        points.len(),
        by_day.len()
    );

    Ok(points)
}
