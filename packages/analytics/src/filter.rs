//! Year and region filtering.

use hate_crime_analytics_models::{FilterParams, Year};
use hate_crime_incident_models::IncidentRecord;

/// Returns `true` if `record` passes `params`.
///
/// A record without a parsed date never matches a specific year but always
/// matches [`Year::All`].
#[must_use]
pub fn matches(record: &IncidentRecord, params: &FilterParams) -> bool {
    let year_ok = match params.year {
        Year::All => true,
        Year::Of(year) => record.year() == Some(year),
    };

    year_ok
        && params
            .region
            .as_deref()
            .is_none_or(|region| record.region_name.as_deref() == Some(region))
}

/// Narrows `records` by year and optional region, preserving input order.
#[must_use]
pub fn filter<'a>(records: &'a [IncidentRecord], params: &FilterParams) -> Vec<&'a IncidentRecord> {
    let filtered: Vec<&IncidentRecord> =
        records.iter().filter(|r| matches(r, params)).collect();

    log::debug!(
        "filter year={} region={:?}: {} of {} records",
        params.year,
        params.region,
        filtered.len(),
        records.len()
    );

    filtered
}
