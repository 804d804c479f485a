//! Option lists for the year and region pickers.

use std::collections::BTreeSet;

use hate_crime_incident_models::{CategoricalField, IncidentRecord};

/// Distinct years with at least one dated incident, ascending.
#[must_use]
pub fn available_years(records: &[IncidentRecord]) -> Vec<i32> {
    records
        .iter()
        .filter_map(IncidentRecord::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct non-empty region names, sorted.
#[must_use]
pub fn available_regions(records: &[IncidentRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.categorical(CategoricalField::RegionName))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::incident;

    #[test]
    fn years_are_distinct_and_sorted() {
        let records = vec![
            incident("2003-05-01", "South"),
            incident("1991-01-01", "West"),
            incident("2003-07-09", "South"),
            incident("n/a", "West"),
        ];
        assert_eq!(available_years(&records), vec![1991, 2003]);
    }

    #[test]
    fn regions_skip_missing() {
        let records = vec![
            incident("2003-05-01", "South"),
            incident("2003-05-01", ""),
            incident("1991-01-01", "Midwest"),
            incident("2003-07-09", "South"),
        ];
        assert_eq!(available_regions(&records), vec!["Midwest", "South"]);
    }
}
