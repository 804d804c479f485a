//! Joins per-state counts onto boundary codes for the state map.

use std::collections::BTreeMap;

use hate_crime_geography_models::fips;
use hate_crime_geography_models::{Choropleth, ChoroplethEntry};
use hate_crime_incident_models::{CategoricalField, IncidentRecord};

use crate::rollup::rollup;

/// Builds one map entry per code in `codes`.
///
/// Incidents are counted by `state_abbr`, ignoring ASCII case. Codes that
/// don't resolve to a state still get an entry (count 0, no label) but
/// never contribute to `max_count`.
pub fn choropleth<'a, I, C>(records: I, codes: C) -> Choropleth
where
    I: IntoIterator<Item = &'a IncidentRecord>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for group in rollup(records, |r| r.categorical(CategoricalField::StateAbbr)) {
        *counts.entry(group.key.to_ascii_uppercase()).or_insert(0) += group.count;
    }

    let unmapped: u64 = counts
        .iter()
        .filter(|(abbr, _)| fips::abbr_to_fips(abbr).is_none())
        .map(|(_, count)| count)
        .sum();
    if unmapped > 0 {
        log::debug!("{unmapped} incident(s) carry a state_abbr outside the state table");
    }

    let entries: Vec<ChoroplethEntry> = codes
        .into_iter()
        .map(|code| {
            let code = code.as_ref();
            fips::lookup(code).map_or_else(
                || ChoroplethEntry {
                    code: code.to_string(),
                    label: None,
                    name: None,
                    count: 0,
                },
                |state| ChoroplethEntry {
                    code: code.to_string(),
                    label: Some(state.abbr.to_string()),
                    name: Some(state.name.to_string()),
                    count: counts.get(state.abbr).copied().unwrap_or(0),
                },
            )
        })
        .collect();

    let max_count = entries
        .iter()
        .filter(|e| e.is_resolved())
        .map(|e| e.count)
        .max()
        .unwrap_or(0);

    Choropleth { entries, max_count }
}

/// [`choropleth`] over every state in the FIPS table.
pub fn state_choropleth<'a, I>(records: I) -> Choropleth
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    choropleth(records, fips::codes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_state(abbr: &str) -> IncidentRecord {
        IncidentRecord {
            state_abbr: Some(abbr.to_string()),
            ..IncidentRecord::default()
        }
    }

    #[test]
    fn every_state_gets_an_entry() {
        let records = vec![in_state("TX"), in_state("TX"), in_state("CA")];
        let map = state_choropleth(&records);
        assert_eq!(map.entries.len(), 51);
        assert_eq!(map.max_count, 2);

        let tx = map.entries.iter().find(|e| e.code == "48").unwrap();
        assert_eq!(tx.label.as_deref(), Some("TX"));
        assert_eq!(tx.name.as_deref(), Some("Texas"));
        assert_eq!(tx.count, 2);

        let wy = map.entries.iter().find(|e| e.code == "56").unwrap();
        assert_eq!(wy.count, 0);
    }

    #[test]
    fn unresolved_codes_are_zero_and_outside_domain() {
        let records = vec![in_state("CA"), in_state("GU"), in_state("GU"), in_state("GU")];
        let map = choropleth(&records, ["06", "66", "72"]);

        assert_eq!(map.entries.len(), 3);
        assert_eq!(map.entries[0].count, 1);
        assert!(!map.entries[1].is_resolved());
        assert_eq!(map.entries[1].count, 0);
        assert_eq!(map.entries[2].label, None);
        assert_eq!(map.max_count, 1);
    }

    #[test]
    fn abbreviation_case_is_ignored() {
        let records = vec![in_state("tx"), in_state("Tx"), in_state("TX"), in_state("zz")];
        let map = state_choropleth(&records);

        let tx = map.entries.iter().find(|e| e.code == "48").unwrap();
        assert_eq!(tx.count, 3);
        assert_eq!(map.max_count, 3);
        assert_eq!(map.entries.iter().map(|e| e.count).sum::<u64>(), 3);
    }

    #[test]
    fn no_data_has_zero_domain() {
        let map = state_choropleth(std::iter::empty::<&IncidentRecord>());
        assert_eq!(map.max_count, 0);
        assert!(map.entries.iter().all(|e| e.count == 0));
    }
}
