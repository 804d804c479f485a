//! Single- and two-key grouping.
//!
//! Groups appear in the order their key is first seen. Records whose key
//! is absent or empty are skipped for that rollup only; no sentinel group
//! is ever created.

use std::collections::{BTreeMap, BTreeSet};

use hate_crime_analytics_models::{GroupedCount, GroupedSum, KeyOrder, MatrixRow, TwoKeyMatrix};
use hate_crime_incident_models::{IncidentRecord, NumericField};

fn present(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

/// Counts records per key.
pub fn rollup<'a, I, F>(records: I, key: F) -> Vec<GroupedCount>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
    F: Fn(&'a IncidentRecord) -> Option<&'a str>,
{
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut groups: Vec<GroupedCount> = Vec::new();

    for record in records {
        let Some(k) = present(key(record)) else {
            continue;
        };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(GroupedCount {
                key: k.to_string(),
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].count += 1;
    }

    groups
}

/// Counts records per key and sums each of `fields` across the group.
///
/// Every group carries an entry for every requested field, even when all
/// of its values were 0.
pub fn rollup_sums<'a, I, F>(records: I, key: F, fields: &[NumericField]) -> Vec<GroupedSum>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
    F: Fn(&'a IncidentRecord) -> Option<&'a str>,
{
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut groups: Vec<GroupedSum> = Vec::new();

    for record in records {
        let Some(k) = present(key(record)) else {
            continue;
        };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(GroupedSum {
                key: k.to_string(),
                count: 0,
                sums: fields.iter().map(|f| (*f, 0)).collect(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.count += 1;
        for field in fields {
            *group.sums.entry(*field).or_insert(0) += record.numeric(*field);
        }
    }

    groups
}

/// Counts records per `(primary, secondary)` pair.
///
/// A record contributes only when both keys are present. Rows keep primary
/// discovery order and `secondary_keys` is the union over all rows in
/// first-seen order; use [`order_matrix`] for anything else.
pub fn rollup2<'a, I, P, S>(records: I, primary: P, secondary: S) -> TwoKeyMatrix
where
    I: IntoIterator<Item = &'a IncidentRecord>,
    P: Fn(&'a IncidentRecord) -> Option<&'a str>,
    S: Fn(&'a IncidentRecord) -> Option<&'a str>,
{
    let mut row_index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut rows: Vec<MatrixRow> = Vec::new();
    let mut seen_keys: BTreeSet<&str> = BTreeSet::new();
    let mut secondary_keys: Vec<String> = Vec::new();

    for record in records {
        let (Some(p), Some(s)) = (present(primary(record)), present(secondary(record))) else {
            continue;
        };

        let slot = *row_index.entry(p).or_insert_with(|| {
            rows.push(MatrixRow {
                primary_key: p.to_string(),
                values: BTreeMap::new(),
            });
            rows.len() - 1
        });
        *rows[slot].values.entry(s.to_string()).or_insert(0) += 1;

        if seen_keys.insert(s) {
            secondary_keys.push(s.to_string());
        }
    }

    TwoKeyMatrix {
        rows,
        secondary_keys,
    }
}

/// Applies explicit ordering policies to a matrix's rows and secondary keys.
#[must_use]
pub fn order_matrix(mut matrix: TwoKeyMatrix, rows: KeyOrder, keys: KeyOrder) -> TwoKeyMatrix {
    match rows {
        KeyOrder::Discovery => {}
        KeyOrder::Lexicographic => matrix.rows.sort_by(|a, b| a.primary_key.cmp(&b.primary_key)),
        KeyOrder::TotalDescending => matrix.rows.sort_by(|a, b| {
            b.total()
                .cmp(&a.total())
                .then_with(|| a.primary_key.cmp(&b.primary_key))
        }),
    }

    match keys {
        KeyOrder::Discovery => {}
        KeyOrder::Lexicographic => matrix.secondary_keys.sort(),
        KeyOrder::TotalDescending => {
            let totals: BTreeMap<&str, u64> = matrix
                .secondary_keys
                .iter()
                .map(|k| {
                    let total = matrix.rows.iter().map(|r| r.value(k)).sum();
                    (k.as_str(), total)
                })
                .collect();
            let mut ordered = matrix.secondary_keys.clone();
            ordered.sort_by(|a, b| {
                totals[b.as_str()]
                    .cmp(&totals[a.as_str()])
                    .then_with(|| a.cmp(b))
            });
            matrix.secondary_keys = ordered;
        }
    }

    matrix
}

/// Applies an ordering policy to single-key counts.
#[must_use]
pub fn order_counts(mut groups: Vec<GroupedCount>, order: KeyOrder) -> Vec<GroupedCount> {
    match order {
        KeyOrder::Discovery => {}
        KeyOrder::Lexicographic => groups.sort_by(|a, b| a.key.cmp(&b.key)),
        KeyOrder::TotalDescending => {
            groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        }
    }
    groups
}
