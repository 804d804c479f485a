//! Cumulative stacking of two-key rollups.

use hate_crime_analytics_models::{StackSegment, Stacked, StackedRow, TwoKeyMatrix};

/// Converts each matrix row into contiguous segments, one per secondary
/// key in `matrix.secondary_keys` order.
///
/// Keys a row never saw still get a zero-width segment so every row has
/// the same layer structure.
#[must_use]
pub fn stack(matrix: &TwoKeyMatrix) -> Stacked {
    let rows: Vec<StackedRow> = matrix
        .rows
        .iter()
        .map(|row| {
            let mut running = 0u64;
            let segments = matrix
                .secondary_keys
                .iter()
                .map(|key| {
                    let start = running;
                    running = start + row.value(key);
                    StackSegment {
                        secondary_key: key.clone(),
                        start,
                        end: running,
                    }
                })
                .collect();
            StackedRow {
                primary_key: row.primary_key.clone(),
                segments,
            }
        })
        .collect();

    let max_end = rows.iter().map(StackedRow::total).max().unwrap_or(0);

    Stacked {
        rows,
        keys: matrix.secondary_keys.clone(),
        max_end,
    }
}
