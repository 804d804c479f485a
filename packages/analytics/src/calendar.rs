//! (month, day-of-week) bucketing for the heat map.

use std::collections::BTreeMap;

use chrono::Datelike as _;
use hate_crime_analytics_models::CalendarBin;
use hate_crime_incident_models::IncidentRecord;

/// Counts dated records per (month, day-of-week) cell.
///
/// Only cells with at least one record are returned, sorted by month then
/// weekday. Consumers drawing a full grid should default the rest to 0
/// (see [`hate_crime_analytics_models::CalendarGrid`]).
#[allow(clippy::cast_possible_truncation)]
pub fn calendar_bins<'a, I>(records: I) -> Vec<CalendarBin>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let mut cells: BTreeMap<(u8, u8), u64> = BTreeMap::new();

    for date in records.into_iter().filter_map(|r| r.incident_date) {
        let month = date.month0() as u8;
        let day_of_week = date.weekday().num_days_from_sunday() as u8;
        *cells.entry((month, day_of_week)).or_insert(0) += 1;
    }

    cells
        .into_iter()
        .map(|((month, day_of_week), count)| CalendarBin {
            month,
            day_of_week,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::incident;

    #[test]
    fn bins_by_month_and_weekday() {
        // 1999-01-01 was a Friday, 1999-01-08 the following Friday.
        let records = vec![
            incident("1999-01-01", ""),
            incident("1999-01-08", ""),
            incident("1999-03-14", ""),
        ];
        let bins = calendar_bins(&records);
        assert_eq!(
            bins,
            vec![
                CalendarBin {
                    month: 0,
                    day_of_week: 5,
                    count: 2
                },
                CalendarBin {
                    month: 2,
                    day_of_week: 0,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn empty_cells_are_absent() {
        let records = vec![incident("2004-07-04", "")];
        let bins = calendar_bins(&records);
        assert_eq!(bins.len(), 1);
        assert!(bins.iter().all(|b| b.count >= 1));
    }

    #[test]
    fn undated_records_are_skipped() {
        let records = vec![incident("garbage", "South"), incident("2004-07-04", "South")];
        let total: u64 = calendar_bins(&records).iter().map(|b| b.count).sum();
        assert_eq!(total, 1);
    }
}
