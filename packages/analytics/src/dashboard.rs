//! One-shot construction of every chart for a selection.
//!
//! [`build_dashboard`] is the pipeline the presentation layer calls each
//! time the selection changes. It is a pure function of its inputs, so a
//! caller may memoize on `(dataset version, selection, config)`.

use hate_crime_analytics_models::{
    Dashboard, DashboardConfig, FilterParams, RegionBiasView, Selection, TimeSeries, Year,
};
use hate_crime_incident_models::{CategoricalField, IncidentRecord, NumericField};

use crate::AnalyticsError;
use crate::calendar::calendar_bins;
use crate::choropleth::state_choropleth;
use crate::daily::dense_daily_series;
use crate::filter::{filter, matches};
use crate::rank::{top_counts, top_sums};
use crate::rollup::{order_counts, order_matrix, rollup, rollup2, rollup_sums};
use crate::stack::stack;
use crate::trend::trend_segment;

/// Region × bias view for the selected records.
///
/// With no region selected every region becomes a stacked bar; with one
/// selected, that region's biases are listed flat.
#[must_use]
pub fn region_bias_view(
    records: &[&IncidentRecord],
    region: Option<&str>,
    config: &DashboardConfig,
) -> RegionBiasView {
    if let Some(region) = region {
        let in_region = records.iter().copied().filter(|r| {
            r.categorical(CategoricalField::RegionName) == Some(region)
        });
        let biases = order_counts(
            rollup(in_region, |r| r.categorical(CategoricalField::BiasDesc)),
            config.stack_key_order,
        );
        return RegionBiasView::Region {
            region: region.to_string(),
            biases,
        };
    }

    let matrix = rollup2(
        records.iter().copied(),
        |r| r.categorical(CategoricalField::RegionName),
        |r| r.categorical(CategoricalField::BiasDesc),
    );
    let matrix = order_matrix(matrix, config.stack_row_order, config.stack_key_order);
    RegionBiasView::Stacked(stack(&matrix))
}

/// Daily series for `year` over all of `records`, with its trend.
///
/// A series that can't be fitted keeps its points and drops the trend.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidYear`] if `year` can't be represented.
pub fn time_series<'a, I>(records: I, year: i32) -> Result<TimeSeries, AnalyticsError>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let params = FilterParams::year(Year::Of(year));
    let in_year = records.into_iter().filter(|r| matches(r, &params));
    let points = dense_daily_series(in_year, year)?;

    let trend = match trend_segment(&points) {
        Ok(segment) => Some(segment),
        Err(e) => {
            log::warn!("No trend line for {year}: {e}");
            None
        }
    };
    let max_count = points.iter().map(|p| p.count).max().unwrap_or(0);

    Ok(TimeSeries {
        year,
        points,
        trend,
        max_count,
    })
}

/// Computes every chart's structure for `selection`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidYear`] if the time-series year can't be
/// represented.
pub fn build_dashboard(
    records: &[IncidentRecord],
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<Dashboard, AnalyticsError> {
    let filtered = filter(records, &FilterParams::year(selection.year));
    let rows = || filtered.iter().copied();

    let states = top_counts(
        rollup(rows(), |r| r.categorical(CategoricalField::StateName)),
        usize::MAX,
    );
    let biases = top_counts(
        rollup(rows(), |r| r.categorical(CategoricalField::BiasDesc)),
        config.top_n,
    );
    let offenses = top_sums(
        rollup_sums(
            rows(),
            |r| r.categorical(CategoricalField::OffenseName),
            NumericField::all(),
        ),
        config.offense_metric,
        config.top_n,
    );

    let time_series = selection
        .effective_series_year()
        .map(|year| time_series(records, year))
        .transpose()?;

    log::debug!(
        "dashboard year={} region={:?}: {} records, {} states, {} biases, {} offenses",
        selection.year,
        selection.region,
        filtered.len(),
        states.len(),
        biases.len(),
        offenses.len()
    );

    Ok(Dashboard {
        selection: selection.clone(),
        record_count: filtered.len() as u64,
        choropleth: state_choropleth(rows()),
        states,
        biases,
        region_bias: region_bias_view(&filtered, selection.region.as_deref(), config),
        offenses,
        calendar: calendar_bins(rows()),
        time_series,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hate_crime_analytics_models::{KeyOrder, Metric};

    use super::*;

    #[allow(clippy::too_many_arguments)]
    fn record(
        date: &str,
        state: &str,
        abbr: &str,
        region: &str,
        bias: &str,
        offense: &str,
        victims: i64,
    ) -> IncidentRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        IncidentRecord {
            incident_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            state_name: opt(state),
            state_abbr: opt(abbr),
            region_name: opt(region),
            bias_desc: opt(bias),
            offense_name: opt(offense),
            victim_count: victims,
            adult_victim_count: victims,
            juvenile_victim_count: 0,
            total_offender_count: 1,
        }
    }

    fn dataset() -> Vec<IncidentRecord> {
        vec![
            record("1999-01-01", "Texas", "TX", "South", "Anti-Black", "Intimidation", 1),
            record("1999-01-01", "Texas", "TX", "South", "Anti-Jewish", "Vandalism", 2),
            record("1999-06-15", "Oregon", "OR", "West", "Anti-Black", "Intimidation", 4),
            record("2000-03-03", "Ohio", "OH", "Midwest", "Anti-Gay", "Assault", 1),
            record("bad-date", "Texas", "TX", "South", "Anti-Black", "Assault", 9),
        ]
    }

    #[test]
    fn all_years_uses_every_record() {
        let records = dataset();
        let dashboard =
            build_dashboard(&records, &Selection::default(), &DashboardConfig::default())
                .unwrap();

        assert_eq!(dashboard.record_count, 5);
        assert_eq!(dashboard.states[0].key, "Texas");
        assert_eq!(dashboard.states[0].count, 3);
        assert_eq!(dashboard.offenses[0].key, "Assault");
        assert!(dashboard.time_series.is_none());
        // The undated record is kept for field rollups but not the heat map.
        let binned: u64 = dashboard.calendar.iter().map(|b| b.count).sum();
        assert_eq!(binned, 4);
    }

    #[test]
    fn specific_year_scopes_every_chart() {
        let records = dataset();
        let selection = Selection {
            year: Year::Of(1999),
            ..Selection::default()
        };
        let dashboard =
            build_dashboard(&records, &selection, &DashboardConfig::default()).unwrap();

        assert_eq!(dashboard.record_count, 3);
        let tx = dashboard
            .choropleth
            .entries
            .iter()
            .find(|e| e.label.as_deref() == Some("TX"))
            .unwrap();
        assert_eq!(tx.count, 2);
        assert_eq!(dashboard.choropleth.max_count, 2);

        let series = dashboard.time_series.unwrap();
        assert_eq!(series.year, 1999);
        assert_eq!(series.points.len(), 365);
        assert_eq!(series.points[0].count, 2);
        assert_eq!(series.max_count, 2);
        assert!(series.trend.is_some());

        let RegionBiasView::Stacked(stacked) = dashboard.region_bias else {
            panic!("expected a stacked view");
        };
        let rows: Vec<&str> = stacked.rows.iter().map(|r| r.primary_key.as_str()).collect();
        assert_eq!(rows, vec!["South", "West"]);
        assert_eq!(stacked.keys[0], "Anti-Black");
        assert_eq!(stacked.max_end, 2);
    }

    #[test]
    fn series_year_is_independent_of_filter_year() {
        let records = dataset();
        let selection = Selection {
            year: Year::Of(1999),
            region: None,
            series_year: Some(2000),
        };
        let dashboard =
            build_dashboard(&records, &selection, &DashboardConfig::default()).unwrap();
        let series = dashboard.time_series.unwrap();
        assert_eq!(series.points.len(), 366);
        assert_eq!(series.points.iter().map(|p| p.count).sum::<u64>(), 1);
    }

    #[test]
    fn time_series_accepts_borrowed_selection() {
        let records = dataset();
        let params = FilterParams {
            year: Year::All,
            region: Some("West".to_string()),
        };
        let west = filter(&records, &params);
        let series = time_series(west.iter().copied(), 1999).unwrap();

        assert_eq!(series.points.len(), 365);
        assert_eq!(series.points.iter().map(|p| p.count).sum::<u64>(), 1);
        assert_eq!(series.points[165].count, 1);
        assert_eq!(series.max_count, 1);
    }

    #[test]
    fn region_drill_down_lists_biases() {
        let records = dataset();
        let selection = Selection {
            year: Year::All,
            region: Some("South".to_string()),
            series_year: None,
        };
        let config = DashboardConfig {
            stack_key_order: KeyOrder::TotalDescending,
            ..DashboardConfig::default()
        };
        let dashboard = build_dashboard(&records, &selection, &config).unwrap();

        let RegionBiasView::Region { region, biases } = dashboard.region_bias else {
            panic!("expected a single-region view");
        };
        assert_eq!(region, "South");
        assert_eq!(biases[0].key, "Anti-Black");
        assert_eq!(biases[0].count, 2);
        assert_eq!(biases.len(), 2);
        // Other charts are not narrowed by the region drill-down.
        assert_eq!(dashboard.record_count, 5);
    }

    #[test]
    fn top_n_truncates_rankings() {
        let records = dataset();
        let config = DashboardConfig {
            top_n: 1,
            offense_metric: Metric::Count,
            ..DashboardConfig::default()
        };
        let dashboard = build_dashboard(&records, &Selection::default(), &config).unwrap();
        assert_eq!(dashboard.biases.len(), 1);
        assert_eq!(dashboard.biases[0].key, "Anti-Black");
        assert_eq!(dashboard.offenses.len(), 1);
        assert_eq!(dashboard.offenses[0].key, "Assault");
    }
}
