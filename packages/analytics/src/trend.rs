//! Ordinary least-squares trend over a daily series.
//!
//! The x coordinate of a day is its midnight UTC in epoch milliseconds, so
//! a slope reads as "incidents per millisecond". The fit uses the
//! mean-centred form of the normal equations, which is algebraically the
//! same as `(nΣxy − ΣxΣy) / (nΣx² − (Σx)²)` but keeps precision with
//! x values around 10^12.

use chrono::{NaiveDate, NaiveTime};
use hate_crime_analytics_models::{DailyPoint, TrendLine, TrendPoint, TrendSegment};

use crate::AnalyticsError;

/// x coordinate for `date`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn day_x(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// Value of `line` on `date`.
#[must_use]
pub fn evaluate(line: &TrendLine, date: NaiveDate) -> f64 {
    line.slope.mul_add(day_x(date), line.intercept)
}

/// Fits `count = slope * x + intercept` over `series`.
///
/// # Errors
///
/// Returns [`AnalyticsError::DegenerateRegression`] when fewer than two
/// points are given or every point shares the same date.
#[allow(clippy::cast_precision_loss)]
pub fn linear_trend(series: &[DailyPoint]) -> Result<TrendLine, AnalyticsError> {
    let degenerate = AnalyticsError::DegenerateRegression {
        points: series.len(),
    };
    if series.len() < 2 {
        return Err(degenerate);
    }

    let n = series.len() as f64;
    let xs: Vec<f64> = series.iter().map(|p| day_x(p.date)).collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = series.iter().map(|p| p.count as f64).sum::<f64>() / n;

    let (sxy, sxx) = xs
        .iter()
        .zip(series)
        .fold((0.0, 0.0), |(sxy, sxx), (x, p)| {
            let dx = x - mean_x;
            (dx.mul_add(p.count as f64 - mean_y, sxy), dx.mul_add(dx, sxx))
        });

    if sxx == 0.0 {
        return Err(degenerate);
    }

    let slope = sxy / sxx;
    let intercept = slope.mul_add(-mean_x, mean_y);

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(degenerate);
    }

    Ok(TrendLine { slope, intercept })
}

/// Fits `series` and evaluates the line at its first and last day.
///
/// # Errors
///
/// Same as [`linear_trend`].
pub fn trend_segment(series: &[DailyPoint]) -> Result<TrendSegment, AnalyticsError> {
    let line = linear_trend(series)?;
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(AnalyticsError::DegenerateRegression {
            points: series.len(),
        });
    };

    Ok(TrendSegment {
        line,
        start: TrendPoint {
            date: first.date,
            value: evaluate(&line, first.date),
        },
        end: TrendPoint {
            date: last.date,
            value: evaluate(&line, last.date),
        },
    })
}

#[cfg(test)]
mod tests {
    use hate_crime_incident_models::IncidentRecord;

    use super::*;
    use crate::daily::dense_daily_series;

    const MS_PER_DAY: f64 = 86_400_000.0;

    fn linear_series(year: i32, slope: u64, intercept: u64) -> Vec<DailyPoint> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        start
            .iter_days()
            .take(365)
            .enumerate()
            .map(|(i, date)| DailyPoint {
                date,
                count: slope * i as u64 + intercept,
            })
            .collect()
    }

    #[test]
    fn recovers_exact_line() {
        let series = linear_series(2001, 3, 7);
        let line = linear_trend(&series).unwrap();

        assert!((line.slope * MS_PER_DAY - 3.0).abs() < 1e-9);
        for (i, point) in series.iter().enumerate() {
            let expected = 3.0f64.mul_add(i as f64, 7.0);
            assert!(
                (evaluate(&line, point.date) - expected).abs() < 1e-6,
                "day {i}: {} vs {expected}",
                evaluate(&line, point.date)
            );
        }
    }

    #[test]
    fn matches_raw_sum_formula() {
        let series: Vec<DailyPoint> = [(1, 4), (2, 0), (5, 9), (9, 2), (10, 7)]
            .iter()
            .map(|(day, count)| DailyPoint {
                date: NaiveDate::from_ymd_opt(1995, 3, *day).unwrap(),
                count: *count,
            })
            .collect();

        // Work in days from the first point so the raw sums stay small.
        let origin = day_x(series[0].date);
        let n = series.len() as f64;
        let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
        for p in &series {
            let x = (day_x(p.date) - origin) / MS_PER_DAY;
            let y = p.count as f64;
            sx += x;
            sy += y;
            sxy += x * y;
            sxx += x * x;
        }
        let slope_per_day = (n * sxy - sx * sy) / (n * sxx - sx * sx);
        let intercept_at_origin = (sy - slope_per_day * sx) / n;

        let line = linear_trend(&series).unwrap();
        assert!((line.slope * MS_PER_DAY - slope_per_day).abs() < 1e-9);
        assert!((evaluate(&line, series[0].date) - intercept_at_origin).abs() < 1e-6);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let series =
            dense_daily_series(std::iter::empty::<&IncidentRecord>(), 2002).unwrap();
        let line = linear_trend(&series).unwrap();
        assert!(line.slope.abs() < f64::EPSILON);
        assert!(line.intercept.abs() < 1e-9);
    }

    #[test]
    fn too_few_points_is_an_error() {
        assert_eq!(
            linear_trend(&[]),
            Err(AnalyticsError::DegenerateRegression { points: 0 })
        );
        let one = [DailyPoint {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            count: 4,
        }];
        assert_eq!(
            linear_trend(&one),
            Err(AnalyticsError::DegenerateRegression { points: 1 })
        );
    }

    #[test]
    fn repeated_date_is_an_error() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let series = [
            DailyPoint { date, count: 1 },
            DailyPoint { date, count: 5 },
        ];
        assert_eq!(
            linear_trend(&series),
            Err(AnalyticsError::DegenerateRegression { points: 2 })
        );
    }

    #[test]
    fn segment_spans_first_and_last_day() {
        let series = linear_series(2001, 3, 7);
        let segment = trend_segment(&series).unwrap();
        assert_eq!(segment.start.date, series[0].date);
        assert_eq!(segment.end.date, series[364].date);
        assert!((segment.start.value - 7.0).abs() < 1e-6);
        assert!((segment.end.value - 1099.0).abs() < 1e-6);
    }
}
