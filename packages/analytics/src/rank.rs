//! Top-N ranking of grouped results.
//!
//! Groups are ordered by metric descending. Equal metrics fall back to the
//! group key ascending so the output never depends on discovery order.

use hate_crime_analytics_models::{GroupedCount, GroupedSum, Metric};

/// Anything with a group key to break ties on.
pub trait Keyed {
    /// The group key.
    fn key(&self) -> &str;
}

impl Keyed for GroupedCount {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for GroupedSum {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Sorts `groups` by `metric` descending and keeps the first `n`.
#[must_use]
pub fn rank<T, F>(mut groups: Vec<T>, n: usize, metric: F) -> Vec<T>
where
    T: Keyed,
    F: Fn(&T) -> f64,
{
    groups.sort_by(|a, b| {
        metric(b)
            .total_cmp(&metric(a))
            .then_with(|| a.key().cmp(b.key()))
    });
    groups.truncate(n);
    groups
}

/// Value of `metric` for a summed group.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metric_value(group: &GroupedSum, metric: Metric) -> f64 {
    match metric {
        Metric::Count => group.count as f64,
        Metric::Sum(field) => group.sum(field) as f64,
    }
}

/// Ranks plain counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn top_counts(groups: Vec<GroupedCount>, n: usize) -> Vec<GroupedCount> {
    rank(groups, n, |g| g.count as f64)
}

/// Ranks summed groups by `metric`.
#[must_use]
pub fn top_sums(groups: Vec<GroupedSum>, metric: Metric, n: usize) -> Vec<GroupedSum> {
    rank(groups, n, |g| metric_value(g, metric))
}
