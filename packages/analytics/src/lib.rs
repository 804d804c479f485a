#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation pipeline for the incident dashboard.
//!
//! Every public function is a pure transform from a slice of coerced
//! [`IncidentRecord`](hate_crime_incident_models::IncidentRecord)s (plus
//! selection parameters) to one of the structures in
//! [`hate_crime_analytics_models`]. Nothing is cached between calls; the
//! presentation layer re-runs [`dashboard::build_dashboard`] whenever the
//! selection changes.

pub mod calendar;
pub mod choropleth;
pub mod daily;
pub mod dashboard;
pub mod filter;
pub mod rank;
pub mod rollup;
pub mod selectors;
pub mod stack;
pub mod trend;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A regression needs at least two distinct x values.
    #[error("Cannot fit a trend line through {points} point(s) without distinct dates")]
    DegenerateRegression {
        /// Number of points supplied.
        points: usize,
    },

    /// The requested year can't be represented as a calendar.
    #[error("Year {year} is outside the supported calendar range")]
    InvalidYear {
        /// The rejected year.
        year: i32,
    },
}
