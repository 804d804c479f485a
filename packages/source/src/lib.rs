#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident file loading and field coercion.
//!
//! [`csv_file::load_incidents`] reads a delimited incident file and turns
//! every row into an
//! [`IncidentRecord`](hate_crime_incident_models::IncidentRecord). The
//! per-field coercion rules live in [`parsing`].

pub mod csv_file;
pub mod parsing;
pub mod progress;

pub use csv_file::{load_incidents, read_incidents};

/// Errors that can occur while loading an incident file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file isn't valid delimited text or a row couldn't be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row to map columns by.
    #[error("Incident file has no header row")]
    MissingHeader,
}

/// How to read an incident file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Stop after this many records.
    pub max_records: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_records: None,
        }
    }
}
