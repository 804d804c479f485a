//! Delimited incident file reader.
//!
//! Reads the header row, deserializes every following row into a
//! [`RawIncident`] by column name and coerces it with
//! [`normalize`](crate::parsing::normalize). Unknown columns are ignored and
//! missing columns read as absent.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use hate_crime_incident_models::{IncidentRecord, RawIncident};

use crate::parsing::normalize;
use crate::progress::LoadProgress;
use crate::{LoadOptions, SourceError};

/// Rows between progress updates.
const PROGRESS_BATCH: u64 = 1_000;

/// Reads and coerces every incident from `reader`.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the input isn't well-formed delimited
/// text or a row can't be decoded, and [`SourceError::MissingHeader`] if
/// the header row is empty.
pub fn read_incidents<R: Read>(
    reader: R,
    options: &LoadOptions,
    progress: &Arc<dyn LoadProgress>,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    if reader.headers()?.iter().all(str::is_empty) {
        return Err(SourceError::MissingHeader);
    }

    let mut records: Vec<IncidentRecord> = Vec::new();
    let mut raw = csv::StringRecord::new();
    let headers = reader.headers()?.clone();

    loop {
        if options
            .max_records
            .is_some_and(|max| records.len() as u64 >= max)
        {
            log::info!("Reached limit of {} records", records.len());
            break;
        }
        if !reader.read_record(&mut raw)? {
            break;
        }

        let row: RawIncident = raw.deserialize(Some(&headers))?;
        records.push(normalize(row));

        let rows = records.len() as u64;
        if rows % PROGRESS_BATCH == 0 {
            progress.advance(rows, reader.position().byte());
        }
    }
    progress.finish(records.len() as u64);

    let undated = records.iter().filter(|r| r.incident_date.is_none()).count();
    if undated > 0 {
        log::warn!(
            "{undated} of {} incidents have a missing or malformed incident_date",
            records.len()
        );
    }

    Ok(records)
}

/// Opens `path` and reads it with [`read_incidents`].
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file can't be opened, otherwise the
/// same errors as [`read_incidents`].
pub fn load_incidents(
    path: &Path,
    options: &LoadOptions,
    progress: &Arc<dyn LoadProgress>,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let file = File::open(path)?;
    let total_bytes = file.metadata().ok().map(|m| m.len());
    progress.begin(&path.display().to_string(), total_bytes);

    let records = read_incidents(file, options, progress)?;
    log::info!("Loaded {} incidents from {}", records.len(), path.display());

    Ok(records)
}
