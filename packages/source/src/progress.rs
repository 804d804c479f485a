//! Load progress reporting.
//!
//! [`LoadProgress`] is what the incident reader talks to while it walks a
//! file. Bytes are the unit of progress because the row count of a
//! delimited file isn't known until it has been read.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Receives progress from an incident file load.
pub trait LoadProgress: Send + Sync {
    /// Called once before the first row. `total_bytes` is the input size
    /// when it is known up front.
    fn begin(&self, label: &str, total_bytes: Option<u64>);

    /// Called periodically with the rows read so far and the byte offset
    /// reached in the input.
    fn advance(&self, rows: u64, bytes: u64);

    /// Called once after the last row.
    fn finish(&self, rows: u64);
}

/// Discards every update.
pub struct Silent;

impl LoadProgress for Silent {
    fn begin(&self, _label: &str, _total_bytes: Option<u64>) {}
    fn advance(&self, _rows: u64, _bytes: u64) {}
    fn finish(&self, _rows: u64) {}
}

/// Shared [`Silent`] reporter.
#[must_use]
pub fn silent() -> Arc<dyn LoadProgress> {
    Arc::new(Silent)
}

/// Reports through `log::info!` every `every` rows.
pub struct LogProgress {
    every: u64,
    next: AtomicU64,
}

impl LogProgress {
    #[must_use]
    pub fn new(every: u64) -> Self {
        let every = every.max(1);
        Self {
            every,
            next: AtomicU64::new(every),
        }
    }
}

impl LoadProgress for LogProgress {
    fn begin(&self, label: &str, total_bytes: Option<u64>) {
        self.next.store(self.every, Ordering::Relaxed);
        match total_bytes {
            Some(total) => log::info!("Reading {label} ({total} bytes)"),
            None => log::info!("Reading {label}"),
        }
    }

    fn advance(&self, rows: u64, bytes: u64) {
        let next = self.next.load(Ordering::Relaxed);
        if rows >= next {
            log::info!("{rows} rows read ({bytes} bytes)");
            let skipped = (rows - next) / self.every + 1;
            self.next
                .store(next + skipped * self.every, Ordering::Relaxed);
        }
    }

    fn finish(&self, rows: u64) {
        log::info!("Finished reading {rows} rows");
    }
}
