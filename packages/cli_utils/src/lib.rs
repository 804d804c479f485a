#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the hate crime toolchain.
//!
//! Provides an `indicatif`-backed progress bar behind the
//! [`LoadProgress`] trait, plus [`init_logger`] which sets up
//! `indicatif-log-bridge` so that `log::info!` and friends are suspended
//! while progress bars redraw.

use std::sync::Arc;
use std::time::Duration;

use hate_crime_source::progress::LoadProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub use indicatif::MultiProgress;

/// An `indicatif` [`ProgressBar`] that implements [`LoadProgress`].
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style to switch to once `begin()` provides the input size.
    bar_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Creates a progress indicator for reading an incident file. Starts
    /// as a spinner and becomes a byte-length bar with ETA once
    /// [`LoadProgress::begin()`] reports the file size.
    #[must_use]
    pub fn records_bar(multi: &MultiProgress) -> Arc<dyn LoadProgress> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        let bar_style = ProgressStyle::with_template(
            "  {prefix} {wide_bar:.cyan/dim} {bytes}/{total_bytes} {msg} [{eta}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Arc::new(Self { bar, bar_style })
    }
}

impl LoadProgress for IndicatifProgress {
    fn begin(&self, label: &str, total_bytes: Option<u64>) {
        self.bar.set_prefix(label.to_string());
        if let Some(total) = total_bytes {
            self.bar.set_length(total);
            self.bar.set_position(0);
            // Switch from spinner to bar style now that we know the total.
            self.bar.set_style(self.bar_style.clone());
        }
    }

    fn advance(&self, rows: u64, bytes: u64) {
        self.bar.set_position(bytes);
        self.bar.set_message(format!("{rows} rows"));
    }

    fn finish(&self, rows: u64) {
        self.bar.finish_with_message(format!("{rows} rows"));
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while progress bars redraw.
///
/// Progress is drawn to stderr so stdout stays clean for command output.
///
/// Returns the [`MultiProgress`] that all progress bars must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

    // Build the pretty-env-logger logger manually so we can wrap it.
    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)

    log::set_max_level(level);

    multi
}
