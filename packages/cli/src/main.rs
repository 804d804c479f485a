#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the hate crime incident dashboard.
//!
//! ```text
//! hate_crime [--data <file>] [--config <file>] [--year <YYYY|All>] [--region <name>] <command>
//!
//! hate_crime dashboard [--series-year 2004]
//! hate_crime years
//! hate_crime regions
//! hate_crime top --field bias_desc [--metric victim_count] [-n 10]
//! hate_crime stack --primary region_name --secondary bias_desc
//! hate_crime heatmap
//! hate_crime series --year 2004
//! hate_crime choropleth
//! ```
//!
//! Every command prints JSON to stdout. Logs and the load progress bar go
//! to stderr via [`hate_crime_cli_utils::init_logger`].

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hate_crime_analytics::calendar::calendar_bins;
use hate_crime_analytics::choropleth::state_choropleth;
use hate_crime_analytics::dashboard::{build_dashboard, time_series};
use hate_crime_analytics::filter::filter;
use hate_crime_analytics::rank::{top_counts, top_sums};
use hate_crime_analytics::rollup::{order_matrix, rollup, rollup2, rollup_sums};
use hate_crime_analytics::selectors::{available_regions, available_years};
use hate_crime_analytics::stack::stack;
use hate_crime_analytics_models::{
    CalendarBin, CalendarGrid, FilterParams, KeyOrder, Metric, Selection, Year,
};
use hate_crime_cli_utils::IndicatifProgress;
use hate_crime_incident_models::{CategoricalField, IncidentRecord, NumericField};
use hate_crime_source::progress::{LoadProgress, LogProgress};
use serde::Serialize;

/// Rows between progress lines with `--no-progress`.
const LOG_PROGRESS_ROWS: u64 = 100_000;

#[derive(Parser)]
#[command(
    name = "hate_crime",
    about = "Aggregate hate crime incident data into dashboard-ready JSON"
)]
struct Cli {
    /// Incident file (overrides `dataset.path` in the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// TOML config file (built-in defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Year to restrict to, or "All"
    #[arg(long, global = true, default_value = "All")]
    year: Year,

    /// Restrict to one region
    #[arg(long, global = true)]
    region: Option<String>,

    /// Log load progress instead of drawing a progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Every chart for the current selection
    Dashboard {
        /// Year for the daily series (defaults to --year)
        #[arg(long)]
        series_year: Option<i32>,
    },
    /// Years present in the data
    Years,
    /// Regions present in the data
    Regions,
    /// Largest groups of one column
    Top {
        /// Column to group by
        #[arg(long, default_value = "bias_desc")]
        field: CategoricalField,
        /// "count" or a numeric column to sum
        #[arg(long, default_value = "count")]
        metric: Metric,
        /// Number of groups to keep
        #[arg(short, long, default_value = "15")]
        n: usize,
    },
    /// Stacked bars of one column against another
    Stack {
        /// Column giving one bar per value
        #[arg(long, default_value = "region_name")]
        primary: CategoricalField,
        /// Column giving the layers of each bar
        #[arg(long, default_value = "bias_desc")]
        secondary: CategoricalField,
        /// Bar order (defaults to `dashboard.stack_row_order`)
        #[arg(long)]
        row_order: Option<KeyOrder>,
        /// Layer order (defaults to `dashboard.stack_key_order`)
        #[arg(long)]
        key_order: Option<KeyOrder>,
    },
    /// Month × day-of-week heat map
    Heatmap,
    /// Dense daily counts with a trend line (needs a single --year)
    Series,
    /// Incident counts per state FIPS code
    Choropleth,
}

/// Output of the `heatmap` command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatMap {
    bins: Vec<CalendarBin>,
    grid: CalendarGrid,
    max_count: u64,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = hate_crime_cli_utils::init_logger();
    let cli = Cli::parse();

    let app_config = config::load(cli.config.as_deref())?;
    let options = app_config.dataset.load_options()?;
    let data = cli.data.unwrap_or(app_config.dataset.path);

    let progress: Arc<dyn LoadProgress> = if cli.no_progress {
        Arc::new(LogProgress::new(LOG_PROGRESS_ROWS))
    } else {
        IndicatifProgress::records_bar(&multi)
    };
    let records: Vec<IncidentRecord> = hate_crime_source::load_incidents(&data, &options, &progress)?;

    let params = FilterParams {
        year: cli.year,
        region: cli.region.clone(),
    };
    let dashboard_config = app_config.dashboard;

    match cli.command {
        Commands::Dashboard { series_year } => {
            let selection = Selection {
                year: cli.year,
                region: cli.region,
                series_year,
            };
            print_json(&build_dashboard(&records, &selection, &dashboard_config)?)?;
        }
        Commands::Years => print_json(&available_years(&records))?,
        Commands::Regions => print_json(&available_regions(&records))?,
        Commands::Top { field, metric, n } => {
            let selected = filter(&records, &params);
            let rows = selected.iter().copied();
            match metric {
                Metric::Count => {
                    print_json(&top_counts(rollup(rows, |r| r.categorical(field)), n))?;
                }
                Metric::Sum(_) => {
                    let groups = rollup_sums(rows, |r| r.categorical(field), NumericField::all());
                    print_json(&top_sums(groups, metric, n))?;
                }
            }
        }
        Commands::Stack {
            primary,
            secondary,
            row_order,
            key_order,
        } => {
            let selected = filter(&records, &params);
            let matrix = rollup2(
                selected.iter().copied(),
                |r| r.categorical(primary),
                |r| r.categorical(secondary),
            );
            let matrix = order_matrix(
                matrix,
                row_order.unwrap_or(dashboard_config.stack_row_order),
                key_order.unwrap_or(dashboard_config.stack_key_order),
            );
            print_json(&stack(&matrix))?;
        }
        Commands::Heatmap => {
            let selected = filter(&records, &params);
            let bins = calendar_bins(selected.iter().copied());
            let grid = CalendarGrid::from_bins(&bins);
            let max_count = grid.max();
            print_json(&HeatMap {
                bins,
                grid,
                max_count,
            })?;
        }
        Commands::Series => {
            let Some(year) = cli.year.as_year() else {
                eprintln!("The series command needs a single year, e.g. --year 2004");
                std::process::exit(2);
            };
            let selected = filter(&records, &params);
            print_json(&time_series(selected.iter().copied(), year)?)?;
        }
        Commands::Choropleth => {
            let selected = filter(&records, &params);
            print_json(&state_choropleth(selected.iter().copied()))?;
        }
    }

    Ok(())
}
