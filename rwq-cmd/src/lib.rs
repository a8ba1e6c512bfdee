//! Command implementations for the RWQ CLI.
//!
//! Each subcommand loads the monitoring data once, runs the filter engine
//! on a station/date-range selection and prints one or more projections.
//! The map and report commands only touch the pre-built documents.

use clap::Subcommand;
use config::{DashboardConfig, GlobalArgs};
use query::{SelectionArgs, View};
use std::io::Write;

pub mod artifact;
pub mod config;
pub mod query;
pub mod render;
pub mod session;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List monitoring stations in order of first appearance
    Stations,

    /// Earliest and latest observation timestamps
    Bounds,

    /// Load the data and report how many rows were kept or set aside
    Check,

    /// pH readings over time for a station
    Series {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Filtered rows for a station: date, pH and station name
    Table {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Descriptive statistics of pH for a station
    Stats {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Series, table, statistics and map location together
    Dashboard {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Location of the pre-built station map
    Map {
        /// Print the document instead of its path
        #[arg(long)]
        show: bool,
    },

    /// Location of the pre-built report
    Report {
        /// Print the document instead of its path
        #[arg(long)]
        show: bool,
    },

    /// Browse the data interactively from stdin
    Session,
}

pub fn run(args: GlobalArgs, command: Command) -> anyhow::Result<()> {
    let config = DashboardConfig::try_from(&args)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Map { show } => {
            return artifact::run_artifact(config.artifacts.map(), show, config.format, &mut out)
        }
        Command::Report { show } => {
            return artifact::run_artifact(config.artifacts.report(), show, config.format, &mut out)
        }
        _ => {}
    }

    let working_set = config.load_working_set()?;
    log::info!(
        "cmd: loaded {} samples for {} stations from {}",
        working_set.len(),
        working_set.stations().len(),
        config.data_path().display()
    );

    let format = config.format;
    let result = match command {
        Command::Stations => query::run_stations(&working_set, format, &mut out),
        Command::Bounds => query::run_bounds(&working_set, format, &mut out),
        Command::Check => query::run_check(&working_set, format, &mut out),
        Command::Series { selection } => run_view(&working_set, &config, &selection, View::Series, &mut out),
        Command::Table { selection } => run_view(&working_set, &config, &selection, View::Table, &mut out),
        Command::Stats { selection } => run_view(&working_set, &config, &selection, View::Stats, &mut out),
        Command::Dashboard { selection } => {
            run_view(&working_set, &config, &selection, View::Dashboard, &mut out)
        }
        Command::Session => {
            let stdin = std::io::stdin();
            session::Session::new(&working_set, &config.artifacts, format)?.run(stdin.lock(), &mut out)
        }
        Command::Map { .. } | Command::Report { .. } => Ok(()),
    };
    out.flush()?;
    result
}

fn run_view<W: Write>(
    working_set: &rwq_core::WorkingSet,
    config: &DashboardConfig,
    selection: &SelectionArgs,
    view: View,
    out: &mut W,
) -> anyhow::Result<()> {
    query::run_view(working_set, &config.artifacts, selection, view, config.format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        global: GlobalArgs,
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parses_selection_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rwq", "stats", "--station", "Bann at Portna", "--start", "2017-01-01", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.global.format, config::OutputFormat::Json);
        match cli.command {
            Command::Stats { selection } => {
                assert_eq!(selection.station.as_deref(), Some("Bann at Portna"));
                assert!(selection.start.is_some());
                assert!(selection.end.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["rwq", "table", "--start", "14/03/2016x"]).is_err());
    }

    #[test]
    fn map_show_flag() {
        let cli = Cli::try_parse_from(["rwq", "--map", "m.html", "map", "--show"]).unwrap();
        assert_eq!(cli.global.map, std::path::PathBuf::from("m.html"));
        assert!(matches!(cli.command, Command::Map { show: true }));
    }
}
