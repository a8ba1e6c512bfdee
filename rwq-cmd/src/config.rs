//! Global command line options and the configuration resolved from them.

use anyhow::Context;
use clap::{Args, ValueEnum};
use rwq_core::{LoadOptions, WorkingSet};
use rwq_data::artifact::Artifacts;
use std::path::{Path, PathBuf};

/// Published monitoring dataset, 1990 to 2018.
pub const DEFAULT_DATA_FILE: &str = "River_Water_Quality_Monitoring_1990_to_2018_-_pH.csv";

/// Pre-built clustered station map.
pub const DEFAULT_MAP_FILE: &str = "ni_water_quality_map_2018_clustered.html";

/// Pre-built written report.
pub const DEFAULT_REPORT_FILE: &str = "index.html";

/// How command output is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the pH monitoring CSV (optionally .gz compressed)
    #[arg(short = 'd', long, env = "RWQ_DATA", default_value = DEFAULT_DATA_FILE, global = true)]
    pub data: PathBuf,

    /// Path to the pre-built station map document
    #[arg(long, env = "RWQ_MAP", default_value = DEFAULT_MAP_FILE, global = true)]
    pub map: PathBuf,

    /// Path to the pre-built report document
    #[arg(long, env = "RWQ_REPORT", default_value = DEFAULT_REPORT_FILE, global = true)]
    pub report: PathBuf,

    /// Field delimiter of the data file
    #[arg(long, default_value_t = ',', global = true)]
    pub delimiter: char,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data: PathBuf,
    pub load_options: LoadOptions,
    pub artifacts: Artifacts,
    pub format: OutputFormat,
}

impl DashboardConfig {
    pub fn data_path(&self) -> &Path {
        &self.data
    }

    /// Load the working set named by this configuration.
    pub fn load_working_set(&self) -> anyhow::Result<WorkingSet> {
        WorkingSet::load_with(&self.data, &self.load_options)
            .with_context(|| format!("Failed to load monitoring data from {}", self.data.display()))
    }
}

impl TryFrom<&GlobalArgs> for DashboardConfig {
    type Error = anyhow::Error;

    fn try_from(args: &GlobalArgs) -> Result<Self, Self::Error> {
        if !args.delimiter.is_ascii() {
            anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", args.delimiter);
        }
        Ok(DashboardConfig {
            data: args.data.clone(),
            load_options: LoadOptions {
                delimiter: args.delimiter as u8,
            },
            artifacts: Artifacts::new(&args.map, &args.report),
            format: args.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GlobalArgs {
        GlobalArgs {
            data: PathBuf::from(DEFAULT_DATA_FILE),
            map: PathBuf::from(DEFAULT_MAP_FILE),
            report: PathBuf::from(DEFAULT_REPORT_FILE),
            delimiter: ',',
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn config_from_default_args() {
        let config = DashboardConfig::try_from(&args()).unwrap();
        assert_eq!(config.data_path(), Path::new(DEFAULT_DATA_FILE));
        assert_eq!(config.load_options, LoadOptions::default());
        assert_eq!(config.artifacts.map().path(), Path::new(DEFAULT_MAP_FILE));
        assert_eq!(config.artifacts.report().path(), Path::new(DEFAULT_REPORT_FILE));
    }

    #[test]
    fn config_accepts_ascii_delimiter() {
        let mut a = args();
        a.delimiter = '\t';
        let config = DashboardConfig::try_from(&a).unwrap();
        assert_eq!(config.load_options.delimiter, b'\t');
    }

    #[test]
    fn config_rejects_non_ascii_delimiter() {
        let mut a = args();
        a.delimiter = '§';
        assert!(DashboardConfig::try_from(&a).is_err());
    }

    #[test]
    fn missing_data_file_reports_path() {
        let mut a = args();
        a.data = PathBuf::from("/no/such/ph.csv");
        let config = DashboardConfig::try_from(&a).unwrap();
        let err = config.load_working_set().unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/ph.csv"));
    }
}
