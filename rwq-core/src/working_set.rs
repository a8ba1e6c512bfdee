//! Record loader and the read-only working set it produces.
//!
//! # Input format
//!
//! Headered delimited text, comma separated by default. See
//! [`crate::schema`] for the required columns and their tolerance rules.
//! A path ending in `.gz` is decompressed while it is read.
//!
//! ```text
//! X,Y,OBJECTID,Station_Name,Date,PH
//! -5.93,54.57,1,Lagan at Stranmillis,1990/01/10 00:00:00+00,7.4
//! ```

use crate::error::{InvalidCriteria, LoadError};
use crate::filter::{self, Criteria, FilteredView};
use crate::record::{RawRecord, Rejection, Sample};
use crate::schema::ColumnMap;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Options controlling how the source table is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { delimiter: b',' }
    }
}

/// Row counts gathered while loading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Data rows read from the source, excluding the header
    pub rows_read: usize,
    /// Rows kept in the working set
    pub kept: usize,
    /// Rows dropped because pH was empty or not a number
    pub missing_ph: usize,
    /// Kept rows without a parseable date
    pub undated: usize,
    /// Kept rows whose X/Y are absent or outside degree ranges
    pub non_geographic: usize,
}

/// The full set of normalized samples, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    samples: Vec<Sample>,
    stations: Vec<String>,
    summary: LoadSummary,
}

impl WorkingSet {
    /// Load a working set from a file with default options.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<WorkingSet, LoadError> {
        WorkingSet::load_with(path, &LoadOptions::default())
    }

    /// Load a working set from a file.
    pub fn load_with<P: AsRef<Path>>(
        path: P,
        options: &LoadOptions,
    ) -> Result<WorkingSet, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let gzipped = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

        log::info!("loader: reading {}", path.display());
        if gzipped {
            WorkingSet::from_reader_with(GzDecoder::new(file), options)
        } else {
            WorkingSet::from_reader_with(file, options)
        }
    }

    /// Load a working set from an in-memory CSV string.
    pub fn from_csv_str(csv_data: &str) -> Result<WorkingSet, LoadError> {
        WorkingSet::from_reader_with(csv_data.as_bytes(), &LoadOptions::default())
    }

    /// Load a working set from any reader of delimited text.
    pub fn from_reader_with<R: Read>(
        reader: R,
        options: &LoadOptions,
    ) -> Result<WorkingSet, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(reader);

        let headers: StringRecord = rdr
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let columns = ColumnMap::resolve(&headers)?;

        let mut summary = LoadSummary::default();
        let mut samples = Vec::new();
        for result in rdr.byte_records() {
            let record = result?;
            summary.rows_read += 1;
            let raw = RawRecord::from_byte_record(&record, &columns);
            match Sample::try_from(raw) {
                Ok(sample) => samples.push(sample),
                Err(Rejection::MissingPh) => {
                    summary.missing_ph += 1;
                    log::trace!(
                        "loader: dropped row {} without pH",
                        record.position().map_or(0, |p| p.line())
                    );
                }
            }
        }

        let working_set = WorkingSet::from_samples_with_summary(samples, summary);
        let summary = working_set.summary;
        log::info!(
            "loader: kept {} of {} rows, dropped {} without pH, {} undated, {} stations",
            summary.kept,
            summary.rows_read,
            summary.missing_ph,
            summary.undated,
            working_set.stations.len()
        );
        if summary.non_geographic > 0 {
            log::warn!(
                "loader: {} samples have coordinates outside degree ranges or missing",
                summary.non_geographic
            );
        }
        Ok(working_set)
    }

    /// Build a working set from already normalized samples.
    pub fn from_samples(samples: Vec<Sample>) -> WorkingSet {
        let summary = LoadSummary {
            rows_read: samples.len(),
            ..LoadSummary::default()
        };
        WorkingSet::from_samples_with_summary(samples, summary)
    }

    fn from_samples_with_summary(samples: Vec<Sample>, mut summary: LoadSummary) -> WorkingSet {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stations = Vec::new();
        for sample in &samples {
            if seen.insert(sample.station_name.as_str()) {
                stations.push(sample.station_name.clone());
            }
        }
        summary.kept = samples.len();
        summary.undated = samples.iter().filter(|s| s.timestamp.is_none()).count();
        summary.non_geographic = samples
            .iter()
            .filter(|s| !s.has_geographic_coordinates())
            .count();
        WorkingSet {
            samples,
            stations,
            summary,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Distinct station names in order of first appearance.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn contains_station(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s == station)
    }

    /// Earliest and latest timestamps across all dated samples.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut dated = self.samples.iter().filter_map(|s| s.timestamp);
        let first = dated.next()?;
        Some(dated.fold((first, first), |(min, max), ts| (min.min(ts), max.max(ts))))
    }

    /// Samples without a timestamp. They are invisible to every filtered view.
    pub fn undated(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|s| s.timestamp.is_none())
    }

    /// The selection a fresh dashboard starts with: the first station and
    /// the full date range of the data.
    pub fn initial_criteria(&self) -> Option<Criteria> {
        let station = self.stations.first()?;
        let (min, max) = self.bounds()?;
        Some(Criteria {
            station: station.clone(),
            interval: filter::DateInterval(min.date(), max.date()),
        })
    }

    /// See [`filter::filter`].
    pub fn filter(&self, criteria: &Criteria) -> Result<FilteredView<'_>, InvalidCriteria> {
        filter::filter(self, criteria)
    }
}
