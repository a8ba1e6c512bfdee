//! Projection result structs.
//!
//! All structs derive `Serialize` so a rendering front end can consume them
//! as JSON. Timestamps serialize as ISO 8601 strings without an offset;
//! undefined statistics serialize as `null`.

use crate::statistics::Summary;
use chrono::NaiveDateTime;
use rwq_core::Criteria;
use serde::Serialize;
use std::path::PathBuf;

/// A single (timestamp, pH) point of the line chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    pub ph: f64,
}

/// A (date, pH, station) row of the data table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub date: NaiveDateTime,
    pub ph: f64,
    pub station_name: String,
}

/// Global earliest/latest observation times, used to bound a date picker.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DateBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Every view of one selection, bundled for a single render pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub criteria: Criteria,
    pub series: Vec<SeriesPoint>,
    pub table: Vec<TableRow>,
    pub statistics: Summary,
    /// Location of the pre-built station map document.
    pub map: PathBuf,
}
