use crate::schema::{parse_decimal, ColumnMap};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ByteRecord;
use rwq_utils::dates::parse_timestamp;
use serde::Serialize;

/// One monitoring observation exactly as it appears in the source table.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RawRecord {
    pub station_name: String,
    pub date: String,
    pub ph: String,
    pub x: String,
    pub y: String,
}

impl RawRecord {
    /// Pick the required cells out of a CSV row. Cells past the end of a
    /// short row are read as empty; invalid UTF-8 is replaced, not rejected.
    pub fn from_byte_record(record: &ByteRecord, columns: &ColumnMap) -> RawRecord {
        let cell = |idx: usize| {
            record
                .get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };
        RawRecord {
            station_name: cell(columns.station_name).trim().to_string(),
            date: cell(columns.date),
            ph: cell(columns.ph),
            x: cell(columns.x),
            y: cell(columns.y),
        }
    }
}

/// Why a raw record did not make it into the working set.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rejection {
    /// The pH cell was empty or not a number
    MissingPh,
}

/// A normalized pH observation. Every sample carries a pH value.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Sample {
    pub station_name: String,
    /// Observation time with any timezone offset discarded.
    pub timestamp: Option<NaiveDateTime>,
    pub ph: f64,
    /// Copied from the raw `Y` column.
    pub latitude: Option<f64>,
    /// Copied from the raw `X` column.
    pub longitude: Option<f64>,
}

impl Sample {
    /// Calendar date of the observation, if it is dated.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }

    /// True when both coordinates are present and inside WGS84 degree ranges.
    ///
    /// Informational only: the loader never rejects a sample on this basis.
    pub fn has_geographic_coordinates(&self) -> bool {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
            }
            _ => false,
        }
    }
}

impl TryFrom<RawRecord> for Sample {
    type Error = Rejection;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let ph = parse_decimal(&raw.ph).ok_or(Rejection::MissingPh)?;
        Ok(Sample {
            timestamp: parse_timestamp(&raw.date),
            ph,
            latitude: parse_decimal(&raw.y),
            longitude: parse_decimal(&raw.x),
            station_name: raw.station_name,
        })
    }
}
