//! Column schema for the pH monitoring dataset.
//!
//! The input is a headered, delimited table. Only five columns are read;
//! every other column is ignored without any type inference, so free-text
//! columns in the published dataset can never break a load.
//!
//! | Column         | Type      | Tolerance                                   |
//! |----------------|-----------|---------------------------------------------|
//! | `Station_Name` | text      | trimmed, carried as-is                      |
//! | `Date`         | timestamp | malformed or empty becomes absent           |
//! | `PH`           | decimal   | malformed or empty drops the whole record   |
//! | `X`            | decimal   | malformed or empty becomes absent           |
//! | `Y`            | decimal   | malformed or empty becomes absent           |
//!
//! `X` is the longitude and `Y` the latitude. Neither is range checked.

use crate::error::LoadError;
use csv::StringRecord;

/// A required column of the input table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
    StationName,
    Date,
    Ph,
    X,
    Y,
}

impl Field {
    /// Header name of this field in the source table.
    pub fn header(&self) -> &'static str {
        match self {
            Field::StationName => "Station_Name",
            Field::Date => "Date",
            Field::Ph => "PH",
            Field::X => "X",
            Field::Y => "Y",
        }
    }
}

/// Positions of the required fields within a header row.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ColumnMap {
    pub station_name: usize,
    pub date: usize,
    pub ph: usize,
    pub x: usize,
    pub y: usize,
}

impl ColumnMap {
    /// Resolve every required field against a header row.
    ///
    /// Header names are compared after trimming whitespace and a leading
    /// byte order mark. The first matching column wins.
    pub fn resolve(headers: &StringRecord) -> Result<ColumnMap, LoadError> {
        let position = |field: Field| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| normalize_header(h) == field.header())
                .ok_or(LoadError::MissingColumn(field.header()))
        };
        Ok(ColumnMap {
            station_name: position(Field::StationName)?,
            date: position(Field::Date)?,
            ph: position(Field::Ph)?,
            x: position(Field::X)?,
            y: position(Field::Y)?,
        })
    }

    /// Column index of a field.
    pub fn index(&self, field: Field) -> usize {
        match field {
            Field::StationName => self.station_name,
            Field::Date => self.date,
            Field::Ph => self.ph,
            Field::X => self.x,
            Field::Y => self.y,
        }
    }
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Parse a decimal cell. Empty, non-numeric and non-finite values are absent.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finds_columns_in_any_order() {
        let headers = StringRecord::from(vec![
            "X", "Y", "OBJECTID", "Station_Name", "Column8", "Date", "PH", "Column11",
        ]);
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.x, 0);
        assert_eq!(map.y, 1);
        assert_eq!(map.station_name, 3);
        assert_eq!(map.date, 5);
        assert_eq!(map.ph, 6);
        assert_eq!(map.index(Field::Ph), 6);
    }

    #[test]
    fn resolve_trims_bom_and_whitespace() {
        let headers = StringRecord::from(vec!["\u{feff}X", " Y ", "Station_Name", "Date", "PH"]);
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.x, 0);
        assert_eq!(map.y, 1);
    }

    #[test]
    fn resolve_reports_first_missing_column() {
        let headers = StringRecord::from(vec!["Station_Name", "Date", "X", "Y"]);
        match ColumnMap::resolve(&headers) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "PH"),
            other => panic!("expected missing PH column, got {:?}", other),
        }
    }

    #[test]
    fn parse_decimal_tolerates_bad_cells() {
        assert_eq!(parse_decimal(" 7.25 "), Some(7.25));
        assert_eq!(parse_decimal("-6.1"), Some(-6.1));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
}
