//! Shared utility functions for RWQ crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Date format used for display and for command line date arguments: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Timestamp format used for display: "YYYY-MM-DD HH:MM:SS"
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Timestamp layouts that carry a UTC offset. The offset is discarded
    /// after parsing and the local wall-clock time is kept.
    const OFFSET_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%#z",
        "%Y-%m-%dT%H:%M:%S%#z",
        "%Y/%m/%d %H:%M:%S%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y/%m/%d %H:%M:%S%.f%#z",
    ];

    /// Timestamp layouts without any timezone information.
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    /// Date-only layouts; parsed values land on midnight.
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%Y%m%d"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Format a NaiveDateTime as "YYYY-MM-DD HH:MM:SS"
    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Leniently parse an observation timestamp.
    ///
    /// Accepts RFC 3339, ISO-like and slash-separated layouts, with or
    /// without a time of day and with or without a UTC offset. Slash
    /// separated dates with the year last are read day-first. Returns
    /// `None` for empty or unrecognised input instead of failing.
    pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.naive_local());
            }
        }
        // A bare trailing "Z" is UTC; dropping it leaves the wall-clock time.
        let unzoned = s.strip_suffix('Z').unwrap_or(s);
        for fmt in NAIVE_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(unzoned, fmt) {
                return Some(ts);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(unzoned, fmt) {
                return date.and_hms_opt(0, 0, 0);
            }
        }
        None
    }

}
