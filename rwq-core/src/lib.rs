//! Core types and data loading for river water quality (pH) monitoring data.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`WorkingSet::load`] reads the monitoring table, normalizes each row
//!    into a [`Sample`] and drops rows without a pH value.
//! 2. [`filter::filter`] selects a [`FilteredView`] for a station and a
//!    closed date interval.
//! 3. The `rwq-data` crate projects that view into chart series, table rows
//!    and summary statistics.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rwq_core::{Criteria, WorkingSet};
//!
//! let ws = WorkingSet::from_csv_str(
//!     "Station_Name,Date,PH,X,Y\nA,2018-01-01,7.0,-6.1,54.3\nA,2018-02-01,7.5,-6.1,54.3\n",
//! )
//! .unwrap();
//! let criteria = Criteria::new(
//!     "A",
//!     NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2018, 1, 31).unwrap(),
//! )
//! .unwrap();
//! let view = ws.filter(&criteria).unwrap();
//! assert_eq!(view.len(), 1);
//! ```

pub mod error;
pub mod filter;
pub mod record;
pub mod schema;
pub mod working_set;

pub use error::{Error, InvalidCriteria, LoadError, Result};
pub use filter::{Criteria, DateInterval, FilteredView};
pub use record::{RawRecord, Sample};
pub use working_set::{LoadOptions, LoadSummary, WorkingSet};
