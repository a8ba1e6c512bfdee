//! Filter engine: station + closed date interval selection over a working set.
//!
//! Filtering is a pure function of its inputs. A [`FilteredView`] borrows the
//! samples it selects from the [`WorkingSet`] and never copies or mutates
//! them, so views are cheap to recompute on every selection change.

use crate::error::InvalidCriteria;
use crate::record::Sample;
use crate::working_set::WorkingSet;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A closed interval of calendar dates, inclusive on both ends.
///
/// The fields are public so an interval can be built directly from user
/// input; [`DateInterval::new`] and the filter engine both reject an
/// interval whose start lies after its end.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Hash, Serialize)]
pub struct DateInterval(pub NaiveDate, pub NaiveDate);

impl DateInterval {
    /// Build a validated interval.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidCriteria> {
        let interval = DateInterval(start, end);
        interval.validate()?;
        Ok(interval)
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    /// Fails with [`InvalidCriteria::InvertedInterval`] when start > end.
    pub fn validate(&self) -> Result<(), InvalidCriteria> {
        if self.0 > self.1 {
            return Err(InvalidCriteria::InvertedInterval {
                start: self.0,
                end: self.1,
            });
        }
        Ok(())
    }

    /// True when the timestamp falls on a day inside the interval. Any time
    /// of day on the end date is included.
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        let date = timestamp.date();
        self.0 <= date && date <= self.1
    }
}

/// A (station, date interval) selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Criteria {
    pub station: String,
    pub interval: DateInterval,
}

impl Criteria {
    /// Build criteria, rejecting an inverted interval up front.
    pub fn new(
        station: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Criteria, InvalidCriteria> {
        Ok(Criteria {
            station: station.into(),
            interval: DateInterval::new(start, end)?,
        })
    }

    /// True when the sample belongs to the station and is dated inside the
    /// interval. Undated samples never match.
    pub fn matches(&self, sample: &Sample) -> bool {
        sample.station_name == self.station
            && sample
                .timestamp
                .is_some_and(|ts| self.interval.contains(&ts))
    }
}

/// The samples of a working set matching a [`Criteria`], in their load
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    criteria: Criteria,
    samples: Vec<&'a Sample>,
}

impl<'a> FilteredView<'a> {
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn samples(&self) -> &[&'a Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Sample> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// pH values in view order.
    pub fn ph_values(&self) -> Vec<f64> {
        self.iter().map(|s| s.ph).collect()
    }

    /// Apply criteria to this view's own samples.
    ///
    /// Only the interval is validated: station membership was already
    /// established against the working set, and an empty view must stay a
    /// valid input.
    pub fn refilter(&self, criteria: &Criteria) -> Result<FilteredView<'a>, InvalidCriteria> {
        criteria.interval.validate()?;
        Ok(FilteredView {
            criteria: criteria.clone(),
            samples: select(self.iter(), criteria),
        })
    }
}

/// Select the samples of `working_set` matching `criteria`.
///
/// Fails with [`InvalidCriteria`] when the interval is inverted or the
/// station does not occur in the working set. An empty result is not an
/// error.
pub fn filter<'a>(
    working_set: &'a WorkingSet,
    criteria: &Criteria,
) -> Result<FilteredView<'a>, InvalidCriteria> {
    criteria.interval.validate()?;
    if !working_set.contains_station(&criteria.station) {
        return Err(InvalidCriteria::UnknownStation(criteria.station.clone()));
    }

    let samples = select(working_set.samples(), criteria);
    log::info!(
        "filter: {} samples for {} between {} and {}",
        samples.len(),
        criteria.station,
        criteria.interval.start(),
        criteria.interval.end()
    );
    Ok(FilteredView {
        criteria: criteria.clone(),
        samples,
    })
}

fn select<'a>(samples: impl IntoIterator<Item = &'a Sample>, criteria: &Criteria) -> Vec<&'a Sample> {
    samples
        .into_iter()
        .filter(|sample| criteria.matches(sample))
        .collect()
}
