//! Query commands: station list, date bounds and the projections of a
//! station/date-range selection.

use crate::config::OutputFormat;
use crate::render;
use chrono::NaiveDate;
use clap::Args;
use rwq_core::{Criteria, DateInterval, FilteredView, InvalidCriteria, WorkingSet};
use rwq_data::artifact::Artifacts;
use rwq_data::{date_bounds, series, statistics, table};
use rwq_utils::dates::{format_date, parse_date};
use std::io::Write;

/// Which projection of a selection to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Series,
    Table,
    Stats,
    Dashboard,
}

/// Station and date range selection. Anything left out defaults to the
/// first station and the full date range of the data.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Station name, exactly as listed by `stations`
    #[arg(short, long)]
    pub station: Option<String>,

    /// First day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl SelectionArgs {
    /// Fill in defaults from the working set. The result is not validated;
    /// that is the filter engine's job.
    pub fn resolve(&self, working_set: &WorkingSet) -> anyhow::Result<Criteria> {
        let station = match &self.station {
            Some(station) => station.clone(),
            None => working_set
                .stations()
                .first()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("The data contains no stations"))?,
        };
        let bounds = working_set.bounds();
        let start = self
            .start
            .or(bounds.map(|(min, _)| min.date()))
            .ok_or_else(|| anyhow::anyhow!("The data has no dated observations; pass --start"))?;
        let end = self
            .end
            .or(bounds.map(|(_, max)| max.date()))
            .ok_or_else(|| anyhow::anyhow!("The data has no dated observations; pass --end"))?;
        Ok(Criteria {
            station,
            interval: DateInterval(start, end),
        })
    }
}

/// Run the filter engine, turning rejected criteria into a message that
/// tells the user what would have been accepted.
pub fn select<'a>(working_set: &'a WorkingSet, criteria: &Criteria) -> anyhow::Result<FilteredView<'a>> {
    working_set
        .filter(criteria)
        .map_err(|err| anyhow::anyhow!("{}", explain(working_set, &err)))
}

/// Describe invalid criteria together with the valid choices.
pub fn explain(working_set: &WorkingSet, err: &InvalidCriteria) -> String {
    match err {
        InvalidCriteria::UnknownStation(_) => {
            format!("{}. Available stations: {}", err, working_set.stations().join(", "))
        }
        InvalidCriteria::InvertedInterval { .. } => match working_set.bounds() {
            Some((min, max)) => format!(
                "{}. Data covers {} to {}",
                err,
                format_date(&min.date()),
                format_date(&max.date())
            ),
            None => err.to_string(),
        },
    }
}

pub fn run_stations<W: Write>(working_set: &WorkingSet, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    render::write_stations(out, working_set.stations(), format)
}

pub fn run_bounds<W: Write>(working_set: &WorkingSet, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    render::write_bounds(out, date_bounds(working_set).as_ref(), format)
}

pub fn run_check<W: Write>(working_set: &WorkingSet, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    render::write_load_summary(out, working_set.summary(), format)
}

/// Print one view of the selection.
pub fn run_view<W: Write>(
    working_set: &WorkingSet,
    artifacts: &Artifacts,
    selection: &SelectionArgs,
    view: View,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let criteria = selection.resolve(working_set)?;
    let filtered = select(working_set, &criteria)?;
    if filtered.is_empty() {
        log::info!("query: no samples for {} in the selected range", criteria.station);
    }
    match view {
        View::Series => render::write_series(out, &series::project(&filtered), format),
        View::Table => render::write_table(out, &table::project(&filtered), format),
        View::Stats => render::write_summary(out, &statistics::describe(&filtered), format),
        View::Dashboard => render::write_dashboard(out, &rwq_data::project(&filtered, artifacts), format),
    }
}
