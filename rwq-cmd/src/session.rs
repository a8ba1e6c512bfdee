//! Interactive dashboard session.
//!
//! Holds the current selection the way a dashboard front end does: a
//! selected station and a date range. Every change to either triggers one
//! full recomputation of the views. Rejected criteria are reported and the
//! previous selection stays in place; the session keeps running.
//!
//! ```text
//! > station Bann at Portna
//! > range 2017-01-01 2017-12-31
//! > stats
//! > report
//! > quit
//! ```

use crate::config::OutputFormat;
use crate::query::explain;
use crate::render;
use rwq_core::{Criteria, DateInterval, WorkingSet};
use rwq_data::artifact::Artifacts;
use rwq_data::{date_bounds, series, statistics, table};
use rwq_utils::dates::parse_date;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  stations                  list stations
  bounds                    earliest and latest observation
  station <name>            select a station
  range <start> <end>       select dates, YYYY-MM-DD, inclusive
  show                      all views of the selection
  series | table | stats    one view of the selection
  map                       location of the station map
  report                    show the report
  help                      this text
  quit                      leave the session";

/// Whether the loop should keep reading input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session<'a> {
    working_set: &'a WorkingSet,
    artifacts: &'a Artifacts,
    criteria: Criteria,
    format: OutputFormat,
}

impl<'a> Session<'a> {
    /// Start with the first station over the full date range.
    pub fn new(
        working_set: &'a WorkingSet,
        artifacts: &'a Artifacts,
        format: OutputFormat,
    ) -> anyhow::Result<Session<'a>> {
        let criteria = working_set
            .initial_criteria()
            .ok_or_else(|| anyhow::anyhow!("The data has no dated observations to browse"))?;
        Ok(Session {
            working_set,
            artifacts,
            criteria,
            format,
        })
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        self.show(out)?;
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            if self.handle(&line?, out)? == Control::Quit {
                break;
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Handle one line of input. Only output failures are returned as errors.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Control> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => return Ok(Control::Quit),
            "help" => writeln!(out, "{}", HELP)?,
            "stations" => render::write_stations(out, self.working_set.stations(), self.format)?,
            "bounds" => render::write_bounds(out, date_bounds(self.working_set).as_ref(), self.format)?,
            "station" if rest.is_empty() => writeln!(out, "error: station needs a name")?,
            "station" => {
                let candidate = Criteria {
                    station: rest.to_string(),
                    interval: self.criteria.interval,
                };
                self.select(candidate, out)?;
            }
            "range" => match parse_range(rest) {
                Ok(interval) => {
                    let candidate = Criteria {
                        station: self.criteria.station.clone(),
                        interval,
                    };
                    self.select(candidate, out)?;
                }
                Err(message) => writeln!(out, "error: {}", message)?,
            },
            "show" => self.show(out)?,
            "series" | "table" | "stats" => {
                let view = self.working_set.filter(&self.criteria)?;
                match command {
                    "series" => render::write_series(out, &series::project(&view), self.format)?,
                    "table" => render::write_table(out, &table::project(&view), self.format)?,
                    _ => render::write_summary(out, &statistics::describe(&view), self.format)?,
                }
            }
            "map" => writeln!(out, "{}", self.artifacts.map().path().display())?,
            "report" => match self.artifacts.report().read() {
                Ok(document) => writeln!(out, "{}", document)?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            other => writeln!(out, "error: unknown command {:?}, try help", other)?,
        }
        Ok(Control::Continue)
    }

    /// Adopt the candidate selection if the filter engine accepts it.
    fn select<W: Write>(&mut self, candidate: Criteria, out: &mut W) -> anyhow::Result<()> {
        match self.working_set.filter(&candidate) {
            Ok(_) => {
                self.criteria = candidate;
                self.show(out)
            }
            Err(err) => {
                writeln!(out, "error: {}", explain(self.working_set, &err))?;
                Ok(())
            }
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let view = self.working_set.filter(&self.criteria)?;
        let dashboard = rwq_data::project(&view, self.artifacts);
        let format = match self.format {
            OutputFormat::Csv => OutputFormat::Text,
            other => other,
        };
        render::write_dashboard(out, &dashboard, format)
    }
}

fn parse_range(rest: &str) -> Result<DateInterval, String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => {
            let start = parse_date(start).map_err(|e| format!("bad start date: {}", e))?;
            let end = parse_date(end).map_err(|e| format!("bad end date: {}", e))?;
            Ok(DateInterval(start, end))
        }
        _ => Err("range needs a start and an end date".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/ph_sample.csv");
    const MAP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/map.html");
    const REPORT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/report.html");

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn handle(session: &mut Session<'_>, line: &str) -> (Control, String) {
        let mut buf = Vec::new();
        let control = session.handle(line, &mut buf).unwrap();
        (control, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn session_starts_on_first_station_and_full_range() {
        let ws = WorkingSet::load(FIXTURE).unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        let session = Session::new(&ws, &artifacts, OutputFormat::Text).unwrap();
        assert_eq!(session.criteria().station, "Lagan at Stranmillis");
        assert_eq!(session.criteria().interval, DateInterval(date(2016, 3, 14), date(2018, 3, 3)));
    }

    #[test]
    fn selection_changes_recompute_views() {
        let ws = WorkingSet::load(FIXTURE).unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        let mut session = Session::new(&ws, &artifacts, OutputFormat::Text).unwrap();

        let (_, out) = handle(&mut session, "station Bann at Portna");
        assert!(out.contains("Station: Bann at Portna"));
        assert_eq!(session.criteria().station, "Bann at Portna");

        let (_, out) = handle(&mut session, "range 2017-01-01 2017-12-31");
        assert!(out.contains("Interval: 2017-01-01 to 2017-12-31"));
        assert!(out.contains("2017-08-08 12:00:00   7.70  Bann at Portna"));
        assert!(!out.contains("2018-03-03"));
    }

    #[test]
    fn invalid_criteria_keep_previous_selection() {
        let ws = WorkingSet::load(FIXTURE).unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        let mut session = Session::new(&ws, &artifacts, OutputFormat::Text).unwrap();
        let before = session.criteria().clone();

        let (control, out) = handle(&mut session, "station Foyle at Lifford");
        assert_eq!(control, Control::Continue);
        assert!(out.starts_with("error: Unknown station: Foyle at Lifford."));
        assert_eq!(session.criteria(), &before);

        let (_, out) = handle(&mut session, "range 2018-01-01 2017-01-01");
        assert!(out.starts_with("error: Invalid date interval"));
        assert_eq!(session.criteria(), &before);

        let (_, out) = handle(&mut session, "range 2018-01-01");
        assert_eq!(out, "error: range needs a start and an end date\n");
    }

    #[test]
    fn report_and_map_commands() {
        let ws = WorkingSet::load(FIXTURE).unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        let mut session = Session::new(&ws, &artifacts, OutputFormat::Text).unwrap();
        let (_, out) = handle(&mut session, "report");
        assert!(out.contains("River water quality report"));
        let (_, out) = handle(&mut session, "map");
        assert_eq!(out, format!("{}\n", MAP));
    }

    #[test]
    fn run_reads_until_quit() {
        let ws = WorkingSet::load(FIXTURE).unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        let mut session = Session::new(&ws, &artifacts, OutputFormat::Text).unwrap();
        let input = "stats\nbogus\nquit\nstations\n";
        let mut buf = Vec::new();
        session.run(input.as_bytes(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("mean     7.500000"));
        assert!(out.contains("error: unknown command \"bogus\""));
        // Nothing after quit is processed
        assert!(!out.contains("Blackwater at Maydown Bridge\n"));
    }

    #[test]
    fn session_needs_dated_observations() {
        let ws = WorkingSet::from_csv_str("Station_Name,Date,PH,X,Y\nA,,7.0,0,0\n").unwrap();
        let artifacts = Artifacts::new(MAP, REPORT);
        assert!(Session::new(&ws, &artifacts, OutputFormat::Text).is_err());
    }
}
