//! Writers for projection output in text, JSON and CSV form.

use crate::config::OutputFormat;
use rwq_core::LoadSummary;
use rwq_data::models::{Dashboard, DateBounds, SeriesPoint, TableRow};
use rwq_data::statistics::Summary;
use rwq_utils::dates::{format_date, format_timestamp};
use serde::Serialize;
use std::io::Write;

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv_rows<W: Write>(out: &mut W, header: &[&str], rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(&mut *out);
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_stations<W: Write>(out: &mut W, stations: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for station in stations {
                writeln!(out, "{}", station)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, stations),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["Station_Name"],
            stations.iter().map(|s| vec![s.clone()]).collect(),
        ),
    }
}

pub fn write_bounds<W: Write>(
    out: &mut W,
    bounds: Option<&DateBounds>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            match bounds {
                Some(b) => {
                    writeln!(out, "start  {}", format_timestamp(&b.start))?;
                    writeln!(out, "end    {}", format_timestamp(&b.end))?;
                }
                None => writeln!(out, "no dated observations")?,
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &bounds),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["start", "end"],
            bounds
                .map(|b| vec![format_timestamp(&b.start), format_timestamp(&b.end)])
                .into_iter()
                .collect(),
        ),
    }
}

pub fn write_series<W: Write>(out: &mut W, series: &[SeriesPoint], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if series.is_empty() {
                writeln!(out, "(no points)")?;
            }
            for point in series {
                writeln!(out, "{}  {:.2}", format_timestamp(&point.timestamp), point.ph)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, series),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["Date", "PH"],
            series
                .iter()
                .map(|p| vec![format_timestamp(&p.timestamp), p.ph.to_string()])
                .collect(),
        ),
    }
}

pub fn write_table<W: Write>(out: &mut W, rows: &[TableRow], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{:<19}  {:>5}  Station_Name", "Date", "PH")?;
            if rows.is_empty() {
                writeln!(out, "(no rows)")?;
            }
            for row in rows {
                writeln!(
                    out,
                    "{:<19}  {:>5.2}  {}",
                    format_timestamp(&row.date),
                    row.ph,
                    row.station_name
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["Date", "PH", "Station_Name"],
            rows.iter()
                .map(|r| vec![format_timestamp(&r.date), r.ph.to_string(), r.station_name.clone()])
                .collect(),
        ),
    }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (label, value) in summary.rows() {
                writeln!(out, "{:<6} {:>10.6}", label, value)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, summary),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["statistic", "PH"],
            summary
                .rows()
                .iter()
                .map(|(label, value)| vec![label.to_string(), csv_number(*value)])
                .collect(),
        ),
    }
}

/// Undefined statistics are written as empty cells.
fn csv_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn write_load_summary<W: Write>(out: &mut W, summary: &LoadSummary, format: OutputFormat) -> anyhow::Result<()> {
    let rows = [
        ("rows_read", summary.rows_read),
        ("kept", summary.kept),
        ("missing_ph", summary.missing_ph),
        ("undated", summary.undated),
        ("non_geographic", summary.non_geographic),
    ];
    match format {
        OutputFormat::Text => {
            for (label, count) in rows {
                writeln!(out, "{:<15} {}", label, count)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, summary),
        OutputFormat::Csv => write_csv_rows(
            out,
            &["metric", "count"],
            rows.iter()
                .map(|(label, count)| vec![label.to_string(), count.to_string()])
                .collect(),
        ),
    }
}

pub fn write_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let station = &dashboard.criteria.station;
            let interval = &dashboard.criteria.interval;
            writeln!(out, "Station: {}", station)?;
            writeln!(
                out,
                "Interval: {} to {}",
                format_date(&interval.start()),
                format_date(&interval.end())
            )?;
            writeln!(out, "Station Location: {}", dashboard.map.display())?;
            writeln!(out)?;
            writeln!(out, "pH Levels Over Time at {}", station)?;
            write_series(out, &dashboard.series, format)?;
            writeln!(out)?;
            writeln!(out, "Filtered Data Table")?;
            write_table(out, &dashboard.table, format)?;
            writeln!(out)?;
            writeln!(out, "Statistical Summary")?;
            write_summary(out, &dashboard.statistics, format)
        }
        OutputFormat::Json => write_json(out, dashboard),
        OutputFormat::Csv => {
            anyhow::bail!("CSV output is not available for the dashboard; use text or json")
        }
    }
}
