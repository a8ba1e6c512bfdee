//! Presentation projections for filtered water quality data.
//!
//! This crate turns a [`FilteredView`] into forms suitable for charting,
//! tabulation and summary. Every projection is pure and independent of the
//! others; none of them fail on an empty view.

pub mod artifact;
pub mod models;
pub mod statistics;

use artifact::Artifacts;
use models::{Dashboard, DateBounds};
use rwq_core::{FilteredView, WorkingSet};

/// Line chart projection.
pub mod series {
    use crate::models::SeriesPoint;
    use rwq_core::FilteredView;

    /// (timestamp, pH) points sorted ascending by timestamp.
    ///
    /// The sort is stable, so samples sharing a timestamp keep their view
    /// order. An empty view gives an empty series.
    pub fn project(view: &FilteredView<'_>) -> Vec<SeriesPoint> {
        let mut points: Vec<SeriesPoint> = view
            .iter()
            .filter_map(|s| {
                s.timestamp.map(|timestamp| SeriesPoint {
                    timestamp,
                    ph: s.ph,
                })
            })
            .collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;
        use rwq_core::{Criteria, WorkingSet};

        #[test]
        fn series_is_sorted_by_timestamp() {
            let ws = WorkingSet::from_csv_str(
                "\
Station_Name,Date,PH,X,Y
A,2018-03-01,7.3,0,0
A,2018-01-01,7.1,0,0
A,2018-02-01 12:00,7.2,0,0
A,2018-02-01 08:00,7.0,0,0
",
            )
            .unwrap();
            let criteria = Criteria::new(
                "A",
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
            )
            .unwrap();
            let view = ws.filter(&criteria).unwrap();
            let series = project(&view);
            let values: Vec<f64> = series.iter().map(|p| p.ph).collect();
            assert_eq!(values, vec![7.1, 7.0, 7.2, 7.3]);
            assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        }

        #[test]
        fn series_of_empty_view_is_empty() {
            let ws = WorkingSet::from_csv_str("Station_Name,Date,PH,X,Y\nA,2018-01-01,7.0,0,0\n").unwrap();
            let criteria = Criteria::new(
                "A",
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            )
            .unwrap();
            let view = ws.filter(&criteria).unwrap();
            assert!(project(&view).is_empty());
        }
    }
}

/// Data table projection.
pub mod table {
    use crate::models::TableRow;
    use rwq_core::FilteredView;

    /// (date, pH, station) rows in view order.
    pub fn project(view: &FilteredView<'_>) -> Vec<TableRow> {
        view.iter()
            .filter_map(|s| {
                s.timestamp.map(|date| TableRow {
                    date,
                    ph: s.ph,
                    station_name: s.station_name.clone(),
                })
            })
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;
        use rwq_core::{Criteria, WorkingSet};

        #[test]
        fn table_keeps_view_order() {
            let ws = WorkingSet::from_csv_str(
                "\
Station_Name,Date,PH,X,Y
A,2018-03-01,7.3,0,0
B,2018-01-01,6.0,0,0
A,2018-01-01,7.1,0,0
",
            )
            .unwrap();
            let criteria = Criteria::new(
                "A",
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
            )
            .unwrap();
            let view = ws.filter(&criteria).unwrap();
            let rows = project(&view);
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date.date(), NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
            assert_eq!(rows[1].ph, 7.1);
            assert!(rows.iter().all(|r| r.station_name == "A"));
        }
    }
}

/// Global date bounds of a working set, for constraining a date picker.
pub fn date_bounds(working_set: &WorkingSet) -> Option<DateBounds> {
    working_set
        .bounds()
        .map(|(start, end)| DateBounds { start, end })
}

/// Build every view of a selection at once.
pub fn project(view: &FilteredView<'_>, artifacts: &Artifacts) -> Dashboard {
    let dashboard = Dashboard {
        criteria: view.criteria().clone(),
        series: series::project(view),
        table: table::project(view),
        statistics: statistics::describe(view),
        map: artifacts.map().path().to_path_buf(),
    };
    log::info!(
        "project: {} series points, {} table rows for {}",
        dashboard.series.len(),
        dashboard.table.len(),
        dashboard.criteria.station
    );
    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rwq_core::Criteria;

    fn scenario() -> WorkingSet {
        WorkingSet::from_csv_str(
            "\
Station_Name,Date,PH,X,Y
A,2018-01-01,7.0,-6.1,54.3
A,2018-02-01,7.5,-6.1,54.3
B,2018-01-15,6.8,-6.2,54.4
",
        )
        .unwrap()
    }

    #[test]
    fn dashboard_for_january_selection() {
        let ws = scenario();
        let artifacts = Artifacts::new("map.html", "index.html");
        let criteria = Criteria::new(
            "A",
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 31).unwrap(),
        )
        .unwrap();
        let view = ws.filter(&criteria).unwrap();
        let dashboard = project(&view, &artifacts);

        assert_eq!(dashboard.table.len(), 1);
        assert_eq!(dashboard.table[0].station_name, "A");
        assert_eq!(dashboard.table[0].ph, 7.0);
        assert_eq!(dashboard.series.len(), 1);
        assert_eq!(dashboard.statistics.count, 1);
        assert_eq!(dashboard.statistics.mean, 7.0);
        assert_eq!(dashboard.map, std::path::PathBuf::from("map.html"));
    }

    #[test]
    fn dashboard_for_empty_selection() {
        let ws = scenario();
        let artifacts = Artifacts::new("map.html", "index.html");
        let criteria = Criteria::new(
            "A",
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
        )
        .unwrap();
        let view = ws.filter(&criteria).unwrap();
        let dashboard = project(&view, &artifacts);

        assert!(dashboard.series.is_empty());
        assert!(dashboard.table.is_empty());
        assert_eq!(dashboard.statistics.count, 0);
        assert!(dashboard.statistics.mean.is_nan());
        assert_eq!(dashboard.map, std::path::PathBuf::from("map.html"));
    }

    #[test]
    fn date_bounds_follow_working_set() {
        let ws = scenario();
        let bounds = date_bounds(&ws).unwrap();
        assert_eq!(bounds.start.date(), NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(bounds.end.date(), NaiveDate::from_ymd_opt(2018, 2, 1).unwrap());
    }

    #[test]
    fn dashboard_serializes_for_front_end() {
        let ws = scenario();
        let artifacts = Artifacts::new("map.html", "index.html");
        let criteria = ws.initial_criteria().unwrap();
        let view = ws.filter(&criteria).unwrap();
        let json = serde_json::to_value(project(&view, &artifacts)).unwrap();
        assert_eq!(json["criteria"]["station"], "A");
        assert_eq!(json["criteria"]["interval"][0], "2018-01-01");
        assert_eq!(json["series"][0]["timestamp"], "2018-01-01T00:00:00");
        assert_eq!(json["table"][1]["ph"], 7.5);
        assert_eq!(json["statistics"]["count"], 2);
        assert_eq!(json["map"], "map.html");
    }
}
