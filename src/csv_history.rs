use chrono::NaiveDate;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::models::TimelinePoint;
use crate::domain::repository::{RepoResult, TimelineRepo};
use crate::errors::{AnalyticsError, StoreError};

// Monthly portfolio / NIFTY 50 / gold series served when no timeline file is configured
static DEFAULT_TIMELINE: Lazy<Vec<TimelinePoint>> = Lazy::new(|| {
    [
        ((2024, 1, 1), 650000.0, 21000.0, 62000.0),
        ((2024, 2, 1), 662000.0, 21300.0, 63200.0),
        ((2024, 3, 1), 680000.0, 22100.0, 64500.0),
        ((2024, 4, 1), 685000.0, 22400.0, 65800.0),
        ((2024, 5, 1), 695000.0, 23200.0, 67200.0),
        ((2024, 6, 1), 700000.0, 23500.0, 68000.0),
    ]
    .into_iter()
    .map(|((y, m, d), portfolio, nifty50, gold)| TimelinePoint {
        date: NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date"),
        portfolio,
        nifty50,
        gold,
    })
    .collect()
});

pub fn default_timeline() -> Vec<TimelinePoint> {
    DEFAULT_TIMELINE.clone()
}

#[derive(Debug, Deserialize)]
struct TimelineCsv {
    date: String,
    portfolio: f64,
    nifty50: f64,
    gold: f64,
}

/// Timeline source: a CSV file when a path is configured, the built-in series otherwise.
pub struct TimelineStore {
    path: Option<PathBuf>,
}

impl TimelineStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn builtin() -> Self {
        Self { path: None }
    }
}

impl TimelineRepo for TimelineStore {
    fn load_timeline(&self) -> RepoResult<Vec<TimelinePoint>> {
        match &self.path {
            Some(path) => read_timeline_csv(path),
            None => Ok(default_timeline()),
        }
    }
}

// Rows are returned in file order; ordering is validated by the performance calculator
pub fn read_timeline_csv(path: &std::path::Path) -> RepoResult<Vec<TimelinePoint>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut out = Vec::new();
    for result in rdr.deserialize() {
        let row: TimelineCsv = result?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|source| {
            StoreError::Date {
                value: row.date.clone(),
                source,
            }
        })?;
        out.push(TimelinePoint {
            date,
            portfolio: series_value(&row.date, "portfolio", row.portfolio)?,
            nifty50: series_value(&row.date, "nifty50", row.nifty50)?,
            gold: series_value(&row.date, "gold", row.gold)?,
        });
    }
    Ok(out)
}

// Series levels are finite and non-negative; a zero baseline is left to the return calculation
fn series_value(date: &str, column: &str, value: f64) -> Result<f64, AnalyticsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AnalyticsError::malformed(date, column, value.to_string()))
    }
}
