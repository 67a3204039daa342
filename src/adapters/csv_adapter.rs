//! CSV intraday data adapter.
//!
//! One file per ticker (`{TICKER}.csv`) with columns
//! `timestamp,open,high,low,close`, timestamps as `YYYY-MM-DD HH:MM:SS`.
//! Rows outside the 09:30-16:00 session are dropped at this boundary, so the
//! controller only ever sees regular-session bars.

use crate::domain::bar::Bar;
use crate::domain::error::DrillError;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvAdapter {
    base_path: PathBuf,
    session_open: NaiveTime,
    session_close: NaiveTime,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        CsvAdapter {
            base_path,
            session_open: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            session_close: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }

    fn in_session(&self, timestamp: NaiveDateTime) -> bool {
        let time = timestamp.time();
        time >= self.session_open && time <= self.session_close
    }

    fn read_rows(&self, ticker: &str) -> Result<Vec<Bar>, DrillError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| DrillError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| DrillError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let timestamp_str = field(&record, 0, "timestamp")?;
            let timestamp = NaiveDateTime::parse_from_str(timestamp_str, TIMESTAMP_FORMAT)
                .map_err(|e| DrillError::Data {
                    reason: format!("invalid timestamp {timestamp_str:?}: {e}"),
                })?;

            bars.push(Bar {
                ticker: ticker.to_string(),
                timestamp,
                open: numeric_field(&record, 1, "open")?,
                high: numeric_field(&record, 2, "high")?,
                low: numeric_field(&record, 3, "low")?,
                close: numeric_field(&record, 4, "close")?,
            });
        }

        Ok(bars)
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, DrillError> {
    record.get(index).ok_or_else(|| DrillError::Data {
        reason: format!("missing {name} column"),
    })
}

fn numeric_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, DrillError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| DrillError::Data {
            reason: format!("invalid {name} value: {e}"),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_intraday(&self, ticker: &str, date: NaiveDate) -> Result<Vec<Bar>, DrillError> {
        let mut bars: Vec<Bar> = self
            .read_rows(ticker)?
            .into_iter()
            .filter(|b| b.date() == date && self.in_session(b.timestamp))
            .collect();

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }

    fn available_dates(&self, ticker: &str) -> Result<Vec<NaiveDate>, DrillError> {
        let dates: BTreeSet<NaiveDate> = self
            .read_rows(ticker)?
            .into_iter()
            .filter(|b| self.in_session(b.timestamp))
            .map(|b| b.date())
            .collect();

        Ok(dates.into_iter().collect())
    }
}
