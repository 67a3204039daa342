//! Intraday OHLC bar representation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One price observation at a timestamp for one instrument.
///
/// Immutable once fetched; the controller only ever reads bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub ticker: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}
