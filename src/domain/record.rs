//! Completed trade results.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Classification of a completed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    NoThresholdHit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
            Outcome::NoThresholdHit => write!(f, "No TP/SL Hit"),
        }
    }
}

/// One recorded day's result. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub ticker: String,
    pub entry_time: NaiveDateTime,
    pub entry_price: f64,
    pub exit_price: f64,
    pub outcome: Outcome,
    pub pnl: f64,
}
