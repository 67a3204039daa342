//! Market data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::DrillError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for one ticker on one date, restricted to the regular trading
    /// session, in ascending timestamp order. Empty when the ticker has no
    /// data for that date; the controller turns that into a skipped day.
    fn fetch_intraday(&self, ticker: &str, date: NaiveDate) -> Result<Vec<Bar>, DrillError>;

    /// Distinct dates the ticker has bars for, ascending. Feeds the date
    /// selection pool and the `info` command.
    fn available_dates(&self, ticker: &str) -> Result<Vec<NaiveDate>, DrillError>;
}
