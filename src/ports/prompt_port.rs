//! Interaction layer port trait.
//!
//! The core treats the operator purely as an input source (commands and bar
//! choices) and an output sink (records and summaries). Pacing such as a
//! per-bar delay belongs to the implementing adapter, never the core.

use chrono::NaiveDate;

use crate::domain::bar::Bar;
use crate::domain::error::DrillError;
use crate::domain::record::TradeRecord;
use crate::domain::session::Choice;
use crate::domain::summary::Summary;

/// Between-day operator command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayCommand {
    NextDay,
    SetTakeProfit(f64),
    SetStopLoss(f64),
    Quit,
}

pub trait PromptPort {
    /// Ask what to do before the next day starts. `day_number` is 1-based.
    fn day_command(&mut self, day_number: usize, target: usize) -> Result<DayCommand, DrillError>;

    /// Present the live bar pair and collect the operator's choice.
    fn choose(&mut self, date: NaiveDate, bar_a: &Bar, bar_b: &Bar) -> Result<Choice, DrillError>;

    /// A TP/SL adjustment was rejected.
    fn notify_rejected(&mut self, err: &DrillError) -> Result<(), DrillError>;

    fn notify_skip(&mut self, date: NaiveDate) -> Result<(), DrillError>;

    fn notify_void(&mut self, date: NaiveDate) -> Result<(), DrillError>;

    fn show_record(&mut self, record: &TradeRecord) -> Result<(), DrillError>;

    fn show_summary(&mut self, summary: &Summary) -> Result<(), DrillError>;
}
