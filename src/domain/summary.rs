//! Aggregated results across the simulated days.

use chrono::NaiveDate;

use super::record::{Outcome, TradeRecord};

/// Read model for display and reporting: the full trade log plus derived
/// aggregates. Win rate is wins over recorded trades; skipped and voided days
/// contribute nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub records: Vec<TradeRecord>,
    pub skipped: Vec<NaiveDate>,
    pub voided: Vec<NaiveDate>,
    pub total_pnl: f64,
    pub win_rate: f64,
}

impl Summary {
    pub fn compute(
        records: &[TradeRecord],
        skipped: &[NaiveDate],
        voided: &[NaiveDate],
    ) -> Self {
        let total_pnl = records.iter().map(|r| r.pnl).sum();
        let wins = records
            .iter()
            .filter(|r| r.outcome == Outcome::Win)
            .count();
        let win_rate = if records.is_empty() {
            0.0
        } else {
            wins as f64 / records.len() as f64
        };

        Summary {
            records: records.to_vec(),
            skipped: skipped.to_vec(),
            voided: voided.to_vec(),
            total_pnl,
            win_rate,
        }
    }

    pub fn days_processed(&self) -> usize {
        self.records.len() + self.skipped.len() + self.voided.len()
    }

    /// Cumulative PnL after each recorded trade, in log order.
    pub fn equity_curve(&self) -> Vec<f64> {
        let mut running = 0.0;
        self.records
            .iter()
            .map(|r| {
                running += r.pnl;
                running
            })
            .collect()
    }
}
