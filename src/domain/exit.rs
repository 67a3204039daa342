//! Exit evaluation: linear scan for the first take-profit or stop-loss crossing.

use super::bar::Bar;
use super::record::Outcome;

/// entry * (1 + fraction)
pub fn take_profit_price(entry_price: f64, fraction: f64) -> f64 {
    entry_price * (1.0 + fraction)
}

/// entry * (1 - fraction)
pub fn stop_loss_price(entry_price: f64, fraction: f64) -> f64 {
    entry_price * (1.0 - fraction)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExitEvaluation {
    pub outcome: Outcome,
    pub exit_price: f64,
}

/// Scan `bars` in order from the entry bar (inclusive) and return the first
/// threshold crossing. Take-profit is checked before stop-loss, so TP wins when
/// both thresholds fall inside one bar. Neither ever crossed means the position
/// rides to the final bar's close.
pub fn evaluate(
    bars: &[Bar],
    entry_price: f64,
    tp_fraction: f64,
    sl_fraction: f64,
) -> ExitEvaluation {
    let tp = take_profit_price(entry_price, tp_fraction);
    let sl = stop_loss_price(entry_price, sl_fraction);

    for bar in bars {
        if bar.high >= tp {
            return ExitEvaluation {
                outcome: Outcome::Win,
                exit_price: tp,
            };
        }
        if bar.low <= sl {
            return ExitEvaluation {
                outcome: Outcome::Loss,
                exit_price: sl,
            };
        }
    }

    ExitEvaluation {
        outcome: Outcome::NoThresholdHit,
        exit_price: bars.last().map(|b| b.close).unwrap_or(entry_price),
    }
}

/// (exit - entry) * notional / entry
pub fn realized_pnl(entry_price: f64, exit_price: f64, notional: f64) -> f64 {
    (exit_price - entry_price) * notional / entry_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn bar(minute: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            ticker: "TQQQ".into(),
            timestamp: NaiveDate::from_ymd_opt(2023, 6, 15)
                .unwrap()
                .and_hms_opt(9, 30 + minute, 0)
                .unwrap(),
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn first_tp_crossing_wins_regardless_of_later_bars() {
        let bars = vec![
            bar(0, 100.0, 100.4, 99.8, 100.1),
            bar(1, 100.1, 101.6, 100.0, 101.5),
            // later collapse must not matter
            bar(2, 101.5, 101.5, 90.0, 90.0),
        ];
        let eval = evaluate(&bars, 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_relative_eq!(eval.exit_price, 101.5);
    }

    #[test]
    fn first_sl_crossing_loses() {
        let bars = vec![
            bar(0, 100.0, 100.4, 99.8, 100.1),
            bar(1, 100.1, 100.2, 99.4, 99.5),
            bar(2, 99.5, 102.0, 99.5, 102.0),
        ];
        let eval = evaluate(&bars, 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::Loss);
        assert_relative_eq!(eval.exit_price, 99.5);
    }

    #[test]
    fn tp_takes_precedence_when_both_hit_in_one_bar() {
        let bars = vec![bar(0, 100.0, 102.0, 99.0, 100.5)];
        let eval = evaluate(&bars, 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_relative_eq!(eval.exit_price, 101.5);
    }

    #[test]
    fn no_crossing_exits_at_final_close() {
        let bars = vec![
            bar(0, 100.0, 100.4, 99.8, 100.1),
            bar(1, 100.1, 100.6, 99.9, 100.3),
        ];
        let eval = evaluate(&bars, 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::NoThresholdHit);
        assert_relative_eq!(eval.exit_price, 100.3);
    }

    #[test]
    fn end_to_end_example() {
        // entry 100, TP 1.5% -> 101.50, SL 0.5% -> 99.50
        let bars = vec![
            bar(0, 100.0, 100.2, 99.8, 100.1),
            bar(1, 100.1, 101.6, 100.0, 101.5),
        ];
        let eval = evaluate(&bars, 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_relative_eq!(eval.exit_price, 101.5);

        let pnl = realized_pnl(100.0, eval.exit_price, 2_000_000.0);
        assert_relative_eq!(pnl, (101.5 - 100.0) / 100.0 * 2_000_000.0);
    }

    #[test]
    fn empty_bars_exit_at_entry() {
        let eval = evaluate(&[], 100.0, 0.015, 0.005);
        assert_eq!(eval.outcome, Outcome::NoThresholdHit);
        assert_relative_eq!(eval.exit_price, 100.0);
    }

    proptest! {
        #[test]
        fn thresholds_straddle_entry(
            entry in 0.01f64..10_000.0,
            tp in 0.0001f64..0.9999,
            sl in 0.0001f64..0.9999,
        ) {
            let tp_price = take_profit_price(entry, tp);
            let sl_price = stop_loss_price(entry, sl);
            prop_assert!(tp_price > entry);
            prop_assert!(entry > sl_price);
        }
    }
}
