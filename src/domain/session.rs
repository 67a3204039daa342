//! The per-day simulation state machine and its owning controller.
//!
//! The controller advances only in response to discrete external calls:
//! `request_next_day`, `supply_bars`, and `submit_choice`. Waiting for the
//! operator is an external call boundary, never a suspension inside the core.

use chrono::NaiveDate;

use super::bar::Bar;
use super::config::SimConfig;
use super::error::DrillError;
use super::exit;
use super::record::TradeRecord;
use super::summary::Summary;

/// Operator decision for one presented bar pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Advance,
    EnterA,
    EnterB,
}

/// How a supplied day begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStart {
    Walking,
    Skipped,
}

/// Result of one `submit_choice` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Cursor advanced; another bar pair is live.
    Continue,
    /// The sequence ran out without an entry. The day is voided: no record,
    /// no PnL contribution, day index advances.
    Exhausted,
    /// An entry was made and synchronously evaluated to completion.
    Recorded(TradeRecord),
}

/// State for one day being walked: the two bar sequences and a cursor.
///
/// The walk presents bar `cursor` of both tickers in lockstep, so the walkable
/// length is the shorter sequence. Evaluation after an entry uses the entered
/// ticker's full remaining sequence.
#[derive(Debug, Clone)]
pub struct DaySession {
    date: NaiveDate,
    bars_a: Vec<Bar>,
    bars_b: Vec<Bar>,
    cursor: usize,
}

impl DaySession {
    fn new(date: NaiveDate, bars_a: Vec<Bar>, bars_b: Vec<Bar>) -> Self {
        DaySession {
            date,
            bars_a,
            bars_b,
            cursor: 0,
        }
    }

    fn walkable_len(&self) -> usize {
        self.bars_a.len().min(self.bars_b.len())
    }

    fn current(&self) -> Option<(&Bar, &Bar)> {
        if self.cursor < self.walkable_len() {
            Some((&self.bars_a[self.cursor], &self.bars_b[self.cursor]))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    AwaitingData(NaiveDate),
    Walking(DaySession),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::AwaitingData(_) => "AwaitingData",
            Phase::Walking(_) => "Walking",
        }
    }
}

/// The simulation controller: owns the day index, the TP/SL configuration,
/// the per-day state machine, and the log of completed trades.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    dates: Vec<NaiveDate>,
    day_index: usize,
    phase: Phase,
    records: Vec<TradeRecord>,
    skipped: Vec<NaiveDate>,
    voided: Vec<NaiveDate>,
}

impl Simulation {
    pub fn new(config: SimConfig, dates: Vec<NaiveDate>) -> Self {
        Simulation {
            config,
            dates,
            day_index: 0,
            phase: Phase::Idle,
            records: Vec::new(),
            skipped: Vec::new(),
            voided: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// TP/SL may be adjusted between days; the new fractions apply to all
    /// subsequent evaluations. Rejection leaves the prior value untouched.
    pub fn set_take_profit(&mut self, fraction: f64) -> Result<(), DrillError> {
        self.config.set_take_profit(fraction)
    }

    pub fn set_stop_loss(&mut self, fraction: f64) -> Result<(), DrillError> {
        self.config.set_stop_loss(fraction)
    }

    /// Days processed so far (recorded, skipped, or voided).
    pub fn day_index(&self) -> usize {
        self.day_index
    }

    pub fn target_days(&self) -> usize {
        self.dates.len()
    }

    pub fn is_complete(&self) -> bool {
        self.day_index >= self.dates.len()
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase.name()
    }

    /// The live bar pair while walking.
    pub fn current_bars(&self) -> Option<(&Bar, &Bar)> {
        match &self.phase {
            Phase::Walking(session) => session.current(),
            _ => None,
        }
    }

    /// Begin the next day. Valid only from `Idle`. Returns the date whose bars
    /// the caller must supply, or `None` (a no-op) once the date list is
    /// exhausted.
    pub fn request_next_day(&mut self) -> Result<Option<NaiveDate>, DrillError> {
        match self.phase {
            Phase::Idle => {}
            ref other => {
                return Err(DrillError::invalid_transition(
                    "request_next_day",
                    other.name(),
                ));
            }
        }
        match self.dates.get(self.day_index) {
            Some(&date) => {
                self.phase = Phase::AwaitingData(date);
                Ok(Some(date))
            }
            None => Ok(None),
        }
    }

    /// Deliver both tickers' bars for the requested date. Valid only from
    /// `AwaitingData`. Either sequence empty means the day is skipped: no
    /// record, day index advances.
    pub fn supply_bars(
        &mut self,
        bars_a: Vec<Bar>,
        bars_b: Vec<Bar>,
    ) -> Result<DayStart, DrillError> {
        let date = match self.phase {
            Phase::AwaitingData(date) => date,
            ref other => {
                return Err(DrillError::invalid_transition("supply_bars", other.name()));
            }
        };

        if bars_a.is_empty() || bars_b.is_empty() {
            self.skipped.push(date);
            self.day_index += 1;
            self.phase = Phase::Idle;
            return Ok(DayStart::Skipped);
        }

        self.phase = Phase::Walking(DaySession::new(date, bars_a, bars_b));
        Ok(DayStart::Walking)
    }

    /// Act on the live bar pair. Valid only from `Walking`. An entry fixes the
    /// entry price at the chosen bar's open and evaluates the rest of the day
    /// synchronously, since all subsequent bars are already known.
    pub fn submit_choice(&mut self, choice: Choice) -> Result<Step, DrillError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let mut session = match phase {
            Phase::Walking(session) => session,
            other => {
                let name = other.name();
                self.phase = other;
                return Err(DrillError::invalid_transition("submit_choice", name));
            }
        };

        let ticker = match choice {
            Choice::Advance => {
                session.cursor += 1;
                if session.current().is_some() {
                    self.phase = Phase::Walking(session);
                    return Ok(Step::Continue);
                }
                self.voided.push(session.date);
                self.day_index += 1;
                return Ok(Step::Exhausted);
            }
            Choice::EnterA => &self.config.ticker_a,
            Choice::EnterB => &self.config.ticker_b,
        };

        let bars = match choice {
            Choice::EnterA => &session.bars_a[session.cursor..],
            _ => &session.bars_b[session.cursor..],
        };
        let entry = &bars[0];
        let eval = exit::evaluate(
            bars,
            entry.open,
            self.config.take_profit(),
            self.config.stop_loss(),
        );
        let record = TradeRecord {
            date: session.date,
            ticker: ticker.clone(),
            entry_time: entry.timestamp,
            entry_price: entry.open,
            exit_price: eval.exit_price,
            outcome: eval.outcome,
            pnl: exit::realized_pnl(entry.open, eval.exit_price, self.config.position_notional),
        };

        self.records.push(record.clone());
        self.day_index += 1;
        Ok(Step::Recorded(record))
    }

    /// Valid any time; repeated calls without intervening mutation return
    /// identical results.
    pub fn summary(&self) -> Summary {
        Summary::compute(&self.records, &self.skipped, &self.voided)
    }
}
