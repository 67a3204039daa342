//! Interactive console prompt adapter.
//!
//! Owns the pacing of the walk: `step_delay` reproduces the timed advance of a
//! live drill without leaking any notion of time into the core.

use chrono::NaiveDate;
use std::io::{BufRead, BufReader, Stderr, Stdin, Write};
use std::time::Duration;

use crate::domain::bar::Bar;
use crate::domain::error::DrillError;
use crate::domain::record::TradeRecord;
use crate::domain::session::Choice;
use crate::domain::summary::Summary;
use crate::ports::prompt_port::{DayCommand, PromptPort};

pub struct ConsolePrompt<R, W> {
    reader: R,
    writer: W,
    step_delay: Duration,
}

impl ConsolePrompt<BufReader<Stdin>, Stderr> {
    pub fn stdio(step_delay: Duration) -> Self {
        ConsolePrompt::new(BufReader::new(std::io::stdin()), std::io::stderr(), step_delay)
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(reader: R, writer: W, step_delay: Duration) -> Self {
        ConsolePrompt {
            reader,
            writer,
            step_delay,
        }
    }

    /// One trimmed input line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, DrillError> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }
}

fn parse_fraction(rest: &str) -> Option<f64> {
    rest.trim().parse().ok()
}

impl<R: BufRead, W: Write> PromptPort for ConsolePrompt<R, W> {
    fn day_command(&mut self, day_number: usize, target: usize) -> Result<DayCommand, DrillError> {
        loop {
            writeln!(
                self.writer,
                "Day {day_number}/{target} | [enter] start, tp <fraction>, sl <fraction>, q to quit"
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(DayCommand::Quit);
            };

            if line.is_empty() {
                return Ok(DayCommand::NextDay);
            }
            if line == "q" || line == "quit" {
                return Ok(DayCommand::Quit);
            }
            if let Some(rest) = line.strip_prefix("tp ") {
                if let Some(fraction) = parse_fraction(rest) {
                    return Ok(DayCommand::SetTakeProfit(fraction));
                }
            }
            if let Some(rest) = line.strip_prefix("sl ") {
                if let Some(fraction) = parse_fraction(rest) {
                    return Ok(DayCommand::SetStopLoss(fraction));
                }
            }
            writeln!(self.writer, "unrecognized command: {line}")?;
        }
    }

    fn choose(&mut self, date: NaiveDate, bar_a: &Bar, bar_b: &Bar) -> Result<Choice, DrillError> {
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
        loop {
            writeln!(
                self.writer,
                "{date} {} | {} ${:.2} | {} ${:.2} | [enter] wait, a/b to enter",
                bar_a.time().format("%H:%M"),
                bar_a.ticker,
                bar_a.open,
                bar_b.ticker,
                bar_b.open,
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(Choice::Advance);
            };

            match line.as_str() {
                "" => return Ok(Choice::Advance),
                "a" => return Ok(Choice::EnterA),
                "b" => return Ok(Choice::EnterB),
                other => writeln!(self.writer, "unrecognized choice: {other}")?,
            }
        }
    }

    fn notify_rejected(&mut self, err: &DrillError) -> Result<(), DrillError> {
        writeln!(self.writer, "rejected: {err}")?;
        Ok(())
    }

    fn notify_skip(&mut self, date: NaiveDate) -> Result<(), DrillError> {
        writeln!(self.writer, "Skipping {date}: missing data.")?;
        Ok(())
    }

    fn notify_void(&mut self, date: NaiveDate) -> Result<(), DrillError> {
        writeln!(self.writer, "{date}: no entry taken, day void.")?;
        Ok(())
    }

    fn show_record(&mut self, record: &TradeRecord) -> Result<(), DrillError> {
        writeln!(
            self.writer,
            "Trade result: {} | {} entered {} at ${:.2}, exited at ${:.2} | PnL ${:.2}",
            record.outcome,
            record.ticker,
            record.entry_time.format("%H:%M"),
            record.entry_price,
            record.exit_price,
            record.pnl,
        )?;
        Ok(())
    }

    fn show_summary(&mut self, summary: &Summary) -> Result<(), DrillError> {
        writeln!(self.writer, "\n=== Final Results ===")?;
        for record in &summary.records {
            writeln!(
                self.writer,
                "  {}  {:>5}  {}  in ${:.2}  out ${:.2}  {:<12}  ${:.2}",
                record.date,
                record.ticker,
                record.entry_time.format("%H:%M"),
                record.entry_price,
                record.exit_price,
                record.outcome.to_string(),
                record.pnl,
            )?;
        }
        writeln!(self.writer, "Total PnL:  ${:.2}", summary.total_pnl)?;
        writeln!(self.writer, "Win rate:   {:.1}%", summary.win_rate * 100.0)?;
        writeln!(
            self.writer,
            "Days:       {} recorded, {} skipped, {} void",
            summary.records.len(),
            summary.skipped.len(),
            summary.voided.len(),
        )?;
        Ok(())
    }
}
