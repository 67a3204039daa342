#![allow(dead_code)]

use chrono::NaiveDate;
use pairdrill::domain::bar::Bar;
use pairdrill::domain::config::SimConfig;
use pairdrill::domain::error::DrillError;
use pairdrill::domain::record::TradeRecord;
use pairdrill::domain::session::{Choice, Simulation};
use pairdrill::domain::summary::Summary;
use pairdrill::ports::data_port::DataPort;
use pairdrill::ports::prompt_port::{DayCommand, PromptPort};
use std::collections::{BTreeSet, HashMap, VecDeque};

pub fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
}

pub fn bar(ticker: &str, d: u32, minute: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar {
        ticker: ticker.to_string(),
        timestamp: date(d).and_hms_opt(9, 30 + minute, 0).unwrap(),
        open,
        high,
        low,
        close,
    }
}

pub fn flat_day(ticker: &str, d: u32, len: u32, price: f64) -> Vec<Bar> {
    (0..len)
        .map(|i| bar(ticker, d, i, price, price + 0.1, price - 0.1, price))
        .collect()
}

/// Entry at the second bar's open (100.0) rides to a 1.5% take-profit.
pub fn winning_day(ticker: &str, d: u32) -> Vec<Bar> {
    vec![
        bar(ticker, d, 0, 99.8, 100.0, 99.7, 99.9),
        bar(ticker, d, 1, 100.0, 100.2, 99.8, 100.1),
        bar(ticker, d, 2, 100.1, 101.6, 100.0, 101.5),
    ]
}

pub fn sample_sim_config() -> SimConfig {
    SimConfig::new("TQQQ", "SQQQ", 0.015, 0.005).unwrap()
}

pub fn sample_sim(dates: Vec<NaiveDate>) -> Simulation {
    Simulation::new(sample_sim_config(), dates)
}

pub struct MockDataPort {
    data: HashMap<(String, NaiveDate), Vec<Bar>>,
    errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, date: NaiveDate, bars: Vec<Bar>) -> Self {
        self.data.insert((ticker.to_string(), date), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_intraday(&self, ticker: &str, date: NaiveDate) -> Result<Vec<Bar>, DrillError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DrillError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(&(ticker.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }

    fn available_dates(&self, ticker: &str) -> Result<Vec<NaiveDate>, DrillError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DrillError::Data {
                reason: reason.clone(),
            });
        }
        let dates: BTreeSet<NaiveDate> = self
            .data
            .keys()
            .filter(|(t, _)| t == ticker)
            .map(|(_, d)| *d)
            .collect();
        Ok(dates.into_iter().collect())
    }
}

/// A prompt that replays queued commands and choices and records everything
/// shown to it. Empty queues quit/advance so a misconfigured test terminates.
pub struct ScriptedPrompt {
    pub commands: VecDeque<DayCommand>,
    pub choices: VecDeque<Choice>,
    pub skips: Vec<NaiveDate>,
    pub voids: Vec<NaiveDate>,
    pub shown_records: Vec<TradeRecord>,
    pub rejections: Vec<String>,
    pub summaries: Vec<Summary>,
}

impl ScriptedPrompt {
    pub fn new(commands: Vec<DayCommand>, choices: Vec<Choice>) -> Self {
        Self {
            commands: commands.into(),
            choices: choices.into(),
            skips: Vec::new(),
            voids: Vec::new(),
            shown_records: Vec::new(),
            rejections: Vec::new(),
            summaries: Vec::new(),
        }
    }
}

impl PromptPort for ScriptedPrompt {
    fn day_command(&mut self, _day_number: usize, _target: usize) -> Result<DayCommand, DrillError> {
        Ok(self.commands.pop_front().unwrap_or(DayCommand::Quit))
    }

    fn choose(
        &mut self,
        _date: NaiveDate,
        _bar_a: &Bar,
        _bar_b: &Bar,
    ) -> Result<Choice, DrillError> {
        Ok(self.choices.pop_front().unwrap_or(Choice::Advance))
    }

    fn notify_rejected(&mut self, err: &DrillError) -> Result<(), DrillError> {
        self.rejections.push(err.to_string());
        Ok(())
    }

    fn notify_skip(&mut self, date: NaiveDate) -> Result<(), DrillError> {
        self.skips.push(date);
        Ok(())
    }

    fn notify_void(&mut self, date: NaiveDate) -> Result<(), DrillError> {
        self.voids.push(date);
        Ok(())
    }

    fn show_record(&mut self, record: &TradeRecord) -> Result<(), DrillError> {
        self.shown_records.push(record.clone());
        Ok(())
    }

    fn show_summary(&mut self, summary: &Summary) -> Result<(), DrillError> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}
