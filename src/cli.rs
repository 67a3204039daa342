//! CLI definition, dispatch, and the interactive session loop.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::console_adapter::ConsolePrompt;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart;
use crate::domain::calendar::{DateSelector, RandomSelector};
use crate::domain::config::{
    SimConfig, DEFAULT_DAY_TARGET, DEFAULT_POSITION_NOTIONAL, DEFAULT_STOP_LOSS,
    DEFAULT_TAKE_PROFIT,
};
use crate::domain::config_validation::validate_run_config;
use crate::domain::error::DrillError;
use crate::domain::session::{DayStart, Simulation, Step};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::prompt_port::{DayCommand, PromptPort};
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pairdrill", about = "Manual intraday backtesting drill")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an interactive drill session
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the trade log as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the equity curve as SVG
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Seed for date sampling (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,
        /// Override the configured day count
        #[arg(long)]
        days: Option<usize>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show available sessions per ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            output,
            chart,
            seed,
            days,
        } => run_drill(&config, output.as_ref(), chart.as_ref(), seed, days),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DrillError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_sim_config(config: &dyn ConfigPort) -> Result<SimConfig, DrillError> {
    let ticker_a = require_string(config, "data", "ticker_a")?;
    let ticker_b = require_string(config, "data", "ticker_b")?;

    let mut sim_config = SimConfig::new(
        ticker_a.trim(),
        ticker_b.trim(),
        config.get_double("simulation", "take_profit", DEFAULT_TAKE_PROFIT),
        config.get_double("simulation", "stop_loss", DEFAULT_STOP_LOSS),
    )?;
    sim_config.position_notional =
        config.get_double("simulation", "position_notional", DEFAULT_POSITION_NOTIONAL);
    Ok(sim_config)
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, DrillError> {
    config
        .get_string(section, key)
        .ok_or_else(|| DrillError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

/// Dates both tickers have data for, ascending.
pub fn build_date_pool(
    data: &dyn DataPort,
    ticker_a: &str,
    ticker_b: &str,
) -> Result<Vec<NaiveDate>, DrillError> {
    let a: BTreeSet<NaiveDate> = data.available_dates(ticker_a)?.into_iter().collect();
    let b: BTreeSet<NaiveDate> = data.available_dates(ticker_b)?.into_iter().collect();
    Ok(a.intersection(&b).copied().collect())
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    QuitEarly,
}

/// Drive the controller against the data and prompt ports until every selected
/// day is processed or the operator quits, then show the summary.
pub fn run_session_loop(
    sim: &mut Simulation,
    data: &dyn DataPort,
    prompt: &mut dyn PromptPort,
) -> Result<SessionEnd, DrillError> {
    let ticker_a = sim.config().ticker_a.clone();
    let ticker_b = sim.config().ticker_b.clone();

    let end = 'session: loop {
        let date = loop {
            if sim.is_complete() {
                break 'session SessionEnd::Completed;
            }
            match prompt.day_command(sim.day_index() + 1, sim.target_days())? {
                DayCommand::NextDay => match sim.request_next_day()? {
                    Some(date) => break date,
                    None => break 'session SessionEnd::Completed,
                },
                DayCommand::SetTakeProfit(fraction) => {
                    if let Err(err) = sim.set_take_profit(fraction) {
                        prompt.notify_rejected(&err)?;
                    }
                }
                DayCommand::SetStopLoss(fraction) => {
                    if let Err(err) = sim.set_stop_loss(fraction) {
                        prompt.notify_rejected(&err)?;
                    }
                }
                DayCommand::Quit => break 'session SessionEnd::QuitEarly,
            }
        };

        let bars_a = data.fetch_intraday(&ticker_a, date)?;
        let bars_b = data.fetch_intraday(&ticker_b, date)?;

        match sim.supply_bars(bars_a, bars_b)? {
            DayStart::Skipped => {
                prompt.notify_skip(date)?;
                continue;
            }
            DayStart::Walking => {}
        }

        loop {
            let choice = {
                let Some((bar_a, bar_b)) = sim.current_bars() else {
                    break;
                };
                prompt.choose(date, bar_a, bar_b)?
            };
            match sim.submit_choice(choice)? {
                Step::Continue => {}
                Step::Exhausted => {
                    prompt.notify_void(date)?;
                    break;
                }
                Step::Recorded(record) => {
                    prompt.show_record(&record)?;
                    break;
                }
            }
        }
    };

    prompt.show_summary(&sim.summary())?;
    Ok(end)
}

fn run_drill(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    chart_path: Option<&PathBuf>,
    seed: Option<u64>,
    days_override: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let sim_config = match build_sim_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_dir = adapter
        .get_string("data", "dir")
        .unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(data_dir));

    let pool = match build_date_pool(&data_port, &sim_config.ticker_a, &sim_config.ticker_b) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if pool.is_empty() {
        let err = DrillError::Data {
            reason: format!(
                "no dates with data for both {} and {}",
                sim_config.ticker_a, sim_config.ticker_b
            ),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let days = days_override.unwrap_or_else(|| {
        adapter.get_int("simulation", "days", DEFAULT_DAY_TARGET as i64) as usize
    });
    let mut selector = match seed {
        Some(seed) => RandomSelector::with_seed(seed),
        None => RandomSelector::new(),
    };
    let dates = selector.select(&pool, days);
    eprintln!(
        "Selected {} of {} candidate dates for {} vs {}",
        dates.len(),
        pool.len(),
        sim_config.ticker_a,
        sim_config.ticker_b,
    );

    let step_delay =
        Duration::from_millis(adapter.get_int("session", "step_delay_ms", 0).max(0) as u64);
    let mut prompt = ConsolePrompt::stdio(step_delay);
    let mut sim = Simulation::new(sim_config, dates);

    match run_session_loop(&mut sim, &data_port, &mut prompt) {
        Ok(SessionEnd::Completed) => {}
        Ok(SessionEnd::QuitEarly) => eprintln!("Session ended early by operator."),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let summary = sim.summary();

    if let Some(output) = output_path {
        if let Err(e) = CsvReportAdapter.write_summary(&summary, output) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Trade log written to {}", output.display());
    }

    if let Some(chart) = chart_path {
        let svg = svg_chart::format_equity_svg(&summary.equity_curve());
        if let Err(e) = fs::write(chart, svg) {
            eprintln!("error: failed to write chart: {e}");
            return ExitCode::from(1);
        }
        eprintln!("Equity curve written to {}", chart.display());
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let sim_config = match build_sim_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Configuration is valid: {} vs {}, TP {:.2}%, SL {:.2}%",
        sim_config.ticker_a,
        sim_config.ticker_b,
        sim_config.take_profit() * 100.0,
        sim_config.stop_loss() * 100.0,
    );
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, ticker_filter: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_dir = match adapter.get_string("data", "dir") {
        Some(d) => d,
        None => {
            let err = DrillError::ConfigMissing {
                section: "data".into(),
                key: "dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let data_port = CsvAdapter::new(PathBuf::from(data_dir));

    let mut tickers = Vec::new();
    match ticker_filter {
        Some(t) => tickers.push(t.to_string()),
        None => {
            for key in ["ticker_a", "ticker_b"] {
                if let Some(t) = adapter.get_string("data", key) {
                    tickers.push(t.trim().to_string());
                }
            }
        }
    }
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    for ticker in &tickers {
        match data_port.available_dates(ticker) {
            Ok(dates) if dates.is_empty() => eprintln!("{ticker}: no sessions"),
            Ok(dates) => {
                // non-empty, so first/last exist
                println!(
                    "{ticker}: {} sessions, {} to {}",
                    dates.len(),
                    dates[0],
                    dates[dates.len() - 1],
                );
            }
            Err(e) => {
                eprintln!("error querying {ticker}: {e}");
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}
