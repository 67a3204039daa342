//! Configuration validation.
//!
//! Every field is checked before a run starts, so a bad config fails up front
//! rather than mid-session.

use crate::domain::config::{
    DEFAULT_DAY_TARGET, DEFAULT_POSITION_NOTIONAL, DEFAULT_STOP_LOSS, DEFAULT_TAKE_PROFIT,
};
use crate::domain::error::DrillError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), DrillError> {
    validate_data_dir(config)?;
    validate_tickers(config)?;
    validate_fraction(config, "take_profit", DEFAULT_TAKE_PROFIT)?;
    validate_fraction(config, "stop_loss", DEFAULT_STOP_LOSS)?;
    validate_days(config)?;
    validate_position_notional(config)?;
    validate_step_delay(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), DrillError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(DrillError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), DrillError> {
    let a = require_ticker(config, "ticker_a")?;
    let b = require_ticker(config, "ticker_b")?;
    if a.eq_ignore_ascii_case(&b) {
        return Err(DrillError::ConfigInvalid {
            section: "data".to_string(),
            key: "ticker_b".to_string(),
            reason: "ticker_a and ticker_b must be distinct".to_string(),
        });
    }
    Ok(())
}

fn require_ticker(config: &dyn ConfigPort, key: &str) -> Result<String, DrillError> {
    match config.get_string("data", key) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(DrillError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_fraction(config: &dyn ConfigPort, key: &str, default: f64) -> Result<(), DrillError> {
    let value = config.get_double("simulation", key, default);
    if !(value.is_finite() && value > 0.0 && value < 1.0) {
        return Err(DrillError::ConfigInvalid {
            section: "simulation".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be within (0, 1)"),
        });
    }
    Ok(())
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), DrillError> {
    let value = config.get_int("simulation", "days", DEFAULT_DAY_TARGET as i64);
    if value <= 0 {
        return Err(DrillError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "days".to_string(),
            reason: "days must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_position_notional(config: &dyn ConfigPort) -> Result<(), DrillError> {
    let value = config.get_double("simulation", "position_notional", DEFAULT_POSITION_NOTIONAL);
    if value <= 0.0 {
        return Err(DrillError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "position_notional".to_string(),
            reason: "position_notional must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_step_delay(config: &dyn ConfigPort) -> Result<(), DrillError> {
    let value = config.get_int("session", "step_delay_ms", 0);
    if value < 0 {
        return Err(DrillError::ConfigInvalid {
            section: "session".to_string(),
            key: "step_delay_ms".to_string(),
            reason: "step_delay_ms must be non-negative".to_string(),
        });
    }
    Ok(())
}
