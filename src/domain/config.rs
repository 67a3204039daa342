//! Simulation parameters.

use super::error::DrillError;

pub const DEFAULT_TAKE_PROFIT: f64 = 0.015;
pub const DEFAULT_STOP_LOSS: f64 = 0.005;
pub const DEFAULT_POSITION_NOTIONAL: f64 = 2_000_000.0;
pub const DEFAULT_DAY_TARGET: usize = 50;

/// Take-profit/stop-loss fractions, position sizing, and the ticker pair.
///
/// Fractions are strictly inside (0, 1) at all times; the setters reject
/// out-of-range values and leave the prior value untouched.
#[derive(Debug, Clone)]
pub struct SimConfig {
    take_profit: f64,
    stop_loss: f64,
    pub position_notional: f64,
    pub ticker_a: String,
    pub ticker_b: String,
}

impl SimConfig {
    pub fn new(
        ticker_a: &str,
        ticker_b: &str,
        take_profit: f64,
        stop_loss: f64,
    ) -> Result<Self, DrillError> {
        validate_fraction("take_profit", take_profit)?;
        validate_fraction("stop_loss", stop_loss)?;
        Ok(SimConfig {
            take_profit,
            stop_loss,
            position_notional: DEFAULT_POSITION_NOTIONAL,
            ticker_a: ticker_a.to_string(),
            ticker_b: ticker_b.to_string(),
        })
    }

    pub fn take_profit(&self) -> f64 {
        self.take_profit
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn set_take_profit(&mut self, fraction: f64) -> Result<(), DrillError> {
        validate_fraction("take_profit", fraction)?;
        self.take_profit = fraction;
        Ok(())
    }

    pub fn set_stop_loss(&mut self, fraction: f64) -> Result<(), DrillError> {
        validate_fraction("stop_loss", fraction)?;
        self.stop_loss = fraction;
        Ok(())
    }
}

fn validate_fraction(name: &str, value: f64) -> Result<(), DrillError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(DrillError::InvalidFraction {
            name: name.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> SimConfig {
        SimConfig::new("TQQQ", "SQQQ", DEFAULT_TAKE_PROFIT, DEFAULT_STOP_LOSS).unwrap()
    }

    #[test]
    fn new_accepts_valid_fractions() {
        let config = sample_config();
        assert!((config.take_profit() - 0.015).abs() < f64::EPSILON);
        assert!((config.stop_loss() - 0.005).abs() < f64::EPSILON);
        assert!((config.position_notional - 2_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(SimConfig::new("TQQQ", "SQQQ", 0.0, 0.005).is_err());
        assert!(SimConfig::new("TQQQ", "SQQQ", 1.0, 0.005).is_err());
        assert!(SimConfig::new("TQQQ", "SQQQ", 0.015, -0.1).is_err());
        assert!(SimConfig::new("TQQQ", "SQQQ", 0.015, f64::NAN).is_err());
    }

    #[test]
    fn setter_rejects_and_keeps_prior_value() {
        let mut config = sample_config();
        assert!(config.set_take_profit(1.2).is_err());
        assert!((config.take_profit() - 0.015).abs() < f64::EPSILON);

        assert!(config.set_stop_loss(0.0).is_err());
        assert!((config.stop_loss() - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn setter_accepts_in_range() {
        let mut config = sample_config();
        config.set_take_profit(0.02).unwrap();
        config.set_stop_loss(0.01).unwrap();
        assert!((config.take_profit() - 0.02).abs() < f64::EPSILON);
        assert!((config.stop_loss() - 0.01).abs() < f64::EPSILON);
    }
}
