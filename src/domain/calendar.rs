//! Date selection strategies.
//!
//! The run samples N distinct dates from the pool of dates both tickers have
//! data for. Selection is injectable so tests can use deterministic fixtures.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produce `count` distinct dates from `pool`, ascending. When the pool is
/// smaller than `count`, the whole pool is used.
pub trait DateSelector {
    fn select(&mut self, pool: &[NaiveDate], count: usize) -> Vec<NaiveDate>;
}

/// Uniform sampling without replacement. Seedable for reproducible runs.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        RandomSelector {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl DateSelector for RandomSelector {
    fn select(&mut self, pool: &[NaiveDate], count: usize) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = pool
            .choose_multiple(&mut self.rng, count.min(pool.len()))
            .copied()
            .collect();
        dates.sort();
        dates
    }
}

/// The first `count` dates of the pool in order. Deterministic, for tests and
/// replaying a fixed stretch of history.
pub struct LeadingSelector;

impl DateSelector for LeadingSelector {
    fn select(&mut self, pool: &[NaiveDate], count: usize) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = pool.to_vec();
        dates.sort();
        dates.truncate(count);
        dates
    }
}
