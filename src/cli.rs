use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::constants::{BUFFER_CAPACITY, MAX_CAPACITY, TICK_RATE_MS};

#[derive(Parser, Debug)]
#[command(
    name = "pulse-dash",
    about = "Terminal analytics dashboard over simulated system metrics",
    long_about = None
)]
pub struct Cli {
    /// Start with live updates running instead of paused
    #[arg(long)]
    pub live: bool,

    /// Number of samples kept in the sliding window
    #[arg(long, default_value_t = BUFFER_CAPACITY)]
    pub capacity: usize,

    /// Milliseconds between live samples
    #[arg(long, default_value_t = TICK_RATE_MS)]
    pub tick_ms: u64,

    /// Seed for the sample generator (random when omitted)
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Write logs to this file; RUST_LOG selects the level
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
    #[error("window capacity must be at most {max}")]
    CapacityTooLarge { max: usize },
    #[error("tick period must be at least 1 ms")]
    ZeroTickRate,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub capacity: usize,
    pub tick_rate: Duration,
    pub rng_seed: Option<u64>,
    pub start_live: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity: BUFFER_CAPACITY,
            tick_rate: Duration::from_millis(TICK_RATE_MS),
            rng_seed: None,
            start_live: false,
        }
    }
}

impl TryFrom<&Cli> for DashboardConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if cli.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge { max: MAX_CAPACITY });
        }
        if cli.tick_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(Self {
            capacity: cli.capacity,
            tick_rate: Duration::from_millis(cli.tick_ms),
            rng_seed: cli.rng_seed,
            start_live: cli.live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pulse-dash").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_constants() {
        let config = DashboardConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config.capacity, 50);
        assert_eq!(config.tick_rate, Duration::from_millis(2000));
        assert!(!config.start_live);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn flags_are_applied() {
        let cli = parse(&["--live", "--capacity", "10", "--tick-ms", "500", "--rng-seed", "9"]);
        let config = DashboardConfig::try_from(&cli).unwrap();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.tick_rate, Duration::from_millis(500));
        assert_eq!(config.rng_seed, Some(9));
        assert!(config.start_live);
    }

    #[test]
    fn zero_values_are_rejected() {
        let err = DashboardConfig::try_from(&parse(&["--capacity", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
        let err = DashboardConfig::try_from(&parse(&["--tick-ms", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickRate);
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let cli = parse(&["--capacity", "18446744073709551615"]);
        let err = DashboardConfig::try_from(&cli).unwrap_err();
        assert_eq!(err, ConfigError::CapacityTooLarge { max: MAX_CAPACITY });

        let err = DashboardConfig::try_from(&parse(&["--capacity", "10001"])).unwrap_err();
        assert_eq!(err, ConfigError::CapacityTooLarge { max: 10_000 });

        let config = DashboardConfig::try_from(&parse(&["--capacity", "10000"])).unwrap();
        assert_eq!(config.capacity, MAX_CAPACITY);
    }
}
