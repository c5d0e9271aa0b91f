//! Command line arguments and their validation

use crate::cases::Case;
use benchy::sweep;
use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

/// Largest input size; integer cases count elements with `i32`
pub(crate) const MAX_SIZE: usize = 1 << 30;

/// Time the benchy containers against std across a sweep of input sizes
#[derive(Debug, Parser)]
#[command(name = "benchy", version, about)]
pub(crate) struct Args {
    /// Smallest input size; must be a power of two
    #[arg(long, default_value_t = sweep::DEFAULT_MIN)]
    min: usize,

    /// Largest input size; must be a power of two
    #[arg(long, default_value_t = sweep::DEFAULT_MAX)]
    max: usize,

    /// Timed runs per case and size
    #[arg(long, default_value_t = 100)]
    iterations: u32,

    /// Only run these cases (repeatable). Runs all of them by default.
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<Case>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Seed for the random string keys; drawn from entropy if absent
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
}

/// Argument combinations we refuse to run
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("--{name} must be a nonzero power of two, got {value}")]
    NotPowerOfTwo { name: &'static str, value: usize },

    #[error("--min {min} is larger than --max {max}")]
    EmptySweep { min: usize, max: usize },

    #[error("--max {max} exceeds the largest supported size {limit}")]
    TooLarge { max: usize, limit: usize },

    #[error("--iterations must be at least 1")]
    NoIterations,
}

/// A validated run configuration
#[derive(Debug)]
pub(crate) struct Config {
    /// Input sizes, ascending
    pub(crate) sizes: Vec<usize>,
    pub(crate) iterations: u32,
    /// Cases in run order, without duplicates
    pub(crate) cases: Vec<Case>,
    pub(crate) format: Format,
    pub(crate) seed: Option<u64>,
}

impl Args {
    /// Check the arguments and expand them into a [`Config`].
    pub(crate) fn into_config(self) -> Result<Config, ConfigError> {
        for (name, value) in [("min", self.min), ("max", self.max)] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { name, value });
            }
        }
        if self.min > self.max {
            return Err(ConfigError::EmptySweep {
                min: self.min,
                max: self.max,
            });
        }
        if self.max > MAX_SIZE {
            return Err(ConfigError::TooLarge {
                max: self.max,
                limit: MAX_SIZE,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }

        let cases = if self.cases.is_empty() {
            Case::iter().collect()
        } else {
            Case::iter().filter(|c| self.cases.contains(c)).collect()
        };

        Ok(Config {
            sizes: sweep::sizes(self.min, self.max).collect(),
            iterations: self.iterations,
            cases,
            format: self.format,
            seed: self.seed,
        })
    }
}
