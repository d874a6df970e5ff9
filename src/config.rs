//! Benchmark parameters.
//!
//! The benchmark takes no arguments. Its two parameters default to
//! [`DEFAULT_COUNT`] elements and seed [`DEFAULT_SEED`], and can be changed
//! through the `VTABLE_BENCH` environment variable, which holds
//! comma-separated `key=value` options:
//!
//! - `count=<usize>` - number of animals per collection
//! - `seed=<u64>` - seed applied at the start of each pass
//!
//! ```text
//! VTABLE_BENCH=count=1048576,seed=7 vtable-bench
//! ```

use alloc::{
    format,
    string::{String, ToString},
};

use rootcause::prelude::*;

/// Name of the environment variable holding the options.
pub const ENV_VAR: &str = "VTABLE_BENCH";

/// Number of animals built per collection unless configured otherwise.
pub const DEFAULT_COUNT: usize = 1 << 24;

/// Seed used for both passes unless configured otherwise.
pub const DEFAULT_SEED: u64 = 0;

/// Errors found while reading the options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An option was not of the form `key=value`.
    #[error("Option {option:?} is not of the form key=value")]
    MissingValue {
        /// The offending option.
        option: String,
    },

    /// An option named a key that does not exist.
    #[error("Unknown option {key:?}")]
    UnknownOption {
        /// The unrecognized key.
        key: String,
    },

    /// A value could not be parsed.
    #[error("Invalid value {value:?} for option {key}")]
    InvalidValue {
        /// The key whose value was rejected.
        key: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The variable was set but did not hold valid unicode.
    #[error("VTABLE_BENCH is not valid unicode")]
    NotUnicode,
}

/// Parameters of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BenchConfig {
    /// Number of animals in each collection.
    pub count: usize,
    /// Seed for the draws; every pass reseeds with it.
    pub seed: u64,
}

impl BenchConfig {
    /// The configuration used when nothing is set.
    pub const DEFAULT: Self = Self {
        count: DEFAULT_COUNT,
        seed: DEFAULT_SEED,
    };

    /// Reads the configuration from [`ENV_VAR`], falling back to
    /// [`BenchConfig::DEFAULT`] when it is not set.
    pub fn from_env() -> Result<Self, Report<ConfigError>> {
        Self::from_var(std::env::var(ENV_VAR))
    }

    fn from_var(var: Result<String, std::env::VarError>) -> Result<Self, Report<ConfigError>> {
        match var {
            Ok(options) => Self::parse_options(&options),
            Err(std::env::VarError::NotPresent) => Ok(Self::DEFAULT),
            Err(std::env::VarError::NotUnicode(_)) => Err(report!(ConfigError::NotUnicode)),
        }
    }

    /// Applies comma-separated `key=value` options on top of
    /// [`BenchConfig::DEFAULT`].
    ///
    /// Keys are case-insensitive, surrounding whitespace is ignored, and
    /// later options override earlier ones.
    ///
    /// ```
    /// use vtable_bench::config::BenchConfig;
    ///
    /// let config = BenchConfig::parse_options("count=1024, SEED=9").unwrap();
    /// assert_eq!(config.count, 1024);
    /// assert_eq!(config.seed, 9);
    /// ```
    pub fn parse_options(options: &str) -> Result<Self, Report<ConfigError>> {
        let mut config = Self::DEFAULT;

        for option in options.split(',').map(str::trim) {
            if option.is_empty() {
                continue;
            }

            let Some((key, value)) = option.split_once('=') else {
                return Err(report!(ConfigError::MissingValue {
                    option: option.to_string(),
                }));
            };
            let (key, value) = (key.trim(), value.trim());

            if key.eq_ignore_ascii_case("count") {
                config.count = parse_value("count", value)?;
            } else if key.eq_ignore_ascii_case("seed") {
                config.seed = parse_value("seed", value)?;
            } else {
                return Err(report!(ConfigError::UnknownOption {
                    key: key.to_string(),
                })
                .attach("Known options: count, seed"));
            }
        }

        Ok(config)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parses the value of `key`, keeping the parser's message as an attachment.
fn parse_value<T>(key: &'static str, value: &str) -> Result<T, Report<ConfigError>>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    value.parse::<T>().map_err(|error| {
        report!(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
        .attach(format!("{error}"))
    })
}
