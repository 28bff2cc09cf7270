//! Run parameters for the staffing experiment
//!
//! Defaults describe the two-hour lunch peak: a customer every 5 to 50
//! seconds, 30 to 120 seconds at the counter, nobody waiting more than
//! two minutes, 1 to 10 tellers tried.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_MIN_INTERARRIVAL: u64 = 5;
pub const DEFAULT_MAX_INTERARRIVAL: u64 = 50;
pub const DEFAULT_MIN_SERVICE: u64 = 30;
pub const DEFAULT_MAX_SERVICE: u64 = 120;
pub const DEFAULT_MAX_ALLOWED_WAIT: u64 = 2 * 60;
pub const DEFAULT_WINDOW: u64 = 2 * 60 * 60;
pub const DEFAULT_MIN_TELLERS: usize = 1;
pub const DEFAULT_MAX_TELLERS: usize = 10;

/// How arrivals are drawn across the teller counts of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalPolicy {
    /// One arrival sequence, replayed against every teller count
    #[default]
    Shared,
    /// An independent arrival sequence per teller count
    Fresh,
}

impl FromStr for ArrivalPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(ArrivalPolicy::Shared),
            "fresh" => Ok(ArrivalPolicy::Fresh),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ArrivalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalPolicy::Shared => write!(f, "shared"),
            ArrivalPolicy::Fresh => write!(f, "fresh"),
        }
    }
}

/// All knobs of a staffing search, in logical seconds
///
/// Any subset may be given in TOML; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaffingConfig {
    pub min_interarrival: u64,
    pub max_interarrival: u64,
    pub min_service: u64,
    pub max_service: u64,
    pub max_allowed_wait: u64,
    /// Length of the arrival window
    pub window: u64,
    pub min_tellers: usize,
    pub max_tellers: usize,
    pub arrival_policy: ArrivalPolicy,
    /// Seed for the arrival source; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for StaffingConfig {
    fn default() -> Self {
        StaffingConfig {
            min_interarrival: DEFAULT_MIN_INTERARRIVAL,
            max_interarrival: DEFAULT_MAX_INTERARRIVAL,
            min_service: DEFAULT_MIN_SERVICE,
            max_service: DEFAULT_MAX_SERVICE,
            max_allowed_wait: DEFAULT_MAX_ALLOWED_WAIT,
            window: DEFAULT_WINDOW,
            min_tellers: DEFAULT_MIN_TELLERS,
            max_tellers: DEFAULT_MAX_TELLERS,
            arrival_policy: ArrivalPolicy::default(),
            seed: None,
        }
    }
}

impl StaffingConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: StaffingConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interarrival == 0 {
            return Err(ConfigError::NonPositive("min_interarrival"));
        }
        check_range("interarrival", self.min_interarrival, self.max_interarrival)?;
        check_range("service", self.min_service, self.max_service)?;
        if self.min_tellers == 0 {
            return Err(ConfigError::NonPositive("min_tellers"));
        }
        check_range("tellers", self.min_tellers as u64, self.max_tellers as u64)?;
        check_horizon(self.window, self.min_interarrival, self.max_service)?;
        Ok(())
    }

    /// Teller counts tried by the search, smallest first
    pub fn teller_counts(&self) -> std::ops::RangeInclusive<usize> {
        self.min_tellers..=self.max_tellers
    }
}

pub(crate) fn check_range(name: &'static str, min: u64, max: u64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}

/// Reject parameters whose worst-case run cannot be timed in `u64` seconds
///
/// At most `window / min_interarrival` customers arrive. With a single teller
/// the last of them ends no later than the window plus every service back to
/// back, and the per-run sums of waits and totals stay below that end time
/// times the customer count.
pub(crate) fn check_horizon(
    window: u64,
    min_interarrival: u64,
    max_service: u64,
) -> Result<(), ConfigError> {
    let max_customers = window / min_interarrival.max(1);
    max_customers
        .checked_mul(max_service)
        .and_then(|busy| busy.checked_add(window))
        .and_then(|last_end| last_end.checked_mul(max_customers))
        .map(|_| ())
        .ok_or(ConfigError::HorizonOverflow {
            window,
            max_service,
        })
}
