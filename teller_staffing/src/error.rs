//! Error types for configuration and simulation

use thiserror::Error;

/// Rejected configuration, reported before any simulation runs
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: u64,
        max: u64,
    },
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error(
        "a {window}s window with services up to {max_service}s overflows the simulation clock"
    )]
    HorizonOverflow { window: u64, max_service: u64 },
    #[error("unknown arrival policy: {0} (expected `shared` or `fresh`)")]
    UnknownPolicy(String),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal failure during a simulation run
///
/// These are logic errors, never retried: the computation is deterministic,
/// so running it again with the same inputs fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("teller pool is empty")]
    EmptyPool,
    #[error("customer {customer} finishes past the end of the simulation clock")]
    ClockOverflow { customer: usize },
    #[error("run with {tellers} teller(s) panicked: {message}")]
    ScenarioPanicked { tellers: usize, message: String },
}
