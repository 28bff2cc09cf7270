//! Bank teller staffing simulation
//!
//! Customers arrive at random during a fixed peak window and wait in one
//! shared FIFO queue for the first free teller. For each candidate number of
//! tellers the run records how long people waited, and the search reports the
//! smallest staff that keeps every wait within the goal.
//!
//! Pipeline:
//! - `arrivals`: ArrivalGenerator draws the customers of one window
//! - `tellers`: TellerPool keeps tellers ordered by when they free up
//! - `engine`: AssignmentEngine serves each customer at the earliest-free teller
//! - `stats`: StatisticsAggregator reduces a run to a SimulationResult
//! - `search`: StaffingSearch repeats the run over a range of teller counts
//!
//! Time is a logical clock in whole seconds; nothing reads the wall clock.

pub mod arrivals;
pub mod config;
pub mod engine;
pub mod error;
pub mod random;
pub mod report;
pub mod search;
pub mod stats;
pub mod tellers;

pub use arrivals::{ArrivalGenerator, Customer};
pub use config::{ArrivalPolicy, StaffingConfig};
pub use engine::{AssignmentEngine, ServedCustomer};
pub use error::{ConfigError, SimulationError};
pub use random::{ReplaySource, UniformSource};
pub use search::{StaffingOutcome, StaffingSearch, recommend};
pub use stats::{SimulationResult, StatisticsAggregator};
pub use tellers::{Teller, TellerPool};
