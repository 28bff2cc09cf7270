use crate::config::{StaffingConfig, check_horizon, check_range};
use crate::error::ConfigError;
use crate::random::UniformSource;
use log::debug;

/// A customer as they walk in, before being served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    /// Sequential, starting at 1, in arrival order
    pub id: usize,
    pub arrival: u64,
    pub service: u64,
}

impl Customer {
    pub fn new(id: usize, arrival: u64, service: u64) -> Self {
        Customer {
            id,
            arrival,
            service,
        }
    }
}

/// Draws the customers arriving during one peak window
///
/// Holds only the distribution parameters, so every call to
/// [`generate`](ArrivalGenerator::generate) is independent and a sequence is
/// reproduced by handing it an identically seeded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalGenerator {
    window: u64,
    interarrival: (u64, u64),
    service: (u64, u64),
}

impl ArrivalGenerator {
    pub fn new(
        window: u64,
        interarrival: (u64, u64),
        service: (u64, u64),
    ) -> Result<Self, ConfigError> {
        if interarrival.0 == 0 {
            return Err(ConfigError::NonPositive("min_interarrival"));
        }
        check_range("interarrival", interarrival.0, interarrival.1)?;
        check_range("service", service.0, service.1)?;
        check_horizon(window, interarrival.0, service.1)?;
        Ok(ArrivalGenerator {
            window,
            interarrival,
            service,
        })
    }

    pub fn from_config(config: &StaffingConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.window,
            (config.min_interarrival, config.max_interarrival),
            (config.min_service, config.max_service),
        )
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    /// Generate the arrival sequence, ordered by arrival time
    ///
    /// The clock starts at 0 and advances by one inter-arrival draw per step.
    /// A customer is emitted (with a fresh service draw) only while the clock
    /// is strictly inside the window; the first step past it ends the
    /// sequence. A window shorter than the minimum gap yields no customers.
    pub fn generate<S: UniformSource + ?Sized>(&self, source: &mut S) -> Vec<Customer> {
        let mut customers = Vec::new();
        let mut clock: u64 = 0;

        loop {
            let gap = source.next_in(self.interarrival.0, self.interarrival.1);
            clock = clock.saturating_add(gap);
            if clock >= self.window {
                break;
            }
            let service = source.next_in(self.service.0, self.service.1);
            customers.push(Customer::new(customers.len() + 1, clock, service));
        }

        debug!(
            "generated {} arrivals in a {}s window",
            customers.len(),
            self.window
        );
        customers
    }
}
