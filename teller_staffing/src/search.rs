//! Search for the smallest teller count that meets the wait goal
//!
//! Every candidate count is an independent run, so the runs are spread over
//! a rayon pool with [`des::parallel::ParallelRunner`] and collected back in
//! teller-count order.
//!
//! Under [`ArrivalPolicy::Shared`] one arrival sequence is drawn from the
//! seed and replayed against every count, so the results differ only by the
//! number of tellers. Under [`ArrivalPolicy::Fresh`] the run with `n` tellers
//! draws its own sequence from `seed + n`, so it is still reproducible.

use crate::arrivals::{ArrivalGenerator, Customer};
use crate::config::{ArrivalPolicy, StaffingConfig};
use crate::engine::AssignmentEngine;
use crate::error::{ConfigError, SimulationError};
use crate::random::seeded;
use crate::stats::{SimulationResult, StatisticsAggregator};
use des::parallel::ParallelRunner;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Everything a search produced, enough to reproduce it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingOutcome {
    pub config: StaffingConfig,
    pub seed: u64,
    /// One result per teller count, smallest count first
    pub results: Vec<SimulationResult>,
    /// Smallest count that met the goal, if any in range did
    pub recommended: Option<usize>,
}

/// Smallest teller count whose run met the goal
pub fn recommend(results: &[SimulationResult]) -> Option<usize> {
    results
        .iter()
        .filter(|r| r.goal_met)
        .map(|r| r.tellers)
        .min()
}

pub struct StaffingSearch {
    config: StaffingConfig,
    generator: ArrivalGenerator,
    aggregator: StatisticsAggregator,
    num_threads: Option<usize>,
}

impl StaffingSearch {
    pub fn new(config: StaffingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = ArrivalGenerator::from_config(&config)?;
        let aggregator = StatisticsAggregator::new(config.max_allowed_wait);
        Ok(StaffingSearch {
            config,
            generator,
            aggregator,
            num_threads: None,
        })
    }

    /// Limit the worker threads used for the per-count runs
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    pub fn config(&self) -> &StaffingConfig {
        &self.config
    }

    /// Run every teller count in range, drawing arrivals from `seed`
    pub fn run(&self, seed: u64) -> Result<StaffingOutcome, SimulationError> {
        info!(
            "searching {}..={} tellers, {} arrivals, seed {}",
            self.config.min_tellers, self.config.max_tellers, self.config.arrival_policy, seed
        );

        let results = match self.config.arrival_policy {
            ArrivalPolicy::Shared => {
                let arrivals = self.generator.generate(&mut seeded(seed));
                self.run_with_arrivals(&arrivals)?
            }
            ArrivalPolicy::Fresh => self.run_counts(|tellers| {
                self.generator
                    .generate(&mut seeded(seed.wrapping_add(tellers as u64)))
            })?,
        };

        let recommended = recommend(&results);
        match recommended {
            Some(tellers) => info!("{} teller(s) is enough to meet the goal", tellers),
            None => warn!(
                "no teller count in {}..={} meets the {}s wait goal",
                self.config.min_tellers, self.config.max_tellers, self.config.max_allowed_wait
            ),
        }

        Ok(StaffingOutcome {
            config: self.config.clone(),
            seed,
            results,
            recommended,
        })
    }

    /// Replay one fixed arrival sequence against every teller count in range
    pub fn run_with_arrivals(
        &self,
        arrivals: &[Customer],
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        self.run_counts(|_| arrivals.to_vec())
    }

    fn run_counts<A>(&self, arrivals_for: A) -> Result<Vec<SimulationResult>, SimulationError>
    where
        A: Fn(usize) -> Vec<Customer> + Send + Sync,
    {
        let min_tellers = self.config.min_tellers;
        let num_counts = self.config.teller_counts().count();
        let aggregator = self.aggregator;

        let mut runner = ParallelRunner::new(
            num_counts,
            |scenario_id| -> Result<SimulationResult, SimulationError> {
                let tellers = min_tellers + scenario_id;
                let arrivals = arrivals_for(tellers);
                let served = AssignmentEngine::new(tellers).run(&arrivals)?;
                let result = aggregator.summarize(tellers, &served);
                info!(
                    "{} teller(s): {} served, max wait {}s, goal {}",
                    tellers,
                    result.customers_served,
                    result.max_wait,
                    if result.goal_met { "met" } else { "missed" }
                );
                Ok(result)
            },
        )
        .progress(|completed, total| debug!("completed {}/{} teller counts", completed, total));
        if let Some(n) = self.num_threads {
            runner = runner.num_threads(n);
        }

        runner
            .run()
            .into_iter()
            .enumerate()
            .map(|(scenario_id, outcome)| {
                outcome.unwrap_or_else(|message| {
                    Err(SimulationError::ScenarioPanicked {
                        tellers: min_tellers + scenario_id,
                        message,
                    })
                })
            })
            .collect()
    }
}
