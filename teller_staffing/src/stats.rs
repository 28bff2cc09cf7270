use crate::engine::ServedCustomer;
use serde::{Deserialize, Serialize};

/// Summary of one run with a given number of tellers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub tellers: usize,
    pub customers_served: usize,
    pub max_wait: u64,
    pub max_service: u64,
    pub mean_total: f64,
    pub mean_wait: f64,
    pub goal_met: bool,
    /// When the last customer leaves the counter
    pub last_departure: u64,
    /// Seconds spent serving, indexed by teller id - 1
    pub teller_busy: Vec<u64>,
}

impl SimulationResult {
    /// Result of a run nobody showed up to
    pub fn empty(tellers: usize) -> Self {
        SimulationResult {
            tellers,
            customers_served: 0,
            max_wait: 0,
            max_service: 0,
            mean_total: 0.0,
            mean_wait: 0.0,
            goal_met: false,
            last_departure: 0,
            teller_busy: vec![0; tellers],
        }
    }

    /// Share of the run each teller spent serving, in `[0, 1]`
    pub fn utilization(&self) -> Vec<f64> {
        if self.last_departure == 0 {
            return vec![0.0; self.teller_busy.len()];
        }
        self.teller_busy
            .iter()
            .map(|&busy| busy as f64 / self.last_departure as f64)
            .collect()
    }

    /// Average of [`utilization`](SimulationResult::utilization) over all tellers
    pub fn mean_utilization(&self) -> f64 {
        let per_teller = self.utilization();
        if per_teller.is_empty() {
            return 0.0;
        }
        per_teller.iter().sum::<f64>() / per_teller.len() as f64
    }
}

/// Reduces served customers to a [`SimulationResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsAggregator {
    max_allowed_wait: u64,
}

impl StatisticsAggregator {
    pub fn new(max_allowed_wait: u64) -> Self {
        StatisticsAggregator { max_allowed_wait }
    }

    pub fn max_allowed_wait(&self) -> u64 {
        self.max_allowed_wait
    }

    /// The goal counts as met only if somebody was served and nobody waited
    /// longer than the threshold.
    pub fn summarize(&self, tellers: usize, served: &[ServedCustomer]) -> SimulationResult {
        if served.is_empty() {
            return SimulationResult::empty(tellers);
        }

        let mut max_wait = 0;
        let mut max_service = 0;
        // wide enough for any replayed sequence the engine accepted
        let mut wait_sum: u128 = 0;
        let mut total_sum: u128 = 0;
        let mut last_departure = 0;
        let mut teller_busy = vec![0; tellers];

        for customer in served {
            max_wait = max_wait.max(customer.wait());
            max_service = max_service.max(customer.service());
            wait_sum += u128::from(customer.wait());
            total_sum += u128::from(customer.total());
            last_departure = last_departure.max(customer.end());
            // teller ids run 1..=tellers; busy time never exceeds the last departure
            teller_busy[customer.teller() - 1] += customer.service();
        }

        let n = served.len() as f64;
        SimulationResult {
            tellers,
            customers_served: served.len(),
            max_wait,
            max_service,
            mean_total: total_sum as f64 / n,
            mean_wait: wait_sum as f64 / n,
            goal_met: max_wait <= self.max_allowed_wait,
            last_departure,
            teller_busy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::Customer;
    use crate::engine::AssignmentEngine;
    use approx::assert_abs_diff_eq;

    fn serve(tellers: usize) -> Vec<ServedCustomer> {
        let customers = vec![
            Customer::new(1, 10, 60),
            Customer::new(2, 20, 60),
            Customer::new(3, 30, 60),
        ];
        AssignmentEngine::new(tellers).run(&customers).unwrap()
    }

    #[test]
    fn single_teller_summary() {
        let result = StatisticsAggregator::new(120).summarize(1, &serve(1));

        assert_eq!(result.customers_served, 3);
        assert_eq!(result.max_wait, 100);
        assert_eq!(result.max_service, 60);
        // waits: 0, 50, 100
        assert_abs_diff_eq!(result.mean_wait, 50.0, epsilon = 1e-9);
        // totals: 60, 110, 160
        assert_abs_diff_eq!(result.mean_total, 110.0, epsilon = 1e-9);
        assert!(result.goal_met);
        assert_eq!(result.last_departure, 190);
        assert_eq!(result.teller_busy, vec![180]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let served = serve(1);
        assert!(StatisticsAggregator::new(100).summarize(1, &served).goal_met);
        assert!(!StatisticsAggregator::new(99).summarize(1, &served).goal_met);
    }

    #[test]
    fn sums_near_the_end_of_the_clock_do_not_overflow() {
        let late = u64::MAX - 100;
        let customers = vec![
            Customer::new(1, 0, late),
            Customer::new(2, 1, 50),
            Customer::new(3, 2, 50),
        ];
        let served = AssignmentEngine::new(1).run(&customers).unwrap();
        let result = StatisticsAggregator::new(120).summarize(1, &served);

        assert_eq!(result.max_wait, late + 50 - 2);
        assert_eq!(result.last_departure, late + 100);
        assert!(result.mean_wait > u64::MAX as f64 / 2.0);
        assert!(!result.goal_met);
    }

    #[test]
    fn three_tellers_no_wait() {
        let result = StatisticsAggregator::new(120).summarize(3, &serve(3));

        assert_eq!(result.max_wait, 0);
        assert_eq!(result.mean_wait, 0.0);
        assert_abs_diff_eq!(result.mean_total, 60.0, epsilon = 1e-9);
        assert!(result.goal_met);
        assert_eq!(result.teller_busy, vec![60, 60, 60]);
    }

    #[test]
    fn empty_run_is_zero_and_misses_goal() {
        let result = StatisticsAggregator::new(120).summarize(4, &[]);

        assert_eq!(result, SimulationResult::empty(4));
        assert_eq!(result.customers_served, 0);
        assert_eq!(result.max_wait, 0);
        assert_eq!(result.max_service, 0);
        assert_eq!(result.mean_total, 0.0);
        assert_eq!(result.mean_wait, 0.0);
        assert!(!result.goal_met);
        assert_eq!(result.utilization(), vec![0.0; 4]);
    }

    #[test]
    fn utilization_relative_to_last_departure() {
        let result = StatisticsAggregator::new(120).summarize(3, &serve(3));
        // last departure at 90, each teller busy 60s
        for u in result.utilization() {
            assert_abs_diff_eq!(u, 60.0 / 90.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(result.mean_utilization(), 60.0 / 90.0, epsilon = 1e-9);

        let busy = StatisticsAggregator::new(120).summarize(1, &serve(1));
        assert_abs_diff_eq!(busy.mean_utilization(), 180.0 / 190.0, epsilon = 1e-9);
        assert_eq!(SimulationResult::empty(0).mean_utilization(), 0.0);
    }
}
