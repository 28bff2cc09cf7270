//! Parallel execution of independent scenarios
//!
//! This module runs many simulation scenarios concurrently while keeping the
//! results deterministic and isolating failures.
//!
//! # Example: sweeping a parameter
//!
//! ```rust
//! use des::parallel::ParallelRunner;
//!
//! let results = ParallelRunner::new(10, |scenario_id| {
//!     // derive every parameter (including seeds) from the scenario id
//!     (scenario_id + 1) * 100
//! })
//! .num_threads(4)
//! .run();
//!
//! for (id, result) in results.iter().enumerate() {
//!     match result {
//!         Ok(value) => assert_eq!(*value, (id + 1) * 100),
//!         Err(e) => eprintln!("Scenario {} failed: {}", id, e),
//!     }
//! }
//! ```
//!
//! # Determinism
//!
//! Results are deterministic when:
//! 1. The scenario function derives all inputs from `scenario_id`
//! 2. Random sources inside a scenario are seeded (e.g., `StdRng::seed_from_u64(seed)`)
//! 3. No mutable state is shared across scenarios
//!
//! Running the same scenarios twice produces identical results regardless of
//! execution order or thread count.
//!
//! # Error Handling
//!
//! Panics in individual scenarios are caught and returned as `Err(String)`.
//! Other scenarios continue executing normally.

use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Executes indexed scenarios in parallel
///
/// The scenario function `F` receives a `scenario_id` in `0..num_scenarios`
/// and returns that scenario's output `S`. It must be `Send + Sync` because it
/// is called from several worker threads at once.
pub struct ParallelRunner<F> {
    num_scenarios: usize,
    scenario: F,
    num_threads: Option<usize>,
    progress_callback: Option<Arc<dyn Fn(usize, usize) + Send + Sync>>,
}

impl<S, F> ParallelRunner<F>
where
    F: Fn(usize) -> S + Send + Sync,
    S: Send,
{
    /// Create a new parallel runner
    ///
    /// # Arguments
    ///
    /// * `num_scenarios` - Number of independent scenarios to run
    /// * `scenario` - Closure that runs the scenario with the given id
    pub fn new(num_scenarios: usize, scenario: F) -> Self {
        ParallelRunner {
            num_scenarios,
            scenario,
            num_threads: None,
            progress_callback: None,
        }
    }

    /// Set number of threads (defaults to rayon's global pool)
    ///
    /// If a dedicated pool of that size cannot be built, the global pool is
    /// used instead.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Set progress callback (called after each scenario completes)
    ///
    /// The callback receives `(completed_count, total_count)`.
    pub fn progress<P>(mut self, callback: P) -> Self
    where
        P: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Execute all scenarios and return results in scenario_id order
    ///
    /// # Returns
    ///
    /// - `Ok(S)` for scenarios that returned normally
    /// - `Err(String)` carrying the panic message for scenarios that panicked
    ///
    /// # Example
    ///
    /// ```rust
    /// use des::parallel::ParallelRunner;
    ///
    /// let results = ParallelRunner::new(10, |id| id * 2).run();
    ///
    /// assert_eq!(results.len(), 10);
    /// assert!(results.iter().all(|r| r.is_ok()));
    /// ```
    pub fn run(self) -> Vec<Result<S, String>> {
        let progress_counter = AtomicUsize::new(0);

        let pool = self.num_threads.and_then(|n| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .ok()
        });

        let execute = || {
            (0..self.num_scenarios)
                .into_par_iter()
                .map(|scenario_id| {
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        (self.scenario)(scenario_id)
                    }));

                    let completed = progress_counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback(completed, self.num_scenarios);
                    }

                    result.map_err(|panic| {
                        if let Some(s) = panic.downcast_ref::<&str>() {
                            s.to_string()
                        } else if let Some(s) = panic.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        }
                    })
                })
                .collect()
        };

        if let Some(pool) = pool {
            pool.install(execute)
        } else {
            execute()
        }
    }
}

/// Run scenarios in parallel with the default pool
///
/// For thread count or progress reporting, use [`ParallelRunner`].
///
/// ```rust
/// use des::parallel::run_parallel;
///
/// let results = run_parallel(100, |scenario_id| scenario_id as u64);
/// assert_eq!(results.len(), 100);
/// ```
pub fn run_parallel<S, F>(num_scenarios: usize, scenario: F) -> Vec<Result<S, String>>
where
    F: Fn(usize) -> S + Send + Sync,
    S: Send,
{
    ParallelRunner::new(num_scenarios, scenario).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct CounterStats {
        id: usize,
        count: usize,
    }

    fn counter(id: usize) -> CounterStats {
        CounterStats { id, count: 10 }
    }

    #[test]
    fn test_parallel_basic() {
        let results = run_parallel(10, counter);

        assert_eq!(results.len(), 10);
        for (i, result) in results.iter().enumerate() {
            let stats = result.as_ref().unwrap();
            assert_eq!(stats.id, i);
            assert_eq!(stats.count, 10);
        }
    }

    #[test]
    fn test_parallel_determinism() {
        let run1 = run_parallel(20, counter);
        let run2 = run_parallel(20, counter);

        assert_eq!(run1, run2);
    }

    #[test]
    fn test_parallel_panic_isolation() {
        let results = run_parallel(10, |scenario_id| {
            if scenario_id == 5 {
                panic!("Test panic");
            }
            counter(scenario_id)
        });

        assert_eq!(results.len(), 10);
        assert_eq!(results[5], Err("Test panic".to_string()));
        for (i, result) in results.iter().enumerate() {
            if i != 5 {
                assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn test_formatted_panic_message() {
        let results = run_parallel(1, |scenario_id| -> usize {
            panic!("scenario {} broke", scenario_id);
        });

        assert_eq!(results[0], Err("scenario 0 broke".to_string()));
    }

    #[test]
    fn test_parallel_progress_callback() {
        use std::sync::Mutex;
        let completed = Arc::new(Mutex::new(0));
        let completed_clone = completed.clone();

        ParallelRunner::new(5, counter)
            .progress(move |count, _total| {
                let mut last = completed_clone.lock().unwrap();
                *last = (*last).max(count);
            })
            .run();

        assert_eq!(*completed.lock().unwrap(), 5);
    }

    #[test]
    fn test_parallel_custom_threads() {
        let results = ParallelRunner::new(8, counter).num_threads(2).run();

        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_empty_scenarios() {
        let results = run_parallel(0, counter);

        assert_eq!(results.len(), 0);
    }

    #[test]
    fn test_result_ordering_preserved() {
        let results = run_parallel(100, counter);

        for (i, result) in results.iter().enumerate() {
            let stats = result.as_ref().unwrap();
            assert_eq!(stats.id, i, "Result ordering not preserved");
        }
    }
}
