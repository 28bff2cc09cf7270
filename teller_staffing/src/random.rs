//! Uniform integer sampling consumed by the arrival generator

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

/// Source of uniformly distributed integers
pub trait UniformSource {
    /// Next integer in `[lo, hi]`, both ends inclusive. Requires `lo <= hi`.
    fn next_in(&mut self, lo: u64, hi: u64) -> u64;
}

impl<R: rand::Rng + ?Sized> UniformSource for R {
    fn next_in(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo <= hi, "empty sampling range [{}, {}]", lo, hi);
        match Uniform::new_inclusive(lo, hi) {
            Ok(uniform) => uniform.sample(self),
            Err(_) => lo,
        }
    }
}

/// Seeded standard generator, reproducible across runs
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed list of samples in order, cycling when exhausted
///
/// Each sample is clamped into the requested range. With no samples the
/// lower bound is returned. Useful to script exact arrival patterns.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Vec<u64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(samples: Vec<u64>) -> Self {
        ReplaySource { samples, cursor: 0 }
    }
}

impl UniformSource for ReplaySource {
    fn next_in(&mut self, lo: u64, hi: u64) -> u64 {
        if self.samples.is_empty() {
            return lo;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample.clamp(lo, hi)
    }
}
