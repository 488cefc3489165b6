//! Random workload generation.
//!
//! Produces reproducible job lists for experiments and property tests.
//! The same seed and settings always yield the same jobs.
//!
//! # Example
//!
//! ```
//! use u_cpusched::workload::WorkloadGenerator;
//!
//! let jobs = WorkloadGenerator::new(5)
//!     .with_max_arrival(10)
//!     .with_burst_range(1, 4)
//!     .with_seed(7)
//!     .generate();
//! assert_eq!(jobs.len(), 5);
//! assert!(jobs.iter().all(|j| j.arrival <= 10 && (1..=4).contains(&j.burst)));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::dispatching::Algorithm;
use crate::models::{Job, Tick};

/// Builder for random job lists.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: usize,
    seed: u64,
    max_arrival: Tick,
    min_burst: Tick,
    max_burst: Tick,
    prefix: String,
}

impl WorkloadGenerator {
    /// Generator for `count` jobs, seed 0, arrivals in `0..=20`, bursts in `1..=10`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            seed: 0,
            max_arrival: 20,
            min_burst: 1,
            max_burst: 10,
            prefix: "P".into(),
        }
    }

    /// Seed for [`generate`](Self::generate).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Latest possible arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: Tick) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Inclusive burst range. Bounds are swapped if given in reverse.
    pub fn with_burst_range(mut self, min: Tick, max: Tick) -> Self {
        self.min_burst = min.min(max);
        self.max_burst = min.max(max);
        self
    }

    /// Name prefix; jobs are named `{prefix}1`, `{prefix}2`, ...
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Number of jobs generated.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Draws jobs from `rng`, in name order (not sorted by arrival).
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<Job> {
        (1..=self.count)
            .map(|n| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                Job::new(format!("{}{}", self.prefix, n), arrival, burst)
            })
            .collect()
    }

    /// Draws jobs from a generator seeded with the configured seed.
    pub fn generate(&self) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Wraps the workload into a configuration.
    pub fn to_config(&self, run_for: Tick, algorithm: Algorithm) -> Config {
        log::debug!(
            "[Workload] {} jobs, seed {}, arrivals 0..={}, bursts {}..={}",
            self.count,
            self.seed,
            self.max_arrival,
            self.min_burst,
            self.max_burst
        );
        Config::new(run_for, algorithm, self.generate())
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new(10)
    }
}
