//! Synthetic workload generation.
//!
//! Produces request streams for stress tests and policy comparisons without an
//! input file. Generation is deterministic given the RNG seed.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same seed + same config → same requests
//! 2. **Poisson arrivals**: the number of requests per tick follows a Poisson
//!    distribution with mean `rate_per_tick`
//! 3. **Uniform tracks**: targets are uniform over `track_range` (inclusive)
//! 4. **Simulator-ready**: output is sorted by arrival, ids are `0..n`
//!
//! # Example
//!
//! ```
//! use iosched_core_rs::arrivals::{WorkloadConfig, WorkloadGenerator};
//! use iosched_core_rs::rng::RngManager;
//!
//! let config = WorkloadConfig {
//!     num_requests: 20,
//!     rate_per_tick: 0.5,
//!     track_range: (0, 199),
//!     start_tick: 0,
//! };
//! let mut rng = RngManager::new(42);
//! let requests = WorkloadGenerator::new(config).generate(&mut rng);
//! assert_eq!(requests.len(), 20);
//! ```

use crate::models::request::Request;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Shape of a synthetic request stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Total requests to generate
    pub num_requests: usize,

    /// Expected arrivals per tick (Poisson λ). Must be positive.
    pub rate_per_tick: f64,

    /// Inclusive `(min, max)` target track range
    pub track_range: (i64, i64),

    /// Tick of the first possible arrival
    pub start_tick: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_requests: 100,
            rate_per_tick: 0.1,
            track_range: (0, 199),
            start_tick: 0,
        }
    }
}

/// Generator for synthetic request streams
pub struct WorkloadGenerator {
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    /// # Panics
    /// Panics if `rate_per_tick` is not positive or `track_range` is inverted
    pub fn new(config: WorkloadConfig) -> Self {
        assert!(config.rate_per_tick > 0.0, "rate_per_tick must be positive");
        assert!(
            config.track_range.0 <= config.track_range.1,
            "track_range min must not exceed max"
        );
        Self { config }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Generate the full request stream
    pub fn generate(&self, rng: &mut RngManager) -> Vec<Request> {
        let mut requests = Vec::with_capacity(self.config.num_requests);
        let mut tick = self.config.start_tick;

        while requests.len() < self.config.num_requests {
            let arrivals = rng.poisson(self.config.rate_per_tick) as usize;
            let remaining = self.config.num_requests - requests.len();
            for _ in 0..arrivals.min(remaining) {
                let id = requests.len();
                requests.push(Request::new(id, tick, self.sample_track(rng)));
            }
            tick += 1;
        }

        requests
    }

    /// Generate `(arrival_time, target_track)` pairs, the input-file shape
    pub fn generate_pairs(&self, rng: &mut RngManager) -> Vec<(usize, i64)> {
        self.generate(rng)
            .iter()
            .map(|r| (r.arrival_time(), r.target_track()))
            .collect()
    }

    fn sample_track(&self, rng: &mut RngManager) -> i64 {
        let (min, max) = self.config.track_range;
        rng.range(min, max + 1)
    }
}
