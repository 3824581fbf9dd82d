//! xorshift64* random number generator
//!
//! Deterministic PRNG used by the synthetic workload generator. Same seed →
//! same request stream, so generated workloads replay exactly.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator
///
/// # Example
/// ```
/// use iosched_core_rs::rng::RngManager;
///
/// let mut a = RngManager::new(7);
/// let mut b = RngManager::new(7);
/// assert_eq!(a.next(), b.next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        // xorshift cannot leave the all-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform value in `[min, max)`
    ///
    /// # Panics
    /// Panics if `min >= max`
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = max.abs_diff(min);
        min.wrapping_add((value % range_size) as i64)
    }

    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Uniform value in `[0.0, 1.0)`
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Poisson-distributed count with mean `lambda` (Knuth's method)
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        let limit = (-lambda).exp();
        let mut count = 0;
        let mut product = self.next_f64();
        while product > limit {
            count += 1;
            product *= self.next_f64();
        }
        count
    }
}
