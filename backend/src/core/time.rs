//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. One tick elapses per track the
//! head crosses; admission, dispatch and completion cost zero ticks.

use serde::{Deserialize, Serialize};

/// Monotonic tick counter for one simulation run
///
/// # Example
/// ```
/// use iosched_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_tick(), 0);
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
}

impl SimClock {
    /// Create a clock at tick 0
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Check whether `tick` has been reached
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new();
    /// assert!(clock.has_reached(0));
    /// assert!(!clock.has_reached(1));
    /// clock.advance_tick();
    /// assert!(clock.has_reached(1));
    /// ```
    pub fn has_reached(&self, tick: usize) -> bool {
        self.current_tick >= tick
    }
}
