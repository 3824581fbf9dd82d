//! Disk head position and sweep direction
//!
//! Only the simulation driver moves the head. Policies receive `&HeadState`
//! and decide which request to pursue, never how the head moves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Tracks a simulation accepts, matching the 32-bit fields of the input format
pub const TRACK_RANGE: RangeInclusive<i64> = (i32::MIN as i64)..=(i32::MAX as i64);

/// Sweep direction of the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Toward higher track numbers
    #[default]
    Forward,
    /// Toward lower track numbers
    Backward,
}

impl Direction {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// +1 for forward, -1 for backward
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Signed distance from `from` to `to` measured along this direction.
    ///
    /// Non-negative iff `to` lies on this side of (or at) `from`. Widened so
    /// that any pair of `i64` tracks is representable.
    pub fn signed_distance(self, from: i64, to: i64) -> i128 {
        (i128::from(to) - i128::from(from)) * i128::from(self.sign())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

/// Current head track and sweep direction
///
/// # Example
/// ```
/// use iosched_core_rs::{Direction, HeadState};
///
/// let head = HeadState::new(0, Direction::Forward);
/// assert_eq!(head.current_track(), 0);
/// assert_eq!(head.direction(), Direction::Forward);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadState {
    current_track: i64,
    direction: Direction,
}

impl HeadState {
    pub fn new(current_track: i64, direction: Direction) -> Self {
        Self {
            current_track,
            direction,
        }
    }

    pub fn current_track(&self) -> i64 {
        self.current_track
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Point the head at `target`; a no-op when already there
    pub(crate) fn face(&mut self, target: i64) {
        if target > self.current_track {
            self.direction = Direction::Forward;
        } else if target < self.current_track {
            self.direction = Direction::Backward;
        }
    }

    /// Move one track toward `target`. Returns whether the head moved.
    pub(crate) fn step_toward(&mut self, target: i64) -> bool {
        if target == self.current_track {
            return false;
        }
        self.face(target);
        self.current_track += self.direction.sign();
        true
    }
}
