//! LOOK Policy
//!
//! Sweeps the head in its current direction, servicing the closest request
//! at or ahead of it. When nothing lies ahead, the sweep reverses.
//!
//! # Selection
//!
//! 1. Candidates: requests whose track is at or beyond the head in the
//!    current direction
//! 2. Pick the smallest distance along that direction; ties go to the
//!    request queued first
//! 3. No candidates: repeat once with the direction flipped
//!
//! The scan helpers are shared with CLOOK and FLOOK.

use crate::models::head::{Direction, HeadState};
use crate::models::request::Request;
use std::collections::VecDeque;

/// Index of the closest request at or ahead of `track` along `direction`
pub(crate) fn closest_ahead(
    queue: &VecDeque<Request>,
    track: i64,
    direction: Direction,
) -> Option<usize> {
    let mut best: Option<(usize, i128)> = None;
    for (i, request) in queue.iter().enumerate() {
        let distance = direction.signed_distance(track, request.target_track());
        if distance < 0 {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

/// LOOK selection over `queue`, reversing once if nothing lies ahead
pub(crate) fn look_select(queue: &VecDeque<Request>, head: &HeadState) -> Option<usize> {
    let track = head.current_track();
    closest_ahead(queue, track, head.direction())
        .or_else(|| closest_ahead(queue, track, head.direction().flip()))
}

/// LOOK policy over a single queue
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::LookPolicy;
/// use iosched_core_rs::{Direction, HeadState, Request};
///
/// let mut policy = LookPolicy::new();
/// policy.add(Request::new(0, 0, 10));
/// policy.add(Request::new(1, 0, 30));
///
/// // moving backward from 20, track 10 lies ahead
/// let head = HeadState::new(20, Direction::Backward);
/// assert_eq!(policy.next(&head).map(|r| r.id()), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookPolicy {
    queue: VecDeque<Request>,
}

impl LookPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    pub fn next(&mut self, head: &HeadState) -> Option<Request> {
        look_select(&self.queue, head).and_then(|i| self.queue.remove(i))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn queue(&self) -> &VecDeque<Request> {
        &self.queue
    }
}
