//! CLOOK (Circular LOOK) Policy
//!
//! Services requests only while sweeping forward. When nothing lies at or
//! beyond the head, it jumps to the lowest queued track and sweeps forward
//! again. The jump is not a reversal: the next selection scans forward
//! regardless of which way the head travelled to get there.

use super::look::closest_ahead;
use crate::models::head::{Direction, HeadState};
use crate::models::request::Request;
use std::collections::VecDeque;

/// CLOOK policy over a single queue
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::ClookPolicy;
/// use iosched_core_rs::{Direction, HeadState, Request};
///
/// let mut policy = ClookPolicy::new();
/// policy.add(Request::new(0, 0, 10));
/// policy.add(Request::new(1, 0, 3));
///
/// // nothing ahead of 50: wrap to the lowest track
/// let head = HeadState::new(50, Direction::Forward);
/// assert_eq!(policy.next(&head).map(|r| r.id()), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClookPolicy {
    queue: VecDeque<Request>,
}

impl ClookPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    pub fn next(&mut self, head: &HeadState) -> Option<Request> {
        let index = closest_ahead(&self.queue, head.current_track(), Direction::Forward)
            .or_else(|| self.lowest_track());
        index.and_then(|i| self.queue.remove(i))
    }

    /// Index of the lowest target track, first occurrence on ties
    fn lowest_track(&self) -> Option<usize> {
        let mut lowest: Option<(usize, i64)> = None;
        for (i, request) in self.queue.iter().enumerate() {
            if lowest.map_or(true, |(_, track)| request.target_track() < track) {
                lowest = Some((i, request.target_track()));
            }
        }
        lowest.map(|(i, _)| i)
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
