//! SSTF (Shortest-Seek-Time-First) Policy
//!
//! Dispatches the queued request closest to the head. Ties go to the request
//! queued first, not to the lower track.
//!
//! Far-away requests can starve under steady near-track traffic. That is the
//! policy's documented behavior.

use crate::models::head::HeadState;
use crate::models::request::Request;
use std::collections::VecDeque;

/// SSTF policy over a single queue
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::SstfPolicy;
/// use iosched_core_rs::{Direction, HeadState, Request};
///
/// let mut policy = SstfPolicy::new();
/// policy.add(Request::new(0, 0, 50));
/// policy.add(Request::new(1, 0, 30));
///
/// let head = HeadState::new(0, Direction::Forward);
/// assert_eq!(policy.next(&head).map(|r| r.id()), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SstfPolicy {
    queue: VecDeque<Request>,
}

impl SstfPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    pub fn next(&mut self, head: &HeadState) -> Option<Request> {
        let track = head.current_track();
        let mut closest: Option<(usize, u64)> = None;
        for (i, request) in self.queue.iter().enumerate() {
            let distance = request.seek_distance(track);
            // strict < keeps the first occurrence on ties
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((i, distance));
            }
        }
        closest.and_then(|(i, _)| self.queue.remove(i))
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
