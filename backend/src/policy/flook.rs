//! FLOOK (Frozen LOOK) Policy
//!
//! Runs LOOK over an active queue that never receives new arrivals. Arrivals
//! collect in a staging queue; once the active queue drains, the two swap and
//! the next sweep covers everything that arrived during the previous one.
//!
//! # Starvation bound
//!
//! A request can be passed over only by requests that were already queued
//! when its sweep began, so no stream of new near-track arrivals can delay it
//! for more than one full sweep.

use super::look::look_select;
use super::{snapshot, QueueView};
use crate::models::head::HeadState;
use crate::models::request::Request;
use std::collections::VecDeque;
use tracing::debug;

/// FLOOK policy with an active and a staging queue
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::FlookPolicy;
/// use iosched_core_rs::{Direction, HeadState, Request};
///
/// let mut policy = FlookPolicy::new();
/// policy.add(Request::new(0, 0, 80));
///
/// let head = HeadState::new(0, Direction::Forward);
/// assert_eq!(policy.next(&head).map(|r| r.id()), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlookPolicy {
    /// Queue being swept
    active: VecDeque<Request>,
    /// Arrivals since the current sweep began
    staging: VecDeque<Request>,
    /// Physical slot (0 or 1) holding the active queue, for diagnostics
    active_slot: usize,
}

impl FlookPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an arrival; the active queue is never touched
    pub fn add(&mut self, request: Request) {
        self.staging.push_back(request);
    }

    pub fn next(&mut self, head: &HeadState) -> Option<Request> {
        if self.active.is_empty() {
            self.swap_queues();
        }
        look_select(&self.active, head).and_then(|i| self.active.remove(i))
    }

    fn swap_queues(&mut self) {
        std::mem::swap(&mut self.active, &mut self.staging);
        self.active_slot ^= 1;
        debug!(
            active = self.active.len(),
            slot = self.active_slot,
            "flook: staging queue promoted"
        );
    }

    /// Requests across both queues
    pub fn len(&self) -> usize {
        self.active.len() + self.staging.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn staging_len(&self) -> usize {
        self.staging.len()
    }

    /// Both queues in slot order
    pub(crate) fn view(&self, head: &HeadState) -> QueueView {
        let active = snapshot(&self.active, head);
        let staging = snapshot(&self.staging, head);
        let queues = if self.active_slot == 0 {
            vec![active, staging]
        } else {
            vec![staging, active]
        };
        QueueView {
            queues,
            active_queue: self.active_slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::head::Direction;

    #[test]
    fn test_flook_arrivals_are_staged() {
        let mut policy = FlookPolicy::new();
        policy.add(Request::new(0, 0, 10));
        assert_eq!(policy.active_len(), 0);
        assert_eq!(policy.staging_len(), 1);
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_flook_freezes_active_queue() {
        let mut policy = FlookPolicy::new();
        policy.add(Request::new(0, 0, 50));
        policy.add(Request::new(1, 0, 90));

        let head = HeadState::new(0, Direction::Forward);
        assert_eq!(policy.next(&head).map(|r| r.id()), Some(0));

        // arrives mid-sweep right next to the head
        policy.add(Request::new(2, 5, 51));

        let head = HeadState::new(50, Direction::Forward);
        assert_eq!(policy.next(&head).map(|r| r.id()), Some(1));

        let head = HeadState::new(90, Direction::Forward);
        assert_eq!(policy.next(&head).map(|r| r.id()), Some(2));
        assert!(policy.is_empty());
    }

    #[test]
    fn test_flook_view_tracks_active_slot() {
        let mut policy = FlookPolicy::new();
        policy.add(Request::new(0, 0, 5));
        let head = HeadState::new(0, Direction::Forward);

        let before = policy.view(&head);
        assert_eq!(before.active_queue, 0);
        assert_eq!(before.queues[1].len(), 1);

        policy.next(&head);
        policy.add(Request::new(1, 1, 7));
        let after = policy.view(&head);
        assert_eq!(after.active_queue, 1);
        assert_eq!(after.queues[0].len(), 1);
        assert!(after.queues[1].is_empty());
    }

    #[test]
    fn test_flook_reverses_within_frozen_queue() {
        let mut policy = FlookPolicy::new();
        policy.add(Request::new(0, 0, 10));
        policy.add(Request::new(1, 0, 30));

        let head = HeadState::new(20, Direction::Forward);
        assert_eq!(policy.next(&head).map(|r| r.id()), Some(1));
        let head = HeadState::new(30, Direction::Forward);
        assert_eq!(policy.next(&head).map(|r| r.id()), Some(0));
    }
}
