//! Simulation State
//!
//! Everything one run mutates, bundled into a single value owned by the
//! simulator: clock, head, the in-service request, the not-yet-admitted
//! backlog, completed requests and the movement/busy counters.
//!
//! # Critical Invariants
//!
//! 1. **Single owner**: every request is in exactly one of backlog, policy
//!    queue, in-service slot or completed list
//! 2. **Movement accounting**: `total_movement` counts ticks in which the
//!    head changed track
//! 3. **Busy time**: `busy_ticks` is the sum of `end - start` over completed
//!    requests

use crate::core::time::SimClock;
use crate::models::head::HeadState;
use crate::models::request::Request;
use std::collections::VecDeque;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub(crate) clock: SimClock,
    pub(crate) head: HeadState,

    /// Requests not yet admitted, in input order
    pub(crate) backlog: VecDeque<Request>,

    /// Request the head is currently seeking toward
    pub(crate) in_service: Option<Request>,

    /// Finished requests, in completion order
    pub(crate) completed: Vec<Request>,

    pub(crate) total_movement: usize,
    pub(crate) busy_ticks: usize,
}

impl SimulationState {
    pub fn new(requests: Vec<Request>, head: HeadState) -> Self {
        Self {
            clock: SimClock::new(),
            head,
            backlog: requests.into(),
            in_service: None,
            completed: Vec::new(),
            total_movement: 0,
            busy_ticks: 0,
        }
    }

    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn head(&self) -> &HeadState {
        &self.head
    }

    pub fn in_service(&self) -> Option<&Request> {
        self.in_service.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.in_service.is_none()
    }

    /// Number of requests still waiting for admission
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn all_admitted(&self) -> bool {
        self.backlog.is_empty()
    }

    pub fn completed(&self) -> &[Request] {
        &self.completed
    }

    pub fn total_movement(&self) -> usize {
        self.total_movement
    }

    pub fn busy_ticks(&self) -> usize {
        self.busy_ticks
    }
}
