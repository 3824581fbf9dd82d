//! FCFS (First-Come-First-Served) Policy
//!
//! Simplest baseline policy: service requests in arrival order.
//!
//! # Behavior
//!
//! - Dispatches the longest-queued request
//! - Ignores head position entirely
//!
//! # Use Case
//!
//! - Baseline for comparison with seek-aware policies

use crate::models::request::Request;
use std::collections::VecDeque;

/// FCFS policy: pure FIFO queue
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::FcfsPolicy;
/// use iosched_core_rs::Request;
///
/// let mut policy = FcfsPolicy::new();
/// policy.add(Request::new(0, 0, 90));
/// policy.add(Request::new(1, 0, 1));
///
/// assert_eq!(policy.next().map(|r| r.id()), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FcfsPolicy {
    queue: VecDeque<Request>,
}

impl FcfsPolicy {
    /// Create new FCFS policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    pub fn next(&mut self) -> Option<Request> {
        self.queue.pop_front()
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
