//! Disk Scheduling Policy Module
//!
//! A policy owns every admitted request that has not been dispatched yet and
//! decides which one the head pursues next.
//!
//! # Overview
//!
//! The set of policies is closed, so they are modelled as variants of the
//! [`Scheduler`] enum rather than trait objects. Every variant supports the
//! same operations:
//! - `add`: enqueue a request that just arrived
//! - `has_pending`: whether any request is queued
//! - `next`: remove and return the request chosen by the variant's rule
//!
//! Available policies:
//! 1. **Fcfs** (`N`): arrival order
//! 2. **Sstf** (`S`): shortest seek distance first
//! 3. **Look** (`L`): sweep in the current direction, reverse at the last request
//! 4. **Clook** (`C`): sweep forward only, wrap to the lowest track
//! 5. **Flook** (`F`): LOOK over a frozen queue while arrivals are staged
//!
//! # Example
//!
//! ```rust
//! use iosched_core_rs::policy::PolicyKind;
//! use iosched_core_rs::{Direction, HeadState, Request};
//!
//! let mut scheduler = "S".parse::<PolicyKind>().unwrap().build();
//! scheduler.add(Request::new(0, 0, 50));
//! scheduler.add(Request::new(1, 0, 30));
//!
//! let head = HeadState::new(0, Direction::Forward);
//! let picked = scheduler.next(&head).unwrap();
//! assert_eq!(picked.id(), 1);
//! ```

use crate::models::head::HeadState;
use crate::models::request::Request;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod clook;
pub mod fcfs;
pub mod flook;
pub mod look;
pub mod sstf;

pub use clook::ClookPolicy;
pub use fcfs::FcfsPolicy;
pub use flook::FlookPolicy;
pub use look::LookPolicy;
pub use sstf::SstfPolicy;

/// Errors from resolving a policy selection
#[derive(Debug, Error, PartialEq)]
pub enum PolicyParseError {
    #[error("Unknown Scheduler spec: -s {0}")]
    UnknownPolicy(String),
}

/// Policy selection
///
/// Parsed from the single-letter codes used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicyKind {
    /// First come, first served
    #[default]
    Fcfs,
    /// Shortest seek time first
    Sstf,
    /// Bidirectional sweep
    Look,
    /// Circular (forward-only) sweep
    Clook,
    /// Sweep over a frozen queue with staged arrivals
    Flook,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fcfs,
        PolicyKind::Sstf,
        PolicyKind::Look,
        PolicyKind::Clook,
        PolicyKind::Flook,
    ];

    /// Resolve a command-line letter
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::policy::PolicyKind;
    ///
    /// assert_eq!(PolicyKind::from_letter('F'), Ok(PolicyKind::Flook));
    /// assert!(PolicyKind::from_letter('X').is_err());
    /// ```
    pub fn from_letter(letter: char) -> Result<Self, PolicyParseError> {
        match letter {
            'N' => Ok(PolicyKind::Fcfs),
            'S' => Ok(PolicyKind::Sstf),
            'L' => Ok(PolicyKind::Look),
            'C' => Ok(PolicyKind::Clook),
            'F' => Ok(PolicyKind::Flook),
            other => Err(PolicyParseError::UnknownPolicy(other.to_string())),
        }
    }

    pub fn letter(self) -> char {
        match self {
            PolicyKind::Fcfs => 'N',
            PolicyKind::Sstf => 'S',
            PolicyKind::Look => 'L',
            PolicyKind::Clook => 'C',
            PolicyKind::Flook => 'F',
        }
    }

    /// Construct an empty scheduler for this policy
    pub fn build(self) -> Scheduler {
        match self {
            PolicyKind::Fcfs => Scheduler::Fcfs(FcfsPolicy::new()),
            PolicyKind::Sstf => Scheduler::Sstf(SstfPolicy::new()),
            PolicyKind::Look => Scheduler::Look(LookPolicy::new()),
            PolicyKind::Clook => Scheduler::Clook(ClookPolicy::new()),
            PolicyKind::Flook => Scheduler::Flook(FlookPolicy::new()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => PolicyKind::from_letter(letter),
            _ => Err(PolicyParseError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::Sstf => "SSTF",
            PolicyKind::Look => "LOOK",
            PolicyKind::Clook => "CLOOK",
            PolicyKind::Flook => "FLOOK",
        };
        f.write_str(name)
    }
}

/// One queued request as seen from the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedRequest {
    pub id: usize,
    pub track: i64,
    /// `track - head`, negative when the request lies behind the head.
    /// Saturates at the `i64` bounds.
    pub offset: i64,
}

/// Read-only snapshot of a policy's queues
///
/// Single-queue policies report one queue. FLOOK reports its two queues in a
/// fixed order, with `active_queue` naming the one being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueView {
    pub queues: Vec<Vec<QueuedRequest>>,
    pub active_queue: usize,
}

impl QueueView {
    pub(crate) fn single(queue: &VecDeque<Request>, head: &HeadState) -> Self {
        Self {
            queues: vec![snapshot(queue, head)],
            active_queue: 0,
        }
    }

    /// Total requests across all queues
    pub fn len(&self) -> usize {
        self.queues.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The queue the next selection sweeps
    ///
    /// FLOOK promotes its staging queue when the active one is empty, so an
    /// empty active queue yields the other one.
    pub fn scanned(&self) -> &[QueuedRequest] {
        let active = self
            .queues
            .get(self.active_queue)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if !active.is_empty() {
            return active;
        }
        self.queues
            .iter()
            .find(|q| !q.is_empty())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub(crate) fn snapshot(queue: &VecDeque<Request>, head: &HeadState) -> Vec<QueuedRequest> {
    queue
        .iter()
        .map(|r| QueuedRequest {
            id: r.id(),
            track: r.target_track(),
            offset: r.target_track().saturating_sub(head.current_track()),
        })
        .collect()
}

/// The active scheduling policy and its queued requests
#[derive(Debug, Clone)]
pub enum Scheduler {
    Fcfs(FcfsPolicy),
    Sstf(SstfPolicy),
    Look(LookPolicy),
    Clook(ClookPolicy),
    Flook(FlookPolicy),
}

impl Scheduler {
    /// Which policy this scheduler runs
    pub fn kind(&self) -> PolicyKind {
        match self {
            Scheduler::Fcfs(_) => PolicyKind::Fcfs,
            Scheduler::Sstf(_) => PolicyKind::Sstf,
            Scheduler::Look(_) => PolicyKind::Look,
            Scheduler::Clook(_) => PolicyKind::Clook,
            Scheduler::Flook(_) => PolicyKind::Flook,
        }
    }

    /// Enqueue a request that has just arrived
    pub fn add(&mut self, request: Request) {
        match self {
            Scheduler::Fcfs(p) => p.add(request),
            Scheduler::Sstf(p) => p.add(request),
            Scheduler::Look(p) => p.add(request),
            Scheduler::Clook(p) => p.add(request),
            Scheduler::Flook(p) => p.add(request),
        }
    }

    /// True iff at least one request is queued
    pub fn has_pending(&self) -> bool {
        self.pending_len() > 0
    }

    /// Number of queued requests across all internal queues
    pub fn pending_len(&self) -> usize {
        match self {
            Scheduler::Fcfs(p) => p.len(),
            Scheduler::Sstf(p) => p.len(),
            Scheduler::Look(p) => p.len(),
            Scheduler::Clook(p) => p.len(),
            Scheduler::Flook(p) => p.len(),
        }
    }

    /// Remove and return the next request to service
    ///
    /// Returns `None` only when nothing is pending.
    pub fn next(&mut self, head: &HeadState) -> Option<Request> {
        match self {
            Scheduler::Fcfs(p) => p.next(),
            Scheduler::Sstf(p) => p.next(head),
            Scheduler::Look(p) => p.next(head),
            Scheduler::Clook(p) => p.next(head),
            Scheduler::Flook(p) => p.next(head),
        }
    }

    /// Snapshot of the queue(s) relative to `head`
    pub fn queue_view(&self, head: &HeadState) -> QueueView {
        match self {
            Scheduler::Fcfs(p) => QueueView::single(p.queue(), head),
            Scheduler::Sstf(p) => QueueView::single(p.queue(), head),
            Scheduler::Look(p) => QueueView::single(p.queue(), head),
            Scheduler::Clook(p) => QueueView::single(p.queue(), head),
            Scheduler::Flook(p) => p.view(head),
        }
    }
}
