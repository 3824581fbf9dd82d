//! I/O request model
//!
//! One request is one operation's timeline:
//! - Identity (sequential id in input order)
//! - Arrival tick and target track (immutable)
//! - Start tick (dispatch) and end tick (head reached target), each set once
//!
//! CRITICAL: `arrival_time <= start_time <= end_time` once both are set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a request's timeline is updated out of order
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Request {id} already started at tick {tick}")]
    AlreadyStarted { id: usize, tick: usize },

    #[error("Request {id} already completed at tick {tick}")]
    AlreadyCompleted { id: usize, tick: usize },

    #[error("Request {id} cannot start at tick {tick} before its arrival at tick {arrival}")]
    StartBeforeArrival { id: usize, tick: usize, arrival: usize },

    #[error("Request {id} cannot complete before it has started")]
    NotStarted { id: usize },

    #[error("Request {id} cannot complete at tick {tick} before its start at tick {start}")]
    EndBeforeStart { id: usize, tick: usize, start: usize },
}

/// A single disk I/O request
///
/// # Example
/// ```
/// use iosched_core_rs::Request;
///
/// let mut req = Request::new(0, 5, 120);
/// req.mark_started(7).unwrap();
/// req.mark_completed(20).unwrap();
///
/// assert_eq!(req.wait_time(), Some(2));
/// assert_eq!(req.turnaround_time(), Some(15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Position in the input stream, starting at 0
    id: usize,

    /// Tick at which the request becomes eligible for scheduling
    arrival_time: usize,

    /// Track the head must reach to complete the request
    target_track: i64,

    /// Tick at which the policy selected this request
    start_time: Option<usize>,

    /// Tick at which the head reached `target_track` while in service
    end_time: Option<usize>,
}

impl Request {
    /// Create a new pending request
    pub fn new(id: usize, arrival_time: usize, target_track: i64) -> Self {
        Self {
            id,
            arrival_time,
            target_track,
            start_time: None,
            end_time: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn target_track(&self) -> i64 {
        self.target_track
    }

    pub fn start_time(&self) -> Option<usize> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<usize> {
        self.end_time
    }

    /// Absolute distance from `track` to this request's target
    pub fn seek_distance(&self, track: i64) -> u64 {
        self.target_track.abs_diff(track)
    }

    /// Record dispatch at `tick`
    ///
    /// # Errors
    /// - `AlreadyStarted` if the start tick was already set
    /// - `StartBeforeArrival` if `tick` precedes the arrival tick
    pub fn mark_started(&mut self, tick: usize) -> Result<(), RequestError> {
        if let Some(start) = self.start_time {
            return Err(RequestError::AlreadyStarted {
                id: self.id,
                tick: start,
            });
        }
        if tick < self.arrival_time {
            return Err(RequestError::StartBeforeArrival {
                id: self.id,
                tick,
                arrival: self.arrival_time,
            });
        }
        self.start_time = Some(tick);
        Ok(())
    }

    /// Record completion at `tick`
    ///
    /// # Errors
    /// - `NotStarted` if the request was never dispatched
    /// - `AlreadyCompleted` if the end tick was already set
    /// - `EndBeforeStart` if `tick` precedes the start tick
    pub fn mark_completed(&mut self, tick: usize) -> Result<(), RequestError> {
        let start = self.start_time.ok_or(RequestError::NotStarted { id: self.id })?;
        if let Some(end) = self.end_time {
            return Err(RequestError::AlreadyCompleted { id: self.id, tick: end });
        }
        if tick < start {
            return Err(RequestError::EndBeforeStart {
                id: self.id,
                tick,
                start,
            });
        }
        self.end_time = Some(tick);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }

    /// Ticks spent queued before dispatch (`start - arrival`)
    pub fn wait_time(&self) -> Option<usize> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    /// Ticks from arrival to completion (`end - arrival`)
    pub fn turnaround_time(&self) -> Option<usize> {
        self.end_time.map(|end| end - self.arrival_time)
    }

    /// Ticks spent in service (`end - start`)
    pub fn service_time(&self) -> Option<usize> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
