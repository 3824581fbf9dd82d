//! Event logging for simulation tracing and replay checks.
//!
//! Every admission, dispatch and completion is captured as an `Event`. The
//! verbose trace of the command-line tool is rendered from this log, and
//! tests use it to observe dispatch order.
//!
//! # Event Types
//!
//! - **Add**: request admitted to the policy queue
//! - **Issue**: policy selected a request for service
//! - **Finish**: head reached the in-service request's track
//! - **QueueScan**: queue contents seen by the policy just before an Issue
//!   (only recorded when queue views are enabled)
//!
//! # Example
//!
//! ```rust
//! use iosched_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Add { tick: 0, request_id: 0, track: 50 });
//! log.log(Event::Issue { tick: 0, request_id: 0, track: 50, head_track: 0 });
//!
//! assert_eq!(log.dispatch_order(), vec![0]);
//! ```

use crate::models::head::Direction;
use crate::policy::QueueView;

/// Simulation event capturing a state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Request arrived and was handed to the policy
    Add {
        tick: usize,
        request_id: usize,
        track: i64,
    },

    /// Policy selected a request; the head starts seeking toward `track`
    Issue {
        tick: usize,
        request_id: usize,
        track: i64,
        head_track: i64,
    },

    /// Request completed
    Finish {
        tick: usize,
        request_id: usize,
        turnaround: usize,
    },

    /// Snapshot of the policy queue(s) taken before selecting `selected`
    QueueScan {
        tick: usize,
        head_track: i64,
        direction: Direction,
        view: QueueView,
        selected: usize,
    },
}

impl Event {
    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Add { .. } => "Add",
            Event::Issue { .. } => "Issue",
            Event::Finish { .. } => "Finish",
            Event::QueueScan { .. } => "QueueScan",
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Request ids in the order the policy dispatched them
    pub fn dispatch_order(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Issue { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .collect()
    }
}
