//! Statistics aggregation
//!
//! Reduces completed requests and the run's counters into the summary the
//! command-line tool prints:
//!
//! - `turnaround = end - arrival`
//! - `wait = start - arrival`
//! - `io_utilization = busy_ticks / total_ticks`
//!
//! Everything is computed once, after the run; nothing is streamed.

use crate::models::request::Request;
use crate::policy::PolicyKind;
use serde::{Deserialize, Serialize};

/// Per-request outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: usize,
    pub arrival_time: usize,
    pub target_track: i64,
    pub start_time: usize,
    pub end_time: usize,
    pub wait: usize,
    pub turnaround: usize,
}

impl RequestRecord {
    /// Record for a completed request; `None` if it never finished
    pub fn from_request(request: &Request) -> Option<Self> {
        let start_time = request.start_time()?;
        let end_time = request.end_time()?;
        Some(Self {
            id: request.id(),
            arrival_time: request.arrival_time(),
            target_track: request.target_track(),
            start_time,
            end_time,
            wait: start_time - request.arrival_time(),
            turnaround: end_time - request.arrival_time(),
        })
    }
}

/// Whole-run metrics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_ticks: usize,
    pub total_movement: usize,
    pub busy_ticks: usize,
    pub io_utilization: f64,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub max_wait: usize,
    pub num_requests: usize,
}

/// Result of one simulation run
///
/// # Example
/// ```
/// use iosched_core_rs::{Request, SimulationReport};
/// use iosched_core_rs::policy::PolicyKind;
///
/// let mut req = Request::new(0, 0, 10);
/// req.mark_started(0).unwrap();
/// req.mark_completed(10).unwrap();
///
/// let report = SimulationReport::aggregate(PolicyKind::Fcfs, &[req], 20, 10, 10);
/// assert_eq!(report.summary.io_utilization, 0.5);
/// assert_eq!(report.summary.avg_turnaround, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub policy: PolicyKind,
    /// One record per completed request, in id (admission) order
    pub requests: Vec<RequestRecord>,
    pub summary: Summary,
}

impl SimulationReport {
    pub fn aggregate(
        policy: PolicyKind,
        completed: &[Request],
        total_ticks: usize,
        total_movement: usize,
        busy_ticks: usize,
    ) -> Self {
        let mut requests: Vec<RequestRecord> =
            completed.iter().filter_map(RequestRecord::from_request).collect();
        requests.sort_by_key(|r| r.id);

        let count = requests.len();
        let (avg_turnaround, avg_wait) = if count == 0 {
            (0.0, 0.0)
        } else {
            let turnaround: usize = requests.iter().map(|r| r.turnaround).sum();
            let wait: usize = requests.iter().map(|r| r.wait).sum();
            (turnaround as f64 / count as f64, wait as f64 / count as f64)
        };
        let io_utilization = if total_ticks == 0 {
            0.0
        } else {
            busy_ticks as f64 / total_ticks as f64
        };

        Self {
            policy,
            summary: Summary {
                total_ticks,
                total_movement,
                busy_ticks,
                io_utilization,
                avg_turnaround,
                avg_wait,
                max_wait: requests.iter().map(|r| r.wait).max().unwrap_or(0),
                num_requests: count,
            },
            requests,
        }
    }

    /// Pretty-printed JSON form of the report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
