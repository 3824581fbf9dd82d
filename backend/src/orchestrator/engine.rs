//! Simulation Engine
//!
//! The tick loop that drives one disk head through a request stream under a
//! single scheduling policy.
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. Admission: hand every arrived request to the policy (only the
//!    earliest one under AdmissionMode::OnePerTick)
//! 2. Service:
//!    - in service and head at target → complete, repeat step 2
//!    - in service otherwise          → move head one track, tick consumed
//!    - idle with pending requests    → dispatch, repeat step 2
//! 3. Termination: idle, nothing pending, everything admitted → stop at t
//!    otherwise advance to t + 1
//! ```
//!
//! Dispatch and completion cost zero ticks, so a request dispatched while the
//! head already sits on its track finishes in the same tick.
//!
//! # Example
//!
//! ```rust
//! use iosched_core_rs::orchestrator::{SimulationConfig, Simulator};
//! use iosched_core_rs::policy::PolicyKind;
//!
//! let config = SimulationConfig {
//!     policy: PolicyKind::Sstf,
//!     ..Default::default()
//! };
//! let simulator = Simulator::from_pairs(config, &[(0, 50), (0, 30)]).unwrap();
//! let report = simulator.run().unwrap();
//!
//! assert_eq!(report.summary.total_ticks, 50);
//! assert_eq!(report.summary.total_movement, 50);
//! ```

use crate::models::event::{Event, EventLog};
use crate::models::head::{Direction, HeadState, TRACK_RANGE};
use crate::models::request::{Request, RequestError};
use crate::models::state::SimulationState;
use crate::policy::{PolicyKind, Scheduler};
use crate::stats::SimulationReport;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

// ============================================================================
// Configuration Types
// ============================================================================

/// How many arrived requests are admitted per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdmissionMode {
    /// Every request whose arrival tick has been reached
    #[default]
    AllDue,

    /// At most one request per tick; same-tick arrivals trickle in on
    /// consecutive ticks but keep their original arrival time
    OnePerTick,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling policy
    pub policy: PolicyKind,

    /// Track the head starts on
    pub origin_track: i64,

    /// Sweep direction at tick 0
    pub initial_direction: Direction,

    /// Admission discipline
    pub admission: AdmissionMode,

    /// Record a `QueueScan` event before every dispatch
    pub record_queue_views: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Fcfs,
            origin_track: 0,
            initial_direction: Direction::Forward,
            admission: AdmissionMode::AllDue,
            record_queue_views: false,
        }
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Requests admitted this tick
    pub admitted: Vec<usize>,

    /// Requests dispatched this tick
    pub dispatched: Vec<usize>,

    /// Requests completed this tick
    pub completed: Vec<usize>,

    /// Whether the head crossed a track this tick
    pub moved: bool,

    /// Head track after this tick
    pub head_track: i64,

    /// Whether this tick ended the run
    pub finished: bool,
}

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Request {id} arrives at tick {arrival}, before the preceding request's tick {previous}")]
    UnsortedArrivals {
        id: usize,
        arrival: usize,
        previous: usize,
    },

    #[error("Request at position {position} has id {id}")]
    InvalidRequestId { position: usize, id: usize },

    #[error("Request {id} was already dispatched before the run started")]
    AlreadyDispatched { id: usize },

    #[error("Request {id} targets track {track}, outside {min}..={max}")]
    TrackOutOfRange {
        id: usize,
        track: i64,
        min: i64,
        max: i64,
    },

    #[error("Origin track {track} is outside {min}..={max}")]
    OriginOutOfRange { track: i64, min: i64, max: i64 },

    #[error("Policy had pending requests at tick {tick} but selected none")]
    NoSelection { tick: usize },

    #[error(transparent)]
    Request(#[from] RequestError),
}

// ============================================================================
// Simulator
// ============================================================================

/// Tick-driven disk head simulator
pub struct Simulator {
    config: SimulationConfig,
    state: SimulationState,
    scheduler: Scheduler,
    event_log: EventLog,
    finished: bool,
}

impl Simulator {
    /// Create a simulator over `requests`
    ///
    /// # Errors
    ///
    /// * `UnsortedArrivals` - arrival ticks are not ascending
    /// * `InvalidRequestId` - ids are not `0, 1, 2, ...` in order
    /// * `AlreadyDispatched` - a request already carries a start tick
    /// * `TrackOutOfRange` / `OriginOutOfRange` - a track outside `TRACK_RANGE`
    pub fn new(config: SimulationConfig, requests: Vec<Request>) -> Result<Self, SimulationError> {
        if !TRACK_RANGE.contains(&config.origin_track) {
            return Err(SimulationError::OriginOutOfRange {
                track: config.origin_track,
                min: *TRACK_RANGE.start(),
                max: *TRACK_RANGE.end(),
            });
        }
        Self::validate_requests(&requests)?;

        let head = HeadState::new(config.origin_track, config.initial_direction);
        let scheduler = config.policy.build();
        debug!(
            policy = %config.policy,
            requests = requests.len(),
            origin = config.origin_track,
            "simulator initialized"
        );

        Ok(Self {
            state: SimulationState::new(requests, head),
            scheduler,
            event_log: EventLog::new(),
            finished: false,
            config,
        })
    }

    /// Create a simulator from `(arrival_time, target_track)` pairs,
    /// numbering requests in input order
    pub fn from_pairs(
        config: SimulationConfig,
        pairs: &[(usize, i64)],
    ) -> Result<Self, SimulationError> {
        let requests = pairs
            .iter()
            .enumerate()
            .map(|(id, &(arrival, track))| Request::new(id, arrival, track))
            .collect();
        Self::new(config, requests)
    }

    fn validate_requests(requests: &[Request]) -> Result<(), SimulationError> {
        let mut previous = 0;
        for (position, request) in requests.iter().enumerate() {
            if request.id() != position {
                return Err(SimulationError::InvalidRequestId {
                    position,
                    id: request.id(),
                });
            }
            if !TRACK_RANGE.contains(&request.target_track()) {
                return Err(SimulationError::TrackOutOfRange {
                    id: request.id(),
                    track: request.target_track(),
                    min: *TRACK_RANGE.start(),
                    max: *TRACK_RANGE.end(),
                });
            }
            if request.is_started() {
                return Err(SimulationError::AlreadyDispatched { id: request.id() });
            }
            if request.arrival_time() < previous {
                return Err(SimulationError::UnsortedArrivals {
                    id: request.id(),
                    arrival: request.arrival_time(),
                    previous,
                });
            }
            previous = request.arrival_time();
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_tick(&self) -> usize {
        self.state.current_tick()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn log_event(&mut self, event: Event) {
        self.event_log.log(event);
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// Once the run has finished, further calls change nothing and report
    /// `finished`.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let tick = self.state.current_tick();
        let mut result = TickResult {
            tick,
            ..Default::default()
        };

        if !self.finished {
            self.admit(tick, &mut result);
            self.service(tick, &mut result)?;

            if self.state.is_idle() && !self.scheduler.has_pending() && self.state.all_admitted() {
                self.finished = true;
                debug!(
                    total_ticks = tick,
                    movement = self.state.total_movement,
                    "simulation finished"
                );
            } else {
                self.state.clock.advance_tick();
            }
        }

        result.finished = self.finished;
        result.head_track = self.state.head.current_track();
        Ok(result)
    }

    /// Step 1: hand arrived requests to the policy
    fn admit(&mut self, tick: usize, result: &mut TickResult) {
        while self
            .state
            .backlog
            .front()
            .is_some_and(|r| r.arrival_time() <= tick)
        {
            if let Some(request) = self.state.backlog.pop_front() {
                self.log_event(Event::Add {
                    tick,
                    request_id: request.id(),
                    track: request.target_track(),
                });
                result.admitted.push(request.id());
                self.scheduler.add(request);
            }
            if self.config.admission == AdmissionMode::OnePerTick {
                break;
            }
        }
    }

    /// Step 2: complete, move or dispatch until the tick is consumed or idle
    fn service(&mut self, tick: usize, result: &mut TickResult) -> Result<(), SimulationError> {
        loop {
            match self.state.in_service.take() {
                Some(request) if request.target_track() == self.state.head.current_track() => {
                    self.complete(tick, request, result)?;
                }
                Some(request) => {
                    if self.state.head.step_toward(request.target_track()) {
                        self.state.total_movement += 1;
                        result.moved = true;
                    }
                    self.state.in_service = Some(request);
                    return Ok(());
                }
                None => {
                    if !self.scheduler.has_pending() {
                        return Ok(());
                    }
                    self.dispatch(tick, result)?;
                }
            }
        }
    }

    fn complete(
        &mut self,
        tick: usize,
        mut request: Request,
        result: &mut TickResult,
    ) -> Result<(), SimulationError> {
        request.mark_completed(tick)?;
        self.state.busy_ticks += request.service_time().unwrap_or_default();
        let turnaround = request.turnaround_time().unwrap_or_default();
        trace!(tick, id = request.id(), turnaround, "finish");

        self.log_event(Event::Finish {
            tick,
            request_id: request.id(),
            turnaround,
        });
        result.completed.push(request.id());
        self.state.completed.push(request);
        Ok(())
    }

    fn dispatch(&mut self, tick: usize, result: &mut TickResult) -> Result<(), SimulationError> {
        let head = self.state.head;
        let view = self
            .config
            .record_queue_views
            .then(|| self.scheduler.queue_view(&head));

        let Some(mut request) = self.scheduler.next(&head) else {
            return Err(SimulationError::NoSelection { tick });
        };
        request.mark_started(tick)?;
        trace!(tick, id = request.id(), track = request.target_track(), head = head.current_track(), "issue");

        if let Some(view) = view {
            self.log_event(Event::QueueScan {
                tick,
                head_track: head.current_track(),
                direction: head.direction(),
                view,
                selected: request.id(),
            });
        }
        self.log_event(Event::Issue {
            tick,
            request_id: request.id(),
            track: request.target_track(),
            head_track: head.current_track(),
        });

        self.state.head.face(request.target_track());
        result.dispatched.push(request.id());
        self.state.in_service = Some(request);
        Ok(())
    }

    /// Run ticks until the termination check passes
    pub fn run_to_completion(&mut self) -> Result<(), SimulationError> {
        while !self.finished {
            self.tick()?;
        }
        Ok(())
    }

    /// Run to completion and return the report
    pub fn run(mut self) -> Result<SimulationReport, SimulationError> {
        self.run_to_completion()?;
        Ok(self.report())
    }

    /// Statistics over the requests completed so far
    ///
    /// `total_ticks` is the current tick, which is the run's elapsed time once
    /// `is_finished()` holds.
    pub fn report(&self) -> SimulationReport {
        SimulationReport::aggregate(
            self.config.policy,
            &self.state.completed,
            self.state.current_tick(),
            self.state.total_movement,
            self.state.busy_ticks,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: PolicyKind) -> SimulationConfig {
        SimulationConfig {
            policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_unsorted_arrivals_rejected() {
        let result = Simulator::from_pairs(config(PolicyKind::Fcfs), &[(5, 1), (3, 2)]);
        assert_eq!(
            result.err(),
            Some(SimulationError::UnsortedArrivals {
                id: 1,
                arrival: 3,
                previous: 5
            })
        );
    }

    #[test]
    fn test_out_of_order_ids_rejected() {
        let requests = vec![Request::new(1, 0, 5), Request::new(0, 0, 6)];
        assert!(matches!(
            Simulator::new(config(PolicyKind::Fcfs), requests),
            Err(SimulationError::InvalidRequestId { position: 0, id: 1 })
        ));
    }

    #[test]
    fn test_pre_dispatched_request_rejected() {
        let mut request = Request::new(0, 0, 5);
        request.mark_started(0).unwrap();
        assert!(matches!(
            Simulator::new(config(PolicyKind::Fcfs), vec![request]),
            Err(SimulationError::AlreadyDispatched { id: 0 })
        ));
    }

    #[test]
    fn test_extreme_tracks_rejected_for_every_policy() {
        for kind in PolicyKind::ALL {
            for track in [i64::MIN, i64::MAX, i64::from(i32::MAX) + 1] {
                assert!(
                    matches!(
                        Simulator::from_pairs(config(kind), &[(0, 5), (0, track)]),
                        Err(SimulationError::TrackOutOfRange { id: 1, .. })
                    ),
                    "{} accepted track {}",
                    kind,
                    track
                );
            }
        }
    }

    #[test]
    fn test_origin_out_of_range_rejected() {
        let config = SimulationConfig {
            origin_track: i64::MIN,
            ..Default::default()
        };
        assert!(matches!(
            Simulator::from_pairs(config, &[(0, 5)]),
            Err(SimulationError::OriginOutOfRange { .. })
        ));
    }

    #[test]
    fn test_sweep_across_full_track_range() {
        let low = i64::from(i32::MIN);
        let high = i64::from(i32::MAX);
        for kind in [PolicyKind::Look, PolicyKind::Clook, PolicyKind::Flook] {
            let config = SimulationConfig {
                policy: kind,
                origin_track: high,
                ..Default::default()
            };
            let mut sim = Simulator::from_pairs(config, &[(0, low), (0, low + 2)]).unwrap();

            let first = sim.tick().unwrap();
            assert_eq!(first.dispatched.len(), 1, "{} dispatched nothing", kind);
            assert_eq!(first.head_track, high - 1);
        }

        let config = SimulationConfig {
            policy: PolicyKind::Look,
            origin_track: low,
            initial_direction: Direction::Backward,
            ..Default::default()
        };
        let report = Simulator::from_pairs(config, &[(0, low + 2), (0, low)])
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.requests[1].end_time, 0);
        assert_eq!(report.requests[0].end_time, 2);
        assert_eq!(report.summary.total_movement, 2);
    }

    #[test]
    fn test_empty_input_finishes_at_tick_zero() {
        let mut sim = Simulator::from_pairs(config(PolicyKind::Look), &[]).unwrap();
        let result = sim.tick().unwrap();
        assert!(result.finished);
        assert_eq!(sim.report().summary.total_ticks, 0);
    }

    #[test]
    fn test_request_at_head_completes_in_dispatch_tick() {
        let mut sim = Simulator::from_pairs(config(PolicyKind::Fcfs), &[(3, 0)]).unwrap();
        sim.run_to_completion().unwrap();

        let report = sim.report();
        assert_eq!(report.requests[0].start_time, 3);
        assert_eq!(report.requests[0].end_time, 3);
        assert_eq!(report.summary.total_ticks, 3);
        assert_eq!(report.summary.total_movement, 0);
    }

    #[test]
    fn test_completion_and_redispatch_share_a_tick() {
        let mut sim = Simulator::from_pairs(config(PolicyKind::Fcfs), &[(0, 2), (0, 4)]).unwrap();
        let mut ticks = Vec::new();
        while !sim.is_finished() {
            ticks.push(sim.tick().unwrap());
        }

        let handoff = ticks.iter().find(|t| t.completed == vec![0]).unwrap();
        assert_eq!(handoff.tick, 2);
        assert_eq!(handoff.dispatched, vec![1]);
        assert!(handoff.moved);
    }

    #[test]
    fn test_tick_after_finish_is_noop() {
        let mut sim = Simulator::from_pairs(config(PolicyKind::Sstf), &[(0, 1)]).unwrap();
        sim.run_to_completion().unwrap();
        let events = sim.event_log().len();
        let tick = sim.current_tick();

        let result = sim.tick().unwrap();
        assert!(result.finished);
        assert_eq!(sim.current_tick(), tick);
        assert_eq!(sim.event_log().len(), events);
    }

    #[test]
    fn test_origin_and_direction_are_configurable() {
        let config = SimulationConfig {
            policy: PolicyKind::Look,
            origin_track: 50,
            initial_direction: Direction::Backward,
            ..Default::default()
        };
        let mut sim = Simulator::from_pairs(config, &[(0, 60), (0, 45)]).unwrap();
        sim.run_to_completion().unwrap();

        // sweeping backward from 50 reaches 45 first, then reverses to 60
        assert_eq!(sim.event_log().dispatch_order(), vec![1, 0]);
        assert_eq!(sim.report().summary.total_movement, 5 + 15);
    }

    #[test]
    fn test_queue_views_recorded_when_enabled() {
        let config = SimulationConfig {
            policy: PolicyKind::Sstf,
            record_queue_views: true,
            ..Default::default()
        };
        let mut sim = Simulator::from_pairs(config, &[(0, 9), (0, 3)]).unwrap();
        sim.run_to_completion().unwrap();

        let scans = sim.event_log().events_of_type("QueueScan");
        assert_eq!(scans.len(), 2);
        match scans[0] {
            Event::QueueScan { view, selected, .. } => {
                assert_eq!(view.len(), 2);
                assert_eq!(*selected, 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
