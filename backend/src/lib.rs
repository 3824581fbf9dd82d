//! Disk I/O Scheduling Simulator - Rust Engine
//!
//! Discrete-time simulation of a single disk head servicing a request stream
//! under a pluggable seek-ordering policy, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (Request, HeadState, SimulationState, Event)
//! - **policy**: Seek-ordering policies (FCFS, SSTF, LOOK, CLOOK, FLOOK)
//! - **orchestrator**: Main simulation loop
//! - **stats**: Summary metrics over completed requests
//! - **arrivals**: Synthetic request streams
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. One track per tick; dispatch and completion cost zero ticks
//! 2. Every request has exactly one owner and completes exactly once
//! 3. Same input + same policy → identical results

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod stats;

// Re-exports for convenience
pub use arrivals::{WorkloadConfig, WorkloadGenerator};
pub use crate::core::time::SimClock;
pub use models::{
    event::{Event, EventLog},
    head::{Direction, HeadState},
    request::{Request, RequestError},
    state::SimulationState,
};
pub use orchestrator::{AdmissionMode, SimulationConfig, SimulationError, Simulator, TickResult};
pub use policy::{PolicyKind, PolicyParseError, Scheduler};
pub use rng::RngManager;
pub use stats::{RequestRecord, SimulationReport, Summary};
