//! Orchestrator - main simulation loop
//!
//! See `engine.rs` for the tick loop.

pub mod engine;

// Re-export main types for convenience
pub use engine::{AdmissionMode, SimulationConfig, SimulationError, Simulator, TickResult};
