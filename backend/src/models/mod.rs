//! Domain models for the disk scheduling simulator

pub mod event;
pub mod head;
pub mod request;
pub mod state;

// Re-exports
pub use event::{Event, EventLog};
pub use head::{Direction, HeadState, TRACK_RANGE};
pub use request::{Request, RequestError};
pub use state::SimulationState;
