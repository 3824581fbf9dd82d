//! Errors surfaced by the `iosched` binary
//!
//! Every variant ends the process with exit status 1 before any simulation
//! output is printed.

use iosched_core_rs::{PolicyParseError, SimulationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Unrecognised flag or missing argument; `reason` is shown on stderr
    #[error("Usage: ./iosched [-v] inputfile")]
    Usage { reason: String },

    #[error(transparent)]
    UnknownPolicy(#[from] PolicyParseError),

    #[error("Not a valid inputfile <{path}>")]
    InputUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input at line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] SimulationError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Whether the message belongs on stdout
    ///
    /// The usage line and the unreadable-input message are part of the
    /// tool's regular output; everything else is a diagnostic.
    pub fn goes_to_stdout(&self) -> bool {
        matches!(
            self,
            CliError::Usage { .. } | CliError::InputUnavailable { .. }
        )
    }
}
