//! Error types for the edges of the crate.
//!
//! The simulation itself never fails; guards inside a tick are no-ops. Only
//! loading a tuning override can go wrong, and callers get a [`TuningError`]
//! describing which document or field was rejected.

use std::fmt;

/// Failure while loading or validating a [`crate::Tuning`] document.
#[derive(Debug)]
pub enum TuningError {
    /// The document could not be read from disk.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// The document is not valid JSON for the tuning schema.
    Parse(serde_json::Error),

    /// A value parsed but violates a gameplay constraint.
    Invalid {
        /// Name of the offending tuning field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io { path, source } => {
                write!(f, "could not read tuning file '{path}': {source}")
            }
            TuningError::Parse(e) => write!(f, "malformed tuning document: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io { source, .. } => Some(source),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
