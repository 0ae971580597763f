//! Error types.
//!
//! Verification pass/fail is not an error: it is reported through
//! [`crate::verification::VerificationReport::passed`].

use std::path::PathBuf;

use thiserror::Error;

use crate::session::{Event, Phase};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("event {event:?} is not valid in phase {phase:?}")]
    InvalidTransition { phase: Phase, event: Event },

    #[error("no trial is active")]
    NoActiveTrial,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: history is empty")]
    Empty,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("verification needs at least one trial")]
    NoTrials,
}
