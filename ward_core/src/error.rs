//! Error types for the ward_core library.

use crate::{HistoryStack, PatientId};
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ward_core operations
///
/// The first three variants are ordinary, recoverable registry outcomes.
/// None of them leave the registry in a changed state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Discharge requested while both waiting queues are empty
    #[error("No patients to discharge")]
    EmptyRegistry,

    /// Lookup for an identifier that has not been discharged
    #[error("Patient {0} not found")]
    NotFound(PatientId),

    /// Undo or redo requested with nothing on the respective stack
    #[error("Nothing to {0}")]
    HistoryEmpty(HistoryStack),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input parsing error
    #[error("Parse error: {0}")]
    Parse(String),
}
