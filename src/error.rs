//! Error types for fitclock.

use thiserror::Error;

/// Errors produced by fitclock.
#[derive(Debug, Error)]
pub enum FitError {
    /// The workout plan cannot be run (no exercises, zero sets, ...).
    #[error("Invalid workout plan: {0}")]
    InvalidPlan(String),

    /// A persisted timer snapshot does not fit the plan it is restored into.
    #[error("Invalid timer snapshot: {0}")]
    InvalidSnapshot(String),

    /// A workout session is already running on this engine.
    #[error("A workout session is already active")]
    SessionActive,

    /// A minimized workout is waiting to be resumed or discarded.
    #[error("'{0}' is minimized. Continue it with 'fitclock workout resume' or drop it with 'fitclock workout discard'.")]
    WorkoutMinimized(String),

    /// A named item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be read, written or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or user-input parse failure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup or rendering failure.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<serde_json::Error> for FitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for FitError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for FitError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FitError::InvalidPlan("plan has no exercises".to_string());
        assert_eq!(err.to_string(), "Invalid workout plan: plan has no exercises");

        let err = FitError::NotFound("Workout 'legs'".to_string());
        assert_eq!(err.to_string(), "Not found: Workout 'legs'");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: FitError = json_err.into();
        assert!(matches!(err, FitError::Parse(_)));
    }
}
