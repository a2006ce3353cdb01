//! Collaborator interfaces for the workout timer engine.
//!
//! The engine never reaches for global state: exercise data comes from an
//! [`ExerciseCatalog`] and finished sessions go to a [`SessionSink`].

#[cfg(test)]
use mockall::automock;

use crate::features::catalog::ExerciseInfo;
use crate::features::timer::SessionSummary;

/// Read-only lookup of exercise metadata.
#[cfg_attr(test, automock)]
pub trait ExerciseCatalog {
    /// Look up an exercise by id. `None` on a catalog miss.
    fn lookup(&self, exercise_id: &str) -> Option<ExerciseInfo>;
}

/// Append-only destination for session summaries.
///
/// Recording is fire-and-forget: implementations log their own failures.
#[cfg_attr(test, automock)]
pub trait SessionSink {
    /// Persist a completed or stopped session.
    fn record(&mut self, summary: &SessionSummary);
}
