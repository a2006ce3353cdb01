//! Persisted minimized workouts.
//!
//! Minimizing hands the snapshot to external storage. The plan and weight are
//! stored alongside it so `workout resume` can restore without the original
//! plan file still being around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::storage::{AppState, Database};

use super::plan::WorkoutPlan;
use super::snapshot::TimerSnapshot;

const STATE_KEY: &str = "active_workout";

/// A minimized session waiting to be resumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizedWorkout {
    /// The plan being run, copied so later library edits do not affect it.
    pub plan: WorkoutPlan,
    /// Body weight the session was started with.
    pub weight_kg: f64,
    /// Timer state at the moment of minimizing.
    pub snapshot: TimerSnapshot,
    /// When the workout was minimized.
    pub minimized_at: DateTime<Utc>,
}

impl MinimizedWorkout {
    /// Bundle a minimized snapshot with what is needed to resume it.
    #[must_use]
    pub const fn new(
        plan: WorkoutPlan,
        weight_kg: f64,
        snapshot: TimerSnapshot,
        minimized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            plan,
            weight_kg,
            snapshot,
            minimized_at,
        }
    }

    /// Store as the single minimized workout, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, db: &Database) -> Result<(), FitError> {
        AppState::new(db).set(STATE_KEY, self)?;
        tracing::info!(plan = %self.plan.name, "minimized workout saved");
        Ok(())
    }

    /// Load the minimized workout, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored value is corrupt.
    pub fn load(db: &Database) -> Result<Option<Self>, FitError> {
        AppState::new(db).get(STATE_KEY)
    }

    /// Forget the minimized workout. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(db: &Database) -> Result<bool, FitError> {
        AppState::new(db).remove(STATE_KEY)
    }
}
