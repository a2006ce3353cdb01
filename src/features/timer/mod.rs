//! Interval workout timer.
//!
//! A [`WorkoutPlan`] is a list of exercises, each run for a number of sets of
//! work and rest. The [`WorkoutTimerEngine`] walks the plan one tick at a
//! time, accumulates calories from the exercise's MET value and the user's
//! weight, and hands a [`SessionSummary`] to its sink when the session ends.

pub mod calories;
mod engine;
mod plan;
mod resume;
mod runner;
mod scheduler;
mod snapshot;
mod summary;

pub use engine::{EngineState, WorkoutTimerEngine};
pub use plan::{PlannedExercise, WorkoutPlan};
pub use resume::MinimizedWorkout;
pub use runner::{describe, run_plain, status_line, RunOptions, RunOutcome};
pub use scheduler::{Metronome, TICK_INTERVAL};
pub use snapshot::{Phase, TimerSnapshot, Transition};
pub use summary::{duration_minutes, MemorySink, SessionOutcome, SessionSummary};
