//! Timer snapshot and phase transitions.
//!
//! [`TimerSnapshot`] is the complete mutable state of a running workout. All
//! progression logic lives here as plain methods over `(snapshot, plan)` so
//! that a snapshot taken at any point, together with its plan, resumes
//! exactly where it left off.

use serde::{Deserialize, Serialize};

use crate::error::FitError;

use super::plan::{PlannedExercise, WorkoutPlan};

/// Phase within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Exercise is being performed
    Work,
    /// Recovery between sets
    Rest,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What a tick or skip did to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing happened (session already complete)
    Unchanged,
    /// One second consumed, still inside the same phase
    Counted,
    /// Work ended and a rest phase began
    RestStarted,
    /// The next set of the same exercise began
    SetStarted,
    /// The first set of the next exercise began
    ExerciseStarted,
    /// The final set finished; the session is complete
    Completed,
}

impl Transition {
    /// Whether the phase, set or exercise changed.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        !matches!(self, Self::Unchanged | Self::Counted)
    }
}

/// Full timer state, serializable for minimize/restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Index into the plan's exercises
    pub exercise_index: usize,
    /// 1-based set within the current exercise
    pub current_set: u32,
    /// Current phase
    pub phase: Phase,
    /// Countdown within the current phase
    pub seconds_remaining: u32,
    /// Unrounded calories accumulated over work ticks
    pub total_calories_burned: f64,
    /// Ticks consumed while in the work phase
    pub actual_work_seconds: u64,
    /// Sets fully finished (work plus any rest)
    pub sets_completed_count: u32,
    /// Terminal flag
    pub is_complete: bool,
}

impl TimerSnapshot {
    /// Fresh snapshot at the start of the first work phase.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` if the plan cannot be run.
    pub fn initial(plan: &WorkoutPlan) -> Result<Self, FitError> {
        plan.validate()?;
        let work_seconds = plan.exercises.first().map_or(0, |e| e.work_seconds);

        Ok(Self {
            exercise_index: 0,
            current_set: 1,
            phase: Phase::Work,
            seconds_remaining: work_seconds,
            total_calories_burned: 0.0,
            actual_work_seconds: 0,
            sets_completed_count: 0,
            is_complete: false,
        })
    }

    /// Check that this snapshot lies within the plan's bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` describing the first violated bound.
    pub fn validate(&self, plan: &WorkoutPlan) -> Result<(), FitError> {
        let Some(entry) = plan.exercises.get(self.exercise_index) else {
            return Err(FitError::InvalidSnapshot(format!(
                "exercise index {} is outside a plan of {} exercises",
                self.exercise_index,
                plan.exercises.len()
            )));
        };

        if self.current_set == 0 || self.current_set > entry.sets {
            return Err(FitError::InvalidSnapshot(format!(
                "set {} is outside 1..={} for {}",
                self.current_set, entry.sets, entry.exercise_id
            )));
        }

        let phase_length = match self.phase {
            Phase::Work => entry.work_seconds,
            Phase::Rest => entry.rest_seconds,
        };
        if self.seconds_remaining > phase_length {
            return Err(FitError::InvalidSnapshot(format!(
                "{} seconds remaining exceeds the {}s {} phase",
                self.seconds_remaining,
                phase_length,
                self.phase.display_name().to_lowercase()
            )));
        }

        if !self.total_calories_burned.is_finite() || self.total_calories_burned < 0.0 {
            return Err(FitError::InvalidSnapshot(format!(
                "calorie total {} is not a non-negative number",
                self.total_calories_burned
            )));
        }

        Ok(())
    }

    /// The plan entry currently being performed.
    #[must_use]
    pub fn current_entry<'a>(&self, plan: &'a WorkoutPlan) -> Option<&'a PlannedExercise> {
        plan.exercises.get(self.exercise_index)
    }

    /// The plan entry after the current one.
    #[must_use]
    pub fn next_entry<'a>(&self, plan: &'a WorkoutPlan) -> Option<&'a PlannedExercise> {
        plan.exercises.get(self.exercise_index + 1)
    }

    /// Whether the current set is the last set of the last exercise.
    #[must_use]
    pub fn is_final_set(&self, plan: &WorkoutPlan) -> bool {
        plan.last_index() == Some(self.exercise_index)
            && self
                .current_entry(plan)
                .is_some_and(|e| self.current_set >= e.sets)
    }

    /// Configured length of the current phase.
    #[must_use]
    pub fn phase_length(&self, plan: &WorkoutPlan) -> u32 {
        self.current_entry(plan).map_or(0, |e| match self.phase {
            Phase::Work => e.work_seconds,
            Phase::Rest => e.rest_seconds,
        })
    }

    /// Fraction of the current phase already elapsed (0.0 - 1.0).
    #[must_use]
    pub fn phase_progress(&self, plan: &WorkoutPlan) -> f64 {
        let length = self.phase_length(plan);
        if length == 0 || self.is_complete {
            return 1.0;
        }
        1.0 - f64::from(self.seconds_remaining) / f64::from(length)
    }

    /// Fraction of all sets finished (0.0 - 1.0).
    #[must_use]
    pub fn session_progress(&self, plan: &WorkoutPlan) -> f64 {
        let total = plan.total_sets();
        if total == 0 || self.is_complete {
            return 1.0;
        }
        f64::from(self.sets_completed_count) / f64::from(total)
    }

    /// Advance the clock by one second.
    ///
    /// `calories_per_second` is credited only when the tick starts in a work
    /// phase with time left. A phase that is already at zero (a zero-length
    /// work phase) is closed without crediting anything.
    pub fn tick(&mut self, plan: &WorkoutPlan, calories_per_second: f64) -> Transition {
        if self.is_complete {
            return Transition::Unchanged;
        }

        if self.seconds_remaining == 0 {
            return self.finish_phase(plan);
        }

        if self.phase == Phase::Work {
            self.total_calories_burned += calories_per_second.max(0.0);
            self.actual_work_seconds += 1;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            self.finish_phase(plan)
        } else {
            Transition::Counted
        }
    }

    /// End the current phase immediately, crediting nothing for the remainder.
    pub fn skip(&mut self, plan: &WorkoutPlan) -> Transition {
        if self.is_complete {
            return Transition::Unchanged;
        }
        self.seconds_remaining = 0;
        self.finish_phase(plan)
    }

    /// Phase-boundary transition shared by ticks and skips.
    fn finish_phase(&mut self, plan: &WorkoutPlan) -> Transition {
        match self.phase {
            Phase::Work => {
                let rest_seconds = self.current_entry(plan).map_or(0, |e| e.rest_seconds);
                if rest_seconds > 0 && !self.is_final_set(plan) {
                    self.phase = Phase::Rest;
                    self.seconds_remaining = rest_seconds;
                    Transition::RestStarted
                } else {
                    self.advance(plan)
                }
            }
            Phase::Rest => self.advance(plan),
        }
    }

    /// Move to the next set or exercise, or complete the session.
    fn advance(&mut self, plan: &WorkoutPlan) -> Transition {
        self.sets_completed_count += 1;

        let Some(entry) = self.current_entry(plan) else {
            return self.complete();
        };

        if self.current_set < entry.sets {
            self.current_set += 1;
            self.phase = Phase::Work;
            self.seconds_remaining = entry.work_seconds;
            return Transition::SetStarted;
        }

        if let Some(next) = self.next_entry(plan) {
            let work_seconds = next.work_seconds;
            self.exercise_index += 1;
            self.current_set = 1;
            self.phase = Phase::Work;
            self.seconds_remaining = work_seconds;
            return Transition::ExerciseStarted;
        }

        self.complete()
    }

    fn complete(&mut self) -> Transition {
        self.is_complete = true;
        self.seconds_remaining = 0;
        Transition::Completed
    }
}
