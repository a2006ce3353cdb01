//! Workout plans.
//!
//! A plan is the immutable input to a timer session: an ordered list of
//! exercises, each with its own sets, work and rest lengths.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// One exercise entry in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Number of sets (at least one)
    pub sets: u32,
    /// Work phase length in seconds
    pub work_seconds: u32,
    /// Rest phase length in seconds (0 = no rest)
    #[serde(default)]
    pub rest_seconds: u32,
}

impl PlannedExercise {
    /// Create a plan entry.
    #[must_use]
    pub fn new(exercise_id: &str, sets: u32, work_seconds: u32, rest_seconds: u32) -> Self {
        Self {
            exercise_id: exercise_id.to_string(),
            sets,
            work_seconds,
            rest_seconds,
        }
    }
}

/// An ordered workout plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exercises in the order they are performed
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

impl WorkoutPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            exercises: Vec::new(),
        }
    }

    /// Builder-style: append an exercise.
    #[must_use]
    pub fn with_exercise(mut self, exercise: PlannedExercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Builder-style: set the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Check that the plan can be run by the timer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` if there are no exercises or an entry has zero sets.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.exercises.is_empty() {
            return Err(FitError::InvalidPlan(format!(
                "'{}' has no exercises",
                self.name
            )));
        }

        if let Some((index, entry)) = self
            .exercises
            .iter()
            .enumerate()
            .find(|(_, e)| e.sets == 0)
        {
            return Err(FitError::InvalidPlan(format!(
                "exercise #{} ({}) has zero sets",
                index + 1,
                entry.exercise_id
            )));
        }

        Ok(())
    }

    /// Index of the last exercise, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.exercises.len().checked_sub(1)
    }

    /// Total number of sets across all exercises.
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises
            .iter()
            .fold(0, |total: u32, e| total.saturating_add(e.sets))
    }

    /// Total seconds spent in work phases.
    #[must_use]
    pub fn total_work_seconds(&self) -> u64 {
        self.exercises
            .iter()
            .map(|e| u64::from(e.sets) * u64::from(e.work_seconds))
            .sum()
    }

    /// Total seconds spent in rest phases.
    ///
    /// Every set is followed by its rest except the final set of the final
    /// exercise, where the session completes instead.
    #[must_use]
    pub fn total_rest_seconds(&self) -> u64 {
        let all: u64 = self
            .exercises
            .iter()
            .map(|e| u64::from(e.sets) * u64::from(e.rest_seconds))
            .sum();
        let trailing = self
            .exercises
            .last()
            .map_or(0, |e| u64::from(e.rest_seconds));
        all.saturating_sub(trailing)
    }

    /// Planned session length when nothing is skipped or paused.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn estimated_duration(&self) -> Duration {
        Duration::seconds((self.total_work_seconds() + self.total_rest_seconds()) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> WorkoutPlan {
        WorkoutPlan::new("Sample")
            .with_exercise(PlannedExercise::new("squats", 3, 40, 20))
            .with_exercise(PlannedExercise::new("plank", 2, 30, 15))
    }

    #[test]
    fn test_validate_empty_plan() {
        let plan = WorkoutPlan::new("Empty");
        assert!(matches!(plan.validate(), Err(FitError::InvalidPlan(_))));
    }

    #[test]
    fn test_validate_zero_sets() {
        let plan = WorkoutPlan::new("Broken").with_exercise(PlannedExercise::new("squats", 0, 30, 0));
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("zero sets"));
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_plan().validate().is_ok());
    }

    #[test]
    fn test_totals() {
        let plan = sample_plan();
        assert_eq!(plan.total_sets(), 5);
        assert_eq!(plan.total_work_seconds(), 3 * 40 + 2 * 30);
        // 3 rests after squats, 1 rest between the two plank sets
        assert_eq!(plan.total_rest_seconds(), 3 * 20 + 15);
        assert_eq!(plan.estimated_duration(), Duration::seconds(180 + 75));
        assert_eq!(plan.last_index(), Some(1));
    }

    #[test]
    fn test_total_sets_saturates() {
        let plan = WorkoutPlan::new("Huge")
            .with_exercise(PlannedExercise::new("squats", u32::MAX, 1, 0))
            .with_exercise(PlannedExercise::new("plank", 2, 1, 0));
        assert_eq!(plan.total_sets(), u32::MAX);
    }

    #[test]
    fn test_yaml_defaults_rest() {
        let yaml = r#"
name: Quick
exercises:
  - exercise_id: burpees
    sets: 2
    work_seconds: 20
"#;
        let plan: WorkoutPlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.exercises[0].rest_seconds, 0);
        assert!(plan.description.is_none());
    }
}
