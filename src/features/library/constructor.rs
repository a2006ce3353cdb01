//! Editing operations for workout plans.
//!
//! Indices are zero-based here; the CLI translates from the one-based
//! positions it shows the user.

use serde::Serialize;

use crate::core::ExerciseCatalog;
use crate::error::FitError;
use crate::features::timer::{calories, PlannedExercise, WorkoutPlan};

/// Partial update of a plan entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExerciseUpdate {
    pub sets: Option<u32>,
    pub work_seconds: Option<u32>,
    pub rest_seconds: Option<u32>,
}

impl ExerciseUpdate {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sets.is_none() && self.work_seconds.is_none() && self.rest_seconds.is_none()
    }
}

fn check_index(plan: &WorkoutPlan, index: usize) -> Result<(), FitError> {
    if index < plan.exercises.len() {
        Ok(())
    } else {
        Err(FitError::InvalidPlan(format!(
            "position {} is outside a plan of {} exercises",
            index + 1,
            plan.exercises.len()
        )))
    }
}

/// Append an exercise after checking it exists in the catalog.
///
/// # Errors
///
/// Returns `NotFound` for an unknown exercise and `InvalidPlan` for zero sets.
pub fn add_exercise(
    plan: &mut WorkoutPlan,
    catalog: &dyn ExerciseCatalog,
    entry: PlannedExercise,
) -> Result<(), FitError> {
    if catalog.lookup(&entry.exercise_id).is_none() {
        return Err(FitError::NotFound(format!("Exercise '{}'", entry.exercise_id)));
    }
    if entry.sets == 0 {
        return Err(FitError::InvalidPlan("an exercise needs at least one set".to_string()));
    }
    plan.exercises.push(entry);
    Ok(())
}

/// Remove and return the exercise at `index`.
///
/// # Errors
///
/// Returns `InvalidPlan` if the index is out of range.
pub fn remove_exercise(plan: &mut WorkoutPlan, index: usize) -> Result<PlannedExercise, FitError> {
    check_index(plan, index)?;
    Ok(plan.exercises.remove(index))
}

/// Move the exercise at `from` so it ends up at `to`.
///
/// # Errors
///
/// Returns `InvalidPlan` if either index is out of range.
pub fn move_exercise(plan: &mut WorkoutPlan, from: usize, to: usize) -> Result<(), FitError> {
    check_index(plan, from)?;
    check_index(plan, to)?;
    let entry = plan.exercises.remove(from);
    plan.exercises.insert(to, entry);
    Ok(())
}

/// Apply a partial update to the exercise at `index`.
///
/// # Errors
///
/// Returns `InvalidPlan` if the index is out of range or sets would be zero.
pub fn update_exercise(
    plan: &mut WorkoutPlan,
    index: usize,
    update: ExerciseUpdate,
) -> Result<(), FitError> {
    check_index(plan, index)?;
    if update.sets == Some(0) {
        return Err(FitError::InvalidPlan("an exercise needs at least one set".to_string()));
    }

    if let Some(entry) = plan.exercises.get_mut(index) {
        if let Some(sets) = update.sets {
            entry.sets = sets;
        }
        if let Some(work) = update.work_seconds {
            entry.work_seconds = work;
        }
        if let Some(rest) = update.rest_seconds {
            entry.rest_seconds = rest;
        }
    }
    Ok(())
}

/// Time and calorie estimate for a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEstimate {
    pub name: String,
    pub exercises: usize,
    pub total_sets: u32,
    pub work_seconds: u64,
    pub rest_seconds: u64,
    pub total_seconds: u64,
    pub calories: f64,
    pub weight_kg: f64,
    /// Exercise ids the catalog does not know (they count zero calories)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_exercises: Vec<String>,
}

/// Estimate duration and calories for a full run of `plan`.
#[must_use]
pub fn estimate(plan: &WorkoutPlan, catalog: &dyn ExerciseCatalog, weight_kg: f64) -> PlanEstimate {
    let work_seconds = plan.total_work_seconds();
    let rest_seconds = plan.total_rest_seconds();
    let mut unknown_exercises: Vec<String> = plan
        .exercises
        .iter()
        .filter(|e| catalog.lookup(&e.exercise_id).is_none())
        .map(|e| e.exercise_id.clone())
        .collect();
    unknown_exercises.dedup();

    PlanEstimate {
        name: plan.name.clone(),
        exercises: plan.exercises.len(),
        total_sets: plan.total_sets(),
        work_seconds,
        rest_seconds,
        total_seconds: work_seconds + rest_seconds,
        calories: calories::estimate_plan(plan, catalog, weight_kg),
        weight_kg,
        unknown_exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::Catalog;

    fn plan() -> WorkoutPlan {
        WorkoutPlan::new("Edit")
            .with_exercise(PlannedExercise::new("squats", 3, 40, 20))
            .with_exercise(PlannedExercise::new("plank", 2, 30, 10))
            .with_exercise(PlannedExercise::new("burpees", 1, 20, 0))
    }

    fn ids(plan: &WorkoutPlan) -> Vec<&str> {
        plan.exercises.iter().map(|e| e.exercise_id.as_str()).collect()
    }

    #[test]
    fn test_add_checks_catalog() {
        let catalog = Catalog::builtin();
        let mut plan = plan();

        add_exercise(&mut plan, &catalog, PlannedExercise::new("lunges", 2, 30, 15)).unwrap();
        assert_eq!(plan.exercises.len(), 4);

        let err = add_exercise(&mut plan, &catalog, PlannedExercise::new("unicycle", 1, 30, 0));
        assert!(matches!(err, Err(FitError::NotFound(_))));

        let err = add_exercise(&mut plan, &catalog, PlannedExercise::new("lunges", 0, 30, 0));
        assert!(matches!(err, Err(FitError::InvalidPlan(_))));
    }

    #[test]
    fn test_remove() {
        let mut plan = plan();
        let removed = remove_exercise(&mut plan, 1).unwrap();
        assert_eq!(removed.exercise_id, "plank");
        assert_eq!(ids(&plan), vec!["squats", "burpees"]);
        assert!(remove_exercise(&mut plan, 5).is_err());
    }

    #[test]
    fn test_move_both_directions() {
        let mut plan = plan();
        move_exercise(&mut plan, 0, 2).unwrap();
        assert_eq!(ids(&plan), vec!["plank", "burpees", "squats"]);

        move_exercise(&mut plan, 2, 0).unwrap();
        assert_eq!(ids(&plan), vec!["squats", "plank", "burpees"]);

        assert!(move_exercise(&mut plan, 0, 3).is_err());
    }

    #[test]
    fn test_update_partial() {
        let mut plan = plan();
        update_exercise(
            &mut plan,
            0,
            ExerciseUpdate {
                work_seconds: Some(50),
                ..ExerciseUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(plan.exercises[0], PlannedExercise::new("squats", 3, 50, 20));

        let zero = ExerciseUpdate {
            sets: Some(0),
            ..ExerciseUpdate::default()
        };
        assert!(update_exercise(&mut plan, 0, zero).is_err());
    }

    #[test]
    fn test_estimate() {
        let catalog = Catalog::builtin();
        let plan = WorkoutPlan::new("One")
            .with_exercise(PlannedExercise::new("squats", 2, 3, 2))
            .with_exercise(PlannedExercise::new("mystery", 1, 10, 0));

        let est = estimate(&plan, &catalog, 70.0);
        assert_eq!(est.total_sets, 3);
        assert_eq!(est.work_seconds, 16);
        assert_eq!(est.rest_seconds, 4);
        assert_eq!(est.total_seconds, 20);
        assert!((est.calories - 6.0 * 5.0 * 70.0 / 3600.0).abs() < 1e-9);
        assert_eq!(est.unknown_exercises, vec!["mystery".to_string()]);
    }
}
