//! MET-based calorie estimation.
//!
//! kcal per second = MET x body weight (kg) / 3600.

use crate::core::ExerciseCatalog;

use super::plan::WorkoutPlan;

/// Calories burned per second of work.
#[must_use]
pub fn per_second(met: f64, weight_kg: f64) -> f64 {
    met * weight_kg / 3600.0
}

/// Estimated calories for a full plan at the given weight.
///
/// Exercises missing from the catalog contribute nothing, matching how the
/// engine treats them at run time.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_plan(plan: &WorkoutPlan, catalog: &dyn ExerciseCatalog, weight_kg: f64) -> f64 {
    plan.exercises
        .iter()
        .map(|entry| {
            let met = catalog.lookup(&entry.exercise_id).map_or(0.0, |e| e.met);
            let seconds = u64::from(entry.sets) * u64::from(entry.work_seconds);
            per_second(met, weight_kg) * seconds as f64
        })
        .sum()
}

/// Round accumulated calories for a session record.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_calories(total: f64) -> i64 {
    total.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::Catalog;
    use crate::features::timer::plan::PlannedExercise;

    #[test]
    fn test_per_second() {
        assert!((per_second(5.0, 70.0) - 350.0 / 3600.0).abs() < 1e-12);
        assert!(per_second(0.0, 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_plan() {
        let catalog = Catalog::builtin();
        let plan = WorkoutPlan::new("Legs")
            .with_exercise(PlannedExercise::new("squats", 2, 36, 10))
            .with_exercise(PlannedExercise::new("not-a-thing", 5, 60, 0));

        // squats MET 5.0: 72 s x 5 x 100 / 3600 = 10 kcal
        let estimate = estimate_plan(&plan, &catalog, 100.0);
        assert!((estimate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_calories() {
        assert_eq!(round_calories(1.167), 1);
        assert_eq!(round_calories(2.5), 3);
        assert_eq!(round_calories(0.0), 0);
    }
}
