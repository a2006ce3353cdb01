//! Built-in exercise table.
//!
//! MET values follow the adult compendium of physical activities, rounded to
//! one decimal.

use once_cell::sync::Lazy;

use super::exercise::{Category, ExerciseInfo};

const BUILTIN: &[(&str, &str, Category, f64, &str)] = &[
    ("jumping-jacks", "Jumping Jacks", Category::Cardio, 8.0, "Arms overhead on every jump"),
    ("high-knees", "High Knees", Category::Cardio, 8.0, "Drive knees to hip height"),
    ("mountain-climbers", "Mountain Climbers", Category::Cardio, 8.0, "Hips level, quick feet"),
    ("jump-rope", "Jump Rope", Category::Cardio, 11.8, "Small hops, wrists turn the rope"),
    ("running-in-place", "Running in Place", Category::Cardio, 7.0, "Stay on the balls of the feet"),
    ("butt-kicks", "Butt Kicks", Category::Cardio, 7.0, "Heels to glutes"),
    ("burpees", "Burpees", Category::Plyometric, 8.0, "Chest to floor, jump at the top"),
    ("jump-squats", "Jump Squats", Category::Plyometric, 8.0, "Land soft, sink straight into the next rep"),
    ("skater-jumps", "Skater Jumps", Category::Plyometric, 7.5, "Bound side to side"),
    ("tuck-jumps", "Tuck Jumps", Category::Plyometric, 8.0, "Knees to chest"),
    ("push-ups", "Push-Ups", Category::Strength, 3.8, "Body in one line"),
    ("squats", "Squats", Category::Strength, 5.0, "Hips below knees if mobility allows"),
    ("lunges", "Lunges", Category::Strength, 4.0, "Alternate legs each rep"),
    ("tricep-dips", "Tricep Dips", Category::Strength, 3.8, "Elbows track straight back"),
    ("pull-ups", "Pull-Ups", Category::Strength, 8.0, "Full hang to chin over bar"),
    ("glute-bridges", "Glute Bridges", Category::Strength, 3.5, "Squeeze at the top"),
    ("wall-sit", "Wall Sit", Category::Strength, 3.0, "Thighs parallel to the floor"),
    ("kettlebell-swings", "Kettlebell Swings", Category::Strength, 9.8, "Hinge, snap the hips"),
    ("plank", "Plank", Category::Core, 3.0, "Brace, do not let the hips sag"),
    ("side-plank", "Side Plank", Category::Core, 3.0, "Stack the feet, lift the hips"),
    ("crunches", "Crunches", Category::Core, 3.8, "Ribs toward hips"),
    ("bicycle-crunches", "Bicycle Crunches", Category::Core, 4.0, "Elbow to opposite knee"),
    ("russian-twists", "Russian Twists", Category::Core, 3.8, "Rotate from the ribs"),
    ("leg-raises", "Leg Raises", Category::Core, 3.8, "Lower back stays down"),
    ("stretching", "Stretching", Category::Flexibility, 2.3, "Slow breathing, no bouncing"),
    ("yoga-flow", "Yoga Flow", Category::Flexibility, 2.5, "Move with the breath"),
];

/// The built-in exercises, in table order.
pub static BUILTIN_EXERCISES: Lazy<Vec<ExerciseInfo>> = Lazy::new(|| {
    BUILTIN
        .iter()
        .map(|(id, name, category, met, note)| {
            ExerciseInfo::new(id, name, *category, *met).with_description(note)
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_unique() {
        let ids: HashSet<_> = BUILTIN_EXERCISES.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), BUILTIN_EXERCISES.len());
    }

    #[test]
    fn test_builtin_met_values_positive() {
        assert!(BUILTIN_EXERCISES.iter().all(|e| e.met > 0.0));
    }

    #[test]
    fn test_builtin_ids_are_slugs() {
        for e in BUILTIN_EXERCISES.iter() {
            assert_eq!(crate::core::slugify(&e.id), e.id);
        }
    }
}
