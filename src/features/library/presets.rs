//! Preset workouts shipped with fitclock.

use once_cell::sync::Lazy;

use crate::features::timer::{PlannedExercise, WorkoutPlan};

fn preset(name: &str, description: &str, entries: &[(&str, u32, u32, u32)]) -> WorkoutPlan {
    entries.iter().fold(
        WorkoutPlan::new(name).with_description(description),
        |plan, (id, sets, work, rest)| plan.with_exercise(PlannedExercise::new(id, *sets, *work, *rest)),
    )
}

/// All presets, in display order.
pub static PRESETS: Lazy<Vec<WorkoutPlan>> = Lazy::new(|| {
    vec![
        preset(
            "HIIT Blast",
            "Four plyometric and cardio moves, 40 on / 20 off",
            &[
                ("burpees", 4, 40, 20),
                ("mountain-climbers", 4, 40, 20),
                ("jump-squats", 4, 40, 20),
                ("high-knees", 4, 40, 20),
            ],
        ),
        preset(
            "Full Body",
            "Strength circuit hitting every major muscle group",
            &[
                ("jumping-jacks", 2, 45, 15),
                ("push-ups", 3, 45, 15),
                ("squats", 3, 45, 15),
                ("lunges", 3, 45, 15),
                ("glute-bridges", 3, 45, 15),
                ("plank", 3, 45, 15),
            ],
        ),
        preset(
            "Core Crusher",
            "Abs and obliques",
            &[
                ("plank", 3, 45, 15),
                ("crunches", 3, 40, 20),
                ("bicycle-crunches", 3, 40, 20),
                ("russian-twists", 3, 40, 20),
                ("leg-raises", 3, 40, 20),
            ],
        ),
        preset(
            "Cardio Burn",
            "Sustained intervals to keep the heart rate up",
            &[
                ("jumping-jacks", 3, 60, 15),
                ("high-knees", 3, 60, 15),
                ("butt-kicks", 3, 60, 15),
                ("skater-jumps", 3, 60, 15),
                ("running-in-place", 3, 60, 15),
            ],
        ),
        preset(
            "Beginner",
            "Gentle introduction with long rests",
            &[
                ("jumping-jacks", 2, 30, 30),
                ("squats", 2, 30, 30),
                ("glute-bridges", 2, 30, 30),
                ("wall-sit", 2, 20, 40),
                ("stretching", 1, 120, 0),
            ],
        ),
    ]
});
