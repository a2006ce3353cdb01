use chrono::Duration;
use colored::Colorize;

use crate::config::ProfileConfig;
use crate::core::{format_duration, format_mmss, render_progress_bar, ExerciseCatalog};
use crate::features::catalog::{Catalog, Category, ExerciseInfo};
use crate::features::history::WorkoutRecord;
use crate::features::library::{LibraryEntry, PlanEstimate, PlanSource};
use crate::features::timer::{MinimizedWorkout, Phase, SessionOutcome, SessionSummary};

fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}

fn exercise_name(catalog: &Catalog, id: &str) -> String {
    catalog
        .lookup(id)
        .map_or_else(|| format!("{id} (unknown)"), |e| e.name)
}

fn category_label(category: Category) -> String {
    let name = category.display_name();
    match category {
        Category::Cardio => name.red().to_string(),
        Category::Strength => name.blue().to_string(),
        Category::Core => name.yellow().to_string(),
        Category::Plyometric => name.magenta().to_string(),
        Category::Flexibility => name.green().to_string(),
    }
}

/// Format exercises grouped by category.
pub fn format_exercises_pretty(exercises: &[&ExerciseInfo], catalog: &Catalog) -> String {
    if exercises.is_empty() {
        return "Exercises (0)\n  No exercises".to_string();
    }

    let mut output = format!("Exercises ({})\n", exercises.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    let mut current: Option<Category> = None;
    for exercise in exercises {
        if current != Some(exercise.category) {
            current = Some(exercise.category);
            output.push_str(&format!("{}\n", category_label(exercise.category).bold()));
        }

        let mut line = format!(
            "  {:<22} {:<20} {}",
            exercise.id.dimmed(),
            exercise.name,
            format!("MET {:.1}", exercise.met).cyan()
        );
        if catalog.is_custom(&exercise.id) {
            line.push_str(&format!("  {}", "custom".yellow()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format one exercise with its burn rate at the given weight.
pub fn format_exercise_pretty(exercise: &ExerciseInfo, weight_kg: f64) -> String {
    let mut output = format!("{}\n", exercise.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), exercise.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Category".dimmed(),
        category_label(exercise.category)
    ));
    output.push_str(&format!("  {}: {:.1}\n", "MET".dimmed(), exercise.met));
    output.push_str(&format!(
        "  {}: {:.1} kcal/min at {weight_kg} kg\n",
        "Burn".dimmed(),
        exercise.calories_per_second(weight_kg) * 60.0
    ));
    if let Some(description) = &exercise.description {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }
    output
}

/// Format the library listing.
pub fn format_plans_pretty(entries: &[LibraryEntry]) -> String {
    if entries.is_empty() {
        return "Workouts (0)\n  No workouts".to_string();
    }

    let mut output = format!("Workouts ({})\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let source = match entry.source {
            PlanSource::Preset => "preset".dimmed(),
            PlanSource::Custom => "custom".yellow(),
        };
        let plan = &entry.plan;
        let length = seconds(plan.total_work_seconds() + plan.total_rest_seconds());
        output.push_str(&format!(
            "{:<24} {:>2} exercises  {:>3} sets  {:>6}  {}\n",
            plan.name.bold(),
            plan.exercises.len(),
            plan.total_sets(),
            format_mmss(length),
            source
        ));
    }

    output
}

/// Format a plan with its exercises and estimate.
pub fn format_plan_pretty(entry: &LibraryEntry, estimate: &PlanEstimate, catalog: &Catalog) -> String {
    let plan = &entry.plan;
    let mut output = format!("{}  {}\n", plan.name.bold(), entry.source.to_string().dimmed());
    if let Some(description) = &plan.description {
        output.push_str(&format!("  {}\n", description.italic()));
    }
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if plan.exercises.is_empty() {
        output.push_str("  No exercises yet. Add one with `fitclock plan add`.\n");
    }
    for (i, entry) in plan.exercises.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<22} {} x {}s work / {}s rest\n",
            i + 1,
            exercise_name(catalog, &entry.exercise_id),
            entry.sets,
            entry.work_seconds,
            entry.rest_seconds
        ));
    }

    output.push('\n');
    output.push_str(&format_estimate_pretty(estimate));
    output
}

/// Format a plan estimate.
pub fn format_estimate_pretty(estimate: &PlanEstimate) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "  {}: {} ({} work, {} rest)\n",
        "Duration".dimmed(),
        format_mmss(seconds(estimate.total_seconds)),
        format_mmss(seconds(estimate.work_seconds)),
        format_mmss(seconds(estimate.rest_seconds))
    ));
    output.push_str(&format!(
        "  {}: {} across {} exercises\n",
        "Sets".dimmed(),
        estimate.total_sets,
        estimate.exercises
    ));
    output.push_str(&format!(
        "  {}: ~{:.0} kcal at {} kg\n",
        "Calories".dimmed(),
        estimate.calories,
        estimate.weight_kg
    ));
    if !estimate.unknown_exercises.is_empty() {
        output.push_str(&format!(
            "  {}: {} (counted as 0 kcal)\n",
            "Unknown".yellow(),
            estimate.unknown_exercises.join(", ")
        ));
    }
    output
}

fn outcome_label(outcome: SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Completed => "completed".green().to_string(),
        SessionOutcome::Stopped => "stopped".yellow().to_string(),
    }
}

/// Format stored sessions.
pub fn format_records_pretty(records: &[WorkoutRecord]) -> String {
    if records.is_empty() {
        return "Workout History (0)\n  No workouts recorded yet".to_string();
    }

    let mut output = format!("Workout History ({})\n", records.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for record in records {
        let s = &record.summary;
        output.push_str(&format!(
            "{:>4}  {}  {:<20} {:>3} min {:>5} kcal {:>3} sets  {}\n",
            record.id.to_string().dimmed(),
            s.completed_at.format("%Y-%m-%d %H:%M"),
            s.name.bold(),
            s.duration_minutes,
            s.calories_burned,
            s.sets_count,
            outcome_label(s.outcome)
        ));
    }

    output
}

/// Format the summary shown when a workout ends.
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let title = match summary.outcome {
        SessionOutcome::Completed => "Workout complete".green().bold(),
        SessionOutcome::Stopped => "Workout stopped".yellow().bold(),
    };
    let mut output = format!("{title}: {}\n", summary.name.bold());
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        format_duration(Duration::minutes(summary.duration_minutes))
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Work time".dimmed(),
        format_mmss(seconds(summary.actual_work_seconds))
    ));
    output.push_str(&format!("  {}: {} kcal\n", "Calories".dimmed(), summary.calories_burned));
    output.push_str(&format!(
        "  {}: {} sets over {} exercises\n",
        "Volume".dimmed(),
        summary.sets_count,
        summary.exercises_count
    ));
    output
}

/// Format the minimized workout, if any.
pub fn format_status_pretty(minimized: Option<&MinimizedWorkout>, catalog: &Catalog) -> String {
    let Some(m) = minimized else {
        return "No minimized workout".dimmed().to_string();
    };

    let snap = &m.snapshot;
    let mut output = format!("{} {}\n", "Minimized:".yellow().bold(), m.plan.name.bold());
    if let Some(entry) = snap.current_entry(&m.plan) {
        let phase = match snap.phase {
            Phase::Work => "Work".red(),
            Phase::Rest => "Rest".green(),
        };
        output.push_str(&format!(
            "  {}: {} set {}/{}, {} {} left\n",
            "Position".dimmed(),
            exercise_name(catalog, &entry.exercise_id),
            snap.current_set,
            entry.sets,
            phase,
            format_mmss(Duration::seconds(i64::from(snap.seconds_remaining)))
        ));
    }
    output.push_str(&format!(
        "  {}: {} {}/{} sets, {} work, {:.0} kcal\n",
        "Progress".dimmed(),
        render_progress_bar(snap.session_progress(&m.plan), 20),
        snap.sets_completed_count,
        m.plan.total_sets(),
        format_mmss(seconds(snap.actual_work_seconds)),
        snap.total_calories_burned
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Since".dimmed(),
        m.minimized_at.format("%Y-%m-%d %H:%M")
    ));
    output
}

/// Format the user profile.
pub fn format_profile_pretty(profile: &ProfileConfig) -> String {
    let mut output = format!("{}\n", "Profile".bold());
    output.push_str(&format!(
        "  {}: {}\n",
        "Name".dimmed(),
        profile.name.as_deref().unwrap_or("(not set)")
    ));
    output.push_str(&format!("  {}: {} kg\n", "Weight".dimmed(), profile.weight_kg));
    output
}
