//! Plan command implementation.
//!
//! Positions on the command line are 1-based.

use colored::Colorize;

use super::Context;
use crate::cli::args::{EntryArgs, OutputFormat, PlanCommands};
use crate::core::parse_duration;
use crate::error::FitError;
use crate::features::catalog::Catalog;
use crate::features::library::{
    add_exercise, estimate, move_exercise, remove_exercise, update_exercise, ExerciseUpdate,
    Library, LibraryEntry, PlanSource,
};
use crate::features::timer::{PlannedExercise, WorkoutPlan};
use crate::output::{format_estimate, format_plan, format_plans};

/// Execute plan subcommands.
///
/// # Errors
///
/// Returns an error if the plan or exercise is unknown, an edit is invalid,
/// or the workouts directory cannot be written.
pub fn plan(ctx: &Context, cmd: PlanCommands) -> Result<String, FitError> {
    let library = Library::new(&ctx.paths);

    match cmd {
        PlanCommands::List => format_plans(&library.list()?, ctx.format),
        PlanCommands::Show { name } => show(ctx, &library, &name),
        PlanCommands::Estimate { name, weight } => {
            let entry = library.find(&name)?;
            let catalog = Catalog::load(&ctx.paths)?;
            let estimate = estimate(&entry.plan, &catalog, ctx.weight_kg(weight)?);
            format_estimate(&estimate, ctx.format)
        }
        PlanCommands::New { name, description } => {
            let plan = library.create(&name, description.as_deref())?;
            saved(ctx, plan, "Created")
        }
        PlanCommands::Add {
            plan,
            exercise,
            entry,
        } => {
            let mut workout = library.find_custom(&plan)?;
            let catalog = Catalog::load(&ctx.paths)?;
            add_exercise(&mut workout, &catalog, new_entry(ctx, &exercise, &entry)?)?;
            library.save(&workout)?;
            saved(ctx, workout, "Updated")
        }
        PlanCommands::Remove { plan, position } => {
            let mut workout = library.find_custom(&plan)?;
            let removed = remove_exercise(&mut workout, index(position)?)?;
            library.save(&workout)?;
            tracing::info!(plan = %workout.name, exercise = %removed.exercise_id, "exercise removed");
            saved(ctx, workout, "Updated")
        }
        PlanCommands::Move { plan, from, to } => {
            let mut workout = library.find_custom(&plan)?;
            move_exercise(&mut workout, index(from)?, index(to)?)?;
            library.save(&workout)?;
            saved(ctx, workout, "Updated")
        }
        PlanCommands::Update {
            plan,
            position,
            entry,
        } => {
            let update = parse_update(&entry)?;
            if update.is_empty() {
                return Err(FitError::Parse(
                    "Nothing to change. Pass --sets, --work or --rest.".to_string(),
                ));
            }
            let mut workout = library.find_custom(&plan)?;
            update_exercise(&mut workout, index(position)?, update)?;
            library.save(&workout)?;
            saved(ctx, workout, "Updated")
        }
        PlanCommands::Delete { name } => {
            library.delete(&name)?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!("{} workout '{name}'", "Deleted".green())),
                OutputFormat::Json => {
                    crate::output::to_json(&serde_json::json!({ "deleted": name }))
                }
            }
        }
    }
}

fn show(ctx: &Context, library: &Library, name: &str) -> Result<String, FitError> {
    let entry = library.find(name)?;
    let catalog = Catalog::load(&ctx.paths)?;
    let estimate = estimate(&entry.plan, &catalog, ctx.weight_kg(None)?);
    format_plan(&entry, &estimate, &catalog, ctx.format)
}

/// Report a saved custom plan the same way `plan show` would.
fn saved(ctx: &Context, plan: WorkoutPlan, verb: &str) -> Result<String, FitError> {
    let catalog = Catalog::load(&ctx.paths)?;
    let estimate = estimate(&plan, &catalog, ctx.weight_kg(None)?);
    let entry = LibraryEntry {
        source: PlanSource::Custom,
        plan,
    };
    let body = format_plan(&entry, &estimate, &catalog, ctx.format)?;
    match ctx.format {
        OutputFormat::Pretty => Ok(format!("{} '{}'\n\n{body}", verb.green(), entry.plan.name)),
        OutputFormat::Json => Ok(body),
    }
}

/// 1-based position to index.
fn index(position: usize) -> Result<usize, FitError> {
    position
        .checked_sub(1)
        .ok_or_else(|| FitError::Parse("Positions start at 1".to_string()))
}

fn seconds(value: &str) -> Result<u32, FitError> {
    let duration = parse_duration(value)
        .ok_or_else(|| FitError::Parse(format!("Invalid length '{value}' (try 45, 45s or 1m)")))?;
    u32::try_from(duration.num_seconds())
        .map_err(|_| FitError::Parse(format!("Length '{value}' is out of range")))
}

fn parse_update(args: &EntryArgs) -> Result<ExerciseUpdate, FitError> {
    Ok(ExerciseUpdate {
        sets: args.sets,
        work_seconds: args.work.as_deref().map(seconds).transpose()?,
        rest_seconds: args.rest.as_deref().map(seconds).transpose()?,
    })
}

fn new_entry(ctx: &Context, exercise: &str, args: &EntryArgs) -> Result<PlannedExercise, FitError> {
    let defaults = &ctx.config.timer;
    let update = parse_update(args)?;
    Ok(PlannedExercise::new(
        exercise,
        update.sets.unwrap_or(defaults.default_sets),
        update.work_seconds.unwrap_or(defaults.default_work_seconds),
        update.rest_seconds.unwrap_or(defaults.default_rest_seconds),
    ))
}
