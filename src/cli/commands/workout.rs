//! Workout command implementation.
//!
//! Runs sessions on the full-screen timer when stdout is a terminal and on
//! the line runner otherwise. A minimized session is parked in the database
//! until `workout resume` or `workout discard`.

use std::io::{self, IsTerminal};
use std::time::Duration;

use chrono::Utc;

use super::Context;
use crate::cli::args::{OutputFormat, RunnerArgs, WorkoutCommands};
use crate::core::SystemClock;
use crate::error::FitError;
use crate::features::catalog::Catalog;
use crate::features::history::SessionStore;
use crate::features::library::Library;
use crate::features::timer::{
    run_plain, MinimizedWorkout, RunOptions, RunOutcome, WorkoutTimerEngine, TICK_INTERVAL,
};
use crate::output::{format_status, format_summary, to_json};
use crate::storage::Database;
use crate::tui;

/// Execute workout subcommands.
///
/// # Errors
///
/// Returns an error if the plan cannot be found or run, or storage fails.
pub fn workout(ctx: &Context, cmd: WorkoutCommands) -> Result<String, FitError> {
    match cmd {
        WorkoutCommands::Run {
            plan,
            weight,
            runner,
        } => run(ctx, &plan, weight, runner),
        WorkoutCommands::Resume { runner } => resume(ctx, runner),
        WorkoutCommands::Status => status(ctx),
        WorkoutCommands::Discard { record } => discard(ctx, record),
    }
}

fn engine(ctx: &Context, catalog: Catalog) -> Result<WorkoutTimerEngine, FitError> {
    let store = SessionStore::with_database(Database::open_with(&ctx.paths)?);
    Ok(WorkoutTimerEngine::new(
        Box::new(catalog),
        Box::new(store),
        Box::new(SystemClock),
    ))
}

fn run(
    ctx: &Context,
    name: &str,
    weight: Option<f64>,
    runner: RunnerArgs,
) -> Result<String, FitError> {
    let state_db = Database::open_with(&ctx.paths)?;
    if let Some(parked) = MinimizedWorkout::load(&state_db)? {
        return Err(FitError::WorkoutMinimized(parked.plan.name));
    }

    let weight_kg = ctx.weight_kg(weight)?;
    let entry = Library::new(&ctx.paths).find(name)?;
    let mut engine = engine(ctx, Catalog::load(&ctx.paths)?)?;
    engine.start(entry.plan, weight_kg)?;

    drive(ctx, &mut engine, runner, &state_db)
}

fn resume(ctx: &Context, runner: RunnerArgs) -> Result<String, FitError> {
    let state_db = Database::open_with(&ctx.paths)?;
    let Some(parked) = MinimizedWorkout::load(&state_db)? else {
        return Err(FitError::NotFound("No minimized workout".to_string()));
    };

    let mut engine = engine(ctx, Catalog::load(&ctx.paths)?)?;
    engine.restore_from(parked.snapshot, parked.plan, parked.weight_kg)?;

    drive(ctx, &mut engine, runner, &state_db)
}

/// Run the engine's session to its end and persist the result.
fn drive(
    ctx: &Context,
    engine: &mut WorkoutTimerEngine,
    runner: RunnerArgs,
    state_db: &Database,
) -> Result<String, FitError> {
    let interval = runner.tick_ms.map_or(TICK_INTERVAL, Duration::from_millis);

    let outcome = if !runner.plain && io::stdout().is_terminal() {
        tui::run_workout(engine, interval)?
    } else {
        let options = RunOptions {
            interval,
            minimize_after: runner.minimize_after,
        };
        // Keep stdout parseable when JSON was asked for
        if ctx.format == OutputFormat::Json {
            run_plain(engine, &options, &mut io::stderr().lock())?
        } else {
            run_plain(engine, &options, &mut io::stdout().lock())?
        }
    };

    match outcome {
        RunOutcome::Minimized(snapshot) => {
            let (Some(plan), Some(weight_kg)) = (engine.plan().cloned(), engine.weight_kg()) else {
                return Err(FitError::InvalidSnapshot(
                    "minimized without a session".to_string(),
                ));
            };
            let parked = MinimizedWorkout::new(plan, weight_kg, snapshot, Utc::now());
            parked.save(state_db)?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!(
                    "Minimized '{}'. Continue with 'fitclock workout resume'.",
                    parked.plan.name
                )),
                OutputFormat::Json => to_json(&parked),
            }
        }
        RunOutcome::Finished(summary) => {
            MinimizedWorkout::clear(state_db)?;
            match summary {
                Some(summary) => format_summary(&summary, ctx.format),
                None => not_recorded(ctx.format),
            }
        }
    }
}

fn not_recorded(format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok("Workout stopped. Nothing was recorded.".to_string()),
        OutputFormat::Json => to_json(&serde_json::json!({ "recorded": false })),
    }
}

fn status(ctx: &Context) -> Result<String, FitError> {
    let state_db = Database::open_with(&ctx.paths)?;
    let parked = MinimizedWorkout::load(&state_db)?;
    let catalog = Catalog::load(&ctx.paths)?;
    format_status(parked.as_ref(), &catalog, ctx.format)
}

fn discard(ctx: &Context, record: bool) -> Result<String, FitError> {
    let state_db = Database::open_with(&ctx.paths)?;
    let Some(parked) = MinimizedWorkout::load(&state_db)? else {
        return Err(FitError::NotFound("No minimized workout".to_string()));
    };

    let summary = if record {
        let mut engine = engine(ctx, Catalog::load(&ctx.paths)?)?;
        engine.restore_from(parked.snapshot, parked.plan, parked.weight_kg)?;
        engine.stop(true)
    } else {
        None
    };
    MinimizedWorkout::clear(&state_db)?;

    match summary {
        Some(summary) => format_summary(&summary, ctx.format),
        None => not_recorded(ctx.format),
    }
}
