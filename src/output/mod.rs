//! Output formatting for fitclock.
//!
//! Every listing comes in a colored human form and a JSON form for scripting.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::ProfileConfig;
use crate::error::FitError;
use crate::features::catalog::{Catalog, ExerciseInfo};
use crate::features::history::{HistoryReport, WorkoutRecord};
use crate::features::library::{LibraryEntry, PlanEstimate};
use crate::features::timer::{MinimizedWorkout, SessionSummary};

pub use json::*;
pub use pretty::*;

/// Format exercises based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_exercises(
    exercises: &[&ExerciseInfo],
    catalog: &Catalog,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(exercises, catalog)),
        OutputFormat::Json => format_list_json(exercises),
    }
}

/// Format one exercise based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_exercise(
    exercise: &ExerciseInfo,
    weight_kg: f64,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercise_pretty(exercise, weight_kg)),
        OutputFormat::Json => to_json(exercise),
    }
}

/// Format library entries based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_plans(entries: &[LibraryEntry], format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_plans_pretty(entries)),
        OutputFormat::Json => format_list_json(entries),
    }
}

/// Format one plan with its estimate based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_plan(
    entry: &LibraryEntry,
    estimate: &PlanEstimate,
    catalog: &Catalog,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(entry, estimate, catalog)),
        OutputFormat::Json => format_plan_json(entry, estimate),
    }
}

/// Format a plan estimate based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_estimate(estimate: &PlanEstimate, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_estimate_pretty(estimate)),
        OutputFormat::Json => to_json(estimate),
    }
}

/// Format stored sessions based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_records(records: &[WorkoutRecord], format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_records_pretty(records)),
        OutputFormat::Json => format_list_json(records),
    }
}

/// Format a session summary based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &SessionSummary, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format a history report based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_report(report: &HistoryReport, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(report.format()),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the minimized workout status based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_status(
    minimized: Option<&MinimizedWorkout>,
    catalog: &Catalog,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(minimized, catalog)),
        OutputFormat::Json => format_status_json(minimized),
    }
}

/// Format the user profile based on output format.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_profile(profile: &ProfileConfig, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_profile_pretty(profile)),
        OutputFormat::Json => to_json(profile),
    }
}
