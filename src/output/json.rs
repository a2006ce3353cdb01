//! JSON output formatting for fitclock.

use serde::Serialize;
use serde_json::json;

use crate::error::FitError;
use crate::features::library::{LibraryEntry, PlanEstimate};
use crate::features::timer::MinimizedWorkout;

/// Format a list as `{ "count": n, "items": [...] }`.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_list_json<T: Serialize>(items: &[T]) -> Result<String, FitError> {
    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a plan together with its estimate.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_plan_json(entry: &LibraryEntry, estimate: &PlanEstimate) -> Result<String, FitError> {
    let output = json!({
        "plan": entry,
        "estimate": estimate
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the minimized workout, or `{ "active": false }`.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_status_json(minimized: Option<&MinimizedWorkout>) -> Result<String, FitError> {
    let output = minimized.map_or_else(
        || json!({ "active": false }),
        |m| {
            json!({
                "active": true,
                "plan": m.plan.name,
                "minimized_at": m.minimized_at,
                "weight_kg": m.weight_kg,
                "snapshot": m.snapshot
            })
        },
    );
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FitError> {
    Ok(serde_json::to_string_pretty(value)?)
}
