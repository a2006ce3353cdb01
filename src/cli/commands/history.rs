//! History command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{HistoryCommands, OutputFormat};
use crate::error::FitError;
use crate::features::history::{HistoryReport, ReportPeriod, SessionStore};
use crate::output::{format_records, format_report, to_json};
use crate::storage::Database;

/// Execute history subcommands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or queried, or the
/// period name is unknown.
pub fn history(ctx: &Context, cmd: HistoryCommands) -> Result<String, FitError> {
    let store = SessionStore::with_database(Database::open_with(&ctx.paths)?);

    match cmd {
        HistoryCommands::List { limit } => format_records(&store.recent(limit)?, ctx.format),

        HistoryCommands::Report { period } => {
            let period = ReportPeriod::parse(&period).ok_or_else(|| {
                FitError::Parse(format!(
                    "Unknown period '{period}'. Expected today, week, month or all."
                ))
            })?;
            let report = HistoryReport::generate(&store, period)?;
            format_report(&report, ctx.format)
        }

        HistoryCommands::Delete { id } => {
            if !store.delete(id)? {
                return Err(FitError::NotFound(format!("Session {id}")));
            }
            match ctx.format {
                OutputFormat::Pretty => Ok(format!("{} session {id}", "Deleted".green())),
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": id })),
            }
        }

        HistoryCommands::Clear { force } => {
            if !force {
                return Ok(format!(
                    "This deletes every recorded session. Run {} to confirm.",
                    "fitclock history clear --force".bold()
                ));
            }
            let count = store.clear()?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!("{} {count} session(s)", "Deleted".green())),
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": count })),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths};
    use crate::features::timer::{SessionOutcome, SessionSummary};
    use chrono::Utc;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context::new(
            Paths::with_root(dir.path().to_path_buf()),
            Config::default(),
            OutputFormat::Json,
        )
    }

    fn record(ctx: &Context) -> i64 {
        let store = SessionStore::with_database(Database::open_with(&ctx.paths).unwrap());
        store
            .insert(&SessionSummary {
                name: "Core Crusher".to_string(),
                duration_minutes: 12,
                actual_work_seconds: 480,
                calories_burned: 61,
                exercises_count: 4,
                sets_count: 12,
                completed_at: Utc::now(),
                outcome: SessionOutcome::Completed,
            })
            .unwrap()
    }

    #[test]
    fn test_list_json() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        record(&ctx);

        let out = history(&ctx, HistoryCommands::List { limit: 10 }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["name"], "Core Crusher");
    }

    #[test]
    fn test_report_unknown_period() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let result = history(
            &ctx,
            HistoryCommands::Report {
                period: "fortnight".to_string(),
            },
        );
        assert!(matches!(result, Err(FitError::Parse(_))));
    }

    #[test]
    fn test_delete_and_clear() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let id = record(&ctx);
        record(&ctx);

        history(&ctx, HistoryCommands::Delete { id }).unwrap();
        assert!(matches!(
            history(&ctx, HistoryCommands::Delete { id }),
            Err(FitError::NotFound(_))
        ));

        let out = history(&ctx, HistoryCommands::Clear { force: false }).unwrap();
        assert!(out.contains("--force"));

        let out = history(&ctx, HistoryCommands::Clear { force: true }).unwrap();
        assert!(out.contains("\"deleted\": 1"));
    }
}
