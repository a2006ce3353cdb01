//! Workout session history.
//!
//! Persists session summaries to the local database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use crate::core::SessionSink;
use crate::error::FitError;
use crate::features::timer::{SessionOutcome, SessionSummary};
use crate::storage::Database;

const COLUMNS: &str = "id, name, duration_minutes, actual_work_seconds, calories_burned, \
                       exercises_count, sets_count, completed_at, outcome";

/// A stored session summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutRecord {
    pub id: i64,
    #[serde(flatten)]
    pub summary: SessionSummary,
}

/// Storage for workout sessions.
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    /// Store backed by an open database.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a summary and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, summary: &SessionSummary) -> Result<i64, FitError> {
        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO workout_sessions
              (name, duration_minutes, actual_work_seconds, calories_burned,
               exercises_count, sets_count, completed_at, outcome)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                summary.name,
                summary.duration_minutes,
                i64::try_from(summary.actual_work_seconds).unwrap_or(i64::MAX),
                summary.calories_burned,
                summary.exercises_count,
                summary.sets_count,
                timestamp(summary.completed_at),
                summary.outcome.as_str(),
            ],
        )
        .map_err(|e| FitError::Database(format!("Failed to insert session: {e}")))?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a session by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<WorkoutRecord>, FitError> {
        let sql = format!("SELECT {COLUMNS} FROM workout_sessions WHERE id = ?1");
        self.db
            .connection()
            .query_row(&sql, [id], row_to_record)
            .optional()
            .map_err(|e| FitError::Database(format!("Failed to query session: {e}")))
    }

    /// Most recent sessions first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<WorkoutRecord>, FitError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM workout_sessions ORDER BY completed_at DESC, id DESC LIMIT ?1"
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(&sql, params![limit])
    }

    /// Every session, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<Vec<WorkoutRecord>, FitError> {
        let sql = format!("SELECT {COLUMNS} FROM workout_sessions ORDER BY completed_at DESC, id DESC");
        self.query(&sql, params![])
    }

    /// Sessions completed in `[start, end)`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, FitError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM workout_sessions
             WHERE completed_at >= ?1 AND completed_at < ?2
             ORDER BY completed_at DESC, id DESC"
        );
        self.query(&sql, params![timestamp(start), timestamp(end)])
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<WorkoutRecord>, FitError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(sql)
            .map_err(|e| FitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_record)
            .map_err(|e| FitError::Database(format!("Failed to query sessions: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Delete a session. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool, FitError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM workout_sessions WHERE id = ?1", [id])
            .map_err(|e| FitError::Database(format!("Failed to delete session: {e}")))?;
        Ok(rows > 0)
    }

    /// Delete every session, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, FitError> {
        self.db
            .connection()
            .execute("DELETE FROM workout_sessions", [])
            .map_err(|e| FitError::Database(format!("Failed to clear sessions: {e}")))
    }
}

impl SessionSink for SessionStore {
    fn record(&mut self, summary: &SessionSummary) {
        match self.insert(summary) {
            Ok(id) => tracing::debug!(id, "session stored"),
            Err(e) => tracing::error!(error = %e, name = %summary.name, "failed to store session"),
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn row_to_record(row: &Row<'_>) -> Result<WorkoutRecord, rusqlite::Error> {
    let completed_at_str: String = row.get(7)?;
    let completed_at = DateTime::parse_from_rfc3339(&completed_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let work_seconds: i64 = row.get(3)?;
    let outcome: String = row.get(8)?;

    Ok(WorkoutRecord {
        id: row.get(0)?,
        summary: SessionSummary {
            name: row.get(1)?,
            duration_minutes: row.get(2)?,
            actual_work_seconds: u64::try_from(work_seconds).unwrap_or(0),
            calories_burned: row.get(4)?,
            exercises_count: row.get(5)?,
            sets_count: row.get(6)?,
            completed_at,
            outcome: SessionOutcome::parse(&outcome),
        },
    })
}
