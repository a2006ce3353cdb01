//! Database migrations for fitclock.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened.

use rusqlite::Connection;

use crate::error::FitError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, FitError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FitError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), FitError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FitError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FitError> {
    let current = get_version(conn)?;
    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "running database migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), FitError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(FitError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: session history and key/value app state.
fn migrate_v1(conn: &Connection) -> Result<(), FitError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS workout_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            actual_work_seconds INTEGER NOT NULL DEFAULT 0,
            calories_burned INTEGER NOT NULL DEFAULT 0,
            exercises_count INTEGER NOT NULL DEFAULT 0,
            sets_count INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT NOT NULL,
            outcome TEXT NOT NULL DEFAULT 'completed'
        );

        CREATE INDEX IF NOT EXISTS idx_workout_sessions_completed
        ON workout_sessions(completed_at);

        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| FitError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO workout_sessions (name, duration_minutes, completed_at)
             VALUES ('HIIT', 20, '2024-01-01T10:00:00+00:00')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO app_state (key, value, updated_at) VALUES ('a', '{}', '2024-01-01')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
