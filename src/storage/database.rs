//! `SQLite` database connection.
//!
//! The database is stored at `~/.fitclock/fitclock.db`.

use std::path::Path;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::FitError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database inside the given data root, creating directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_with(paths: &Paths) -> Result<Self, FitError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, FitError> {
        let conn = Connection::open(path).map_err(|e| {
            FitError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "database opened");
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FitError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FitError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, FitError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| FitError::Database(format!("Failed to enable foreign keys: {e}")))?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FitError> {
        migrations::get_version(&self.conn)
    }

    /// Underlying connection, for feature stores.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_with_creates_dirs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        let db = Database::open_with(&paths).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(paths.database.exists());
        assert!(paths.workouts.is_dir());
    }

    #[test]
    fn test_reopen_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute("INSERT INTO app_state (key, value, updated_at) VALUES ('k', '1', 'now')", [])
                .unwrap();
        }

        // Reopen keeps data and does not re-run migrations
        let db = Database::open_at(&db_path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM app_state", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
