//! Key/value app state stored as JSON.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FitError;

use super::Database;

/// Typed access to the `app_state` table.
pub struct AppState<'a> {
    db: &'a Database,
}

impl<'a> AppState<'a> {
    /// Wrap an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read and deserialize a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored JSON does not parse.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, FitError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row("SELECT value FROM app_state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        raw.map(|json| serde_json::from_str(&json).map_err(FitError::from))
            .transpose()
    }

    /// Serialize and store a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), FitError> {
        let json = serde_json::to_string(value)?;
        self.db.connection().execute(
            r"INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete a value. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove(&self, key: &str) -> Result<bool, FitError> {
        let affected = self
            .db
            .connection()
            .execute("DELETE FROM app_state WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}
