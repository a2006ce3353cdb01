//! Path resolution for fitclock configuration and data files.
//!
//! All fitclock data is stored in `~/.fitclock/` (or `$FITCLOCK_HOME`):
//! - `config.yaml` - Main configuration file
//! - `fitclock.db` - SQLite database for workout history and app state
//! - `exercises.yaml` - Custom exercises added to the catalog
//! - `workouts/` - Custom workouts (YAML files)
//! - `logs/` - Daily rolling log files

use std::path::PathBuf;

use crate::error::FitError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "FITCLOCK_HOME";

/// Paths to fitclock configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.fitclock/`
    pub root: PathBuf,
    /// Config file: `~/.fitclock/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.fitclock/fitclock.db`
    pub database: PathBuf,
    /// Custom exercise file: `~/.fitclock/exercises.yaml`
    pub exercises_file: PathBuf,
    /// Workouts directory: `~/.fitclock/workouts/`
    pub workouts: PathBuf,
    /// Logs directory: `~/.fitclock/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on `$FITCLOCK_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, FitError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            if !root.is_empty() {
                return Ok(Self::with_root(PathBuf::from(root)));
            }
        }

        let home = std::env::var("HOME")
            .map_err(|_| FitError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".fitclock")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("fitclock.db"),
            exercises_file: root.join("exercises.yaml"),
            workouts: root.join("workouts"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FitError> {
        for dir in [&self.root, &self.workouts, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FitError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-fitclock");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("fitclock.db"));
        assert_eq!(paths.exercises_file, root.join("exercises.yaml"));
        assert_eq!(paths.workouts, root.join("workouts"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.workouts.exists());
        assert!(paths.logs.exists());
        assert!(!paths.exercises_file.exists());
    }
}
