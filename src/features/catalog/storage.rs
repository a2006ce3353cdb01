//! Custom exercise storage.
//!
//! Custom exercises are stored as a YAML list in `~/.fitclock/exercises.yaml`.

use std::path::PathBuf;

use crate::error::FitError;

use super::exercise::ExerciseInfo;

/// Manages the custom exercise file.
pub struct CustomExerciseStorage {
    path: PathBuf,
}

impl CustomExerciseStorage {
    /// Create storage backed by the given YAML file.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all custom exercises. A missing file means none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<ExerciseInfo>, FitError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            FitError::Config(format!(
                "Failed to parse custom exercises {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    pub fn save_all(&self, exercises: &[ExerciseInfo]) -> Result<(), FitError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(exercises)
            .map_err(|e| FitError::Config(format!("Failed to serialize exercises: {e}")))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove a custom exercise by id. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn remove(&self, id: &str) -> Result<bool, FitError> {
        let mut exercises = self.load()?;
        let before = exercises.len();
        exercises.retain(|e| e.id != id);
        if exercises.len() == before {
            return Ok(false);
        }
        self.save_all(&exercises)?;
        Ok(true)
    }
}
