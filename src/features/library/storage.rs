//! Custom workout storage.
//!
//! Workouts are stored as individual YAML files in `~/.fitclock/workouts/`,
//! named by the slug of the workout name.

use std::path::PathBuf;

use crate::core::slugify;
use crate::error::FitError;
use crate::features::timer::WorkoutPlan;

/// Manages custom workout files.
pub struct WorkoutStorage {
    workouts_dir: PathBuf,
}

impl WorkoutStorage {
    /// Storage rooted at the given directory.
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { workouts_dir: dir }
    }

    fn plan_path(&self, name: &str) -> Result<PathBuf, FitError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(FitError::Parse(format!(
                "'{name}' is not a usable workout name"
            )));
        }
        Ok(self.workouts_dir.join(format!("{slug}.yaml")))
    }

    /// Save a workout, replacing any file with the same slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unusable or the file cannot be written.
    pub fn save(&self, plan: &WorkoutPlan) -> Result<(), FitError> {
        let path = self.plan_path(&plan.name)?;
        std::fs::create_dir_all(&self.workouts_dir)?;
        let content = serde_yaml::to_string(plan)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "workout saved");
        Ok(())
    }

    /// Load a workout by name or slug.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no file exists, or a parse error.
    pub fn load(&self, name: &str) -> Result<WorkoutPlan, FitError> {
        let path = self.plan_path(name)?;
        if !path.exists() {
            return Err(FitError::NotFound(format!("Workout '{name}'")));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Delete a workout by name or slug.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no file exists.
    pub fn delete(&self, name: &str) -> Result<(), FitError> {
        let path = self.plan_path(name)?;
        if !path.exists() {
            return Err(FitError::NotFound(format!("Workout '{name}'")));
        }
        std::fs::remove_file(&path)?;
        Ok(())
    }

    /// Whether a workout with this name or slug exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.plan_path(name).is_ok_and(|p| p.exists())
    }

    /// All custom workouts sorted by name. Unreadable files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<WorkoutPlan>, FitError> {
        if !self.workouts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut plans = Vec::new();
        for entry in std::fs::read_dir(&self.workouts_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let content = std::fs::read_to_string(&path)?;
                match serde_yaml::from_str::<WorkoutPlan>(&content) {
                    Ok(plan) => plans.push(plan),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping unreadable workout");
                    }
                }
            }
        }

        plans.sort_by_key(|p| p.name.to_lowercase());
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::timer::PlannedExercise;
    use tempfile::TempDir;

    fn storage() -> (TempDir, WorkoutStorage) {
        let dir = TempDir::new().unwrap();
        let storage = WorkoutStorage::with_dir(dir.path().join("workouts"));
        (dir, storage)
    }

    #[test]
    fn test_save_and_load_by_slug() {
        let (_dir, storage) = storage();
        let plan = WorkoutPlan::new("Leg Day").with_exercise(PlannedExercise::new("squats", 3, 40, 20));

        storage.save(&plan).unwrap();
        assert!(storage.exists("leg-day"));
        assert_eq!(storage.load("LEG DAY").unwrap(), plan);
    }

    #[test]
    fn test_load_missing() {
        let (_dir, storage) = storage();
        assert!(matches!(storage.load("nope"), Err(FitError::NotFound(_))));
        assert!(matches!(storage.delete("nope"), Err(FitError::NotFound(_))));
    }

    #[test]
    fn test_unusable_name() {
        let (_dir, storage) = storage();
        assert!(matches!(
            storage.save(&WorkoutPlan::new("???")),
            Err(FitError::Parse(_))
        ));
    }

    #[test]
    fn test_list_sorted_and_skips_garbage() {
        let (dir, storage) = storage();
        storage.save(&WorkoutPlan::new("zeta")).unwrap();
        storage.save(&WorkoutPlan::new("Alpha")).unwrap();
        std::fs::write(dir.path().join("workouts/broken.yaml"), "exercises: [[[").unwrap();

        let names: Vec<_> = storage.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alpha", "zeta"]);
    }

    #[test]
    fn test_delete() {
        let (_dir, storage) = storage();
        storage.save(&WorkoutPlan::new("Gone")).unwrap();
        storage.delete("gone").unwrap();
        assert!(!storage.exists("Gone"));
    }
}
