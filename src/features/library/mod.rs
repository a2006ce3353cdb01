//! Workout library: presets plus the user's own plans.
//!
//! Presets are read-only. Custom plans live as YAML files and may be edited
//! with the operations in [`constructor`].

pub mod constructor;
mod presets;
mod storage;

use serde::Serialize;

pub use constructor::{
    add_exercise, estimate, move_exercise, remove_exercise, update_exercise, ExerciseUpdate,
    PlanEstimate,
};
pub use presets::PRESETS;
pub use storage::WorkoutStorage;

use crate::config::Paths;
use crate::core::slugify;
use crate::error::FitError;
use crate::features::timer::WorkoutPlan;

/// Where a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Preset,
    Custom,
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset => write!(f, "preset"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A plan together with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    pub source: PlanSource,
    #[serde(flatten)]
    pub plan: WorkoutPlan,
}

/// Presets and custom workouts behind one lookup.
pub struct Library {
    storage: WorkoutStorage,
}

impl Library {
    /// Library backed by the user's workouts directory.
    #[must_use]
    pub fn new(paths: &Paths) -> Self {
        Self::with_storage(WorkoutStorage::with_dir(paths.workouts.clone()))
    }

    #[must_use]
    pub const fn with_storage(storage: WorkoutStorage) -> Self {
        Self { storage }
    }

    fn preset(name: &str) -> Option<&'static WorkoutPlan> {
        let slug = slugify(name);
        PRESETS.iter().find(|p| slugify(&p.name) == slug)
    }

    /// Whether `name` refers to a preset.
    #[must_use]
    pub fn is_preset(name: &str) -> bool {
        Self::preset(name).is_some()
    }

    /// Every plan, presets first.
    ///
    /// # Errors
    ///
    /// Returns an error if the workouts directory cannot be read.
    pub fn list(&self) -> Result<Vec<LibraryEntry>, FitError> {
        let presets = PRESETS.iter().map(|plan| LibraryEntry {
            source: PlanSource::Preset,
            plan: plan.clone(),
        });
        let custom = self.storage.list()?.into_iter().map(|plan| LibraryEntry {
            source: PlanSource::Custom,
            plan,
        });
        Ok(presets.chain(custom).collect())
    }

    /// Resolve a plan by name or slug, presets first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if neither a preset nor a custom plan matches.
    pub fn find(&self, name: &str) -> Result<LibraryEntry, FitError> {
        if let Some(plan) = Self::preset(name) {
            return Ok(LibraryEntry {
                source: PlanSource::Preset,
                plan: plan.clone(),
            });
        }
        self.storage.load(name).map(|plan| LibraryEntry {
            source: PlanSource::Custom,
            plan,
        })
    }

    /// Load a custom plan for editing.
    ///
    /// # Errors
    ///
    /// Returns `Config` for a preset and `NotFound` for an unknown name.
    pub fn find_custom(&self, name: &str) -> Result<WorkoutPlan, FitError> {
        if Self::is_preset(name) {
            return Err(FitError::Config(format!(
                "'{name}' is a preset and cannot be changed"
            )));
        }
        self.storage.load(name)
    }

    /// Create a new, initially empty custom plan.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the name collides with a preset or an existing
    /// custom plan.
    pub fn create(&self, name: &str, description: Option<&str>) -> Result<WorkoutPlan, FitError> {
        let name = name.trim();
        if Self::is_preset(name) {
            return Err(FitError::Config(format!("'{name}' is the name of a preset")));
        }
        if self.storage.exists(name) {
            return Err(FitError::Config(format!("Workout '{name}' already exists")));
        }

        let mut plan = WorkoutPlan::new(name);
        plan.description = description.map(str::to_string);
        self.storage.save(&plan)?;
        tracing::info!(name = %plan.name, "workout created");
        Ok(plan)
    }

    /// Persist changes to a custom plan.
    ///
    /// # Errors
    ///
    /// Returns `Config` for a preset name or a write error.
    pub fn save(&self, plan: &WorkoutPlan) -> Result<(), FitError> {
        if Self::is_preset(&plan.name) {
            return Err(FitError::Config(format!(
                "'{}' is a preset and cannot be changed",
                plan.name
            )));
        }
        self.storage.save(plan)
    }

    /// Delete a custom plan.
    ///
    /// # Errors
    ///
    /// Returns `Config` for a preset and `NotFound` for an unknown name.
    pub fn delete(&self, name: &str) -> Result<(), FitError> {
        if Self::is_preset(name) {
            return Err(FitError::Config(format!("'{name}' is a preset and cannot be deleted")));
        }
        self.storage.delete(name)?;
        tracing::info!(name, "workout deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::Catalog;
    use crate::features::timer::PlannedExercise;
    use tempfile::TempDir;

    fn library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::new(&Paths::with_root(dir.path().to_path_buf()));
        (dir, library)
    }

    #[test]
    fn test_find_preset_by_slug() {
        let (_dir, library) = library();
        let entry = library.find("hiit-blast").unwrap();
        assert_eq!(entry.source, PlanSource::Preset);
        assert_eq!(entry.plan.name, "HIIT Blast");
    }

    #[test]
    fn test_create_edit_find() {
        let (_dir, library) = library();
        let mut plan = library.create("Leg Day", Some("quads")).unwrap();
        add_exercise(&mut plan, &Catalog::builtin(), PlannedExercise::new("squats", 3, 40, 20)).unwrap();
        library.save(&plan).unwrap();

        let entry = library.find("leg day").unwrap();
        assert_eq!(entry.source, PlanSource::Custom);
        assert_eq!(entry.plan.exercises.len(), 1);
        assert_eq!(entry.plan.description.as_deref(), Some("quads"));
    }

    #[test]
    fn test_create_rejects_collisions() {
        let (_dir, library) = library();
        assert!(matches!(library.create("Beginner", None), Err(FitError::Config(_))));

        library.create("Mine", None).unwrap();
        assert!(matches!(library.create("mine", None), Err(FitError::Config(_))));
    }

    #[test]
    fn test_presets_are_read_only() {
        let (_dir, library) = library();
        assert!(library.delete("Core Crusher").is_err());
        assert!(library.find_custom("Core Crusher").is_err());
        assert!(library.save(&WorkoutPlan::new("Cardio Burn")).is_err());
    }

    #[test]
    fn test_list_presets_first() {
        let (_dir, library) = library();
        library.create("Aardvark", None).unwrap();
        let list = library.list().unwrap();
        assert_eq!(list.len(), PRESETS.len() + 1);
        assert_eq!(list[0].source, PlanSource::Preset);
        assert_eq!(list.last().map(|e| e.source), Some(PlanSource::Custom));
    }

    #[test]
    fn test_find_unknown() {
        let (_dir, library) = library();
        assert!(matches!(library.find("nothing"), Err(FitError::NotFound(_))));
    }
}
