//! Exercise catalog.
//!
//! Combines the built-in exercise table with user-defined exercises and
//! serves MET lookups to the timer engine.

mod builtin;
mod exercise;
mod storage;

use std::collections::BTreeMap;

pub use builtin::BUILTIN_EXERCISES;
pub use exercise::{Category, ExerciseInfo};
pub use storage::CustomExerciseStorage;

use crate::config::Paths;
use crate::core::{slugify, ExerciseCatalog};
use crate::error::FitError;

/// Highest MET value accepted for a custom exercise.
pub const MAX_MET: f64 = 25.0;

/// The exercise catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: BTreeMap<String, ExerciseInfo>,
    custom_ids: Vec<String>,
}

impl Catalog {
    /// Catalog with only the built-in exercises.
    #[must_use]
    pub fn builtin() -> Self {
        let exercises = BUILTIN_EXERCISES
            .iter()
            .map(|e| (e.id.clone(), e.clone()))
            .collect();
        Self {
            exercises,
            custom_ids: Vec::new(),
        }
    }

    /// Built-ins plus the user's custom exercises.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom exercise file cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, FitError> {
        let storage = CustomExerciseStorage::with_path(paths.exercises_file.clone());
        Ok(Self::builtin().with_custom(storage.load()?))
    }

    /// Overlay custom exercises. Entries that shadow a built-in are skipped.
    #[must_use]
    pub fn with_custom(mut self, custom: Vec<ExerciseInfo>) -> Self {
        for exercise in custom {
            if self.exercises.contains_key(&exercise.id) {
                tracing::warn!(id = %exercise.id, "custom exercise shadows an existing id, skipping");
                continue;
            }
            self.custom_ids.push(exercise.id.clone());
            self.exercises.insert(exercise.id.clone(), exercise);
        }
        self
    }

    /// Get an exercise by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExerciseInfo> {
        self.exercises.get(id)
    }

    /// Whether the id belongs to a user-defined exercise.
    #[must_use]
    pub fn is_custom(&self, id: &str) -> bool {
        self.custom_ids.iter().any(|c| c == id)
    }

    /// All exercises, ordered by category then name.
    #[must_use]
    pub fn list(&self) -> Vec<&ExerciseInfo> {
        let mut all: Vec<_> = self.exercises.values().collect();
        all.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        all
    }

    /// Exercises in one category.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&ExerciseInfo> {
        self.list()
            .into_iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Case-insensitive search on id and name.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&ExerciseInfo> {
        let needle = query.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|e| e.id.contains(&needle) || e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of exercises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl ExerciseCatalog for Catalog {
    fn lookup(&self, exercise_id: &str) -> Option<ExerciseInfo> {
        self.get(exercise_id).cloned()
    }
}

/// Validate and persist a new custom exercise.
///
/// The id is derived from the name when not given.
///
/// # Errors
///
/// Returns an error if the id is empty or taken, the MET value is out of
/// range, or the file cannot be written.
pub fn add_custom_exercise(
    paths: &Paths,
    catalog: &Catalog,
    id: Option<&str>,
    name: &str,
    category: Category,
    met: f64,
    description: Option<String>,
) -> Result<ExerciseInfo, FitError> {
    let id = slugify(id.unwrap_or(name));
    if id.is_empty() {
        return Err(FitError::Parse(format!("Cannot derive an exercise id from '{name}'")));
    }
    if catalog.get(&id).is_some() {
        return Err(FitError::Config(format!("Exercise '{id}' already exists")));
    }
    if !(met.is_finite() && met > 0.0 && met <= MAX_MET) {
        return Err(FitError::Parse(format!(
            "MET must be between 0 and {MAX_MET}, got {met}"
        )));
    }

    let mut info = ExerciseInfo::new(&id, name.trim(), category, met);
    info.description = description;

    let storage = CustomExerciseStorage::with_path(paths.exercises_file.clone());
    let mut custom = storage.load()?;
    custom.push(info.clone());
    storage.save_all(&custom)?;

    tracing::info!(id = %info.id, met = info.met, "custom exercise added");
    Ok(info)
}

/// Remove a custom exercise. Built-in exercises cannot be removed.
///
/// # Errors
///
/// Returns `Config` for a built-in id, `NotFound` for an unknown one, or an
/// error if the file cannot be written.
pub fn remove_custom_exercise(paths: &Paths, catalog: &Catalog, id: &str) -> Result<(), FitError> {
    if catalog.get(id).is_some() && !catalog.is_custom(id) {
        return Err(FitError::Config(format!("'{id}' is built in and cannot be removed")));
    }

    let storage = CustomExerciseStorage::with_path(paths.exercises_file.clone());
    if !storage.remove(id)? {
        return Err(FitError::NotFound(format!("Exercise '{id}'")));
    }

    tracing::info!(id, "custom exercise removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lookup() {
        let catalog = Catalog::builtin();
        let info = catalog.lookup("burpees").unwrap();
        assert_eq!(info.name, "Burpees");
        assert!((info.met - 8.0).abs() < f64::EPSILON);
        assert!(catalog.lookup("unicycling").is_none());
    }

    #[test]
    fn test_list_sorted_by_category() {
        let catalog = Catalog::builtin();
        let list = catalog.list();
        assert_eq!(list.len(), catalog.len());
        assert!(list.windows(2).all(|w| w[0].category <= w[1].category));
    }

    #[test]
    fn test_by_category_and_search() {
        let catalog = Catalog::builtin();
        assert!(catalog
            .by_category(Category::Core)
            .iter()
            .all(|e| e.category == Category::Core));

        let hits: Vec<_> = catalog.search("PLANK").iter().map(|e| e.id.clone()).collect();
        assert_eq!(hits, vec!["plank".to_string(), "side-plank".to_string()]);
    }

    #[test]
    fn test_custom_overlay_skips_shadowing() {
        let catalog = Catalog::builtin().with_custom(vec![
            ExerciseInfo::new("squats", "Fake Squats", Category::Cardio, 20.0),
            ExerciseInfo::new("rowing", "Rowing", Category::Cardio, 7.0),
        ]);

        assert_eq!(catalog.get("squats").unwrap().name, "Squats");
        assert!(catalog.is_custom("rowing"));
        assert!(!catalog.is_custom("squats"));
    }

    #[test]
    fn test_add_custom_exercise() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();

        let catalog = Catalog::load(&paths).unwrap();
        let added =
            add_custom_exercise(&paths, &catalog, None, "Battle Ropes", Category::Cardio, 10.3, None)
                .unwrap();
        assert_eq!(added.id, "battle-ropes");

        let reloaded = Catalog::load(&paths).unwrap();
        assert!(reloaded.is_custom("battle-ropes"));
        assert_eq!(reloaded.len(), catalog.len() + 1);

        let dup = add_custom_exercise(&paths, &reloaded, None, "Battle Ropes", Category::Cardio, 10.3, None);
        assert!(dup.is_err());

        let bad_met = add_custom_exercise(&paths, &reloaded, Some("x"), "X", Category::Core, 0.0, None);
        assert!(matches!(bad_met, Err(FitError::Parse(_))));
    }
}
