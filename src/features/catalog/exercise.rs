//! Exercise metadata.

use serde::{Deserialize, Serialize};

/// Broad exercise category, used for browsing and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sustained heart-rate work
    Cardio,
    /// Resistance and bodyweight strength
    Strength,
    /// Abdominal and trunk work
    Core,
    /// Jumping and explosive movements
    Plyometric,
    /// Stretching and mobility
    Flexibility,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Cardio,
        Self::Strength,
        Self::Core,
        Self::Plyometric,
        Self::Flexibility,
    ];

    /// Parse category from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cardio" | "c" => Some(Self::Cardio),
            "strength" | "s" => Some(Self::Strength),
            "core" | "abs" => Some(Self::Core),
            "plyometric" | "plyo" | "p" => Some(Self::Plyometric),
            "flexibility" | "mobility" | "stretch" | "f" => Some(Self::Flexibility),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Cardio => "Cardio",
            Self::Strength => "Strength",
            Self::Core => "Core",
            Self::Plyometric => "Plyometric",
            Self::Flexibility => "Flexibility",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Catalog entry for a single exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInfo {
    /// Stable id referenced by workout plans (e.g. "push-ups")
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: Category,
    /// Metabolic equivalent of task
    pub met: f64,
    /// Optional coaching note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExerciseInfo {
    /// Create a catalog entry.
    #[must_use]
    pub fn new(id: &str, name: &str, category: Category, met: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            met,
            description: None,
        }
    }

    /// Attach a coaching note.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Calories burned per second of work at the given body weight.
    #[must_use]
    pub fn calories_per_second(&self, weight_kg: f64) -> f64 {
        crate::features::timer::calories::per_second(self.met, weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("cardio"), Some(Category::Cardio));
        assert_eq!(Category::parse("PLYO"), Some(Category::Plyometric));
        assert_eq!(Category::parse("abs"), Some(Category::Core));
        assert_eq!(Category::parse("stretch"), Some(Category::Flexibility));
        assert_eq!(Category::parse("yoga"), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Strength.to_string(), "Strength");
    }

    #[test]
    fn test_calories_per_second() {
        let info = ExerciseInfo::new("squats", "Squats", Category::Strength, 5.0);
        assert!((info.calories_per_second(72.0) - 0.1).abs() < 1e-12);
    }
}
