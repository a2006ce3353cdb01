//! Configuration settings for fitclock.
//!
//! Settings are loaded from `~/.fitclock/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::FitError;

/// Heaviest body weight accepted for calorie estimation.
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// User profile (feeds the calorie formula).
    pub profile: ProfileConfig,
    /// Defaults used by the workout constructor and runner.
    pub timer: TimerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log filter used when `FITCLOCK_LOG` is unset (e.g. "info", "fitclock=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// User profile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Body weight in kilograms.
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,
}

/// Timer and constructor defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Sets given to a newly added exercise.
    #[serde(default = "default_sets")]
    pub default_sets: u32,
    /// Work phase length for a newly added exercise.
    #[serde(default = "default_work_seconds")]
    pub default_work_seconds: u32,
    /// Rest phase length for a newly added exercise.
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_weight_kg() -> f64 {
    70.0
}

const fn default_sets() -> u32 {
    3
}

const fn default_work_seconds() -> u32 {
    40
}

const fn default_rest_seconds() -> u32 {
    20
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: None,
            weight_kg: default_weight_kg(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_sets: default_sets(),
            default_work_seconds: default_work_seconds(),
            default_rest_seconds: default_rest_seconds(),
        }
    }
}

impl ProfileConfig {
    /// Set the body weight after range-checking it.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is not in `(0, 500]` kg.
    pub fn set_weight(&mut self, weight_kg: f64) -> Result<(), FitError> {
        validate_weight(weight_kg)?;
        self.weight_kg = weight_kg;
        Ok(())
    }
}

/// Check that a body weight is usable by the calorie formula.
///
/// # Errors
///
/// Returns an error if the weight is not finite or not in `(0, 500]` kg.
pub fn validate_weight(weight_kg: f64) -> Result<(), FitError> {
    if weight_kg.is_finite() && weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG {
        Ok(())
    } else {
        Err(FitError::Config(format!(
            "Weight must be between 0 and {MAX_WEIGHT_KG} kg, got {weight_kg}"
        )))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FitError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FitError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FitError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        validate_weight(config.profile.weight_kg)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FitError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FitError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FitError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "info");
        assert!((config.profile.weight_kg - 70.0).abs() < f64::EPSILON);
        assert!(config.profile.name.is_none());
        assert_eq!(config.timer.default_sets, 3);
        assert_eq!(config.timer.default_work_seconds, 40);
        assert_eq!(config.timer.default_rest_seconds, 20);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.profile.name = Some("Sam".to_string());
        config.profile.set_weight(82.5).unwrap();
        config.timer.default_rest_seconds = 15;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.profile.name.as_deref(), Some("Sam"));
        assert!((loaded.profile.weight_kg - 82.5).abs() < f64::EPSILON);
        assert_eq!(loaded.timer.default_rest_seconds, 15);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
profile:
  weight_kg: 64
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert!((config.profile.weight_kg - 64.0).abs() < f64::EPSILON);
        assert_eq!(config.timer.default_sets, 3);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let mut profile = ProfileConfig::default();
        assert!(profile.set_weight(0.0).is_err());
        assert!(profile.set_weight(-3.0).is_err());
        assert!(profile.set_weight(f64::NAN).is_err());
        assert!(profile.set_weight(501.0).is_err());
        assert!((profile.weight_kg - 70.0).abs() < f64::EPSILON);

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "profile:\n  weight_kg: -1\n").unwrap();
        assert!(Config::load_from_path(&config_path).is_err());
    }
}
