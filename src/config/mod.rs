//! Configuration management for fitclock.
//!
//! This module handles loading and saving configuration from `~/.fitclock/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    validate_weight, ColorSetting, Config, GeneralConfig, ProfileConfig, TimerConfig,
    MAX_WEIGHT_KG,
};
