//! Feature implementations for fitclock.
//!
//! - Exercise catalog with MET values
//! - Workout timer engine and runners
//! - Workout library, presets and constructor
//! - Session history and reports

pub mod catalog;
pub mod history;
pub mod library;
pub mod timer;
