//! Storage layer for fitclock.
//!
//! This module provides SQLite-based persistence for:
//! - Workout session history
//! - Small pieces of app state (the minimized workout)

mod database;
mod migrations;
mod state;

pub use database::Database;
pub use state::AppState;
