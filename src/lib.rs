//! fitclock - an interval workout timer for the terminal
//!
//! This crate provides the workout timer engine (phase sequencing, MET-based
//! calorie accrual, minimize and restore), the exercise catalog, the workout
//! library and constructor, session history, and the command-line interface
//! built on top of them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FitError;
pub use features::timer::{EngineState, WorkoutTimerEngine};
