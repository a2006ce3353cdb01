//! Core abstractions for fitclock.
//!
//! This module provides the collaborator traits the timer engine is wired to
//! and small formatting utilities shared by the CLI and the terminal UI.

mod clock;
pub mod format;
mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_duration, format_mmss, parse_duration, render_progress_bar, slugify};
pub use traits::{ExerciseCatalog, SessionSink};

#[cfg(test)]
pub use traits::{MockExerciseCatalog, MockSessionSink};
