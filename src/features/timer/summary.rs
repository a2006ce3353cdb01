//! Session summaries.
//!
//! A summary is emitted at most once per session, either when the final set
//! finishes or when the session is stopped with recording requested.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::SessionSink;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    /// Every set of every exercise was finished
    Completed,
    /// The session was ended early
    Stopped,
}

impl SessionOutcome {
    /// Storage/display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }

    /// Parse from the storage string. Unknown values count as stopped.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("completed") {
            Self::Completed
        } else {
            Self::Stopped
        }
    }
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a finished workout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Plan name
    pub name: String,
    /// Wall-clock minutes, rounded, at least 1
    pub duration_minutes: i64,
    /// Seconds actually spent in work phases
    pub actual_work_seconds: u64,
    /// Calories, rounded once from the unrounded total
    pub calories_burned: i64,
    /// Exercises in the plan (completed) or reached (stopped)
    pub exercises_count: u32,
    /// Sets fully finished
    pub sets_count: u32,
    /// When the summary was emitted
    pub completed_at: DateTime<Utc>,
    /// How the session ended
    pub outcome: SessionOutcome,
}

/// Whole minutes between two instants, rounded to nearest and clamped to 1.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn duration_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> i64 {
    let seconds = ended_at.signed_duration_since(started_at).num_seconds().max(0);
    ((seconds as f64 / 60.0).round() as i64).max(1)
}

/// In-memory sink. Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<SessionSummary>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<SessionSummary> {
        self.records.borrow().clone()
    }

    /// Number of recorded summaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl SessionSink for MemorySink {
    fn record(&mut self, summary: &SessionSummary) {
        self.records.borrow_mut().push(summary.clone());
    }
}
