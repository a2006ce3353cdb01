//! Workout history: stored session summaries and reports over them.

mod report;
mod storage;

pub use report::{DailyActivity, HistoryReport, ReportPeriod};
pub use storage::{SessionStore, WorkoutRecord};
