//! Workout history reports.
//!
//! Aggregates stored sessions over a period into a dashboard.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::storage::{SessionStore, WorkoutRecord};
use crate::core::format_duration;
use crate::error::FitError;
use crate::features::timer::SessionOutcome;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// Half-open `[start, end)` range ending with the day containing `now`.
    /// `None` for all time.
    #[must_use]
    pub fn date_range(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let days_back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
            Self::AllTime => return None,
        };
        let today = now.date_naive();
        let end = (today + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
        let start = (today - Duration::days(days_back)).and_time(NaiveTime::MIN).and_utc();
        Some((start, end))
    }

    /// Parse a period name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Some(Self::Today),
            "week" | "w" | "7d" => Some(Self::Week),
            "month" | "m" | "30d" => Some(Self::Month),
            "all" | "alltime" | "all-time" => Some(Self::AllTime),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }
}

/// Activity on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub workouts: i64,
    pub minutes: i64,
    pub calories: i64,
}

/// Workout dashboard for a period.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    pub period: String,
    pub completed_workouts: i64,
    pub stopped_workouts: i64,
    pub total_minutes: i64,
    pub total_calories: i64,
    pub total_work_seconds: u64,
    pub total_sets: i64,
    pub avg_duration_minutes: f64,
    /// Session with the most calories
    pub best_session: Option<WorkoutRecord>,
    /// Calories by weekday, Monday first
    pub calories_by_day_of_week: [i64; 7],
    /// Most recent day first
    pub daily: Vec<DailyActivity>,
    /// Consecutive days with a workout, ending today or yesterday
    pub streak_days: i64,
}

impl HistoryReport {
    /// Generate a report for the given period, as of now.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions cannot be read.
    pub fn generate(store: &SessionStore, period: ReportPeriod) -> Result<Self, FitError> {
        Self::generate_at(store, period, Utc::now())
    }

    /// Generate a report for the given period as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions cannot be read.
    pub fn generate_at(
        store: &SessionStore,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Result<Self, FitError> {
        let all = store.all()?;
        let records: Vec<&WorkoutRecord> = match period.date_range(now) {
            Some((start, end)) => all
                .iter()
                .filter(|r| r.summary.completed_at >= start && r.summary.completed_at < end)
                .collect(),
            None => all.iter().collect(),
        };
        Ok(Self::from_records(period, &records, &all, now))
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    fn from_records(
        period: ReportPeriod,
        records: &[&WorkoutRecord],
        all: &[WorkoutRecord],
        now: DateTime<Utc>,
    ) -> Self {
        let completed_workouts = records
            .iter()
            .filter(|r| r.summary.outcome == SessionOutcome::Completed)
            .count() as i64;
        let stopped_workouts = records.len() as i64 - completed_workouts;

        let total_minutes: i64 = records.iter().map(|r| r.summary.duration_minutes).sum();
        let total_calories: i64 = records.iter().map(|r| r.summary.calories_burned).sum();
        let total_work_seconds: u64 = records.iter().map(|r| r.summary.actual_work_seconds).sum();
        let total_sets: i64 = records.iter().map(|r| i64::from(r.summary.sets_count)).sum();

        let avg_duration_minutes = if records.is_empty() {
            0.0
        } else {
            total_minutes as f64 / records.len() as f64
        };

        let best_session = records
            .iter()
            .max_by_key(|r| r.summary.calories_burned)
            .map(|r| (*r).clone());

        let mut calories_by_day_of_week = [0i64; 7];
        let mut daily_map: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();
        for record in records {
            let at = record.summary.completed_at;
            let weekday = at.weekday().num_days_from_monday() as usize;
            calories_by_day_of_week[weekday] += record.summary.calories_burned;

            let date = at.date_naive();
            let day = daily_map.entry(date).or_insert(DailyActivity {
                date,
                workouts: 0,
                minutes: 0,
                calories: 0,
            });
            day.workouts += 1;
            day.minutes += record.summary.duration_minutes;
            day.calories += record.summary.calories_burned;
        }
        let daily: Vec<DailyActivity> = daily_map.into_values().rev().collect();

        let dates: BTreeSet<NaiveDate> = all.iter().map(|r| r.summary.completed_at.date_naive()).collect();

        Self {
            period: period.display_name().to_string(),
            completed_workouts,
            stopped_workouts,
            total_minutes,
            total_calories,
            total_work_seconds,
            total_sets,
            avg_duration_minutes,
            best_session,
            calories_by_day_of_week,
            daily,
            streak_days: calculate_streak(&dates, now.date_naive()),
        }
    }

    /// Total workouts in the period.
    #[must_use]
    pub const fn total_workouts(&self) -> i64 {
        self.completed_workouts + self.stopped_workouts
    }

    /// Format the report for display.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Workout Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Workouts:            {} ({} completed, {} stopped)",
            self.total_workouts(),
            self.completed_workouts,
            self.stopped_workouts
        ));
        lines.push(format!(
            "  Total time:          {}",
            format_duration(Duration::minutes(self.total_minutes))
        ));
        lines.push(format!(
            "  Work time:           {}",
            format_duration(Duration::seconds(
                i64::try_from(self.total_work_seconds).unwrap_or(i64::MAX)
            ))
        ));
        lines.push(format!("  Calories:            {} kcal", self.total_calories));
        lines.push(format!("  Sets:                {}", self.total_sets));
        lines.push(format!(
            "  Average workout:     {:.0} minutes",
            self.avg_duration_minutes
        ));
        if let Some(best) = &self.best_session {
            lines.push(format!(
                "  Best session:        {} ({} kcal, {})",
                best.summary.name,
                best.summary.calories_burned,
                best.summary.completed_at.format("%Y-%m-%d")
            ));
        }
        lines.push(format!("  Current streak:      {} days", self.streak_days));
        lines.push(String::new());

        if self.total_calories > 0 {
            lines.push("Calories by Day of Week".to_string());
            lines.push("─".repeat(40));
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let max_day = self.calories_by_day_of_week.iter().max().copied().unwrap_or(1).max(1);

            for (day, calories) in days.iter().zip(self.calories_by_day_of_week) {
                let bar_len = (calories as f64 / max_day as f64 * 20.0) as usize;
                lines.push(format!("  {day} {calories:>5} {}", "█".repeat(bar_len)));
            }
            lines.push(String::new());
        }

        if !self.daily.is_empty() {
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));
            for day in self.daily.iter().take(7) {
                lines.push(format!(
                    "  {} {:>4}m {:>5} kcal ({} workouts)",
                    day.date, day.minutes, day.calories, day.workouts
                ));
            }
        }

        lines.join("\n")
    }
}

/// Consecutive days with a workout, counting back from today, or from
/// yesterday when today has none yet.
fn calculate_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> i64 {
    let mut check_date = today;
    if !dates.contains(&check_date) {
        check_date = today - Duration::days(1);
    }

    let mut streak = 0;
    while dates.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}
