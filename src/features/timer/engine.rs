//! The interval workout timer engine.
//!
//! The engine owns one session at a time: the plan, the user's weight, the
//! [`TimerSnapshot`] and the wall-clock start. It holds no timer of its own.
//! A scheduler calls [`WorkoutTimerEngine::tick`] once per elapsed second and
//! stops calling it while paused.
//!
//! Catalog misses degrade to MET 0: the tick still counts work seconds but
//! credits no calories. The engine never fails a tick.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::validate_weight;
use crate::core::{Clock, ExerciseCatalog, SessionSink};
use crate::error::FitError;
use crate::features::catalog::ExerciseInfo;

use super::calories;
use super::plan::{PlannedExercise, WorkoutPlan};
use super::snapshot::{Phase, TimerSnapshot, Transition};
use super::summary::{duration_minutes, SessionOutcome, SessionSummary};

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No session started yet
    Idle,
    /// Accepting ticks
    Running,
    /// Ignoring ticks until resumed
    Paused,
    /// Final set finished
    Completed,
    /// Ended early by `stop`
    Stopped,
}

impl EngineState {
    /// Whether a session is in progress (running or paused).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Whether the last session has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

struct Session {
    plan: WorkoutPlan,
    weight_kg: f64,
    snapshot: TimerSnapshot,
    started_at: DateTime<Utc>,
}

/// Drives a [`WorkoutPlan`] through its work and rest phases.
pub struct WorkoutTimerEngine {
    catalog: Box<dyn ExerciseCatalog>,
    sink: Box<dyn SessionSink>,
    clock: Box<dyn Clock>,
    session: Option<Session>,
    state: EngineState,
    last_summary: Option<SessionSummary>,
}

impl WorkoutTimerEngine {
    /// Create an idle engine wired to its collaborators.
    #[must_use]
    pub fn new(
        catalog: Box<dyn ExerciseCatalog>,
        sink: Box<dyn SessionSink>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            sink,
            clock,
            session: None,
            state: EngineState::Idle,
            last_summary: None,
        }
    }

    /// Begin a new session at the first work phase.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` if the plan has no exercises or a zero-set entry,
    /// `Config` if the weight is unusable, and `SessionActive` if a session is
    /// already running or paused.
    pub fn start(&mut self, plan: WorkoutPlan, user_weight_kg: f64) -> Result<(), FitError> {
        if self.state.is_active() {
            return Err(FitError::SessionActive);
        }
        validate_weight(user_weight_kg)?;
        let snapshot = TimerSnapshot::initial(&plan)?;

        tracing::info!(
            plan = %plan.name,
            exercises = plan.exercises.len(),
            weight_kg = user_weight_kg,
            "workout started"
        );
        self.begin(plan, user_weight_kg, snapshot);
        Ok(())
    }

    /// Re-hydrate a previously minimized session and resume it.
    ///
    /// Accumulated calories and work seconds carry over unchanged. Duration
    /// for the eventual summary is measured from this call.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` for an unrunnable plan, `InvalidSnapshot` if the
    /// snapshot is out of the plan's bounds or already complete, `Config` for
    /// an unusable weight, and `SessionActive` if a session is in progress.
    pub fn restore_from(
        &mut self,
        snapshot: TimerSnapshot,
        plan: WorkoutPlan,
        user_weight_kg: f64,
    ) -> Result<(), FitError> {
        if self.state.is_active() {
            return Err(FitError::SessionActive);
        }
        validate_weight(user_weight_kg)?;
        plan.validate()?;
        snapshot.validate(&plan)?;
        if snapshot.is_complete {
            return Err(FitError::InvalidSnapshot(
                "cannot resume a completed workout".to_string(),
            ));
        }

        tracing::info!(
            plan = %plan.name,
            exercise_index = snapshot.exercise_index,
            set = snapshot.current_set,
            calories = snapshot.total_calories_burned,
            "workout restored"
        );
        self.begin(plan, user_weight_kg, snapshot);
        Ok(())
    }

    fn begin(&mut self, plan: WorkoutPlan, weight_kg: f64, snapshot: TimerSnapshot) {
        for entry in &plan.exercises {
            if self.catalog.lookup(&entry.exercise_id).is_none() {
                tracing::warn!(
                    exercise = %entry.exercise_id,
                    "exercise not in catalog, its work will count zero calories"
                );
            }
        }

        self.session = Some(Session {
            plan,
            weight_kg,
            snapshot,
            started_at: self.clock.now(),
        });
        self.state = EngineState::Running;
        self.last_summary = None;
    }

    /// Deliver one elapsed second.
    ///
    /// A no-op unless the engine is running.
    pub fn tick(&mut self) -> Transition {
        if self.state != EngineState::Running {
            return Transition::Unchanged;
        }
        let Some(session) = self.session.as_mut() else {
            return Transition::Unchanged;
        };

        let earning = session.snapshot.phase == Phase::Work && session.snapshot.seconds_remaining > 0;
        let rate = if earning {
            calorie_rate(self.catalog.as_ref(), session)
        } else {
            0.0
        };

        let transition = session.snapshot.tick(&session.plan, rate);
        self.after_transition(transition);
        transition
    }

    /// End the current phase immediately.
    ///
    /// Allowed while running or paused; the skipped remainder earns nothing.
    pub fn skip(&mut self) -> Transition {
        if !self.state.is_active() {
            return Transition::Unchanged;
        }
        let Some(session) = self.session.as_mut() else {
            return Transition::Unchanged;
        };

        tracing::debug!(
            phase = %session.snapshot.phase,
            skipped_seconds = session.snapshot.seconds_remaining,
            "phase skipped"
        );
        let transition = session.snapshot.skip(&session.plan);
        self.after_transition(transition);
        transition
    }

    fn after_transition(&mut self, transition: Transition) {
        if transition.is_boundary() {
            if let Some(session) = &self.session {
                let snap = &session.snapshot;
                tracing::debug!(
                    ?transition,
                    exercise_index = snap.exercise_index,
                    set = snap.current_set,
                    phase = %snap.phase,
                    seconds = snap.seconds_remaining,
                    "timer transition"
                );
            }
        }

        if transition == Transition::Completed {
            let exercises = self
                .session
                .as_ref()
                .map_or(0, |s| u32::try_from(s.plan.exercises.len()).unwrap_or(u32::MAX));
            self.finish(SessionOutcome::Completed, exercises);
        }
    }

    /// Stop accepting ticks until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused;
            tracing::debug!("workout paused");
        }
    }

    /// Accept ticks again after a pause.
    pub fn resume(&mut self) {
        if self.state == EngineState::Paused {
            self.state = EngineState::Running;
            tracing::debug!("workout resumed");
        }
    }

    /// Toggle between running and paused.
    pub fn toggle_pause(&mut self) {
        match self.state {
            EngineState::Running => self.pause(),
            EngineState::Paused => self.resume(),
            _ => {}
        }
    }

    /// Copy of the snapshot for external storage; the session keeps running.
    ///
    /// `None` unless a session is running or paused.
    #[must_use]
    pub fn minimize(&self) -> Option<TimerSnapshot> {
        if !self.state.is_active() {
            return None;
        }
        self.session.as_ref().map(|s| s.snapshot.clone())
    }

    /// End the session early.
    ///
    /// With `force_record`, a summary is emitted if any work or calories were
    /// accrued. Safe to call in any state; a finished session is never
    /// recorded twice.
    pub fn stop(&mut self, force_record: bool) -> Option<SessionSummary> {
        if !self.state.is_active() {
            return None;
        }

        let (accrued, reached) = self.session.as_ref().map_or((false, 0), |s| {
            (
                s.snapshot.actual_work_seconds > 0 || s.snapshot.total_calories_burned > 0.0,
                u32::try_from(s.snapshot.exercise_index + 1).unwrap_or(u32::MAX),
            )
        });

        if force_record && accrued {
            self.finish(SessionOutcome::Stopped, reached);
            return self.last_summary.clone();
        }

        self.state = EngineState::Stopped;
        tracing::info!(recorded = false, "workout stopped");
        None
    }

    fn finish(&mut self, outcome: SessionOutcome, exercises_count: u32) {
        self.state = match outcome {
            SessionOutcome::Completed => EngineState::Completed,
            SessionOutcome::Stopped => EngineState::Stopped,
        };
        if self.last_summary.is_some() {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };

        let now = self.clock.now();
        let summary = SessionSummary {
            name: session.plan.name.clone(),
            duration_minutes: duration_minutes(session.started_at, now),
            actual_work_seconds: session.snapshot.actual_work_seconds,
            calories_burned: calories::round_calories(session.snapshot.total_calories_burned),
            exercises_count,
            sets_count: session.snapshot.sets_completed_count,
            completed_at: now,
            outcome,
        };

        tracing::info!(
            plan = %summary.name,
            outcome = %summary.outcome,
            minutes = summary.duration_minutes,
            calories = summary.calories_burned,
            sets = summary.sets_count,
            "workout recorded"
        );
        self.sink.record(&summary);
        self.last_summary = Some(summary);
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Whether ticks are currently ignored because of a pause.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == EngineState::Paused
    }

    /// Current snapshot, including the final one after the session ends.
    #[must_use]
    pub fn snapshot(&self) -> Option<&TimerSnapshot> {
        self.session.as_ref().map(|s| &s.snapshot)
    }

    /// The plan of the current or last session.
    #[must_use]
    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.session.as_ref().map(|s| &s.plan)
    }

    /// Body weight used for the current or last session.
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.weight_kg)
    }

    /// The plan entry being performed.
    #[must_use]
    pub fn current_entry(&self) -> Option<&PlannedExercise> {
        self.session
            .as_ref()
            .and_then(|s| s.snapshot.current_entry(&s.plan))
    }

    /// Catalog data for the exercise being performed.
    #[must_use]
    pub fn current_exercise(&self) -> Option<ExerciseInfo> {
        self.current_entry()
            .and_then(|e| self.catalog.lookup(&e.exercise_id))
    }

    /// Catalog data for the exercise after the current one.
    #[must_use]
    pub fn next_exercise(&self) -> Option<ExerciseInfo> {
        self.session
            .as_ref()
            .and_then(|s| s.snapshot.next_entry(&s.plan))
            .and_then(|e| self.catalog.lookup(&e.exercise_id))
    }

    /// Calories per work second for the current exercise.
    #[must_use]
    pub fn calories_per_second(&self) -> f64 {
        self.session
            .as_ref()
            .map_or(0.0, |s| calorie_rate(self.catalog.as_ref(), s))
    }

    /// Wall-clock time since start or restore.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.session
            .as_ref()
            .map(|s| self.clock.now().signed_duration_since(s.started_at))
    }

    /// Summary emitted by the current or last session, if any.
    #[must_use]
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }
}

fn calorie_rate(catalog: &dyn ExerciseCatalog, session: &Session) -> f64 {
    let Some(entry) = session.snapshot.current_entry(&session.plan) else {
        return 0.0;
    };
    let met = catalog.lookup(&entry.exercise_id).map_or_else(
        || {
            tracing::trace!(exercise = %entry.exercise_id, "catalog miss, MET 0");
            0.0
        },
        |info| info.met,
    );
    calories::per_second(met, session.weight_kg)
}
