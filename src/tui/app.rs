//! Application state for the workout screen.

use std::time::Instant;

use crate::features::timer::{describe, Metronome, RunOutcome, Transition, WorkoutTimerEngine};

/// Workout screen state.
pub struct App<'a> {
    /// The engine being driven.
    pub engine: &'a mut WorkoutTimerEngine,
    metronome: Metronome,
    /// Message for the status bar.
    pub status: Option<String>,
    /// Set once the loop should end.
    pub exit: Option<RunOutcome>,
}

impl<'a> App<'a> {
    /// Wrap an engine whose session is already started or restored.
    pub fn new(engine: &'a mut WorkoutTimerEngine, metronome: Metronome) -> Self {
        Self {
            engine,
            metronome,
            status: None,
            exit: None,
        }
    }

    /// Time the event loop may block before the next tick.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> std::time::Duration {
        if self.engine.is_paused() {
            // Nothing to tick; wake up now and then to redraw.
            return std::time::Duration::from_millis(250);
        }
        self.metronome.time_until_tick(now)
    }

    /// Deliver every tick that has come due.
    pub fn on_time(&mut self, now: Instant) {
        if self.engine.is_paused() || !self.metronome.is_due(now) {
            return;
        }
        for _ in 0..self.metronome.take_due(now) {
            let transition = self.engine.tick();
            self.note(transition);
            if !self.engine.state().is_active() {
                break;
            }
        }
        self.check_finished();
    }

    /// Pause or resume. Resuming starts a fresh one-second interval.
    pub fn toggle_pause(&mut self, now: Instant) {
        self.engine.toggle_pause();
        if self.engine.is_paused() {
            self.status = Some("Paused".to_string());
        } else {
            self.metronome.reset(now);
            self.status = None;
        }
    }

    /// Skip the rest of the current phase.
    pub fn skip(&mut self, now: Instant) {
        let transition = self.engine.skip();
        self.note(transition);
        if !self.engine.is_paused() {
            self.metronome.reset(now);
        }
        self.check_finished();
    }

    /// Leave the screen, keeping the session for later.
    pub fn minimize(&mut self) {
        if let Some(snapshot) = self.engine.minimize() {
            self.exit = Some(RunOutcome::Minimized(snapshot));
        }
    }

    /// End the session, optionally recording it.
    pub fn stop(&mut self, record: bool) {
        let summary = self.engine.stop(record);
        self.exit = Some(RunOutcome::Finished(summary));
    }

    fn note(&mut self, transition: Transition) {
        if let Some(line) = describe(self.engine, transition) {
            self.status = Some(line);
        }
    }

    fn check_finished(&mut self) {
        if self.exit.is_none() && self.engine.state().is_finished() {
            self.exit = Some(RunOutcome::Finished(self.engine.last_summary().cloned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::catalog::Catalog;
    use crate::features::timer::{
        EngineState, MemorySink, PlannedExercise, SessionOutcome, WorkoutPlan,
    };
    use chrono::Utc;
    use std::time::Duration;

    fn engine() -> (MemorySink, WorkoutTimerEngine) {
        let sink = MemorySink::new();
        let mut engine = WorkoutTimerEngine::new(
            Box::new(Catalog::builtin()),
            Box::new(sink.clone()),
            Box::new(ManualClock::new(Utc::now())),
        );
        let plan = WorkoutPlan::new("T").with_exercise(PlannedExercise::new("squats", 2, 3, 2));
        engine.start(plan, 70.0).unwrap();
        (sink, engine)
    }

    #[test]
    fn test_ticks_follow_the_metronome() {
        let (_sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.on_time(start + Duration::from_millis(2500));
        assert_eq!(app.engine.snapshot().unwrap().seconds_remaining, 1);
        assert!(app.exit.is_none());
    }

    #[test]
    fn test_nothing_before_first_deadline() {
        let (_sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.on_time(start + Duration::from_millis(999));
        assert_eq!(app.engine.snapshot().unwrap().seconds_remaining, 3);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_paused_time_is_not_ticked() {
        let (_sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.toggle_pause(start);
        app.on_time(start + Duration::from_secs(30));
        assert_eq!(app.engine.snapshot().unwrap().seconds_remaining, 3);

        app.toggle_pause(start + Duration::from_secs(30));
        app.on_time(start + Duration::from_millis(30_500));
        assert_eq!(app.engine.snapshot().unwrap().seconds_remaining, 3);
        app.on_time(start + Duration::from_secs(31));
        assert_eq!(app.engine.snapshot().unwrap().seconds_remaining, 2);
    }

    #[test]
    fn test_run_to_completion_sets_exit() {
        let (sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.on_time(start + Duration::from_secs(60));
        let Some(RunOutcome::Finished(Some(summary))) = app.exit.clone() else {
            panic!("expected a finished session");
        };
        assert_eq!(summary.outcome, SessionOutcome::Completed);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_minimize_and_stop() {
        let (sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.on_time(start + Duration::from_secs(1));
        app.minimize();
        assert!(matches!(app.exit, Some(RunOutcome::Minimized(_))));

        app.stop(true);
        assert!(matches!(app.exit, Some(RunOutcome::Finished(Some(_)))));
        assert_eq!(app.engine.state(), EngineState::Stopped);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_skip_sets_status() {
        let (_sink, mut engine) = engine();
        let start = Instant::now();
        let mut app = App::new(&mut engine, Metronome::starting_at(Duration::from_secs(1), start));

        app.skip(start);
        assert_eq!(app.status.as_deref(), Some("Rest  2s"));
    }
}
