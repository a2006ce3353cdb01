//! Line-oriented workout runner for non-interactive terminals.
//!
//! Drives the engine from a [`Metronome`] and prints one line per phase
//! change. The interactive runner lives in [`crate::tui`].

use std::io::Write;
use std::time::Duration;

use crate::error::FitError;

use super::engine::{EngineState, WorkoutTimerEngine};
use super::scheduler::{Metronome, TICK_INTERVAL};
use super::snapshot::{Phase, TimerSnapshot, Transition};
use super::summary::SessionSummary;

/// Knobs for an unattended run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Real time per engine tick
    pub interval: Duration,
    /// Minimize after this many ticks instead of running to the end
    pub minimize_after: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
            minimize_after: None,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Session completed or stopped, with the recorded summary if any
    Finished(Option<SessionSummary>),
    /// Session handed off for later resumption
    Minimized(TimerSnapshot),
}

/// Run the engine's current session until it ends or is minimized.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_plain<W: Write>(
    engine: &mut WorkoutTimerEngine,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunOutcome, FitError> {
    if let Some(line) = status_line(engine) {
        writeln!(out, "{line}")?;
    }

    let mut metronome = Metronome::new(options.interval);
    let mut ticks: u64 = 0;

    while engine.state().is_active() {
        for _ in 0..metronome.wait() {
            if options.minimize_after.is_some_and(|limit| ticks >= limit) {
                if let Some(snapshot) = engine.minimize() {
                    out.flush()?;
                    return Ok(RunOutcome::Minimized(snapshot));
                }
            }

            let transition = engine.tick();
            ticks += 1;
            if let Some(line) = describe(engine, transition) {
                writeln!(out, "{line}")?;
            }
            if engine.state() != EngineState::Running {
                break;
            }
        }
        out.flush()?;
    }

    Ok(RunOutcome::Finished(engine.last_summary().cloned()))
}

/// Line announcing the phase the engine is in.
#[must_use]
pub fn status_line(engine: &WorkoutTimerEngine) -> Option<String> {
    let snapshot = engine.snapshot()?;
    let entry = engine.current_entry()?;
    let name = engine
        .current_exercise()
        .map_or_else(|| entry.exercise_id.clone(), |e| e.name);

    Some(match snapshot.phase {
        Phase::Work => format!(
            "Work  {name} set {}/{} ({}s)",
            snapshot.current_set, entry.sets, snapshot.seconds_remaining
        ),
        Phase::Rest => format!("Rest  {}s", snapshot.seconds_remaining),
    })
}

/// Line for a phase boundary.
#[must_use]
pub fn describe(engine: &WorkoutTimerEngine, transition: Transition) -> Option<String> {
    match transition {
        Transition::Unchanged | Transition::Counted => None,
        Transition::Completed => {
            let snapshot = engine.snapshot()?;
            Some(format!(
                "Done  {} sets, {}s of work",
                snapshot.sets_completed_count, snapshot.actual_work_seconds
            ))
        }
        Transition::RestStarted => {
            let line = status_line(engine)?;
            let last_set = engine
                .snapshot()
                .zip(engine.current_entry())
                .is_some_and(|(s, e)| s.current_set >= e.sets);
            match engine.next_exercise() {
                Some(next) if last_set => Some(format!("{line}, up next: {}", next.name)),
                _ => Some(line),
            }
        }
        Transition::SetStarted | Transition::ExerciseStarted => status_line(engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::catalog::Catalog;
    use crate::features::timer::plan::{PlannedExercise, WorkoutPlan};
    use crate::features::timer::summary::{MemorySink, SessionOutcome};
    use chrono::Utc;

    fn engine(sink: &MemorySink) -> WorkoutTimerEngine {
        WorkoutTimerEngine::new(
            Box::new(Catalog::builtin()),
            Box::new(sink.clone()),
            Box::new(ManualClock::new(Utc::now())),
        )
    }

    fn fast() -> RunOptions {
        RunOptions {
            interval: Duration::from_millis(1),
            minimize_after: None,
        }
    }

    fn plan() -> WorkoutPlan {
        WorkoutPlan::new("Quick")
            .with_exercise(PlannedExercise::new("squats", 2, 3, 1))
            .with_exercise(PlannedExercise::new("plank", 1, 2, 1))
    }

    #[test]
    fn test_run_to_completion() {
        let sink = MemorySink::new();
        let mut engine = engine(&sink);
        engine.start(plan(), 70.0).unwrap();

        let mut out = Vec::new();
        let outcome = run_plain(&mut engine, &fast(), &mut out).unwrap();

        let RunOutcome::Finished(Some(summary)) = outcome else {
            panic!("expected a finished run with a summary");
        };
        assert_eq!(summary.outcome, SessionOutcome::Completed);
        assert_eq!(summary.sets_count, 3);
        assert_eq!(sink.len(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Work  Squats set 1/2"));
        assert!(text.contains("up next: Plank"));
        assert!(text.contains("Done  3 sets, 8s of work"));
    }

    #[test]
    fn test_minimize_after_ticks() {
        let sink = MemorySink::new();
        let mut engine = engine(&sink);
        engine.start(plan(), 70.0).unwrap();

        let options = RunOptions {
            minimize_after: Some(2),
            ..fast()
        };
        let mut out = Vec::new();
        let outcome = run_plain(&mut engine, &options, &mut out).unwrap();

        let RunOutcome::Minimized(snapshot) = outcome else {
            panic!("expected a minimized run");
        };
        assert_eq!(snapshot.actual_work_seconds, 2);
        assert!(!snapshot.is_complete);
        assert!(sink.is_empty());
    }
}
