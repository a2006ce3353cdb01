use chrono::{Duration, TimeZone, Utc};

use fitclock::core::ManualClock;
use fitclock::features::catalog::Catalog;
use fitclock::features::timer::{
    MemorySink, MinimizedWorkout, Phase, PlannedExercise, SessionOutcome, TimerSnapshot,
    WorkoutPlan,
};
use fitclock::storage::Database;
use fitclock::{EngineState, FitError, WorkoutTimerEngine};

const WEIGHT: f64 = 70.0;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 13, 7, 0, 0).unwrap())
}

fn engine(sink: &MemorySink, clock: &ManualClock) -> WorkoutTimerEngine {
    WorkoutTimerEngine::new(
        Box::new(Catalog::builtin()),
        Box::new(sink.clone()),
        Box::new(clock.clone()),
    )
}

fn scenario_plan() -> WorkoutPlan {
    WorkoutPlan::new("Scenario").with_exercise(PlannedExercise::new("squats", 2, 3, 2))
}

fn mixed_plan() -> WorkoutPlan {
    WorkoutPlan::new("Mixed")
        .with_exercise(PlannedExercise::new("burpees", 2, 4, 2))
        .with_exercise(PlannedExercise::new("plank", 1, 3, 0))
        .with_exercise(PlannedExercise::new("lunges", 2, 2, 1))
}

fn snapshot(engine: &WorkoutTimerEngine) -> TimerSnapshot {
    engine.snapshot().cloned().unwrap()
}

/// Tick until the session ends, collecting every snapshot along the way.
fn trajectory(engine: &mut WorkoutTimerEngine) -> Vec<TimerSnapshot> {
    let mut seen = Vec::new();
    while engine.state() == EngineState::Running {
        engine.tick();
        seen.push(snapshot(engine));
    }
    seen
}

#[test]
fn scenario_single_exercise() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);
    engine.start(scenario_plan(), WEIGHT).unwrap();

    let s = snapshot(&engine);
    assert_eq!((s.exercise_index, s.current_set, s.phase, s.seconds_remaining), (0, 1, Phase::Work, 3));

    for _ in 0..3 {
        engine.tick();
    }
    let s = snapshot(&engine);
    assert_eq!((s.phase, s.seconds_remaining), (Phase::Rest, 2));
    assert!((s.total_calories_burned - 3.0 * 5.0 * 70.0 / 3600.0).abs() < 1e-9);

    for _ in 0..2 {
        engine.tick();
    }
    let s = snapshot(&engine);
    assert_eq!((s.current_set, s.phase, s.seconds_remaining), (2, Phase::Work, 3));
    assert!((s.total_calories_burned - 0.291_666).abs() < 1e-3);

    clock.advance(Duration::seconds(8));
    for _ in 0..3 {
        engine.tick();
    }
    assert!(snapshot(&engine).is_complete);
    assert_eq!(engine.state(), EngineState::Completed);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sets_count, 2);
    assert_eq!(records[0].exercises_count, 1);
    assert_eq!(records[0].calories_burned, 1);
    assert_eq!(records[0].duration_minutes, 1);
    assert_eq!(records[0].outcome, SessionOutcome::Completed);
}

#[test]
fn calories_only_grow_during_work() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);
    engine.start(mixed_plan(), WEIGHT).unwrap();

    let mut before = snapshot(&engine);
    while engine.state() == EngineState::Running {
        engine.tick();
        let after = snapshot(&engine);
        assert!(after.total_calories_burned >= before.total_calories_burned);
        if before.phase == Phase::Rest {
            assert!((after.total_calories_burned - before.total_calories_burned).abs() < f64::EPSILON);
            assert_eq!(after.actual_work_seconds, before.actual_work_seconds);
        }
        before = after;
    }
}

#[test]
fn snapshots_stay_in_bounds() {
    let sink = MemorySink::new();
    let clock = clock();
    let plan = mixed_plan();
    let mut engine = engine(&sink, &clock);
    engine.start(plan.clone(), WEIGHT).unwrap();

    for s in trajectory(&mut engine) {
        assert!(s.exercise_index < plan.exercises.len());
        let sets = plan.exercises[s.exercise_index].sets;
        assert!((1..=sets).contains(&s.current_set));
    }
}

#[test]
fn completes_exactly_once() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);
    engine.start(mixed_plan(), WEIGHT).unwrap();

    let flips = trajectory(&mut engine)
        .windows(2)
        .filter(|w| !w[0].is_complete && w[1].is_complete)
        .count();
    assert_eq!(flips, 1);

    engine.tick();
    engine.skip();
    engine.stop(true);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.records()[0].exercises_count, 3);
    assert_eq!(sink.records()[0].sets_count, 5);
}

#[test]
fn restore_reproduces_trajectory() {
    let plan = mixed_plan();

    let sink = MemorySink::new();
    let clock = clock();
    let mut original = engine(&sink, &clock);
    original.start(plan.clone(), WEIGHT).unwrap();
    for _ in 0..7 {
        original.tick();
    }

    let parked = original.minimize().unwrap();
    let restored_sink = MemorySink::new();
    let mut restored = engine(&restored_sink, &clock);
    restored.restore_from(parked, plan, WEIGHT).unwrap();

    assert_eq!(trajectory(&mut original), trajectory(&mut restored));
    assert_eq!(
        sink.records()[0].calories_burned,
        restored_sink.records()[0].calories_burned
    );
}

fn long_plan() -> WorkoutPlan {
    WorkoutPlan::new("Long")
        .with_exercise(PlannedExercise::new("burpees", 6, 45, 15))
        .with_exercise(PlannedExercise::new("jumping-jacks", 5, 40, 20))
        .with_exercise(PlannedExercise::new("mountain-climbers", 5, 35, 10))
        .with_exercise(PlannedExercise::new("plank", 3, 60, 30))
}

#[test]
fn every_snapshot_survives_json() {
    for weight in [48.3, 61.7, 73.3, 88.9, 104.1] {
        let mut engine = engine(&MemorySink::new(), &clock());
        engine.start(long_plan(), weight).unwrap();

        let seen = trajectory(&mut engine);
        assert!(seen.len() > 1000);
        let reloaded: Vec<TimerSnapshot> = seen
            .iter()
            .map(|s| serde_json::from_str(&serde_json::to_string(s).unwrap()).unwrap())
            .collect();
        assert_eq!(reloaded, seen, "weight {weight}");
    }
}

#[test]
fn minimized_workout_resumes_from_database() {
    let plan = long_plan();
    let weight = 73.3;
    let clock = clock();
    let db = Database::open_in_memory().unwrap();

    for ticks in [1, 97, 333, 601, 1042] {
        let sink = MemorySink::new();
        let mut original = engine(&sink, &clock);
        original.start(plan.clone(), weight).unwrap();
        for _ in 0..ticks {
            original.tick();
        }

        MinimizedWorkout::new(plan.clone(), weight, original.minimize().unwrap(), Utc::now())
            .save(&db)
            .unwrap();
        let parked = MinimizedWorkout::load(&db).unwrap().unwrap();
        assert_eq!(&parked.snapshot, original.snapshot().unwrap());

        let restored_sink = MemorySink::new();
        let mut restored = engine(&restored_sink, &clock);
        restored
            .restore_from(parked.snapshot, parked.plan, parked.weight_kg)
            .unwrap();

        assert_eq!(trajectory(&mut original), trajectory(&mut restored), "after {ticks} ticks");
        assert_eq!(sink.records(), restored_sink.records());
    }
}

#[test]
fn skip_matches_natural_boundary() {
    let plan = mixed_plan();
    let clock = clock();
    let mut walker = engine(&MemorySink::new(), &clock);
    walker.start(plan.clone(), WEIGHT).unwrap();

    let last_seconds: Vec<_> = trajectory(&mut walker)
        .into_iter()
        .filter(|s| s.seconds_remaining == 1 && !s.is_complete)
        .collect();
    assert!(last_seconds.len() >= 6);

    for from in last_seconds {
        let mut ticked = engine(&MemorySink::new(), &clock);
        ticked.restore_from(from.clone(), plan.clone(), WEIGHT).unwrap();
        let mut skipped = engine(&MemorySink::new(), &clock);
        skipped.restore_from(from.clone(), plan.clone(), WEIGHT).unwrap();

        ticked.tick();
        skipped.skip();

        let forced = snapshot(&skipped);
        assert_eq!(forced.actual_work_seconds, from.actual_work_seconds);

        let mut natural = snapshot(&ticked);
        natural.total_calories_burned = forced.total_calories_burned;
        natural.actual_work_seconds = forced.actual_work_seconds;
        assert_eq!(natural, forced, "diverged from {from:?}");
    }
}

#[test]
fn stop_with_partial_progress() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);
    engine.start(scenario_plan(), WEIGHT).unwrap();

    engine.tick();
    engine.tick();
    let burned = snapshot(&engine).total_calories_burned;
    let summary = engine.stop(true).unwrap();

    assert_eq!(summary.exercises_count, 1);
    assert_eq!(summary.sets_count, 0);
    assert_eq!(summary.calories_burned, burned.round() as i64);
    assert_eq!(summary.outcome, SessionOutcome::Stopped);
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(sink.len(), 1);
}

#[test]
fn empty_plan_is_rejected() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);

    let result = engine.start(WorkoutPlan::new("Nothing"), WEIGHT);
    assert!(matches!(result, Err(FitError::InvalidPlan(_))));
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn unknown_exercise_burns_nothing() {
    let sink = MemorySink::new();
    let clock = clock();
    let mut engine = engine(&sink, &clock);
    let plan = WorkoutPlan::new("Mystery").with_exercise(PlannedExercise::new("unicycling", 1, 3, 0));
    engine.start(plan, WEIGHT).unwrap();

    trajectory(&mut engine);

    let records = sink.records();
    assert_eq!(records[0].actual_work_seconds, 3);
    assert_eq!(records[0].calories_burned, 0);
}
