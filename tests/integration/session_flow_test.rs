//! Integration tests for the workout session flow.
//!
//! Tests the complete training loop:
//! - Creating a plan and starting its current day
//! - Logging sets against prefilled suggestions
//! - Finishing, saving and advancing the plan
//! - Reading the next suggestion, records and CSV export back

use chrono::{Duration, Utc};
use rustlift::export::export_sets_csv;
use rustlift::metrics::ExerciseRecords;
use rustlift::plans::{Plan, PlanDay, PlanExercise, PlanManager};
use rustlift::progression::{PlanExerciseConfig, SuggestionReason};
use rustlift::storage::{Database, WeightUnit};
use rustlift::workouts::{
    Exercise, SessionEngine, SetStatus, SetUpdate, WorkoutError, DEFAULT_SESSION_SETS,
};

fn setup_database() -> Database {
    let db = Database::open_in_memory().unwrap();

    let mut squat = Exercise::new("Squat").with_muscle_group("Legs");
    squat.id = "squat".to_string();
    let mut bench = Exercise::new("Bench Press").with_muscle_group("Chest");
    bench.id = "bench".to_string();

    db.upsert_exercise(&squat).unwrap();
    db.upsert_exercise(&bench).unwrap();
    db
}

fn create_plan() -> Plan {
    let config = PlanExerciseConfig::new(3, 5).with_increment(5.0);
    Plan::new(
        "Starter",
        vec![
            PlanDay::new(
                "Day A",
                vec![
                    PlanExercise::new("squat", "Squat", config),
                    PlanExercise::new("bench", "Bench Press", config),
                ],
            ),
            PlanDay::new("Day B", vec![PlanExercise::new("squat", "Squat", config)]),
        ],
    )
}

/// Set every set of an exercise to `weight` and mark it completed.
fn log_exercise(engine: &mut SessionEngine, exercise: usize, weight: f64) {
    let count = engine.session().unwrap().exercises[exercise].sets.len();
    for set in 0..count {
        engine
            .update_set(
                exercise,
                set,
                SetUpdate {
                    weight: Some(weight),
                    ..Default::default()
                },
            )
            .unwrap();
        engine.complete_set(exercise, set).unwrap();
    }
}

#[test]
fn test_plan_session_to_next_suggestion() {
    let mut db = setup_database();
    let mut plan = create_plan();
    PlanManager::new(db.connection()).create(&plan).unwrap();

    // First session: nothing logged yet
    let mut engine = SessionEngine::new();
    let session = engine.start_from_plan(&mut plan, &db, WeightUnit::Lb).unwrap();
    assert_eq!(session.day_name, "Day A");
    assert_eq!(session.exercises.len(), 2);
    assert_eq!(session.exercises[0].sets.len(), 3);
    assert_eq!(session.exercises[0].suggestion.reason, SuggestionReason::FirstTime);
    assert_eq!(plan.current_day_index, 1);

    log_exercise(&mut engine, 0, 135.0);
    log_exercise(&mut engine, 1, 95.0);
    engine.set_exercise_notes(0, "Depth felt good").unwrap();

    let first = engine.finish(Utc::now() + Duration::minutes(45)).unwrap();
    assert!(!engine.is_active());
    assert_eq!(first.sets.len(), 6);
    assert_eq!(first.totals().completed_sets, 6);
    assert_eq!(first.workout.plan_id, Some(plan.id));

    db.save_finished_workout(&first).unwrap();
    PlanManager::new(db.connection()).update(&plan).unwrap();

    let stored = PlanManager::new(db.connection()).get(plan.id).unwrap().unwrap();
    assert_eq!(stored.current_day_index, 1);

    // Second session: Day B, squat prefilled at +5
    let session = engine.start_from_plan(&mut plan, &db, WeightUnit::Lb).unwrap();
    assert_eq!(session.day_name, "Day B");
    let squat = &session.exercises[0];
    assert_eq!(squat.suggestion.weight, 140.0);
    assert_eq!(squat.suggestion.reason, SuggestionReason::Increment);
    assert!(squat.sets.iter().all(|s| s.weight == 140.0));
    assert_eq!(squat.previous_best(), Some((135.0, 5)));
    assert_eq!(plan.current_day_index, 0);

    log_exercise(&mut engine, 0, 140.0);
    engine
        .update_set(
            0,
            2,
            SetUpdate {
                reps: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    engine.fail_set(0, 2).unwrap();

    let second = engine.finish(Utc::now() + Duration::days(2)).unwrap();
    db.save_finished_workout(&second).unwrap();

    // Missed set: hold the weight
    let history_sets = db.get_sets_for_exercise("squat").unwrap();
    assert_eq!(history_sets.len(), 6);
    assert_eq!(history_sets[0].notes.as_deref(), Some("Depth felt good"));

    let mut engine = SessionEngine::new();
    let session = engine.start_from_plan(&mut plan, &db, WeightUnit::Lb).unwrap();
    assert_eq!(session.exercises[0].suggestion.weight, 140.0);
    assert_eq!(session.exercises[0].suggestion.reason, SuggestionReason::Retry);
    assert_eq!(session.exercises[1].suggestion.weight, 100.0);

    let records = ExerciseRecords::from_sets(&history_sets).unwrap();
    assert_eq!(records.max_weight, 140.0);
    assert_eq!(records.completed_sets, 5);

    // Export oldest workout first
    let mut workouts = db.list_workouts().unwrap();
    workouts.reverse();
    let csv = export_sets_csv(&workouts, &db.list_sets().unwrap(), &db.list_exercises().unwrap())
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[1..7].iter().any(|l| l.ends_with(",Squat,1,135,5,,yes")));
    assert!(lines[1..7].iter().any(|l| l.ends_with(",Bench Press,3,95,5,,yes")));
    assert!(lines[9].ends_with(",Squat,3,140,3,,no"));
}

#[test]
fn test_freestyle_session() {
    let db = setup_database();
    let mut engine = SessionEngine::new();

    engine.start_freestyle().unwrap();
    assert!(matches!(
        engine.start_freestyle(),
        Err(WorkoutError::SessionAlreadyActive)
    ));

    // Nothing to save yet; the session stays open
    assert!(matches!(
        engine.finish(Utc::now()),
        Err(WorkoutError::EmptySession)
    ));
    assert!(engine.is_active());

    let index = engine.add_exercise(&db, "bench", "Bench Press", WeightUnit::Lb).unwrap();
    assert_eq!(
        engine.session().unwrap().exercises[index].sets.len(),
        DEFAULT_SESSION_SETS as usize
    );

    let added = engine.add_set(index).unwrap();
    assert_eq!(added.set_number, DEFAULT_SESSION_SETS + 1);

    assert_eq!(engine.toggle_set(index, 0).unwrap(), SetStatus::Completed);
    assert_eq!(engine.toggle_set(index, 0).unwrap(), SetStatus::Failed);
    assert!(matches!(
        engine.complete_set(index, 9),
        Err(WorkoutError::UnknownSet { .. })
    ));

    let abandoned = engine.abandon().unwrap();
    assert_eq!(abandoned.exercises.len(), 1);
    assert!(!engine.is_active());
    assert!(db.list_workouts().unwrap().is_empty());
}

#[test]
fn test_plan_manager_rotation() {
    let db = setup_database();
    let manager = PlanManager::new(db.connection());
    let plan = create_plan();
    manager.create(&plan).unwrap();

    let (_, first) = manager.start_next_day(plan.id).unwrap();
    let (_, second) = manager.start_next_day(plan.id).unwrap();
    let (advanced, third) = manager.start_next_day(plan.id).unwrap();

    assert_eq!(first.name, "Day A");
    assert_eq!(second.name, "Day B");
    assert_eq!(third.name, "Day A");
    assert_eq!(advanced.current_day_index, 1);

    assert!(manager.delete(plan.id).unwrap());
    assert!(manager.get(plan.id).unwrap().is_none());
}
