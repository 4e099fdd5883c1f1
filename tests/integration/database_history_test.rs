//! Integration tests for history and suggestions backed by SQLite.
//!
//! Tests the storage path end to end:
//! - Saving finished workouts transactionally
//! - Reading exercise history and suggestions through the database
//! - Soft deletes hiding workouts from history
//! - Stored settings overriding configuration

use rustlift::history::{get_exercise_history, SetRecord};
use rustlift::plates::PlateInventory;
use rustlift::progression::{PlanExerciseConfig, ProgressionAdvisor, SuggestionReason};
use rustlift::storage::database::setting_keys;
use rustlift::storage::{Database, DatabaseError, SettingsSource, TrainingSettings, WeightUnit};
use rustlift::workouts::{FinishedWorkout, WorkoutRecord};
use tempfile::NamedTempFile;

/// Build a finished workout of bench sets on the given day.
fn bench_workout(id: &str, day: u32, weight: f64, reps: &[u32]) -> FinishedWorkout {
    let created_at = format!("2024-06-{:02}T17:00:00.000Z", day);
    let sets = reps
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            SetRecord::new(id, "bench", i as u32 + 1, weight, r, r >= 5, created_at.clone())
        })
        .collect();

    FinishedWorkout {
        workout: WorkoutRecord {
            id: id.to_string(),
            date: format!("2024-06-{:02}", day),
            plan_id: None,
            plan_name: None,
            day_name: Some("Freestyle".to_string()),
            notes: None,
            duration_secs: 1800,
            exercise_count: 1,
            created_at,
        },
        sets,
    }
}

#[test]
fn test_history_reads_back_in_date_order() {
    let mut db = Database::open_in_memory().unwrap();

    // Saved out of order on purpose
    db.save_finished_workout(&bench_workout("w3", 20, 175.0, &[5, 5, 5])).unwrap();
    db.save_finished_workout(&bench_workout("w1", 6, 165.0, &[5, 5, 5])).unwrap();
    db.save_finished_workout(&bench_workout("w2", 13, 170.0, &[5, 5, 5])).unwrap();

    let history = get_exercise_history(&db, "bench").unwrap();

    let weights: Vec<f64> = history.iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![165.0, 170.0, 175.0]);
    assert_eq!(history[0].volume, 165.0 * 15.0);

    let workouts = db.list_workouts().unwrap();
    assert_eq!(workouts[0].id, "w3");
}

#[test]
fn test_suggestions_follow_stored_sessions() {
    let mut db = Database::open_in_memory().unwrap();
    let advisor = ProgressionAdvisor::new();
    let config = PlanExerciseConfig::new(3, 5).with_deload(10.0, 2);

    let first = advisor.suggest(&db, "bench", &config, WeightUnit::Lb).unwrap();
    assert_eq!(first.reason, SuggestionReason::FirstTime);

    db.save_finished_workout(&bench_workout("w1", 3, 185.0, &[5, 5, 5])).unwrap();
    let next = advisor.suggest(&db, "bench", &config, WeightUnit::Lb).unwrap();
    assert_eq!(next.weight, 190.0);
    assert_eq!(next.reason, SuggestionReason::Increment);

    db.save_finished_workout(&bench_workout("w2", 5, 190.0, &[5, 4, 3])).unwrap();
    let retry = advisor.suggest(&db, "bench", &config, WeightUnit::Lb).unwrap();
    assert_eq!(retry.weight, 190.0);
    assert_eq!(retry.reason, SuggestionReason::Retry);

    db.save_finished_workout(&bench_workout("w3", 7, 190.0, &[5, 3, 3])).unwrap();
    let deload = advisor.suggest(&db, "bench", &config, WeightUnit::Lb).unwrap();
    assert_eq!(deload.weight, 170.0);
    assert_eq!(deload.reason, SuggestionReason::Deload);
}

#[test]
fn test_deleted_workout_leaves_history() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_finished_workout(&bench_workout("w1", 3, 185.0, &[5, 5, 5])).unwrap();
    db.save_finished_workout(&bench_workout("w2", 5, 190.0, &[5, 4, 3])).unwrap();

    db.delete_workout("w2").unwrap();

    let history = get_exercise_history(&db, "bench").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].workout_id, "w1");
    assert!(db.get_workout("w2").unwrap().is_none());

    let again = db.delete_workout("w2");
    assert!(matches!(again, Err(DatabaseError::NotFound(_))));
}

#[test]
fn test_database_persists_across_reopen() {
    let temp_file = NamedTempFile::new().unwrap();
    {
        let mut db = Database::open(temp_file.path()).unwrap();
        db.save_finished_workout(&bench_workout("w1", 3, 185.0, &[5, 5, 5])).unwrap();
    }

    let db = Database::open(temp_file.path()).unwrap();
    assert_eq!(db.get_sets_for_exercise("bench").unwrap().len(), 3);
    assert_eq!(db.get_schema_version().unwrap(), 3);
}

#[test]
fn test_stored_settings_override_config() {
    let db = Database::open_in_memory().unwrap();
    db.set_setting(setting_keys::UNIT, &WeightUnit::Kg).unwrap();
    db.set_setting(setting_keys::INCREMENT, &2.5).unwrap();
    db.set_setting(
        setting_keys::PLATE_INVENTORY,
        &PlateInventory::from_pairs(&[(20.0, 4), (1.25, 2)]),
    )
    .unwrap();

    let base = TrainingSettings {
        reps: 3,
        ..Default::default()
    };
    let settings = db.apply_setting_overrides(base).unwrap();

    assert_eq!(settings.unit, WeightUnit::Kg);
    assert_eq!(settings.increment, 2.5);
    assert_eq!(settings.reps, 3);
    assert_eq!(settings.bar_weight(), 20.0);
    assert_eq!(settings.plate_inventory().count(1.25), 2);
}

#[test]
fn test_saved_settings_round_trip_through_source() {
    let db = Database::open_in_memory().unwrap();
    let settings = TrainingSettings {
        unit: WeightUnit::Kg,
        bar_weight: Some(15.0),
        deload_after: 4,
        ..Default::default()
    };

    db.save_training_settings(&settings).unwrap();

    let loaded = db.training_settings();
    assert_eq!(loaded.unit, WeightUnit::Kg);
    assert_eq!(loaded.bar_weight(), 15.0);
    assert_eq!(loaded.deload_after, 4);
}
