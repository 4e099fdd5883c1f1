//! Integration tests for JSON backup files.
//!
//! Tests a backup leaving one database and landing in another:
//! - Writing and reading the backup file
//! - Suggestions and plans surviving the restore
//! - Rejecting files that are not backups

use rustlift::export::{export_backup, import_backup, read_backup, write_backup, BackupError};
use rustlift::plans::{Plan, PlanDay, PlanExercise, PlanManager};
use rustlift::progression::{PlanExerciseConfig, ProgressionAdvisor, SuggestionReason};
use rustlift::storage::{Database, WeightUnit};
use rustlift::workouts::{FinishedWorkout, WorkoutRecord};
use rustlift::SetRecord;
use tempfile::{tempdir, NamedTempFile};

fn press_workout(id: &str, day: u32, weight: f64) -> FinishedWorkout {
    let created_at = format!("2024-07-{:02}T18:00:00.000Z", day);
    FinishedWorkout {
        workout: WorkoutRecord {
            id: id.to_string(),
            date: format!("2024-07-{:02}", day),
            plan_id: None,
            plan_name: None,
            day_name: None,
            notes: Some("Strict".to_string()),
            duration_secs: 900,
            exercise_count: 1,
            created_at: created_at.clone(),
        },
        sets: (1..=3)
            .map(|n| SetRecord::new(id, "press", n, weight, 5, true, created_at.clone()))
            .collect(),
    }
}

#[test]
fn test_backup_file_restores_into_fresh_database() {
    let mut source = Database::open_in_memory().unwrap();
    source.save_finished_workout(&press_workout("w1", 1, 95.0)).unwrap();
    source.save_finished_workout(&press_workout("w2", 3, 100.0)).unwrap();
    source.set_setting("unit", &WeightUnit::Lb).unwrap();

    let mut plan = Plan::new(
        "Press focus",
        vec![PlanDay::new(
            "A",
            vec![PlanExercise::new("press", "Overhead Press", PlanExerciseConfig::new(3, 5))],
        )],
    );
    plan.schedule = Some("Mon/Wed/Fri".to_string());
    PlanManager::new(source.connection()).create(&plan).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("backups").join("rustlift.json");
    write_backup(&path, &export_backup(&mut source).unwrap()).unwrap();

    let target_file = NamedTempFile::new().unwrap();
    {
        let mut target = Database::open(target_file.path()).unwrap();
        let summary = import_backup(&mut target, &read_backup(&path).unwrap(), false).unwrap();
        assert_eq!(summary.workouts, 2);
        assert_eq!(summary.sets, 6);
        assert_eq!(summary.plans, 1);
    }

    let target = Database::open(target_file.path()).unwrap();
    let restored = PlanManager::new(target.connection()).get(plan.id).unwrap().unwrap();
    assert_eq!(restored.schedule.as_deref(), Some("Mon/Wed/Fri"));

    let suggestion = ProgressionAdvisor::new()
        .suggest(&target, "press", &PlanExerciseConfig::new(3, 5), WeightUnit::Lb)
        .unwrap();
    assert_eq!(suggestion.weight, 105.0);
    assert_eq!(suggestion.reason, SuggestionReason::Increment);
}

#[test]
fn test_non_backup_file_is_rejected() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"{"workouts": []}"#).unwrap();

    assert!(matches!(read_backup(file.path()), Err(BackupError::Invalid(_))));

    let missing = tempdir().unwrap().path().join("absent.json");
    assert!(matches!(read_backup(&missing), Err(BackupError::Io(_))));
}
