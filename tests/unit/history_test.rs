//! Unit tests for exercise history summaries.

use rustlift::history::{
    get_exercise_history, most_recent_first, HistoryError, HistorySource, InMemoryHistory,
    SetRecord,
};

fn set(workout: &str, number: u32, weight: f64, reps: u32, created_at: &str) -> SetRecord {
    SetRecord::new(workout, "deadlift", number, weight, reps, true, created_at)
}

#[test]
fn test_history_is_ascending_regardless_of_insertion_order() {
    let history = InMemoryHistory::from_sets(vec![
        set("w3", 1, 275.0, 5, "2024-03-08T09:00:00.000Z"),
        set("w1", 1, 255.0, 5, "2024-03-01T09:00:00.000Z"),
        set("w2", 2, 265.0, 5, "2024-03-04T09:05:00.000Z"),
        set("w1", 2, 255.0, 5, "2024-03-01T09:05:00.000Z"),
        set("w2", 1, 265.0, 5, "2024-03-04T09:00:00.000Z"),
    ]);

    let summaries = get_exercise_history(&history, "deadlift").unwrap();

    let ids: Vec<&str> = summaries.iter().map(|s| s.workout_id.as_str()).collect();
    assert_eq!(ids, vec!["w1", "w2", "w3"]);
    assert_eq!(summaries[0].volume, 2550.0);
    assert_eq!(summaries[2].weight, 275.0);
}

#[test]
fn test_summary_uses_heaviest_set_and_first_note() {
    let mut warmup = set("w1", 1, 135.0, 10, "2024-03-01T09:00:00.000Z");
    warmup.notes = Some("  ".to_string());
    let mut top = set("w1", 2, 315.0, 3, "2024-03-01T09:10:00.000Z");
    top.notes = Some("Belt on".to_string());
    let backoff = set("w1", 3, 275.0, 5, "2024-03-01T09:15:00.000Z");

    let history = InMemoryHistory::from_sets(vec![backoff, top, warmup]);
    let summaries = get_exercise_history(&history, "deadlift").unwrap();

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.weight, 315.0);
    assert_eq!(summary.reps, 3);
    assert_eq!(summary.date, "2024-03-01T09:10:00.000Z");
    assert_eq!(summary.notes, "Belt on");
    assert_eq!(summary.volume, 1350.0 + 945.0 + 1375.0);
}

#[test]
fn test_other_exercises_are_ignored() {
    let mut history = InMemoryHistory::new();
    history.push(set("w1", 1, 225.0, 5, "2024-03-01T09:00:00.000Z"));
    history.push(SetRecord::new(
        "w1",
        "bench",
        1,
        185.0,
        5,
        true,
        "2024-03-01T09:30:00.000Z",
    ));

    assert_eq!(get_exercise_history(&history, "deadlift").unwrap().len(), 1);
    assert!(get_exercise_history(&history, "row").unwrap().is_empty());
}

#[test]
fn test_most_recent_first_groups() {
    let groups = most_recent_first(vec![
        set("old", 1, 100.0, 5, "2024-01-01T10:00:00.000Z"),
        set("new", 1, 110.0, 5, "2024-01-05T10:00:00.000Z"),
        set("old", 2, 100.0, 5, "2024-01-01T10:03:00.000Z"),
    ]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].workout_id, "new");
    assert_eq!(groups[1].len(), 2);
}

struct Offline;

impl HistorySource for Offline {
    fn fetch_sets_for_exercise(&self, _exercise_id: &str) -> Result<Vec<SetRecord>, HistoryError> {
        Err(HistoryError::Unavailable("offline".to_string()))
    }
}

#[test]
fn test_source_errors_propagate() {
    let result = get_exercise_history(&Offline, "deadlift");
    assert!(matches!(result, Err(HistoryError::Unavailable(_))));
}
