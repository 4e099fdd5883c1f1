//! Unit tests for next-weight suggestions.

use rustlift::history::{InMemoryHistory, SetRecord};
use rustlift::progression::{
    round_to_nearest, suggest_next_weight, PlanExerciseConfig, ProgressionAdvisor,
    ProgressionDefaults, SuggestionReason,
};
use rustlift::storage::WeightUnit;

/// Build one workout of identical sets for "squat".
fn workout(id: &str, day: u32, weight: f64, reps: &[u32], target: u32) -> Vec<SetRecord> {
    reps.iter()
        .enumerate()
        .map(|(i, &r)| {
            SetRecord::new(
                id,
                "squat",
                i as u32 + 1,
                weight,
                r,
                r >= target,
                format!("2024-01-{:02}T10:{:02}:00.000Z", day, i),
            )
        })
        .collect()
}

fn history(workouts: Vec<Vec<SetRecord>>) -> InMemoryHistory {
    InMemoryHistory::from_sets(workouts.into_iter().flatten().collect())
}

#[test]
fn test_no_history_is_first_time() {
    let suggestion = suggest_next_weight(
        &InMemoryHistory::new(),
        "squat",
        &PlanExerciseConfig::new(5, 5),
        WeightUnit::Lb,
    )
    .unwrap();

    assert_eq!(suggestion.weight, 0.0);
    assert_eq!(suggestion.reason, SuggestionReason::FirstTime);
}

#[test]
fn test_successful_session_adds_increment() {
    let history = history(vec![workout("w1", 1, 135.0, &[5, 5, 5, 5, 5], 5)]);
    let config = PlanExerciseConfig::new(5, 5).with_increment(5.0);

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();

    assert_eq!(suggestion.weight, 140.0);
    assert_eq!(suggestion.reason, SuggestionReason::Increment);
}

#[test]
fn test_single_miss_after_pass_retries() {
    let history = history(vec![
        workout("w1", 1, 130.0, &[5, 5, 5], 5),
        workout("w2", 3, 135.0, &[5, 5, 3], 5),
    ]);
    let config = PlanExerciseConfig::new(3, 5).with_deload(10.0, 3);

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();

    assert_eq!(suggestion.weight, 135.0);
    assert_eq!(suggestion.reason, SuggestionReason::Retry);
}

#[test]
fn test_consecutive_misses_deload() {
    let history = history(vec![
        workout("w1", 1, 200.0, &[5, 5, 4], 5),
        workout("w2", 3, 200.0, &[5, 4, 4], 5),
        workout("w3", 5, 200.0, &[5, 3, 3], 5),
    ]);
    let config = PlanExerciseConfig::new(3, 5).with_deload(10.0, 3);

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();

    assert_eq!(suggestion.weight, 180.0);
    assert_eq!(suggestion.reason, SuggestionReason::Deload);
}

#[test]
fn test_deload_rounds_to_unit_step() {
    // 137.5 × 0.9 = 123.75
    let lb_history = history(vec![
        workout("w1", 1, 137.5, &[3], 5),
        workout("w2", 2, 137.5, &[3], 5),
    ]);
    let config = PlanExerciseConfig::new(1, 5).with_deload(10.0, 2);

    let lb = suggest_next_weight(&lb_history, "squat", &config, WeightUnit::Lb).unwrap();
    assert_eq!(lb.weight, 125.0);

    let kg = suggest_next_weight(&lb_history, "squat", &config, WeightUnit::Kg).unwrap();
    assert_eq!(kg.weight, 125.0);

    // 61 × 0.9 = 54.9
    let kg_history = history(vec![
        workout("w1", 1, 61.0, &[3], 5),
        workout("w2", 2, 61.0, &[3], 5),
    ]);
    let kg = suggest_next_weight(&kg_history, "squat", &config, WeightUnit::Kg).unwrap();
    assert_eq!(kg.weight, 55.0);
}

#[test]
fn test_pass_resets_failure_streak() {
    // Two misses, a pass, then a miss: only one consecutive miss.
    let history = history(vec![
        workout("w1", 1, 100.0, &[3, 3], 5),
        workout("w2", 2, 100.0, &[3, 3], 5),
        workout("w3", 3, 100.0, &[5, 5], 5),
        workout("w4", 4, 105.0, &[5, 2], 5),
    ]);
    let config = PlanExerciseConfig::new(2, 5).with_deload(10.0, 2);

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();
    assert_eq!(suggestion.reason, SuggestionReason::Retry);
    assert_eq!(suggestion.weight, 105.0);
}

#[test]
fn test_zero_config_values_fall_back_to_defaults() {
    let passed = history(vec![workout("w1", 1, 100.0, &[5, 5, 5], 5)]);
    let zero_increment = PlanExerciseConfig::new(3, 5).with_increment(0.0);

    let suggestion = suggest_next_weight(&passed, "squat", &zero_increment, WeightUnit::Lb).unwrap();
    assert_eq!(suggestion.weight, 105.0);
    assert_eq!(suggestion.reason, SuggestionReason::Increment);

    let failed = history(vec![
        workout("w1", 1, 100.0, &[2], 5),
        workout("w2", 2, 100.0, &[2], 5),
        workout("w3", 3, 100.0, &[2], 5),
    ]);
    let zero_deload = PlanExerciseConfig::new(1, 5).with_deload(0.0, 0);

    let suggestion = suggest_next_weight(&failed, "squat", &zero_deload, WeightUnit::Lb).unwrap();
    assert_eq!(suggestion.weight, 90.0);
    assert_eq!(suggestion.reason, SuggestionReason::Deload);
}

#[test]
fn test_missing_set_count_uses_last_session() {
    // Four sets last time, all completed: target defaults to four.
    let history = history(vec![workout("w1", 1, 95.0, &[5, 5, 5, 5], 5)]);
    let config = PlanExerciseConfig {
        reps: Some(5),
        ..Default::default()
    };

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();
    assert_eq!(suggestion.weight, 100.0);
    assert_eq!(suggestion.reason, SuggestionReason::Increment);
}

#[test]
fn test_fewer_sets_than_target_is_a_miss() {
    let history = history(vec![workout("w1", 1, 95.0, &[5, 5], 5)]);
    let config = PlanExerciseConfig::new(3, 5);

    let suggestion = suggest_next_weight(&history, "squat", &config, WeightUnit::Lb).unwrap();
    assert_eq!(suggestion.reason, SuggestionReason::Retry);
}

#[test]
fn test_custom_defaults_fill_unset_fields() {
    let advisor = ProgressionAdvisor::with_defaults(ProgressionDefaults {
        increment: 2.5,
        reps: 3,
        deload_percent: 20.0,
        deload_after: 1,
    });
    let config = PlanExerciseConfig::default();

    let passed = advisor.suggest_from_sets(workout("w1", 1, 60.0, &[3, 3], 3), &config, WeightUnit::Kg);
    assert_eq!(passed.weight, 62.5);
    assert_eq!(passed.reason, SuggestionReason::Increment);

    let missed = advisor.suggest_from_sets(workout("w1", 1, 60.0, &[3, 2], 3), &config, WeightUnit::Kg);
    assert_eq!(missed.weight, 47.5);
    assert_eq!(missed.reason, SuggestionReason::Deload);
}

#[test]
fn test_round_to_nearest() {
    assert_eq!(round_to_nearest(123.75, 5.0), 125.0);
    assert_eq!(round_to_nearest(122.4, 5.0), 120.0);
    assert_eq!(round_to_nearest(56.2, 2.5), 55.0);
    assert_eq!(round_to_nearest(42.0, 0.0), 42.0);
}
