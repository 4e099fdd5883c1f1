//! Progression advisor.
//!
//! A streak-based linear progression loop: add weight after a session that hit
//! every target set, hold after an isolated miss, and deload once the run of
//! consecutive missed sessions reaches the plan's threshold.

use crate::history::grouping::{most_recent_first, WorkoutGroup};
use crate::history::types::{HistoryError, HistorySource, SetRecord};
use crate::progression::types::{
    PlanExerciseConfig, ProgressionDefaults, Suggestion, SuggestionReason, DEFAULT_DELOAD_AFTER,
    DEFAULT_DELOAD_PERCENT, DEFAULT_INCREMENT, DEFAULT_TARGET_REPS,
};
use crate::storage::config::WeightUnit;

/// Suggests the next training weight from an exercise's history.
#[derive(Debug, Clone, Default)]
pub struct ProgressionAdvisor {
    defaults: ProgressionDefaults,
}

impl ProgressionAdvisor {
    /// Create an advisor with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an advisor with custom defaults.
    pub fn with_defaults(defaults: ProgressionDefaults) -> Self {
        Self { defaults }
    }

    /// Defaults used for unset plan fields.
    pub fn defaults(&self) -> &ProgressionDefaults {
        &self.defaults
    }

    /// Fetch an exercise's history and suggest the next weight.
    pub fn suggest<H: HistorySource + ?Sized>(
        &self,
        history: &H,
        exercise_id: &str,
        config: &PlanExerciseConfig,
        unit: WeightUnit,
    ) -> Result<Suggestion, HistoryError> {
        let sets = history.fetch_sets_for_exercise(exercise_id)?;
        let suggestion = self.suggest_from_sets(sets, config, unit);

        tracing::debug!(
            exercise_id,
            weight = suggestion.weight,
            reason = %suggestion.reason,
            "Suggested next weight"
        );

        Ok(suggestion)
    }

    /// Suggest the next weight from an exercise's sets (any order).
    pub fn suggest_from_sets(
        &self,
        sets: Vec<SetRecord>,
        config: &PlanExerciseConfig,
        unit: WeightUnit,
    ) -> Suggestion {
        if sets.is_empty() {
            return Suggestion::first_time();
        }

        let workouts = most_recent_first(sets);
        let Some(last) = workouts.first() else {
            return Suggestion::first_time();
        };

        let last_weight = last.max_weight();
        let target_sets = config
            .sets
            .filter(|&n| n > 0)
            .map_or(last.len(), |n| n as usize);
        let target_reps = config
            .reps
            .filter(|&n| n > 0)
            .or(Some(self.defaults.reps).filter(|&n| n > 0))
            .unwrap_or(DEFAULT_TARGET_REPS);

        if last.meets_target(target_sets, target_reps) {
            let increment = nonzero(config.increment)
                .or(nonzero(Some(self.defaults.increment)))
                .unwrap_or(DEFAULT_INCREMENT);
            return Suggestion {
                weight: last_weight + increment,
                reason: SuggestionReason::Increment,
            };
        }

        let failures = consecutive_failures(&workouts, target_sets, target_reps);
        let deload_after = config
            .deload_after
            .filter(|&n| n > 0)
            .or(Some(self.defaults.deload_after).filter(|&n| n > 0))
            .unwrap_or(DEFAULT_DELOAD_AFTER);

        if failures >= deload_after as usize {
            let percent = nonzero(config.deload_percent)
                .or(nonzero(Some(self.defaults.deload_percent)))
                .unwrap_or(DEFAULT_DELOAD_PERCENT);
            let weight = round_to_nearest(
                last_weight * (1.0 - percent / 100.0),
                unit.deload_rounding(),
            );
            tracing::info!(failures, weight, "Deload triggered");
            return Suggestion {
                weight,
                reason: SuggestionReason::Deload,
            };
        }

        Suggestion {
            weight: last_weight,
            reason: SuggestionReason::Retry,
        }
    }
}

/// Count the most recent run of sessions that missed their target.
fn consecutive_failures(workouts: &[WorkoutGroup], target_sets: usize, target_reps: u32) -> usize {
    workouts
        .iter()
        .take_while(|w| !w.meets_target(target_sets, target_reps))
        .count()
}

/// A configured amount, treating zero as unset.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Round to the nearest multiple of `nearest`, halves away from zero.
pub fn round_to_nearest(value: f64, nearest: f64) -> f64 {
    if nearest <= 0.0 {
        return value;
    }
    (value / nearest).round() * nearest
}

/// Suggest the next weight using the built-in defaults.
pub fn suggest_next_weight<H: HistorySource + ?Sized>(
    history: &H,
    exercise_id: &str,
    config: &PlanExerciseConfig,
    unit: WeightUnit,
) -> Result<Suggestion, HistoryError> {
    ProgressionAdvisor::new().suggest(history, exercise_id, config, unit)
}
