//! Per-workout history summaries for one exercise.

use serde::{Deserialize, Serialize};

use crate::history::grouping::{group_by_workout, WorkoutGroup};
use crate::history::types::{HistoryError, HistorySource, SetRecord};

/// One workout's performance on an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Workout the summary describes
    pub workout_id: String,
    /// Timestamp of the best set
    pub date: String,
    /// Weight of the best (heaviest) set
    pub weight: f64,
    /// Reps of the best set
    pub reps: u32,
    /// Σ weight × reps over every set in the workout
    pub volume: f64,
    /// First non-empty note among the workout's sets
    pub notes: String,
}

impl WorkoutSummary {
    fn from_group(group: &WorkoutGroup) -> Option<Self> {
        // Ties go to the later set.
        let best = group
            .sets
            .iter()
            .reduce(|best, s| if s.weight >= best.weight { s } else { best })?;

        let notes = group
            .sets
            .iter()
            .find_map(SetRecord::note)
            .unwrap_or_default()
            .to_string();

        Some(Self {
            workout_id: group.workout_id.clone(),
            date: best.created_at.clone(),
            weight: best.weight,
            reps: best.reps,
            volume: group.volume(),
            notes,
        })
    }
}

/// Summarize sets per workout, ascending by date.
pub fn summarize_workouts(sets: Vec<SetRecord>) -> Vec<WorkoutSummary> {
    let mut summaries: Vec<WorkoutSummary> = group_by_workout(sets)
        .iter()
        .filter_map(WorkoutSummary::from_group)
        .collect();

    summaries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.workout_id.cmp(&b.workout_id))
    });

    summaries
}

/// Load an exercise's history as per-workout summaries, oldest first.
pub fn get_exercise_history<H: HistorySource + ?Sized>(
    history: &H,
    exercise_id: &str,
) -> Result<Vec<WorkoutSummary>, HistoryError> {
    let sets = history.fetch_sets_for_exercise(exercise_id)?;
    let summaries = summarize_workouts(sets);
    tracing::debug!(exercise_id, workouts = summaries.len(), "Built exercise history");
    Ok(summaries)
}
