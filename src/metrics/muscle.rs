//! Training distribution across muscle groups.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::history::types::SetRecord;
use crate::workouts::types::Exercise;

/// Group used for exercises without a muscle group.
pub const OTHER_MUSCLE_GROUP: &str = "Other";

/// Completed work for one muscle group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupStats {
    pub muscle_group: String,
    pub sets: usize,
    pub volume: f64,
    /// Distinct exercise names, sorted
    pub exercises: Vec<String>,
}

/// Completed sets per muscle group, most sets first.
///
/// Sets whose exercise is not in `exercises` are skipped.
pub fn muscle_group_breakdown(sets: &[SetRecord], exercises: &[Exercise]) -> Vec<MuscleGroupStats> {
    let by_id: HashMap<&str, &Exercise> = exercises.iter().map(|e| (e.id.as_str(), e)).collect();
    let mut groups: HashMap<String, (usize, f64, BTreeSet<String>)> = HashMap::new();

    for set in sets.iter().filter(|s| s.completed) {
        let Some(exercise) = by_id.get(set.exercise_id.as_str()) else {
            tracing::debug!("Skipping set for unknown exercise {}", set.exercise_id);
            continue;
        };

        let muscle_group = exercise
            .muscle_group
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .unwrap_or(OTHER_MUSCLE_GROUP);

        let entry = groups.entry(muscle_group.to_string()).or_default();
        entry.0 += 1;
        entry.1 += set.volume();
        entry.2.insert(exercise.name.clone());
    }

    let mut stats: Vec<MuscleGroupStats> = groups
        .into_iter()
        .map(|(muscle_group, (sets, volume, names))| MuscleGroupStats {
            muscle_group,
            sets,
            volume,
            exercises: names.into_iter().collect(),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.sets
            .cmp(&a.sets)
            .then_with(|| a.muscle_group.cmp(&b.muscle_group))
    });
    stats
}
