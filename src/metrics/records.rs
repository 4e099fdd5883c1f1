//! Estimated one-rep max and personal records.

use serde::{Deserialize, Serialize};

use crate::history::types::SetRecord;

/// Estimate a one-rep max with the Epley formula.
///
/// Zero weight or reps give 0; a single rep is its own max.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

/// Best marks for one exercise across its completed sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecords {
    pub max_weight: f64,
    pub best_one_rep_max: f64,
    /// Largest weight × reps in a single set
    pub best_set_volume: f64,
    pub max_reps: u32,
    pub completed_sets: usize,
}

impl ExerciseRecords {
    /// Records over completed sets. `None` when nothing was completed.
    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a SetRecord>) -> Option<Self> {
        sets.into_iter()
            .filter(|s| s.completed)
            .fold(None, |records: Option<Self>, set| {
                let mut r = records.unwrap_or(Self {
                    max_weight: 0.0,
                    best_one_rep_max: 0.0,
                    best_set_volume: 0.0,
                    max_reps: 0,
                    completed_sets: 0,
                });
                r.max_weight = r.max_weight.max(set.weight);
                r.best_one_rep_max = r
                    .best_one_rep_max
                    .max(estimate_one_rep_max(set.weight, set.reps));
                r.best_set_volume = r.best_set_volume.max(set.volume());
                r.max_reps = r.max_reps.max(set.reps);
                r.completed_sets += 1;
                Some(r)
            })
    }
}
