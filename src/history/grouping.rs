//! Grouping of sets into workout sessions.
//!
//! Workouts are ordered by their session timestamp, the earliest `created_at`
//! among the group's sets, compared as strings. Equal timestamps fall back to
//! `workout_id` so the order never depends on how the source returned rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::history::types::SetRecord;

/// All sets of one exercise performed within a single workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutGroup {
    /// Owning workout
    pub workout_id: String,
    /// Session timestamp used for ordering
    pub started_at: String,
    /// Sets ordered by set number
    pub sets: Vec<SetRecord>,
}

impl WorkoutGroup {
    fn new(first: SetRecord) -> Self {
        Self {
            workout_id: first.workout_id.clone(),
            started_at: first.created_at.clone(),
            sets: vec![first],
        }
    }

    fn push(&mut self, set: SetRecord) {
        if set.created_at < self.started_at {
            self.started_at = set.created_at.clone();
        }
        self.sets.push(set);
    }

    /// Heaviest weight attempted, completed or not.
    pub fn max_weight(&self) -> f64 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f64::max)
    }

    /// Number of sets that were completed with at least `target_reps`.
    pub fn passing_sets(&self, target_reps: u32) -> usize {
        self.sets.iter().filter(|s| s.meets_target(target_reps)).count()
    }

    /// Whether the session hit its target.
    pub fn meets_target(&self, target_sets: usize, target_reps: u32) -> bool {
        self.passing_sets(target_reps) >= target_sets
    }

    /// Total load moved across all sets.
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(SetRecord::volume).sum()
    }

    /// Sets that were marked completed.
    pub fn completed_sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.sets.iter().filter(|s| s.completed)
    }

    /// Number of sets in the session.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the group holds no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Group sets by workout, in order of first appearance.
pub fn group_by_workout(sets: Vec<SetRecord>) -> Vec<WorkoutGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<WorkoutGroup> = Vec::new();

    for set in sets {
        match index.get(&set.workout_id) {
            Some(&i) => groups[i].push(set),
            None => {
                index.insert(set.workout_id.clone(), groups.len());
                groups.push(WorkoutGroup::new(set));
            }
        }
    }

    for group in &mut groups {
        group.sets.sort_by_key(|s| s.set_number);
    }

    groups
}

fn chronological(a: &WorkoutGroup, b: &WorkoutGroup) -> Ordering {
    a.started_at
        .cmp(&b.started_at)
        .then_with(|| a.workout_id.cmp(&b.workout_id))
}

/// Group sets by workout, newest workout first.
pub fn most_recent_first(sets: Vec<SetRecord>) -> Vec<WorkoutGroup> {
    let mut groups = group_by_workout(sets);
    groups.sort_by(|a, b| chronological(b, a));
    groups
}

/// Group sets by workout, oldest workout first.
pub fn oldest_first(sets: Vec<SetRecord>) -> Vec<WorkoutGroup> {
    let mut groups = group_by_workout(sets);
    groups.sort_by(chronological);
    groups
}
