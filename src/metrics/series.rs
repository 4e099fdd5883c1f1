//! Per-day progress series for charting an exercise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::history::types::SetRecord;
use crate::metrics::records::estimate_one_rep_max;

/// Value plotted for each training day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Best estimated one-rep max
    E1rm,
    /// Largest weight × reps in one set
    BestSet,
    /// Σ weight × reps
    Volume,
    /// Most reps in one set
    Reps,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::E1rm => write!(f, "Est. 1RM"),
            MetricKind::BestSet => write!(f, "Best Set"),
            MetricKind::Volume => write!(f, "Volume"),
            MetricKind::Reps => write!(f, "Max Reps"),
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e1rm" => Ok(MetricKind::E1rm),
            "best" | "best-set" => Ok(MetricKind::BestSet),
            "volume" => Ok(MetricKind::Volume),
            "reps" => Ok(MetricKind::Reps),
            other => Err(format!("Unknown metric: {}", other)),
        }
    }
}

/// One day's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Workouts that contributed to this point
    pub workouts: usize,
    pub value: f64,
}

/// Chart series over completed sets, one point per calendar day, oldest first.
///
/// Two workouts on the same day share a point. Days without a completed set
/// are left out.
pub fn metric_series(sets: Vec<SetRecord>, kind: MetricKind) -> Vec<SeriesPoint> {
    let mut by_day: BTreeMap<String, Vec<SetRecord>> = BTreeMap::new();
    for set in sets.into_iter().filter(|s| s.completed) {
        let day: String = set.created_at.chars().take(10).collect();
        by_day.entry(day).or_default().push(set);
    }

    by_day
        .into_iter()
        .map(|(date, sets)| {
            let value = match kind {
                MetricKind::E1rm => sets
                    .iter()
                    .map(|s| estimate_one_rep_max(s.weight, s.reps))
                    .fold(0.0, f64::max),
                MetricKind::BestSet => sets.iter().map(SetRecord::volume).fold(0.0, f64::max),
                MetricKind::Volume => sets.iter().map(SetRecord::volume).sum(),
                MetricKind::Reps => sets.iter().map(|s| s.reps).max().unwrap_or(0) as f64,
            };

            let mut workouts: Vec<&str> = sets.iter().map(|s| s.workout_id.as_str()).collect();
            workouts.sort_unstable();
            workouts.dedup();

            SeriesPoint {
                date,
                workouts: workouts.len(),
                value,
            }
        })
        .collect()
}
