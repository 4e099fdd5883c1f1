//! Progression types: plan configuration, defaults, and suggestions.

use serde::{Deserialize, Serialize};

/// Weight added after a successful session when the plan does not say.
pub const DEFAULT_INCREMENT: f64 = 5.0;
/// Target reps per set when the plan does not say.
pub const DEFAULT_TARGET_REPS: u32 = 5;
/// Percent removed on deload when the plan does not say.
pub const DEFAULT_DELOAD_PERCENT: f64 = 10.0;
/// Consecutive failed sessions before a deload when the plan does not say.
pub const DEFAULT_DELOAD_AFTER: u32 = 3;

/// Per-exercise plan configuration. Every field is optional; zero counts as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanExerciseConfig {
    /// Target sets; falls back to the number of sets performed last time
    pub sets: Option<u32>,
    /// Target reps per set
    pub reps: Option<u32>,
    /// Weight added on success
    pub increment: Option<f64>,
    /// Percent removed on deload
    pub deload_percent: Option<f64>,
    /// Consecutive failed sessions that trigger a deload
    pub deload_after: Option<u32>,
}

impl PlanExerciseConfig {
    /// Create a config with target sets and reps.
    pub fn new(sets: u32, reps: u32) -> Self {
        Self {
            sets: Some(sets),
            reps: Some(reps),
            ..Default::default()
        }
    }

    /// Set the success increment.
    pub fn with_increment(mut self, increment: f64) -> Self {
        self.increment = Some(increment);
        self
    }

    /// Set the deload policy.
    pub fn with_deload(mut self, percent: f64, after: u32) -> Self {
        self.deload_percent = Some(percent);
        self.deload_after = Some(after);
        self
    }

    /// Fill unset fields from another config.
    pub fn or(self, fallback: PlanExerciseConfig) -> Self {
        Self {
            sets: self.sets.or(fallback.sets),
            reps: self.reps.or(fallback.reps),
            increment: self.increment.or(fallback.increment),
            deload_percent: self.deload_percent.or(fallback.deload_percent),
            deload_after: self.deload_after.or(fallback.deload_after),
        }
    }
}

/// Defaults applied where a plan config leaves a field unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionDefaults {
    pub increment: f64,
    pub reps: u32,
    pub deload_percent: f64,
    pub deload_after: u32,
}

impl Default for ProgressionDefaults {
    fn default() -> Self {
        Self {
            increment: DEFAULT_INCREMENT,
            reps: DEFAULT_TARGET_REPS,
            deload_percent: DEFAULT_DELOAD_PERCENT,
            deload_after: DEFAULT_DELOAD_AFTER,
        }
    }
}

/// Why a weight was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionReason {
    /// No history; the lifter picks their own starting weight
    FirstTime,
    /// Last session hit its target
    Increment,
    /// Last session missed, below the deload threshold
    Retry,
    /// Too many consecutive misses
    Deload,
}

impl std::fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionReason::FirstTime => write!(f, "first-time"),
            SuggestionReason::Increment => write!(f, "increment"),
            SuggestionReason::Retry => write!(f, "retry"),
            SuggestionReason::Deload => write!(f, "deload"),
        }
    }
}

/// The advisor's output for the next session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub weight: f64,
    pub reason: SuggestionReason,
}

impl Suggestion {
    /// The suggestion for an exercise with no history.
    pub fn first_time() -> Self {
        Self {
            weight: 0.0,
            reason: SuggestionReason::FirstTime,
        }
    }
}
