//! Training analytics: estimated maxes, records, progress series and muscle balance.

pub mod muscle;
pub mod records;
pub mod series;

pub use muscle::{muscle_group_breakdown, MuscleGroupStats, OTHER_MUSCLE_GROUP};
pub use records::{estimate_one_rep_max, ExerciseRecords};
pub use series::{metric_series, MetricKind, SeriesPoint};
