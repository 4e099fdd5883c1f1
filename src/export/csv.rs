//! CSV export of logged sets.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::export::ExportError;
use crate::history::types::SetRecord;
use crate::workouts::types::{Exercise, WorkoutRecord};

/// Export every set of the given workouts, one row per set.
///
/// Rows follow workout order, then set number. Exercises missing from
/// `exercises` are written by id.
pub fn export_sets_csv(
    workouts: &[WorkoutRecord],
    sets: &[SetRecord],
    exercises: &[Exercise],
) -> Result<String, ExportError> {
    let names: HashMap<&str, &str> = exercises
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();

    let mut by_workout: HashMap<&str, Vec<&SetRecord>> = HashMap::new();
    for set in sets {
        by_workout.entry(set.workout_id.as_str()).or_default().push(set);
    }

    let mut output = Vec::new();
    let mut rows = 0usize;

    writeln!(output, "date,exercise,set,weight,reps,rpe,completed")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for workout in workouts {
        let Some(workout_sets) = by_workout.get_mut(workout.id.as_str()) else {
            continue;
        };
        workout_sets.sort_by_key(|s| s.set_number);

        for set in workout_sets.iter() {
            let exercise = names
                .get(set.exercise_id.as_str())
                .copied()
                .unwrap_or(set.exercise_id.as_str());

            writeln!(
                output,
                "{},{},{},{},{},{},{}",
                workout.date,
                escape_field(exercise),
                set.set_number,
                set.weight,
                set.reps,
                set.rpe.map_or(String::new(), |v| v.to_string()),
                if set.completed { "yes" } else { "no" },
            )
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
            rows += 1;
        }
    }

    if rows == 0 {
        return Err(ExportError::NoData);
    }

    tracing::debug!("Exported {} sets from {} workouts", rows, workouts.len());
    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Write exported content to a file.
pub fn write_export(path: &Path, content: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::Io(e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| ExportError::Io(e.to_string()))
}

/// Quote a field containing a comma, quote or newline.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
