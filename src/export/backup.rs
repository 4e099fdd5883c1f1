//! Full JSON backup and restore of the training log.
//!
//! A backup holds every live record by store. Import runs in one
//! transaction: either the whole document lands or nothing changes.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::export::write_export;
use crate::history::types::SetRecord;
use crate::plans::{Plan, PlanError, PlanManager};
use crate::storage::database::{self, Database, DatabaseError, OnConflict};
use crate::storage::schema::CURRENT_VERSION;
use crate::workouts::types::{Exercise, WorkoutRecord};

/// A complete backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    /// Schema version of the database that wrote the backup
    #[serde(default)]
    pub version: i32,
    /// RFC 3339 export timestamp
    #[serde(default)]
    pub exported_at: String,
    pub stores: BackupStores,
}

/// Records by store. A store absent from the document is left alone on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupStores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<Plan>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workouts: Option<Vec<WorkoutRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Vec<SetRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<BackupSetting>>,
}

/// One key-value setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSetting {
    pub key: String,
    pub value: serde_json::Value,
}

/// Records written by an import, per store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub exercises: usize,
    pub plans: usize,
    pub workouts: usize,
    pub sets: usize,
    pub settings: usize,
}

/// Read every live record into a backup document.
pub fn export_backup(db: &mut Database) -> Result<Backup, BackupError> {
    let tx = db.transaction()?;

    let settings = database::select_settings(&tx)?
        .into_iter()
        .map(|(key, json)| {
            let value = serde_json::from_str(&json).map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid setting {}: {}", key, e))
            })?;
            Ok(BackupSetting { key, value })
        })
        .collect::<Result<Vec<_>, DatabaseError>>()?;

    let stores = BackupStores {
        exercises: Some(database::select_exercises(&tx)?),
        plans: Some(PlanManager::new(&tx).list()?),
        workouts: Some(database::select_workouts(&tx)?),
        sets: Some(database::select_sets(&tx)?),
        settings: Some(settings),
    };

    tx.commit()
        .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

    Ok(Backup {
        version: CURRENT_VERSION,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        stores,
    })
}

/// Restore a backup.
///
/// Without `merge`, every store present in the backup is emptied first.
/// With `merge`, existing records stay and records sharing an id are replaced.
pub fn import_backup(
    db: &mut Database,
    backup: &Backup,
    merge: bool,
) -> Result<ImportSummary, BackupError> {
    if backup.version > CURRENT_VERSION {
        tracing::warn!(
            "Backup written by schema version {}, this build knows {}",
            backup.version,
            CURRENT_VERSION
        );
    }

    let stores = &backup.stores;
    let mut summary = ImportSummary::default();
    let tx = db.transaction()?;

    if !merge {
        // Sets before workouts: sets reference workouts
        let tables = [
            ("sets", stores.sets.is_some()),
            ("workouts", stores.workouts.is_some()),
            ("plans", stores.plans.is_some()),
            ("exercises", stores.exercises.is_some()),
            ("settings", stores.settings.is_some()),
        ];
        for (table, present) in tables {
            if present {
                database::clear_table(&tx, table)?;
            }
        }
    }

    if let Some(exercises) = &stores.exercises {
        for exercise in exercises {
            database::upsert_exercise_row(&tx, exercise)?;
        }
        summary.exercises = exercises.len();
    }

    if let Some(plans) = &stores.plans {
        let manager = PlanManager::new(&tx);
        for plan in plans {
            manager.put(plan)?;
        }
        summary.plans = plans.len();
    }

    if let Some(workouts) = &stores.workouts {
        for workout in workouts {
            database::insert_workout_row(&tx, workout, OnConflict::Replace)?;
        }
        summary.workouts = workouts.len();
    }

    if let Some(sets) = &stores.sets {
        for set in sets {
            database::insert_set_row(&tx, set, OnConflict::Replace)?;
        }
        summary.sets = sets.len();
    }

    if let Some(settings) = &stores.settings {
        for setting in settings {
            database::put_setting_row(&tx, &setting.key, &serde_json::to_string(&setting.value)?)?;
        }
        summary.settings = settings.len();
    }

    tx.commit()
        .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

    tracing::info!(
        "Imported {} workouts and {} sets ({})",
        summary.workouts,
        summary.sets,
        if merge { "merged" } else { "replaced" }
    );
    Ok(summary)
}

/// Parse a backup document. The `stores` object is required.
pub fn parse_backup(text: &str) -> Result<Backup, BackupError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| BackupError::Invalid(e.to_string()))?;

    if !value.get("stores").is_some_and(|s| s.is_object()) {
        return Err(BackupError::Invalid("missing stores".to_string()));
    }

    serde_json::from_value(value).map_err(|e| BackupError::Invalid(e.to_string()))
}

/// Read and parse a backup file.
pub fn read_backup(path: &Path) -> Result<Backup, BackupError> {
    let text = std::fs::read_to_string(path).map_err(|e| BackupError::Io(e.to_string()))?;
    parse_backup(&text)
}

/// Write a backup as pretty-printed JSON.
pub fn write_backup(path: &Path, backup: &Backup) -> Result<(), BackupError> {
    let json = serde_json::to_string_pretty(backup)?;
    write_export(path, &json).map_err(|e| BackupError::Io(e.to_string()))
}

/// Backup and restore errors.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Invalid backup file: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),
}
