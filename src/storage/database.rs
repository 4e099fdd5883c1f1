//! Database operations using rusqlite.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::history::types::{HistoryError, HistorySource, SetRecord};
use crate::plates::types::PlateInventory;
use crate::storage::config::{SettingsSource, TrainingSettings, WeightUnit};
use crate::storage::schema::{
    CURRENT_VERSION, MIGRATION_V1_TO_V2, MIGRATION_V2_TO_V3, SCHEMA, SCHEMA_VERSION_TABLE,
};
use crate::workouts::types::{Exercise, FinishedWorkout, WorkoutRecord};

/// Keys of the per-user settings table.
pub mod setting_keys {
    pub const UNIT: &str = "unit";
    pub const BAR_WEIGHT: &str = "bar_weight";
    pub const PLATE_INVENTORY: &str = "plate_inventory";
    pub const REST_TIMER: &str = "rest_timer";
    pub const INCREMENT: &str = "increment";
    pub const REPS: &str = "reps";
    pub const DELOAD_PERCENT: &str = "deload_percent";
    pub const DELOAD_AFTER: &str = "deload_after";
}

const SET_COLUMNS: &str =
    "id, workout_id, exercise_id, set_number, weight, reps, completed, rpe, notes, created_at";

const WORKOUT_COLUMNS: &str =
    "id, date, plan_id, plan_name, day_name, notes, duration_secs, exercise_count, created_at";

const EXERCISE_COLUMNS: &str =
    "id, name, muscle_group, category, equipment, instructions, media_url, is_custom, created_at";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.apply_migration(SCHEMA, 1)?;
        }

        if from_version < 2 {
            self.apply_migration(MIGRATION_V1_TO_V2, 2)?;
        }

        if from_version < 3 {
            self.apply_migration(MIGRATION_V2_TO_V3, 3)?;
        }

        tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        Ok(())
    }

    fn apply_migration(&self, sql: &str, version: i32) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [version],
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tracing::debug!("Applied schema version {}", version);
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> Result<rusqlite::Transaction<'_>, DatabaseError> {
        self.conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    // ========== Exercises ==========

    /// Insert or replace an exercise.
    pub fn upsert_exercise(&self, exercise: &Exercise) -> Result<(), DatabaseError> {
        upsert_exercise_row(&self.conn, exercise)
    }

    /// Get an exercise by ID.
    pub fn get_exercise(&self, id: &str) -> Result<Option<Exercise>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM exercises WHERE id = ?1 AND deleted = 0",
            EXERCISE_COLUMNS
        );

        let row = self
            .conn
            .query_row(&sql, params![id], ExerciseRow::from_row)
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(ExerciseRow::into_exercise).transpose()
    }

    /// List live exercises by name.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>, DatabaseError> {
        select_exercises(&self.conn)
    }

    /// Soft-delete an exercise. Its logged sets are kept.
    pub fn delete_exercise(&self, id: &str) -> Result<(), DatabaseError> {
        self.soft_delete("exercises", id)
    }

    // ========== Workouts and sets ==========

    /// Store a finished workout and all of its sets in one transaction.
    pub fn save_finished_workout(&mut self, finished: &FinishedWorkout) -> Result<(), DatabaseError> {
        let tx = self.transaction()?;

        insert_workout_row(&tx, &finished.workout, OnConflict::Abort)?;
        for set in &finished.sets {
            insert_set_row(&tx, set, OnConflict::Abort)?;
        }

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(
            "Saved workout {} with {} sets",
            finished.workout.id,
            finished.sets.len()
        );
        Ok(())
    }

    /// Insert a workout record.
    pub fn insert_workout(&self, workout: &WorkoutRecord) -> Result<(), DatabaseError> {
        insert_workout_row(&self.conn, workout, OnConflict::Abort)
    }

    /// Insert sets one by one.
    pub fn insert_sets(&self, sets: &[SetRecord]) -> Result<(), DatabaseError> {
        for set in sets {
            insert_set_row(&self.conn, set, OnConflict::Abort)?;
        }
        Ok(())
    }

    /// Get a workout by ID.
    pub fn get_workout(&self, id: &str) -> Result<Option<WorkoutRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM workouts WHERE id = ?1 AND deleted = 0",
            WORKOUT_COLUMNS
        );

        let row = self
            .conn
            .query_row(&sql, params![id], WorkoutRow::from_row)
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(WorkoutRow::into_workout).transpose()
    }

    /// List live workouts, most recent first.
    pub fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, DatabaseError> {
        select_workouts(&self.conn)
    }

    /// Soft-delete a workout and its sets.
    pub fn delete_workout(&mut self, id: &str) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let tx = self.transaction()?;

        let updated = tx
            .execute(
                "UPDATE workouts SET deleted = 1, updated_at = ?1 WHERE id = ?2 AND deleted = 0",
                params![now, id],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if updated == 0 {
            return Err(DatabaseError::NotFound(format!("Workout {}", id)));
        }

        tx.execute(
            "UPDATE sets SET deleted = 1, updated_at = ?1 WHERE workout_id = ?2",
            params![now, id],
        )
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Live sets of a workout by set number.
    pub fn get_sets_for_workout(&self, workout_id: &str) -> Result<Vec<SetRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM sets WHERE workout_id = ?1 AND deleted = 0 ORDER BY set_number ASC",
            SET_COLUMNS
        );
        query_rows(&self.conn, &sql, params![workout_id], set_from_row)
    }

    /// Live sets of an exercise, oldest first.
    pub fn get_sets_for_exercise(&self, exercise_id: &str) -> Result<Vec<SetRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM sets WHERE exercise_id = ?1 AND deleted = 0
             ORDER BY created_at ASC, workout_id ASC, set_number ASC",
            SET_COLUMNS
        );
        query_rows(&self.conn, &sql, params![exercise_id], set_from_row)
    }

    /// All live sets, oldest first.
    pub fn list_sets(&self) -> Result<Vec<SetRecord>, DatabaseError> {
        select_sets(&self.conn)
    }

    /// Soft-delete a single set.
    pub fn delete_set(&self, id: &str) -> Result<(), DatabaseError> {
        self.soft_delete("sets", id)
    }

    // ========== Settings ==========

    /// Read a JSON setting.
    pub fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DatabaseError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        value
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    DatabaseError::DeserializationError(format!("Invalid setting {}: {}", key, e))
                })
            })
            .transpose()
    }

    /// Write a JSON setting.
    pub fn set_setting<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(value)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        put_setting_row(&self.conn, key, &json)
    }

    /// Every stored setting as raw JSON text, by key.
    pub fn list_settings(&self) -> Result<Vec<(String, String)>, DatabaseError> {
        select_settings(&self.conn)
    }

    /// Apply stored per-user overrides on top of base settings.
    pub fn apply_setting_overrides(
        &self,
        base: TrainingSettings,
    ) -> Result<TrainingSettings, DatabaseError> {
        let mut settings = base;

        if let Some(unit) = self.get_setting::<WeightUnit>(setting_keys::UNIT)? {
            settings.unit = unit;
        }
        if let Some(bar) = self.get_setting::<f64>(setting_keys::BAR_WEIGHT)? {
            settings.bar_weight = Some(bar);
        }
        if let Some(plates) = self.get_setting::<PlateInventory>(setting_keys::PLATE_INVENTORY)? {
            settings.plates = Some(plates);
        }
        if let Some(rest) = self.get_setting::<u32>(setting_keys::REST_TIMER)? {
            settings.rest_timer_secs = rest;
        }
        if let Some(increment) = self.get_setting::<f64>(setting_keys::INCREMENT)? {
            settings.increment = increment;
        }
        if let Some(reps) = self.get_setting::<u32>(setting_keys::REPS)? {
            settings.reps = reps;
        }
        if let Some(percent) = self.get_setting::<f64>(setting_keys::DELOAD_PERCENT)? {
            settings.deload_percent = percent;
        }
        if let Some(after) = self.get_setting::<u32>(setting_keys::DELOAD_AFTER)? {
            settings.deload_after = after;
        }

        Ok(settings)
    }

    /// Store every training setting as a per-user override.
    pub fn save_training_settings(&self, settings: &TrainingSettings) -> Result<(), DatabaseError> {
        self.set_setting(setting_keys::UNIT, &settings.unit)?;
        if let Some(bar) = settings.bar_weight {
            self.set_setting(setting_keys::BAR_WEIGHT, &bar)?;
        }
        if let Some(plates) = &settings.plates {
            self.set_setting(setting_keys::PLATE_INVENTORY, plates)?;
        }
        self.set_setting(setting_keys::REST_TIMER, &settings.rest_timer_secs)?;
        self.set_setting(setting_keys::INCREMENT, &settings.increment)?;
        self.set_setting(setting_keys::REPS, &settings.reps)?;
        self.set_setting(setting_keys::DELOAD_PERCENT, &settings.deload_percent)?;
        self.set_setting(setting_keys::DELOAD_AFTER, &settings.deload_after)?;
        Ok(())
    }

    // ========== Helpers ==========

    fn soft_delete(&self, table: &str, id: &str) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} SET deleted = 1, updated_at = ?1 WHERE id = ?2 AND deleted = 0",
            table
        );

        let updated = self
            .conn
            .execute(&sql, params![Utc::now().to_rfc3339(), id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if updated == 0 {
            return Err(DatabaseError::NotFound(format!("{} {}", table, id)));
        }

        Ok(())
    }
}

impl HistorySource for Database {
    fn fetch_sets_for_exercise(&self, exercise_id: &str) -> Result<Vec<SetRecord>, HistoryError> {
        Ok(self.get_sets_for_exercise(exercise_id)?)
    }
}

impl SettingsSource for Database {
    fn training_settings(&self) -> TrainingSettings {
        self.apply_setting_overrides(TrainingSettings::default())
            .unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored settings: {}", e);
                TrainingSettings::default()
            })
    }
}

/// What a row write does when the id already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnConflict {
    Abort,
    Replace,
}

impl OnConflict {
    fn verb(self) -> &'static str {
        match self {
            OnConflict::Abort => "INSERT",
            OnConflict::Replace => "INSERT OR REPLACE",
        }
    }
}

fn query_rows<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>, DatabaseError>
where
    P: rusqlite::Params,
    F: FnMut(&rusqlite::Row<'_>) -> SqliteResult<T>,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    let rows = stmt
        .query_map(params, map)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
}

pub(crate) fn select_exercises(conn: &Connection) -> Result<Vec<Exercise>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM exercises WHERE deleted = 0 ORDER BY name COLLATE NOCASE ASC",
        EXERCISE_COLUMNS
    );

    query_rows(conn, &sql, [], ExerciseRow::from_row)?
        .into_iter()
        .map(ExerciseRow::into_exercise)
        .collect()
}

pub(crate) fn select_workouts(conn: &Connection) -> Result<Vec<WorkoutRecord>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM workouts WHERE deleted = 0 ORDER BY date DESC, created_at DESC",
        WORKOUT_COLUMNS
    );

    query_rows(conn, &sql, [], WorkoutRow::from_row)?
        .into_iter()
        .map(WorkoutRow::into_workout)
        .collect()
}

pub(crate) fn select_sets(conn: &Connection) -> Result<Vec<SetRecord>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM sets WHERE deleted = 0
         ORDER BY created_at ASC, workout_id ASC, set_number ASC",
        SET_COLUMNS
    );
    query_rows(conn, &sql, [], set_from_row)
}

pub(crate) fn select_settings(conn: &Connection) -> Result<Vec<(String, String)>, DatabaseError> {
    query_rows(
        conn,
        "SELECT key, value FROM settings ORDER BY key ASC",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
}

/// Hard-delete every row of a table.
pub(crate) fn clear_table(conn: &Connection, table: &str) -> Result<(), DatabaseError> {
    conn.execute(&format!("DELETE FROM {}", table), [])
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
    Ok(())
}

pub(crate) fn upsert_exercise_row(conn: &Connection, exercise: &Exercise) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO exercises
         (id, name, muscle_group, category, equipment, instructions, media_url,
          is_custom, created_at, updated_at, deleted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0)
         ON CONFLICT(id) DO UPDATE SET
          name = excluded.name, muscle_group = excluded.muscle_group,
          category = excluded.category, equipment = excluded.equipment,
          instructions = excluded.instructions, media_url = excluded.media_url,
          is_custom = excluded.is_custom, updated_at = excluded.updated_at,
          deleted = 0",
        params![
            exercise.id,
            exercise.name,
            exercise.muscle_group,
            exercise.category,
            exercise.equipment,
            exercise.instructions,
            exercise.media_url,
            exercise.is_custom,
            exercise.created_at.to_rfc3339(),
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

/// Write a setting whose value is already JSON text.
pub(crate) fn put_setting_row(conn: &Connection, key: &str, json: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, json, Utc::now().to_rfc3339()],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

pub(crate) fn insert_workout_row(
    conn: &Connection,
    workout: &WorkoutRecord,
    on_conflict: OnConflict,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "{} INTO workouts
         (id, date, plan_id, plan_name, day_name, notes, duration_secs, exercise_count,
          created_at, updated_at, deleted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9, 0)",
        on_conflict.verb()
    );

    conn.execute(
        &sql,
        params![
            workout.id,
            workout.date,
            workout.plan_id.map(|id| id.to_string()),
            workout.plan_name,
            workout.day_name,
            workout.notes,
            workout.duration_secs as i64,
            workout.exercise_count,
            workout.created_at,
        ],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

pub(crate) fn insert_set_row(
    conn: &Connection,
    set: &SetRecord,
    on_conflict: OnConflict,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "{} INTO sets
         (id, workout_id, exercise_id, set_number, weight, reps, completed, rpe, notes,
          created_at, updated_at, deleted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10, 0)",
        on_conflict.verb()
    );

    conn.execute(
        &sql,
        params![
            set.id,
            set.workout_id,
            set.exercise_id,
            set.set_number,
            set.weight,
            set.reps,
            set.completed,
            set.rpe,
            set.notes,
            set.created_at,
        ],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

fn set_from_row(row: &rusqlite::Row<'_>) -> SqliteResult<SetRecord> {
    Ok(SetRecord {
        id: row.get(0)?,
        workout_id: row.get(1)?,
        exercise_id: row.get(2)?,
        set_number: row.get(3)?,
        weight: row.get(4)?,
        reps: row.get(5)?,
        completed: row.get(6)?,
        rpe: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Intermediate struct for reading workout rows from database.
struct WorkoutRow {
    id: String,
    date: String,
    plan_id: Option<String>,
    plan_name: Option<String>,
    day_name: Option<String>,
    notes: Option<String>,
    duration_secs: i64,
    exercise_count: u32,
    created_at: String,
}

impl WorkoutRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            plan_id: row.get(2)?,
            plan_name: row.get(3)?,
            day_name: row.get(4)?,
            notes: row.get(5)?,
            duration_secs: row.get(6)?,
            exercise_count: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn into_workout(self) -> Result<WorkoutRecord, DatabaseError> {
        let plan_id = self
            .plan_id
            .map(|id| {
                Uuid::parse_str(&id).map_err(|e| {
                    DatabaseError::DeserializationError(format!("Invalid plan UUID: {}", e))
                })
            })
            .transpose()?;

        Ok(WorkoutRecord {
            id: self.id,
            date: self.date,
            plan_id,
            plan_name: self.plan_name,
            day_name: self.day_name,
            notes: self.notes,
            duration_secs: self.duration_secs.max(0) as u64,
            exercise_count: self.exercise_count,
            created_at: self.created_at,
        })
    }
}

/// Intermediate struct for reading exercise rows from database.
struct ExerciseRow {
    id: String,
    name: String,
    muscle_group: Option<String>,
    category: Option<String>,
    equipment: Option<String>,
    instructions: Option<String>,
    media_url: Option<String>,
    is_custom: bool,
    created_at: String,
}

impl ExerciseRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            muscle_group: row.get(2)?,
            category: row.get(3)?,
            equipment: row.get(4)?,
            instructions: row.get(5)?,
            media_url: row.get(6)?,
            is_custom: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn into_exercise(self) -> Result<Exercise, DatabaseError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                DatabaseError::DeserializationError(format!(
                    "Invalid exercise timestamp {:?}: {}",
                    self.created_at, e
                ))
            })?;

        Ok(Exercise {
            id: self.id,
            name: self.name,
            muscle_group: self.muscle_group,
            category: self.category,
            equipment: self.equipment,
            instructions: self.instructions,
            media_url: self.media_url,
            is_custom: self.is_custom,
            created_at,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<DatabaseError> for HistoryError {
    fn from(err: DatabaseError) -> Self {
        HistoryError::Unavailable(err.to_string())
    }
}
