//! Training plan persistence.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::types::{Plan, PlanDay};

/// Manager for training plans.
pub struct PlanManager<'a> {
    conn: &'a Connection,
}

impl<'a> PlanManager<'a> {
    /// Create a new plan manager with a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new plan.
    pub fn create(&self, plan: &Plan) -> Result<(), PlanError> {
        validate(plan)?;

        self.conn.execute(
            "INSERT INTO plans
             (id, name, description, schedule, days_json, current_day_index, created_at, updated_at, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)",
            params![
                plan.id.to_string(),
                plan.name,
                plan.description,
                plan.schedule,
                serde_json::to_string(&plan.days)?,
                plan.current_day_index as i64,
                plan.created_at.to_rfc3339(),
                plan.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::info!("Created plan {} ({} days)", plan.name, plan.days.len());
        Ok(())
    }

    /// Store a plan as given, replacing any plan with the same ID.
    ///
    /// Timestamps and rotation position are kept, so restored plans read back unchanged.
    pub fn put(&self, plan: &Plan) -> Result<(), PlanError> {
        validate(plan)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO plans
             (id, name, description, schedule, days_json, current_day_index, created_at, updated_at, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)",
            params![
                plan.id.to_string(),
                plan.name,
                plan.description,
                plan.schedule,
                serde_json::to_string(&plan.days)?,
                plan.current_day_index as i64,
                plan.created_at.to_rfc3339(),
                plan.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Get a plan by ID. Deleted plans are not returned.
    pub fn get(&self, id: Uuid) -> Result<Option<Plan>, PlanError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, description, schedule, days_json, current_day_index, created_at, updated_at
                 FROM plans WHERE id = ?1 AND deleted = 0",
                params![id.to_string()],
                PlanRow::from_row,
            )
            .optional()?;

        row.map(PlanRow::into_plan).transpose()
    }

    /// List all plans by name.
    pub fn list(&self) -> Result<Vec<Plan>, PlanError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, schedule, days_json, current_day_index, created_at, updated_at
             FROM plans
             WHERE deleted = 0
             ORDER BY name COLLATE NOCASE ASC",
        )?;

        let rows = stmt
            .query_map([], PlanRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(PlanRow::into_plan).collect()
    }

    /// Update a plan.
    pub fn update(&self, plan: &Plan) -> Result<(), PlanError> {
        validate(plan)?;
        let now = Utc::now();

        let updated = self.conn.execute(
            "UPDATE plans SET
             name = ?1, description = ?2, schedule = ?3, days_json = ?4, current_day_index = ?5,
             updated_at = ?6
             WHERE id = ?7 AND deleted = 0",
            params![
                plan.name,
                plan.description,
                plan.schedule,
                serde_json::to_string(&plan.days)?,
                plan.current_day_index as i64,
                now.to_rfc3339(),
                plan.id.to_string(),
            ],
        )?;

        if updated == 0 {
            return Err(PlanError::NotFound(plan.id));
        }

        Ok(())
    }

    /// Soft-delete a plan. Returns false if no live plan had this ID.
    pub fn delete(&self, id: Uuid) -> Result<bool, PlanError> {
        let deleted = self.conn.execute(
            "UPDATE plans SET deleted = 1, updated_at = ?1 WHERE id = ?2 AND deleted = 0",
            params![Utc::now().to_rfc3339(), id.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Take the plan's current day and persist the advanced rotation.
    pub fn start_next_day(&self, id: Uuid) -> Result<(Plan, PlanDay), PlanError> {
        let mut plan = self.get(id)?.ok_or(PlanError::NotFound(id))?;

        let day = plan
            .current_day()
            .cloned()
            .ok_or_else(|| PlanError::ValidationError("Plan has no days".to_string()))?;

        plan.advance_day();
        self.conn.execute(
            "UPDATE plans SET current_day_index = ?1, updated_at = ?2 WHERE id = ?3",
            params![
                plan.current_day_index as i64,
                plan.updated_at.to_rfc3339(),
                id.to_string()
            ],
        )?;

        tracing::debug!("Plan {} advanced to day {}", plan.name, plan.current_day_index);
        Ok((plan, day))
    }
}

fn validate(plan: &Plan) -> Result<(), PlanError> {
    if plan.name.trim().is_empty() {
        return Err(PlanError::ValidationError(
            "Plan name is required".to_string(),
        ));
    }
    if plan.days.is_empty() {
        return Err(PlanError::ValidationError(
            "Plan needs at least one day".to_string(),
        ));
    }
    Ok(())
}

/// Raw plans row before JSON decoding.
struct PlanRow {
    id: String,
    name: String,
    description: Option<String>,
    schedule: Option<String>,
    days_json: String,
    current_day_index: i64,
    created_at: String,
    updated_at: String,
}

impl PlanRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            schedule: row.get(3)?,
            days_json: row.get(4)?,
            current_day_index: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_plan(self) -> Result<Plan, PlanError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| PlanError::InvalidRow(format!("plan id {:?}: {}", self.id, e)))?;
        let days: Vec<PlanDay> = serde_json::from_str(&self.days_json)?;

        Ok(Plan {
            id,
            name: self.name,
            description: self.description,
            schedule: self.schedule,
            days,
            current_day_index: self.current_day_index.max(0) as usize,
            created_at: parse_time(&self.created_at)?,
            updated_at: parse_time(&self.updated_at)?,
        })
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, PlanError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| PlanError::InvalidRow(format!("timestamp {:?}: {}", value, e)))
}

/// Plan management errors.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Plan not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid stored plan: {0}")]
    InvalidRow(String),
}
