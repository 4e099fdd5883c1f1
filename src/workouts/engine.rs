//! Live workout session engine.
//!
//! Holds at most one active [`WorkoutSession`]. Sessions start from a plan day
//! (prefilled from the progression advisor) or empty, collect set results,
//! and finish into a [`FinishedWorkout`] ready to store.

use chrono::{DateTime, Utc};

use crate::history::grouping::most_recent_first;
use crate::history::types::{HistorySource, SetRecord};
use crate::plans::types::Plan;
use crate::progression::advisor::ProgressionAdvisor;
use crate::progression::types::{PlanExerciseConfig, DEFAULT_TARGET_REPS};
use crate::storage::config::WeightUnit;
use crate::workouts::types::{
    format_timestamp, FinishedWorkout, SessionExercise, SessionSet, SetStatus, SetUpdate,
    WorkoutError, WorkoutRecord, WorkoutSession,
};

/// Day name of sessions started without a plan.
pub const FREESTYLE_DAY: &str = "Freestyle";

/// Sets prefilled when neither the plan nor history says how many.
pub const DEFAULT_SESSION_SETS: u32 = 3;

/// Configuration for exercises added to a session by hand.
pub fn freestyle_config() -> PlanExerciseConfig {
    PlanExerciseConfig::new(DEFAULT_SESSION_SETS, 5).with_increment(5.0)
}

/// Workout session engine.
#[derive(Debug, Default)]
pub struct SessionEngine {
    /// Active session
    session: Option<WorkoutSession>,
    /// Source of prefilled weights
    advisor: ProgressionAdvisor,
}

impl SessionEngine {
    /// Create an engine with the default advisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a configured advisor.
    pub fn with_advisor(advisor: ProgressionAdvisor) -> Self {
        Self {
            session: None,
            advisor,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&WorkoutSession> {
        self.session.as_ref()
    }

    /// Whether a session is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session from the plan's current day and advance the plan.
    ///
    /// Each exercise gets its suggested weight and the planned number of sets.
    /// The caller persists the advanced plan.
    pub fn start_from_plan<H: HistorySource + ?Sized>(
        &mut self,
        plan: &mut Plan,
        history: &H,
        unit: WeightUnit,
    ) -> Result<&WorkoutSession, WorkoutError> {
        if self.session.is_some() {
            return Err(WorkoutError::SessionAlreadyActive);
        }

        let day_index = plan.current_index().ok_or(WorkoutError::EmptyPlan)?;
        let day = plan.days[day_index].clone();

        let exercises = day
            .exercises
            .iter()
            .map(|ex| {
                self.build_exercise(history, &ex.exercise_id, &ex.exercise_name, ex.config, unit)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut session = WorkoutSession::new(day.name.clone(), Utc::now());
        session.plan_id = Some(plan.id);
        session.plan_name = Some(plan.name.clone());
        session.day_index = day_index;
        session.exercises = exercises;

        plan.advance_day();

        tracing::info!(
            "Started {} / {} with {} exercises",
            plan.name,
            day.name,
            session.exercises.len()
        );

        Ok(&*self.session.insert(session))
    }

    /// Start an empty session.
    pub fn start_freestyle(&mut self) -> Result<&WorkoutSession, WorkoutError> {
        if self.session.is_some() {
            return Err(WorkoutError::SessionAlreadyActive);
        }

        tracing::info!("Started freestyle workout");
        Ok(&*self
            .session
            .insert(WorkoutSession::new(FREESTYLE_DAY, Utc::now())))
    }

    /// Add an exercise to the active session. Returns its index.
    pub fn add_exercise<H: HistorySource + ?Sized>(
        &mut self,
        history: &H,
        exercise_id: &str,
        exercise_name: &str,
        unit: WeightUnit,
    ) -> Result<usize, WorkoutError> {
        if self.session.is_none() {
            return Err(WorkoutError::NoActiveSession);
        }

        let exercise =
            self.build_exercise(history, exercise_id, exercise_name, freestyle_config(), unit)?;

        let session = self.session_mut()?;
        session.exercises.push(exercise);
        Ok(session.exercises.len() - 1)
    }

    /// Edit a set's weight, reps or RPE.
    pub fn update_set(
        &mut self,
        exercise: usize,
        set: usize,
        update: SetUpdate,
    ) -> Result<&SessionSet, WorkoutError> {
        let target = self.set_mut(exercise, set)?;

        if let Some(weight) = update.weight {
            target.weight = weight.max(0.0);
        }
        if let Some(reps) = update.reps {
            target.reps = reps;
        }
        if update.rpe.is_some() {
            target.rpe = update.rpe;
        }

        Ok(&*target)
    }

    /// Advance a set through pending, completed and failed.
    pub fn toggle_set(&mut self, exercise: usize, set: usize) -> Result<SetStatus, WorkoutError> {
        let target = self.set_mut(exercise, set)?;
        target.status = target.status.toggled();
        Ok(target.status)
    }

    /// Mark a set as completed.
    pub fn complete_set(&mut self, exercise: usize, set: usize) -> Result<(), WorkoutError> {
        self.set_mut(exercise, set)?.status = SetStatus::Completed;
        Ok(())
    }

    /// Mark a set as failed.
    pub fn fail_set(&mut self, exercise: usize, set: usize) -> Result<(), WorkoutError> {
        self.set_mut(exercise, set)?.status = SetStatus::Failed;
        Ok(())
    }

    /// Append a set copying the previous set's weight and reps.
    pub fn add_set(&mut self, exercise: usize) -> Result<&SessionSet, WorkoutError> {
        let target = self.exercise_mut(exercise)?;

        let (weight, reps, target_reps) = target
            .sets
            .last()
            .map(|last| (last.weight, last.reps, last.target_reps))
            .unwrap_or((0.0, 5, 5));

        let mut set = SessionSet::new(target.sets.len() as u32 + 1, weight, target_reps);
        set.reps = reps;
        target.sets.push(set);

        Ok(&target.sets[target.sets.len() - 1])
    }

    /// Set notes for one exercise.
    pub fn set_exercise_notes(
        &mut self,
        exercise: usize,
        notes: impl Into<String>,
    ) -> Result<(), WorkoutError> {
        self.exercise_mut(exercise)?.notes = notes.into();
        Ok(())
    }

    /// Set notes for the whole session.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), WorkoutError> {
        self.session_mut()?.notes = notes.into();
        Ok(())
    }

    /// Drop the active session without saving.
    pub fn abandon(&mut self) -> Option<WorkoutSession> {
        let session = self.session.take();
        if session.is_some() {
            tracing::info!("Workout abandoned");
        }
        session
    }

    /// End the session and produce records to store.
    ///
    /// Sets are renumbered from 1 per exercise and stamped with `now`.
    /// Exercise notes land on the exercise's first set. An empty session
    /// stays active.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<FinishedWorkout, WorkoutError> {
        let session = self.session.as_ref().ok_or(WorkoutError::NoActiveSession)?;
        if session.total_sets() == 0 {
            return Err(WorkoutError::EmptySession);
        }

        let session = self.session.take().ok_or(WorkoutError::NoActiveSession)?;
        let created_at = format_timestamp(now);

        let sets: Vec<SetRecord> = session
            .exercises
            .iter()
            .flat_map(|exercise| {
                let note = Some(exercise.notes.trim())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let session_id = session.id.clone();
                let created_at = created_at.clone();

                exercise.sets.iter().enumerate().map(move |(i, set)| SetRecord {
                    id: set.id.clone(),
                    workout_id: session_id.clone(),
                    exercise_id: exercise.exercise_id.clone(),
                    set_number: i as u32 + 1,
                    weight: set.weight,
                    reps: set.reps,
                    completed: set.is_completed(),
                    created_at: created_at.clone(),
                    rpe: set.rpe,
                    notes: if i == 0 { note.clone() } else { None },
                })
            })
            .collect();

        let workout = WorkoutRecord {
            id: session.id.clone(),
            date: now.format("%Y-%m-%d").to_string(),
            plan_id: session.plan_id,
            plan_name: session.plan_name.clone(),
            day_name: Some(session.day_name.clone()),
            notes: Some(session.notes.trim().to_string()).filter(|n| !n.is_empty()),
            duration_secs: session.elapsed_secs(now),
            exercise_count: session.exercises.len() as u32,
            created_at,
        };

        let finished = FinishedWorkout { workout, sets };
        let totals = finished.totals();

        tracing::info!(
            "Finished {}: {}/{} sets, volume {}, {}s",
            session.day_name,
            totals.completed_sets,
            totals.total_sets,
            totals.volume,
            totals.duration_secs
        );

        Ok(finished)
    }

    fn build_exercise<H: HistorySource + ?Sized>(
        &self,
        history: &H,
        exercise_id: &str,
        exercise_name: &str,
        config: PlanExerciseConfig,
        unit: WeightUnit,
    ) -> Result<SessionExercise, WorkoutError> {
        let past = history.fetch_sets_for_exercise(exercise_id)?;
        let previous = most_recent_first(past.clone())
            .into_iter()
            .next()
            .map(|group| group.sets);

        let suggestion = self.advisor.suggest_from_sets(past, &config, unit);

        let set_count = config
            .sets
            .filter(|&n| n > 0)
            .or_else(|| previous.as_ref().map(|p| p.len() as u32))
            .unwrap_or(DEFAULT_SESSION_SETS);
        let target_reps = config
            .reps
            .filter(|&n| n > 0)
            .or(Some(self.advisor.defaults().reps).filter(|&n| n > 0))
            .unwrap_or(DEFAULT_TARGET_REPS);

        tracing::debug!(
            exercise_id,
            weight = suggestion.weight,
            reason = %suggestion.reason,
            set_count,
            "Prefilled exercise"
        );

        Ok(SessionExercise {
            exercise_id: exercise_id.to_string(),
            exercise_name: exercise_name.to_string(),
            config,
            sets: (1..=set_count)
                .map(|n| SessionSet::new(n, suggestion.weight, target_reps))
                .collect(),
            suggestion,
            previous,
            notes: String::new(),
        })
    }

    fn session_mut(&mut self) -> Result<&mut WorkoutSession, WorkoutError> {
        self.session.as_mut().ok_or(WorkoutError::NoActiveSession)
    }

    fn exercise_mut(&mut self, exercise: usize) -> Result<&mut SessionExercise, WorkoutError> {
        self.session_mut()?
            .exercises
            .get_mut(exercise)
            .ok_or(WorkoutError::UnknownExercise(exercise))
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut SessionSet, WorkoutError> {
        self.exercise_mut(exercise)?
            .sets
            .get_mut(set)
            .ok_or(WorkoutError::UnknownSet { exercise, set })
    }
}
