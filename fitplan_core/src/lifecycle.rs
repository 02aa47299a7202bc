//! Plan lifecycle: creation, regeneration and completion tracking.
//!
//! - A request returns the owner's active plan unless regeneration is asked for
//! - Regeneration supersedes the active plan rather than editing it
//! - Marking an exercise done flags it in the active plan and logs a track,
//!   saving the flag before the track is written
//!
//! Callers that share a store between processes run these inside
//! `PlanBook::update` so the check-then-insert sequence is serialized.

use crate::engine::generate_plan;
use crate::wal::TrackSink;
use crate::{
    Catalog, Error, PersistablePlan, PlanBook, PlanStore, Profile, Result, StoredPlan,
    WorkoutTrack,
};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

/// Body of a create/regenerate request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default)]
    pub regenerate: bool,
}

/// What a plan request did
#[derive(Clone, Debug)]
pub enum PlanOutcome {
    /// The active plan was returned unchanged
    Existing(StoredPlan),
    /// A new plan was inserted, superseding `superseded` if there was one
    Created {
        plan: StoredPlan,
        superseded: Option<Uuid>,
    },
}

impl PlanOutcome {
    pub fn plan(&self) -> &StoredPlan {
        match self {
            PlanOutcome::Existing(plan) => plan,
            PlanOutcome::Created { plan, .. } => plan,
        }
    }

    pub fn into_plan(self) -> StoredPlan {
        match self {
            PlanOutcome::Existing(plan) => plan,
            PlanOutcome::Created { plan, .. } => plan,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, PlanOutcome::Created { .. })
    }
}

/// Return the owner's active plan, or generate and insert one
pub fn request_plan<S, R>(
    store: &mut S,
    catalog: &Catalog,
    owner_id: &str,
    request: &PlanRequest,
    rng: &mut R,
) -> Result<PlanOutcome>
where
    S: PlanStore + ?Sized,
    R: Rng + ?Sized,
{
    let existing = store.active_plan(owner_id)?;

    if let Some(plan) = existing.as_ref().filter(|_| !request.regenerate) {
        tracing::info!("Returning active plan {} for {}", plan.id, owner_id);
        return Ok(PlanOutcome::Existing(plan.clone()));
    }

    let generated = generate_plan(catalog, &request.profile, rng);
    let plan = store.insert_superseding(PersistablePlan::new(owner_id, generated, Utc::now()))?;

    Ok(PlanOutcome::Created {
        plan,
        superseded: existing.map(|p| p.id),
    })
}

/// A user's report of having done one placed exercise
#[derive(Clone, Debug, Default)]
pub struct Completion {
    pub day: u8,
    pub order: u32,
    pub actual_sets: Option<u32>,
    pub actual_reps: Option<String>,
    pub note: Option<String>,
}

/// Flag an exercise of the owner's active plan completed
///
/// Returns the track describing the completion without logging it.
pub fn mark_exercise_done<S>(
    store: &mut S,
    owner_id: &str,
    completion: Completion,
) -> Result<WorkoutTrack>
where
    S: PlanStore + ?Sized,
{
    let plan = store
        .active_plan(owner_id)?
        .ok_or_else(|| Error::NotFound(format!("no active plan for {}", owner_id)))?;

    let placed = store
        .mark_completed(plan.id, completion.day, completion.order)?
        .ok_or_else(|| {
            Error::NotFound(format!(
                "no exercise at day {} order {} in plan {}",
                completion.day, completion.order, plan.id
            ))
        })?;

    tracing::info!(
        "Completed {} (day {}, order {}) for {}",
        placed.exercise.id,
        placed.day,
        placed.order,
        owner_id
    );

    Ok(WorkoutTrack {
        id: Uuid::new_v4(),
        owner_id: owner_id.to_string(),
        plan_id: plan.id,
        date: Utc::now(),
        exercise_id: placed.exercise.id,
        day: placed.day,
        order: placed.order,
        completed: true,
        actual_sets: completion.actual_sets,
        actual_reps: completion.actual_reps,
        note: completion.note,
    })
}

/// Flag an exercise completed in an in-memory store and log a track
pub fn complete_exercise<S, T>(
    store: &mut S,
    sink: &mut T,
    owner_id: &str,
    completion: Completion,
) -> Result<WorkoutTrack>
where
    S: PlanStore + ?Sized,
    T: TrackSink + ?Sized,
{
    let track = mark_exercise_done(store, owner_id, completion)?;
    sink.append(&track)?;
    Ok(track)
}

/// Flag an exercise completed in the plan book at `plans_path` and log a track
///
/// The book is saved before the track is appended. A failed save logs
/// nothing; a failed append leaves the mark in place, and retrying it
/// appends the track once more.
pub fn record_completion<T>(
    plans_path: &Path,
    sink: &mut T,
    owner_id: &str,
    completion: Completion,
) -> Result<WorkoutTrack>
where
    T: TrackSink + ?Sized,
{
    let track = PlanBook::update(plans_path, |book| {
        mark_exercise_done(book, owner_id, completion)
    })?;
    sink.append(&track)?;
    Ok(track)
}

/// Completed/total counts for one training day
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayProgress {
    pub day: u8,
    pub title: String,
    pub completed: usize,
    pub total: usize,
}

/// Completion summary of a plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanProgress {
    pub days: Vec<DayProgress>,
    pub completed: usize,
    pub total: usize,
}

impl PlanProgress {
    pub fn of(plan: &StoredPlan) -> Self {
        let mut days: BTreeMap<u8, DayProgress> = BTreeMap::new();

        for placed in &plan.record.plan.exercises {
            let entry = days.entry(placed.day).or_insert_with(|| DayProgress {
                day: placed.day,
                title: placed.day_title.clone(),
                completed: 0,
                total: 0,
            });
            entry.total += 1;
            if placed.completed {
                entry.completed += 1;
            }
        }

        let days: Vec<DayProgress> = days.into_values().collect();
        let completed = days.iter().map(|d| d.completed).sum();
        let total = days.iter().map(|d| d.total).sum();

        Self {
            days,
            completed,
            total,
        }
    }

    /// Share of exercises completed, 0.0 for an empty plan
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
