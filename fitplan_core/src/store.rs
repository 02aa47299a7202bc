//! Plan storage with append-and-supersede semantics.
//!
//! Plans are never deleted or regenerated in place. Inserting a plan for
//! an owner first flags that owner's active plan inactive, so each owner
//! has at most one active plan and the full history stays available.

use crate::{PersistablePlan, PlacedExercise, Result, StoredPlan};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage operations the plan lifecycle relies on
pub trait PlanStore {
    /// The owner's active plan, if any
    fn active_plan(&self, owner_id: &str) -> Result<Option<StoredPlan>>;

    /// Every plan of the owner, oldest first
    fn plans_for(&self, owner_id: &str) -> Result<Vec<StoredPlan>>;

    /// Supersede the owner's active plan and insert `plan` as the active one
    fn insert_superseding(&mut self, plan: PersistablePlan) -> Result<StoredPlan>;

    /// Flag the exercise at (`day`, `order`) of a plan completed
    ///
    /// Returns `None` when the plan or the slot does not exist.
    fn mark_completed(&mut self, plan_id: Uuid, day: u8, order: u32) -> Result<Option<PlacedExercise>>;
}

/// In-memory list of stored plans, persisted as one JSON document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanBook {
    pub plans: Vec<StoredPlan>,
}

impl PlanBook {
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanStore for PlanBook {
    fn active_plan(&self, owner_id: &str) -> Result<Option<StoredPlan>> {
        Ok(self
            .plans
            .iter()
            .rev()
            .find(|p| p.record.active && p.record.owner_id == owner_id)
            .cloned())
    }

    fn plans_for(&self, owner_id: &str) -> Result<Vec<StoredPlan>> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.record.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn insert_superseding(&mut self, mut plan: PersistablePlan) -> Result<StoredPlan> {
        let now = Utc::now();

        // Sweep every active plan of the owner, not just the newest, so a
        // book written by an older process still ends with a single one
        for existing in self
            .plans
            .iter_mut()
            .filter(|p| p.record.active && p.record.owner_id == plan.owner_id)
        {
            existing.record.active = false;
            existing.record.superseded_at = Some(now);
            tracing::info!("Superseded plan {} for {}", existing.id, plan.owner_id);
        }

        plan.active = true;
        plan.superseded_at = None;

        let stored = StoredPlan {
            id: Uuid::new_v4(),
            record: plan,
        };
        self.plans.push(stored.clone());

        tracing::info!(
            "Inserted plan {} for {} ({} exercises)",
            stored.id,
            stored.record.owner_id,
            stored.record.plan.exercises.len()
        );
        Ok(stored)
    }

    fn mark_completed(&mut self, plan_id: Uuid, day: u8, order: u32) -> Result<Option<PlacedExercise>> {
        let placed = self
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .and_then(|p| {
                p.record
                    .plan
                    .exercises
                    .iter_mut()
                    .find(|e| e.day == day && e.order == order)
            })
            .map(|e| {
                e.completed = true;
                e.clone()
            });

        Ok(placed)
    }
}
