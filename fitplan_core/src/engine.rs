//! Plan assembler for building weekly workout plans.
//!
//! Assembly logic:
//! - Normalize the profile (level, goal, cadence) to known values
//! - Look up the goal's template for the cadence
//! - For each day and focus tag, sample exercises from the level's bucket
//!
//! Assembly never fails. Missing buckets contribute nothing and short
//! buckets contribute what they have.

use crate::catalog::get_default_catalog;
use crate::sampling::sample_without_replacement;
use crate::{
    Catalog, GeneratedPlan, PersistablePlan, PlacedExercise, PlanSource, Profile, TrainingDay,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Assemble a plan from the default catalog with an entropy-seeded RNG
///
/// Results differ between calls; pass a seeded RNG to `generate_plan`
/// when reproducibility matters.
pub fn generate(profile: &Profile) -> GeneratedPlan {
    let mut rng = StdRng::from_entropy();
    generate_plan(get_default_catalog(), profile, &mut rng)
}

/// Assemble a plan for `profile` from `catalog`
pub fn generate_plan<R>(catalog: &Catalog, profile: &Profile, rng: &mut R) -> GeneratedPlan
where
    R: Rng + ?Sized,
{
    let normalized = profile.normalize();

    tracing::info!(
        "Generating {} plan: level={}, days={}",
        normalized.goal,
        normalized.level,
        normalized.days_per_week
    );

    let (title, description, days) = match catalog.program(normalized.goal) {
        Some(template) => (
            format!("{} - {}", template.title, normalized.level.label()),
            template.description.clone(),
            template.days_for(normalized.days_per_week),
        ),
        None => {
            tracing::warn!("No template for goal {}, plan will be empty", normalized.goal);
            (String::new(), String::new(), &[][..])
        }
    };

    let mut exercises = Vec::new();
    for training_day in days {
        let placed = assemble_day(catalog, normalized.level, training_day, rng);
        tracing::debug!(
            "Day {} ({}): {} exercises",
            training_day.day,
            training_day.title,
            placed.len()
        );
        exercises.extend(placed);
    }

    GeneratedPlan {
        title,
        description,
        level: normalized.level,
        goal: normalized.goal,
        days_per_week: normalized.days_per_week,
        exercises,
    }
}

/// Sample every focus tag of one training day, in focus order
fn assemble_day<R>(
    catalog: &Catalog,
    level: crate::Level,
    training_day: &TrainingDay,
    rng: &mut R,
) -> Vec<PlacedExercise>
where
    R: Rng + ?Sized,
{
    let mut placed = Vec::new();

    for focus in &training_day.focus {
        let Some(bucket) = catalog.bucket(level, *focus) else {
            tracing::debug!("No {} bucket for level {}, skipping", focus.as_str(), level);
            continue;
        };

        for exercise in sample_without_replacement(rng, bucket, focus.draw_count()) {
            placed.push(PlacedExercise {
                exercise: exercise.clone(),
                day: training_day.day,
                order: placed.len() as u32,
                day_title: training_day.title.clone(),
                completed: false,
            });
        }
    }

    placed
}

impl PersistablePlan {
    /// Attach account metadata to an assembled plan
    pub fn new(owner_id: impl Into<String>, plan: GeneratedPlan, generated_at: DateTime<Utc>) -> Self {
        Self {
            owner_id: owner_id.into(),
            active: true,
            source: PlanSource::Generated,
            generated_at,
            is_customized: false,
            superseded_at: None,
            plan,
        }
    }
}

/// Assemble a plan for `profile` and wrap it for `owner_id`
///
/// Persisting the result is the caller's job.
pub fn wrap_for_user(owner_id: &str, profile: &Profile) -> PersistablePlan {
    PersistablePlan::new(owner_id, generate(profile), Utc::now())
}
