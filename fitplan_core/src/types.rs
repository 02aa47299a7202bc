//! Core domain types for the workout plan generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Skill levels, goals, focus tags and weekly cadences
//! - Catalog exercises and program templates
//! - Generated plans and their persisted form
//! - Workout tracks logged when an exercise is done

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Profile Vocabulary
// ============================================================================

/// Training experience tier. Also selects the catalog bucket set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    #[serde(rename = "beginner")]
    Beginner,
    #[serde(rename = "intermediaire")]
    Intermediate,
    #[serde(rename = "avance")]
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Stored identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediaire",
            Level::Advanced => "avance",
        }
    }

    /// Human-readable label used in plan titles
    pub fn label(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Beginner
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training goal, the key of the program template catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    General,
    PriseMuscle,
    PertePoids,
    Endurance,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::General,
        Goal::PriseMuscle,
        Goal::PertePoids,
        Goal::Endurance,
    ];

    /// Stored identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::General => "general",
            Goal::PriseMuscle => "prise_muscle",
            Goal::PertePoids => "perte_poids",
            Goal::Endurance => "endurance",
        }
    }
}

impl Default for Goal {
    fn default() -> Self {
        Goal::General
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Muscle group or activity label naming a catalog bucket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FocusTag {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Abs,
    Cardio,
    FullBody,
}

impl FocusTag {
    pub const ALL: [FocusTag; 8] = [
        FocusTag::Chest,
        FocusTag::Back,
        FocusTag::Legs,
        FocusTag::Shoulders,
        FocusTag::Arms,
        FocusTag::Abs,
        FocusTag::Cardio,
        FocusTag::FullBody,
    ];

    /// Number of exercises drawn for this tag on a training day
    pub fn draw_count(&self) -> usize {
        match self {
            FocusTag::Cardio | FocusTag::FullBody => 1,
            _ => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusTag::Chest => "chest",
            FocusTag::Back => "back",
            FocusTag::Legs => "legs",
            FocusTag::Shoulders => "shoulders",
            FocusTag::Arms => "arms",
            FocusTag::Abs => "abs",
            FocusTag::Cardio => "cardio",
            FocusTag::FullBody => "full_body",
        }
    }
}

/// Supported weekly cadences. Serialized as the plain day count.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum DaysPerWeek {
    Three,
    Five,
}

impl DaysPerWeek {
    pub fn count(&self) -> u8 {
        match self {
            DaysPerWeek::Three => 3,
            DaysPerWeek::Five => 5,
        }
    }
}

impl Default for DaysPerWeek {
    fn default() -> Self {
        DaysPerWeek::Three
    }
}

impl From<DaysPerWeek> for u8 {
    fn from(days: DaysPerWeek) -> Self {
        days.count()
    }
}

impl TryFrom<u8> for DaysPerWeek {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            3 => Ok(DaysPerWeek::Three),
            5 => Ok(DaysPerWeek::Five),
            other => Err(format!("unsupported days per week: {}", other)),
        }
    }
}

impl fmt::Display for DaysPerWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// A catalog exercise with its prescription
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    /// Reps or hold time, e.g. "10-12" or "30s"
    pub reps: String,
    pub description: String,
    pub muscle_groups: Vec<FocusTag>,
    /// Zero for rep-based work
    pub duration_minutes: u32,
    pub rest_seconds: u32,
}

/// One day of a program template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingDay {
    /// Day of the week, 1 (Monday) to 7
    pub day: u8,
    pub focus: Vec<FocusTag>,
    pub title: String,
}

/// Per-goal arrangement of training days for each cadence
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgramTemplate {
    pub goal: Goal,
    pub title: String,
    pub description: String,
    pub three_days: Vec<TrainingDay>,
    pub five_days: Vec<TrainingDay>,
}

/// The complete catalog of exercises and program templates
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: HashMap<(Level, FocusTag), Vec<Exercise>>,
    pub programs: HashMap<Goal, ProgramTemplate>,
}

// ============================================================================
// Plan Types
// ============================================================================

/// A catalog exercise placed on a training day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlacedExercise {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub day: u8,
    /// Position within the day, starting at 0
    pub order: u32,
    pub day_title: String,
    pub completed: bool,
}

/// Output of the plan assembler
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPlan {
    pub title: String,
    pub description: String,
    pub level: Level,
    pub goal: Goal,
    pub days_per_week: DaysPerWeek,
    pub exercises: Vec<PlacedExercise>,
}

impl GeneratedPlan {
    /// Distinct training days in ascending order
    pub fn training_days(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self.exercises.iter().map(|e| e.day).collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    /// Exercises scheduled on `day`, in order
    pub fn exercises_on(&self, day: u8) -> impl Iterator<Item = &PlacedExercise> {
        self.exercises.iter().filter(move |e| e.day == day)
    }
}

/// Provenance of a stored plan
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Generated,
}

/// A generated plan with account metadata, ready to hand to a store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PersistablePlan {
    pub owner_id: String,
    pub active: bool,
    pub source: PlanSource,
    pub generated_at: DateTime<Utc>,
    pub is_customized: bool,
    #[serde(default)]
    pub superseded_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub plan: GeneratedPlan,
}

/// A plan as kept by a store, with its assigned id
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredPlan {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: PersistablePlan,
}

// ============================================================================
// Tracking Types
// ============================================================================

/// Log record written each time a user marks an exercise done
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTrack {
    pub id: Uuid,
    pub owner_id: String,
    pub plan_id: Uuid,
    pub date: DateTime<Utc>,
    pub exercise_id: String,
    pub day: u8,
    pub order: u32,
    pub completed: bool,
    pub actual_sets: Option<u32>,
    pub actual_reps: Option<String>,
    pub note: Option<String>,
}
