#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitplan workout planner.
//!
//! This crate provides:
//! - Domain types (levels, goals, exercises, plans, tracks)
//! - Exercise catalog and program templates
//! - Plan assembler and default plan wrapper
//! - Plan lifecycle (append-and-supersede store, completion tracking)
//! - Persistence (plan book, track log, CSV archive)

pub mod types;
pub mod error;
pub mod profile;
pub mod templates;
pub mod catalog;
pub mod sampling;
pub mod engine;
pub mod store;
pub mod state;
pub mod lifecycle;
pub mod config;
pub mod logging;
pub mod wal;
pub mod csv_rollup;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use profile::{NormalizedProfile, Profile};
pub use catalog::{build_default_catalog, get_default_catalog};
pub use engine::{generate, generate_plan, wrap_for_user};
pub use store::{PlanBook, PlanStore};
pub use lifecycle::{
    complete_exercise, mark_exercise_done, record_completion, request_plan, Completion,
    PlanOutcome, PlanProgress, PlanRequest,
};
pub use config::Config;
pub use wal::{JsonlTrackSink, TrackSink};
pub use history::load_recent_tracks;
