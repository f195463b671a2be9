#![forbid(unsafe_code)]

//! Core domain model and business logic for the liftlog system.
//!
//! This crate provides:
//! - Domain types (sets, sessions, records, goals, suggestions)
//! - Session aggregation and one-rep-max estimation
//! - Personal record and goal progress calculators
//! - The progressive-overload advisor
//! - The training-history summarizer (coaching context)
//! - Persistence (set log, CSV rollup, goal book)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod estimator;
pub mod aggregate;
pub mod records;
pub mod goals;
pub mod advisor;
pub mod summary;
pub mod setlog;
pub mod csv_rollup;
pub mod history;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use estimator::estimate_1rm;
pub use aggregate::aggregate_sessions;
pub use records::compute_records;
pub use goals::compute_goal_progress;
pub use advisor::suggest;
pub use summary::summarize_history;
pub use setlog::{JsonlSink, SetSink};
pub use history::load_all_sets;
pub use state::GoalBook;
