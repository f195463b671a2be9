//! Core domain types for the liftlog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Raw logged sets and their session grouping
//! - Derived per-session summaries
//! - Personal records and lifting goals
//! - Progression suggestions
//! - The training-history view handed to the coaching context

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Raw input: logged sets
// ============================================================================

/// One logged set of an exercise.
///
/// `weight_kg` and `reps` are optional; a missing weight means a bodyweight
/// set and substitutes 0 in arithmetic. Warmup sets are kept in the log but
/// never contribute to summaries, records, goals, or suggestions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetRecord {
    pub id: Uuid,
    pub exercise: String,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    #[serde(default)]
    pub is_warmup: bool,
    #[serde(default)]
    pub is_cardio: bool,
    pub completed_at: DateTime<Utc>,
    /// Calendar date of the owning session; the grouping key for summaries.
    pub session_date: NaiveDate,
}

impl SetRecord {
    /// Weight used for arithmetic (missing weight counts as bodyweight/0)
    pub fn weight(&self) -> f64 {
        self.weight_kg.unwrap_or(0.0)
    }

    /// Reps used for arithmetic (missing reps count as 0)
    pub fn rep_count(&self) -> u32 {
        self.reps.unwrap_or(0)
    }
}

// ============================================================================
// Derived: per-session summaries
// ============================================================================

/// Aggregated working sets of one exercise on one calendar date.
///
/// Built by [`crate::aggregate::aggregate_sessions`]; treated as read-only
/// once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub best_weight: f64,
    pub best_reps: u32,
    pub estimated_1rm: f64,
    pub total_volume: f64,
    /// The underlying working sets, for drill-down display.
    pub sets: Vec<SetRecord>,
}

// ============================================================================
// Derived: personal records
// ============================================================================

/// Metric a personal record is tracked for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Weight,
    OneRepMax,
    Volume,
}

/// An all-time maximum for one tracked metric
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub kind: RecordKind,
    pub value: f64,
    pub date: NaiveDate,
    /// Reps performed at the record weight (weight records only)
    pub reps: Option<u32>,
}

// ============================================================================
// Goals
// ============================================================================

/// A user-authored target weight for an exercise
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub exercise: String,
    pub target_weight_kg: f64,
    pub target_reps: Option<u32>,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub achieved: bool,
    pub notes: Option<String>,
}

/// Numeric distance-to-goal, derived per query.
///
/// The stored `achieved` flag is external policy and is reported as-is;
/// the calculator never flips it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub current_best: f64,
    /// Percentage of target reached, clamped to [0, 100]
    pub progress: f64,
    /// Kilograms still missing, clamped at 0
    pub remaining: f64,
}

// ============================================================================
// Progression suggestions
// ============================================================================

/// Confidence attached to a progression suggestion
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Outcome of the progressive-overload classifier.
///
/// A closed set of suggestion kinds, each carrying exactly the numeric
/// payload that kind guarantees (e.g. an `IncreaseWeight` always has a
/// suggested weight).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressiveSuggestion {
    IncreaseWeight {
        message: String,
        suggested_weight: f64,
        suggested_reps: u32,
        confidence: Confidence,
    },
    IncreaseReps {
        message: String,
        suggested_weight: f64,
        suggested_reps: u32,
        confidence: Confidence,
    },
    Deload {
        message: String,
        suggested_weight: f64,
        confidence: Confidence,
    },
    Maintain {
        message: String,
        suggested_weight: f64,
        suggested_reps: u32,
        confidence: Confidence,
    },
    FirstTime {
        message: String,
        confidence: Confidence,
    },
}

impl ProgressiveSuggestion {
    pub fn message(&self) -> &str {
        match self {
            Self::IncreaseWeight { message, .. }
            | Self::IncreaseReps { message, .. }
            | Self::Deload { message, .. }
            | Self::Maintain { message, .. }
            | Self::FirstTime { message, .. } => message,
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Self::IncreaseWeight { confidence, .. }
            | Self::IncreaseReps { confidence, .. }
            | Self::Deload { confidence, .. }
            | Self::Maintain { confidence, .. }
            | Self::FirstTime { confidence, .. } => *confidence,
        }
    }

    pub fn suggested_weight(&self) -> Option<f64> {
        match self {
            Self::IncreaseWeight {
                suggested_weight, ..
            }
            | Self::IncreaseReps {
                suggested_weight, ..
            }
            | Self::Deload {
                suggested_weight, ..
            }
            | Self::Maintain {
                suggested_weight, ..
            } => Some(*suggested_weight),
            Self::FirstTime { .. } => None,
        }
    }

    pub fn suggested_reps(&self) -> Option<u32> {
        match self {
            Self::IncreaseWeight { suggested_reps, .. }
            | Self::IncreaseReps { suggested_reps, .. }
            | Self::Maintain { suggested_reps, .. } => Some(*suggested_reps),
            Self::Deload { .. } | Self::FirstTime { .. } => None,
        }
    }
}

// ============================================================================
// Training-history view (coaching context)
// ============================================================================

/// One workout occurrence, joined to sets by calendar date
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub label: String,
    pub duration_minutes: Option<u32>,
}

/// One line of the recent-workouts list in the coaching context
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentWorkout {
    pub date: NaiveDate,
    pub label: String,
    pub exercise_count: usize,
    pub duration_minutes: Option<u32>,
    /// "name weight × reps" of the single heaviest set that day, if any
    pub heaviest_set: Option<String>,
}

/// A most-trained exercise entry with a textual progression hint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopExercise {
    pub name: String,
    pub times_performed: usize,
    pub last_weight_kg: f64,
    pub last_reps: u32,
    pub record_weight_kg: f64,
    pub suggestion: String,
}

/// Heaviest working set in the window for one exercise name
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedLift {
    pub exercise: String,
    pub weight_kg: f64,
    pub reps: u32,
}

/// The summary object handed to the coaching-context builder
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrainingHistory {
    pub recent_workouts: Vec<RecentWorkout>,
    pub top_exercises: Vec<TopExercise>,
    pub personal_records: Vec<RecordedLift>,
}

/// Format a weight for display: whole kilos without the trailing `.0`,
/// fractional plates with one decimal (e.g. "82.5").
pub fn format_kg(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
