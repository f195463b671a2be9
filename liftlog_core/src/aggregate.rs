//! Session aggregation: raw logged sets into per-date summaries.
//!
//! Warmup sets are dropped before grouping; the remaining working sets are
//! grouped by session date and reduced to the per-session bests the rest of
//! the pipeline (records, goals, advisor, charts) consumes.

use crate::estimator::estimate_1rm;
use crate::{SessionSummary, SetRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Aggregate the working sets of one exercise into per-session summaries.
///
/// Groups by `session_date` (day granularity), computes best weight, best
/// reps, max per-set estimated 1RM, and total volume (Σ weight × reps) for
/// each group. Summaries come back sorted ascending by date.
///
/// Callers pass the sets of a single exercise; the function itself only
/// keys on dates. Missing weight/reps count as 0. An input with no working
/// sets yields an empty list, which callers treat as "no history".
pub fn aggregate_sessions(sets: &[SetRecord]) -> Vec<SessionSummary> {
    // BTreeMap keeps the date groups in ascending order for free
    let mut by_date: BTreeMap<NaiveDate, Vec<SetRecord>> = BTreeMap::new();

    for set in sets {
        if set.is_warmup {
            continue;
        }
        by_date.entry(set.session_date).or_default().push(set.clone());
    }

    let summaries: Vec<SessionSummary> = by_date
        .into_iter()
        .map(|(date, sets)| summarize_day(date, sets))
        .collect();

    tracing::debug!("Aggregated {} sets into {} sessions", sets.len(), summaries.len());
    summaries
}

/// Reduce one day's working sets to a summary
fn summarize_day(date: NaiveDate, sets: Vec<SetRecord>) -> SessionSummary {
    let mut best_weight: f64 = 0.0;
    let mut best_reps: u32 = 0;
    let mut estimated_1rm: f64 = 0.0;
    let mut total_volume: f64 = 0.0;

    for set in &sets {
        let weight = set.weight();
        let reps = set.rep_count();

        best_weight = best_weight.max(weight);
        best_reps = best_reps.max(reps);
        estimated_1rm = estimated_1rm.max(estimate_1rm(weight, reps));
        total_volume += weight * reps as f64;
    }

    SessionSummary {
        date,
        best_weight,
        best_reps,
        estimated_1rm,
        total_volume,
        sets,
    }
}
