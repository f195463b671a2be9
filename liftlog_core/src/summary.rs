//! Training-history summarizer for the coaching context.
//!
//! Reduces recent workouts across all exercises into the compact view the
//! coaching assistant is prompted with: recent workout lines, the most
//! trained exercises with a textual progression hint, and the heaviest
//! lifts of the window.
//!
//! The per-exercise hint here is a simplified heuristic, deliberately kept
//! separate from [`crate::advisor::suggest`]; changing either alters what
//! the assistant sees.

use crate::config::SummaryConfig;
use crate::types::format_kg;
use crate::{RecentWorkout, RecordedLift, SetRecord, TopExercise, TrainingHistory, WorkoutSession};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

// Thresholds for the simplified per-exercise hint
const HINT_INCREMENT_KG: f64 = 2.5;
const HINT_LOW_REPS: u32 = 6;
const HINT_LIGHT_WEIGHT_KG: f64 = 20.0;
const HINT_PR_PROXIMITY: f64 = 0.95;

/// Summarize training history inside the lookback window.
///
/// `as_of` anchors the window (callers pass today); sessions older than
/// `cfg.lookback_days` are dropped and at most `cfg.max_sessions` of the
/// most recent remain. Sets join to sessions by calendar date. Warmup sets
/// are ignored everywhere; cardio sets are counted in workout lines but
/// excluded from top exercises and records.
///
/// Callers pass the FULL set history, not a pre-windowed slice: workout
/// lines, rankings, and the heaviest-lift list are window-scoped, but each
/// top exercise's record weight is its all-time maximum, so the "push for a
/// PR" hint measures against the real record even when it predates the
/// window.
pub fn summarize_history(
    as_of: NaiveDate,
    sessions: &[WorkoutSession],
    sets: &[SetRecord],
    cfg: &SummaryConfig,
) -> TrainingHistory {
    let cutoff = as_of - Duration::days(cfg.lookback_days);

    let mut recent: Vec<&WorkoutSession> =
        sessions.iter().filter(|s| s.date >= cutoff).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(cfg.max_sessions);

    let window_dates: BTreeSet<NaiveDate> = recent.iter().map(|s| s.date).collect();

    let working: Vec<&SetRecord> = sets
        .iter()
        .filter(|s| !s.is_warmup && window_dates.contains(&s.session_date))
        .collect();

    // All-time record weight per exercise, independent of the window
    let mut all_time_records: BTreeMap<&str, f64> = BTreeMap::new();
    for set in sets.iter().filter(|s| !s.is_warmup && !s.is_cardio) {
        let entry = all_time_records.entry(set.exercise.as_str()).or_insert(0.0);
        *entry = entry.max(set.weight());
    }

    let recent_workouts = build_recent_workouts(&recent, &working);
    let top_exercises = build_top_exercises(&working, &all_time_records, cfg);
    let personal_records = build_window_records(&working, cfg);

    tracing::debug!(
        "Summarized {} sessions / {} working sets into coaching context",
        recent.len(),
        working.len()
    );

    TrainingHistory {
        recent_workouts,
        top_exercises,
        personal_records,
    }
}

/// Derive workout sessions from a flat set log.
///
/// The hosted backend stores sessions as their own rows; the local log only
/// has sets, so each distinct date becomes one generic session whose
/// duration spans the first to the last set logged that day.
pub fn sessions_from_sets(sets: &[SetRecord]) -> Vec<WorkoutSession> {
    let mut span: BTreeMap<NaiveDate, (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)> =
        BTreeMap::new();

    for set in sets {
        let entry = span
            .entry(set.session_date)
            .or_insert((set.completed_at, set.completed_at));
        entry.0 = entry.0.min(set.completed_at);
        entry.1 = entry.1.max(set.completed_at);
    }

    span.into_iter()
        .map(|(date, (start, end))| WorkoutSession {
            id: uuid::Uuid::new_v4(),
            date,
            label: "Workout".into(),
            duration_minutes: u32::try_from((end - start).num_minutes()).ok(),
        })
        .collect()
}

fn build_recent_workouts(
    sessions: &[&WorkoutSession],
    working: &[&SetRecord],
) -> Vec<RecentWorkout> {
    sessions
        .iter()
        .map(|session| {
            let day_sets: Vec<&&SetRecord> = working
                .iter()
                .filter(|s| s.session_date == session.date)
                .collect();

            let exercise_count = day_sets
                .iter()
                .map(|s| s.exercise.as_str())
                .collect::<BTreeSet<_>>()
                .len();

            let heaviest_set = day_sets
                .iter()
                .filter(|s| s.weight() > 0.0)
                .max_by(|a, b| a.weight().total_cmp(&b.weight()))
                .map(|s| {
                    format!(
                        "{} {} kg × {}",
                        s.exercise,
                        format_kg(s.weight()),
                        s.rep_count()
                    )
                });

            RecentWorkout {
                date: session.date,
                label: session.label.clone(),
                exercise_count,
                duration_minutes: session.duration_minutes,
                heaviest_set,
            }
        })
        .collect()
}

fn build_top_exercises(
    working: &[&SetRecord],
    all_time_records: &BTreeMap<&str, f64>,
    cfg: &SummaryConfig,
) -> Vec<TopExercise> {
    struct Tally<'a> {
        dates: BTreeSet<NaiveDate>,
        last_set: &'a SetRecord,
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for set in working.iter().copied() {
        if set.is_cardio {
            continue;
        }

        let entry = tallies.entry(set.exercise.as_str()).or_insert(Tally {
            dates: BTreeSet::new(),
            last_set: set,
        });
        entry.dates.insert(set.session_date);
        if set.completed_at > entry.last_set.completed_at {
            entry.last_set = set;
        }
    }

    let mut ranked: Vec<(&str, Tally)> = tallies.into_iter().collect();
    // Most distinct sessions first; BTreeMap order breaks ties by name
    ranked.sort_by(|a, b| b.1.dates.len().cmp(&a.1.dates.len()));
    ranked.truncate(cfg.max_exercises);

    ranked
        .into_iter()
        .map(|(name, tally)| {
            let last_weight = tally.last_set.weight();
            let last_reps = tally.last_set.rep_count();
            let record_weight = all_time_records.get(name).copied().unwrap_or(0.0);
            TopExercise {
                name: name.to_string(),
                times_performed: tally.dates.len(),
                last_weight_kg: last_weight,
                last_reps,
                record_weight_kg: record_weight,
                suggestion: exercise_hint(last_weight, last_reps, record_weight),
            }
        })
        .collect()
}

/// The simplified textual progression hint, evaluated top to bottom
fn exercise_hint(last_weight: f64, last_reps: u32, record_weight: f64) -> String {
    if last_reps >= 10 {
        return format!(
            "Increase to {} kg next time.",
            format_kg(last_weight + HINT_INCREMENT_KG)
        );
    }
    if last_reps < HINT_LOW_REPS && last_weight > HINT_LIGHT_WEIGHT_KG {
        return format!(
            "Drop to {} kg and rebuild your reps.",
            format_kg(last_weight - HINT_INCREMENT_KG)
        );
    }
    if record_weight > 0.0
        && last_weight >= record_weight * HINT_PR_PROXIMITY
        && last_weight <= record_weight
    {
        return format!(
            "Close to your {} kg record. Push for a PR.",
            format_kg(record_weight)
        );
    }
    if last_reps >= 8 {
        return format!("Add 1-2 reps at {} kg.", format_kg(last_weight));
    }
    format!("Keep at {} kg and aim for 8-10 reps.", format_kg(last_weight))
}

fn build_window_records(working: &[&SetRecord], cfg: &SummaryConfig) -> Vec<RecordedLift> {
    // Heaviest set per exercise name; a later strictly-heavier set replaces
    // the held one
    let mut heaviest: BTreeMap<&str, (f64, u32)> = BTreeMap::new();

    for set in working {
        if set.is_cardio || set.weight() <= 0.0 {
            continue;
        }
        let entry = heaviest.entry(set.exercise.as_str()).or_insert((0.0, 0));
        if set.weight() > entry.0 {
            *entry = (set.weight(), set.rep_count());
        }
    }

    let mut lifts: Vec<RecordedLift> = heaviest
        .into_iter()
        .map(|(name, (weight, reps))| RecordedLift {
            exercise: name.to_string(),
            weight_kg: weight,
            reps,
        })
        .collect();

    lifts.sort_by(|a, b| b.weight_kg.total_cmp(&a.weight_kg));
    lifts.truncate(cfg.max_records);
    lifts
}
