//! Set-history loading.
//!
//! This module merges sets from the JSONL log and the CSV archive to
//! provide the immutable snapshot the core computations run on.

use crate::{Result, SetRecord};
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived sets
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    exercise: String,
    weight_kg: Option<f64>,
    reps: Option<u32>,
    is_warmup: bool,
    is_cardio: bool,
    completed_at: String,
    session_date: String,
}

impl TryFrom<CsvRow> for SetRecord {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let completed_at = DateTime::parse_from_rfc3339(&row.completed_at)
            .map_err(|e| crate::Error::Other(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        let session_date = row
            .session_date
            .parse::<NaiveDate>()
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?;

        Ok(SetRecord {
            id,
            exercise: row.exercise,
            weight_kg: row.weight_kg,
            reps: row.reps,
            is_warmup: row.is_warmup,
            is_cardio: row.is_cardio,
            completed_at,
            session_date,
        })
    }
}

/// Load the full set history from both the log and the CSV archive
///
/// Returns sets sorted by completion time (newest first). Automatically
/// deduplicates sets that appear in both the log and the archive.
pub fn load_all_sets(log_path: &Path, csv_path: &Path) -> Result<Vec<SetRecord>> {
    let mut sets = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from the active log first (most recent)
    if log_path.exists() {
        let log_sets = crate::setlog::read_sets(log_path)?;
        for set in log_sets {
            seen_ids.insert(set.id);
            sets.push(set);
        }
        tracing::debug!("Loaded {} sets from log", sets.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_sets = load_sets_from_csv(csv_path)?;
        let mut csv_count = 0;
        for set in csv_sets {
            if !seen_ids.contains(&set.id) {
                seen_ids.insert(set.id);
                sets.push(set);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} sets from CSV", csv_count);
    }

    // Sort by completed_at, newest first
    sets.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    tracing::info!("Loaded {} total sets", sets.len());

    Ok(sets)
}

/// Load all sets from a CSV archive
fn load_sets_from_csv(path: &Path) -> Result<Vec<SetRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut sets = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match SetRecord::try_from(row) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(sets)
}

/// Filter a loaded snapshot down to one exercise (case-insensitive)
pub fn sets_for_exercise(sets: &[SetRecord], exercise: &str) -> Vec<SetRecord> {
    sets.iter()
        .filter(|s| s.exercise.eq_ignore_ascii_case(exercise))
        .cloned()
        .collect()
}

/// Distinct exercise names in a snapshot, sorted
pub fn exercise_names(sets: &[SetRecord]) -> Vec<String> {
    sets.iter()
        .map(|s| s.exercise.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}
