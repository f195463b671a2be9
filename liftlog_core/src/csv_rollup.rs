//! CSV rollup functionality for archiving the set log.
//!
//! This module implements atomic log-to-CSV conversion with proper error
//! handling to prevent data loss.

use crate::{Result, SetRecord};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV archive
#[derive(Debug, serde::Serialize)]
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

impl From<&SetRecord> for CsvRow {
    fn from(set: &SetRecord) -> Self {
        CsvRow {
            id: set.id.to_string(),
            exercise: set.exercise.clone(),
            weight_kg: set.weight_kg,
            reps: set.reps,
            is_warmup: set.is_warmup,
            is_cardio: set.is_cardio,
            completed_at: set.completed_at.to_rfc3339(),
            session_date: set.session_date.to_string(),
        }
    }
}

/// Roll up logged sets into CSV and archive the log atomically
///
/// This function:
/// 1. Reads all sets from the JSONL log
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the log to .processed
/// 5. Returns the number of sets processed
///
/// # Safety
/// - CSV is fsynced before the log is renamed
/// - The log is renamed (not deleted) to allow manual recovery if needed
/// - Processed log files can be cleaned up manually
pub fn log_to_csv_and_archive(log_path: &Path, csv_path: &Path) -> Result<usize> {
    let sets = crate::setlog::read_sets(log_path)?;

    if sets.is_empty() {
        tracing::info!("No sets in log to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open CSV file for appending
    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    // Determine if we need to write headers by checking file size after
    // opening; for appends to an existing archive they must be skipped
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for set in &sets {
        let row = CsvRow::from(set);
        writer.serialize(row)?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} sets to CSV", sets.len());

    // Atomically archive the log by renaming it
    let processed_path = log_path.with_extension("jsonl.processed");
    std::fs::rename(log_path, &processed_path)?;

    tracing::info!("Archived set log to {:?}", processed_path);

    Ok(sets.len())
}

/// Clean up old processed log files
///
/// This removes all .jsonl.processed files in the given directory.
pub fn cleanup_processed_logs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed log: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed log files", count);
    }

    Ok(count)
}
