//! Append-only set log for persistence.
//!
//! Logged sets are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access.

use crate::{Result, SetRecord};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink trait for persisting logged sets
pub trait SetSink {
    fn append(&mut self, set: &SetRecord) -> Result<()>;
}

/// JSONL-based set sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SetSink for JsonlSink {
    fn append(&mut self, set: &SetRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write set as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(set)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended set {} to log", set.id);
        Ok(())
    }
}

/// Read all sets from a log file
pub fn read_sets(path: &Path) -> Result<Vec<SetRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut sets = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SetRecord>(&line) {
            Ok(set) => sets.push(set),
            Err(e) => {
                tracing::warn!("Failed to parse set at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} sets from log", sets.len());
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn create_test_set() -> SetRecord {
        SetRecord {
            id: Uuid::new_v4(),
            exercise: "bench".into(),
            weight_kg: Some(80.0),
            reps: Some(8),
            is_warmup: false,
            is_cardio: false,
            completed_at: Utc::now(),
            session_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_append_and_read_single_set() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.jsonl");

        let set = create_test_set();
        let set_id = set.id;

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&set).unwrap();

        let sets = read_sets(&log_path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, set_id);
        assert_eq!(sets[0].weight_kg, Some(80.0));
    }

    #[test]
    fn test_append_multiple_sets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        for _ in 0..5 {
            sink.append(&create_test_set()).unwrap();
        }

        let sets = read_sets(&log_path).unwrap();
        assert_eq!(sets.len(), 5);
    }

    #[test]
    fn test_read_empty_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nonexistent.jsonl");

        let sets = read_sets(&log_path).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_set()).unwrap();

        // Inject a garbage line and another good record
        {
            let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
            writeln!(file, "{{ not json").unwrap();
        }
        sink.append(&create_test_set()).unwrap();

        let sets = read_sets(&log_path).unwrap();
        assert_eq!(sets.len(), 2);
    }
}
