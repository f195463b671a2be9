//! Goal persistence with file locking.
//!
//! This module handles saving and loading the user's goal book with proper
//! file locking to prevent concurrent access issues.

use crate::{Error, Goal, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The user's persisted lifting goals
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GoalBook {
    pub goals: Vec<Goal>,
}

impl GoalBook {
    /// Goals for one exercise (case-insensitive match)
    pub fn goals_for(&self, exercise: &str) -> Vec<Goal> {
        self.goals
            .iter()
            .filter(|g| g.exercise.eq_ignore_ascii_case(exercise))
            .cloned()
            .collect()
    }

    /// Load the goal book from a file with shared locking
    ///
    /// Returns an empty book if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty book.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No goal file found, using empty goal book");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open goal file {:?}: {}. Using empty book.", path, e);
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock goal file {:?}: {}. Using empty book.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read goal file {:?}: {}. Using empty book.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<GoalBook>(&contents) {
            Ok(book) => {
                tracing::debug!("Loaded {} goals from {:?}", book.goals.len(), path);
                Ok(book)
            }
            Err(e) => {
                tracing::warn!("Failed to parse goal file {:?}: {}. Using empty book.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the goal book to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "goal path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old goal file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} goals to {:?}", self.goals.len(), path);
        Ok(())
    }

    /// Load the book, modify it, and save it back atomically
    ///
    /// This is a convenience method that handles the load-modify-save
    /// pattern with proper error handling.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut GoalBook) -> Result<()>,
    {
        let mut book = Self::load(path)?;
        f(&mut book)?;
        book.save(path)?;
        Ok(book)
    }
}
