//! Configuration file support for liftlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Progression parameters for the overload advisor.
///
/// Defaults mirror standard barbell training practice: a 10-rep target
/// before adding weight, 2.5 kg plate increments, an 80% deload, and a
/// decline trigger at 90% of the recent average.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_target_reps")]
    pub target_reps: u32,

    #[serde(default = "default_plate_increment_kg")]
    pub plate_increment_kg: f64,

    #[serde(default = "default_deload_factor")]
    pub deload_factor: f64,

    #[serde(default = "default_decline_threshold")]
    pub decline_threshold: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            target_reps: default_target_reps(),
            plate_increment_kg: default_plate_increment_kg(),
            deload_factor: default_deload_factor(),
            decline_threshold: default_decline_threshold(),
        }
    }
}

/// Windowing parameters for the coaching-context summary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    #[serde(default = "default_max_exercises")]
    pub max_exercises: usize,

    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            max_sessions: default_max_sessions(),
            max_exercises: default_max_exercises(),
            max_records: default_max_records(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("liftlog")
}

fn default_target_reps() -> u32 {
    10
}

fn default_plate_increment_kg() -> f64 {
    2.5
}

fn default_deload_factor() -> f64 {
    0.8
}

fn default_decline_threshold() -> f64 {
    0.9
}

fn default_lookback_days() -> i64 {
    30
}

fn default_max_sessions() -> usize {
    10
}

fn default_max_exercises() -> usize {
    8
}

fn default_max_records() -> usize {
    5
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("liftlog").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
