//! Calculator configuration.
//!
//! Loaded from a TOML file, with sensible defaults under the user's local
//! data directory. Validation runs once at calculator construction and a
//! failure is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calculator::CalcError;

fn default_history_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reckon")
}

fn default_history_file() -> String {
    "history.csv".to_string()
}

fn default_log_dir() -> PathBuf {
    default_history_dir().join("logs")
}

fn default_log_file() -> String {
    "reckon.log".to_string()
}

fn default_max_history_size() -> usize {
    1000
}

fn default_auto_save() -> bool {
    true
}

fn default_precision() -> u32 {
    10
}

fn default_max_input_value() -> f64 {
    1e12
}

#[derive(Clone, Debug, Deserialize)]
pub struct CalculatorConfig {
    /// Directory holding the history file.
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
    /// History file name within `history_dir`.
    #[serde(default = "default_history_file")]
    pub history_file: String,
    /// Directory holding the log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name within `log_dir`.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Maximum number of history entries kept in memory; oldest entries
    /// are dropped first.
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,
    /// Persist the history automatically after every calculation.
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    /// Decimal places shown for results.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Largest operand magnitude accepted by `perform_operation`.
    #[serde(default = "default_max_input_value")]
    pub max_input_value: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_dir: default_history_dir(),
            history_file: default_history_file(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            max_history_size: default_max_history_size(),
            auto_save: default_auto_save(),
            precision: default_precision(),
            max_input_value: default_max_input_value(),
        }
    }
}

impl CalculatorConfig {
    /// Load and parse a TOML configuration file. Missing fields fall back
    /// to their defaults.
    pub fn load(path: &Path) -> Result<Self, CalcError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CalcError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            CalcError::Configuration(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Reject configurations the calculator cannot run with.
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.max_history_size == 0 {
            return Err(CalcError::Configuration(
                "max_history_size must be positive".to_string(),
            ));
        }
        if !(self.max_input_value.is_finite() && self.max_input_value > 0.0) {
            return Err(CalcError::Configuration(
                "max_input_value must be positive and finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the history file.
    pub fn history_path(&self) -> PathBuf {
        self.history_dir.join(&self.history_file)
    }
}
