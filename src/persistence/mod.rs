//! CSV persistence for the calculation history.
//!
//! One row per calculation, in chronological order, with the header
//! `operation,operand1,operand2,result,timestamp`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CalcValue, Calculation};

/// On-disk row shape. Result and timestamp are stored as strings; the
/// operand columns must parse as numbers.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    operation: String,
    operand1: f64,
    operand2: f64,
    result: String,
    timestamp: String,
}

impl From<&Calculation> for HistoryRow {
    fn from(calc: &Calculation) -> Self {
        Self {
            operation: calc.operation.clone(),
            operand1: calc.operand1,
            operand2: calc.operand2,
            result: calc.result.to_string(),
            timestamp: calc.timestamp_string(),
        }
    }
}

impl TryFrom<HistoryRow> for Calculation {
    type Error = CalcError;

    fn try_from(row: HistoryRow) -> Result<Self, CalcError> {
        Ok(Self {
            operation: row.operation,
            operand1: row.operand1,
            operand2: row.operand2,
            result: CalcValue::parse(&row.result),
            timestamp: crate::calculator::parse_timestamp(&row.timestamp)?,
        })
    }
}

/// Reads and writes the history file at a fixed path.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full history. A missing file is not an error and yields an
    /// empty history; a malformed row is.
    pub fn load(&self) -> Result<Vec<Calculation>, CalcError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            CalcError::Operation(format!("failed to open {}: {e}", self.path.display()))
        })?;

        let mut history = Vec::new();
        for row in reader.deserialize::<HistoryRow>() {
            let row = row.map_err(|e| {
                CalcError::Operation(format!(
                    "malformed row in {}: {e}",
                    self.path.display()
                ))
            })?;
            history.push(Calculation::try_from(row)?);
        }

        Ok(history)
    }

    /// Write the full history, replacing any previous file contents.
    /// Creates the parent directory if needed.
    pub fn save(&self, history: &[Calculation]) -> Result<(), CalcError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::Operation(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| {
            CalcError::Operation(format!("failed to write {}: {e}", self.path.display()))
        })?;

        for calc in history {
            writer
                .serialize(HistoryRow::from(calc))
                .map_err(|e| CalcError::Operation(format!("failed to serialize row: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| CalcError::Operation(format!("failed to flush history: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn sample_history() -> Vec<Calculation> {
        vec![
            Calculation {
                operation: "add".to_string(),
                operand1: 2.0,
                operand2: 3.0,
                result: CalcValue::Number(5.0),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 9, 30, 0).unwrap(),
            },
            Calculation {
                operation: "multiply".to_string(),
                operand1: 4.0,
                operand2: 5.0,
                result: CalcValue::Number(20.0),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 9, 30, 5).unwrap(),
            },
        ]
    }

    #[test]
    fn test_missing_file_yields_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        let history = sample_history();
        store.save(&history).unwrap();
        assert_eq!(store.load().unwrap(), history);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nested/deeper/history.csv"));

        store.save(&sample_history()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_non_numeric_operand_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "operation,operand1,operand2,result,timestamp").unwrap();
        writeln!(file, "add,two,3,5,2026-08-28T09:30:00Z").unwrap();

        let err = HistoryStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CalcError::Operation(_)));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "operation,operand1,operand2,result,timestamp").unwrap();
        writeln!(file, "add,2,3,5,not-a-time").unwrap();

        let err = HistoryStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CalcError::Operation(_)));
    }

    #[test]
    fn test_text_result_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        let history = vec![Calculation {
            operation: "divide".to_string(),
            operand1: 1.0,
            operand2: 0.0,
            result: CalcValue::Text("undefined".to_string()),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 9, 30, 0).unwrap(),
        }];
        store.save(&history).unwrap();
        assert_eq!(store.load().unwrap(), history);
    }
}
