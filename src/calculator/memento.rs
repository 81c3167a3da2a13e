//! Point-in-time snapshots of the history, used for undo/redo.
//!
//! A memento owns an independent copy of the history sequence. Later
//! mutation of the live history can never retroactively change a stored
//! snapshot.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::calculation::{CalcValue, Calculation};
use super::error::CalcError;

/// Frozen copy of a history sequence plus its capture time.
#[derive(Clone, Debug, PartialEq)]
pub struct Memento {
    history: Vec<Calculation>,
    timestamp: DateTime<Utc>,
}

/// Plain-mapping form of a single calculation, with ISO-8601 timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlainCalculation {
    pub operation: String,
    pub operand1: f64,
    pub operand2: f64,
    pub result: String,
    pub timestamp: String,
}

/// Plain-mapping form of a memento.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlainMemento {
    pub history: Vec<PlainCalculation>,
    pub timestamp: String,
}

impl Memento {
    /// Capture a snapshot of `history`, stamped with the current time.
    pub fn capture(history: &[Calculation]) -> Self {
        Self {
            history: history.to_vec(),
            timestamp: Utc::now(),
        }
    }

    /// The stored history.
    pub fn history(&self) -> &[Calculation] {
        &self.history
    }

    /// Consume the memento, yielding its stored history.
    pub fn into_history(self) -> Vec<Calculation> {
        self.history
    }

    /// Capture time of this snapshot.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Convert to a nested plain structure with string timestamps.
    pub fn to_plain_form(&self) -> PlainMemento {
        PlainMemento {
            history: self
                .history
                .iter()
                .map(|calc| PlainCalculation {
                    operation: calc.operation.clone(),
                    operand1: calc.operand1,
                    operand2: calc.operand2,
                    result: calc.result.to_string(),
                    timestamp: calc.timestamp_string(),
                })
                .collect(),
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Exact inverse of [`Memento::to_plain_form`]. Reconstructs the memento
    /// to the precision the timestamp format preserves (whole seconds).
    pub fn from_plain_form(plain: &PlainMemento) -> Result<Self, CalcError> {
        let history = plain
            .history
            .iter()
            .map(|entry| {
                Ok(Calculation {
                    operation: entry.operation.clone(),
                    operand1: entry.operand1,
                    operand2: entry.operand2,
                    result: CalcValue::parse(&entry.result),
                    timestamp: parse_timestamp(&entry.timestamp)?,
                })
            })
            .collect::<Result<Vec<_>, CalcError>>()?;

        Ok(Self {
            history,
            timestamp: parse_timestamp(&plain.timestamp)?,
        })
    }
}

/// Parse an ISO-8601 timestamp string back into UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CalcError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CalcError::Operation(format!("invalid timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_history() -> Vec<Calculation> {
        vec![
            Calculation {
                operation: "add".to_string(),
                operand1: 2.0,
                operand2: 3.0,
                result: CalcValue::Number(5.0),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap(),
            },
            Calculation {
                operation: "divide".to_string(),
                operand1: 1.0,
                operand2: 3.0,
                result: CalcValue::Number(1.0 / 3.0),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 1).unwrap(),
            },
        ]
    }

    #[test]
    fn test_capture_is_independent_copy() {
        let mut history = sample_history();
        let memento = Memento::capture(&history);

        history.clear();
        assert_eq!(memento.history().len(), 2);
        assert_eq!(memento.history()[0].operation, "add");
    }

    #[test]
    fn test_plain_form_round_trip() {
        let memento = Memento {
            history: sample_history(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 2).unwrap(),
        };

        let restored = Memento::from_plain_form(&memento.to_plain_form()).unwrap();
        assert_eq!(restored, memento);
    }

    #[test]
    fn test_plain_form_uses_iso_8601() {
        let memento = Memento {
            history: sample_history(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 2).unwrap(),
        };

        let plain = memento.to_plain_form();
        assert_eq!(plain.timestamp, "2026-08-28T12:00:02Z");
        assert_eq!(plain.history[0].timestamp, "2026-08-28T12:00:00Z");
        assert_eq!(plain.history[0].result, "5");
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let mut plain = Memento::capture(&sample_history()).to_plain_form();
        plain.history[0].timestamp = "yesterday".to_string();

        let err = Memento::from_plain_form(&plain).unwrap_err();
        assert!(matches!(err, CalcError::Operation(_)));
    }
}
