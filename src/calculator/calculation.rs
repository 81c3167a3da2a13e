//! The immutable record of a single arithmetic event.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Result of an arithmetic operation.
///
/// Most operations produce a plain number, but a result cell read back
/// from the history file may carry a non-numeric display form, so both
/// shapes are representable.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcValue {
    /// A finite numeric result.
    Number(f64),
    /// A non-numeric display form.
    Text(String),
}

impl CalcValue {
    /// Parse a raw result cell. Anything that is not a finite number is
    /// kept verbatim as text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Format for display, rounding numbers to `precision` decimal places
    /// and trimming trailing zeros.
    pub fn display_with(&self, precision: u32) -> String {
        match self {
            Self::Number(value) => {
                let formatted = format!("{:.*}", precision as usize, value);
                if formatted.contains('.') {
                    formatted
                        .trim_end_matches('0')
                        .trim_end_matches('.')
                        .to_string()
                } else {
                    formatted
                }
            }
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for CalcValue {
    /// Raw form, as stored in the history file. `f64::to_string` is the
    /// shortest representation that round-trips through `parse`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One recorded arithmetic event. Created exactly once per successful
/// operation, immutable thereafter, owned by the history it is appended to.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    /// Label of the applied operator (e.g. "add").
    pub operation: String,
    /// First operand.
    pub operand1: f64,
    /// Second operand.
    pub operand2: f64,
    /// The produced result.
    pub result: CalcValue,
    /// Creation time. Never mutated.
    pub timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Record a new calculation, stamped with the current time.
    pub fn new(operation: &str, operand1: f64, operand2: f64, result: CalcValue) -> Self {
        Self {
            operation: operation.to_string(),
            operand1,
            operand2,
            result,
            timestamp: Utc::now(),
        }
    }

    /// Timestamp as an ISO-8601 string, to second precision.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operation, self.operand1, self.operand2, self.result
        )
    }
}
