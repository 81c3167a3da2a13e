//! Arithmetic operation strategies.
//!
//! Each operation is a small pluggable strategy the calculator executes
//! through the [`Operation`] trait. Invalid operand combinations are
//! validation errors and reach the caller unchanged.

use crate::calculator::{CalcError, CalcValue};

/// A single arithmetic transformation, selected at runtime.
pub trait Operation {
    /// Label recorded in the history (e.g. "add").
    fn name(&self) -> &'static str;

    /// Apply the operation to two operands.
    fn execute(&self, a: f64, b: f64) -> Result<CalcValue, CalcError>;
}

pub struct Addition;

impl Operation for Addition {
    fn name(&self) -> &'static str {
        "add"
    }

    fn execute(&self, a: f64, b: f64) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::Number(a + b))
    }
}

pub struct Subtraction;

impl Operation for Subtraction {
    fn name(&self) -> &'static str {
        "subtract"
    }

    fn execute(&self, a: f64, b: f64) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::Number(a - b))
    }
}

pub struct Multiplication;

impl Operation for Multiplication {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn execute(&self, a: f64, b: f64) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::Number(a * b))
    }
}

pub struct Division;

impl Operation for Division {
    fn name(&self) -> &'static str {
        "divide"
    }

    fn execute(&self, a: f64, b: f64) -> Result<CalcValue, CalcError> {
        if b == 0.0 {
            return Err(CalcError::Validation(
                "Division by zero is not allowed.".to_string(),
            ));
        }
        Ok(CalcValue::Number(a / b))
    }
}

/// Look up an operation strategy by its label.
pub fn operation_for(name: &str) -> Option<Box<dyn Operation>> {
    match name {
        "add" => Some(Box::new(Addition)),
        "subtract" => Some(Box::new(Subtraction)),
        "multiply" => Some(Box::new(Multiplication)),
        "divide" => Some(Box::new(Division)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        assert_eq!(Addition.execute(1.0, 1.0).unwrap(), CalcValue::Number(2.0));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(
            Subtraction.execute(1.0, 1.0).unwrap(),
            CalcValue::Number(0.0)
        );
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(
            Multiplication.execute(2.0, 2.0).unwrap(),
            CalcValue::Number(4.0)
        );
    }

    #[test]
    fn test_division() {
        assert_eq!(Division.execute(4.0, 2.0).unwrap(), CalcValue::Number(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        let err = Division.execute(1.0, 0.0).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Division by zero is not allowed.");
    }

    #[test]
    fn test_operation_lookup() {
        assert_eq!(operation_for("add").unwrap().name(), "add");
        assert_eq!(operation_for("divide").unwrap().name(), "divide");
        assert!(operation_for("modulo").is_none());
    }
}
