//! Observers notified after each recorded calculation.
//!
//! Observers are invoked synchronously, in registration order, exactly once
//! per new calculation. The full history is passed alongside the new entry
//! so persistence-oriented observers do not need to reach back into the
//! calculator.

use tracing::info;

use crate::calculator::{CalcError, Calculation};
use crate::persistence::HistoryStore;

/// A registered listener for newly recorded calculations.
pub trait Observer {
    /// Stable name used for registration lookup and log attribution.
    fn name(&self) -> &str;

    /// Called once for each newly recorded calculation.
    fn update(
        &mut self,
        calculation: &Calculation,
        history: &[Calculation],
    ) -> Result<(), CalcError>;
}

/// Logs every calculation. Never fails; logging problems must not abort
/// the operation pipeline.
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        "logger"
    }

    fn update(
        &mut self,
        calculation: &Calculation,
        history: &[Calculation],
    ) -> Result<(), CalcError> {
        info!(
            operation = %calculation.operation,
            operand1 = calculation.operand1,
            operand2 = calculation.operand2,
            result = %calculation.result,
            history_len = history.len(),
            "calculation recorded"
        );
        Ok(())
    }
}

/// Persists the full history after every calculation. Persistence failures
/// surface as the observer's own update failure.
pub struct AutoSaveObserver {
    store: HistoryStore,
}

impl AutoSaveObserver {
    pub fn new(store: HistoryStore) -> Self {
        Self { store }
    }
}

impl Observer for AutoSaveObserver {
    fn name(&self) -> &str {
        "autosave"
    }

    fn update(
        &mut self,
        _calculation: &Calculation,
        history: &[Calculation],
    ) -> Result<(), CalcError> {
        self.store.save(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcValue;

    #[test]
    fn test_logging_observer_never_fails() {
        let calc = Calculation::new("add", 2.0, 3.0, CalcValue::Number(5.0));
        let history = vec![calc.clone()];
        assert!(LoggingObserver.update(&calc, &history).is_ok());
    }

    #[test]
    fn test_autosave_writes_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        let mut observer = AutoSaveObserver::new(store.clone());

        let calc = Calculation::new("add", 2.0, 3.0, CalcValue::Number(5.0));
        let history = vec![calc.clone()];
        observer.update(&calc, &history).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].operation, "add");
    }

    #[test]
    fn test_autosave_propagates_write_failure() {
        // A directory path cannot be opened as a file for writing.
        let dir = tempfile::tempdir().unwrap();
        let mut observer = AutoSaveObserver::new(HistoryStore::new(dir.path()));

        let calc = Calculation::new("add", 2.0, 3.0, CalcValue::Number(5.0));
        let err = observer.update(&calc, &[calc.clone()]).unwrap_err();
        assert!(matches!(err, CalcError::Operation(_)));
    }
}
