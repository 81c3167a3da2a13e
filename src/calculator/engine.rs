//! The calculator state machine.
//!
//! Owns the live history, the undo/redo snapshot stacks, the observer
//! list, and the active operation strategy. Orchestrates
//! execute -> record -> notify, and snapshot-based undo/redo.

use tracing::{debug, error, info};

use crate::config::CalculatorConfig;
use crate::observers::{AutoSaveObserver, LoggingObserver, Observer};
use crate::operations::Operation;
use crate::persistence::HistoryStore;

use super::calculation::{CalcValue, Calculation};
use super::error::CalcError;
use super::memento::Memento;

pub struct Calculator {
    config: CalculatorConfig,
    store: HistoryStore,
    history: Vec<Calculation>,
    undo_stack: Vec<Memento>,
    redo_stack: Vec<Memento>,
    observers: Vec<Box<dyn Observer>>,
    operation: Option<Box<dyn Operation>>,
}

impl Calculator {
    /// Build a calculator from a validated configuration. The history is
    /// restored from the persisted file if present (else empty), both
    /// snapshot stacks start empty.
    ///
    /// A configuration validation failure aborts construction. So does a
    /// malformed history file; a missing one does not.
    pub fn new(config: CalculatorConfig) -> Result<Self, CalcError> {
        config.validate()?;

        let store = HistoryStore::new(config.history_path());
        let history = store.load()?;
        info!(
            entries = history.len(),
            path = %store.path().display(),
            "calculator initialized"
        );

        let mut calculator = Self {
            store: store.clone(),
            history,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            observers: Vec::new(),
            operation: None,
            config,
        };
        calculator.trim_history();

        calculator.add_observer(Box::new(LoggingObserver));
        if calculator.config.auto_save {
            calculator.add_observer(Box::new(AutoSaveObserver::new(store)));
        }

        Ok(calculator)
    }

    /// The live history, in chronological order.
    pub fn history(&self) -> &[Calculation] {
        &self.history
    }

    /// Decimal places to use when displaying results.
    pub fn precision(&self) -> u32 {
        self.config.precision
    }

    /// Select the operation strategy applied by the next
    /// [`Calculator::perform_operation`] call.
    pub fn set_operation(&mut self, operation: Box<dyn Operation>) {
        debug!(operation = operation.name(), "operation selected");
        self.operation = Some(operation);
    }

    /// Execute the active strategy, record the result, and notify all
    /// observers in registration order.
    ///
    /// Fails with an operation error when no strategy is set. Validation
    /// errors raised by the strategy (or by the operand limit check)
    /// propagate unchanged; any other strategy failure is wrapped into an
    /// operation error carrying the cause.
    pub fn perform_operation(&mut self, a: f64, b: f64) -> Result<Calculation, CalcError> {
        let Some(operation) = self.operation.as_deref() else {
            return Err(CalcError::Operation("No operation set".to_string()));
        };

        self.check_operand(a)?;
        self.check_operand(b)?;

        let name = operation.name();
        let result = match operation.execute(a, b) {
            Ok(value) => value,
            Err(err @ CalcError::Validation(_)) => return Err(err),
            Err(other) => return Err(CalcError::Operation(other.to_string())),
        };

        // A non-finite number has no raw form that reloads as a number, so
        // recording one would corrupt persisted histories.
        if let CalcValue::Number(value) = result
            && !value.is_finite()
        {
            return Err(CalcError::Operation(format!(
                "operation '{name}' produced a non-finite result ({value})"
            )));
        }

        // Snapshot the pre-operation state so the new entry is undoable,
        // and invalidate any redo branch.
        self.undo_stack.push(Memento::capture(&self.history));
        self.redo_stack.clear();

        let calculation = Calculation::new(name, a, b, result);
        self.history.push(calculation.clone());
        self.trim_history();

        self.notify_observers(&calculation)?;
        Ok(calculation)
    }

    /// Restore the most recent snapshot. Returns `false` and changes
    /// nothing when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(memento) = self.undo_stack.pop() else {
            debug!("undo requested with empty undo stack");
            return false;
        };
        self.redo_stack.push(Memento::capture(&self.history));
        self.history = memento.into_history();
        info!(entries = self.history.len(), "history restored via undo");
        true
    }

    /// Inverse of [`Calculator::undo`]. Returns `false` and changes
    /// nothing when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(memento) = self.redo_stack.pop() else {
            debug!("redo requested with empty redo stack");
            return false;
        };
        self.undo_stack.push(Memento::capture(&self.history));
        self.history = memento.into_history();
        info!(entries = self.history.len(), "history restored via redo");
        true
    }

    /// Drop the live history and both snapshot stacks. Irreversible.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
        info!("history cleared");
    }

    /// Persist the live history to the configured file.
    pub fn save_history(&self) -> Result<(), CalcError> {
        self.store.save(&self.history)?;
        info!(entries = self.history.len(), "history saved");
        Ok(())
    }

    /// Replace the live history with the persisted file's contents,
    /// trimmed to the configured size. A missing file yields an empty
    /// history.
    pub fn load_history(&mut self) -> Result<(), CalcError> {
        self.history = self.store.load()?;
        self.trim_history();
        info!(entries = self.history.len(), "history loaded");
        Ok(())
    }

    /// Register an observer. Duplicates are allowed; notification follows
    /// registration order.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        debug!(observer = observer.name(), "observer registered");
        self.observers.push(observer);
    }

    /// Remove the first observer registered under `name`.
    pub fn remove_observer(&mut self, name: &str) -> Result<(), CalcError> {
        let Some(index) = self.observers.iter().position(|o| o.name() == name) else {
            return Err(CalcError::UnknownObserver(name.to_string()));
        };
        self.observers.remove(index);
        debug!(observer = name, "observer removed");
        Ok(())
    }

    fn check_operand(&self, value: f64) -> Result<(), CalcError> {
        if !value.is_finite() || value.abs() > self.config.max_input_value {
            return Err(CalcError::Validation(format!(
                "operand {value} is not a finite number within the maximum input value {}",
                self.config.max_input_value
            )));
        }
        Ok(())
    }

    fn trim_history(&mut self) {
        let max = self.config.max_history_size;
        if self.history.len() > max {
            let excess = self.history.len() - max;
            self.history.drain(..excess);
        }
    }

    /// Notify every observer once, in registration order. A failing
    /// observer is logged and does not stop the pass; the first failure is
    /// reported to the caller after the pass completes. The recorded
    /// calculation stays in the history either way.
    fn notify_observers(&mut self, calculation: &Calculation) -> Result<(), CalcError> {
        let mut first_failure = None;
        let history = self.history.as_slice();
        for observer in self.observers.iter_mut() {
            if let Err(err) = observer.update(calculation, history) {
                error!(observer = observer.name(), error = %err, "observer update failed");
                if first_failure.is_none() {
                    first_failure = Some(format!("observer '{}': {err}", observer.name()));
                }
            }
        }
        match first_failure {
            Some(message) => Err(CalcError::Operation(message)),
            None => Ok(()),
        }
    }
}
