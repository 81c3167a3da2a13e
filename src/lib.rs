//! reckon: an interactive arithmetic calculator.
//!
//! Records every computed operation as a history entry, supports
//! snapshot-based undo/redo, persists the history to a CSV file, and
//! notifies registered observers whenever a new calculation is recorded.

pub mod calculator;
pub mod config;
pub mod logging;
pub mod observers;
pub mod operations;
pub mod persistence;
pub mod repl;
