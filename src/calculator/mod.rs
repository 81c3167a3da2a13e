//! Calculator core: history, undo/redo snapshots, and observer fan-out.
//!
//! This module provides:
//! - The immutable [`Calculation`] record and its [`CalcValue`] result
//! - [`Memento`] snapshots backing undo/redo
//! - The [`Calculator`] state machine orchestrating execute -> record -> notify

mod calculation;
mod engine;
mod error;
mod memento;

pub use calculation::{CalcValue, Calculation};
pub use engine::Calculator;
pub use error::CalcError;
pub use memento::{Memento, PlainCalculation, PlainMemento};

pub(crate) use memento::parse_timestamp;
