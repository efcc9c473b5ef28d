//! Core problem types for the puente MILP solve service.
//!
//! This crate defines the engine-agnostic half of a solve request: a
//! mixed-integer linear program in compressed sparse column layout
//! ([`MilpProblem`]), the row-sense algebra used to derive constraint
//! activity bounds ([`RowSense`]), and the validation pass every solve
//! session runs before touching an engine.

pub mod error;
pub mod problem;
pub mod types;

pub use error::ProblemError;
pub use problem::MilpProblem;
pub use types::{ObjectiveSense, RowSense};
