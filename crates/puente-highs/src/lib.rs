//! HiGHS backend for the puente MILP solve service.
//!
//! [`HighsSolver`] implements the engine-agnostic backend trait on top of
//! the raw C API: each request acquires a fresh engine instance, pins it to
//! single-threaded reproducible behavior, loads the descriptor in one shot,
//! runs to termination, and releases the instance unconditionally. All
//! unsafe code lives in [`ffi`].

pub mod ffi;
pub mod solver;
mod status;

pub use ffi::{engine_version, EngineError, EngineStatus, HighsEngine};
pub use solver::{solve_problem, HighsSolver};
