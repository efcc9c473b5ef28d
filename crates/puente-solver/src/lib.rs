//! Engine-agnostic solve surface.
//!
//! Backends plug in behind [`SolveBackend`]; callers work with
//! [`SolveConfig`], [`SolveOutcome`], [`SolveStatus`], and [`SolveError`]
//! without knowing which engine runs underneath. Terminal solver statuses
//! are values on the outcome; `Err` is reserved for rejected descriptors
//! and engine-level failures.

pub mod config;
pub mod error;
pub mod outcome;
pub mod status;
pub mod traits;

pub use config::SolveConfig;
pub use error::SolveError;
pub use outcome::SolveOutcome;
pub use status::SolveStatus;
pub use traits::SolveBackend;
