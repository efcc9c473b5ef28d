//! Instrumentation helpers shared across the puente workspace.

pub mod memory;

pub use memory::{MemoryError, MemorySnapshot};
