//! Failure taxonomy for solve requests.

use std::fmt;

use puente_core::ProblemError;

/// Why a solve request could not produce an outcome.
///
/// Terminal solver statuses (time limit, infeasible, ...) are not errors;
/// they flow through the outcome's status field. This enum covers the three
/// ways a request fails outright: the descriptor was rejected before any
/// engine existed, the engine could not be created, or an engine API call
/// failed mid-session.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Descriptor validation failed; no engine handle was acquired.
    Malformed(ProblemError),
    /// A fresh engine instance could not be created.
    EngineUnavailable(String),
    /// An engine API call (option, load, run, extraction) failed.
    Engine(String),
}

impl SolveError {
    /// Stable semantic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::Malformed(_) => "SOLVE_MALFORMED_PROBLEM",
            SolveError::EngineUnavailable(_) => "SOLVE_ENGINE_UNAVAILABLE",
            SolveError::Engine(_) => "SOLVE_ENGINE_FAILURE",
        }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Malformed(inner) => {
                write!(f, "[{}] Problem rejected: {}", self.code(), inner)
            }
            SolveError::EngineUnavailable(reason) => {
                write!(f, "[{}] Engine unavailable: {}", self.code(), reason)
            }
            SolveError::Engine(reason) => {
                write!(f, "[{}] Engine failure: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Malformed(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ProblemError> for SolveError {
    fn from(err: ProblemError) -> Self {
        SolveError::Malformed(err)
    }
}
