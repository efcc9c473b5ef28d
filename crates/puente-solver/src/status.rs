//! Terminal status taxonomy for solve requests.

use std::fmt;

/// How a solve request terminated.
///
/// Statuses are values, not errors: a solve that hits its time limit is a
/// successful request whose outcome says so. Whether a solution vector
/// accompanies the status is recorded separately on the outcome, since the
/// limit-flavored statuses can occur both with and without an incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Proven optimal within the engine's tolerances.
    Optimal,
    /// Proven infeasible.
    Infeasible,
    /// Proven unbounded (or unbounded-or-infeasible, collapsed).
    Unbounded,
    /// Stopped by the configured wall-clock limit.
    TimeLimitReached,
    /// Stopped by the configured branch-and-bound node cap.
    NodeLimitReached,
    /// Stopped because the relative gap fell below the configured target.
    GapLimitReached,
    /// Stopped at the first feasible solution, as requested.
    FirstFeasibleReached,
    /// The engine terminated without classifying the model.
    Abandoned,
    /// The engine reported an internal error status.
    Failed,
}

impl SolveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::TimeLimitReached => "time_limit_reached",
            SolveStatus::NodeLimitReached => "node_limit_reached",
            SolveStatus::GapLimitReached => "gap_limit_reached",
            SolveStatus::FirstFeasibleReached => "first_feasible_reached",
            SolveStatus::Abandoned => "abandoned",
            SolveStatus::Failed => "failed",
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveStatus::Infeasible)
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, SolveStatus::Unbounded)
    }

    /// True for every status caused by a configured stopping rule.
    pub fn stopped_by_limit(&self) -> bool {
        matches!(
            self,
            SolveStatus::TimeLimitReached
                | SolveStatus::NodeLimitReached
                | SolveStatus::GapLimitReached
                | SolveStatus::FirstFeasibleReached
        )
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
