//! Result of one solve request.

use crate::status::SolveStatus;

/// Everything a solve session reports back for one request.
///
/// The solution vector is present exactly when the engine reported a
/// feasible primal solution: always for [`SolveStatus::Optimal`] and
/// [`SolveStatus::FirstFeasibleReached`], sometimes for the limit statuses
/// (the engine may stop before banking an incumbent). `objective_value` and
/// `mip_gap` are `NAN` when the engine had nothing to report.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// How the solve terminated.
    pub status: SolveStatus,
    /// Objective value of the reported solution, `NAN` without one.
    pub objective_value: f64,
    /// One value per variable, in descriptor order.
    pub solution: Option<Vec<f64>>,
    /// Wall-clock duration of the engine run.
    pub solve_time_seconds: f64,
    /// Branch-and-bound nodes explored.
    pub node_count: i64,
    /// Final relative gap reported by the engine, `NAN` when not reported
    /// (pure LPs, failed runs).
    pub mip_gap: f64,
}

impl SolveOutcome {
    /// True when the engine reported a feasible primal solution.
    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Value of one variable in the reported solution, if any.
    pub fn variable_value(&self, index: usize) -> Option<f64> {
        self.solution.as_ref().and_then(|values| values.get(index)).copied()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_solution_accessors() {
        let outcome = SolveOutcome {
            status: SolveStatus::Optimal,
            objective_value: 12.5,
            solution: Some(vec![1.0, 0.0, 3.5]),
            solve_time_seconds: 0.01,
            node_count: 0,
            mip_gap: 0.0,
        };
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.variable_value(2), Some(3.5));
        assert_eq!(outcome.variable_value(3), None);
    }

    #[test]
    fn test_limit_stop_without_incumbent() {
        let outcome = SolveOutcome {
            status: SolveStatus::TimeLimitReached,
            objective_value: f64::NAN,
            solution: None,
            solve_time_seconds: 1.0,
            node_count: 40,
            mip_gap: f64::NAN,
        };
        assert!(!outcome.has_solution());
        assert!(outcome.status.stopped_by_limit());
        assert!(outcome.objective_value.is_nan());
        assert_eq!(outcome.variable_value(0), None);
    }
}
