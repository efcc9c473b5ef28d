//! Backend abstraction.

use puente_core::MilpProblem;

use crate::config::SolveConfig;
use crate::error::SolveError;
use crate::outcome::SolveOutcome;

/// A solve engine behind the typed surface.
///
/// Implementors own the full engine lifecycle per call: `solve` acquires a
/// fresh engine instance, runs the request to termination, and releases the
/// instance on every exit path, so a backend value itself holds no engine
/// state between calls.
pub trait SolveBackend {
    /// Short engine name, used in logs.
    fn name(&self) -> &'static str;

    /// Solve one problem to termination under the given configuration.
    fn solve(
        &mut self,
        problem: &MilpProblem,
        config: &SolveConfig,
    ) -> Result<SolveOutcome, SolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::SolveStatus;
    use puente_core::{ObjectiveSense, ProblemError};

    /// Backend stub that validates and then claims optimality at zero.
    struct EchoBackend;

    impl SolveBackend for EchoBackend {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn solve(
            &mut self,
            problem: &MilpProblem,
            _config: &SolveConfig,
        ) -> Result<SolveOutcome, SolveError> {
            problem.validate()?;
            Ok(SolveOutcome {
                status: SolveStatus::Optimal,
                objective_value: 0.0,
                solution: Some(vec![0.0; problem.num_variables]),
                solve_time_seconds: 0.0,
                node_count: 0,
                mip_gap: 0.0,
            })
        }
    }

    fn trivial_problem() -> MilpProblem {
        MilpProblem {
            num_variables: 1,
            num_constraints: 0,
            column_starts: vec![0, 0],
            row_indices: vec![],
            values: vec![],
            variable_lower: vec![0.0],
            variable_upper: vec![10.0],
            is_integer: vec![false],
            objective: vec![1.0],
            row_sense: vec![],
            row_rhs: vec![],
            row_range: vec![],
            sense: ObjectiveSense::Minimize,
        }
    }

    #[test]
    fn test_backend_is_object_safe() {
        let mut backend: Box<dyn SolveBackend> = Box::new(EchoBackend);
        assert_eq!(backend.name(), "echo");
        let outcome = backend
            .solve(&trivial_problem(), &SolveConfig::new())
            .expect("stub backend solves");
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_backend_propagates_validation_errors() {
        let mut problem = trivial_problem();
        problem.objective.clear();
        let err = EchoBackend
            .solve(&problem, &SolveConfig::new())
            .expect_err("invalid descriptor");
        assert!(matches!(
            err,
            SolveError::Malformed(ProblemError::DimensionMismatch { .. })
        ));
    }
}
