//! Classification of raw engine terminations into the public taxonomy.

use puente_solver::SolveStatus;

use crate::ffi::EngineStatus;

/// Relative gap below which the engine itself considers a MIP optimal.
///
/// HiGHS default `mip_rel_gap`. A run that ends "optimal" with a final gap
/// above this value only terminated because a looser gap limit was
/// configured for the request.
const ENGINE_DEFAULT_REL_GAP: f64 = 1e-4;

/// Map the engine's terminal state onto the public status taxonomy.
///
/// Two mappings need request context. An iteration-class stop is reported
/// as a node-limit stop, because the node cap is the only iteration-class
/// limit a session ever configures. An "optimal" stop is reclassified as a
/// gap-limit stop when the request configured one and the final gap shows
/// the engine stopped short of its own optimality tolerance; pure LPs
/// report a non-finite gap and are never reclassified.
pub(crate) fn classify(
    engine_status: EngineStatus,
    gap_limit: Option<f64>,
    final_gap: f64,
) -> SolveStatus {
    match engine_status {
        EngineStatus::Optimal => classify_optimal(gap_limit, final_gap),
        EngineStatus::Infeasible => SolveStatus::Infeasible,
        EngineStatus::Unbounded | EngineStatus::UnboundedOrInfeasible => SolveStatus::Unbounded,
        EngineStatus::TimeLimit => SolveStatus::TimeLimitReached,
        EngineStatus::IterationLimit => SolveStatus::NodeLimitReached,
        EngineStatus::SolutionLimit => SolveStatus::FirstFeasibleReached,
        EngineStatus::Unknown => SolveStatus::Abandoned,
        EngineStatus::Error => SolveStatus::Failed,
    }
}

fn classify_optimal(gap_limit: Option<f64>, final_gap: f64) -> SolveStatus {
    match gap_limit {
        Some(_) if final_gap.is_finite() && final_gap > ENGINE_DEFAULT_REL_GAP => {
            SolveStatus::GapLimitReached
        }
        _ => SolveStatus::Optimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_without_gap_limit_stays_optimal() {
        assert_eq!(
            classify(EngineStatus::Optimal, None, 0.0),
            SolveStatus::Optimal
        );
        // Even a loose final gap is "optimal" when the caller never asked
        // for a gap stop.
        assert_eq!(
            classify(EngineStatus::Optimal, None, 0.2),
            SolveStatus::Optimal
        );
    }

    #[test]
    fn test_gap_limited_stop_is_reclassified() {
        assert_eq!(
            classify(EngineStatus::Optimal, Some(0.1), 0.05),
            SolveStatus::GapLimitReached
        );
    }

    #[test]
    fn test_tight_gap_stays_optimal_under_gap_limit() {
        // Final gap within the engine's own optimality tolerance.
        assert_eq!(
            classify(EngineStatus::Optimal, Some(0.1), 1e-5),
            SolveStatus::Optimal
        );
    }

    #[test]
    fn test_lp_with_non_finite_gap_is_never_reclassified() {
        assert_eq!(
            classify(EngineStatus::Optimal, Some(0.1), f64::INFINITY),
            SolveStatus::Optimal
        );
        assert_eq!(
            classify(EngineStatus::Optimal, Some(0.1), f64::NAN),
            SolveStatus::Optimal
        );
    }

    #[test]
    fn test_iteration_class_stop_maps_to_node_limit() {
        assert_eq!(
            classify(EngineStatus::IterationLimit, None, f64::NAN),
            SolveStatus::NodeLimitReached
        );
    }

    #[test]
    fn test_solution_cap_maps_to_first_feasible() {
        assert_eq!(
            classify(EngineStatus::SolutionLimit, None, 0.3),
            SolveStatus::FirstFeasibleReached
        );
    }

    #[test]
    fn test_unbounded_variants_collapse() {
        assert_eq!(
            classify(EngineStatus::Unbounded, None, f64::NAN),
            SolveStatus::Unbounded
        );
        assert_eq!(
            classify(EngineStatus::UnboundedOrInfeasible, None, f64::NAN),
            SolveStatus::Unbounded
        );
    }

    #[test]
    fn test_terminal_failures() {
        assert_eq!(
            classify(EngineStatus::Unknown, None, f64::NAN),
            SolveStatus::Abandoned
        );
        assert_eq!(
            classify(EngineStatus::Error, None, f64::NAN),
            SolveStatus::Failed
        );
        assert_eq!(
            classify(EngineStatus::Infeasible, Some(0.1), f64::NAN),
            SolveStatus::Infeasible
        );
        assert_eq!(
            classify(EngineStatus::TimeLimit, None, 0.5),
            SolveStatus::TimeLimitReached
        );
    }
}
