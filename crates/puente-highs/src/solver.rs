//! The HiGHS solve session.
//!
//! One request drives one engine instance through a fixed pipeline:
//! validate the descriptor, acquire a fresh engine, pin the reproducibility
//! parameters, load the whole problem in one call, apply the optional
//! limits and flags, run blocking, extract, release. The engine handle is
//! scoped to [`solve_problem`], so release happens on every exit path.

use std::time::Instant;

use puente_core::MilpProblem;
use puente_solver::{SolveBackend, SolveConfig, SolveError, SolveOutcome, SolveStatus};
use puente_tools::MemorySnapshot;
use tracing::{debug, trace, warn};

use crate::ffi::{engine_version, EngineError, HighsEngine, HighsInt};
use crate::status::classify;

const BACKEND_NAME: &str = "highs";

/// The HiGHS-backed solve backend.
///
/// Stateless between calls: every solve acquires and releases its own
/// engine instance, so a single value can serve any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }
}

impl SolveBackend for HighsSolver {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn solve(
        &mut self,
        problem: &MilpProblem,
        config: &SolveConfig,
    ) -> Result<SolveOutcome, SolveError> {
        solve_problem(problem, config)
    }
}

/// Solve one problem to termination under the given configuration.
///
/// # Errors
///
/// Returns [`SolveError::Malformed`] for descriptors that fail validation
/// (no engine is acquired in that case), [`SolveError::EngineUnavailable`]
/// when no engine instance can be created, and [`SolveError::Engine`] when
/// an engine call fails mid-session. Terminal solver statuses are not
/// errors; they arrive in the outcome.
pub fn solve_problem(
    problem: &MilpProblem,
    config: &SolveConfig,
) -> Result<SolveOutcome, SolveError> {
    problem.validate()?;

    let version = engine_version().unwrap_or_else(|| "unknown".to_string());
    let memory_before = MemorySnapshot::capture().ok();
    debug!(
        component = "session",
        operation = "solve",
        status = "success",
        solver = BACKEND_NAME,
        solver_version = %version,
        num_variables = problem.num_variables,
        num_constraints = problem.num_constraints,
        num_nonzeros = problem.num_nonzeros(),
        sense = problem.sense.as_str(),
        rss_mb = memory_before.as_ref().map(MemorySnapshot::rss_mb),
        "Starting solve session"
    );

    let mut engine = HighsEngine::new().map_err(acquisition_error)?;

    apply_output_options(&mut engine, config).map_err(engine_error)?;
    apply_reproducibility_options(&mut engine, config).map_err(engine_error)?;

    let (row_lower, row_upper) = row_bounds(problem);
    engine
        .pass_mip(
            problem.num_variables,
            problem.num_constraints,
            problem.sense,
            &problem.objective,
            &problem.variable_lower,
            &problem.variable_upper,
            &row_lower,
            &row_upper,
            &problem.column_starts,
            &problem.row_indices,
            &problem.values,
            &problem.is_integer,
        )
        .map_err(engine_error)?;

    apply_limit_options(&mut engine, config).map_err(engine_error)?;
    apply_termination_flags(&mut engine, config).map_err(engine_error)?;
    dump_model_files(&engine, config).map_err(engine_error)?;

    // The engine derives its thread budget from the host environment when
    // left unset, and this wrapper cannot audit what the host allows.
    // Sequential execution is the pinned default; identical requests must
    // not diverge based on ambient CPU topology.
    engine
        .set_string_option(c"parallel", c"off")
        .map_err(engine_error)?;
    engine
        .set_int_option(c"threads", 1)
        .map_err(engine_error)?;

    let started = Instant::now();
    engine.run().map_err(engine_error)?;
    let solve_time_seconds = started.elapsed().as_secs_f64();

    let engine_status = engine.model_status();
    let solution = engine.primal_solution(problem.num_variables, problem.num_constraints);
    let mip_gap = engine.double_info(c"mip_gap").unwrap_or(f64::NAN);
    let node_count = engine.int64_info(c"mip_node_count").unwrap_or(0);
    let objective_value = if solution.is_some() {
        engine.objective_value()
    } else {
        f64::NAN
    };
    let status = classify(engine_status, config.effective_gap_limit(), mip_gap);

    if matches!(status, SolveStatus::Abandoned | SolveStatus::Failed) {
        warn!(
            component = "session",
            operation = "solve",
            status = "failure",
            solver = BACKEND_NAME,
            solve_status = status.as_str(),
            ?engine_status,
            "Engine terminated without classifying the model"
        );
    } else if solution.is_none() {
        warn!(
            component = "session",
            operation = "solve",
            status = "warning",
            solver = BACKEND_NAME,
            solve_status = status.as_str(),
            ?engine_status,
            "Engine stopped without a feasible solution"
        );
    }

    let memory_after = MemorySnapshot::capture().ok();
    let rss_delta_bytes = match (&memory_before, &memory_after) {
        (Some(before), Some(after)) => Some(after.delta_rss(before)),
        _ => None,
    };
    debug!(
        component = "session",
        operation = "solve",
        status = "success",
        solver = BACKEND_NAME,
        solve_status = status.as_str(),
        objective_value,
        node_count,
        mip_gap,
        solve_time_seconds,
        rss_delta_bytes,
        "Solve session finished"
    );

    Ok(SolveOutcome {
        status,
        objective_value,
        solution,
        solve_time_seconds,
        node_count,
        mip_gap,
    })
}

/// Row activity intervals derived from the sense/rhs/range triplets.
fn row_bounds(problem: &MilpProblem) -> (Vec<f64>, Vec<f64>) {
    let mut row_lower = Vec::with_capacity(problem.num_constraints);
    let mut row_upper = Vec::with_capacity(problem.num_constraints);
    for row in 0..problem.num_constraints {
        let (lower, upper) =
            problem.row_sense[row].bounds(problem.row_rhs[row], problem.row_range[row]);
        row_lower.push(lower);
        row_upper.push(upper);
    }
    (row_lower, row_upper)
}

fn apply_output_options(
    engine: &mut HighsEngine,
    config: &SolveConfig,
) -> Result<(), EngineError> {
    let verbose = config.verbosity > 0;
    engine.set_bool_option(c"output_flag", verbose)?;
    if verbose {
        engine.set_bool_option(c"log_to_console", true)?;
    }
    trace!(
        component = "session",
        operation = "configure",
        verbosity = config.verbosity,
        output_enabled = verbose,
        "Applied output options"
    );
    Ok(())
}

/// Fixed parameters applied to every request so identical inputs replay
/// identically. Deliberately not exposed on the config: presolve and the
/// primal heuristics reshape the search unpredictably across engine builds,
/// and the seed is the one reproducibility knob callers control.
fn apply_reproducibility_options(
    engine: &mut HighsEngine,
    config: &SolveConfig,
) -> Result<(), EngineError> {
    engine.set_string_option(c"presolve", c"off")?;
    engine.set_bool_option(c"mip_detect_symmetry", false)?;
    engine.set_double_option(c"mip_heuristic_effort", 0.0)?;
    engine.set_int_option(c"random_seed", config.random_seed)?;
    trace!(
        component = "session",
        operation = "configure",
        random_seed = config.random_seed,
        "Applied reproducibility options"
    );
    Ok(())
}

/// Optional termination limits; anything non-positive never reaches the
/// engine.
fn apply_limit_options(
    engine: &mut HighsEngine,
    config: &SolveConfig,
) -> Result<(), EngineError> {
    if let Some(seconds) = config.effective_time_limit() {
        engine.set_double_option(c"time_limit", seconds)?;
        trace!(
            component = "session",
            operation = "configure",
            time_limit_seconds = seconds,
            "Applied time limit"
        );
    }
    if let Some(nodes) = config.effective_node_limit() {
        let capped = nodes.min(HighsInt::MAX as i64) as HighsInt;
        engine.set_int_option(c"mip_max_nodes", capped)?;
        trace!(
            component = "session",
            operation = "configure",
            node_limit = capped,
            "Applied node limit"
        );
    }
    if let Some(gap) = config.effective_gap_limit() {
        engine.set_double_option(c"mip_rel_gap", gap)?;
        trace!(
            component = "session",
            operation = "configure",
            gap_limit = gap,
            "Applied relative gap limit"
        );
    }
    Ok(())
}

fn apply_termination_flags(
    engine: &mut HighsEngine,
    config: &SolveConfig,
) -> Result<(), EngineError> {
    if config.first_feasible {
        engine.set_int_option(c"mip_max_improving_sols", 1)?;
        trace!(
            component = "session",
            operation = "configure",
            "Stopping at the first improving solution"
        );
    }
    Ok(())
}

fn dump_model_files(engine: &HighsEngine, config: &SolveConfig) -> Result<(), EngineError> {
    if config.dump_lp {
        engine.write_model(c"problem.lp")?;
        debug!(
            component = "session",
            operation = "dump",
            status = "success",
            path = "problem.lp",
            "Wrote LP model file"
        );
    }
    if config.dump_mps {
        engine.write_model(c"problem.mps")?;
        debug!(
            component = "session",
            operation = "dump",
            status = "success",
            path = "problem.mps",
            "Wrote MPS model file"
        );
    }
    Ok(())
}

fn acquisition_error(err: EngineError) -> SolveError {
    SolveError::EngineUnavailable(err.to_string())
}

fn engine_error(err: EngineError) -> SolveError {
    SolveError::Engine(err.to_string())
}
