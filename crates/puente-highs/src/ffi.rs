//! FFI bindings to the HiGHS solver library.
//!
//! This module contains unsafe code for interacting with the C library.
//! The opaque engine pointer never leaves this module: [`HighsEngine`] owns
//! it and releases it in `Drop`, so every exit path of a solve session,
//! including early returns and panics, gives the instance back.
#![allow(unsafe_code)]

use std::ffi::{c_void, CStr};
use std::fmt;

use puente_core::ObjectiveSense;
use tracing::{debug, trace, warn};

pub use highs_sys::HighsInt;

/// Terminal state reported by the engine after a run.
///
/// This is the raw classification; the session layer turns it into the
/// public status taxonomy using what it knows about the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Optimal solution found
    Optimal,
    /// Problem is infeasible
    Infeasible,
    /// Problem is unbounded
    Unbounded,
    /// Engine could not separate unbounded from infeasible
    UnboundedOrInfeasible,
    /// Engine stopped at the wall-clock limit (may have an incumbent)
    TimeLimit,
    /// Engine stopped at an iteration-class limit (may have an incumbent)
    IterationLimit,
    /// Engine stopped at the improving-solution cap
    SolutionLimit,
    /// Engine terminated without classifying the model
    Unknown,
    /// Engine reported an internal error state
    Error,
}

/// Errors returned by the engine wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not create a fresh instance.
    Unavailable,
    /// A C API call returned an error status.
    Call {
        function: &'static str,
        code: HighsInt,
    },
    /// A problem dimension does not fit the engine's integer width.
    IndexOverflow {
        what: &'static str,
        value: usize,
    },
    /// Slice lengths disagree at the load boundary.
    BufferMismatch {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Unavailable => {
                write!(f, "engine instance could not be created")
            }
            EngineError::Call { function, code } => {
                write!(f, "{} failed with status {}", function, code)
            }
            EngineError::IndexOverflow { what, value } => {
                write!(f, "{} ({}) exceeds the engine index range", what, value)
            }
            EngineError::BufferMismatch {
                buffer,
                expected,
                got,
            } => {
                write!(
                    f,
                    "{} length {} does not match expected {}",
                    buffer, got, expected
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Owning handle to one HiGHS instance.
///
/// Acquired per solve request and released unconditionally on drop. The
/// raw pointer field keeps the type `!Send`, which matches the engine's
/// thread-affinity expectations.
pub struct HighsEngine {
    ptr: *mut c_void,
}

impl HighsEngine {
    /// Acquire a fresh engine instance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unavailable`] if the engine cannot allocate
    /// an instance.
    pub fn new() -> Result<Self, EngineError> {
        let ptr = unsafe { highs_sys::Highs_create() };
        if ptr.is_null() {
            warn!(
                component = "engine",
                operation = "acquire",
                status = "failure",
                "HiGHS returned a null instance"
            );
            return Err(EngineError::Unavailable);
        }
        debug!(
            component = "engine",
            operation = "acquire",
            status = "success",
            "Acquired fresh HiGHS instance"
        );
        Ok(HighsEngine { ptr })
    }

    /// Set a boolean engine option.
    pub fn set_bool_option(&mut self, name: &CStr, value: bool) -> Result<(), EngineError> {
        let status = unsafe {
            highs_sys::Highs_setBoolOptionValue(self.ptr, name.as_ptr(), HighsInt::from(value))
        };
        option_applied("Highs_setBoolOptionValue", name, status)
    }

    /// Set an integer engine option.
    pub fn set_int_option(&mut self, name: &CStr, value: HighsInt) -> Result<(), EngineError> {
        let status =
            unsafe { highs_sys::Highs_setIntOptionValue(self.ptr, name.as_ptr(), value) };
        option_applied("Highs_setIntOptionValue", name, status)
    }

    /// Set a floating-point engine option.
    pub fn set_double_option(&mut self, name: &CStr, value: f64) -> Result<(), EngineError> {
        let status =
            unsafe { highs_sys::Highs_setDoubleOptionValue(self.ptr, name.as_ptr(), value) };
        option_applied("Highs_setDoubleOptionValue", name, status)
    }

    /// Set a string engine option.
    pub fn set_string_option(&mut self, name: &CStr, value: &CStr) -> Result<(), EngineError> {
        let status = unsafe {
            highs_sys::Highs_setStringOptionValue(self.ptr, name.as_ptr(), value.as_ptr())
        };
        option_applied("Highs_setStringOptionValue", name, status)
    }

    /// Load a complete MILP into the instance in one call.
    ///
    /// The constraint matrix arrives column-wise; integrality flags are
    /// translated to the engine's variable-type codes here, immediately
    /// before the handoff. Slice lengths are re-checked against the declared
    /// dimensions so the unsafe call stays sound even for callers that
    /// skipped descriptor validation.
    ///
    /// # Errors
    ///
    /// Returns an error on inconsistent buffer lengths, dimensions beyond
    /// the engine's integer width, or a rejected load.
    #[allow(clippy::too_many_arguments)]
    pub fn pass_mip(
        &mut self,
        num_variables: usize,
        num_constraints: usize,
        sense: ObjectiveSense,
        objective: &[f64],
        variable_lower: &[f64],
        variable_upper: &[f64],
        row_lower: &[f64],
        row_upper: &[f64],
        column_starts: &[usize],
        row_indices: &[usize],
        values: &[f64],
        is_integer: &[bool],
    ) -> Result<(), EngineError> {
        let num_nonzeros = values.len();
        check_buffer("row_indices", row_indices.len(), num_nonzeros)?;
        check_buffer("column_starts", column_starts.len(), num_variables + 1)?;
        check_buffer("objective", objective.len(), num_variables)?;
        check_buffer("variable_lower", variable_lower.len(), num_variables)?;
        check_buffer("variable_upper", variable_upper.len(), num_variables)?;
        check_buffer("is_integer", is_integer.len(), num_variables)?;
        check_buffer("row_lower", row_lower.len(), num_constraints)?;
        check_buffer("row_upper", row_upper.len(), num_constraints)?;

        let num_col = engine_int("num_variables", num_variables)?;
        let num_row = engine_int("num_constraints", num_constraints)?;
        let num_nz = engine_int("num_nonzeros", num_nonzeros)?;
        let starts = engine_int_vec("column_starts", column_starts)?;
        let indices = engine_int_vec("row_indices", row_indices)?;
        let integrality: Vec<HighsInt> = is_integer
            .iter()
            .map(|&flag| {
                if flag {
                    highs_sys::kHighsVarTypeInteger
                } else {
                    highs_sys::kHighsVarTypeContinuous
                }
            })
            .collect();
        let sense_code = match sense {
            ObjectiveSense::Minimize => highs_sys::OBJECTIVE_SENSE_MINIMIZE,
            ObjectiveSense::Maximize => highs_sys::OBJECTIVE_SENSE_MAXIMIZE,
        };

        trace!(
            component = "engine",
            operation = "load",
            status = "success",
            num_variables,
            num_constraints,
            num_nonzeros,
            "Passing MILP to engine"
        );

        let status = unsafe {
            highs_sys::Highs_passMip(
                self.ptr,
                num_col,
                num_row,
                num_nz,
                highs_sys::MATRIX_FORMAT_COLUMN_WISE,
                sense_code,
                0.0,
                objective.as_ptr(),
                variable_lower.as_ptr(),
                variable_upper.as_ptr(),
                row_lower.as_ptr(),
                row_upper.as_ptr(),
                starts.as_ptr(),
                indices.as_ptr(),
                values.as_ptr(),
                integrality.as_ptr(),
            )
        };
        call_succeeded("Highs_passMip", status)
    }

    /// Run the blocking solve.
    pub fn run(&mut self) -> Result<(), EngineError> {
        let status = unsafe { highs_sys::Highs_run(self.ptr) };
        call_succeeded("Highs_run", status)
    }

    /// Classified terminal state of the last run.
    pub fn model_status(&self) -> EngineStatus {
        let raw = unsafe { highs_sys::Highs_getModelStatus(self.ptr) };
        map_model_status(raw)
    }

    /// Objective value of the incumbent; garbage unless a solution exists.
    pub fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.ptr) }
    }

    /// True when the engine banked a feasible primal solution.
    pub fn has_primal_solution(&self) -> bool {
        self.int_info(c"primal_solution_status")
            .is_some_and(|value| value == highs_sys::kHighsSolutionStatusFeasible)
    }

    /// Primal variable values of the incumbent, if one exists.
    pub fn primal_solution(
        &self,
        num_variables: usize,
        num_constraints: usize,
    ) -> Option<Vec<f64>> {
        if !self.has_primal_solution() {
            return None;
        }
        let mut col_values = vec![0.0; num_variables];
        let mut col_duals = vec![0.0; num_variables];
        let mut row_values = vec![0.0; num_constraints];
        let mut row_duals = vec![0.0; num_constraints];
        let status = unsafe {
            highs_sys::Highs_getSolution(
                self.ptr,
                col_values.as_mut_ptr(),
                col_duals.as_mut_ptr(),
                row_values.as_mut_ptr(),
                row_duals.as_mut_ptr(),
            )
        };
        if status != highs_sys::STATUS_OK {
            warn!(
                component = "engine",
                operation = "extract",
                status = "failure",
                status_code = status,
                "Failed to copy solution out of the engine"
            );
            return None;
        }
        Some(col_values)
    }

    /// Integer info value from the last run.
    pub fn int_info(&self, name: &CStr) -> Option<HighsInt> {
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(self.ptr, name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK {
            Some(value)
        } else {
            None
        }
    }

    /// 64-bit integer info value from the last run.
    pub fn int64_info(&self, name: &CStr) -> Option<i64> {
        let mut value: i64 = 0;
        let status = unsafe {
            highs_sys::Highs_getInt64InfoValue(self.ptr, name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK {
            Some(value)
        } else {
            None
        }
    }

    /// Floating-point info value from the last run.
    pub fn double_info(&self, name: &CStr) -> Option<f64> {
        let mut value: f64 = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.ptr, name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK {
            Some(value)
        } else {
            None
        }
    }

    /// Write the loaded model to a file; the format follows the extension.
    pub fn write_model(&self, path: &CStr) -> Result<(), EngineError> {
        let status = unsafe { highs_sys::Highs_writeModel(self.ptr, path.as_ptr()) };
        call_succeeded("Highs_writeModel", status)
    }

    /// Number of variables currently loaded.
    pub fn num_variables(&self) -> usize {
        let count = unsafe { highs_sys::Highs_getNumCols(self.ptr) };
        count.max(0) as usize
    }

    /// Number of constraint rows currently loaded.
    pub fn num_constraints(&self) -> usize {
        let count = unsafe { highs_sys::Highs_getNumRows(self.ptr) };
        count.max(0) as usize
    }
}

impl Drop for HighsEngine {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.ptr) };
        trace!(
            component = "engine",
            operation = "release",
            status = "success",
            "Released HiGHS instance"
        );
    }
}

impl fmt::Debug for HighsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighsEngine")
            .field("num_variables", &self.num_variables())
            .field("num_constraints", &self.num_constraints())
            .finish_non_exhaustive()
    }
}

/// Return the engine version string, if available.
pub fn engine_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

fn check_buffer(
    buffer: &'static str,
    got: usize,
    expected: usize,
) -> Result<(), EngineError> {
    if got != expected {
        warn!(
            component = "engine",
            operation = "load",
            status = "failure",
            buffer,
            expected,
            got,
            "Buffer length mismatch at the load boundary"
        );
        return Err(EngineError::BufferMismatch {
            buffer,
            expected,
            got,
        });
    }
    Ok(())
}

fn engine_int(what: &'static str, value: usize) -> Result<HighsInt, EngineError> {
    HighsInt::try_from(value).map_err(|_| EngineError::IndexOverflow { what, value })
}

fn engine_int_vec(what: &'static str, values: &[usize]) -> Result<Vec<HighsInt>, EngineError> {
    values.iter().map(|&value| engine_int(what, value)).collect()
}

fn option_applied(
    function: &'static str,
    name: &CStr,
    status: HighsInt,
) -> Result<(), EngineError> {
    if status == highs_sys::STATUS_ERROR {
        warn!(
            component = "engine",
            operation = "set_option",
            status = "failure",
            option = %name.to_string_lossy(),
            status_code = status,
            "Engine rejected option"
        );
        return Err(EngineError::Call {
            function,
            code: status,
        });
    }
    if status != highs_sys::STATUS_OK {
        trace!(
            component = "engine",
            operation = "set_option",
            option = %name.to_string_lossy(),
            status_code = status,
            "Engine accepted option with a warning"
        );
    }
    Ok(())
}

fn call_succeeded(function: &'static str, status: HighsInt) -> Result<(), EngineError> {
    if status == highs_sys::STATUS_ERROR {
        warn!(
            component = "engine",
            operation = "call",
            status = "failure",
            function,
            status_code = status,
            "Engine call failed"
        );
        return Err(EngineError::Call {
            function,
            code: status,
        });
    }
    Ok(())
}

#[allow(non_upper_case_globals)]
fn map_model_status(raw: HighsInt) -> EngineStatus {
    match raw {
        highs_sys::kHighsModelStatusOptimal => EngineStatus::Optimal,
        highs_sys::kHighsModelStatusInfeasible => EngineStatus::Infeasible,
        highs_sys::kHighsModelStatusUnbounded => EngineStatus::Unbounded,
        highs_sys::kHighsModelStatusUnboundedOrInfeasible => EngineStatus::UnboundedOrInfeasible,
        highs_sys::kHighsModelStatusTimeLimit => EngineStatus::TimeLimit,
        highs_sys::kHighsModelStatusIterationLimit => EngineStatus::IterationLimit,
        highs_sys::kHighsModelStatusSolutionLimit => EngineStatus::SolutionLimit,
        highs_sys::kHighsModelStatusUnknown => EngineStatus::Unknown,
        _ => EngineStatus::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let engine = HighsEngine::new().expect("fresh engine instance");
        assert_eq!(engine.num_variables(), 0);
        assert_eq!(engine.num_constraints(), 0);
    }

    #[test]
    fn test_engine_version_is_reported() {
        let version = engine_version().expect("version string");
        assert!(!version.is_empty());
    }

    #[test]
    fn test_one_shot_load_registers_dimensions() {
        let mut engine = HighsEngine::new().expect("fresh engine instance");
        engine
            .pass_mip(
                2,
                1,
                ObjectiveSense::Minimize,
                &[1.0, 1.0],
                &[0.0, 0.0],
                &[10.0, 10.0],
                &[f64::NEG_INFINITY],
                &[4.0],
                &[0, 1, 2],
                &[0, 0],
                &[1.0, 1.0],
                &[false, true],
            )
            .expect("load accepted");
        assert_eq!(engine.num_variables(), 2);
        assert_eq!(engine.num_constraints(), 1);
    }

    #[test]
    fn test_load_rejects_mismatched_buffers() {
        let mut engine = HighsEngine::new().expect("fresh engine instance");
        let err = engine
            .pass_mip(
                2,
                0,
                ObjectiveSense::Minimize,
                &[1.0],
                &[0.0, 0.0],
                &[1.0, 1.0],
                &[],
                &[],
                &[0, 0, 0],
                &[],
                &[],
                &[false, false],
            )
            .expect_err("objective too short");
        assert_eq!(
            err,
            EngineError::BufferMismatch {
                buffer: "objective",
                expected: 2,
                got: 1
            }
        );
    }
}
