//! MILP problem descriptor in compressed sparse column layout.
//!
//! A [`MilpProblem`] is an immutable value object assembled by the caller:
//! the constraint matrix in CSC form, variable bounds and integrality,
//! objective coefficients, and one sense/rhs/range triplet per constraint
//! row. [`MilpProblem::validate`] checks the descriptor for internal
//! consistency before any engine resources are acquired.

use tracing::debug;

use crate::error::ProblemError;
use crate::types::{ObjectiveSense, RowSense};

/// One mixed-integer linear program, ready to hand to a solve session.
///
/// The constraint matrix is stored column-major: `column_starts` has one
/// offset per variable plus a final total, and `row_indices`/`values` hold
/// the nonzeros of each column contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpProblem {
    /// Number of decision variables (columns). Must be at least 1.
    pub num_variables: usize,
    /// Number of constraint rows. A purely box-constrained problem has 0.
    pub num_constraints: usize,
    /// CSC column pointers, length `num_variables + 1`, starting at 0,
    /// non-decreasing, ending at the nonzero count.
    pub column_starts: Vec<usize>,
    /// Constraint row of each nonzero, parallel to `values`.
    pub row_indices: Vec<usize>,
    /// Nonzero coefficients of the constraint matrix.
    pub values: Vec<f64>,
    /// Per-variable lower bounds.
    pub variable_lower: Vec<f64>,
    /// Per-variable upper bounds.
    pub variable_upper: Vec<f64>,
    /// Per-variable integrality markers.
    pub is_integer: Vec<bool>,
    /// Per-variable objective coefficients.
    pub objective: Vec<f64>,
    /// Per-row relational operator.
    pub row_sense: Vec<RowSense>,
    /// Per-row right-hand side.
    pub row_rhs: Vec<f64>,
    /// Per-row range width; consulted only for [`RowSense::Range`] rows but
    /// always full length so the constraint arrays stay parallel.
    pub row_range: Vec<f64>,
    /// Direction of optimization.
    pub sense: ObjectiveSense,
}

impl MilpProblem {
    /// Number of nonzero coefficients in the constraint matrix.
    pub fn num_nonzeros(&self) -> usize {
        self.values.len()
    }

    /// Checks the descriptor for internal consistency.
    ///
    /// Runs entirely on the caller's data; the first violated rule wins.
    /// A descriptor that passes can be loaded into the engine in one shot
    /// without further shape checks.
    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.num_variables == 0 {
            return Err(ProblemError::Empty);
        }

        self.check_length("column_starts", self.column_starts.len(), self.num_variables + 1)?;
        self.check_length("variable_lower", self.variable_lower.len(), self.num_variables)?;
        self.check_length("variable_upper", self.variable_upper.len(), self.num_variables)?;
        self.check_length("is_integer", self.is_integer.len(), self.num_variables)?;
        self.check_length("objective", self.objective.len(), self.num_variables)?;
        self.check_length("row_sense", self.row_sense.len(), self.num_constraints)?;
        self.check_length("row_rhs", self.row_rhs.len(), self.num_constraints)?;
        self.check_length("row_range", self.row_range.len(), self.num_constraints)?;
        self.check_length("row_indices", self.row_indices.len(), self.values.len())?;

        if self.column_starts[0] != 0 {
            return Err(ProblemError::ColumnStartsNotMonotone { column: 0 });
        }
        if self.column_starts[self.num_variables] != self.num_nonzeros() {
            return Err(ProblemError::ColumnStartsNotMonotone {
                column: self.num_variables,
            });
        }
        for column in 0..self.num_variables {
            if self.column_starts[column] > self.column_starts[column + 1] {
                return Err(ProblemError::ColumnStartsNotMonotone { column });
            }
        }

        for (position, &row) in self.row_indices.iter().enumerate() {
            if row >= self.num_constraints {
                return Err(ProblemError::RowIndexOutOfBounds {
                    position,
                    row,
                    num_constraints: self.num_constraints,
                });
            }
        }

        for column in 0..self.num_variables {
            let lower = self.variable_lower[column];
            let upper = self.variable_upper[column];
            if lower > upper {
                return Err(ProblemError::InvalidVariableBounds {
                    column,
                    lower,
                    upper,
                });
            }
        }

        debug!(
            component = "problem",
            operation = "validate",
            status = "success",
            num_variables = self.num_variables,
            num_constraints = self.num_constraints,
            num_nonzeros = self.num_nonzeros(),
            sense = self.sense.as_str(),
            "Problem descriptor validated"
        );

        Ok(())
    }

    fn check_length(
        &self,
        field: &'static str,
        got: usize,
        expected: usize,
    ) -> Result<(), ProblemError> {
        if got != expected {
            return Err(ProblemError::DimensionMismatch {
                field,
                expected,
                got,
            });
        }
        Ok(())
    }
}
