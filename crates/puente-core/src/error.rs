//! Descriptor validation errors.

use std::fmt;

/// Errors raised when a problem descriptor fails validation.
///
/// Validation runs before any engine resources are acquired, so every
/// variant here means no engine handle was ever created for the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The descriptor declares zero variables.
    Empty,
    /// An array does not match the declared dimensions.
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// The column start offsets are not a valid CSC pointer array: first
    /// element nonzero, offsets decreasing, or final offset not equal to
    /// the nonzero count.
    ColumnStartsNotMonotone { column: usize },
    /// A nonzero references a constraint row outside the declared range.
    RowIndexOutOfBounds {
        position: usize,
        row: usize,
        num_constraints: usize,
    },
    /// A variable's lower bound exceeds its upper bound.
    InvalidVariableBounds {
        column: usize,
        lower: f64,
        upper: f64,
    },
}

impl ProblemError {
    /// Stable semantic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::Empty => "PROBLEM_EMPTY",
            ProblemError::DimensionMismatch { .. } => "PROBLEM_DIMENSION_MISMATCH",
            ProblemError::ColumnStartsNotMonotone { .. } => "PROBLEM_COLUMN_STARTS",
            ProblemError::RowIndexOutOfBounds { .. } => "PROBLEM_ROW_INDEX",
            ProblemError::InvalidVariableBounds { .. } => "PROBLEM_VARIABLE_BOUNDS",
        }
    }
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::Empty => {
                write!(f, "[{}] Problem declares zero variables", self.code())
            }
            ProblemError::DimensionMismatch {
                field,
                expected,
                got,
            } => {
                write!(
                    f,
                    "[{}] Array '{}' has length {}, expected {}",
                    self.code(),
                    field,
                    got,
                    expected
                )
            }
            ProblemError::ColumnStartsNotMonotone { column } => {
                write!(
                    f,
                    "[{}] Column start offsets are inconsistent at column {}",
                    self.code(),
                    column
                )
            }
            ProblemError::RowIndexOutOfBounds {
                position,
                row,
                num_constraints,
            } => {
                write!(
                    f,
                    "[{}] Nonzero {} references row {} but the problem has {} constraints",
                    self.code(),
                    position,
                    row,
                    num_constraints
                )
            }
            ProblemError::InvalidVariableBounds {
                column,
                lower,
                upper,
            } => {
                write!(
                    f,
                    "[{}] Variable {} has lower bound {} greater than upper bound {}",
                    self.code(),
                    column,
                    lower,
                    upper
                )
            }
        }
    }
}

impl std::error::Error for ProblemError {}
