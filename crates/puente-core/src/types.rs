//! Shared problem types: objective direction and constraint row senses.

use std::fmt;

/// Direction of optimization for the objective function.
///
/// The direction is forwarded to the engine as-is; callers never need to
/// negate objective coefficients to maximize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ObjectiveSense {
    /// Minimize the objective (default).
    #[default]
    Minimize,
    /// Maximize the objective.
    Maximize,
}

impl ObjectiveSense {
    /// Human-readable name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveSense::Minimize => "minimize",
            ObjectiveSense::Maximize => "maximize",
        }
    }
}

impl fmt::Display for ObjectiveSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relational operator of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowSense {
    /// Row activity must not exceed the right-hand side.
    LessEqual,
    /// Row activity must reach at least the right-hand side.
    GreaterEqual,
    /// Row activity must equal the right-hand side.
    Equal,
    /// Row activity must lie in `[rhs - |range|, rhs]`.
    Range,
}

impl RowSense {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowSense::LessEqual => "<=",
            RowSense::GreaterEqual => ">=",
            RowSense::Equal => "=",
            RowSense::Range => "range",
        }
    }

    /// Activity interval `(lower, upper)` for a row with this sense.
    ///
    /// `range` is consulted only for [`RowSense::Range`] rows, which follow
    /// the classic MPS convention `rhs - |range| <= activity <= rhs`.
    pub fn bounds(&self, rhs: f64, range: f64) -> (f64, f64) {
        match self {
            RowSense::LessEqual => (f64::NEG_INFINITY, rhs),
            RowSense::GreaterEqual => (rhs, f64::INFINITY),
            RowSense::Equal => (rhs, rhs),
            RowSense::Range => (rhs - range.abs(), rhs),
        }
    }
}

impl fmt::Display for RowSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_less_equal_bounds_are_one_sided() {
        let (lower, upper) = RowSense::LessEqual.bounds(5.0, 0.0);
        assert_eq!(lower, f64::NEG_INFINITY);
        assert_eq!(upper, 5.0);
    }

    #[test]
    fn test_greater_equal_bounds_are_one_sided() {
        let (lower, upper) = RowSense::GreaterEqual.bounds(-2.5, 0.0);
        assert_eq!(lower, -2.5);
        assert_eq!(upper, f64::INFINITY);
    }

    #[test]
    fn test_equal_bounds_pin_both_sides() {
        let (lower, upper) = RowSense::Equal.bounds(7.0, 99.0);
        assert_eq!(lower, 7.0);
        assert_eq!(upper, 7.0);
    }

    #[test]
    fn test_range_uses_absolute_width() {
        let (lower, upper) = RowSense::Range.bounds(10.0, 4.0);
        assert_eq!(lower, 6.0);
        assert_eq!(upper, 10.0);

        // Negative widths are normalized, matching the MPS ranged-row rule.
        let (lower, upper) = RowSense::Range.bounds(10.0, -4.0);
        assert_eq!(lower, 6.0);
        assert_eq!(upper, 10.0);
    }

    #[test]
    fn test_sense_display() {
        assert_eq!(RowSense::LessEqual.to_string(), "<=");
        assert_eq!(RowSense::Range.to_string(), "range");
        assert_eq!(ObjectiveSense::Minimize.to_string(), "minimize");
        assert_eq!(ObjectiveSense::Maximize.to_string(), "maximize");
    }

    #[test]
    fn test_objective_sense_default_is_minimize() {
        assert_eq!(ObjectiveSense::default(), ObjectiveSense::Minimize);
    }
}
