//! Error types for ridge regression and tensor helpers.
//!
//! Every shape or rank violation is reported before any arithmetic runs, so
//! an `Err` never comes with partially computed output.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Errors raised by the regression routines.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegressionError {
    /// Operand must have exactly `expected` axes.
    #[error("{name} must have rank {expected}, got rank {actual}")]
    RankMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Operand must have at least `min` axes.
    #[error("{name} must have rank >= {min}, got rank {actual}")]
    RankTooLow {
        name: &'static str,
        min: usize,
        actual: usize,
    },

    /// Axis length disagrees with the operand it is paired with.
    #[error("{name} axis {axis} has length {actual}, expected {expected}")]
    ShapeMismatch {
        name: &'static str,
        axis: usize,
        expected: usize,
        actual: usize,
    },

    /// The regularized Gram matrix has no inverse.
    #[error("regularized Gram matrix ({dim}x{dim}) is singular")]
    SingularMatrix { dim: usize },

    /// Cholesky factorization of the regularized Gram matrix failed.
    #[error("regularized Gram matrix ({dim}x{dim}) is not positive definite")]
    NotPositiveDefinite { dim: usize },

    /// Internal reshape failed.
    #[error("reshape failed: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = RegressionError::RankMismatch {
            name: "feature",
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "feature must have rank 2, got rank 3");

        let err = RegressionError::ShapeMismatch {
            name: "target",
            axis: 0,
            expected: 4,
            actual: 5,
        };
        assert_eq!(err.to_string(), "target axis 0 has length 5, expected 4");

        let err = RegressionError::SingularMatrix { dim: 3 };
        assert_eq!(err.to_string(), "regularized Gram matrix (3x3) is singular");
    }

    #[test]
    fn shape_error_converts() {
        let shape_err = ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape);
        let err: RegressionError = shape_err.into();
        assert!(matches!(err, RegressionError::Shape(_)));
    }
}
