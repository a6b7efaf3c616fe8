//! Inversion strategies for the regularized Gram matrix.
//!
//! Ridge fitting needs `(XᵀX + λnI)⁻¹`. How that inverse is obtained is a
//! pluggable choice:
//!
//! - [`SolverKind::Inverse`]: direct LU-based inverse (default)
//! - [`SolverKind::Cholesky`]: Cholesky factorization, then inverse from the factor
//!
//! The direct inverse accepts any invertible matrix. Cholesky is better
//! conditioned but requires a symmetric positive definite input, which holds
//! whenever `λ > 0` or the features have full column rank.
//!
//! Both strategies go through nalgebra; ndarray has no inverse of its own.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, Result};

/// Inverts a square, regularized Gram matrix.
///
/// Implement this to plug a custom strategy into
/// [`fit_linear_with`](crate::regression::fit_linear_with).
pub trait GramSolver {
    /// Return the inverse of `gram`, which is square `(d, d)`.
    fn invert(&self, gram: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Built-in inversion strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Direct matrix inverse.
    #[default]
    Inverse,
    /// Inverse through a Cholesky factor.
    Cholesky,
}

impl GramSolver for SolverKind {
    fn invert(&self, gram: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let dim = gram.nrows();
        debug_assert_eq!(dim, gram.ncols(), "Gram matrix must be square");

        let matrix = to_nalgebra(gram);
        let inverse = match self {
            SolverKind::Inverse => matrix
                .try_inverse()
                .ok_or(RegressionError::SingularMatrix { dim })?,
            SolverKind::Cholesky => matrix
                .cholesky()
                .ok_or(RegressionError::NotPositiveDefinite { dim })?
                .inverse(),
        };

        if inverse.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::SingularMatrix { dim });
        }
        Ok(from_nalgebra(&inverse))
    }

    fn name(&self) -> &'static str {
        match self {
            SolverKind::Inverse => "inverse",
            SolverKind::Cholesky => "cholesky",
        }
    }
}

// =============================================================================
// ndarray <-> nalgebra
// =============================================================================

fn to_nalgebra(m: ArrayView2<'_, f64>) -> DMatrix<f64> {
    // ndarray iterates in logical row-major order regardless of memory layout.
    DMatrix::from_row_iterator(m.nrows(), m.ncols(), m.iter().copied())
}

fn from_nalgebra(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

// =============================================================================
// Tests
// =============================================================================
