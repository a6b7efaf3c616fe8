//! Rank-checked operand layouts and axis contractions.
//!
//! Targets and weights may be plain matrices or higher-rank tensors. Rather
//! than branching on `ndim()` at every call site, arrays are classified once
//! into an [`Operand`]:
//!
//! ```text
//! rank 2      → Operand::Matrix  (n, m)
//! rank 2 + k  → Operand::Tensor  (n, d1, ..., dk)
//! ```
//!
//! Tensor contractions flatten the trailing axes into a single column axis,
//! run one matrix product and restore the trailing shape. This is the same
//! sum as an Einstein contraction over the leading axis.

use ndarray::{ArrayD, ArrayView2, ArrayViewD, CowArray, Ix2, IxDyn};

use crate::error::{RegressionError, Result};

// =============================================================================
// Rank Checks
// =============================================================================

/// View `array` as a matrix, failing unless it has exactly two axes.
pub fn expect_matrix<'a>(array: ArrayViewD<'a, f64>, name: &'static str) -> Result<ArrayView2<'a, f64>> {
    if array.ndim() != 2 {
        return Err(RegressionError::RankMismatch {
            name,
            expected: 2,
            actual: array.ndim(),
        });
    }
    Ok(array.into_dimensionality::<Ix2>()?)
}

/// Fail unless `array` has at least `min` axes.
pub fn expect_min_rank(array: &ArrayViewD<'_, f64>, name: &'static str, min: usize) -> Result<()> {
    if array.ndim() < min {
        return Err(RegressionError::RankTooLow {
            name,
            min,
            actual: array.ndim(),
        });
    }
    Ok(())
}

/// Fail unless `actual == expected` along `axis`.
pub fn expect_axis_len(name: &'static str, axis: usize, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RegressionError::ShapeMismatch {
            name,
            axis,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fail unless `actual` has exactly the shape `expected`.
///
/// A rank difference is reported as [`RegressionError::RankMismatch`],
/// otherwise the first differing axis as [`RegressionError::ShapeMismatch`].
pub fn expect_shape(name: &'static str, expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(RegressionError::RankMismatch {
            name,
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(axis) => expect_axis_len(name, axis, expected[axis], actual[axis]),
        None => Ok(()),
    }
}

// =============================================================================
// Operand
// =============================================================================

/// A rank >= 2 array, tagged by whether it is a plain matrix.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    /// Rank-2 array `(n, m)`.
    Matrix(ArrayView2<'a, f64>),
    /// Rank > 2 array `(n, d1, ..., dk)`.
    Tensor {
        view: ArrayViewD<'a, f64>,
        /// Shape after the leading axis.
        trailing: Vec<usize>,
    },
}

impl<'a> Operand<'a> {
    /// Classify an array by rank.
    ///
    /// Returns [`RegressionError::RankTooLow`] for rank 0 or 1.
    pub fn classify(array: ArrayViewD<'a, f64>, name: &'static str) -> Result<Self> {
        expect_min_rank(&array, name, 2)?;
        if array.ndim() == 2 {
            return Ok(Operand::Matrix(array.into_dimensionality::<Ix2>()?));
        }
        let trailing = array.shape()[1..].to_vec();
        Ok(Operand::Tensor {
            view: array,
            trailing,
        })
    }

    /// Length of the leading axis.
    #[inline]
    pub fn leading_len(&self) -> usize {
        match self {
            Operand::Matrix(m) => m.nrows(),
            Operand::Tensor { view, .. } => view.shape()[0],
        }
    }

    /// Shape after the leading axis.
    #[inline]
    pub fn trailing_shape(&self) -> &[usize] {
        match self {
            Operand::Matrix(m) => &m.shape()[1..],
            Operand::Tensor { trailing, .. } => trailing,
        }
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.trailing_shape().len() + 1
    }

    /// True for the rank-2 case.
    #[inline]
    pub fn is_matrix(&self) -> bool {
        matches!(self, Operand::Matrix(_))
    }

    /// Collapse trailing axes: `(n, d1, ..., dk)` → `(n, d1 * ... * dk)`.
    ///
    /// Borrows when the data is already contiguous.
    pub fn flatten(&self) -> Result<CowArray<'_, f64, Ix2>> {
        match self {
            Operand::Matrix(m) => Ok(CowArray::from(m.view())),
            Operand::Tensor { view, trailing } => {
                let cols = trailing.iter().product::<usize>();
                Ok(view.to_shape((view.shape()[0], cols))?)
            }
        }
    }

    /// Reshape a `(lead, d1 * ... * dk)` product back to `(lead, d1, ..., dk)`.
    fn restore(&self, flat: ndarray::Array2<f64>) -> Result<ArrayD<f64>> {
        match self {
            Operand::Matrix(_) => Ok(flat.into_dyn()),
            Operand::Tensor { trailing, .. } => {
                let mut shape = Vec::with_capacity(trailing.len() + 1);
                shape.push(flat.nrows());
                shape.extend_from_slice(trailing);
                Ok(flat.into_shape_with_order(IxDyn(&shape))?)
            }
        }
    }
}

// =============================================================================
// Contractions
// =============================================================================

/// Contract over the shared leading axis.
///
/// `lhs` is `(n, d)`, `rhs` is `(n, ...)`; the result is `(d, ...)` with
/// `out[d, ...] = Σ_n lhs[n, d] · rhs[n, ...]`.
pub fn contract_leading(lhs: ArrayView2<'_, f64>, rhs: &Operand<'_>) -> Result<ArrayD<f64>> {
    expect_axis_len("rhs", 0, lhs.nrows(), rhs.leading_len())?;
    let flat = rhs.flatten()?;
    rhs.restore(lhs.t().dot(&flat))
}

/// Contract `lhs`'s second axis against `rhs`'s first axis.
///
/// `lhs` is `(a, d)`, `rhs` is `(d, ...)`; the result is `(a, ...)` with
/// `out[a, ...] = Σ_d lhs[a, d] · rhs[d, ...]`.
pub fn contract_first(lhs: ArrayView2<'_, f64>, rhs: &Operand<'_>) -> Result<ArrayD<f64>> {
    expect_axis_len("rhs", 0, lhs.ncols(), rhs.leading_len())?;
    let flat = rhs.flatten()?;
    rhs.restore(lhs.dot(&flat))
}

// =============================================================================
// Tests
// =============================================================================
