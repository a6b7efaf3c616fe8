//! Testing utilities for deep-kernel-reg.
//!
//! Assertion helpers shared by unit tests, integration tests and downstream
//! crates that check their own use of the regression routines.
//!
//! ```
//! use deep_kernel_reg::testing::{assert_array_approx_eq, DEFAULT_TOLERANCE};
//! use ndarray::array;
//!
//! let actual = array![[1.0, 2.0], [3.0, 4.0 + 1e-12]];
//! let expected = array![[1.0, 2.0], [3.0, 4.0]];
//! assert_array_approx_eq(&actual, &expected, DEFAULT_TOLERANCE, "weights");
//! ```

use ndarray::{ArrayBase, Data, Dimension};

// =============================================================================
// Constants
// =============================================================================

/// Default absolute tolerance for closed-form results with O(1) magnitudes.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Array Assertions
// =============================================================================

/// Assert that two arrays have the same shape and agree element-wise.
///
/// # Panics
///
/// Panics with the first differing index if shapes differ or any element
/// differs by more than `tolerance`.
pub fn assert_array_approx_eq<S1, S2, D1, D2>(
    actual: &ArrayBase<S1, D1>,
    expected: &ArrayBase<S2, D2>,
    tolerance: f64,
    context: &str,
) where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    assert_eq!(
        actual.shape(),
        expected.shape(),
        "{context}: shape mismatch - got {:?}, expected {:?}",
        actual.shape(),
        expected.shape()
    );

    let actual = actual.view().into_dyn();
    let expected = expected.view().into_dyn();
    for ((idx, a), e) in actual.indexed_iter().zip(expected.iter()) {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}{:?}: {a} ≠ {e} (diff={diff:.3e}, tolerance={tolerance:.0e})",
            idx.slice()
        );
    }
}

/// Frobenius norm: square root of the sum of squared elements.
pub fn frobenius_norm<S, D>(array: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    array.iter().map(|v| v * v).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accepts_close_arrays() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.0], [3.0, 4.0 + 1e-12]].into_dyn();
        assert_array_approx_eq(&a, &b, DEFAULT_TOLERANCE, "close");
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn rejects_shape_mismatch() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0], [2.0]];
        assert_array_approx_eq(&a, &b, DEFAULT_TOLERANCE, "shape");
    }

    #[test]
    #[should_panic(expected = "values[1, 0]")]
    fn reports_first_bad_index() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.0], [3.5, 4.0]];
        assert_array_approx_eq(&a, &b, 1e-6, "values");
    }

    #[test]
    fn frobenius() {
        assert_eq!(frobenius_norm(&array![[3.0, 0.0], [0.0, 4.0]]), 5.0);
    }
}
