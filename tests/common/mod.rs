//! Shared fixtures for integration tests.
//!
//! For assertion helpers, use `deep_kernel_reg::testing`.

#![allow(dead_code)]

use ndarray::{Array, Array2, Array3, Axis};

// Re-export testing utilities for convenience
#[allow(unused_imports)]
pub use deep_kernel_reg::testing::{assert_array_approx_eq, frobenius_norm, DEFAULT_TOLERANCE};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Fixtures
// =============================================================================

/// Polynomial design matrix `[1, x, x², ...]` on `n` evenly spaced points in
/// `[-1, 1]`. Full column rank whenever `n >= d`.
pub fn polynomial_features(n: usize, d: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, d), |(i, j)| {
        let x = if n > 1 {
            -1.0 + 2.0 * i as f64 / (n - 1) as f64
        } else {
            0.0
        };
        x.powi(j as i32)
    })
}

/// Targets that lie exactly in the span of `feature`: `feature · weight`.
pub fn targets_in_span(feature: &Array2<f64>, weight: &Array2<f64>) -> Array2<f64> {
    feature.dot(weight)
}

/// A deterministic, mildly irregular target matrix.
pub fn noisy_targets(n: usize, m: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, m), |(i, j)| ((i * 7 + j * 3) % 5) as f64 * 0.3 - 0.4 + i as f64 * 0.1)
}

/// Stack `copies` identical copies of `target` along a new axis 1:
/// `(n, m)` → `(n, copies, m)`.
pub fn stack_copies(target: &Array2<f64>, copies: usize) -> Array3<f64> {
    let (n, m) = target.dim();
    Array::from_shape_fn((n, copies, m), |(i, _, j)| target[[i, j]])
}

/// Slice `k` of a rank-3 array along axis 1.
pub fn slice_axis1(array: &ndarray::ArrayD<f64>, k: usize) -> ndarray::ArrayD<f64> {
    array.index_axis(Axis(1), k).to_owned()
}
