//! Property-based tests for the regression routines.
//!
//! These use proptest to generate arbitrary feature/target pairs and check
//! properties that must hold for every input.

mod common;

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use deep_kernel_reg::{
    fit_linear, fit_linear_with, linear_reg_loss, linear_reg_pred, outer_prod, SolverKind,
};
use ndarray::{Array2, Axis};

use common::assert_array_approx_eq;

// =============================================================================
// Strategies
// =============================================================================

/// Strategy for `(feature (n, d), target (n, m))` with bounded values.
fn arb_problem() -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    (2usize..10, 1usize..4, 1usize..3).prop_flat_map(|(n, d, m)| {
        (
            prop_vec(-5.0f64..5.0, n * d),
            prop_vec(-5.0f64..5.0, n * m),
        )
            .prop_map(move |(x, y)| {
                (
                    Array2::from_shape_vec((n, d), x).unwrap(),
                    Array2::from_shape_vec((n, m), y).unwrap(),
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn loss_non_negative((feature, target) in arb_problem(), reg in 0.01f64..5.0) {
        let loss = linear_reg_loss(&target, &feature, reg).unwrap();
        prop_assert!(loss >= 0.0);
        prop_assert!(loss.is_finite());
    }

    #[test]
    fn ridge_beats_zero_weights((feature, target) in arb_problem(), reg in 0.01f64..5.0) {
        // W = 0 has objective ‖Y‖² / n for the fitting objective; the ridge
        // minimizer can never be worse under the objective it minimizes.
        let n = feature.nrows() as f64;
        let weight = fit_linear(&target, &feature, reg).unwrap();
        let pred = linear_reg_pred(&feature, &weight).unwrap();
        let residual: f64 = target.iter().zip(pred.iter()).map(|(t, p)| (t - p).powi(2)).sum();
        let penalty: f64 = weight.iter().map(|w| w * w).sum();
        let fitted = residual + reg * n * penalty;
        let zero: f64 = target.iter().map(|t| t * t).sum();
        prop_assert!(fitted <= zero + 1e-8 * (1.0 + zero));
    }

    #[test]
    fn solvers_agree((feature, target) in arb_problem(), reg in 0.05f64..5.0) {
        let a = fit_linear_with(&target, &feature, reg, &SolverKind::Inverse).unwrap();
        let b = fit_linear_with(&target, &feature, reg, &SolverKind::Cholesky).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert!((x - y).abs() <= 1e-7 * (1.0 + x.abs()));
        }
    }

    #[test]
    fn outer_prod_batches_are_outer_products(
        (a, b) in (1usize..5, 1usize..4, 1usize..4).prop_flat_map(|(n, p, q)| {
            (
                prop_vec(-3.0f64..3.0, n * p),
                prop_vec(-3.0f64..3.0, n * q),
            )
                .prop_map(move |(x, y)| {
                    (
                        Array2::from_shape_vec((n, p), x).unwrap(),
                        Array2::from_shape_vec((n, q), y).unwrap(),
                    )
                })
        })
    ) {
        let out = outer_prod(&a, &b).unwrap();
        prop_assert_eq!(out.shape(), &[a.nrows(), a.ncols(), b.ncols()]);
        for i in 0..a.nrows() {
            let left = a.row(i).insert_axis(Axis(1));
            let right = b.row(i).insert_axis(Axis(0));
            let expected = left.dot(&right);
            assert_array_approx_eq(&out.index_axis(Axis(0), i), &expected, 1e-12, "batch");
        }
    }
}
