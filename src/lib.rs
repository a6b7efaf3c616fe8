//! deep-kernel-reg: closed-form ridge regression and tensor helpers.
//!
//! Numeric building blocks for deep-kernel learning pipelines, where a
//! learned feature map is followed by a ridge regression solved in closed
//! form at every step.
//!
//! # Key Functions
//!
//! - [`fit_linear`] - Ridge weights `(XᵀX + reg·n·I)⁻¹ XᵀY` for matrix or tensor targets
//! - [`linear_reg_pred`] - Predictions from fitted weights
//! - [`linear_reg_loss`] - Fit, predict and score in one call
//! - [`outer_prod`] - Batched outer product over a shared leading axis
//! - [`add_const_col`] - Append an intercept column of ones
//!
//! # Key Types
//!
//! - [`RidgeConfig`] - Regularization, solver and intercept settings
//! - [`RidgeModel`] - Fitted weights with `predict`/`loss`
//! - [`GramSolver`] / [`SolverKind`] - Pluggable Gram-matrix inversion
//! - [`RegressionError`] - Rank, shape and numerical failures
//!
//! # Example
//!
//! ```
//! use deep_kernel_reg::{fit_linear, linear_reg_loss, linear_reg_pred};
//! use ndarray::array;
//!
//! let feature = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
//! let target = array![[1.0], [2.0], [3.1], [3.9]];
//!
//! let weight = fit_linear(&target, &feature, 1e-3)?;
//! let pred = linear_reg_pred(&feature, &weight)?;
//! assert_eq!(pred.shape(), &[4, 1]);
//!
//! let loss = linear_reg_loss(&target, &feature, 1e-3)?;
//! assert!(loss >= 0.0);
//! # Ok::<(), deep_kernel_reg::RegressionError>(())
//! ```

// Re-export approx traits for users who want to compare weights
pub use approx;

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod regression;
pub mod solver;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::{ConfigError, RidgeConfig};
pub use error::{RegressionError, Result};
pub use model::RidgeModel;
pub use regression::{
    add_const_col, fit_linear, fit_linear_with, linear_reg_loss, linear_reg_loss_with,
    linear_reg_pred, outer_prod,
};
pub use solver::{GramSolver, SolverKind};
