//! Fitted ridge model.
//!
//! [`RidgeModel`] pairs a weight array with the [`RidgeConfig`] that produced
//! it, so predictions and losses reuse the same intercept handling and
//! regularization strength.
//!
//! ```text
//! weights[[feature, ...]]       → coefficient
//! weights[[feature_dim, ...]]   → intercept (only with fit_intercept)
//! ```
//!
//! # Example
//!
//! ```
//! use deep_kernel_reg::{RidgeConfig, RidgeModel};
//! use ndarray::array;
//!
//! let config = RidgeConfig::builder().fit_intercept(true).build().unwrap();
//! let feature = array![[0.0], [1.0], [2.0]];
//! let target = array![[1.0], [3.0], [5.0]];
//!
//! let model = RidgeModel::fit(&config, &target, &feature).unwrap();
//! let intercept = model.intercept().unwrap();
//! assert!((intercept[[0]] - 1.0).abs() < 1e-10);
//!
//! let pred = model.predict(&array![[3.0]]).unwrap();
//! assert!((pred[[0, 0]] - 7.0).abs() < 1e-10);
//! ```

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, CowArray, Data, Dimension, Ix2};

use crate::config::RidgeConfig;
use crate::error::{RegressionError, Result};
use crate::layout::{expect_matrix, expect_min_rank, expect_shape, Operand};
use crate::regression::{add_const_col, fit_linear_with, linear_reg_pred, ridge_objective};

/// Ridge regression weights together with their fitting configuration.
#[derive(Debug, Clone)]
pub struct RidgeModel {
    /// Shape `[n_features (+ 1), ...]`. Last row is the intercept when
    /// `config.fit_intercept` is set.
    weights: ArrayD<f64>,
    config: RidgeConfig,
}

impl RidgeModel {
    /// Fit a model on `feature` `(n, d)` and `target` `(n, ...)`.
    ///
    /// # Errors
    ///
    /// Same as [`fit_linear`](crate::fit_linear).
    pub fn fit<S1, S2, D1, D2>(
        config: &RidgeConfig,
        target: &ArrayBase<S1, D1>,
        feature: &ArrayBase<S2, D2>,
    ) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        let design = design_matrix(config, feature)?;
        let weights = fit_linear_with(target, &design, config.reg, &config.solver)?;
        Ok(Self {
            weights,
            config: config.clone(),
        })
    }

    /// Wrap existing weights.
    ///
    /// With `config.fit_intercept`, the last row of `weights` is taken as the
    /// intercept.
    ///
    /// # Errors
    ///
    /// [`RankTooLow`](crate::RegressionError::RankTooLow) if `weights` has rank < 2,
    /// or [`ShapeMismatch`](crate::RegressionError::ShapeMismatch) if an intercept
    /// is configured but `weights` has no rows.
    pub fn from_weights(weights: ArrayD<f64>, config: RidgeConfig) -> Result<Self> {
        let operand = Operand::classify(weights.view(), "weights")?;
        if config.fit_intercept && operand.leading_len() == 0 {
            return Err(RegressionError::ShapeMismatch {
                name: "weights",
                axis: 0,
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { weights, config })
    }

    /// Predict for `feature` `(n, d)`; returns `(n, ...)`.
    pub fn predict<S, D>(&self, feature: &ArrayBase<S, D>) -> Result<ArrayD<f64>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let design = design_matrix(&self.config, feature)?;
        linear_reg_pred(&design, &self.weights)
    }

    /// Ridge objective of these weights on `(target, feature)`:
    /// `‖target − pred‖²_F / n + reg · ‖weights‖²_F`.
    ///
    /// The intercept row, if any, is part of the penalty.
    pub fn loss<S1, S2, D1, D2>(
        &self,
        target: &ArrayBase<S1, D1>,
        feature: &ArrayBase<S2, D2>,
    ) -> Result<f64>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        let target = target.view().into_dyn();
        expect_min_rank(&target, "target", 2)?;
        let pred = self.predict(feature)?;
        expect_shape("target", pred.shape(), target.shape())?;
        Ok(ridge_objective(
            &target,
            &pred,
            &self.weights,
            pred.shape()[0],
            self.config.reg,
        ))
    }

    /// All weights, including the intercept row if present.
    #[inline]
    pub fn weights(&self) -> ArrayViewD<'_, f64> {
        self.weights.view()
    }

    /// Consume the model and return its weights.
    pub fn into_weights(self) -> ArrayD<f64> {
        self.weights
    }

    /// Coefficient rows only, excluding the intercept.
    pub fn coefficients(&self) -> ArrayViewD<'_, f64> {
        self.weights
            .slice_axis(Axis(0), (0..self.n_features()).into())
    }

    /// Intercept row (shape `weights.shape[1..]`), if the model has one.
    pub fn intercept(&self) -> Option<ArrayViewD<'_, f64>> {
        self.config
            .fit_intercept
            .then(|| self.weights.index_axis(Axis(0), self.n_features()))
    }

    /// Number of input features, excluding the intercept column.
    #[inline]
    pub fn n_features(&self) -> usize {
        let rows = self.weights.shape()[0];
        if self.config.fit_intercept {
            rows.saturating_sub(1)
        } else {
            rows
        }
    }

    /// Shape of a single prediction row.
    #[inline]
    pub fn output_shape(&self) -> &[usize] {
        &self.weights.shape()[1..]
    }

    /// Configuration used for fitting.
    #[inline]
    pub fn config(&self) -> &RidgeConfig {
        &self.config
    }
}

/// Features as a matrix, with a ones column appended when configured.
fn design_matrix<'a, S, D>(
    config: &RidgeConfig,
    feature: &'a ArrayBase<S, D>,
) -> Result<CowArray<'a, f64, Ix2>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let feature = expect_matrix(feature.view().into_dyn(), "feature")?;
    if config.fit_intercept {
        Ok(CowArray::from(add_const_col(&feature)?))
    } else {
        Ok(CowArray::from(feature))
    }
}

// =============================================================================
// Tests
// =============================================================================
