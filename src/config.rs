//! Ridge regression configuration with builder pattern.
//!
//! [`RidgeConfig`] collects the knobs of a closed-form ridge fit. It uses the
//! `bon` crate for builder generation and validates at build time.
//!
//! # Example
//!
//! ```
//! use deep_kernel_reg::{RidgeConfig, SolverKind};
//!
//! // All defaults: no regularization, direct inverse, no intercept
//! let config = RidgeConfig::default();
//! assert_eq!(config.reg, 0.0);
//!
//! let config = RidgeConfig::builder()
//!     .reg(1e-3)
//!     .solver(SolverKind::Cholesky)
//!     .fit_intercept(true)
//!     .build()
//!     .unwrap();
//! assert!(config.fit_intercept);
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::solver::SolverKind;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Regularization strength must be a finite number.
    #[error("reg must be finite, got {0}")]
    InvalidRegularization(f64),
}

// =============================================================================
// RidgeConfig
// =============================================================================

/// Configuration for a closed-form ridge fit.
///
/// Negative `reg` is accepted; it shrinks the Gram diagonal instead of
/// growing it and may leave the system singular.
#[derive(Debug, Clone, PartialEq, Default, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct RidgeConfig {
    /// L2 regularization strength. Default: 0.0.
    ///
    /// The Gram matrix receives `reg * n_data` on its diagonal.
    #[builder(default)]
    pub reg: f64,

    /// Gram-matrix inversion strategy. Default: [`SolverKind::Inverse`].
    #[builder(default)]
    pub solver: SolverKind,

    /// Append a constant column to the features before fitting. Default: false.
    ///
    /// The fitted weights then have `feature_dim + 1` rows, the last being
    /// the intercept.
    #[builder(default)]
    pub fit_intercept: bool,
}

impl<S: ridge_config_builder::IsComplete> RidgeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegularization`] if `reg` is NaN or infinite.
    pub fn build(self) -> Result<RidgeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl RidgeConfig {
    /// Validate the configuration.
    ///
    /// Builder output is already validated; call this on deserialized configs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reg.is_finite() {
            return Err(ConfigError::InvalidRegularization(self.reg));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
