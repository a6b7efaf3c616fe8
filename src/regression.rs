//! Closed-form ridge regression and tensor helpers.
//!
//! # Ridge fit
//!
//! For features `X` with shape `(n, d)` and targets `Y` with shape
//! `(n, d1, ..., dk)`, [`fit_linear`] returns the minimizer of
//!
//! ```text
//! ‖Y − X·W‖² + reg · n · ‖W‖²
//! W = (XᵀX + reg·n·I)⁻¹ · XᵀY          shape (d, d1, ..., dk)
//! ```
//!
//! [`linear_reg_loss`] scores a fit with
//!
//! ```text
//! ‖Y − X·W‖²_F / n + reg · ‖W‖²_F
//! ```
//!
//! The penalty here is *not* multiplied by `n`, unlike the Gram regularizer
//! used while fitting.
//!
//! # Inputs
//!
//! Every function accepts owned arrays or views of any dimensionality and
//! checks ranks at runtime. Rank and shape violations return an error before
//! any arithmetic is done.

use log::{debug, trace, warn};
use ndarray::{concatenate, Array2, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn};

use crate::error::Result;
use crate::layout::{
    contract_first, contract_leading, expect_axis_len, expect_matrix, expect_min_rank, Operand,
};
use crate::solver::{GramSolver, SolverKind};

// =============================================================================
// Fitting
// =============================================================================

/// Fit ridge-regression weights with the default solver.
///
/// `target` has shape `(n, ...)` with rank >= 2, `feature` has shape `(n, d)`.
/// Returns weights of shape `(d, ...)`.
///
/// # Errors
///
/// - [`RankMismatch`](crate::RegressionError::RankMismatch) if `feature` is not rank 2
/// - [`RankTooLow`](crate::RegressionError::RankTooLow) if `target` has rank < 2
/// - [`ShapeMismatch`](crate::RegressionError::ShapeMismatch) if row counts differ
/// - [`SingularMatrix`](crate::RegressionError::SingularMatrix) if `XᵀX + reg·n·I` has no inverse
///
/// # Example
///
/// ```
/// use deep_kernel_reg::fit_linear;
/// use ndarray::array;
///
/// let feature = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
/// let target = array![[1.0], [2.0], [3.0]];
/// let weight = fit_linear(&target, &feature, 0.0).unwrap();
/// assert_eq!(weight.shape(), &[2, 1]);
/// assert!((weight[[0, 0]] - 1.0).abs() < 1e-10);
/// assert!((weight[[1, 0]] - 2.0).abs() < 1e-10);
/// ```
pub fn fit_linear<S1, S2, D1, D2>(
    target: &ArrayBase<S1, D1>,
    feature: &ArrayBase<S2, D2>,
    reg: f64,
) -> Result<ArrayD<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    fit_linear_with(target, feature, reg, &SolverKind::default())
}

/// Fit ridge-regression weights, inverting the Gram matrix with `solver`.
///
/// See [`fit_linear`] for shapes and errors. With [`SolverKind::Cholesky`]
/// a non positive definite system is reported as
/// [`NotPositiveDefinite`](crate::RegressionError::NotPositiveDefinite).
pub fn fit_linear_with<S1, S2, D1, D2, G>(
    target: &ArrayBase<S1, D1>,
    feature: &ArrayBase<S2, D2>,
    reg: f64,
    solver: &G,
) -> Result<ArrayD<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
    G: GramSolver + ?Sized,
{
    let feature = expect_matrix(feature.view().into_dyn(), "feature")?;
    let target = Operand::classify(target.view().into_dyn(), "target")?;
    let (n_data, n_dim) = feature.dim();
    expect_axis_len("target", 0, n_data, target.leading_len())?;

    debug!(
        "ridge fit: n_data={n_data}, feature_dim={n_dim}, target_rank={}, reg={reg}, solver={}",
        target.ndim(),
        solver.name()
    );

    let mut gram = feature.t().dot(&feature);
    let shift = reg * n_data as f64;
    gram.diag_mut().mapv_inplace(|v| v + shift);

    let gram_inv = solver.invert(gram.view()).inspect_err(|err| {
        warn!("ridge fit failed to invert Gram matrix: {err}");
    })?;

    // B = Xᵀ Y, then W = A⁻¹ B. Both steps are plain matrix products when the
    // target is a matrix and leading-axis contractions otherwise.
    let rhs = contract_leading(feature, &target)?;
    let rhs = Operand::classify(rhs.view(), "projection")?;
    let weight = contract_first(gram_inv.view(), &rhs)?;

    trace!("ridge fit: weight shape {:?}", weight.shape());
    Ok(weight)
}

// =============================================================================
// Prediction
// =============================================================================

/// Predict with fitted weights: `pred[n, ...] = Σ_d feature[n, d] · weight[d, ...]`.
///
/// `feature` has shape `(n, d)`, `weight` has shape `(d, ...)` with rank >= 2.
/// Returns predictions of shape `(n, ...)`.
///
/// # Errors
///
/// Fails if `weight` has rank < 2, `feature` is not rank 2, or
/// `feature.shape[1] != weight.shape[0]`.
pub fn linear_reg_pred<S1, S2, D1, D2>(
    feature: &ArrayBase<S1, D1>,
    weight: &ArrayBase<S2, D2>,
) -> Result<ArrayD<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    let weight = Operand::classify(weight.view().into_dyn(), "weight")?;
    let feature = expect_matrix(feature.view().into_dyn(), "feature")?;
    expect_axis_len("weight", 0, feature.ncols(), weight.leading_len())?;
    contract_first(feature, &weight)
}

// =============================================================================
// Loss
// =============================================================================

/// Fit, predict and score in one step, using the default solver.
///
/// Returns `‖target − pred‖²_F / n + reg · ‖weight‖²_F`, which is
/// non-negative whenever `reg >= 0`.
///
/// # Errors
///
/// Same as [`fit_linear`].
pub fn linear_reg_loss<S1, S2, D1, D2>(
    target: &ArrayBase<S1, D1>,
    feature: &ArrayBase<S2, D2>,
    reg: f64,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    linear_reg_loss_with(target, feature, reg, &SolverKind::default())
}

/// [`linear_reg_loss`] with an explicit Gram-matrix solver.
pub fn linear_reg_loss_with<S1, S2, D1, D2, G>(
    target: &ArrayBase<S1, D1>,
    feature: &ArrayBase<S2, D2>,
    reg: f64,
    solver: &G,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
    G: GramSolver + ?Sized,
{
    let weight = fit_linear_with(target, feature, reg, solver)?;
    let pred = linear_reg_pred(feature, &weight)?;
    Ok(ridge_objective(target, &pred, &weight, feature.shape()[0], reg))
}

/// `‖target − pred‖²_F / n_data + reg · ‖weight‖²_F`.
///
/// Shapes must already agree.
pub(crate) fn ridge_objective<S1, S2, S3, D1, D2, D3>(
    target: &ArrayBase<S1, D1>,
    pred: &ArrayBase<S2, D2>,
    weight: &ArrayBase<S3, D3>,
    n_data: usize,
    reg: f64,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    S3: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
{
    let residual: f64 = target
        .iter()
        .zip(pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    let penalty: f64 = weight.iter().map(|&w| w * w).sum();
    residual / n_data as f64 + reg * penalty
}

// =============================================================================
// Tensor Helpers
// =============================================================================

/// Batched outer product.
///
/// `mat1` has shape `(n, a1, ..., ak)` and `mat2` has shape `(n, b1, ..., bm)`.
/// The result has shape `(n, a1, ..., ak, b1, ..., bm)` with
/// `result[i, a.., b..] = mat1[i, a..] · mat2[i, b..]`.
///
/// # Example
///
/// ```
/// use deep_kernel_reg::outer_prod;
/// use ndarray::array;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[1.0, 10.0, 100.0], [0.5, 0.0, -1.0]];
/// let out = outer_prod(&a, &b).unwrap();
/// assert_eq!(out.shape(), &[2, 2, 3]);
/// assert_eq!(out[[0, 1, 2]], 200.0);
/// assert_eq!(out[[1, 0, 2]], -3.0);
/// ```
pub fn outer_prod<S1, S2, D1, D2>(
    mat1: &ArrayBase<S1, D1>,
    mat2: &ArrayBase<S2, D2>,
) -> Result<ArrayD<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    let mat1 = mat1.view().into_dyn();
    let mat2 = mat2.view().into_dyn();
    expect_min_rank(&mat1, "mat1", 1)?;
    expect_min_rank(&mat2, "mat2", 1)?;
    let n_data = mat1.shape()[0];
    expect_axis_len("mat2", 0, n_data, mat2.shape()[0])?;

    let trailing1 = &mat1.shape()[1..];
    let trailing2 = &mat2.shape()[1..];

    // (n, a.., 1, .., 1) * (n, 1, .., 1, b..) broadcasts to (n, a.., b..).
    let mut shape1 = mat1.shape().to_vec();
    shape1.extend(std::iter::repeat(1).take(trailing2.len()));
    let mut shape2 = Vec::with_capacity(1 + trailing1.len() + trailing2.len());
    shape2.push(n_data);
    shape2.extend(std::iter::repeat(1).take(trailing1.len()));
    shape2.extend_from_slice(trailing2);

    let aug1 = mat1.to_shape(IxDyn(&shape1))?;
    let aug2 = mat2.to_shape(IxDyn(&shape2))?;
    Ok(&aug1 * &aug2)
}

/// Append a column of ones: `(n, c)` → `(n, c + 1)`.
///
/// # Errors
///
/// [`RankMismatch`](crate::RegressionError::RankMismatch) if `mat` is not rank 2.
///
/// # Example
///
/// ```
/// use deep_kernel_reg::add_const_col;
/// use ndarray::array;
///
/// let out = add_const_col(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(out, array![[1.0, 2.0, 1.0], [3.0, 4.0, 1.0]]);
/// ```
pub fn add_const_col<S, D>(mat: &ArrayBase<S, D>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mat = expect_matrix(mat.view().into_dyn(), "mat")?;
    let ones = Array2::<f64>::ones((mat.nrows(), 1));
    Ok(concatenate(Axis(1), &[mat, ones.view()])?)
}

// =============================================================================
// Tests
// =============================================================================
