//! Function approximation from sampled data
//!
//! A `FunctionApproximator` is fitted once from input/target samples and
//! afterwards maps new inputs to outputs. The provided implementation is a
//! locally weighted regression with Gaussian basis functions, where each
//! kernel fits its own affine model through a pluggable `LinReg` regressor.

#[macro_use]
extern crate log;

use nalgebra::{Const, DMatrix, Dim, Dyn, Matrix, MatrixView};

mod lin_reg;
mod lwr;
mod meta_params;
mod model_params;

pub use lin_reg::{LinReg, WeightedTikhonov};
pub use lwr::Lwr;
pub use meta_params::MetaParams;
pub use model_params::ModelParams;

/// Generic way of mapping inputs to outputs after being fitted from data
pub trait FunctionApproximator {
    /// Fit the model from training data
    ///
    /// # Parameters
    /// inputs: One sample per row, one input dimension per column
    /// targets: One sample per row, a single target column
    fn train<'a>(
        &mut self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        targets: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    );

    /// Predict the outputs for the given inputs, one sample per row
    ///
    /// Returns `None` if the model has not been trained yet.
    fn predict<'a>(
        &self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) -> Option<DMatrix<f64>>;

    /// Whether the model has been trained
    fn is_trained(&self) -> bool;
}

/// Evenly spaced 1-D inputs over [min, max], as a single-column matrix
pub fn input_grid_1d(min: f64, max: f64, n_samples: usize) -> DMatrix<f64> {
    assert!(n_samples >= 2);

    let step = (max - min) / (n_samples - 1) as f64;
    Matrix::from_fn_generic(Dim::from_usize(n_samples), Dim::from_usize(1), |i, _| {
        min + i as f64 * step
    })
}
