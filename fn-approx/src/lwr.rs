use nalgebra::{Const, DMatrix, DVector, Dim, Dyn, Matrix, MatrixView};

use crate::model_params::gaussian_activations;
use crate::{FunctionApproximator, LinReg, MetaParams, ModelParams};

/// Locally weighted regression with Gaussian basis functions
///
/// Each kernel fits its own affine model against the training data, using
/// its activations as sample weights. A prediction blends the per-kernel
/// models with the normalized activations at the query point.
#[derive(Debug, Clone)]
pub struct Lwr<R> {
    meta: MetaParams,
    model: Option<ModelParams>,
    regressor: R,
}

impl<R> Lwr<R> {
    /// Create a new, untrained approximator
    pub fn new(meta: MetaParams, regressor: R) -> Self {
        Self {
            meta,
            model: None,
            regressor,
        }
    }

    /// Create an already fitted approximator directly from model parameters,
    /// skipping training entirely
    pub fn from_model(model: ModelParams, regressor: R) -> Self {
        let meta = MetaParams::new(model.centers().clone(), model.widths().clone(), true);

        Self {
            meta,
            model: Some(model),
            regressor,
        }
    }

    /// The fitted model parameters, if trained
    #[inline(always)]
    pub fn model(&self) -> Option<&ModelParams> {
        self.model.as_ref()
    }

    /// The meta parameters the approximator was constructed with
    #[inline(always)]
    pub fn meta(&self) -> &MetaParams {
        &self.meta
    }
}

impl<R> Lwr<R>
where
    R: LinReg,
{
    /// Discard the current fit and train again on the given data
    pub fn retrain<'a>(
        &mut self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        targets: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) {
        self.model = None;
        self.train(inputs, targets);
    }
}

impl<R> FunctionApproximator for Lwr<R>
where
    R: LinReg,
{
    fn train<'a>(
        &mut self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        targets: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) {
        if self.is_trained() {
            warn!("train called on an already trained model, keeping the current fit. Use retrain to fit again");
            return;
        }
        assert_eq!(inputs.nrows(), targets.nrows());
        assert_eq!(inputs.ncols(), self.meta.n_dims());
        assert_eq!(targets.ncols(), 1);

        let n_samples = inputs.nrows();
        let n_dims = self.meta.n_dims();
        let n_kernels = self.meta.n_basis_functions();
        let n_betas = if self.meta.use_offset {
            n_dims + 1
        } else {
            n_dims
        };

        let design: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(n_samples),
            Dim::from_usize(n_betas),
            |i, j| {
                if j < n_dims {
                    inputs[(i, j)]
                } else {
                    // trailing column of ones fits the offsets
                    1.0
                }
            },
        );

        // each kernel's activations weight the samples of its own fit
        let activations = gaussian_activations(&self.meta.centers, &self.meta.widths, inputs);

        let mut slopes: DMatrix<f64> = Matrix::from_element_generic(
            Dim::from_usize(n_kernels),
            Dim::from_usize(n_dims),
            0.0,
        );
        let mut offsets: DVector<f64> = DVector::from_element(n_kernels, 0.0);
        for b in 0..n_kernels {
            let weights: DVector<f64> = DVector::from_fn(n_samples, |i, _| activations[(i, b)]);
            let beta = self.regressor.fit_readout(
                &design.columns(0, design.ncols()),
                targets,
                &weights,
            );

            for d in 0..n_dims {
                slopes[(b, d)] = beta[(d, 0)];
            }
            if self.meta.use_offset {
                offsets[b] = beta[(n_dims, 0)];
            }
        }

        self.model = Some(ModelParams::new(
            self.meta.centers.clone(),
            self.meta.widths.clone(),
            slopes,
            offsets,
        ));
    }

    fn predict<'a>(
        &self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) -> Option<DMatrix<f64>> {
        let model = match &self.model {
            Some(model) => model,
            None => {
                warn!("predict called on an untrained model, doing nothing");
                return None;
            }
        };

        let lines = model.lines(inputs);
        let activations = model.kernel_activations(inputs);

        // weight the values of each line with the normalized activations
        let outputs: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(inputs.nrows()),
            Dim::from_usize(1),
            |i, _| {
                let mut out = 0.0;
                for b in 0..model.n_basis_functions() {
                    out += lines[(i, b)] * activations[(i, b)];
                }
                out
            },
        );

        Some(outputs)
    }

    #[inline(always)]
    fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;
    use crate::{input_grid_1d, WeightedTikhonov};

    fn regressor() -> WeightedTikhonov {
        WeightedTikhonov {
            regularization_coeff: 0.0,
            epsilon: 0.0,
        }
    }

    fn line_data(slope: f64, offset: f64) -> (DMatrix<f64>, DMatrix<f64>) {
        let inputs = input_grid_1d(0.0, 1.0, 50);
        let targets: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(inputs.nrows()),
            Dim::from_usize(1),
            |i, _| slope * inputs[(i, 0)] + offset,
        );

        (inputs, targets)
    }

    #[test]
    fn lwr_recovers_linear_function() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let meta = MetaParams::grid_1d(0.0, 1.0, 3, 0.5, true);
        let mut lwr = Lwr::new(meta, regressor());

        let (inputs, targets) = line_data(2.0, 1.0);
        lwr.train(
            &inputs.columns(0, inputs.ncols()),
            &targets.columns(0, targets.ncols()),
        );
        assert!(lwr.is_trained());

        let outputs = lwr.predict(&inputs.columns(0, inputs.ncols())).unwrap();
        for i in 0..inputs.nrows() {
            assert_eq!(round(outputs[(i, 0)], 6), round(targets[(i, 0)], 6));
        }
    }

    #[test]
    fn predict_untrained_is_none() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let meta = MetaParams::grid_1d(0.0, 1.0, 3, 0.5, true);
        let lwr = Lwr::new(meta, regressor());

        let inputs = input_grid_1d(0.0, 1.0, 10);
        assert!(lwr.predict(&inputs.columns(0, inputs.ncols())).is_none());
    }

    #[test]
    fn train_twice_keeps_first_fit() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let meta = MetaParams::grid_1d(0.0, 1.0, 3, 0.5, true);
        let mut lwr = Lwr::new(meta, regressor());

        let (inputs, first_targets) = line_data(2.0, 1.0);
        lwr.train(
            &inputs.columns(0, inputs.ncols()),
            &first_targets.columns(0, first_targets.ncols()),
        );

        // the second call must be ignored
        let (_, second_targets) = line_data(-5.0, 3.0);
        lwr.train(
            &inputs.columns(0, inputs.ncols()),
            &second_targets.columns(0, second_targets.ncols()),
        );

        let outputs = lwr.predict(&inputs.columns(0, inputs.ncols())).unwrap();
        for i in 0..inputs.nrows() {
            assert_eq!(round(outputs[(i, 0)], 6), round(first_targets[(i, 0)], 6));
        }
    }

    #[test]
    fn retrain_replaces_fit() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let meta = MetaParams::grid_1d(0.0, 1.0, 3, 0.5, true);
        let mut lwr = Lwr::new(meta, regressor());

        let (inputs, first_targets) = line_data(2.0, 1.0);
        lwr.train(
            &inputs.columns(0, inputs.ncols()),
            &first_targets.columns(0, first_targets.ncols()),
        );

        let (_, second_targets) = line_data(-5.0, 3.0);
        lwr.retrain(
            &inputs.columns(0, inputs.ncols()),
            &second_targets.columns(0, second_targets.ncols()),
        );

        let outputs = lwr.predict(&inputs.columns(0, inputs.ncols())).unwrap();
        for i in 0..inputs.nrows() {
            assert_eq!(round(outputs[(i, 0)], 6), round(second_targets[(i, 0)], 6));
        }
    }

    #[test]
    fn from_model_is_trained() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let centers: DMatrix<f64> =
            Matrix::from_vec_generic(Dim::from_usize(1), Dim::from_usize(1), vec![0.5]);
        let widths: DMatrix<f64> =
            Matrix::from_element_generic(Dim::from_usize(1), Dim::from_usize(1), 0.3);
        let slopes: DMatrix<f64> =
            Matrix::from_element_generic(Dim::from_usize(1), Dim::from_usize(1), 0.0);
        let offsets: DVector<f64> = DVector::from_vec(vec![7.0]);
        let model = ModelParams::new(centers, widths, slopes, offsets);

        let lwr = Lwr::from_model(model, regressor());
        assert!(lwr.is_trained());

        // a single flat kernel predicts its offset everywhere
        let inputs = input_grid_1d(-1.0, 2.0, 7);
        let outputs = lwr.predict(&inputs.columns(0, inputs.ncols())).unwrap();
        for i in 0..inputs.nrows() {
            assert_eq!(outputs[(i, 0)], 7.0);
        }
    }
}
