use nalgebra::{Const, DMatrix, DVector, Dim, Dyn, Matrix, MatrixView};

/// Generic way of performing weighted linear regression
pub trait LinReg: Clone {
    /// Fit a coefficient matrix mapping design rows to targets, giving each
    /// sample the corresponding weight
    ///
    /// # Parameters
    /// design: Input data, one sample per row. When an offset is fitted the
    /// trailing column should be just 1s
    /// targets: Target data with as many rows as the design matrix
    /// weights: One non-negative weight per sample
    fn fit_readout<'a>(
        &self,
        design: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        targets: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        weights: &DVector<f64>,
    ) -> DMatrix<f64>;
}

/// Weighted Tikhonov regularization aka weighted ridge regression
#[derive(Debug, Clone)]
pub struct WeightedTikhonov {
    /// Ridge parameter
    pub regularization_coeff: f64,
    /// Samples whose weight is below this threshold do not contribute to the
    /// fit. The surviving submatrices are often much smaller than the full
    /// ones, which makes the inversion cheaper. Zero keeps every sample
    pub epsilon: f64,
}

impl LinReg for WeightedTikhonov {
    fn fit_readout<'a>(
        &self,
        design: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        targets: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
        weights: &DVector<f64>,
    ) -> DMatrix<f64> {
        assert_eq!(design.nrows(), targets.nrows());
        assert_eq!(design.nrows(), weights.len());

        let keep: Vec<usize> = (0..weights.len()).filter(|i| weights[*i] >= self.epsilon).collect();

        let design_sub: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(keep.len()),
            Dim::from_usize(design.ncols()),
            |i, j| design[(keep[i], j)],
        );
        let targets_sub: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(keep.len()),
            Dim::from_usize(targets.ncols()),
            |i, j| targets[(keep[i], j)],
        );

        let reg_m: DMatrix<f64> = Matrix::from_diagonal_element_generic(
            Dim::from_usize(design.ncols()),
            Dim::from_usize(design.ncols()),
            self.regularization_coeff,
        );

        // X^T * W, with W the diagonal matrix of the surviving weights
        let mut xtw = design_sub.transpose();
        for (k, i) in keep.iter().enumerate() {
            for r in 0..xtw.nrows() {
                xtw[(r, k)] *= weights[*i];
            }
        }

        let p0 = &xtw * &design_sub;
        let p1 = (p0 + reg_m).try_inverse().unwrap();
        let p2 = &xtw * &targets_sub;

        p1 * p2
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::VecStorage;
    use round::round;

    use super::*;

    #[test]
    fn weighted_tikhonov_uniform_weights() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // Note the last column being just ones
        let design: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(4),
            Dim::from_usize(3),
            vec![0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0],
        );
        let targets: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(4),
            Dim::from_usize(1),
            vec![1.0, 2.0, 3.0, 4.0],
        );
        let weights: DVector<f64> = DVector::from_element(4, 1.0);

        let regressor = WeightedTikhonov {
            regularization_coeff: 0.0,
            epsilon: 0.0,
        };
        let mut readout = regressor.fit_readout(
            &design.columns(0, design.ncols()),
            &targets.columns(0, targets.ncols()),
            &weights,
        );

        let goal: Matrix<f64, Dyn, Const<1>, VecStorage<f64, Dyn, Const<1>>> =
            Matrix::from_vec_generic(Dim::from_usize(3), Dim::from_usize(1), vec![1.0, 0.0, 1.0]);

        readout.iter_mut().for_each(|v| *v = round(*v, 6));

        assert_eq!(readout, goal);
    }

    #[test]
    fn weighted_tikhonov_prunes_low_weights() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // The last sample is an outlier whose weight falls below epsilon,
        // so the fit must reproduce the line through the first four samples
        let design: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(5),
            Dim::from_usize(2),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        );
        let targets: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(5),
            Dim::from_usize(1),
            vec![1.0, 2.0, 3.0, 4.0, 100.0],
        );
        let weights: DVector<f64> =
            DVector::from_vec(vec![1.0, 0.8, 0.8, 1.0, 1e-6]);

        let regressor = WeightedTikhonov {
            regularization_coeff: 0.0,
            epsilon: 0.1,
        };
        let mut readout = regressor.fit_readout(
            &design.columns(0, design.ncols()),
            &targets.columns(0, targets.ncols()),
            &weights,
        );

        let goal: Matrix<f64, Dyn, Const<1>, VecStorage<f64, Dyn, Const<1>>> =
            Matrix::from_vec_generic(Dim::from_usize(2), Dim::from_usize(1), vec![1.0, 1.0]);

        readout.iter_mut().for_each(|v| *v = round(*v, 6));

        assert_eq!(readout, goal);
    }
}
