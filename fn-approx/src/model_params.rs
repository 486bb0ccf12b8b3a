use nalgebra::{Const, DMatrix, DVector, Dim, Dyn, Matrix, MatrixView};

/// The model parameters of a fitted locally weighted regression model
#[derive(Debug, Clone)]
pub struct ModelParams {
    /// Kernel centers, one kernel per row
    centers: DMatrix<f64>,
    /// Kernel widths, same shape as the centers
    widths: DMatrix<f64>,
    /// Slopes of each kernel's affine model, same shape as the centers
    slopes: DMatrix<f64>,
    /// Offsets of each kernel's affine model
    offsets: DVector<f64>,
}

impl ModelParams {
    /// Create model parameters from the kernel grid and the per-kernel
    /// affine models
    pub fn new(
        centers: DMatrix<f64>,
        widths: DMatrix<f64>,
        slopes: DMatrix<f64>,
        offsets: DVector<f64>,
    ) -> Self {
        assert_eq!(centers.shape(), widths.shape());
        assert_eq!(centers.shape(), slopes.shape());
        assert_eq!(centers.nrows(), offsets.len());

        Self {
            centers,
            widths,
            slopes,
            offsets,
        }
    }

    /// The number of Gaussian basis functions
    #[inline(always)]
    pub fn n_basis_functions(&self) -> usize {
        self.centers.nrows()
    }

    /// The input dimensionality the kernels live in
    #[inline(always)]
    pub fn n_dims(&self) -> usize {
        self.centers.ncols()
    }

    /// The kernel centers, one kernel per row
    #[inline(always)]
    pub fn centers(&self) -> &DMatrix<f64> {
        &self.centers
    }

    /// The kernel widths, same shape as the centers
    #[inline(always)]
    pub fn widths(&self) -> &DMatrix<f64> {
        &self.widths
    }

    /// Activation of every kernel at every input, before normalization
    ///
    /// Output has one row per input sample and one column per kernel.
    pub fn unnormalized_kernel_activations<'a>(
        &self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) -> DMatrix<f64> {
        gaussian_activations(&self.centers, &self.widths, inputs)
    }

    /// Normalized kernel activations, each row summing to one
    pub fn kernel_activations<'a>(
        &self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) -> DMatrix<f64> {
        let mut activations = self.unnormalized_kernel_activations(inputs);

        let n_kernels = self.n_basis_functions();
        for i in 0..activations.nrows() {
            let mut sum = 0.0;
            for b in 0..n_kernels {
                sum += activations[(i, b)];
            }
            for b in 0..n_kernels {
                // far away from every kernel the sum underflows to zero,
                // fall back to a uniform activation there
                activations[(i, b)] = if sum > 0.0 {
                    activations[(i, b)] / sum
                } else {
                    1.0 / n_kernels as f64
                };
            }
        }

        activations
    }

    /// Each kernel's affine model evaluated at the inputs
    ///
    /// Output has one row per input sample and one column per kernel.
    pub fn lines<'a>(
        &self,
        inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
    ) -> DMatrix<f64> {
        assert_eq!(inputs.ncols(), self.n_dims());

        Matrix::from_fn_generic(
            Dim::from_usize(inputs.nrows()),
            Dim::from_usize(self.n_basis_functions()),
            |i, b| {
                let mut line = self.offsets[b];
                for d in 0..self.n_dims() {
                    line += inputs[(i, d)] * self.slopes[(b, d)];
                }
                line
            },
        )
    }
}

/// Gaussian kernel activations of the given grid at the inputs
pub(crate) fn gaussian_activations<'a>(
    centers: &DMatrix<f64>,
    widths: &DMatrix<f64>,
    inputs: &'a MatrixView<'a, f64, Dyn, Dyn, Const<1>, Dyn>,
) -> DMatrix<f64> {
    assert_eq!(inputs.ncols(), centers.ncols());

    Matrix::from_fn_generic(
        Dim::from_usize(inputs.nrows()),
        Dim::from_usize(centers.nrows()),
        |i, b| {
            let mut sq_dist = 0.0;
            for d in 0..centers.ncols() {
                let z = (inputs[(i, d)] - centers[(b, d)]) / widths[(b, d)];
                sq_dist += z * z;
            }
            (-0.5 * sq_dist).exp()
        },
    )
}
