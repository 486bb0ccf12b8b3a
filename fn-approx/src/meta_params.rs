use nalgebra::{DMatrix, Dim, Matrix};

/// The meta parameters of the locally weighted regression approximator
#[derive(Debug, Clone)]
pub struct MetaParams {
    /// Kernel centers, one kernel per row
    pub centers: DMatrix<f64>,
    /// Kernel widths, same shape as the centers
    pub widths: DMatrix<f64>,
    /// Whether each kernel fits an offset besides its slopes, in which case
    /// the design matrix carries a trailing column of ones
    pub use_offset: bool,
}

impl MetaParams {
    /// Meta parameters with an explicitly chosen kernel grid
    pub fn new(centers: DMatrix<f64>, widths: DMatrix<f64>, use_offset: bool) -> Self {
        assert_eq!(centers.shape(), widths.shape());

        Self {
            centers,
            widths,
            use_offset,
        }
    }

    /// Evenly spaced kernels over [min, max] whose neighbors intersect at
    /// the given activation height
    pub fn grid_1d(
        min: f64,
        max: f64,
        n_basis_functions: usize,
        intersection_height: f64,
        use_offset: bool,
    ) -> Self {
        assert!(n_basis_functions >= 2);
        assert!(intersection_height > 0.0 && intersection_height < 1.0);

        let spacing = (max - min) / (n_basis_functions - 1) as f64;
        let width = (spacing * spacing / (-8.0 * intersection_height.ln())).sqrt();

        let centers: DMatrix<f64> = Matrix::from_fn_generic(
            Dim::from_usize(n_basis_functions),
            Dim::from_usize(1),
            |i, _| min + i as f64 * spacing,
        );
        let widths: DMatrix<f64> = Matrix::from_element_generic(
            Dim::from_usize(n_basis_functions),
            Dim::from_usize(1),
            width,
        );

        Self {
            centers,
            widths,
            use_offset,
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
}
