use fn_approx::{
    input_grid_1d, FunctionApproximator, Lwr, MetaParams, ModelParams, WeightedTikhonov,
};
use nalgebra::{DMatrix, DVector, Dim, Matrix};
use plotters::{coord::Shift, prelude::*};
use rollout_plot::{draw_trajectory, Series};

use crate::TaskSolver;

/// Rolls out a policy encoded as kernel offsets of a locally weighted
/// regression model
///
/// The solver owns a fixed kernel grid over time. A sample assigns one
/// offset to each kernel; the rollout evaluates the resulting flat-slope
/// model over the time grid and returns the traced trajectory.
#[derive(Debug, Clone)]
pub struct LwrPolicySolver {
    meta: MetaParams,
    t_min: f64,
    t_max: f64,
    n_time_steps: usize,
}

impl LwrPolicySolver {
    /// Create a solver with evenly spaced kernels over [t_min, t_max]
    pub fn new(
        n_basis_functions: usize,
        intersection_height: f64,
        t_min: f64,
        t_max: f64,
        n_time_steps: usize,
    ) -> Self {
        let meta = MetaParams::grid_1d(t_min, t_max, n_basis_functions, intersection_height, true);

        Self {
            meta,
            t_min,
            t_max,
            n_time_steps,
        }
    }

    /// The kernel grid the samples parameterize
    #[inline(always)]
    pub fn meta(&self) -> &MetaParams {
        &self.meta
    }
}

impl TaskSolver for LwrPolicySolver {
    type Sample = DVector<f64>;
    type CostVars = DMatrix<f64>;

    /// Evaluate the sample's policy over the time grid, one trajectory row
    /// [t, y] per step
    fn perform_rollout(&self, sample: &DVector<f64>) -> DMatrix<f64> {
        assert_eq!(sample.len(), self.meta.n_basis_functions());

        let slopes: DMatrix<f64> = Matrix::from_element_generic(
            Dim::from_usize(self.meta.n_basis_functions()),
            Dim::from_usize(self.meta.n_dims()),
            0.0,
        );
        let model = ModelParams::new(
            self.meta.centers.clone(),
            self.meta.widths.clone(),
            slopes,
            sample.clone_owned(),
        );
        let policy = Lwr::from_model(
            model,
            WeightedTikhonov {
                regularization_coeff: 0.0,
                epsilon: 0.0,
            },
        );

        let times = input_grid_1d(self.t_min, self.t_max, self.n_time_steps);
        let values = policy.predict(&times.columns(0, times.ncols())).unwrap();

        Matrix::from_fn_generic(
            Dim::from_usize(self.n_time_steps),
            Dim::from_usize(2),
            |i, j| {
                if j == 0 {
                    times[(i, 0)]
                } else {
                    values[(i, 0)]
                }
            },
        )
    }

    fn plot_rollout<DB: DrawingBackend>(
        &self,
        cost_vars: &DMatrix<f64>,
        axes: &DrawingArea<DB, Shift>,
    ) {
        let mut values: Series = Vec::with_capacity(cost_vars.nrows());
        for i in 0..cost_vars.nrows() {
            values.push((cost_vars[(i, 0)], cost_vars[(i, 1)]));
        }

        draw_trajectory(axes, "lwr policy", &[("y", &values)]);
    }
}
