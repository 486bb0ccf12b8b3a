use nalgebra::{DMatrix, DVector, Dim, Matrix};
use plotters::{coord::Shift, prelude::*};
use rollout_plot::{draw_trajectory, Series};

use crate::TaskSolver;

/// Rolls out a 1-D point mass driven by per-segment accelerations
///
/// The sample holds one force value per integration segment. The rollout
/// integrates the mass over the segments with a fixed step and returns the
/// trajectory, which is all a cost function downstream could ask for.
#[derive(Debug, Clone)]
pub struct PointMassSolver {
    /// Mass of the point
    pub mass: f64,
    /// Integration step in seconds
    pub dt: f64,
    /// Initial position
    pub y0: f64,
    /// Initial velocity
    pub yd0: f64,
}

impl TaskSolver for PointMassSolver {
    type Sample = DVector<f64>;
    type CostVars = DMatrix<f64>;

    /// Integrate the point mass, one trajectory row [t, y, yd, ydd] per step
    fn perform_rollout(&self, sample: &DVector<f64>) -> DMatrix<f64> {
        let n_segments = sample.len();

        let mut cost_vars: DMatrix<f64> = Matrix::from_element_generic(
            Dim::from_usize(n_segments + 1),
            Dim::from_usize(4),
            0.0,
        );
        cost_vars[(0, 1)] = self.y0;
        cost_vars[(0, 2)] = self.yd0;

        let mut y = self.y0;
        let mut yd = self.yd0;
        for i in 0..n_segments {
            let ydd = sample[i] / self.mass;
            yd += ydd * self.dt;
            y += yd * self.dt;

            cost_vars[(i + 1, 0)] = (i + 1) as f64 * self.dt;
            cost_vars[(i + 1, 1)] = y;
            cost_vars[(i + 1, 2)] = yd;
            cost_vars[(i + 1, 3)] = ydd;
        }

        cost_vars
    }

    fn plot_rollout<DB: DrawingBackend>(
        &self,
        cost_vars: &DMatrix<f64>,
        axes: &DrawingArea<DB, Shift>,
    ) {
        let mut positions: Series = Vec::with_capacity(cost_vars.nrows());
        let mut velocities: Series = Vec::with_capacity(cost_vars.nrows());
        for i in 0..cost_vars.nrows() {
            positions.push((cost_vars[(i, 0)], cost_vars[(i, 1)]));
            velocities.push((cost_vars[(i, 0)], cost_vars[(i, 2)]));
        }

        draw_trajectory(axes, "point mass", &[("y", &positions), ("yd", &velocities)]);
    }
}
