#[macro_use]
extern crate log;

use std::time::Instant;

use dialoguer::{theme::ColorfulTheme, Select};
use fn_approx::{FunctionApproximator, Lwr, MetaParams, WeightedTikhonov};
use nalgebra::DVector;
use plotters::prelude::*;
use rollout_plot::{plot, Series};
use task_solver::solvers::{LwrPolicySolver, PointMassSolver};
use task_solver::TaskSolver;

const N_BASIS_FUNCTIONS: usize = 5;

fn main() {
    pretty_env_logger::init();

    std::fs::create_dir_all("img").unwrap();

    let solvers = vec!["PointMass", "LwrPolicy"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select task solver")
        .items(&solvers)
        .default(0)
        .interact()
        .unwrap();
    match e {
        0 => {
            let solver = PointMassSolver {
                mass: 1.0,
                dt: 0.01,
                y0: 0.0,
                yd0: 0.0,
            };
            // accelerate for the first half, brake for the second
            let sample: DVector<f64> =
                DVector::from_fn(100, |i, _| if i < 50 { 1.0 } else { -1.0 });

            let t0 = Instant::now();
            let cost_vars = solver.perform_rollout(&sample);
            info!(
                "rollout produced {} steps in {}ms",
                cost_vars.nrows(),
                t0.elapsed().as_millis()
            );

            render(&solver, &cost_vars, "img/point_mass.png");
        }
        1 => {
            let solver = LwrPolicySolver::new(N_BASIS_FUNCTIONS, 0.7, 0.0, 1.0, 200);
            let sample: DVector<f64> = DVector::from_vec(vec![0.0, 0.5, 1.0, 0.5, 0.0]);

            let t0 = Instant::now();
            let cost_vars = solver.perform_rollout(&sample);
            info!(
                "rollout produced {} steps in {}ms",
                cost_vars.nrows(),
                t0.elapsed().as_millis()
            );

            render(&solver, &cost_vars, "img/lwr_policy.png");

            // the sample as seen by the policy: one offset per kernel
            let mut offsets: Series = Vec::with_capacity(N_BASIS_FUNCTIONS);
            for b in 0..N_BASIS_FUNCTIONS {
                offsets.push((solver.meta().centers[(b, 0)], sample[b]));
            }
            plot(&[("offsets", &offsets)], "kernel offsets", "img/lwr_offsets.png", (1024, 768));

            // fit a fresh approximator against the traced trajectory and
            // check how well it reproduces the rollout
            let meta = MetaParams::grid_1d(0.0, 1.0, N_BASIS_FUNCTIONS, 0.7, true);
            let regressor = WeightedTikhonov {
                regularization_coeff: 1e-6,
                epsilon: 0.0,
            };
            let mut lwr = Lwr::new(meta, regressor);
            let t0 = Instant::now();
            lwr.train(&cost_vars.columns(0, 1), &cost_vars.columns(1, 1));
            info!("training done in: {}ms", t0.elapsed().as_millis());

            let predictions = lwr.predict(&cost_vars.columns(0, 1)).unwrap();
            let mut rmse: f64 = 0.0;
            for i in 0..cost_vars.nrows() {
                rmse += (predictions[(i, 0)] - cost_vars[(i, 1)]).powi(2);
            }
            rmse = (rmse / cost_vars.nrows() as f64).sqrt();
            info!("refit rmse: {}", rmse);
        }
        _ => panic!("invalid task solver selection"),
    }
}

fn render<S: TaskSolver>(solver: &S, cost_vars: &S::CostVars, filename: &str) {
    let root_area = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();

    solver.plot_rollout(cost_vars, &root_area);
    root_area.present().unwrap();

    info!("rendered rollout to {}", filename);
}
