use plotters::{coord::Shift, prelude::*};

/// Interface for types that can perform rollouts
///
/// A rollout evaluates one candidate sample against a task and determines
/// all the variables that are relevant to computing the cost of that
/// candidate. What a sample or a cost variable concretely looks like is
/// entirely up to the implementor; this trait imposes no structure on
/// either, and no constraints on side effects. A solver may run a
/// simulation, drive hardware, or just crunch numbers.
pub trait TaskSolver {
    /// A candidate parameter or policy value to be evaluated
    type Sample;
    /// The variables a rollout produced that are relevant to computing a cost
    type CostVars;

    /// Perform a rollout of the given sample
    fn perform_rollout(&self, sample: &Self::Sample) -> Self::CostVars;

    /// Visualize the result of a rollout on the given drawing area
    ///
    /// Visualization is optional; the default implementation draws nothing.
    fn plot_rollout<DB: DrawingBackend>(
        &self,
        cost_vars: &Self::CostVars,
        axes: &DrawingArea<DB, Shift>,
    ) {
        let _ = (cost_vars, axes);
    }
}
