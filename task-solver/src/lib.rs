//! This crate provides the rollout interface of the library
//!
//! A `TaskSolver` evaluates a candidate sample against a task and hands back
//! whatever variables a caller needs to compute a cost from the rollout.

#![deny(unused_imports, unused_crate_dependencies)]
#![warn(missing_docs)]

mod solver_trait;

pub use solver_trait::TaskSolver;

#[cfg(feature = "solvers")]
pub mod solvers;
