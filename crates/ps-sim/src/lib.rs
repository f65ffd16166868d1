//! Reference model layer for paramsweep batches.
//!
//! Provides:
//! - Adaptive RK4 / Forward Euler integration of ODE models
//! - Dense (cubic Hermite) solutions queryable at any time
//! - Particle-based runner for discrete stochastic models
//! - A `Model` adapter implementing the single-run contract
//! - A small catalog of built-in models

pub mod catalog;
pub mod discrete;
pub mod error;
pub mod integrator;
pub mod model;
pub mod runner;
pub mod sim;
pub mod solution;

// Re-exports for public API
pub use catalog::{MODEL_NAMES, model_by_name};
pub use discrete::{DiscreteControl, SummarySolution, run_discrete};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{DiscreteModel, OdeModel};
pub use runner::{DiscreteBuilder, Model, OdeBuilder};
pub use sim::{IntegratorType, SimRecord, SolverControl, integrate};
pub use solution::DenseSolution;
