//! Model traits for the two supported model shapes.

use crate::error::SimResult;
use nalgebra::DVector;
use rand::rngs::StdRng;

/// A continuous-time model: dy/dt = f(t, y).
///
/// Models are built once per run from a full parameter set, so all
/// parameter lookups happen at construction.
pub trait OdeModel {
    /// Names of the state variables, in state order.
    fn names(&self) -> Vec<String>;

    /// Initial state at `t`.
    fn initial(&self, t: f64) -> DVector<f64>;

    /// State derivative dy/dt = f(t, y).
    fn rhs(&self, t: f64, y: &DVector<f64>) -> SimResult<DVector<f64>>;

    /// Names of derived output variables, reported after the states.
    fn output_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Derived outputs at (t, y); same length as [`OdeModel::output_names`].
    fn output(&self, _t: f64, _y: &DVector<f64>) -> DVector<f64> {
        DVector::zeros(0)
    }
}

/// A discrete-time model advanced one step at a time.
///
/// `rng` is `None` when running deterministically, in which case
/// models should replace random draws with their expectations.
pub trait DiscreteModel {
    fn names(&self) -> Vec<String>;

    fn initial(&self, step: usize) -> Vec<f64>;

    fn update(&self, step: usize, state: &[f64], rng: Option<&mut StdRng>) -> SimResult<Vec<f64>>;
}
