//! Single-step time integrators.

use crate::error::SimResult;
use crate::model::OdeModel;
use nalgebra::DVector;

/// Trait for one-step integrators.
pub trait Integrator {
    /// Order of accuracy, used for step-doubling error estimates.
    fn order(&self) -> u32;

    /// Advance `y` from `t` by `dt`, given `k1 = rhs(t, y)`.
    fn step<M: OdeModel + ?Sized>(
        &self,
        model: &M,
        t: f64,
        y: &DVector<f64>,
        k1: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn order(&self) -> u32 {
        4
    }

    fn step<M: OdeModel + ?Sized>(
        &self,
        model: &M,
        t: f64,
        y: &DVector<f64>,
        k1: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let y2 = y + k1 * (0.5 * dt);
        let k2 = model.rhs(t + 0.5 * dt, &y2)?;

        let y3 = y + &k2 * (0.5 * dt);
        let k3 = model.rhs(t + 0.5 * dt, &y3)?;

        let y4 = y + &k3 * dt;
        let k4 = model.rhs(t + dt, &y4)?;

        // y_new = y + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1 + k2 * 2.0 + k3 * 2.0 + k4;
        Ok(y + k_sum * (dt / 6.0))
    }
}

/// Forward Euler (explicit, 1st order, fast for testing).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn order(&self) -> u32 {
        1
    }

    fn step<M: OdeModel + ?Sized>(
        &self,
        _model: &M,
        _t: f64,
        y: &DVector<f64>,
        k1: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        Ok(y + k1 * dt)
    }
}
