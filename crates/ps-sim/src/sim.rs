//! Adaptive integration of an [`OdeModel`] and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::OdeModel;
use nalgebra::DVector;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Control parameters for a single integration.
#[derive(Clone, Debug)]
pub struct SolverControl {
    /// First trial step; defaults to 1% of the integration span
    pub initial_step: Option<f64>,
    /// Absolute error tolerance per state
    pub atol: f64,
    /// Relative error tolerance per state
    pub rtol: f64,
    /// Maximum number of attempted steps (safety limit)
    pub max_steps: usize,
    /// Smallest step accepted before giving up
    pub min_step: f64,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SolverControl {
    fn default() -> Self {
        Self {
            initial_step: None,
            atol: 1e-6,
            rtol: 1e-6,
            max_steps: 10_000,
            min_step: 1e-12,
            integrator: IntegratorType::default(),
        }
    }
}

/// Accepted points of an integration, with the derivative at each.
#[derive(Clone, Debug)]
pub struct SimRecord {
    /// Time points
    pub t: Vec<f64>,
    /// State at each time point
    pub y: Vec<DVector<f64>>,
    /// dy/dt at each time point
    pub dydt: Vec<DVector<f64>>,
    /// Number of attempted steps, rejected ones included
    pub steps: usize,
}

/// Integrate `model` from `t_start` to `t_end`.
///
/// Step size is controlled by step doubling: each step is taken once
/// at full size and once as two halves, the difference estimates the
/// local error and the extrapolated value is kept.
pub fn integrate<M: OdeModel + ?Sized>(
    model: &M,
    t_start: f64,
    t_end: f64,
    control: &SolverControl,
) -> SimResult<SimRecord> {
    match control.integrator {
        IntegratorType::RK4 => integrate_with(&RK4, model, t_start, t_end, control),
        IntegratorType::ForwardEuler => {
            integrate_with(&ForwardEuler, model, t_start, t_end, control)
        }
    }
}

fn integrate_with<I: Integrator, M: OdeModel + ?Sized>(
    integrator: &I,
    model: &M,
    t_start: f64,
    t_end: f64,
    control: &SolverControl,
) -> SimResult<SimRecord> {
    if !(t_end > t_start) {
        return Err(SimError::InvalidArg {
            what: "t_end must be greater than t_start",
        });
    }
    if control.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if !(control.atol > 0.0 && control.rtol >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "tolerances must be positive",
        });
    }

    let span = t_end - t_start;
    let mut h = control.initial_step.unwrap_or(0.01 * span).min(span);
    if !(h > 0.0) {
        return Err(SimError::InvalidArg {
            what: "initial_step must be positive",
        });
    }

    // Richardson denominator 2^p - 1
    let richardson = f64::from(2_u32.pow(integrator.order()) - 1);

    let mut t = t_start;
    let mut y = model.initial(t_start);
    let mut k = model.rhs(t, &y)?;

    let mut record = SimRecord {
        t: vec![t],
        y: vec![y.clone()],
        dydt: vec![k.clone()],
        steps: 0,
    };

    while t < t_end {
        if record.steps >= control.max_steps {
            return Err(SimError::TooManySteps {
                max_steps: control.max_steps,
                t,
            });
        }
        record.steps += 1;

        let last = t + h >= t_end;
        let dt = if last { t_end - t } else { h };

        let full = integrator.step(model, t, &y, &k, dt)?;
        let half = integrator.step(model, t, &y, &k, 0.5 * dt)?;
        let k_half = model.rhs(t + 0.5 * dt, &half)?;
        let double = integrator.step(model, t + 0.5 * dt, &half, &k_half, 0.5 * dt)?;

        let err = scaled_error(&full, &double, control) / richardson;
        if !err.is_finite() {
            return Err(SimError::NonFinite { t });
        }

        if err <= 1.0 || dt <= control.min_step {
            let y_new = &double + (&double - &full) / richardson;
            t = if last { t_end } else { t + dt };
            let k_new = model.rhs(t, &y_new)?;
            if y_new.iter().any(|v| !v.is_finite()) {
                return Err(SimError::NonFinite { t });
            }
            y = y_new;
            k = k_new;
            record.t.push(t);
            record.y.push(y.clone());
            record.dydt.push(k.clone());
        }

        let order = f64::from(integrator.order() + 1);
        let factor = if err == 0.0 {
            5.0
        } else {
            (0.9 * err.powf(-1.0 / order)).clamp(0.2, 5.0)
        };
        h = dt * factor;
        if h < control.min_step && t < t_end {
            return Err(SimError::StepSizeTooSmall { t });
        }
    }

    tracing::trace!(steps = record.steps, points = record.t.len(), "integration finished");
    Ok(record)
}

fn scaled_error(a: &DVector<f64>, b: &DVector<f64>, control: &SolverControl) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let scale = control.atol + control.rtol * x.abs().max(y.abs());
            (x - y).abs() / scale
        })
        .fold(0.0, f64::max)
}
