//! Discrete-time (usually stochastic) model runs.
//!
//! A discrete run advances a number of independent particles from
//! `t_start` to `t_end` in steps of `dt`. Unlike the continuous case the
//! trajectory cannot be interpolated, so queries snap to the nearest
//! step. Output is summarised per variable:
//!
//! - deterministic runs give one trace described as `Deterministic`
//! - stochastic runs give `Mean`, `Min` and `Max` across particles

use crate::error::{SimError, SimResult};
use crate::model::DiscreteModel;
use ps_core::{InterpolatedSolution, SeriesSet, SeriesSetValue, TemporalSeriesSet, TimeQuery};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const DESCRIPTION_DETERMINISTIC: &str = "Deterministic";
pub const DESCRIPTION_MEAN: &str = "Mean";
pub const DESCRIPTION_MIN: &str = "Min";
pub const DESCRIPTION_MAX: &str = "Max";

/// Options for discrete runs.
#[derive(Clone, Debug)]
pub struct DiscreteControl {
    /// Number of independent particles
    pub n_particles: usize,
    /// Time represented by a single step
    pub dt: f64,
    /// Seed for the particle random number generators
    pub seed: u64,
    /// Run one particle with expectations in place of random draws
    pub deterministic: bool,
}

impl Default for DiscreteControl {
    fn default() -> Self {
        Self {
            n_particles: 10,
            dt: 1.0,
            seed: 42,
            deterministic: false,
        }
    }
}

/// Particle trajectories of one discrete run.
pub struct SummarySolution {
    names: Vec<String>,
    t_start: f64,
    dt: f64,
    deterministic: bool,
    /// `state[step][particle][variable]`
    state: Vec<Vec<Vec<f64>>>,
}

impl SummarySolution {
    pub fn n_steps(&self) -> usize {
        self.state.len()
    }

    pub fn t_end(&self) -> f64 {
        self.t_start + self.dt * self.state.len().saturating_sub(1) as f64
    }

    fn step_index(&self, t: f64) -> usize {
        let last = self.state.len().saturating_sub(1);
        let raw = ((t - self.t_start) / self.dt).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }
}

impl InterpolatedSolution for SummarySolution {
    fn query(&self, times: &TimeQuery) -> TemporalSeriesSet {
        let t = times.resolve(self.t_start, self.t_end());
        let steps: Vec<usize> = t.iter().map(|&ti| self.step_index(ti)).collect();

        let mut values = Vec::new();
        for (idx, name) in self.names.iter().enumerate() {
            if self.deterministic {
                values.push(SeriesSetValue::described(
                    name.as_str(),
                    DESCRIPTION_DETERMINISTIC,
                    summarise(&self.state, &steps, |p| p[0][idx]),
                ));
            } else {
                values.push(SeriesSetValue::described(
                    name.as_str(),
                    DESCRIPTION_MEAN,
                    summarise(&self.state, &steps, |p| {
                        p.iter().map(|x| x[idx]).sum::<f64>() / p.len() as f64
                    }),
                ));
                values.push(SeriesSetValue::described(
                    name.as_str(),
                    DESCRIPTION_MIN,
                    summarise(&self.state, &steps, |p| {
                        p.iter().map(|x| x[idx]).fold(f64::INFINITY, f64::min)
                    }),
                ));
                values.push(SeriesSetValue::described(
                    name.as_str(),
                    DESCRIPTION_MAX,
                    summarise(&self.state, &steps, |p| {
                        p.iter().map(|x| x[idx]).fold(f64::NEG_INFINITY, f64::max)
                    }),
                ));
            }
        }
        SeriesSet::new(t, values)
    }
}

fn summarise(
    state: &[Vec<Vec<f64>>],
    steps: &[usize],
    f: impl Fn(&[Vec<f64>]) -> f64,
) -> Vec<f64> {
    steps.iter().map(|&s| f(&state[s])).collect()
}

/// Run a discrete model from `t_start` to `t_end` inclusive.
pub fn run_discrete<M: DiscreteModel + ?Sized>(
    model: &M,
    t_start: f64,
    t_end: f64,
    control: &DiscreteControl,
) -> SimResult<SummarySolution> {
    if !(t_end > t_start) {
        return Err(SimError::InvalidArg {
            what: "t_end must be greater than t_start",
        });
    }
    if !(control.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if control.n_particles == 0 && !control.deterministic {
        return Err(SimError::InvalidArg {
            what: "n_particles must be positive",
        });
    }

    let n_steps = ((t_end - t_start) / control.dt).ceil() as usize;
    let n_particles = if control.deterministic {
        1
    } else {
        control.n_particles
    };

    let mut rngs: Vec<StdRng> = (0..n_particles as u64)
        .map(|i| StdRng::seed_from_u64(control.seed.wrapping_add(i)))
        .collect();

    let mut current: Vec<Vec<f64>> = (0..n_particles).map(|_| model.initial(0)).collect();
    let mut state = Vec::with_capacity(n_steps + 1);
    state.push(current.clone());

    for step in 0..n_steps {
        let mut next = Vec::with_capacity(n_particles);
        for (particle, rng) in current.iter().zip(rngs.iter_mut()) {
            let rng = if control.deterministic { None } else { Some(rng) };
            next.push(model.update(step, particle, rng)?);
        }
        current = next;
        state.push(current.clone());
    }

    Ok(SummarySolution {
        names: model.names(),
        t_start,
        dt: control.dt,
        deterministic: control.deterministic,
        state,
    })
}
