//! Built-in models, looked up by name.
//!
//! | name          | shape      | parameters (default)                        |
//! |---------------|------------|---------------------------------------------|
//! | `linear`      | continuous | `a`                                         |
//! | `output`      | continuous | `a`; reports `y = 2x`                       |
//! | `logistic`    | continuous | `r`, `K`, `n0` (1)                          |
//! | `oscillator`  | continuous | `scale`, `shiftScale`, `shift`              |
//! | `birth_death` | discrete   | `n0` (100), `birth` (0.1), `death` (0.1)    |

use crate::discrete::DiscreteControl;
use crate::error::{SimError, SimResult};
use crate::model::{DiscreteModel, OdeModel};
use crate::runner::Model;
use crate::sim::SolverControl;
use nalgebra::DVector;
use ps_core::ParameterMap;
use rand::distr::Distribution;
use rand::rngs::StdRng;

/// Names accepted by [`model_by_name`].
pub const MODEL_NAMES: [&str; 5] = ["linear", "output", "logistic", "oscillator", "birth_death"];

/// Look up a built-in model and attach the given controls.
pub fn model_by_name(
    name: &str,
    solver: SolverControl,
    discrete: DiscreteControl,
) -> SimResult<Model> {
    let model = match name {
        "linear" => Model::continuous(|pars| {
            Ok(Box::new(Linear::from_pars(pars, false)?) as Box<dyn OdeModel>)
        }),
        "output" => Model::continuous(|pars| {
            Ok(Box::new(Linear::from_pars(pars, true)?) as Box<dyn OdeModel>)
        }),
        "logistic" => Model::continuous(|pars| {
            Ok(Box::new(Logistic::from_pars(pars)?) as Box<dyn OdeModel>)
        }),
        "oscillator" => Model::continuous(|pars| {
            Ok(Box::new(Oscillator::from_pars(pars)?) as Box<dyn OdeModel>)
        }),
        "birth_death" => Model::discrete(|pars| {
            Ok(Box::new(BirthDeath::from_pars(pars)?) as Box<dyn DiscreteModel>)
        }),
        _ => {
            return Err(SimError::UnknownModel {
                name: name.to_string(),
            });
        }
    };
    Ok(model
        .with_solver_control(solver)
        .with_discrete_control(discrete))
}

/// dx/dt = a, x(0) = 1; optionally reports y = 2x.
#[derive(Clone, Debug)]
pub struct Linear {
    pub a: f64,
    pub with_output: bool,
}

impl Linear {
    pub fn from_pars(pars: &ParameterMap, with_output: bool) -> SimResult<Self> {
        Ok(Self {
            a: pars.scalar("a")?,
            with_output,
        })
    }
}

impl OdeModel for Linear {
    fn names(&self) -> Vec<String> {
        vec!["x".to_string()]
    }

    fn initial(&self, _t: f64) -> DVector<f64> {
        DVector::from_element(1, 1.0)
    }

    fn rhs(&self, _t: f64, _y: &DVector<f64>) -> SimResult<DVector<f64>> {
        Ok(DVector::from_element(1, self.a))
    }

    fn output_names(&self) -> Vec<String> {
        if self.with_output {
            vec!["y".to_string()]
        } else {
            Vec::new()
        }
    }

    fn output(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
        if self.with_output {
            y * 2.0
        } else {
            DVector::zeros(0)
        }
    }
}

/// dn/dt = r n (1 - n / K)
#[derive(Clone, Debug)]
pub struct Logistic {
    pub r: f64,
    pub k: f64,
    pub n0: f64,
}

impl Logistic {
    pub fn from_pars(pars: &ParameterMap) -> SimResult<Self> {
        let k = pars.scalar("K")?;
        if k == 0.0 {
            return Err(SimError::InvalidArg {
                what: "carrying capacity K must be non-zero",
            });
        }
        Ok(Self {
            r: pars.scalar("r")?,
            k,
            n0: pars.scalar_or("n0", 1.0)?,
        })
    }
}

impl OdeModel for Logistic {
    fn names(&self) -> Vec<String> {
        vec!["N".to_string()]
    }

    fn initial(&self, _t: f64) -> DVector<f64> {
        DVector::from_element(1, self.n0)
    }

    fn rhs(&self, _t: f64, y: &DVector<f64>) -> SimResult<DVector<f64>> {
        let n = y[0];
        Ok(DVector::from_element(1, self.r * n * (1.0 - n / self.k)))
    }
}

/// x(0) = shiftScale * shift, dx/dt = scale * cos(scale * t).
///
/// Large `scale` values make the solver take many short steps, which
/// is a convenient way to provoke step-budget failures.
#[derive(Clone, Debug)]
pub struct Oscillator {
    pub scale: f64,
    pub shift_scale: f64,
    pub shift: f64,
}

impl Oscillator {
    pub fn from_pars(pars: &ParameterMap) -> SimResult<Self> {
        Ok(Self {
            scale: pars.scalar("scale")?,
            shift_scale: pars.scalar("shiftScale")?,
            shift: pars.scalar("shift")?,
        })
    }
}

impl OdeModel for Oscillator {
    fn names(&self) -> Vec<String> {
        vec!["x".to_string()]
    }

    fn initial(&self, _t: f64) -> DVector<f64> {
        DVector::from_element(1, self.shift_scale * self.shift)
    }

    fn rhs(&self, t: f64, _y: &DVector<f64>) -> SimResult<DVector<f64>> {
        Ok(DVector::from_element(
            1,
            self.scale * (self.scale * t).cos(),
        ))
    }
}

/// Population with binomial births and deaths each step.
#[derive(Clone, Debug)]
pub struct BirthDeath {
    pub n0: f64,
    pub birth: f64,
    pub death: f64,
}

impl BirthDeath {
    pub fn from_pars(pars: &ParameterMap) -> SimResult<Self> {
        let birth = pars.scalar_or("birth", 0.1)?;
        let death = pars.scalar_or("death", 0.1)?;
        if !(0.0..=1.0).contains(&birth) || !(0.0..=1.0).contains(&death) {
            return Err(SimError::InvalidArg {
                what: "birth and death probabilities must lie in [0, 1]",
            });
        }
        let n0 = pars.scalar_or("n0", 100.0)?;
        if !(n0 >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "initial population must be non-negative",
            });
        }
        Ok(Self { n0, birth, death })
    }
}

fn binomial(rng: &mut StdRng, n: f64, p: f64) -> SimResult<f64> {
    let dist = rand_distr::Binomial::new(n as u64, p).map_err(|e| SimError::Backend {
        message: e.to_string(),
    })?;
    Ok(dist.sample(rng) as f64)
}

impl DiscreteModel for BirthDeath {
    fn names(&self) -> Vec<String> {
        vec!["N".to_string()]
    }

    fn initial(&self, _step: usize) -> Vec<f64> {
        vec![self.n0.round()]
    }

    fn update(&self, _step: usize, state: &[f64], rng: Option<&mut StdRng>) -> SimResult<Vec<f64>> {
        let n = state[0];
        let next = match rng {
            Some(rng) => {
                let births = binomial(rng, n, self.birth)?;
                let deaths = binomial(rng, n, self.death)?;
                n + births - deaths
            }
            None => n * (1.0 + self.birth - self.death),
        };
        Ok(vec![next])
    }
}
