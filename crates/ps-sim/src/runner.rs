//! Uniform single-run entry point over both model shapes.

use crate::discrete::{DiscreteControl, run_discrete};
use crate::error::{SimError, SimResult};
use crate::model::{DiscreteModel, OdeModel};
use crate::sim::{SolverControl, integrate};
use crate::solution::DenseSolution;
use ps_core::{BoxedSolution, ParameterMap, Real, RunModel};
use std::fmt;
use std::sync::Arc;

/// Builds a continuous model from a full parameter set.
pub type OdeBuilder = Arc<dyn Fn(&ParameterMap) -> SimResult<Box<dyn OdeModel>> + Send + Sync>;

/// Builds a discrete model from a full parameter set.
pub type DiscreteBuilder =
    Arc<dyn Fn(&ParameterMap) -> SimResult<Box<dyn DiscreteModel>> + Send + Sync>;

/// A runnable model together with its run controls.
#[derive(Clone)]
pub enum Model {
    Continuous {
        build: OdeBuilder,
        control: SolverControl,
    },
    Discrete {
        build: DiscreteBuilder,
        control: DiscreteControl,
    },
}

impl Model {
    pub fn continuous<F>(build: F) -> Self
    where
        F: Fn(&ParameterMap) -> SimResult<Box<dyn OdeModel>> + Send + Sync + 'static,
    {
        Model::Continuous {
            build: Arc::new(build),
            control: SolverControl::default(),
        }
    }

    pub fn discrete<F>(build: F) -> Self
    where
        F: Fn(&ParameterMap) -> SimResult<Box<dyn DiscreteModel>> + Send + Sync + 'static,
    {
        Model::Discrete {
            build: Arc::new(build),
            control: DiscreteControl::default(),
        }
    }

    /// Replace the solver control; ignored by discrete models.
    pub fn with_solver_control(mut self, new: SolverControl) -> Self {
        if let Model::Continuous { control, .. } = &mut self {
            *control = new;
        }
        self
    }

    /// Replace the discrete control; ignored by continuous models.
    pub fn with_discrete_control(mut self, new: DiscreteControl) -> Self {
        if let Model::Discrete { control, .. } = &mut self {
            *control = new;
        }
        self
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Model::Discrete { .. })
    }

    /// Run once, keeping the concrete solution type.
    pub fn run_continuous(
        &self,
        pars: &ParameterMap,
        t_start: Real,
        t_end: Real,
    ) -> SimResult<DenseSolution> {
        match self {
            Model::Continuous { build, control } => {
                let model = build(pars)?;
                let record = integrate(model.as_ref(), t_start, t_end, control)?;
                Ok(DenseSolution::new(model, record))
            }
            Model::Discrete { .. } => Err(SimError::InvalidArg {
                what: "model is not continuous",
            }),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Continuous { control, .. } => f
                .debug_struct("Continuous")
                .field("control", control)
                .finish_non_exhaustive(),
            Model::Discrete { control, .. } => f
                .debug_struct("Discrete")
                .field("control", control)
                .finish_non_exhaustive(),
        }
    }
}

impl RunModel for Model {
    type Error = SimError;

    fn run(&self, pars: &ParameterMap, t_start: Real, t_end: Real) -> SimResult<BoxedSolution> {
        match self {
            Model::Continuous { .. } => Ok(Box::new(self.run_continuous(pars, t_start, t_end)?)),
            Model::Discrete { build, control } => {
                let model = build(pars)?;
                let solution = run_discrete(model.as_ref(), t_start, t_end, control)?;
                Ok(Box::new(solution))
            }
        }
    }
}
