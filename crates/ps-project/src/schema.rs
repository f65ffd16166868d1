//! Sweep configuration schema.

use ps_core::ParameterMap;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub version: u32,
    pub name: String,
    /// Catalog name of the model to run
    pub model: String,
    #[serde(default)]
    pub base: ParameterMap,
    #[serde(default)]
    pub varying: Vec<VaryingDef>,
    pub time: TimeDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default)]
    pub discrete: DiscreteDef,
    #[serde(default)]
    pub output: OutputDef,
}

/// How the values of one varying parameter are chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum VaryingDef {
    /// Explicit list of values
    Values { name: String, values: Vec<f64> },
    /// `count` values spanning `[min, max]`
    Range {
        name: String,
        count: usize,
        min: f64,
        max: f64,
        #[serde(default)]
        logarithmic: bool,
    },
    /// `count` values within `percent`% of the base value
    Displace {
        name: String,
        count: usize,
        percent: f64,
        #[serde(default)]
        logarithmic: bool,
    },
}

impl VaryingDef {
    pub fn name(&self) -> &str {
        match self {
            VaryingDef::Values { name, .. }
            | VaryingDef::Range { name, .. }
            | VaryingDef::Displace { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    #[serde(default)]
    pub t_start: f64,
    pub t_end: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum IntegratorDef {
    #[default]
    RK4,
    ForwardEuler,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub integrator: IntegratorDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_step: Option<f64>,
    pub atol: f64,
    pub rtol: f64,
    pub max_steps: usize,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            integrator: IntegratorDef::default(),
            initial_step: None,
            atol: 1e-6,
            rtol: 1e-6,
            max_steps: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscreteDef {
    pub n_particles: usize,
    pub dt: f64,
    pub seed: u64,
    pub deterministic: bool,
}

impl Default for DiscreteDef {
    fn default() -> Self {
        Self {
            n_particles: 10,
            dt: 1.0,
            seed: 42,
            deterministic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputDef {
    /// Resampling resolution used when searching for extremes
    pub n_points_extremes: usize,
    pub format: OutputFormat,
    /// Report values at this time instead of the end time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_at: Option<f64>,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            n_points_extremes: 501,
            format: OutputFormat::default(),
            value_at: None,
        }
    }
}
