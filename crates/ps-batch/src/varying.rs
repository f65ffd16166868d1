//! Varying-parameter definitions and the helpers that build them.

use crate::error::{BatchError, BatchResult};
use ps_core::{GridSpacing, ParameterMap, Real};

/// A named parameter together with the values it takes in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct VaryingPar {
    pub name: String,
    pub values: Vec<Real>,
}

impl VaryingPar {
    pub fn new(name: impl Into<String>, values: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Base parameters plus the parameters to vary over them.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPars {
    pub base: ParameterMap,
    pub varying: Vec<VaryingPar>,
}

impl BatchPars {
    /// Number of runs the batch will attempt.
    pub fn n_combinations(&self) -> usize {
        self.varying.iter().map(|v| v.values.len()).product()
    }
}

/// Bundle base parameters with varying parameters; no validation happens
/// here, it is deferred until the combinations are expanded.
pub fn batch_pars(base: ParameterMap, varying: Vec<VaryingPar>) -> BatchPars {
    BatchPars { base, varying }
}

/// `count` values of `name` spanning `[min, max]`.
///
/// The current value of `name` in `base` must be a number lying
/// within the range.
pub fn batch_pars_range(
    base: &ParameterMap,
    name: &str,
    count: usize,
    logarithmic: bool,
    min: Real,
    max: Real,
) -> BatchResult<VaryingPar> {
    let value = base.scalar(name)?;
    if !value.is_finite() {
        return Err(BatchError::NonFiniteValue {
            name: name.to_string(),
        });
    }
    if !(min <= value) {
        return Err(BatchError::LowerBoundTooHigh { value });
    }
    if !(value <= max) {
        return Err(BatchError::UpperBoundTooLow { value });
    }
    if !(min < max) {
        return Err(BatchError::EmptyRange);
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(BatchError::NonFiniteBounds {
            name: name.to_string(),
        });
    }
    if count < 2 {
        return Err(BatchError::TooFewTraces);
    }
    if logarithmic && min <= 0.0 {
        return Err(BatchError::NonPositiveLogBound);
    }
    let values = GridSpacing::from_logarithmic(logarithmic).points(min, max, count)?;
    Ok(VaryingPar::new(name, values))
}

/// `count` values of `name` from `percent`% below to `percent`% above
/// its current value.
pub fn batch_pars_displace(
    base: &ParameterMap,
    name: &str,
    count: usize,
    logarithmic: bool,
    percent: Real,
) -> BatchResult<VaryingPar> {
    let value = base.scalar(name)?;
    let delta = percent / 100.0;
    let min = value * (1.0 - delta);
    let max = value * (1.0 + delta);
    batch_pars_range(base, name, count, logarithmic, min, max)
}
