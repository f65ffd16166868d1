//! Goodness-of-fit objective for fitting a model to observed data.
//!
//! Only the objective lives here: [`fit_target`] turns a model, a data
//! set and a choice of parameters to vary into a function from a
//! parameter vector to a sum of squares. Minimising it is left to
//! whatever optimiser the caller prefers.

use crate::error::{BatchError, BatchResult};
use ps_core::{BoxedSolution, ParameterMap, Real, RunModel, TimeQuery};

/// Observed data for one modelled series.
#[derive(Debug, Clone, PartialEq)]
pub struct FitData {
    /// Observation times; increasing
    pub time: Vec<Real>,
    /// Observed values, one per time; `NaN` marks a missing value
    pub value: Vec<Real>,
}

/// Which parameters a fit may change.
#[derive(Debug, Clone, PartialEq)]
pub struct FitPars {
    /// Fixed values, and starting values for the varied parameters
    pub base: ParameterMap,
    /// Names of the varied parameters, in `theta` order
    pub vary: Vec<String>,
}

/// Objective value and the run that produced it.
pub struct FitResult {
    /// Full parameters of the run
    pub pars: ParameterMap,
    pub solution: BoxedSolution,
    pub t_start: Real,
    pub t_end: Real,
    /// Sum of squared differences against the data
    pub value: Real,
}

/// Write `theta[i]` over `vary[i]` in a copy of the base parameters.
pub fn update_pars(pars: &FitPars, theta: &[Real]) -> ParameterMap {
    let mut ret = pars.base.clone();
    for (name, value) in pars.vary.iter().zip(theta) {
        ret.insert(name.clone(), *value);
    }
    ret
}

/// Sum of squared differences, skipping missing (`NaN`) observations.
pub fn sum_of_squares(observed: &[Real], modelled: &[Real]) -> Real {
    observed
        .iter()
        .zip(modelled)
        .filter(|(x, _)| !x.is_nan())
        .map(|(x, y)| (x - y).powi(2))
        .sum()
}

/// Build the objective for fitting `modelled_series` to `data`.
///
/// Runs always start at time 0 and end at the last observation.
pub fn fit_target<'a, R: RunModel>(
    runner: &'a R,
    data: &'a FitData,
    pars: &'a FitPars,
    modelled_series: &'a str,
) -> BatchResult<impl Fn(&[Real]) -> BatchResult<FitResult> + 'a> {
    let t_start = 0.0;
    let (Some(&first), Some(&t_end)) = (data.time.first(), data.time.last()) else {
        return Err(BatchError::InvalidFitData);
    };
    if data.time.len() != data.value.len() {
        return Err(BatchError::InvalidFitData);
    }
    if first < t_start {
        return Err(BatchError::FitTimeBeforeStart { t_start });
    }
    let times = TimeQuery::Given(data.time.clone());

    Ok(move |theta: &[Real]| {
        let p = update_pars(pars, theta);
        let solution = runner
            .run(&p, t_start, t_end)
            .map_err(|e| BatchError::RunFailed {
                message: e.to_string(),
            })?;
        let output = solution.query(&times);
        let modelled = output
            .by_name(modelled_series)
            .ok_or_else(|| BatchError::SeriesNotFound {
                name: modelled_series.to_string(),
            })?;
        let value = sum_of_squares(&data.value, &modelled.y);
        Ok(FitResult {
            pars: p,
            solution,
            t_start,
            t_end,
            value,
        })
    })
}
