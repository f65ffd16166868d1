//! Batch scheduling: one model run per parameter combination.
//!
//! A batch starts out running with every combination pending. Each call
//! to [`Batch::compute`] runs exactly one combination; a failed run is
//! recorded as a failed [`RunStatus`] and never aborts the batch. Once
//! the queue is empty the batch is complete and stays complete.
//!
//! Extremes are only cached in the complete state. While running, more
//! solutions may still arrive, so they are recomputed on every request.

use crate::combinations::expand_varying_params;
use crate::error::{BatchError, BatchResult};
use crate::extremes::{ExtremeKind, Extremes};
use crate::summary::{compute_extremes_result, value_at_time_result};
use crate::varying::BatchPars;
use ps_core::{
    BoxedSolution, Combination, CrossRunSeriesSet, Real, RunModel, TemporalSeriesSet, TimeQuery,
    merge,
};
use std::borrow::Cow;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Tuning options for a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOptions {
    /// Number of points each solution is resampled on to find extremes
    pub n_points_extremes: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            n_points_extremes: 501,
        }
    }
}

/// Outcome of one attempted run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStatus {
    pub pars: Combination,
    pub success: bool,
    /// Error text of a failed run
    pub error: Option<String>,
}

impl RunStatus {
    fn succeeded(pars: Combination) -> Self {
        Self {
            pars,
            success: true,
            error: None,
        }
    }

    fn failed(pars: Combination, error: String) -> Self {
        Self {
            pars,
            success: false,
            error: Some(error),
        }
    }
}

enum State {
    Running {
        pending: VecDeque<Combination>,
    },
    Complete {
        extremes: Option<Extremes<CrossRunSeriesSet>>,
    },
}

/// A sweep of model runs over every combination of the varying
/// parameters.
pub struct Batch<R: RunModel> {
    runner: R,
    pars: BatchPars,
    t_start: Real,
    t_end: Real,
    options: BatchOptions,
    solutions: Vec<BoxedSolution>,
    run_statuses: Vec<RunStatus>,
    state: State,
}

impl<R: RunModel> Batch<R> {
    /// Set up a batch without running anything.
    pub fn new(
        runner: R,
        pars: BatchPars,
        t_start: Real,
        t_end: Real,
        options: BatchOptions,
    ) -> BatchResult<Self> {
        if !(t_end > t_start) {
            return Err(BatchError::InvalidTimeRange { t_start, t_end });
        }
        let pending: VecDeque<Combination> = expand_varying_params(&pars.varying)?.into();
        debug!(runs = pending.len(), t_start, t_end, "batch created");
        Ok(Self {
            runner,
            pars,
            t_start,
            t_end,
            options,
            solutions: Vec::new(),
            run_statuses: Vec::new(),
            state: State::Running { pending },
        })
    }

    /// Run the next pending combination, if any.
    ///
    /// Returns whether the batch is now complete. Once complete, fails
    /// if no run at all succeeded.
    pub fn compute(&mut self) -> BatchResult<bool> {
        let next = match &mut self.state {
            State::Running { pending } => pending.pop_front(),
            State::Complete { .. } => None,
        };
        if let Some(combination) = next {
            self.attempt(combination);
        }

        if matches!(&self.state, State::Running { pending } if pending.is_empty()) {
            self.state = State::Complete { extremes: None };
            info!(
                runs = self.run_statuses.len(),
                succeeded = self.solutions.len(),
                "batch complete"
            );
        }

        if self.is_complete() && self.solutions.is_empty() {
            let first_error = self
                .run_statuses
                .iter()
                .find_map(|s| s.error.clone())
                .unwrap_or_default();
            return Err(BatchError::AllRunsFailed { first_error });
        }
        Ok(self.is_complete())
    }

    /// Run every remaining combination.
    pub fn run(&mut self) -> BatchResult<()> {
        while !self.compute()? {}
        Ok(())
    }

    fn attempt(&mut self, combination: Combination) {
        let pars = merge(&self.pars.base, &combination);
        debug!(pars = %combination, "running combination");
        match self.runner.run(&pars, self.t_start, self.t_end) {
            Ok(solution) => {
                self.solutions.push(solution);
                self.run_statuses.push(RunStatus::succeeded(combination));
            }
            Err(e) => {
                let message = e.to_string();
                warn!(pars = %combination, error = %message, "run failed");
                self.run_statuses
                    .push(RunStatus::failed(combination, message));
            }
        }
    }

    pub fn pars(&self) -> &BatchPars {
        &self.pars
    }

    pub fn t_start(&self) -> Real {
        self.t_start
    }

    pub fn t_end(&self) -> Real {
        self.t_end
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Solutions of the successful runs, in attempt order.
    pub fn solutions(&self) -> &[BoxedSolution] {
        &self.solutions
    }

    /// One status per attempted run, in attempt order.
    pub fn run_statuses(&self) -> &[RunStatus] {
        &self.run_statuses
    }

    /// Statuses of the failed runs.
    pub fn errors(&self) -> Vec<&RunStatus> {
        self.run_statuses.iter().filter(|s| !s.success).collect()
    }

    /// Combinations of the successful runs; the x axis of every summary.
    pub fn successful_varying_params(&self) -> Vec<Combination> {
        successful(&self.run_statuses)
    }

    /// Number of combinations not yet attempted.
    pub fn pending(&self) -> usize {
        match &self.state {
            State::Running { pending } => pending.len(),
            State::Complete { .. } => 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, State::Complete { .. })
    }

    /// Value of every trace of every successful run at `time`.
    ///
    /// Infinite times select the start or end of the solutions.
    pub fn value_at_time(&self, time: Real) -> BatchResult<CrossRunSeriesSet> {
        let query = TimeQuery::at(time);
        let runs: Vec<TemporalSeriesSet> = self.solutions.iter().map(|s| s.query(&query)).collect();
        value_at_time_result(self.successful_varying_params(), &runs)
    }

    /// All four extremes across the successful runs.
    pub fn extremes(&mut self) -> BatchResult<Cow<'_, Extremes<CrossRunSeriesSet>>> {
        let grid = TimeQuery::grid(self.t_start, self.t_end, self.options.n_points_extremes);
        match &mut self.state {
            State::Complete { extremes } => {
                let computed = match extremes.take() {
                    Some(cached) => cached,
                    None => summarise_extremes(&self.solutions, &self.run_statuses, &grid)?,
                };
                Ok(Cow::Borrowed(extremes.insert(computed)))
            }
            State::Running { .. } => Ok(Cow::Owned(summarise_extremes(
                &self.solutions,
                &self.run_statuses,
                &grid,
            )?)),
        }
    }

    /// One kind of extreme across the successful runs.
    pub fn extreme(&mut self, kind: ExtremeKind) -> BatchResult<CrossRunSeriesSet> {
        Ok(self.extremes()?.get(kind).clone())
    }

    /// Whether extremes are currently cached.
    pub fn has_cached_extremes(&self) -> bool {
        matches!(self.state, State::Complete { extremes: Some(_) })
    }
}

fn successful(statuses: &[RunStatus]) -> Vec<Combination> {
    statuses
        .iter()
        .filter(|s| s.success)
        .map(|s| s.pars.clone())
        .collect()
}

fn summarise_extremes(
    solutions: &[BoxedSolution],
    statuses: &[RunStatus],
    grid: &TimeQuery,
) -> BatchResult<Extremes<CrossRunSeriesSet>> {
    let runs: Vec<TemporalSeriesSet> = solutions.iter().map(|s| s.query(grid)).collect();
    compute_extremes_result(successful(statuses), &runs)
}

/// Create a batch and, if `immediate`, run it to completion.
pub fn batch_run<R: RunModel>(
    runner: R,
    pars: BatchPars,
    t_start: Real,
    t_end: Real,
    options: BatchOptions,
    immediate: bool,
) -> BatchResult<Batch<R>> {
    let mut batch = Batch::new(runner, pars, t_start, t_end, options)?;
    if immediate {
        batch.run()?;
    }
    Ok(batch)
}
