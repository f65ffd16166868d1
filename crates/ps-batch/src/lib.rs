//! ps-batch: sensitivity sweeps over a single-run model.
//!
//! Contains:
//! - varying (varying-parameter definitions and range/displace helpers)
//! - combinations (odometer over the Cartesian product of values)
//! - batch (run scheduler with per-run failure isolation)
//! - align (reconciling differently described traces across runs)
//! - extremes (first-occurrence minimum and maximum)
//! - summary (value-at-time and extremes across runs)
//! - fit (sum-of-squares objective for fitting to data)

pub mod align;
pub mod batch;
pub mod combinations;
pub mod error;
pub mod extremes;
pub mod fit;
pub mod summary;
pub mod varying;

pub use align::{AlignedTrace, Levels, align_runs, description_levels, reconcile};
pub use batch::{Batch, BatchOptions, RunStatus, batch_run};
pub use combinations::{Combinations, expand_varying_params};
pub use error::{BatchError, BatchResult};
pub use extremes::{ExtremeKind, Extremes, find_extremes, which_max, which_min};
pub use fit::{FitData, FitPars, FitResult, fit_target, sum_of_squares, update_pars};
pub use summary::{compute_extremes_result, value_at_time_result};
pub use varying::{BatchPars, VaryingPar, batch_pars, batch_pars_displace, batch_pars_range};
