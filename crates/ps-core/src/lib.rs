//! ps-core: shared foundation for paramsweep.
//!
//! Contains:
//! - numeric (the Real alias)
//! - grid (linear and logarithmic point generation)
//! - params (parameter maps and varying-parameter combinations)
//! - series (series sets, time queries, interpolated solutions)
//! - run (the single-run contract consumed by the batch layer)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod params;
pub mod run;
pub mod series;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use grid::{GridSpacing, grid, grid_log};
pub use numeric::*;
pub use params::{Combination, ParValue, ParameterMap, merge};
pub use run::{BoxedSolution, RunModel};
pub use series::{
    CrossRunSeriesSet, InterpolatedSolution, SeriesSet, SeriesSetValue, TemporalSeriesSet,
    TimeQuery,
};
