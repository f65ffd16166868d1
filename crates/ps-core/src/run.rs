//! The single-run contract between a model and the batch layer.

use crate::numeric::Real;
use crate::params::ParameterMap;
use crate::series::InterpolatedSolution;
use std::fmt::Display;

/// Boxed solution returned by a successful run.
pub type BoxedSolution = Box<dyn InterpolatedSolution>;

/// Something that can be run once for a full parameter set.
///
/// Failures are reported through `Self::Error`; callers only rely on
/// its display text.
pub trait RunModel {
    type Error: Display;

    fn run(&self, pars: &ParameterMap, t_start: Real, t_end: Real)
    -> Result<BoxedSolution, Self::Error>;
}

impl<F, E> RunModel for F
where
    F: Fn(&ParameterMap, Real, Real) -> Result<BoxedSolution, E>,
    E: Display,
{
    type Error = E;

    fn run(&self, pars: &ParameterMap, t_start: Real, t_end: Real) -> Result<BoxedSolution, E> {
        self(pars, t_start, t_end)
    }
}
