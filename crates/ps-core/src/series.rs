//! Series sets: named traces sharing one domain axis.
//!
//! A single run produces a [`TemporalSeriesSet`] (domain = time). Batch
//! summaries produce a [`CrossRunSeriesSet`] (domain = the parameter
//! combination of each successful run).

use crate::grid::grid;
use crate::numeric::Real;
use crate::params::Combination;

/// A single named trace.
///
/// Several traces may share a `name`, in which case `description`
/// tells them apart (e.g. "Mean", "Min", "Max" for stochastic summaries
/// or "Deterministic" for the one-trace case).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSetValue {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    pub y: Vec<Real>,
}

impl SeriesSetValue {
    pub fn new(name: impl Into<String>, y: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            description: None,
            y,
        }
    }

    pub fn described(name: impl Into<String>, description: impl Into<String>, y: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            y,
        }
    }
}

/// A bundle of traces over a shared domain; every `values[i].y` has
/// the same length as `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesSet<X> {
    pub x: Vec<X>,
    pub values: Vec<SeriesSetValue>,
}

/// Output of one run, indexed by time.
pub type TemporalSeriesSet = SeriesSet<Real>;

/// Summary across runs, indexed by parameter combination.
pub type CrossRunSeriesSet = SeriesSet<Combination>;

impl<X> SeriesSet<X> {
    pub fn new(x: Vec<X>, values: Vec<SeriesSetValue>) -> Self {
        Self { x, values }
    }

    /// Find a trace by name and description.
    pub fn value(&self, name: &str, description: Option<&str>) -> Option<&SeriesSetValue> {
        self.values
            .iter()
            .find(|v| v.name == name && v.description.as_deref() == description)
    }

    /// First trace with the given name, whatever its description.
    pub fn by_name(&self, name: &str) -> Option<&SeriesSetValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Distinct trace names in first-appearance order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for v in &self.values {
            if !names.contains(&v.name.as_str()) {
                names.push(&v.name);
            }
        }
        names
    }
}

/// Which times to ask an interpolated solution for.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeQuery {
    /// `n_points` evenly spaced times, clamped into the solution's range.
    Grid {
        t_start: Real,
        t_end: Real,
        n_points: usize,
    },
    /// Exactly these times.
    Given(Vec<Real>),
}

impl TimeQuery {
    pub fn grid(t_start: Real, t_end: Real, n_points: usize) -> Self {
        Self::Grid {
            t_start,
            t_end,
            n_points,
        }
    }

    /// Single time point; infinities select the ends of the solution.
    pub fn at(t: Real) -> Self {
        Self::grid(t, t, 1)
    }

    /// Materialise the query for a solution spanning `[t_min, t_max]`.
    pub fn resolve(&self, t_min: Real, t_max: Real) -> Vec<Real> {
        match self {
            TimeQuery::Grid {
                t_start,
                t_end,
                n_points,
            } => grid(
                t_start.max(t_min).min(t_max),
                t_end.max(t_min).min(t_max),
                *n_points,
            ),
            TimeQuery::Given(times) => times.clone(),
        }
    }
}

/// A queryable, already-computed solution of one run.
pub trait InterpolatedSolution {
    fn query(&self, times: &TimeQuery) -> TemporalSeriesSet;
}

impl<F> InterpolatedSolution for F
where
    F: Fn(&TimeQuery) -> TemporalSeriesSet,
{
    fn query(&self, times: &TimeQuery) -> TemporalSeriesSet {
        self(times)
    }
}
