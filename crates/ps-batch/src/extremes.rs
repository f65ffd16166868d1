//! Per-trace minimum and maximum.

use ps_core::Real;
use std::fmt;
use std::str::FromStr;

/// Index of the smallest value; the first one on ties.
pub fn which_min(y: &[Real]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in y.iter().enumerate() {
        match best {
            Some(b) if !(v < y[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the largest value; the first one on ties.
pub fn which_max(y: &[Real]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in y.iter().enumerate() {
        match best {
            Some(b) if !(v > y[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// The four extreme kinds, one value of `T` each.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremes<T> {
    /// Time at which the minimum is reached
    pub t_min: T,
    /// Time at which the maximum is reached
    pub t_max: T,
    /// Minimum value
    pub y_min: T,
    /// Maximum value
    pub y_max: T,
}

impl<T> Extremes<T> {
    pub fn get(&self, kind: ExtremeKind) -> &T {
        match kind {
            ExtremeKind::TMin => &self.t_min,
            ExtremeKind::TMax => &self.t_max,
            ExtremeKind::YMin => &self.y_min,
            ExtremeKind::YMax => &self.y_max,
        }
    }
}

/// Which extreme to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremeKind {
    TMin,
    TMax,
    YMin,
    YMax,
}

impl ExtremeKind {
    pub const ALL: [ExtremeKind; 4] = [
        ExtremeKind::TMin,
        ExtremeKind::TMax,
        ExtremeKind::YMin,
        ExtremeKind::YMax,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExtremeKind::TMin => "tMin",
            ExtremeKind::TMax => "tMax",
            ExtremeKind::YMin => "yMin",
            ExtremeKind::YMax => "yMax",
        }
    }
}

impl fmt::Display for ExtremeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtremeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtremeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown extreme '{s}'; expected one of tMin, tMax, yMin, yMax"))
    }
}

/// Extremes of one trace `y` sampled at times `t`.
///
/// Returns `None` for an empty trace.
pub fn find_extremes(t: &[Real], y: &[Real]) -> Option<Extremes<Real>> {
    let i_min = which_min(y)?;
    let i_max = which_max(y)?;
    Some(Extremes {
        t_min: t[i_min],
        t_max: t[i_max],
        y_min: y[i_min],
        y_max: y[i_max],
    })
}
