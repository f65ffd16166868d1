//! Evenly spaced point generation.
//!
//! Used to build the value sequences of varying parameters and the time
//! grids that solutions are resampled on.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use std::fmt;

/// Spacing of a generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Uniformly spaced in log space
    Logarithmic,
}

impl GridSpacing {
    pub fn from_logarithmic(logarithmic: bool) -> Self {
        if logarithmic {
            Self::Logarithmic
        } else {
            Self::Linear
        }
    }

    /// Generate `n` points from `a` to `b` with this spacing.
    pub fn points(self, a: Real, b: Real, n: usize) -> CoreResult<Vec<Real>> {
        match self {
            Self::Linear => Ok(grid(a, b, n)),
            Self::Logarithmic => grid_log(a, b, n),
        }
    }
}

impl fmt::Display for GridSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// `n` values evenly spaced from `a` to `b` inclusive.
///
/// The last point is always exactly `b` rather than the result of
/// accumulating the step, so a single point grid is `[b]`.
pub fn grid(a: Real, b: Real, n: usize) -> Vec<Real> {
    if n == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(n);
    if n > 1 {
        let delta = (b - a) / (n - 1) as Real;
        points.extend((0..n - 1).map(|i| a + i as Real * delta));
    }
    points.push(b);
    points
}

/// `n` values evenly spaced on a log scale from `a` to `b` inclusive.
///
/// Both bounds must be strictly positive.
pub fn grid_log(a: Real, b: Real, n: usize) -> CoreResult<Vec<Real>> {
    if !(a > 0.0 && b > 0.0) {
        return Err(CoreError::InvalidArg {
            what: "logarithmic grid bounds must be positive",
        });
    }
    let mut points: Vec<Real> = grid(a.ln(), b.ln(), n).into_iter().map(Real::exp).collect();

    // Ensure exact endpoints
    if let Some(first) = points.first_mut() {
        if n > 1 {
            *first = a;
        }
    }
    if let Some(last) = points.last_mut() {
        *last = b;
    }
    Ok(points)
}
