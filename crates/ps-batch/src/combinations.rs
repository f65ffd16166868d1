//! Cartesian product of varying-parameter values.
//!
//! Combinations are enumerated by an odometer: one index per varying
//! parameter, the last one turning fastest and carrying into the one
//! before it. The first varying parameter is therefore the outermost
//! loop, and downstream code relies on exactly this order when zipping
//! combinations against run statuses and solutions.

use crate::error::{BatchError, BatchResult};
use crate::varying::VaryingPar;
use ps_core::Combination;

/// Iterator over every combination of a list of varying parameters.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    varying: &'a [VaryingPar],
    index: Vec<usize>,
    remaining: usize,
}

impl<'a> Combinations<'a> {
    pub fn new(varying: &'a [VaryingPar]) -> BatchResult<Self> {
        if varying.is_empty() {
            return Err(BatchError::NoVaryingParameters);
        }
        if let Some(empty) = varying.iter().find(|v| v.values.is_empty()) {
            return Err(BatchError::EmptyVaryingParameter {
                name: empty.name.clone(),
            });
        }
        Ok(Self {
            varying,
            index: vec![0; varying.len()],
            remaining: varying.iter().map(|v| v.values.len()).product(),
        })
    }

    fn current(&self) -> Combination {
        self.varying
            .iter()
            .zip(&self.index)
            .map(|(v, &i)| (v.name.as_str(), v.values[i]))
            .collect()
    }

    fn advance(&mut self) {
        for (slot, v) in self.index.iter_mut().zip(self.varying).rev() {
            *slot += 1;
            if *slot < v.values.len() {
                return;
            }
            *slot = 0;
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        if self.remaining == 0 {
            return None;
        }
        let combination = self.current();
        self.remaining -= 1;
        self.advance();
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

/// All combinations of `varying`, first parameter outermost.
pub fn expand_varying_params(varying: &[VaryingPar]) -> BatchResult<Vec<Combination>> {
    Ok(Combinations::new(varying)?.collect())
}
