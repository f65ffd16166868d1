//! Parameter maps and varying-parameter combinations.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use std::collections::BTreeMap;
use std::fmt;

/// A single user-supplied parameter value.
///
/// Tensors are stored flat with their dimensions alongside, first
/// dimension fastest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParValue {
    Scalar(Real),
    Vector(Vec<Real>),
    Tensor { data: Vec<Real>, dim: Vec<usize> },
}

impl ParValue {
    pub fn as_scalar(&self) -> Option<Real> {
        match self {
            ParValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Real> for ParValue {
    fn from(v: Real) -> Self {
        ParValue::Scalar(v)
    }
}

impl From<Vec<Real>> for ParValue {
    fn from(v: Vec<Real>) -> Self {
        ParValue::Vector(v)
    }
}

/// Named model parameters.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterMap(BTreeMap<String, ParValue>);

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a parameter that must be present and scalar.
    pub fn scalar(&self, name: &str) -> CoreResult<Real> {
        match self.0.get(name) {
            None => Err(CoreError::MissingParameter {
                name: name.to_string(),
            }),
            Some(value) => value.as_scalar().ok_or_else(|| CoreError::NotScalar {
                name: name.to_string(),
            }),
        }
    }

    /// Look up a scalar parameter, falling back on `default` when absent.
    pub fn scalar_or(&self, name: &str, default: Real) -> CoreResult<Real> {
        if self.contains(name) {
            self.scalar(name)
        } else {
            Ok(default)
        }
    }
}

impl<K: Into<String>, V: Into<ParValue>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One full assignment of values to every varying parameter.
///
/// Entries keep the order of the varying parameters they came
/// from, which is also the order they print in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Combination(Vec<(String, Real)>);

impl Combination {
    pub fn new(entries: Vec<(String, Real)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, name: &str) -> Option<Real> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> &[(String, Real)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Real)> for Combination {
    fn from_iter<I: IntoIterator<Item = (K, Real)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Combination {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Full parameters for one run: `base` with every entry of
/// `combination` written over it.
pub fn merge(base: &ParameterMap, combination: &Combination) -> ParameterMap {
    let mut ret = base.clone();
    for (name, value) in combination.entries() {
        ret.insert(name.clone(), *value);
    }
    ret
}
