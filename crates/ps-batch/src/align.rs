//! Alignment of per-run traces before cross-run extraction.
//!
//! Runs of the same model do not always report the same number of
//! traces per variable. A deterministic run reports one trace
//! (described `Deterministic`) while a stochastic run reports one per
//! summary statistic (`Mean`, `Min`, ...). Before values can be zipped
//! across runs, every run must expose the same traces in the same
//! order:
//!
//! - if every run has exactly one trace for a variable, traces pass
//!   through unchanged, but all runs must agree on its description
//! - otherwise every multi-trace run must carry the same labels in the
//!   same order, and single-trace runs are replicated once per label

use crate::error::{BatchError, BatchResult};
use ps_core::{Real, SeriesSetValue, TemporalSeriesSet};

/// Canonical description levels for one variable across runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Levels {
    /// Every run has one trace with this (possibly absent) description.
    Single(Option<String>),
    /// At least one run has several traces, labelled in this order.
    Labeled(Vec<String>),
}

/// One variable/description pair, with the matching trace of every run.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTrace<'a> {
    pub name: String,
    pub description: Option<String>,
    /// `y[i]` comes from run `i`
    pub y: Vec<&'a [Real]>,
}

fn render_single(description: Option<&str>) -> String {
    description.unwrap_or("<none>").to_string()
}

fn render_labels(labels: &[&str]) -> String {
    format!("[{}]", labels.join(", "))
}

/// Work out the canonical levels for one variable.
///
/// `groups[i]` holds the traces of run `i` for the variable.
pub fn description_levels(groups: &[Vec<&SeriesSetValue>]) -> BatchResult<Levels> {
    let mut single: Option<Option<&str>> = None;
    let mut labeled: Option<Vec<&str>> = None;

    for group in groups {
        if let [value] = group.as_slice() {
            let description = value.description.as_deref();
            match single {
                None => single = Some(description),
                Some(have) if have != description => {
                    return Err(BatchError::InconsistentDescriptions {
                        have: render_single(have),
                        given: render_single(description),
                    });
                }
                Some(_) => {}
            }
        } else {
            let labels = group
                .iter()
                .map(|v| v.description.as_deref())
                .collect::<Option<Vec<&str>>>()
                .ok_or(BatchError::UndefinedDescription)?;
            match &labeled {
                None => labeled = Some(labels),
                Some(have) if *have != labels => {
                    return Err(BatchError::InconsistentDescriptions {
                        have: render_labels(have),
                        given: render_labels(&labels),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(match labeled {
        Some(labels) => Levels::Labeled(labels.into_iter().map(str::to_string).collect()),
        None => Levels::Single(single.flatten().map(str::to_string)),
    })
}

/// Align the traces of one variable, returning one entry per canonical
/// description with the corresponding trace of every run.
pub fn reconcile<'a>(
    groups: &[Vec<&'a SeriesSetValue>],
) -> BatchResult<Vec<(Option<String>, Vec<&'a [Real]>)>> {
    match description_levels(groups)? {
        Levels::Single(description) => {
            let y = groups.iter().map(|g| g[0].y.as_slice()).collect();
            Ok(vec![(description, y)])
        }
        Levels::Labeled(labels) => Ok(labels
            .into_iter()
            .enumerate()
            .map(|(j, label)| {
                let y = groups
                    .iter()
                    .map(|g| match g.as_slice() {
                        [only] => only.y.as_slice(),
                        many => many[j].y.as_slice(),
                    })
                    .collect();
                (Some(label), y)
            })
            .collect()),
    }
}

/// Align every variable of a set of runs.
///
/// Variables are visited in the order they first appear in run 0, and
/// every run must report the same variables.
pub fn align_runs(runs: &[TemporalSeriesSet]) -> BatchResult<Vec<AlignedTrace<'_>>> {
    let Some(first) = runs.first() else {
        return Ok(Vec::new());
    };
    let names = first.names();
    for run in &runs[1..] {
        let given = run.names();
        if given != names {
            return Err(BatchError::InconsistentSeries {
                have: render_labels(&names),
                given: render_labels(&given),
            });
        }
    }

    let mut aligned = Vec::new();
    for name in names {
        let groups: Vec<Vec<&SeriesSetValue>> = runs
            .iter()
            .map(|run| run.values.iter().filter(|v| v.name == name).collect())
            .collect();
        for (description, y) in reconcile(&groups)? {
            aligned.push(AlignedTrace {
                name: name.to_string(),
                description,
                y,
            });
        }
    }
    Ok(aligned)
}
