//! Cross-run summaries built from aligned traces.

use crate::align::align_runs;
use crate::error::BatchResult;
use crate::extremes::{Extremes, find_extremes};
use ps_core::{Combination, CrossRunSeriesSet, Real, SeriesSet, SeriesSetValue, TemporalSeriesSet};

/// Collect the first value of every trace of every run.
///
/// `runs[i]` is the output of the run with parameters `x[i]`, usually
/// queried at a single time.
pub fn value_at_time_result(
    x: Vec<Combination>,
    runs: &[TemporalSeriesSet],
) -> BatchResult<CrossRunSeriesSet> {
    let values = align_runs(runs)?
        .into_iter()
        .map(|trace| SeriesSetValue {
            name: trace.name,
            description: trace.description,
            y: trace
                .y
                .iter()
                .map(|y| y.first().copied().unwrap_or(Real::NAN))
                .collect(),
        })
        .collect();
    Ok(SeriesSet::new(x, values))
}

/// Extremes of every trace of every run.
///
/// Empty traces contribute `NaN` to every kind.
pub fn compute_extremes_result(
    x: Vec<Combination>,
    runs: &[TemporalSeriesSet],
) -> BatchResult<Extremes<CrossRunSeriesSet>> {
    let mut t_min = Vec::new();
    let mut t_max = Vec::new();
    let mut y_min = Vec::new();
    let mut y_max = Vec::new();

    for trace in align_runs(runs)? {
        let per_run: Vec<Extremes<Real>> = trace
            .y
            .iter()
            .zip(runs)
            .map(|(y, run)| {
                find_extremes(&run.x, y).unwrap_or(Extremes {
                    t_min: Real::NAN,
                    t_max: Real::NAN,
                    y_min: Real::NAN,
                    y_max: Real::NAN,
                })
            })
            .collect();
        let column = |f: fn(&Extremes<Real>) -> Real| SeriesSetValue {
            name: trace.name.clone(),
            description: trace.description.clone(),
            y: per_run.iter().map(f).collect(),
        };
        t_min.push(column(|e| e.t_min));
        t_max.push(column(|e| e.t_max));
        y_min.push(column(|e| e.y_min));
        y_max.push(column(|e| e.y_max));
    }

    Ok(Extremes {
        t_min: SeriesSet::new(x.clone(), t_min),
        t_max: SeriesSet::new(x.clone(), t_max),
        y_min: SeriesSet::new(x.clone(), y_min),
        y_max: SeriesSet::new(x, y_max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Vec<Combination> {
        (0..3).map(|i| [("a", i as Real)].into_iter().collect()).collect()
    }

    fn times() -> Vec<Real> {
        vec![0.0, 1.0, 2.0, 3.0, 4.0]
    }

    fn single(value: Real, description: Option<&str>) -> TemporalSeriesSet {
        let v = match description {
            Some(d) => SeriesSetValue::described("a", d, vec![value]),
            None => SeriesSetValue::new("a", vec![value]),
        };
        SeriesSet::new(times(), vec![v])
    }

    #[test]
    fn value_at_time_simple_output() {
        let runs = [single(4.0, None), single(5.0, None), single(6.0, None)];
        let res = value_at_time_result(x(), &runs).unwrap();
        assert_eq!(res.x, x());
        assert_eq!(res.values, vec![SeriesSetValue::new("a", vec![4.0, 5.0, 6.0])]);
    }

    #[test]
    fn value_at_time_keeps_descriptions() {
        let runs = [
            single(4.0, Some("Mean")),
            single(5.0, Some("Mean")),
            single(6.0, Some("Mean")),
        ];
        let res = value_at_time_result(x(), &runs).unwrap();
        assert_eq!(
            res.values,
            vec![SeriesSetValue::described("a", "Mean", vec![4.0, 5.0, 6.0])]
        );
    }

    #[test]
    fn value_at_time_multiple_summaries() {
        let summaries = |y: Real| {
            SeriesSet::new(
                times(),
                vec![
                    SeriesSetValue::described("a", "Mean", vec![y]),
                    SeriesSetValue::described("a", "Min", vec![y - 0.5]),
                    SeriesSetValue::described("a", "Max", vec![y + 0.5]),
                ],
            )
        };
        let runs = [summaries(4.0), summaries(5.0), summaries(6.0)];
        let res = value_at_time_result(x(), &runs).unwrap();
        assert_eq!(
            res.values,
            vec![
                SeriesSetValue::described("a", "Mean", vec![4.0, 5.0, 6.0]),
                SeriesSetValue::described("a", "Min", vec![3.5, 4.5, 5.5]),
                SeriesSetValue::described("a", "Max", vec![4.5, 5.5, 6.5]),
            ]
        );
    }

    #[test]
    fn value_at_time_broadcasts_deterministic_runs() {
        let summaries = |y: Real| {
            SeriesSet::new(
                times(),
                vec![
                    SeriesSetValue::described("a", "Mean", vec![y]),
                    SeriesSetValue::described("a", "Min", vec![y - 0.1]),
                ],
            )
        };
        let runs = [single(4.0, Some("Deterministic")), summaries(5.0), summaries(6.0)];
        let res = value_at_time_result(x(), &runs).unwrap();
        assert_eq!(res.values.len(), 2);
        assert_eq!(
            res.values[0],
            SeriesSetValue::described("a", "Mean", vec![4.0, 5.0, 6.0])
        );
        assert_eq!(
            res.values[1],
            SeriesSetValue::described("a", "Min", vec![4.0, 4.9, 5.9])
        );
    }

    fn trace(name: &str, description: Option<&str>, y: Vec<Real>) -> SeriesSetValue {
        match description {
            Some(d) => SeriesSetValue::described(name, d, y),
            None => SeriesSetValue::new(name, y),
        }
    }

    fn shifted(offset: Real) -> Vec<Real> {
        times().iter().map(|t| t + offset).collect()
    }

    #[test]
    fn extremes_simple_output() {
        let runs: Vec<TemporalSeriesSet> = (0..3)
            .map(|i| SeriesSet::new(times(), vec![trace("a", None, shifted(i as Real))]))
            .collect();
        let e = compute_extremes_result(x(), &runs).unwrap();
        assert_eq!(e.y_max.values, vec![SeriesSetValue::new("a", vec![4.0, 5.0, 6.0])]);
        assert_eq!(e.y_min.values[0].y, vec![0.0, 1.0, 2.0]);
        assert_eq!(e.t_max.values[0].y, vec![4.0, 4.0, 4.0]);
        assert_eq!(e.t_min.values[0].y, vec![0.0, 0.0, 0.0]);
        assert_eq!(e.t_min.x, x());
    }

    #[test]
    fn extremes_multiple_summaries() {
        let runs: Vec<TemporalSeriesSet> = (0..3)
            .map(|i| {
                let y = shifted(i as Real);
                SeriesSet::new(
                    times(),
                    vec![
                        trace("a", Some("Mean"), y.clone()),
                        trace("a", Some("Min"), y.iter().map(|v| v - 0.5).collect()),
                        trace("a", Some("Max"), y.iter().map(|v| v + 0.5).collect()),
                    ],
                )
            })
            .collect();
        let e = compute_extremes_result(x(), &runs).unwrap();
        assert_eq!(e.y_max.x, x());
        assert_eq!(
            e.y_max.values,
            vec![
                SeriesSetValue::described("a", "Mean", vec![4.0, 5.0, 6.0]),
                SeriesSetValue::described("a", "Min", vec![3.5, 4.5, 5.5]),
                SeriesSetValue::described("a", "Max", vec![4.5, 5.5, 6.5]),
            ]
        );
    }

    #[test]
    fn extremes_with_multiple_series_and_deterministic_run() {
        let stochastic = |offset: Real| {
            let y = shifted(offset);
            SeriesSet::new(
                times(),
                vec![
                    trace("a", Some("Mean"), y.clone()),
                    trace("a", Some("Min"), y.iter().map(|v| v - 0.1).collect()),
                    trace("b", Some("Mean"), y.iter().map(|v| v * 3.0).collect()),
                    trace("b", Some("Min"), y.iter().map(|v| v * 2.0).collect()),
                ],
            )
        };
        let deterministic = SeriesSet::new(
            times(),
            vec![
                trace("a", Some("Deterministic"), shifted(0.0)),
                trace("b", Some("Deterministic"), vec![0.0, 3.0, 6.0, 9.0, 12.0]),
            ],
        );
        let runs = [deterministic, stochastic(1.0), stochastic(2.0)];
        let e = compute_extremes_result(x(), &runs).unwrap();
        assert_eq!(e.y_max.values.len(), 4);
        assert_eq!(
            e.y_max.values,
            vec![
                SeriesSetValue::described("a", "Mean", vec![4.0, 5.0, 6.0]),
                SeriesSetValue::described("a", "Min", vec![4.0, 4.9, 5.9]),
                SeriesSetValue::described("b", "Mean", vec![12.0, 15.0, 18.0]),
                SeriesSetValue::described("b", "Min", vec![12.0, 10.0, 12.0]),
            ]
        );
    }

    #[test]
    fn zero_runs_give_empty_sets() {
        let e = compute_extremes_result(Vec::new(), &[]).unwrap();
        assert!(e.y_max.x.is_empty());
        assert!(e.y_max.values.is_empty());
        let v = value_at_time_result(Vec::new(), &[]).unwrap();
        assert!(v.values.is_empty());
    }
}
