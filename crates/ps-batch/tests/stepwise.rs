//! Step-wise execution and mixed deterministic/stochastic sweeps.

use ps_batch::{
    Batch, BatchError, BatchOptions, ExtremeKind, VaryingPar, batch_pars, batch_run,
};
use ps_core::{BoxedSolution, ParameterMap, Real, SeriesSet, SeriesSetValue, TimeQuery};
use ps_sim::{DiscreteControl, SolverControl, model_by_name};

fn sweep() -> ps_batch::BatchPars {
    batch_pars(
        ParameterMap::new().with("a", 2.0),
        vec![
            VaryingPar::new("a", vec![0.0, 1.0, 2.0]),
            VaryingPar::new("b", vec![-1.0, 1.0]),
        ],
    )
}

/// x(t) = a + b t, reported as a deterministic trace when `a == 0` and
/// as Mean/Min summaries otherwise.
fn mixed(pars: &ParameterMap, t0: Real, t1: Real) -> Result<BoxedSolution, String> {
    let a = pars.scalar("a").map_err(|e| e.to_string())?;
    let b = pars.scalar("b").map_err(|e| e.to_string())?;
    Ok(Box::new(move |q: &TimeQuery| {
        let x = q.resolve(t0, t1);
        let y: Vec<Real> = x.iter().map(|t| a + b * t).collect();
        let values = if a == 0.0 {
            vec![SeriesSetValue::described("x", "Deterministic", y)]
        } else {
            let lower = y.iter().map(|v| v - 0.5).collect();
            vec![
                SeriesSetValue::described("x", "Mean", y),
                SeriesSetValue::described("x", "Min", lower),
            ]
        };
        SeriesSet::new(x, values)
    }))
}

#[test]
fn stepwise_matches_run_to_completion() {
    let mut eager = batch_run(mixed, sweep(), 0.0, 4.0, BatchOptions::default(), true).unwrap();
    let mut lazy = batch_run(mixed, sweep(), 0.0, 4.0, BatchOptions::default(), false).unwrap();

    let mut calls = 0;
    while !lazy.compute().unwrap() {
        calls += 1;
    }
    assert_eq!(calls, 5);

    assert_eq!(eager.run_statuses(), lazy.run_statuses());
    let q = TimeQuery::grid(0.0, 4.0, 9);
    for (a, b) in eager.solutions().iter().zip(lazy.solutions()) {
        assert_eq!(a.query(&q), b.query(&q));
    }
    assert_eq!(eager.value_at_time(2.0).unwrap(), lazy.value_at_time(2.0).unwrap());
    for kind in ExtremeKind::ALL {
        assert_eq!(eager.extreme(kind).unwrap(), lazy.extreme(kind).unwrap());
    }
}

#[test]
fn deterministic_runs_are_broadcast_across_summaries() {
    let mut batch = batch_run(mixed, sweep(), 0.0, 4.0, BatchOptions::default(), true).unwrap();

    let v = batch.value_at_time(Real::INFINITY).unwrap();
    let labels: Vec<Option<&str>> = v.values.iter().map(|s| s.description.as_deref()).collect();
    assert_eq!(labels, vec![Some("Mean"), Some("Min")]);
    // a = 0 runs are deterministic: same value under both labels
    assert_eq!(v.values[0].y, vec![-4.0, 4.0, -3.0, 5.0, -2.0, 6.0]);
    assert_eq!(v.values[1].y, vec![-4.0, 4.0, -3.5, 4.5, -2.5, 5.5]);

    let t_max = batch.extreme(ExtremeKind::TMax).unwrap();
    assert_eq!(t_max.values[0].y, vec![0.0, 4.0, 0.0, 4.0, 0.0, 4.0]);
}

#[test]
fn stopping_early_leaves_a_readable_batch() {
    let mut batch = Batch::new(mixed, sweep(), 0.0, 4.0, BatchOptions::default()).unwrap();
    batch.compute().unwrap();
    batch.compute().unwrap();
    assert_eq!(batch.pending(), 4);
    assert!(!batch.is_complete());
    assert_eq!(batch.successful_varying_params().len(), 2);
    let y = batch.extreme(ExtremeKind::YMax).unwrap();
    assert_eq!(y.x.len(), 2);
}

#[test]
fn continuous_and_discrete_models_share_the_batch() {
    let control = DiscreteControl {
        deterministic: true,
        ..DiscreteControl::default()
    };
    let model = model_by_name("birth_death", SolverControl::default(), control).unwrap();
    let pars = batch_pars(
        ParameterMap::new().with("birth", 0.2).with("death", 0.1),
        vec![VaryingPar::new("birth", vec![0.1, 0.2])],
    );
    let batch = batch_run(model, pars, 0.0, 2.0, BatchOptions::default(), true).unwrap();
    let v = batch.value_at_time(2.0).unwrap();
    assert_eq!(v.values[0].description.as_deref(), Some("Deterministic"));
    assert!((v.values[0].y[0] - 100.0).abs() < 1e-9);
    assert!((v.values[0].y[1] - 121.0).abs() < 1e-9);
}

#[test]
fn inconsistent_descriptions_fail_summaries() {
    let labelled = |pars: &ParameterMap, t0: Real, t1: Real| -> Result<BoxedSolution, String> {
        let a = pars.scalar("a").map_err(|e| e.to_string())?;
        Ok(Box::new(move |q: &TimeQuery| {
            let x = q.resolve(t0, t1);
            let y = vec![a; x.len()];
            let (first, second) = if a > 0.5 { ("Min", "Mean") } else { ("Mean", "Min") };
            SeriesSet::new(
                x,
                vec![
                    SeriesSetValue::described("x", first, y.clone()),
                    SeriesSetValue::described("x", second, y),
                ],
            )
        }))
    };
    let pars = batch_pars(
        ParameterMap::new().with("a", 0.0),
        vec![VaryingPar::new("a", vec![0.0, 1.0])],
    );
    let batch = batch_run(labelled, pars, 0.0, 1.0, BatchOptions::default(), true).unwrap();
    let err = batch.value_at_time(1.0).unwrap_err();
    assert_eq!(
        err,
        BatchError::InconsistentDescriptions {
            have: "[Mean, Min]".to_string(),
            given: "[Min, Mean]".to_string(),
        }
    );
}
