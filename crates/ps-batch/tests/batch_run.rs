//! Batch runs against the built-in reference models.

use ps_batch::{
    BatchOptions, BatchPars, ExtremeKind, VaryingPar, batch_pars, batch_pars_range, batch_run,
};
use ps_core::{ParameterMap, RunModel, TimeQuery, grid};
use ps_sim::{DiscreteControl, Model, SolverControl, model_by_name};

fn builtin(name: &str, max_steps: usize) -> Model {
    let control = SolverControl {
        max_steps,
        ..SolverControl::default()
    };
    model_by_name(name, control, DiscreteControl::default()).unwrap()
}

fn oscillator_base() -> ParameterMap {
    ParameterMap::new()
        .with("scale", 1.0)
        .with("shiftScale", 1.0)
        .with("shift", 0.0)
}

fn approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-6)
}

#[test]
fn batch_solutions_match_single_runs() {
    let user = ParameterMap::new().with("a", 2.0);
    let varying = batch_pars_range(&user, "a", 5, false, 0.0, 4.0).unwrap();
    let pars = batch_pars(user.clone(), vec![varying]);
    let model = builtin("linear", 10_000);
    let res = batch_run(model.clone(), pars, 0.0, 10.0, BatchOptions::default(), true).unwrap();

    assert_eq!(res.solutions().len(), 5);
    let times = TimeQuery::grid(0.0, 10.0, 11);
    let central = model.run(&user, 0.0, 10.0).unwrap();
    let lower = model.run(&ParameterMap::new().with("a", 0.0), 0.0, 10.0).unwrap();
    let upper = model.run(&ParameterMap::new().with("a", 4.0), 0.0, 10.0).unwrap();
    assert_eq!(res.solutions()[2].query(&times), central.query(&times));
    assert_eq!(res.solutions()[0].query(&times), lower.query(&times));
    assert_eq!(res.solutions()[4].query(&times), upper.query(&times));
}

#[test]
fn catches_errors_in_fraction_of_runs() {
    let pars = batch_pars(
        oscillator_base(),
        vec![VaryingPar::new("scale", vec![0.01, 0.1, 1.0, 10.0, 100.0])],
    );
    let res = batch_run(builtin("oscillator", 100), pars, 0.0, 10.0, BatchOptions::default(), true)
        .unwrap();

    let errors = res.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].pars.get("scale"), Some(10.0));
    assert_eq!(errors[1].pars.get("scale"), Some(100.0));
    assert!(errors[0].error.as_deref().unwrap().contains("too many steps"));

    assert_eq!(res.solutions().len(), 3);
    assert_eq!(res.pars().varying[0].name, "scale");
    assert_eq!(res.pars().varying[0].values, vec![0.01, 0.1, 1.0, 10.0, 100.0]);

    let statuses = res.run_statuses();
    assert_eq!(statuses.len(), 5);
    for (status, (scale, success)) in statuses.iter().zip([
        (0.01, true),
        (0.1, true),
        (1.0, true),
        (10.0, false),
        (100.0, false),
    ]) {
        assert_eq!(status.pars.entries(), &[("scale".to_string(), scale)]);
        assert_eq!(status.success, success);
        assert_eq!(status.error.is_none(), success);
    }

    // summaries only cover the successful runs
    let x: Vec<f64> = res
        .value_at_time(10.0)
        .unwrap()
        .x
        .iter()
        .map(|c| c.get("scale").unwrap())
        .collect();
    assert_eq!(x, vec![0.01, 0.1, 1.0]);
}

#[test]
fn throws_if_all_runs_fail() {
    let pars = batch_pars(
        oscillator_base(),
        vec![VaryingPar::new("scale", vec![0.01, 0.1, 1.0, 10.0, 100.0])],
    );
    let err = batch_run(builtin("oscillator", 1), pars, 0.0, 10.0, BatchOptions::default(), true)
        .err()
        .unwrap();
    assert!(
        err.to_string()
            .starts_with("All solutions failed; first error: Integration failure: too many steps")
    );
}

#[test]
fn multiple_varying_parameters_in_nested_order() {
    let base = oscillator_base();
    let pars = batch_pars(
        base.clone(),
        vec![
            VaryingPar::new("shiftScale", vec![1.0, -1.0]),
            VaryingPar::new("shift", vec![0.0, 3.0, 5.0]),
        ],
    );
    let model = builtin("oscillator", 100);
    let res = batch_run(model.clone(), pars, 0.0, 10.0, BatchOptions::default(), true).unwrap();

    let combos: Vec<(f64, f64)> = res
        .successful_varying_params()
        .iter()
        .map(|c| (c.get("shiftScale").unwrap(), c.get("shift").unwrap()))
        .collect();
    assert_eq!(
        combos,
        vec![(1.0, 0.0), (1.0, 3.0), (1.0, 5.0), (-1.0, 0.0), (-1.0, 3.0), (-1.0, 5.0)]
    );
    assert_eq!(res.solutions().len(), 6);

    let times = TimeQuery::grid(0.0, 10.0, 11);
    for (i, combination) in res.successful_varying_params().iter().enumerate() {
        let single = model
            .run(&ps_core::merge(&base, combination), 0.0, 10.0)
            .unwrap();
        assert_eq!(res.solutions()[i].query(&times), single.query(&times));
    }

    let value = |i: usize| res.solutions()[i].query(&times).values[0].y[1];
    let base_value = value(0);
    assert!((value(1) - (base_value + 3.0)).abs() < 1e-3);
    assert!((value(2) - (base_value + 5.0)).abs() < 1e-3);
    assert!((value(3) - base_value).abs() < 1e-3);
    assert!((value(4) - (base_value - 3.0)).abs() < 1e-3);
    assert!((value(5) - (base_value - 5.0)).abs() < 1e-3);
}

#[test]
fn failing_combinations_are_excluded_in_order() {
    let pars = batch_pars(
        oscillator_base(),
        vec![
            VaryingPar::new("scale", vec![1.0, 1000.0]),
            VaryingPar::new("shift", vec![0.0, 3.0, 5.0]),
        ],
    );
    let res = batch_run(builtin("oscillator", 100), pars, 0.0, 10.0, BatchOptions::default(), true)
        .unwrap();

    let ok: Vec<String> = res
        .successful_varying_params()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        ok,
        vec!["{scale: 1, shift: 0}", "{scale: 1, shift: 3}", "{scale: 1, shift: 5}"]
    );
    let failed: Vec<String> = res.errors().iter().map(|s| s.pars.to_string()).collect();
    assert_eq!(
        failed,
        vec![
            "{scale: 1000, shift: 0}",
            "{scale: 1000, shift: 3}",
            "{scale: 1000, shift: 5}"
        ]
    );
    for status in res.errors() {
        assert!(
            status
                .error
                .as_deref()
                .unwrap()
                .contains("Integration failure: too many steps")
        );
    }
}

fn linear_sweep() -> BatchPars {
    let user = ParameterMap::new().with("a", 2.0);
    let varying = batch_pars_range(&user, "a", 5, false, 0.0, 4.0).unwrap();
    batch_pars(user, vec![varying])
}

#[test]
fn value_at_end_time() {
    let mut res = batch_run(
        builtin("linear", 10_000),
        linear_sweep(),
        0.0,
        10.0,
        BatchOptions::default(),
        true,
    )
    .unwrap();
    let v = res.value_at_time(10.0).unwrap();
    let a: Vec<f64> = v.x.iter().map(|c| c.get("a").unwrap()).collect();
    assert_eq!(a, grid(0.0, 4.0, 5));
    assert_eq!(v.values.len(), 1);
    assert_eq!(v.values[0].name, "x");
    assert!(approx_eq(&v.values[0].y, &[1.0, 11.0, 21.0, 31.0, 41.0]));

    let e = res.extreme(ExtremeKind::YMax).unwrap();
    assert!(approx_eq(&e.values[0].y, &[1.0, 11.0, 21.0, 31.0, 41.0]));
}

#[test]
fn value_at_time_for_multivariable_models() {
    let mut res = batch_run(
        builtin("output", 10_000),
        linear_sweep(),
        0.0,
        10.0,
        BatchOptions::default(),
        true,
    )
    .unwrap();
    let v = res.value_at_time(10.0).unwrap();
    assert_eq!(v.values.len(), 2);
    assert_eq!(v.values[0].name, "x");
    assert!(approx_eq(&v.values[0].y, &[1.0, 11.0, 21.0, 31.0, 41.0]));
    assert_eq!(v.values[1].name, "y");
    assert!(approx_eq(&v.values[1].y, &[2.0, 22.0, 42.0, 62.0, 82.0]));

    let e = res.extreme(ExtremeKind::YMax).unwrap();
    assert_eq!(e.x, v.x);
    assert_eq!(e.values.len(), 2);
    assert_eq!(e.values[0].name, "x");
    assert_eq!(e.values[1].name, "y");
    assert!(approx_eq(&e.values[0].y, &[1.0, 11.0, 21.0, 31.0, 41.0]));
    assert!(approx_eq(&e.values[1].y, &[2.0, 22.0, 42.0, 62.0, 82.0]));
}
