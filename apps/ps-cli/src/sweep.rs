//! Turning a sweep configuration into a runnable batch.

use ps_batch::{
    BatchOptions, BatchPars, BatchResult, VaryingPar, batch_pars, batch_pars_displace,
    batch_pars_range,
};
use ps_project::{DiscreteDef, IntegratorDef, SolverDef, SweepConfig, VaryingDef};
use ps_sim::{DiscreteControl, IntegratorType, Model, SimResult, SolverControl, model_by_name};

pub fn solver_control(def: &SolverDef) -> SolverControl {
    SolverControl {
        initial_step: def.initial_step,
        atol: def.atol,
        rtol: def.rtol,
        max_steps: def.max_steps,
        integrator: match def.integrator {
            IntegratorDef::RK4 => IntegratorType::RK4,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        },
        ..SolverControl::default()
    }
}

pub fn discrete_control(def: &DiscreteDef) -> DiscreteControl {
    DiscreteControl {
        n_particles: def.n_particles,
        dt: def.dt,
        seed: def.seed,
        deterministic: def.deterministic,
    }
}

pub fn build_model(config: &SweepConfig) -> SimResult<Model> {
    model_by_name(
        &config.model,
        solver_control(&config.solver),
        discrete_control(&config.discrete),
    )
}

/// Resolve every varying definition against the base parameters.
pub fn build_pars(config: &SweepConfig) -> BatchResult<BatchPars> {
    let base = &config.base;
    let varying = config
        .varying
        .iter()
        .map(|def| match def {
            VaryingDef::Values { name, values } => Ok(VaryingPar::new(name, values.clone())),
            VaryingDef::Range {
                name,
                count,
                min,
                max,
                logarithmic,
            } => batch_pars_range(base, name, *count, *logarithmic, *min, *max),
            VaryingDef::Displace {
                name,
                count,
                percent,
                logarithmic,
            } => batch_pars_displace(base, name, *count, *logarithmic, *percent),
        })
        .collect::<BatchResult<Vec<_>>>()?;
    Ok(batch_pars(base.clone(), varying))
}

pub fn batch_options(config: &SweepConfig) -> BatchOptions {
    BatchOptions {
        n_points_extremes: config.output.n_points_extremes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_core::ParameterMap;
    use ps_project::{LATEST_VERSION, OutputDef, TimeDef};

    fn config(varying: Vec<VaryingDef>) -> SweepConfig {
        SweepConfig {
            version: LATEST_VERSION,
            name: "test".to_string(),
            model: "linear".to_string(),
            base: ParameterMap::new().with("a", 2.0),
            varying,
            time: TimeDef {
                t_start: 0.0,
                t_end: 10.0,
            },
            solver: SolverDef::default(),
            discrete: DiscreteDef::default(),
            output: OutputDef::default(),
        }
    }

    #[test]
    fn resolves_each_kind_of_varying_definition() {
        let pars = build_pars(&config(vec![
            VaryingDef::Values {
                name: "b".to_string(),
                values: vec![1.0, 2.0],
            },
            VaryingDef::Range {
                name: "a".to_string(),
                count: 3,
                min: 0.0,
                max: 4.0,
                logarithmic: false,
            },
        ]))
        .unwrap();
        assert_eq!(pars.varying[0].values, vec![1.0, 2.0]);
        assert_eq!(pars.varying[1].values, vec![0.0, 2.0, 4.0]);
        assert_eq!(pars.n_combinations(), 6);

        let pars = build_pars(&config(vec![VaryingDef::Displace {
            name: "a".to_string(),
            count: 3,
            percent: 50.0,
            logarithmic: false,
        }]))
        .unwrap();
        assert_eq!(pars.varying[0].values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn range_outside_base_value_is_rejected() {
        let err = build_pars(&config(vec![VaryingDef::Range {
            name: "a".to_string(),
            count: 3,
            min: 3.0,
            max: 4.0,
            logarithmic: false,
        }]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected lower bound to be no greater than 2");
    }

    #[test]
    fn solver_settings_carry_over() {
        let def = SolverDef {
            integrator: IntegratorDef::ForwardEuler,
            max_steps: 7,
            ..SolverDef::default()
        };
        let control = solver_control(&def);
        assert_eq!(control.max_steps, 7);
        assert_eq!(control.integrator, IntegratorType::ForwardEuler);
        assert!(build_model(&config(vec![])).is_ok());
    }
}
