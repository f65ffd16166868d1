//! Sweep configuration validation.
//!
//! Only structural checks happen here. Whether a range contains the
//! base value is checked when the varying parameters are built.

use crate::schema::{LATEST_VERSION, SweepConfig, VaryingDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate varying parameter: {name}")]
    DuplicateVarying { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_config(config: &SweepConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    if config.model.trim().is_empty() {
        return Err(invalid("model", &config.model, "must not be empty"));
    }

    let time = &config.time;
    if !time.t_start.is_finite() {
        return Err(invalid("time.t_start", time.t_start, "must be finite"));
    }
    if !time.t_end.is_finite() || time.t_end <= time.t_start {
        return Err(invalid("time.t_end", time.t_end, "must be after t_start"));
    }

    let mut names = HashSet::new();
    for def in &config.varying {
        if def.name().is_empty() {
            return Err(invalid("varying.name", "", "must not be empty"));
        }
        if !names.insert(def.name()) {
            return Err(ValidationError::DuplicateVarying {
                name: def.name().to_string(),
            });
        }
        validate_varying(def)?;
    }

    let solver = &config.solver;
    if solver.atol <= 0.0 {
        return Err(invalid("solver.atol", solver.atol, "must be positive"));
    }
    if solver.rtol <= 0.0 {
        return Err(invalid("solver.rtol", solver.rtol, "must be positive"));
    }
    if solver.max_steps == 0 {
        return Err(invalid("solver.max_steps", 0, "must be at least 1"));
    }
    if let Some(h) = solver.initial_step.filter(|h| *h <= 0.0) {
        return Err(invalid("solver.initial_step", h, "must be positive"));
    }

    let discrete = &config.discrete;
    if discrete.n_particles == 0 {
        return Err(invalid("discrete.n_particles", 0, "must be at least 1"));
    }
    if discrete.dt <= 0.0 {
        return Err(invalid("discrete.dt", discrete.dt, "must be positive"));
    }

    if config.output.n_points_extremes < 2 {
        return Err(invalid(
            "output.n_points_extremes",
            config.output.n_points_extremes,
            "must be at least 2",
        ));
    }
    Ok(())
}

fn validate_varying(def: &VaryingDef) -> Result<(), ValidationError> {
    let field = |what: &str| format!("varying.{}.{}", def.name(), what);
    match def {
        VaryingDef::Values { values, .. } => {
            if values.is_empty() {
                return Err(invalid(field("values"), "[]", "must not be empty"));
            }
            if let Some(v) = values.iter().find(|v| !v.is_finite()) {
                return Err(invalid(field("values"), v, "must be finite"));
            }
        }
        VaryingDef::Range { count, min, max, .. } => {
            if *count < 2 {
                return Err(invalid(field("count"), count, "must be at least 2"));
            }
            if min >= max {
                return Err(invalid(field("max"), max, "must be greater than min"));
            }
        }
        VaryingDef::Displace { count, percent, .. } => {
            if *count < 2 {
                return Err(invalid(field("count"), count, "must be at least 2"));
            }
            if *percent <= 0.0 {
                return Err(invalid(field("percent"), percent, "must be positive"));
            }
        }
    }
    Ok(())
}
