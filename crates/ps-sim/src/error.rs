//! Error types for model runs.

use thiserror::Error;

/// Errors encountered while running a model once.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Integration failure: too many steps (max_steps = {max_steps}, t = {t})")]
    TooManySteps { max_steps: usize, t: f64 },

    #[error("Integration failure: step size vanished at t = {t}")]
    StepSizeTooSmall { t: f64 },

    #[error("Integration failure: non-finite state at t = {t}")]
    NonFinite { t: f64 },

    #[error("Unknown model '{name}'")]
    UnknownModel { name: String },

    #[error("Parameter error: {0}")]
    Parameter(#[from] ps_core::CoreError),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;
