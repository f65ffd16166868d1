//! Error types for batch construction, execution and summaries.

use thiserror::Error;

/// Errors raised by the batch layer.
///
/// Individual run failures are never reported through this type; they
/// are recorded as failed run statuses instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    #[error(transparent)]
    Parameter(#[from] ps_core::CoreError),

    #[error("Expected lower bound to be no greater than {value}")]
    LowerBoundTooHigh { value: f64 },

    #[error("Expected upper bound to be no less than {value}")]
    UpperBoundTooLow { value: f64 },

    #[error("Expected upper bound to be greater than lower bound")]
    EmptyRange,

    #[error("Expected a finite value for '{name}'")]
    NonFiniteValue { name: String },

    #[error("Expected finite bounds for '{name}'")]
    NonFiniteBounds { name: String },

    #[error("Must include at least 2 traces in the batch")]
    TooFewTraces,

    #[error("Lower bound must be greater than 0 for logarithmic scale")]
    NonPositiveLogBound,

    #[error("A batch must have at least one varying parameter")]
    NoVaryingParameters,

    #[error("Varying parameter '{name}' has no values")]
    EmptyVaryingParameter { name: String },

    #[error("Expected t_end ({t_end}) to be greater than t_start ({t_start})")]
    InvalidTimeRange { t_start: f64, t_end: f64 },

    #[error("All solutions failed; first error: {first_error}")]
    AllRunsFailed { first_error: String },

    #[error("Expected all descriptions to be defined")]
    UndefinedDescription,

    #[error("Unexpected inconsistent descriptions: have {have}, but given {given}")]
    InconsistentDescriptions { have: String, given: String },

    #[error("Unexpected inconsistent series: have {have}, but given {given}")]
    InconsistentSeries { have: String, given: String },

    #[error("Expected the first time to be at least {t_start}")]
    FitTimeBeforeStart { t_start: f64 },

    #[error("Fit data must contain at least one time, with one value per time")]
    InvalidFitData,

    #[error("Series '{name}' not found in model output")]
    SeriesNotFound { name: String },

    #[error("Run failed: {message}")]
    RunFailed { message: String },
}

pub type BatchResult<T> = Result<T, BatchError>;
