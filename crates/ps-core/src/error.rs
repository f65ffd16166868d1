use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Expected a value for '{name}'")]
    MissingParameter { name: String },

    #[error("Expected a number for '{name}'")]
    NotScalar { name: String },
}
