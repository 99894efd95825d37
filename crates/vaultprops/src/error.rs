use thiserror::Error;

use crate::tags::validation::FieldValidationError;

#[derive(Error, Debug)]
pub enum VaultPropsError {
    #[error("{field} cannot be empty")]
    EmptyOrNullArgument { field: &'static str },

    #[error("{field} cannot be null")]
    NullArgument { field: &'static str },

    #[error("{field} is too long: {actual} characters, maximum is {max}")]
    ArgumentTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{0}")]
    CollectionConstraintViolation(String),

    #[error("Index {index} is out of range for a collection of {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Property is read-only: {0}")]
    ReadOnlyProperty(String),

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid limits: {0}")]
    InvalidLimits(String),

    #[error("Cannot rebuild collection from edited items: {0}")]
    ReconstructionFailed(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl From<FieldValidationError> for VaultPropsError {
    fn from(err: FieldValidationError) -> Self {
        match err {
            FieldValidationError::Empty { field } => VaultPropsError::EmptyOrNullArgument { field },
            FieldValidationError::Missing { field } => VaultPropsError::NullArgument { field },
            FieldValidationError::TooLong { field, max, actual } => {
                VaultPropsError::ArgumentTooLong { field, max, actual }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultPropsError>;
