use crate::domain::ContactField;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid value for {field}: {value}")]
    InvalidField { field: ContactField, value: String },
    #[error("unknown contact field: {0}")]
    UnknownField(String),
    #[error("address book name is required")]
    EmptyBookName,
    #[error("invalid import policy: {0}")]
    InvalidImportPolicy(String),
}

impl CoreError {
    pub fn invalid_field(field: ContactField, value: impl Into<String>) -> Self {
        CoreError::InvalidField {
            field,
            value: value.into(),
        }
    }
}
