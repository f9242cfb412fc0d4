//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when validating a field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields with the same name are both stored at one version.
    DuplicateField { name: &'static str, version: i32 },

    /// A fixed-size field has zero length.
    EmptyFixedField { name: &'static str },

    /// A field name is empty.
    EmptyName { index: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { name, version } => {
                write!(f, "field {name:?} is stored twice at version {version}")
            }
            Self::EmptyFixedField { name } => {
                write!(f, "fixed-size field {name:?} has zero length")
            }
            Self::EmptyName { index } => write!(f, "field {index} has an empty name"),
        }
    }
}

impl std::error::Error for SchemaError {}
