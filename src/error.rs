use crate::record::Shape;
use crate::value::ValueType;
use colored::Colorize;
use std::num::{ParseFloatError, ParseIntError};

/// Errors that can occur while binding a record from the environment
///
/// `Shape` is terminal and is always returned alone. Every other variant is
/// recorded against a single field and does not stop the remaining fields
/// from being processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    /// The bind target is not a mutable reference to a structure
    #[error("env: expected {expected} but got {actual}")]
    Shape { expected: Shape, actual: Shape },

    /// The field's declared type has no coercion rule
    #[error("env: {field}: {declared} is not a supported type")]
    UnsupportedType {
        field: &'static str,
        declared: ValueType,
    },

    /// The raw value could not be parsed into the field's declared type
    #[error("env: {field}: parsing {raw:?} as {declared}: {source}")]
    Conversion {
        field: &'static str,
        /// The environment value, or the default literal when the variable was absent
        raw: String,
        declared: ValueType,
        source: ConversionCause,
    },

    /// The schema names a field the record does not expose
    #[error("env: {field}: no such field on the target")]
    UnknownField { field: &'static str },

    /// The schema declares a different type than the record's field holds
    #[error("env: {field}: declared as {declared} but the field is {actual}")]
    TypeMismatch {
        field: &'static str,
        declared: ValueType,
        actual: ValueType,
    },
}

/// The underlying parser failure behind a [`BindError::Conversion`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionCause {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value {0:?} out of range")]
    OutOfRange(String),

    #[error("invalid boolean literal {0:?}")]
    InvalidBool(String),
}

impl BindError {
    pub fn shape(expected: Shape, actual: Shape) -> Self {
        Self::Shape { expected, actual }
    }

    /// Name of the field the error is attributed to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Shape { .. } => None,
            Self::UnsupportedType { field, .. }
            | Self::Conversion { field, .. }
            | Self::UnknownField { field }
            | Self::TypeMismatch { field, .. } => Some(*field),
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }
}

/// Helper to format multiple binding errors into a panic message
pub fn format_bind_errors(errors: &[BindError]) -> String {
    let error_summary = errors
        .iter()
        .map(|e| match e.field() {
            Some(field) => format!("  - [{}] {}", field.magenta().bold(), e),
            None => format!("  - {}", e),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Configuration failed with {} error(s):\n{}",
        errors.len().to_string().yellow().bold(),
        error_summary
    )
}
