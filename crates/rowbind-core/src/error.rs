//! Error types for rowbind-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mapping rows to records and back
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Import was given no rows at all, so there is no header row
    #[error("No header row found in the source")]
    EmptySource,

    /// Export was given an empty record list
    #[error("The record list is empty")]
    EmptyInput,

    /// A cell's text could not be converted to the bound field's type
    #[error("Unable to convert value '{value}' to field '{field}' of type '{type_name}'")]
    Conversion {
        /// Offending cell text
        value: String,
        /// Name of the field the column was bound to
        field: String,
        /// Name of the target type
        type_name: &'static str,
    },

    /// Header override length does not match the exported field count
    #[error("Header override has {headers} names but the record exports {fields} fields")]
    HeaderMismatch { headers: usize, fields: usize },

    /// A record type's field table is malformed
    #[error("Invalid field table: {0}")]
    InvalidField(String),
}

impl Error {
    /// Create a conversion error for `value` bound to `field` of `type_name`
    pub fn conversion<S: Into<String>>(value: S, field: &str, type_name: &'static str) -> Self {
        Error::Conversion {
            value: value.into(),
            field: field.to_string(),
            type_name,
        }
    }

    /// Check if this error came from a failed cell conversion
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_message_names_value_field_and_type() {
        let err = Error::conversion("abc", "Age", "i32");
        let msg = err.to_string();

        assert!(msg.contains("'abc'"));
        assert!(msg.contains("'Age'"));
        assert!(msg.contains("'i32'"));
        assert!(err.is_conversion());
    }
}
