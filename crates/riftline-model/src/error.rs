//! Schema validation errors.

use thiserror::Error;

/// Structured errors emitted while validating raw telemetry input.
///
/// Validation is all-or-nothing: any variant here means the offending event
/// was never constructed and nothing was dispatched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Event kind string was not a member of the closed set.
    #[error("unknown event kind '{value}'")]
    UnknownEventKind {
        /// Kind string provided by the caller.
        value: String,
    },

    /// Payload discriminator was not a member of the closed set.
    #[error("unknown payload kind '{value}'")]
    UnknownPayloadKind {
        /// Discriminator string provided by the caller.
        value: String,
    },

    /// A field required by the matched variant was absent.
    #[error("missing field '{field}' in '{context}'")]
    MissingField {
        /// Structure that was being validated.
        context: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A field was present with the wrong shape.
    #[error("invalid value for '{field}' in '{context}': expected {expected}")]
    InvalidField {
        /// Structure that was being validated.
        context: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Shape the validator required.
        expected: &'static str,
    },

    /// Input that must be a JSON object was something else.
    #[error("'{context}' must be a JSON object")]
    NotAnObject {
        /// Structure that was being validated.
        context: &'static str,
    },
}

/// Convenience alias for schema validation results.
pub type SchemaResult<T> = Result<T, SchemaError>;
