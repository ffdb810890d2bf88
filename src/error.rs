//! # Error Types
//!
//! All recoverable failures in the codec surface as [`RecordError`]. Accessor
//! resolution returns `UnknownField` / `CapabilityMismatch`, decode of
//! malformed fixed-decimal or date text returns `DecodeFailure`, and a byte
//! region shorter than its field type requires returns `BufferTooSmall`.
//! Nothing in this crate panics on malformed record bytes.

use crate::types::{Capability, FieldType};

pub type Result<T> = std::result::Result<T, RecordError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("there is no '{name}' field in the record")]
    UnknownField { name: String },

    #[error("the '{field}' field is not a {} field, it is '{}'", requested.label(), actual.wire_tag())]
    CapabilityMismatch {
        field: String,
        requested: Capability,
        actual: FieldType,
    },

    #[error("could not decode {text:?}: {reason}")]
    DecodeFailure { text: String, reason: String },

    #[error("field buffer too small: need {needed} bytes, have {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_field() {
        let err = RecordError::UnknownField {
            name: "Missing".to_string(),
        };
        assert_eq!(err.to_string(), "there is no 'Missing' field in the record");

        let err = RecordError::CapabilityMismatch {
            field: "Count".to_string(),
            requested: Capability::Bool,
            actual: FieldType::Int32,
        };
        assert_eq!(
            err.to_string(),
            "the 'Count' field is not a Bool field, it is 'Int32'"
        );
    }

    #[test]
    fn buffer_and_schema_errors_carry_their_context() {
        let err = RecordError::BufferTooSmall {
            needed: 8,
            actual: 3,
        };
        assert_eq!(err.to_string(), "field buffer too small: need 8 bytes, have 3");

        let err = RecordError::InvalidSchema {
            reason: "duplicate field name 'x'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid schema: duplicate field name 'x'");
    }
}
