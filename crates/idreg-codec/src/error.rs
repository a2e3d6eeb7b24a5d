//! Error types for the identity codec
//!
//! Two failure families, neither retryable:
//! - [`ValidationError`]: the caller handed `encode` a record it cannot accept
//! - [`DecodeError`]: the byte stream handed to `decode_fields` is malformed

use crate::field::{IdentityField, UnknownField};

/// Main codec error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Input record rejected
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Encoded bytes malformed
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

impl CodecError {
    /// Field the error is attributed to, when there is one
    #[must_use]
    pub fn field(&self) -> Option<IdentityField> {
        match self {
            Self::Validation(ValidationError::FingerprintLength { .. }) => {
                Some(IdentityField::PgpFingerprint)
            }
            Self::Validation(ValidationError::FieldTooLong { field, .. }) => Some(*field),
            Self::Decode(e) => e.field(),
            Self::Validation(_) => None,
        }
    }
}

/// A record violates a fixed-width or size constraint
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Fingerprint present but not exactly 20 bytes
    #[error("pgpFingerprint must be exactly {expected} bytes, got {actual}")]
    FingerprintLength { expected: usize, actual: usize },

    /// Fingerprint supplied as text but not valid hex
    #[error("pgpFingerprint is not valid hex: {0}")]
    FingerprintHex(#[from] hex::FromHexError),

    /// Field exceeds the configured maximum length
    #[error("{field} is {actual} bytes, limit is {limit}")]
    FieldTooLong {
        field: IdentityField,
        limit: usize,
        actual: usize,
    },

    /// Field name not in the record schema
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}

/// Malformed or truncated byte stream
///
/// Positional variants carry the byte offset at which decoding stopped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Buffer ended before a field was complete
    #[error("{field}: truncated at offset {offset}, needed {expected} bytes, {available} available")]
    Truncated {
        field: IdentityField,
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// Option tag other than 0x00 or 0x01
    #[error("{field}: invalid option tag {tag:#04x} at offset {offset}")]
    InvalidTag {
        field: IdentityField,
        offset: usize,
        tag: u8,
    },

    /// Compact length prefix could not be read
    #[error("{field}: malformed length prefix at offset {offset}")]
    InvalidLength { field: IdentityField, offset: usize },

    /// Text field payload is not UTF-8
    #[error("{field}: invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { field: IdentityField, offset: usize },

    /// Bytes left over after the last schema field
    #[error("{remaining} trailing bytes at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    /// Hex rendering of a record could not be parsed
    #[error("invalid record hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl DecodeError {
    /// Byte offset where decoding failed
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Truncated { offset, .. }
            | Self::InvalidTag { offset, .. }
            | Self::InvalidLength { offset, .. }
            | Self::InvalidUtf8 { offset, .. }
            | Self::TrailingBytes { offset, .. } => Some(*offset),
            Self::Hex(_) => None,
        }
    }

    /// Field being decoded when the error occurred
    #[must_use]
    pub fn field(&self) -> Option<IdentityField> {
        match self {
            Self::Truncated { field, .. }
            | Self::InvalidTag { field, .. }
            | Self::InvalidLength { field, .. }
            | Self::InvalidUtf8 { field, .. } => Some(*field),
            Self::TrailingBytes { .. } | Self::Hex(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_error_attributed_to_field() {
        let err = CodecError::from(ValidationError::FingerprintLength {
            expected: 20,
            actual: 19,
        });
        assert_eq!(err.field(), Some(IdentityField::PgpFingerprint));
        assert_eq!(
            err.to_string(),
            "validation failed: pgpFingerprint must be exactly 20 bytes, got 19"
        );
    }

    #[test]
    fn decode_error_reports_offset() {
        let err = DecodeError::Truncated {
            field: IdentityField::Email,
            offset: 12,
            expected: 17,
            available: 3,
        };
        assert_eq!(err.offset(), Some(12));
        assert_eq!(err.field(), Some(IdentityField::Email));
        assert!(err.to_string().contains("needed 17 bytes, 3 available"));
    }
}
