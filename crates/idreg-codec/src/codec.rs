//! Canonical identity-record codec
//!
//! Wire layout, one entry per [`IdentityField::SCHEMA`] slot in order:
//!
//! | presence | bytes |
//! |---|---|
//! | absent | `0x00` |
//! | text field | `0x01`, SCALE compact `u32` byte length, UTF-8 bytes |
//! | `pgpFingerprint` | `0x01`, 20 raw bytes |
//!
//! Nothing follows the last slot. The layout is a wire contract with the
//! chain runtime: a byte out of place changes every derived hash and key.

use crate::config::CodecConfig;
use crate::error::{CodecError, DecodeError, ValidationError};
use crate::field::IdentityField;
use crate::hash::ContentHash;
use crate::record::{IdentityFieldSet, PGP_FINGERPRINT_LEN};
use parity_scale_codec::{Compact, Decode, Encode};
use std::fmt::{self, Display, Formatter};

const TAG_NONE: u8 = 0x00;
const TAG_SOME: u8 = 0x01;

/// Canonical bytes of an identity record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedRecord(Vec<u8>);

impl EncodedRecord {
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Content hash of these bytes
    #[inline]
    #[must_use]
    pub fn hash(&self) -> ContentHash {
        ContentHash::digest(&self.0)
    }

    /// Parse `0x`-prefixed (or bare) hex as chain RPCs return it
    ///
    /// Only the hex is checked; the bytes are validated by `decode_fields`.
    ///
    /// # Errors
    /// Returns error if the text is not hex
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        Ok(Self(hex::decode(digits)?))
    }
}

impl Display for EncodedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for EncodedRecord {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EncodedRecord {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Stateless encoder/decoder for identity records
///
/// Holds only immutable configuration; share it freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityCodec {
    config: CodecConfig,
}

impl IdentityCodec {
    #[inline]
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a record into canonical bytes
    ///
    /// # Errors
    /// - [`ValidationError::FingerprintLength`] if the fingerprint is not 20 bytes
    /// - [`ValidationError::FieldTooLong`] if a text field exceeds the
    ///   configured limit or the `u32` length prefix
    pub fn encode(&self, fields: &IdentityFieldSet) -> Result<EncodedRecord, CodecError> {
        let mut out = Vec::with_capacity(size_hint(fields));

        for field in IdentityField::SCHEMA {
            let Some(payload) = fields.bytes(field) else {
                out.push(TAG_NONE);
                continue;
            };
            out.push(TAG_SOME);

            if field.is_text() {
                let len = self.check_text_len(field, payload.len())?;
                Compact(len).encode_to(&mut out);
            } else if payload.len() != PGP_FINGERPRINT_LEN {
                return Err(ValidationError::FingerprintLength {
                    expected: PGP_FINGERPRINT_LEN,
                    actual: payload.len(),
                }
                .into());
            }
            out.extend_from_slice(payload);
        }

        Ok(EncodedRecord(out))
    }

    /// Decode canonical bytes back into a record
    ///
    /// The configured length limit applies here too, so a record that loads
    /// can always be re-encoded by the same codec.
    ///
    /// # Errors
    /// - [`DecodeError`] on a bad tag, malformed length prefix, truncated
    ///   payload, non-UTF-8 text, or trailing bytes
    /// - [`ValidationError::FieldTooLong`] if a text field exceeds the
    ///   configured limit
    pub fn decode_fields(&self, record: &[u8]) -> Result<IdentityFieldSet, CodecError> {
        let mut reader = Reader::new(record);
        let mut fields = IdentityFieldSet::new();

        for field in IdentityField::SCHEMA {
            if !reader.tag(field)? {
                continue;
            }
            if field.is_text() {
                let len = reader.compact_len(field)?;
                self.check_text_len(field, len)?;
                let start = reader.pos;
                let bytes = reader.take(field, len)?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|_| DecodeError::InvalidUtf8 { field, offset: start })?;
                fields.insert_text(field, text.to_string());
            } else {
                let bytes = reader.take(field, PGP_FINGERPRINT_LEN)?;
                fields.pgp_fingerprint = Some(bytes.to_vec());
            }
        }

        reader.finish()?;
        Ok(fields)
    }

    /// Encode then hash
    ///
    /// # Errors
    /// Same as [`IdentityCodec::encode`]
    pub fn compute_hash(&self, fields: &IdentityFieldSet) -> Result<ContentHash, CodecError> {
        Ok(self.encode(fields)?.hash())
    }

    fn check_text_len(&self, field: IdentityField, actual: usize) -> Result<u32, ValidationError> {
        if let Some(limit) = self.config.max_field_len.filter(|limit| actual > *limit) {
            return Err(ValidationError::FieldTooLong {
                field,
                limit,
                actual,
            });
        }
        u32::try_from(actual).map_err(|_| ValidationError::FieldTooLong {
            field,
            limit: u32::MAX as usize,
            actual,
        })
    }
}

fn size_hint(fields: &IdentityFieldSet) -> usize {
    // tag, worst-case compact prefix, payload
    IdentityField::SCHEMA
        .into_iter()
        .map(|field| fields.bytes(field).map_or(1, |b| 1 + 5 + b.len()))
        .sum()
}

/// Cursor over an encoded record that keeps its byte offset for errors
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn tag(&mut self, field: IdentityField) -> Result<bool, DecodeError> {
        let tag = self.take(field, 1)?[0];
        match tag {
            TAG_NONE => Ok(false),
            TAG_SOME => Ok(true),
            tag => Err(DecodeError::InvalidTag {
                field,
                offset: self.pos - 1,
                tag,
            }),
        }
    }

    fn compact_len(&mut self, field: IdentityField) -> Result<usize, DecodeError> {
        let mut input = &self.buf[self.pos..];
        let before = input.len();
        let Compact(len) = Compact::<u32>::decode(&mut input).map_err(|_| {
            DecodeError::InvalidLength {
                field,
                offset: self.pos,
            }
        })?;
        self.pos += before - input.len();
        Ok(len as usize)
    }

    fn take(&mut self, field: IdentityField, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                field,
                offset: self.pos,
                expected: len,
                available: self.remaining(),
            });
        }
        let buf: &'a [u8] = self.buf;
        let bytes = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingBytes {
                offset: self.pos,
                remaining,
            }),
        }
    }
}

/// Encode with the default configuration
///
/// # Errors
/// See [`IdentityCodec::encode`]
pub fn encode(fields: &IdentityFieldSet) -> Result<EncodedRecord, CodecError> {
    IdentityCodec::default().encode(fields)
}

/// Decode with the default configuration
///
/// # Errors
/// See [`IdentityCodec::decode_fields`]
pub fn decode_fields(record: &[u8]) -> Result<IdentityFieldSet, CodecError> {
    IdentityCodec::default().decode_fields(record)
}

/// Hash an encoded record
#[inline]
#[must_use]
pub fn hash(record: &EncodedRecord) -> ContentHash {
    record.hash()
}

/// Encode with the default configuration, then hash
///
/// # Errors
/// See [`IdentityCodec::encode`]
pub fn compute_hash(fields: &IdentityFieldSet) -> Result<ContentHash, CodecError> {
    IdentityCodec::default().compute_hash(fields)
}
