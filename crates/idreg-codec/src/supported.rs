//! Registrar "supported fields" bitmask decoding
//!
//! A registrar publishes a bitmask of the fields it reviews. Bits follow
//! [`RegistrarField::ALL`]; bits above 9 carry no meaning and are ignored.

use crate::field::RegistrarField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bitmask with every known field set
pub const UNRESTRICTED: u64 = (1 << RegistrarField::ALL.len()) - 1;

/// How a raw bitmap of `0` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroBitmapPolicy {
    /// `0` means the registrar declared no restriction: every field
    #[default]
    Unrestricted,
    /// `0` means no field is supported
    Literal,
}

/// Turns registrar bitmasks into field sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedFieldDecoder {
    policy: ZeroBitmapPolicy,
}

impl SupportedFieldDecoder {
    #[inline]
    #[must_use]
    pub const fn new(policy: ZeroBitmapPolicy) -> Self {
        Self { policy }
    }

    #[inline]
    #[must_use]
    pub const fn policy(&self) -> ZeroBitmapPolicy {
        self.policy
    }

    /// Bitmap after the zero policy is applied
    #[inline]
    #[must_use]
    pub const fn effective(&self, bitmap: u64) -> u64 {
        match (bitmap, self.policy) {
            (0, ZeroBitmapPolicy::Unrestricted) => UNRESTRICTED,
            _ => bitmap,
        }
    }

    /// Fields whose bit is set
    #[must_use]
    pub fn decode(&self, bitmap: u64) -> BTreeSet<RegistrarField> {
        let bitmap = self.effective(bitmap);
        RegistrarField::ALL
            .into_iter()
            .filter(|field| bitmap & field.mask() != 0)
            .collect()
    }

    /// Wire names of the fields whose bit is set, in bit order
    #[must_use]
    pub fn decode_names(&self, bitmap: u64) -> Vec<&'static str> {
        self.decode(bitmap)
            .into_iter()
            .map(RegistrarField::name)
            .collect()
    }
}

/// Decode with the default (unrestricted) zero policy
#[must_use]
pub fn decode(bitmap: u64) -> BTreeSet<RegistrarField> {
    SupportedFieldDecoder::default().decode(bitmap)
}

/// Pack fields back into a bitmask
#[must_use]
pub fn encode<I>(fields: I) -> u64
where
    I: IntoIterator<Item = RegistrarField>,
{
    fields.into_iter().fold(0, |acc, field| acc | field.mask())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_unrestricted_by_default() {
        let all = decode(0);
        assert_eq!(all.len(), 10);
        assert!(all.contains(&RegistrarField::Github));
    }

    #[test]
    fn zero_is_empty_under_literal_policy() {
        let decoder = SupportedFieldDecoder::new(ZeroBitmapPolicy::Literal);
        assert!(decoder.decode(0).is_empty());
        assert_eq!(decoder.effective(0), 0);
    }

    #[test]
    fn low_bits() {
        assert_eq!(decode(1), BTreeSet::from([RegistrarField::Display]));
        assert_eq!(
            decode(0b11),
            BTreeSet::from([RegistrarField::Display, RegistrarField::Legal])
        );
    }

    #[test]
    fn high_bits_ignored() {
        assert_eq!(decode((1 << 10) | (1 << 9)), BTreeSet::from([RegistrarField::Discord]));
        // only unknown bits set: not zero, so no substitution
        assert!(decode(1 << 40).is_empty());
    }

    #[test]
    fn names() {
        let decoder = SupportedFieldDecoder::default();
        assert_eq!(
            decoder.decode_names(0b1_0010_0000),
            ["pgpFingerprint", "github"]
        );
        assert_eq!(decoder.decode_names(0b10_0000_0001), ["display", "discord"]);
    }

    #[test]
    fn encode_inverts_decode() {
        assert_eq!(encode(decode(0b10_1101_0011)), 0b10_1101_0011);
        assert_eq!(encode(RegistrarField::ALL), UNRESTRICTED);
    }

    #[test]
    fn unrestricted_covers_ten_bits() {
        assert_eq!(UNRESTRICTED, 0x3ff);
    }
}
