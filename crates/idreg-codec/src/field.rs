//! Field names for identity records and registrar bitmasks
//!
//! Two tables live here and they are not the same list:
//! [`IdentityField`] is the record schema (its order is the wire order),
//! [`RegistrarField`] is the registrar bitmask table (its order is the bit
//! assignment). `additional` only exists in the former, `github` only in
//! the latter.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A slot in the identity record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityField {
    Display,
    Legal,
    Web,
    Matrix,
    Email,
    PgpFingerprint,
    Image,
    Twitter,
    Discord,
    Additional,
}

impl IdentityField {
    /// All fields in wire order
    pub const SCHEMA: [Self; 10] = [
        Self::Display,
        Self::Legal,
        Self::Web,
        Self::Matrix,
        Self::Email,
        Self::PgpFingerprint,
        Self::Image,
        Self::Twitter,
        Self::Discord,
        Self::Additional,
    ];

    /// Name as used in UI forms and JSON
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Legal => "legal",
            Self::Web => "web",
            Self::Matrix => "matrix",
            Self::Email => "email",
            Self::PgpFingerprint => "pgpFingerprint",
            Self::Image => "image",
            Self::Twitter => "twitter",
            Self::Discord => "discord",
            Self::Additional => "additional",
        }
    }

    /// Position in the encoded record
    #[inline]
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Whether the field carries UTF-8 text (everything but the fingerprint)
    #[inline]
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::PgpFingerprint)
    }
}

impl Display for IdentityField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentityField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SCHEMA
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A field a registrar may declare support for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrarField {
    Display,
    Legal,
    Web,
    Matrix,
    Email,
    PgpFingerprint,
    Image,
    Twitter,
    Github,
    Discord,
}

impl RegistrarField {
    /// All fields in bit order
    pub const ALL: [Self; 10] = [
        Self::Display,
        Self::Legal,
        Self::Web,
        Self::Matrix,
        Self::Email,
        Self::PgpFingerprint,
        Self::Image,
        Self::Twitter,
        Self::Github,
        Self::Discord,
    ];

    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Legal => "legal",
            Self::Web => "web",
            Self::Matrix => "matrix",
            Self::Email => "email",
            Self::PgpFingerprint => "pgpFingerprint",
            Self::Image => "image",
            Self::Twitter => "twitter",
            Self::Github => "github",
            Self::Discord => "discord",
        }
    }

    /// Bit position in the registrar bitmask
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Single-bit mask for this field
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        1 << self.bit()
    }
}

impl Display for RegistrarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegistrarField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Field name not present in the relevant table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);
