//! The identity field set
//!
//! [`IdentityFieldSet`] is the user-editable identity record. Every field is
//! optional. Text fields hold UTF-8; `pgp_fingerprint` holds raw bytes and is
//! only checked for its 20-byte width when the record is encoded, so a form
//! can carry a half-typed value without losing it.

use crate::error::ValidationError;
use crate::field::IdentityField;
use serde::{Deserialize, Serialize};

/// Width of a PGP fingerprint in bytes
pub const PGP_FINGERPRINT_LEN: usize = 20;

/// Self-asserted identity attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentityFieldSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "fingerprint_hex")]
    pub pgp_fingerprint: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

impl IdentityFieldSet {
    /// Empty record (every field absent)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from form-style `(name, value)` pairs
    ///
    /// Empty values count as absent. `pgpFingerprint` is read as hex, with
    /// or without a `0x` prefix.
    ///
    /// # Errors
    /// Returns error on an unknown field name or non-hex fingerprint
    pub fn from_map<I, K, V>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fields = Self::new();
        for (name, value) in entries {
            let field: IdentityField = name.as_ref().parse()?;
            fields.set(field, value.as_ref())?;
        }
        Ok(fields)
    }

    /// Set a field from its form representation
    ///
    /// An empty value clears the field.
    ///
    /// # Errors
    /// Returns error if the fingerprint value is not hex
    pub fn set(&mut self, field: IdentityField, value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            self.clear(field);
            return Ok(());
        }
        match self.text_slot_mut(field) {
            Some(slot) => *slot = Some(value.to_string()),
            None => {
                let digits = value.strip_prefix("0x").unwrap_or(value);
                self.pgp_fingerprint = Some(hex::decode(digits)?);
            }
        }
        Ok(())
    }

    /// Mark a field absent
    pub fn clear(&mut self, field: IdentityField) {
        match self.text_slot_mut(field) {
            Some(slot) => *slot = None,
            None => self.pgp_fingerprint = None,
        }
    }

    /// Text value of a field; `None` for absent fields and the fingerprint
    #[must_use]
    pub fn text(&self, field: IdentityField) -> Option<&str> {
        self.text_slot(field).and_then(Option::as_deref)
    }

    /// Payload bytes of a field as they go on the wire
    #[must_use]
    pub fn bytes(&self, field: IdentityField) -> Option<&[u8]> {
        match self.text_slot(field) {
            Some(slot) => slot.as_deref().map(str::as_bytes),
            None => self.pgp_fingerprint.as_deref(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_present(&self, field: IdentityField) -> bool {
        self.bytes(field).is_some()
    }

    /// Fields that are present, in schema order
    pub fn present_fields(&self) -> impl Iterator<Item = IdentityField> + '_ {
        IdentityField::SCHEMA
            .into_iter()
            .filter(move |field| self.is_present(*field))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_fields().next().is_none()
    }

    #[must_use]
    pub fn with_display(mut self, value: impl Into<String>) -> Self {
        self.display = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_legal(mut self, value: impl Into<String>) -> Self {
        self.legal = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_web(mut self, value: impl Into<String>) -> Self {
        self.web = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_matrix(mut self, value: impl Into<String>) -> Self {
        self.matrix = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Attach a fingerprint; width is checked at encode time
    #[must_use]
    pub fn with_pgp_fingerprint(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.pgp_fingerprint = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, value: impl Into<String>) -> Self {
        self.image = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_twitter(mut self, value: impl Into<String>) -> Self {
        self.twitter = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_discord(mut self, value: impl Into<String>) -> Self {
        self.discord = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_additional(mut self, value: impl Into<String>) -> Self {
        self.additional = Some(value.into());
        self
    }

    /// Store a decoded text value verbatim (empty strings stay present)
    pub(crate) fn insert_text(&mut self, field: IdentityField, value: String) {
        if let Some(slot) = self.text_slot_mut(field) {
            *slot = Some(value);
        }
    }

    fn text_slot(&self, field: IdentityField) -> Option<&Option<String>> {
        match field {
            IdentityField::Display => Some(&self.display),
            IdentityField::Legal => Some(&self.legal),
            IdentityField::Web => Some(&self.web),
            IdentityField::Matrix => Some(&self.matrix),
            IdentityField::Email => Some(&self.email),
            IdentityField::PgpFingerprint => None,
            IdentityField::Image => Some(&self.image),
            IdentityField::Twitter => Some(&self.twitter),
            IdentityField::Discord => Some(&self.discord),
            IdentityField::Additional => Some(&self.additional),
        }
    }

    fn text_slot_mut(&mut self, field: IdentityField) -> Option<&mut Option<String>> {
        match field {
            IdentityField::Display => Some(&mut self.display),
            IdentityField::Legal => Some(&mut self.legal),
            IdentityField::Web => Some(&mut self.web),
            IdentityField::Matrix => Some(&mut self.matrix),
            IdentityField::Email => Some(&mut self.email),
            IdentityField::PgpFingerprint => None,
            IdentityField::Image => Some(&mut self.image),
            IdentityField::Twitter => Some(&mut self.twitter),
            IdentityField::Discord => Some(&mut self.discord),
            IdentityField::Additional => Some(&mut self.additional),
        }
    }
}

/// Fingerprint as a hex string in JSON
mod fingerprint_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(s) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(digits)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
