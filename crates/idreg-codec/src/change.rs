//! Change detection between a loaded identity and its edited form
//!
//! Two granularities:
//! - hash level: [`has_changed`] and [`ChangeSnapshot`], which answer
//!   "does the live form differ from what is on chain"
//! - field level: [`diff`], which lists the fields that differ

use crate::codec::IdentityCodec;
use crate::error::CodecError;
use crate::field::IdentityField;
use crate::hash::ContentHash;
use crate::record::IdentityFieldSet;
use serde::{Deserialize, Serialize};

/// Whether `current` differs from the baseline
///
/// No baseline means no changes.
#[inline]
#[must_use]
pub fn has_changed(original: Option<&ContentHash>, current: &ContentHash) -> bool {
    original.is_some_and(|original| original != current)
}

/// Baseline hash held by an editing session
///
/// The baseline moves only through [`ChangeSnapshot::rebaseline`] and
/// [`ChangeSnapshot::reset`]; reading the current state never touches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSnapshot {
    original: Option<ContentHash>,
}

impl ChangeSnapshot {
    /// Snapshot with no baseline (no identity on chain yet)
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { original: None }
    }

    /// Snapshot baselined on an already-known hash
    #[inline]
    #[must_use]
    pub const fn with_baseline(original: ContentHash) -> Self {
        Self {
            original: Some(original),
        }
    }

    /// Snapshot baselined on a freshly loaded record
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded
    pub fn from_fields(codec: &IdentityCodec, fields: &IdentityFieldSet) -> Result<Self, CodecError> {
        let original = codec.compute_hash(fields)?;
        tracing::debug!(baseline = %original.short(), "identity baseline captured");
        Ok(Self::with_baseline(original))
    }

    #[inline]
    #[must_use]
    pub const fn original(&self) -> Option<&ContentHash> {
        self.original.as_ref()
    }

    /// Hash of the live record
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded
    pub fn current(
        &self,
        codec: &IdentityCodec,
        fields: &IdentityFieldSet,
    ) -> Result<ContentHash, CodecError> {
        codec.compute_hash(fields)
    }

    /// Whether the live record differs from the baseline
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded
    pub fn has_changes(
        &self,
        codec: &IdentityCodec,
        fields: &IdentityFieldSet,
    ) -> Result<bool, CodecError> {
        let current = self.current(codec, fields)?;
        Ok(has_changed(self.original.as_ref(), &current))
    }

    /// Move the baseline to the live record (e.g. after it was submitted)
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded; the baseline is left
    /// untouched in that case
    pub fn rebaseline(
        &mut self,
        codec: &IdentityCodec,
        fields: &IdentityFieldSet,
    ) -> Result<ContentHash, CodecError> {
        let current = codec.compute_hash(fields)?;
        tracing::debug!(
            from = ?self.original.map(|h| h.short()),
            to = %current.short(),
            "identity baseline moved"
        );
        self.original = Some(current);
        Ok(current)
    }

    /// Drop the baseline (session end or form reset)
    pub fn reset(&mut self) {
        if self.original.take().is_some() {
            tracing::debug!("identity baseline cleared");
        }
    }
}

/// A single field that differs between two records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldChange {
    /// Absent before, present now
    Added { field: IdentityField },
    /// Present before, absent now
    Removed { field: IdentityField },
    /// Present in both with different payloads
    Modified { field: IdentityField },
}

impl FieldChange {
    #[inline]
    #[must_use]
    pub const fn field(&self) -> IdentityField {
        match self {
            Self::Added { field } | Self::Removed { field } | Self::Modified { field } => *field,
        }
    }
}

/// Per-field differences, in schema order
#[must_use]
pub fn diff(original: &IdentityFieldSet, current: &IdentityFieldSet) -> Vec<FieldChange> {
    IdentityField::SCHEMA
        .into_iter()
        .filter_map(|field| match (original.bytes(field), current.bytes(field)) {
            (None, Some(_)) => Some(FieldChange::Added { field }),
            (Some(_), None) => Some(FieldChange::Removed { field }),
            (Some(a), Some(b)) if a != b => Some(FieldChange::Modified { field }),
            _ => None,
        })
        .collect()
}
