//! Identity Registrar Codec
//!
//! Canonical encoding, content hashing and change detection for on-chain
//! identity records.
//!
//! # Core Concepts
//!
//! - [`IdentityFieldSet`]: the editable identity record (10 optional fields)
//! - [`IdentityCodec`]: fixed-schema SCALE-style encoder/decoder
//! - [`ContentHash`]: 32-byte BLAKE3 digest of an [`EncodedRecord`]
//! - [`ChangeSnapshot`]: baseline hash for "has the form changed" checks
//! - [`SupportedFieldDecoder`]: registrar field bitmask decoding
//!
//! # Example
//!
//! ```rust
//! use idreg_codec::{ChangeSnapshot, IdentityCodec, IdentityFieldSet};
//!
//! let codec = IdentityCodec::default();
//! let loaded = IdentityFieldSet::new().with_display("alice");
//! let snapshot = ChangeSnapshot::from_fields(&codec, &loaded)?;
//!
//! let edited = loaded.clone().with_email("alice@example.org");
//! assert!(snapshot.has_changes(&codec, &edited)?);
//! # Ok::<(), idreg_codec::CodecError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod change;
mod codec;
mod config;
mod error;
mod field;
mod hash;
mod record;
mod source;
pub mod supported;

pub use change::{diff, has_changed, ChangeSnapshot, FieldChange};
pub use codec::{compute_hash, decode_fields, encode, hash, EncodedRecord, IdentityCodec};
pub use config::{CodecConfig, ConfigError};
pub use error::{CodecError, DecodeError, ValidationError};
pub use field::{IdentityField, RegistrarField, UnknownField};
pub use hash::{ContentHash, HashError, HASH_LEN};
pub use record::{IdentityFieldSet, PGP_FINGERPRINT_LEN};
pub use source::{
    fetch_identity, fetch_supported_fields, ChainSource, FetchError, LoadedIdentity,
    RegistrarInfo,
};
pub use supported::{SupportedFieldDecoder, ZeroBitmapPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn loaded_profile_lifecycle() {
        let codec = IdentityCodec::new(CodecConfig::new().with_max_field_len(64));

        // record as it sits on chain
        let on_chain = IdentityFieldSet::new()
            .with_display("alice")
            .with_pgp_fingerprint([0x42; 20]);
        let bytes = codec.encode(&on_chain).unwrap();

        // session loads it and baselines
        let mut fields = codec.decode_fields(bytes.as_bytes()).unwrap();
        let mut snapshot = ChangeSnapshot::with_baseline(bytes.hash());
        assert!(!snapshot.has_changes(&codec, &fields).unwrap());

        // user edits
        fields.set(IdentityField::Matrix, "@alice:matrix.org").unwrap();
        assert!(snapshot.has_changes(&codec, &fields).unwrap());
        assert_eq!(
            diff(&on_chain, &fields),
            vec![FieldChange::Added {
                field: IdentityField::Matrix
            }]
        );

        // submitted, so the new state becomes the baseline
        snapshot.rebaseline(&codec, &fields).unwrap();
        assert!(!snapshot.has_changes(&codec, &fields).unwrap());
    }

    #[test]
    fn registrar_filters_editable_fields() {
        let decoder = SupportedFieldDecoder::default();
        let supported = decoder.decode(
            supported::encode([RegistrarField::Display, RegistrarField::Email]),
        );
        let editable: Vec<_> = IdentityField::SCHEMA
            .into_iter()
            .filter(|f| supported.iter().any(|s| s.name() == f.name()))
            .collect();
        assert_eq!(editable, vec![IdentityField::Display, IdentityField::Email]);
    }
}
