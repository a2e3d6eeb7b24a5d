//! Chain-facing seam
//!
//! The codec never talks to a node. A [`ChainSource`] implementation (an RPC
//! client, a light client, an in-memory fixture) hands over raw identity
//! bytes and registrar entries; the functions here interpret them.

use crate::change::ChangeSnapshot;
use crate::codec::IdentityCodec;
use crate::error::CodecError;
use crate::field::RegistrarField;
use crate::hash::ContentHash;
use crate::record::IdentityFieldSet;
use crate::supported::SupportedFieldDecoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Registrar entry as read from chain state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarInfo {
    /// Registrar index
    pub index: u32,
    /// Registrar account, SS58 or hex as the source reports it
    pub account: String,
    /// Judgement fee in the chain's smallest unit
    pub fee: u128,
    /// Supported-fields bitmask
    pub fields: u64,
}

impl RegistrarInfo {
    /// Fields this registrar reviews
    #[must_use]
    pub fn supported_fields(&self, decoder: &SupportedFieldDecoder) -> BTreeSet<RegistrarField> {
        decoder.decode(self.fields)
    }
}

/// Chain queries the codec consumes
pub trait ChainSource {
    /// Transport-level failure
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw encoded identity record for `account`, `None` if none is set
    ///
    /// # Errors
    /// Returns error if the query itself fails
    fn identity_bytes(&self, account: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Registrar entry at `index`, `None` if the slot is empty
    ///
    /// # Errors
    /// Returns error if the query itself fails
    fn registrar(&self, index: u32) -> Result<Option<RegistrarInfo>, Self::Error>;
}

/// Identity ready for an editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedIdentity {
    /// Decoded record (empty when the account has none)
    pub fields: IdentityFieldSet,
    /// Baseline for change detection (none when the account has none)
    pub snapshot: ChangeSnapshot,
}

/// Errors from the fetch helpers
#[derive(Debug, thiserror::Error)]
pub enum FetchError<E>
where
    E: std::error::Error + 'static,
{
    #[error("chain query failed: {0}")]
    Source(#[source] E),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("no registrar at index {0}")]
    UnknownRegistrar(u32),
}

/// Load and decode the identity of `account`, baselined on its on-chain bytes
///
/// # Errors
/// Returns error if the query fails or the stored bytes do not decode
pub fn fetch_identity<S>(
    source: &S,
    codec: &IdentityCodec,
    account: &str,
) -> Result<LoadedIdentity, FetchError<S::Error>>
where
    S: ChainSource + ?Sized,
{
    let Some(bytes) = source.identity_bytes(account).map_err(FetchError::Source)? else {
        tracing::debug!(account, "no identity on chain");
        return Ok(LoadedIdentity {
            fields: IdentityFieldSet::new(),
            snapshot: ChangeSnapshot::new(),
        });
    };

    let fields = codec.decode_fields(&bytes)?;
    // canonical encoding: hashing the stored bytes equals hashing the decoded record
    let baseline = ContentHash::digest(&bytes);
    tracing::debug!(account, baseline = %baseline.short(), "identity loaded");

    Ok(LoadedIdentity {
        fields,
        snapshot: ChangeSnapshot::with_baseline(baseline),
    })
}

/// Fields accepted by the registrar at `index`
///
/// # Errors
/// Returns error if the query fails or the registrar slot is empty
pub fn fetch_supported_fields<S>(
    source: &S,
    decoder: &SupportedFieldDecoder,
    index: u32,
) -> Result<BTreeSet<RegistrarField>, FetchError<S::Error>>
where
    S: ChainSource + ?Sized,
{
    let registrar = source
        .registrar(index)
        .map_err(FetchError::Source)?
        .ok_or(FetchError::UnknownRegistrar(index))?;
    Ok(registrar.supported_fields(decoder))
}
