//! Testing utilities for the identity registrar workspace
//!
//! Shared fixtures, proptest strategies and an in-memory chain.

#![allow(missing_docs)]

use idreg_codec::{
    ChainSource, IdentityCodec, IdentityFieldSet, RegistrarInfo, PGP_FINGERPRINT_LEN,
};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::convert::Infallible;

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

pub fn alice_fields() -> IdentityFieldSet {
    IdentityFieldSet::new()
        .with_display("alice")
        .with_email("alice@example.org")
}

pub fn full_fields() -> IdentityFieldSet {
    IdentityFieldSet::new()
        .with_display("Alice")
        .with_legal("Alice Liddell")
        .with_web("https://alice.example")
        .with_matrix("@alice:matrix.org")
        .with_email("alice@example.org")
        .with_pgp_fingerprint((1u8..=20).collect::<Vec<_>>())
        .with_image("ipfs://bafy")
        .with_twitter("@alice")
        .with_discord("alice#0001")
        .with_additional("down the rabbit hole")
}

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(any::<String>())
}

/// Any record `encode` accepts
pub fn arb_field_set() -> impl Strategy<Value = IdentityFieldSet> {
    (
        (text(), text(), text(), text(), text()),
        proptest::option::of(proptest::collection::vec(any::<u8>(), PGP_FINGERPRINT_LEN)),
        (text(), text(), text(), text()),
    )
        .prop_map(
            |(
                (display, legal, web, matrix, email),
                pgp_fingerprint,
                (image, twitter, discord, additional),
            )| IdentityFieldSet {
                display,
                legal,
                web,
                matrix,
                email,
                pgp_fingerprint,
                image,
                twitter,
                discord,
                additional,
            },
        )
}

/// In-memory chain state
#[derive(Debug, Default, Clone)]
pub struct MemoryChain {
    identities: BTreeMap<String, Vec<u8>>,
    registrars: BTreeMap<u32, RegistrarInfo>,
}

impl MemoryChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the canonical encoding of `fields` for `account`
    ///
    /// # Panics
    /// Panics if `fields` does not encode
    #[must_use]
    pub fn with_identity(mut self, account: &str, fields: &IdentityFieldSet) -> Self {
        let record = IdentityCodec::default()
            .encode(fields)
            .expect("fixture identity must encode");
        self.identities
            .insert(account.to_string(), record.into_bytes());
        self
    }

    /// Store arbitrary bytes for `account`
    #[must_use]
    pub fn with_raw_identity(mut self, account: &str, bytes: Vec<u8>) -> Self {
        self.identities.insert(account.to_string(), bytes);
        self
    }

    #[must_use]
    pub fn with_registrar(mut self, index: u32, fields: u64) -> Self {
        self.registrars.insert(
            index,
            RegistrarInfo {
                index,
                account: BOB.to_string(),
                fee: 1_000_000_000,
                fields,
            },
        );
        self
    }
}

impl ChainSource for MemoryChain {
    type Error = Infallible;

    fn identity_bytes(&self, account: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.identities.get(account).cloned())
    }

    fn registrar(&self, index: u32) -> Result<Option<RegistrarInfo>, Self::Error> {
        Ok(self.registrars.get(&index).cloned())
    }
}
