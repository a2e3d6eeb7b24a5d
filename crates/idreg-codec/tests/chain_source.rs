use idreg_codec::{
    compute_hash, fetch_identity, fetch_supported_fields, CodecConfig, CodecError, DecodeError,
    FetchError, IdentityCodec, IdentityField, IdentityFieldSet, RegistrarField,
    SupportedFieldDecoder, ValidationError, ZeroBitmapPolicy,
};
use idreg_test_utils::{alice_fields, MemoryChain, ALICE, BOB};
use std::collections::BTreeSet;

#[test]
fn test_fetch_identity_baselines_on_chain_bytes() {
    let chain = MemoryChain::new().with_identity(ALICE, &alice_fields());
    let codec = IdentityCodec::default();

    let loaded = fetch_identity(&chain, &codec, ALICE).unwrap();
    assert_eq!(loaded.fields, alice_fields());
    assert_eq!(
        loaded.snapshot.original(),
        Some(&compute_hash(&alice_fields()).unwrap())
    );
    assert!(!loaded.snapshot.has_changes(&codec, &loaded.fields).unwrap());
}

#[test]
fn test_fetch_identity_without_record_has_no_baseline() {
    let chain = MemoryChain::new().with_identity(ALICE, &alice_fields());
    let codec = IdentityCodec::default();

    let loaded = fetch_identity(&chain, &codec, BOB).unwrap();
    assert_eq!(loaded.fields, IdentityFieldSet::new());
    assert_eq!(loaded.snapshot.original(), None);

    let typed = IdentityFieldSet::new().with_display("bob");
    assert!(!loaded.snapshot.has_changes(&codec, &typed).unwrap());
}

#[test]
fn test_fetch_identity_surfaces_decode_errors() {
    let chain = MemoryChain::new().with_raw_identity(ALICE, vec![0x01, 0x14, b'a']);
    let err = fetch_identity(&chain, &IdentityCodec::default(), ALICE).unwrap_err();
    match err {
        FetchError::Codec(CodecError::Decode(DecodeError::Truncated { offset, .. })) => {
            assert_eq!(offset, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fetch_identity_applies_length_limit() {
    let chain = MemoryChain::new().with_identity(ALICE, &alice_fields());

    let strict = IdentityCodec::new(CodecConfig::new().with_max_field_len(8));
    let err = fetch_identity(&chain, &strict, ALICE).unwrap_err();
    assert!(matches!(
        err,
        FetchError::Codec(CodecError::Validation(ValidationError::FieldTooLong {
            field: IdentityField::Email,
            limit: 8,
            actual: 17,
        }))
    ));

    // a record that loads under a limit is unchanged until edited
    let roomy = IdentityCodec::new(CodecConfig::new().with_max_field_len(17));
    let loaded = fetch_identity(&chain, &roomy, ALICE).unwrap();
    assert!(!loaded.snapshot.has_changes(&roomy, &loaded.fields).unwrap());
}

#[test]
fn test_fetch_supported_fields() {
    let chain = MemoryChain::new()
        .with_registrar(0, 0)
        .with_registrar(1, 0b1_0001_0001);
    let decoder = SupportedFieldDecoder::default();

    let all = fetch_supported_fields(&chain, &decoder, 0).unwrap();
    assert_eq!(all, RegistrarField::ALL.into_iter().collect::<BTreeSet<_>>());

    let some = fetch_supported_fields(&chain, &decoder, 1).unwrap();
    assert_eq!(
        some,
        BTreeSet::from([
            RegistrarField::Display,
            RegistrarField::Email,
            RegistrarField::Github,
        ])
    );

    let literal = SupportedFieldDecoder::new(ZeroBitmapPolicy::Literal);
    assert!(fetch_supported_fields(&chain, &literal, 0).unwrap().is_empty());
}

#[test]
fn test_fetch_supported_fields_unknown_registrar() {
    let chain = MemoryChain::new();
    let err = fetch_supported_fields(&chain, &SupportedFieldDecoder::default(), 7).unwrap_err();
    assert!(matches!(err, FetchError::UnknownRegistrar(7)));
    assert_eq!(err.to_string(), "no registrar at index 7");
}
