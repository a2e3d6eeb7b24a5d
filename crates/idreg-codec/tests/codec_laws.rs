use idreg_codec::{
    compute_hash, decode_fields, encode, has_changed, hash, CodecError, IdentityFieldSet,
    ValidationError,
};
use idreg_test_utils::{alice_fields, arb_field_set, full_fields};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_alice_wire_layout() {
    let record = encode(&alice_fields()).unwrap();

    let mut expected = vec![0x01, 5 << 2];
    expected.extend_from_slice(b"alice");
    expected.extend_from_slice(&[0x00, 0x00, 0x00]); // legal, web, matrix
    expected.extend_from_slice(&[0x01, 17 << 2]);
    expected.extend_from_slice(b"alice@example.org");
    expected.extend_from_slice(&[0x00; 5]); // pgpFingerprint .. additional

    assert_eq!(record.as_bytes(), &expected[..]);
    assert_eq!(decode_fields(&expected).unwrap(), alice_fields());
}

#[test]
fn test_empty_record_hash_is_stable() {
    let record = encode(&IdentityFieldSet::new()).unwrap();
    assert_eq!(record.as_bytes(), &[0x00; 10]);

    let h1 = hash(&record);
    let h2 = compute_hash(&IdentityFieldSet::new()).unwrap();
    assert_eq!(h1, h2);
    assert_eq!(
        h1.to_string(),
        "0x40772e14b7665a8e7f09de41da09c4191acac132a598e4e363d076e19077057a"
    );
}

#[test]
fn test_full_record_round_trip() {
    let fields = full_fields();
    let record = encode(&fields).unwrap();
    assert_eq!(decode_fields(record.as_bytes()).unwrap(), fields);
}

#[test]
fn test_fingerprint_width_enforced() {
    for len in [0, 19, 21, 32] {
        let fields = alice_fields().with_pgp_fingerprint(vec![0xaa; len]);
        assert_eq!(
            encode(&fields).unwrap_err(),
            CodecError::Validation(ValidationError::FingerprintLength {
                expected: 20,
                actual: len,
            })
        );
        assert!(compute_hash(&fields).is_err());
    }
    let fields = alice_fields().with_pgp_fingerprint(vec![0xaa; 20]);
    assert!(encode(&fields).is_ok());
}

#[test]
fn test_distinct_records_hash_distinctly() {
    let mut seen = HashSet::new();
    for i in 0..500 {
        let by_display = IdentityFieldSet::new().with_display(i.to_string());
        let by_additional = IdentityFieldSet::new().with_additional(i.to_string());
        assert!(seen.insert(compute_hash(&by_display).unwrap()));
        assert!(seen.insert(compute_hash(&by_additional).unwrap()));
    }
}

#[test]
fn test_same_text_in_different_slots_differs() {
    let a = IdentityFieldSet::new().with_web("x");
    let b = IdentityFieldSet::new().with_matrix("x");
    assert_ne!(encode(&a).unwrap(), encode(&b).unwrap());
}

proptest! {
    #[test]
    fn prop_round_trip(fields in arb_field_set()) {
        let record = encode(&fields).unwrap();
        prop_assert_eq!(decode_fields(record.as_bytes()).unwrap(), fields);
    }

    #[test]
    fn prop_encode_deterministic(fields in arb_field_set()) {
        let copy = fields.clone();
        prop_assert_eq!(encode(&fields).unwrap(), encode(&copy).unwrap());
    }

    #[test]
    fn prop_change_detection(f1 in arb_field_set(), f2 in arb_field_set()) {
        let h1 = compute_hash(&f1).unwrap();
        let h2 = compute_hash(&f2).unwrap();

        prop_assert!(!has_changed(None, &h1));
        prop_assert!(!has_changed(Some(&h1), &h1));
        prop_assert_eq!(has_changed(Some(&h1), &h2), f1 != f2);
    }

    #[test]
    fn prop_truncation_always_rejected(fields in arb_field_set(), cut in 1usize..64) {
        let record = encode(&fields).unwrap();
        let keep = record.len().saturating_sub(cut);
        prop_assert!(decode_fields(&record.as_bytes()[..keep]).is_err());
    }
}
