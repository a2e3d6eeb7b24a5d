use idreg_codec::{
    CodecConfig, CodecError, IdentityCodec, IdentityField, SupportedFieldDecoder,
    ValidationError, ZeroBitmapPolicy,
};
use idreg_test_utils::alice_fields;
use std::io::Write;

#[test]
fn test_config_file_drives_codec_and_decoder() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_field_len = 8").unwrap();
    writeln!(file, "zero_bitmap = \"literal\"").unwrap();

    let config = CodecConfig::load(file.path()).unwrap();
    assert_eq!(config.max_field_len, Some(8));
    assert_eq!(config.zero_bitmap, ZeroBitmapPolicy::Literal);

    let codec = IdentityCodec::new(config);
    let err = codec.encode(&alice_fields()).unwrap_err();
    assert_eq!(
        err,
        CodecError::Validation(ValidationError::FieldTooLong {
            field: IdentityField::Email,
            limit: 8,
            actual: 17,
        })
    );
    assert_eq!(err.field(), Some(IdentityField::Email));

    let decoder = SupportedFieldDecoder::new(config.zero_bitmap);
    assert!(decoder.decode(0).is_empty());
}

#[test]
fn test_limit_does_not_apply_to_fingerprint() {
    let codec = IdentityCodec::new(CodecConfig::new().with_max_field_len(4));
    let fields = idreg_codec::IdentityFieldSet::new().with_pgp_fingerprint([1u8; 20]);
    assert!(codec.encode(&fields).is_ok());
}
