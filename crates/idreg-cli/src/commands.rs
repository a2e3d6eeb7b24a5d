//! Subcommand bodies
//!
//! Each takes parsed inputs and returns the text to print, so `main` only
//! deals with argument plumbing and I/O.

use anyhow::{Context, Result};
use idreg_codec::{
    diff, has_changed, ContentHash, EncodedRecord, FieldChange, IdentityCodec, IdentityFieldSet,
    SupportedFieldDecoder,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct EncodeOutput {
    record: String,
    hash: ContentHash,
}

#[derive(Debug, Serialize)]
struct DiffOutput {
    changed: bool,
    original: ContentHash,
    current: ContentHash,
    fields: Vec<FieldChange>,
}

/// Read an identity record as JSON from a file, or stdin when `path` is `None`
pub(crate) fn read_fields(path: Option<&Path>) -> Result<IdentityFieldSet> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("cannot read stdin")?,
    };
    parse_fields(&text)
}

pub(crate) fn parse_fields(json: &str) -> Result<IdentityFieldSet> {
    serde_json::from_str(json).context("identity JSON is malformed")
}

pub(crate) fn encode(codec: &IdentityCodec, fields: &IdentityFieldSet) -> Result<String> {
    let record = codec.encode(fields)?;
    tracing::debug!(bytes = record.len(), "record encoded");
    let out = EncodeOutput {
        record: record.to_string(),
        hash: record.hash(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

pub(crate) fn decode(codec: &IdentityCodec, hex: &str) -> Result<String> {
    let record = EncodedRecord::from_hex(hex.trim())?;
    let fields = codec
        .decode_fields(record.as_bytes())
        .with_context(|| format!("cannot decode {} byte record", record.len()))?;
    Ok(serde_json::to_string_pretty(&fields)?)
}

pub(crate) fn hash(hex: &str) -> Result<String> {
    let record = EncodedRecord::from_hex(hex.trim())?;
    Ok(record.hash().to_string())
}

pub(crate) fn diff_records(
    codec: &IdentityCodec,
    original: &IdentityFieldSet,
    current: &IdentityFieldSet,
) -> Result<String> {
    let original_hash = codec
        .compute_hash(original)
        .context("original record does not encode")?;
    let current_hash = codec
        .compute_hash(current)
        .context("current record does not encode")?;
    let out = DiffOutput {
        changed: has_changed(Some(&original_hash), &current_hash),
        original: original_hash,
        current: current_hash,
        fields: diff(original, current),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

pub(crate) fn fields(decoder: &SupportedFieldDecoder, bitmap: u64) -> String {
    let names = decoder.decode_names(bitmap);
    tracing::debug!(bitmap, effective = decoder.effective(bitmap), "bitmap decoded");
    names.join("\n")
}
