//! Content fingerprint and schema commitment.
//!
//! Both functions share a 32-bit rolling recurrence (the DJB2 shape):
//! `h = (h << 5) - h + c`, truncated to 32-bit signed arithmetic at every
//! step, over the UTF-16 code units of the input. This is a fast,
//! collision-prone fingerprint, not a cryptographic hash, and it has no
//! hiding or binding property. It is kept bit-for-bit stable anyway:
//! commitments already recorded on the verification ledger were produced by
//! exactly this recurrence, and a recomputed value must match them.

use crate::schema::DatasetSchema;

/// Prefix tag carried by every schema commitment.
pub const COMMITMENT_TAG: &str = "zk_commitment_";

/// Hex width of a content fingerprint.
const CONTENT_HASH_WIDTH: usize = 16;

/// Hex width of the commitment body that follows the tag.
const COMMITMENT_WIDTH: usize = 64;

/// Fingerprint of raw dataset content.
///
/// Seed 5381; the absolute value is rendered as lowercase hex, left-padded
/// with zeros to 16 characters. Deterministic: identical input always
/// yields an identical string.
pub fn hash_content(raw_text: &str) -> String {
    format!(
        "{:0width$x}",
        rolling_hash(raw_text, 5381),
        width = CONTENT_HASH_WIDTH
    )
}

/// Commitment binding a schema to its content fingerprint.
///
/// The carrier string is
/// `"{column_count}:{row_count}:{content_hash}:{types joined by ','}"`.
/// The same recurrence runs over it from seed 0, and the result is rendered
/// as 64 lowercase hex characters behind [`COMMITMENT_TAG`].
pub fn commit(schema: &DatasetSchema) -> String {
    let types = schema
        .column_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let carrier = format!(
        "{}:{}:{}:{}",
        schema.column_count, schema.row_count, schema.content_hash, types
    );

    format!(
        "{}{:0width$x}",
        COMMITMENT_TAG,
        rolling_hash(&carrier, 0),
        width = COMMITMENT_WIDTH
    )
}

/// The shared recurrence.
///
/// Wrapping i32 arithmetic at each step reproduces the reference
/// truncation; widening before `unsigned_abs` keeps `i32::MIN` from
/// overflowing the absolute value.
fn rolling_hash(data: &str, seed: i32) -> u64 {
    let mut hash = seed;
    for unit in data.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    i64::from(hash).unsigned_abs()
}
