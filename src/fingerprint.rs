use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::models::Transaction;

/// Hex characters kept from the SHA-256 digest. Short enough to read in a
/// terminal; at thousands of rows a 20-bit space can collide, and a
/// collision over-merges rather than corrupts totals. Widen here if that
/// trade-off stops holding.
pub const FINGERPRINT_LEN: usize = 5;

/// Serialize the identity-bearing fields of a row in canonical order:
/// named columns first, extra columns sorted by header, source file last
/// (when included). Amount is deliberately absent: it is the quantity the
/// coalescer sums, not part of the row's identity, so a pending/posted
/// split still lands in one group.
fn canonical_fields(tx: &Transaction, include_source: bool) -> String {
    let mut joined = String::new();
    joined.push_str(
        &tx.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    joined.push_str(&tx.description);
    joined.push_str(&tx.account);
    joined.push_str(&tx.institution);
    joined.push_str(&tx.source_category);
    joined.push_str(if tx.is_hidden { "true" } else { "false" });
    joined.push_str(if tx.is_pending { "true" } else { "false" });
    for value in tx.extra.values() {
        joined.push_str(value);
    }
    if include_source {
        joined.push_str(&tx.source_file);
    }
    joined
}

/// Short deterministic hash of a row's normalized fields.
///
/// With `include_source` the result distinguishes otherwise-identical rows
/// from different files; without it, the same transaction exported twice
/// hashes the same regardless of which file it came from.
pub fn fingerprint(tx: &Transaction, include_source: bool) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_fields(tx, include_source).as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..FINGERPRINT_LEN].to_string()
}

/// Compute both fingerprints for every row in the batch.
pub fn add_fingerprints(rows: &mut [Transaction]) {
    for tx in rows.iter_mut() {
        tx.content_fingerprint = fingerprint(tx, false);
        tx.provenance_fingerprint = fingerprint(tx, true);
    }
}

/// Assign `<provenance-fingerprint>_<n>` row ids in batch order, `n`
/// counting occurrences of each fingerprint from 1. Byte-identical rows
/// therefore stay individually addressable until the coalescer runs.
pub fn assign_row_ids(rows: &mut [Transaction]) {
    let mut seen: HashMap<String, u32> = HashMap::new();
    for tx in rows.iter_mut() {
        let count = seen.entry(tx.provenance_fingerprint.clone()).or_insert(0);
        *count += 1;
        tx.row_id = format!("{}_{}", tx.provenance_fingerprint, count);
    }
}
