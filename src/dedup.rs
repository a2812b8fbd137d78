use std::collections::{HashMap, HashSet};

use crate::error::{Result, TallyError};
use crate::models::Transaction;

/// Column names the grouping operations accept, as they appear in output.
pub const PROVENANCE_COLUMN: &str = "ProvenanceFingerprint";
pub const CONTENT_COLUMN: &str = "ContentFingerprint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Fingerprint including the source file; groups same-file repeats.
    Provenance,
    /// Fingerprint excluding the source file; groups cross-file copies.
    Content,
}

impl GroupKey {
    /// Resolve a configured column name. Anything other than the two
    /// fingerprint columns is a fatal precondition violation, not a fallback.
    pub fn from_column(name: &str) -> Result<Self> {
        match name {
            PROVENANCE_COLUMN => Ok(Self::Provenance),
            CONTENT_COLUMN => Ok(Self::Content),
            other => Err(TallyError::UnknownColumn(other.to_string())),
        }
    }

    fn value<'a>(&self, tx: &'a Transaction) -> &'a str {
        match self {
            Self::Provenance => &tx.provenance_fingerprint,
            Self::Content => &tx.content_fingerprint,
        }
    }
}

fn sum_amounts(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Merge rows sharing the key's fingerprint into one row per partition:
/// amounts sum, every other field keeps the first row's value, and the key
/// itself is preserved. Partitions of one pass through untouched, and
/// first-seen partition order is kept.
///
/// Rows whose key is empty (fingerprints never computed) all land in one
/// partition. That mirrors group-nulls-together semantics and can
/// over-merge unrelated rows; callers are expected to fingerprint first.
pub fn coalesce(rows: Vec<Transaction>, key: GroupKey) -> Vec<Transaction> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Transaction> = Vec::with_capacity(rows.len());
    for tx in rows {
        match index.get(key.value(&tx)) {
            Some(&at) => {
                let kept = &mut out[at];
                kept.amount = sum_amounts(kept.amount, tx.amount);
            }
            None => {
                index.insert(key.value(&tx).to_string(), out.len());
                out.push(tx);
            }
        }
    }
    out
}

/// Keep the first row per key value and discard the rest outright. Used for
/// cross-file copies of the same transaction, which must not be summed.
pub fn drop_duplicates(rows: Vec<Transaction>, key: GroupKey) -> Vec<Transaction> {
    let mut seen: HashSet<String> = HashSet::new();
    rows.into_iter()
        .filter(|tx| seen.insert(key.value(tx).to_string()))
        .collect()
}
