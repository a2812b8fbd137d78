use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::rules::Category;

/// One CSV record as read from disk, cells still raw strings.
///
/// Columns the schema does not know about ride along in `extra` (ordered by
/// header name) so they survive to the output table.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub account: String,
    pub institution: String,
    pub category: String,
    pub is_hidden: Option<String>,
    pub is_pending: Option<String>,
    pub extra: BTreeMap<String, String>,
    pub source_file: String,
}

/// A normalized transaction, decorated in place by the pipeline stages.
///
/// `date` and `amount` are `None` when the raw cell could not be parsed;
/// downstream stages treat that as an explicit missing value, never as zero.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    /// `<provenance-fingerprint>_<n>`, unique within a run.
    pub row_id: String,
    /// Identity hash including the source file. Same-file repeats share it.
    pub provenance_fingerprint: String,
    /// Identity hash excluding the source file. Cross-file copies share it.
    pub content_fingerprint: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: Option<f64>,
    pub account: String,
    pub institution: String,
    /// Category as labeled by the exporting institution.
    pub source_category: String,
    pub is_hidden: bool,
    pub is_pending: bool,
    pub extra: BTreeMap<String, String>,
    pub source_file: String,
    /// Set by the rule engine; `None` until classification runs.
    pub assigned_category: Option<Category>,
}
