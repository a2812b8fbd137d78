use std::collections::BTreeSet;
use std::path::Path;

use crate::dedup::{self, GroupKey, CONTENT_COLUMN, PROVENANCE_COLUMN};
use crate::error::Result;
use crate::fingerprint::{add_fingerprints, assign_row_ids};
use crate::models::Transaction;
use crate::normalize;
use crate::reader;
use crate::rules::RuleSet;

/// The cleaned table plus per-stage counts for reporting.
pub struct CleanResult {
    pub rows: Vec<Transaction>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub rows_read: usize,
    /// Same-file repeats collapsed by the sum-merge.
    pub rows_merged: usize,
    /// Cross-file copies discarded outright.
    pub rows_dropped: usize,
}

/// Full pipeline: read, normalize, fingerprint, assign ids, merge
/// same-file repeats, drop cross-file copies, classify.
///
/// Each run is independent; feeding the same files twice produces the same
/// table, ids included.
pub fn clean_transactions(
    paths: &[String],
    rules: &RuleSet,
    merge_key: GroupKey,
    dedupe_key: GroupKey,
) -> Result<CleanResult> {
    let (raw, stats) = reader::read_transactions(paths)?;

    let mut rows: Vec<Transaction> = raw.iter().map(normalize::normalize).collect();
    add_fingerprints(&mut rows);
    assign_row_ids(&mut rows);

    let rows_read = rows.len();
    let rows = dedup::coalesce(rows, merge_key);
    let rows_merged = rows_read - rows.len();

    let before_drop = rows.len();
    let mut rows = dedup::drop_duplicates(rows, dedupe_key);
    let rows_dropped = before_drop - rows.len();

    rules.classify_batch(&mut rows);

    Ok(CleanResult {
        rows,
        files_read: stats.files_read,
        files_skipped: stats.files_skipped,
        rows_read,
        rows_merged,
        rows_dropped,
    })
}

/// Write the cleaned table to a CSV file: original columns, extras (union
/// of headers across rows, sorted), source file, both fingerprints, and
/// the assigned-category column under the configured name. Row ids lead.
pub fn write_csv(rows: &[Transaction], path: &Path, category_column: &str) -> Result<()> {
    let extra_headers: BTreeSet<&str> = rows
        .iter()
        .flat_map(|tx| tx.extra.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec![
        "RowID",
        "Date",
        "Description",
        "Amount",
        "Account",
        "Institution",
        "Category",
        "Is Hidden",
        "Is Pending",
    ];
    header.extend(extra_headers.iter().copied());
    header.extend([
        "SourceFile",
        PROVENANCE_COLUMN,
        CONTENT_COLUMN,
        category_column,
    ]);
    wtr.write_record(&header)?;

    for tx in rows {
        let mut record = vec![
            tx.row_id.clone(),
            tx.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            tx.description.clone(),
            tx.amount.map(|a| a.to_string()).unwrap_or_default(),
            tx.account.clone(),
            tx.institution.clone(),
            tx.source_category.clone(),
            tx.is_hidden.to_string(),
            tx.is_pending.to_string(),
        ];
        for key in &extra_headers {
            record.push(tx.extra.get(*key).cloned().unwrap_or_default());
        }
        record.push(tx.source_file.clone());
        record.push(tx.provenance_fingerprint.clone());
        record.push(tx.content_fingerprint.clone());
        record.push(
            tx.assigned_category
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{default_rules, Category};

    const HEADER: &str =
        "Date,Description,Amount,Account,Institution,Category,Is Hidden,Is Pending";

    fn write_export(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
        path.to_string_lossy().to_string()
    }

    fn run(paths: &[String]) -> CleanResult {
        clean_transactions(
            paths,
            &default_rules(),
            GroupKey::Provenance,
            GroupKey::Content,
        )
        .unwrap()
    }

    #[test]
    fn test_same_row_in_two_files_survives_once() {
        let dir = tempfile::tempdir().unwrap();
        let row = "2024-01-05,TRADER JOES #123,-45.00,Checking,Bank,Groceries,No,No\n";
        let jan = write_export(dir.path(), "transactions_jan.csv", row);
        let feb = write_export(dir.path(), "transactions_feb.csv", row);

        let result = run(&[jan, feb]);
        assert_eq!(result.rows_read, 2);
        assert_eq!(result.rows_merged, 0);
        assert_eq!(result.rows_dropped, 1);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].amount, Some(-45.0));
        assert_eq!(result.rows[0].assigned_category, Some(Category::Groceries));
    }

    #[test]
    fn test_pending_posted_split_sums_within_file() {
        let dir = tempfile::tempdir().unwrap();
        let jan = write_export(
            dir.path(),
            "transactions_jan.csv",
            "2024-01-05,TRADER JOES #123,-20.00,Checking,Bank,Groceries,No,No\n\
             2024-01-05,TRADER JOES #123,-25.00,Checking,Bank,Groceries,No,No\n",
        );

        let result = run(&[jan]);
        assert_eq!(result.rows_merged, 1);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].amount, Some(-45.0));
        assert_eq!(result.rows[0].assigned_category, Some(Category::Groceries));
    }

    #[test]
    fn test_merged_file_matches_single_export_across_files() {
        // the january export lists the split, february lists the settled
        // line; exactly one row survives and it is the first-read copy
        let dir = tempfile::tempdir().unwrap();
        let jan = write_export(
            dir.path(),
            "transactions_202401.csv",
            "2024-01-05,TRADER JOES #123,-20.00,Checking,Bank,Groceries,No,No\n\
             2024-01-05,TRADER JOES #123,-25.00,Checking,Bank,Groceries,No,No\n",
        );
        let feb = write_export(
            dir.path(),
            "transactions_202402.csv",
            "2024-01-05,TRADER JOES #123,-45.00,Checking,Bank,Groceries,No,No\n",
        );

        let result = run(&[jan, feb]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].amount, Some(-45.0));
        assert_eq!(result.rows[0].source_file, "transactions_202401.csv");
    }

    #[test]
    fn test_repeated_runs_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let jan = write_export(
            dir.path(),
            "transactions_jan.csv",
            "2024-01-05,TRADER JOES #123,-45.00,Checking,Bank,Groceries,No,No\n\
             2024-01-06,CHIPOTLE ORDER,-12.50,Checking,Bank,Fast Food,No,No\n",
        );

        let first = run(std::slice::from_ref(&jan));
        let second = run(std::slice::from_ref(&jan));
        assert_eq!(first.rows.len(), second.rows.len());
        for (a, b) in first.rows.iter().zip(&second.rows) {
            assert_eq!(a.row_id, b.row_id);
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.assigned_category, b.assigned_category);
        }
    }

    #[test]
    fn test_classification_via_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let jan = write_export(
            dir.path(),
            "transactions_jan.csv",
            "2024-01-05,CHIPOTLE ORDER,-12.50,Checking,Bank,Fast Food,No,No\n\
             2024-01-06,ELECTRICITY FROM ROOMMATE,30.00,Venmo,Venmo,Online Payment,No,No\n\
             2024-01-07,PAYCHECK ABC CORP,1500.00,Checking,Bank,Paycheck/Salary,No,No\n\
             2024-01-08,MYSTERY VENDOR,-9.99,Checking,Bank,,No,No\n",
        );

        let result = run(&[jan]);
        let categories: Vec<_> = result
            .rows
            .iter()
            .map(|r| r.assigned_category.unwrap())
            .collect();
        assert_eq!(
            categories,
            vec![
                Category::DiningQuickBites,
                Category::ExpenseReimbursements,
                Category::Salary,
                Category::UncategorizedSpending,
            ]
        );
    }

    #[test]
    fn test_write_csv_round_trips_headers() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let jan = write_export(
            dir.path(),
            "transactions_jan.csv",
            "2024-01-05,TRADER JOES #123,-45.00,Checking,Bank,Groceries,No,No\n",
        );
        let result = run(&[jan]);

        let out = dir.path().join("cleaned.csv");
        write_csv(&result.rows, &out, "Smarter Category")?;

        let mut rdr = csv::Reader::from_path(&out)?;
        let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        assert!(headers.contains(&"RowID".to_string()));
        assert!(headers.contains(&"ProvenanceFingerprint".to_string()));
        assert!(headers.contains(&"Smarter Category".to_string()));

        let record = rdr.records().next().unwrap()?;
        let category_idx = headers.iter().position(|h| h == "Smarter Category").unwrap();
        assert_eq!(&record[category_idx], "Groceries");
        Ok(())
    }
}
