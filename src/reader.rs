use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::{Result, TallyError};
use crate::models::RawRow;

/// Columns every export file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "Description",
    "Amount",
    "Account",
    "Institution",
    "Category",
];

const FLAG_COLUMNS: &[&str] = &["Is Hidden", "Is Pending"];

#[derive(Debug, Default)]
pub struct ReadStats {
    pub files_read: usize,
    pub files_skipped: usize,
}

/// Expand the given paths into a sorted, de-duplicated file list. A
/// directory contributes every `*.csv` directly inside it. Sorting by path
/// keeps ingestion order deterministic across runs.
pub fn collect_files(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for raw in paths {
        let path = PathBuf::from(raw);
        if path.is_dir() {
            for entry in std::fs::read_dir(&path)? {
                let candidate = entry?.path();
                if candidate
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                {
                    files.push(candidate);
                }
            }
        } else {
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<unnamed>")
        .to_string()
}

/// Parse one export file into raw rows. Fails on open/parse errors and on a
/// missing required column; the caller decides whether that sinks the batch.
pub fn read_file(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(TallyError::MissingColumn {
                file: file_label(path),
                column: required.to_string(),
            });
        }
    }

    let position = |name: &str| headers.iter().position(|h| h == name);
    let idx_date = position("Date");
    let idx_desc = position("Description");
    let idx_amount = position("Amount");
    let idx_account = position("Account");
    let idx_institution = position("Institution");
    let idx_category = position("Category");
    let idx_hidden = position("Is Hidden");
    let idx_pending = position("Is Pending");

    let source_file = file_label(path);
    let mut rows = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else { continue };
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
        };

        let mut extra = BTreeMap::new();
        for (i, header) in headers.iter().enumerate() {
            let known = REQUIRED_COLUMNS.contains(&header.as_str())
                || FLAG_COLUMNS.contains(&header.as_str());
            if !known {
                if let Some(value) = record.get(i) {
                    extra.insert(header.clone(), value.to_string());
                }
            }
        }

        rows.push(RawRow {
            date: cell(idx_date),
            description: cell(idx_desc),
            amount: cell(idx_amount),
            account: cell(idx_account),
            institution: cell(idx_institution),
            category: cell(idx_category),
            is_hidden: idx_hidden.and_then(|i| record.get(i)).map(str::to_string),
            is_pending: idx_pending.and_then(|i| record.get(i)).map(str::to_string),
            extra,
            source_file: source_file.clone(),
        });
    }
    Ok(rows)
}

/// Read every file, tagging rows with their source. A file that cannot be
/// read or lacks a required column is skipped with a warning; one bad
/// export never sinks the batch.
pub fn read_transactions(paths: &[String]) -> Result<(Vec<RawRow>, ReadStats)> {
    let files = collect_files(paths)?;
    let mut rows = Vec::new();
    let mut stats = ReadStats::default();
    for file in &files {
        match read_file(file) {
            Ok(mut file_rows) => {
                stats.files_read += 1;
                rows.append(&mut file_rows);
            }
            Err(err) => {
                stats.files_skipped += 1;
                eprintln!(
                    "{} skipping {}: {err}",
                    "warning:".yellow().bold(),
                    file.display()
                );
            }
        }
    }
    Ok((rows, stats))
}
