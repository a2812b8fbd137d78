use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::dedup::GroupKey;
use crate::error::Result;
use crate::fmt;
use crate::models::Transaction;
use crate::pipeline::{clean_transactions, write_csv, CleanResult};
use crate::rules::default_rules;
use crate::settings::load_settings;

pub struct CleanArgs {
    pub paths: Vec<String>,
    pub output: Option<String>,
    pub column: Option<String>,
    pub merge_key: String,
    pub dedupe_key: String,
    pub limit: usize,
}

pub fn run(args: CleanArgs) -> Result<()> {
    let settings = load_settings();
    let paths = if args.paths.is_empty() {
        vec![settings.data_dir.clone()]
    } else {
        args.paths
    };
    let merge_key = GroupKey::from_column(&args.merge_key)?;
    let dedupe_key = GroupKey::from_column(&args.dedupe_key)?;
    let column = args.column.unwrap_or(settings.output_column);

    let rules = default_rules();
    let result = clean_transactions(&paths, &rules, merge_key, dedupe_key)?;

    print_summary(&result);
    print_preview(&result.rows, &column, args.limit);

    if let Some(output) = args.output {
        write_csv(&result.rows, Path::new(&output), &column)?;
        println!("Wrote {} rows to {output}", result.rows.len());
    }
    Ok(())
}

pub(crate) fn print_summary(result: &CleanResult) {
    let files = format!(
        "{} file(s) read, {} skipped",
        result.files_read, result.files_skipped
    );
    println!("{}", files.bold());
    println!(
        "{} rows read, {} merged within files, {} dropped across files, {} remaining",
        result.rows_read,
        result.rows_merged,
        result.rows_dropped,
        result.rows.len()
    );
}

pub(crate) fn print_preview(rows: &[Transaction], column: &str, limit: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        "RowID",
        "Date",
        "Description",
        "Amount",
        "Account",
        column,
    ]);
    for tx in rows.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&tx.row_id),
            Cell::new(fmt::date_opt(tx.date)),
            Cell::new(&tx.description),
            Cell::new(fmt::money_opt(tx.amount)),
            Cell::new(&tx.account),
            Cell::new(
                tx.assigned_category
                    .map(|c| c.label())
                    .unwrap_or_default(),
            ),
        ]);
    }
    println!("{table}");
    if rows.len() > limit {
        println!("... and {} more rows", rows.len() - limit);
    }
}
