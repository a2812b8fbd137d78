use std::path::Path;

use crate::cli::clean::{print_preview, print_summary};
use crate::dedup::GroupKey;
use crate::error::Result;
use crate::pipeline::clean_transactions;
use crate::rules::default_rules;
use crate::settings::load_settings;

const HEADER: &str = "Date,Description,Amount,Account,Institution,Category,Is Hidden,Is Pending";

/// Two overlapping statement windows. January carries a pending/posted
/// split for the grocery run; February re-exports two January lines.
const JANUARY: &str = "\
2024-01-03,PAYCHECK ABC CORP,\"$2,150.00\",Checking,Bank,Paycheck/Salary,No,No
2024-01-05,TRADER JOES #123,(20.00),Checking,Bank,Groceries,No,Yes
2024-01-05,TRADER JOES #123,(25.00),Checking,Bank,Groceries,No,Yes
2024-01-09,CHIPOTLE ORDER,-12.50,Checking,Bank,Fast Food & Convenience,No,No
2024-01-12,ELECTRICITY FROM ROOMMATE,30.00,Venmo,Venmo,Online Payment,No,No
";

const FEBRUARY: &str = "\
2024-01-09,CHIPOTLE ORDER,-12.50,Checking,Bank,Fast Food & Convenience,No,No
2024-01-12,ELECTRICITY FROM ROOMMATE,30.00,Venmo,Venmo,Online Payment,No,No
2024-02-02,MYSTERY VENDOR 88,-9.99,Checking,Bank,,No,No
";

fn write_export(dir: &Path, name: &str, body: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::write(&path, format!("{HEADER}\n{body}"))?;
    Ok(path.to_string_lossy().to_string())
}

pub fn run() -> Result<()> {
    let dir = std::env::temp_dir().join("tally-demo");
    std::fs::create_dir_all(&dir)?;
    let jan = write_export(&dir, "transactions_202401.csv", JANUARY)?;
    let feb = write_export(&dir, "transactions_202402.csv", FEBRUARY)?;

    println!("Sample exports written to {}", dir.display());

    let rules = default_rules();
    let result = clean_transactions(
        &[jan, feb],
        &rules,
        GroupKey::Provenance,
        GroupKey::Content,
    )?;

    print_summary(&result);
    print_preview(&result.rows, &load_settings().output_column, 20);
    Ok(())
}
