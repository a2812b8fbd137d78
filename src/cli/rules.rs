use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::rules::default_rules;

pub fn run() -> Result<()> {
    let rules = default_rules();

    let mut table = Table::new();
    table.set_header(vec!["Order", "Rule"]);
    for (i, rule) in rules.rules().iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(&rule.description)]);
    }
    table.add_row(vec![
        Cell::new(rules.rules().len() + 1),
        Cell::new(&rules.fallback().description),
    ]);
    println!("Classification rules (first match wins)\n{table}");
    Ok(())
}
