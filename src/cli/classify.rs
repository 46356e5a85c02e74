use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categorizer::{classify, Classification};
use crate::error::Result;
use crate::rules::RULES_VERSION;

pub fn run(account: &str, department: &str, class: &str, memo: &str) -> Result<()> {
    println!("{}", format_classification(classify(account, department, class, memo)));
    Ok(())
}

fn format_classification(result: Option<Classification>) -> String {
    let Some(c) = result else {
        return format!(
            "{} no rule matched; this row is left out of the P&L (rules v{RULES_VERSION})",
            "Unclassified:".yellow().bold()
        );
    };
    let mut table = Table::new();
    table.set_header(vec!["Category", "Subcategory", "Headcount"]);
    table.add_row(vec![
        Cell::new(c.category.label()),
        Cell::new(c.subcategory.unwrap_or("-")),
        Cell::new(if c.headcount { "yes" } else { "no" }),
    ]);
    format!("{table}\nrules v{RULES_VERSION}")
}
