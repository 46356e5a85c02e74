use crate::categorizer::{classify_transaction, Category, Classification};
use crate::models::{PlCategory, PlReport, PlSubcategory, Transaction};

// ---------------------------------------------------------------------------
// P&L
// ---------------------------------------------------------------------------

/// Fold transactions into a P&L. Rows that match no rule are left out.
pub fn generate_pl_report(transactions: &[Transaction]) -> PlReport {
    let mut report = PlReport {
        cogs: PlCategory::new(Category::Cogs.label()),
        ..Default::default()
    };
    for bucket in Category::OPEX {
        report
            .opex
            .insert(bucket.label().to_string(), PlCategory::new(bucket.label()));
    }

    let mut dropped = 0usize;
    for txn in transactions {
        let Some(class) = classify_transaction(txn) else {
            tracing::debug!(account = %txn.account, "no rule matched, row left out");
            dropped += 1;
            continue;
        };
        match class.category {
            Category::Revenue => report.revenue += txn.amount,
            Category::Cogs => add_to_category(&mut report.cogs, &class, txn.amount),
            bucket => {
                if let Some(cat) = report.opex.get_mut(bucket.label()) {
                    add_to_category(cat, &class, txn.amount);
                }
            }
        }
    }

    finalize_totals(&mut report.cogs);
    for cat in report.opex.values_mut() {
        finalize_totals(cat);
    }
    report.total_opex = report.opex.values().map(|c| c.total).sum();
    report.gross_profit = report.revenue - report.cogs.total;
    report.gross_margin = if report.revenue != 0.0 {
        report.gross_profit / report.revenue * 100.0
    } else {
        0.0
    };
    report.ebitda = report.gross_profit - report.total_opex;

    tracing::info!(
        transactions = transactions.len(),
        dropped,
        revenue = report.revenue,
        ebitda = report.ebitda,
        "P&L generated"
    );
    report
}

/// How many transactions no rule claims.
pub fn count_unclassified(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|t| classify_transaction(t).is_none())
        .count()
}

fn add_to_category(cat: &mut PlCategory, class: &Classification, amount: f64) {
    let sub_name = class.subcategory.unwrap_or("Other");
    let sub = cat
        .subcategories
        .entry(sub_name.to_string())
        .or_insert_with(|| PlSubcategory {
            name: sub_name.to_string(),
            ..Default::default()
        });
    if class.headcount {
        cat.headcount += amount;
        sub.headcount += amount;
    } else {
        cat.non_headcount += amount;
        sub.non_headcount += amount;
    }
}

fn finalize_totals(cat: &mut PlCategory) {
    cat.total = cat.headcount + cat.non_headcount;
    for sub in cat.subcategories.values_mut() {
        sub.total = sub.headcount + sub.non_headcount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(account: &str, department: &str, class: &str, amount: f64, memo: &str) -> Transaction {
        Transaction {
            account: account.to_string(),
            department: department.to_string(),
            class: class.to_string(),
            amount,
            memo: memo.to_string(),
            ..Default::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Sales Revenue", "", "", 1000.0, ""),
            txn("COGS - Hosting", "Infrastructure", "", 200.0, ""),
            txn("Salaries", "Engineering", "", 300.0, ""),
        ]
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = generate_pl_report(&sample());
        assert_eq!(report.revenue, 1000.0);
        assert_eq!(report.cogs.total, 200.0);
        assert_eq!(report.cogs.subcategories["Infrastructure"].total, 200.0);
        assert_eq!(report.opex["R&D"].headcount, 300.0);
        assert_eq!(report.opex["R&D"].non_headcount, 0.0);
        assert_eq!(report.gross_profit, 800.0);
        assert!(close(report.gross_margin, 80.0));
        assert_eq!(report.total_opex, 300.0);
        assert_eq!(report.ebitda, 500.0);
    }

    #[test]
    fn test_all_opex_buckets_present_when_empty() {
        let report = generate_pl_report(&[]);
        assert_eq!(report.opex.len(), 3);
        for key in ["G&A", "R&D", "S&M"] {
            assert_eq!(report.opex[key].name, key);
            assert_eq!(report.opex[key].total, 0.0);
        }
        assert_eq!(report.cogs.name, "COGS");
        assert_eq!(report.total_opex, 0.0);
    }

    #[test]
    fn test_gross_margin_zero_without_revenue() {
        let report = generate_pl_report(&[txn("COGS", "", "", 500.0, "")]);
        assert_eq!(report.revenue, 0.0);
        assert_eq!(report.gross_profit, -500.0);
        assert_eq!(report.gross_margin, 0.0);
    }

    #[test]
    fn test_unclassified_rows_are_dropped() {
        let mut rows = sample();
        rows.push(txn("Rent", "", "", 9999.0, ""));
        rows.push(txn("Deferred Revenue", "", "", 5000.0, ""));
        let report = generate_pl_report(&rows);
        assert_eq!(report, generate_pl_report(&sample()));
        assert_eq!(count_unclassified(&rows), 2);
    }

    #[test]
    fn test_category_totals_match_parts() {
        let rows = vec![
            txn("8100 - S&M Salaries", "Sales", "SDR", 8000.0, "SDR base salary"),
            txn("8100 - S&M Commission", "Sales", "AE", 5000.0, "Q1 sales commission"),
            txn("8200 - S&M Expenses", "Marketing", "Marketing", 3000.0, "Marketing automation"),
            txn("8200 - S&M Expenses", "Sales", "CRM", 1500.0, "CRM subscription"),
            txn("6100 - G&A Expenses", "Finance", "Admin", 500.0, "Office supplies"),
            txn("6300 - G&A Legal", "Legal", "Legal Services", 5000.0, "Legal counsel"),
            txn("5200 - COGS - Salaries", "Customer Support", "Support", 15000.0, ""),
            txn("5100 - COGS - Infrastructure", "Engineering", "Product A", 5000.0, ""),
        ];
        let report = generate_pl_report(&rows);
        let mut cats: Vec<&PlCategory> = report.opex.values().collect();
        cats.push(&report.cogs);
        for cat in cats {
            assert!(close(cat.total, cat.headcount + cat.non_headcount), "{}", cat.name);
            let sub_sum: f64 = cat.subcategories.values().map(|s| s.total).sum();
            assert!(close(sub_sum, cat.total), "{}", cat.name);
            for sub in cat.subcategories.values() {
                assert!(close(sub.total, sub.headcount + sub.non_headcount));
            }
        }
        let opex_sum: f64 = report.opex.values().map(|c| c.total).sum();
        assert!(close(report.total_opex, opex_sum));
        assert_eq!(report.opex["S&M"].headcount, 13000.0);
        assert_eq!(report.opex["S&M"].non_headcount, 4500.0);
        assert_eq!(report.opex["S&M"].subcategories["SDRs"].total, 8000.0);
        assert_eq!(report.opex["S&M"].subcategories["AEs"].total, 5000.0);
        assert_eq!(report.opex["S&M"].subcategories["Other S&M"].total, 1500.0);
        assert_eq!(report.cogs.subcategories["Customer Support"].headcount, 15000.0);
    }

    #[test]
    fn test_negative_amounts_are_summed_as_is() {
        let rows = vec![
            txn("Sales Revenue", "", "", 1000.0, ""),
            txn("Sales Revenue", "", "", -250.0, "refund"),
        ];
        let report = generate_pl_report(&rows);
        assert_eq!(report.revenue, 750.0);
        assert!(close(report.gross_margin, 100.0));
    }

    #[test]
    fn test_rerun_is_identical() {
        let rows = sample();
        let first = generate_pl_report(&rows);
        let second = generate_pl_report(&rows);
        assert_eq!(first, second);
    }
}
