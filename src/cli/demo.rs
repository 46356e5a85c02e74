use crate::error::Result;
use crate::importer::ImportSummary;
use crate::models::Transaction;
use crate::settings::load_settings;

struct DemoTxn {
    date: &'static str,
    txn_type: &'static str,
    doc_number: &'static str,
    name: &'static str,
    account: &'static str,
    department: &'static str,
    class: &'static str,
    amount: f64,
    memo: &'static str,
}

#[rustfmt::skip]
const SAMPLE: &[DemoTxn] = &[
    DemoTxn { date: "2024-01-15", txn_type: "Journal", doc_number: "JE-2024-001", name: "Acme Corp", account: "4000 - Revenue", department: "Sales", class: "Product A", amount: 100000.00, memo: "Monthly recurring revenue" },
    DemoTxn { date: "2024-01-15", txn_type: "Journal", doc_number: "JE-2024-002", name: "Tech Services", account: "4000 - Revenue", department: "Sales", class: "Product B", amount: 50000.00, memo: "Annual subscription" },
    DemoTxn { date: "2024-01-20", txn_type: "Bill", doc_number: "BILL-2024-100", name: "AWS", account: "5100 - COGS - Infrastructure", department: "Engineering", class: "Product A", amount: 5000.00, memo: "Cloud hosting costs" },
    DemoTxn { date: "2024-01-20", txn_type: "Bill", doc_number: "BILL-2024-101", name: "Google Cloud", account: "5100 - COGS - Infrastructure", department: "Engineering", class: "Product B", amount: 3000.00, memo: "Infrastructure" },
    DemoTxn { date: "2024-01-25", txn_type: "Payroll", doc_number: "PR-2024-01", name: "John Doe", account: "5200 - COGS - Salaries", department: "Customer Support", class: "Support", amount: 15000.00, memo: "Customer support salary" },
    DemoTxn { date: "2024-01-25", txn_type: "Payroll", doc_number: "PR-2024-02", name: "Jane Smith", account: "5200 - COGS - Salaries", department: "Customer Support", class: "Support", amount: 14000.00, memo: "Customer support salary" },
    DemoTxn { date: "2024-01-30", txn_type: "Bill", doc_number: "BILL-2024-102", name: "Office Supplies Co", account: "6100 - G&A Expenses", department: "Finance", class: "Admin", amount: 500.00, memo: "Office supplies" },
    DemoTxn { date: "2024-01-30", txn_type: "Payroll", doc_number: "PR-2024-03", name: "Bob Johnson", account: "6200 - G&A Salaries", department: "Finance", class: "Accounting", amount: 12000.00, memo: "Accounting manager salary" },
    DemoTxn { date: "2024-01-30", txn_type: "Payroll", doc_number: "PR-2024-04", name: "Alice Williams", account: "6200 - G&A Salaries", department: "HR", class: "Human Resources", amount: 11000.00, memo: "HR coordinator salary" },
    DemoTxn { date: "2024-02-01", txn_type: "Payroll", doc_number: "PR-2024-05", name: "Charlie Brown", account: "7100 - R&D Salaries", department: "Engineering", class: "Product", amount: 18000.00, memo: "Software engineer salary" },
    DemoTxn { date: "2024-02-01", txn_type: "Payroll", doc_number: "PR-2024-06", name: "Diana Prince", account: "7100 - R&D Salaries", department: "Engineering", class: "Product", amount: 17000.00, memo: "Software engineer salary" },
    DemoTxn { date: "2024-02-01", txn_type: "Payroll", doc_number: "PR-2024-07", name: "Ethan Hunt", account: "7100 - R&D Salaries", department: "Product", class: "Product Management", amount: 16000.00, memo: "Product manager salary" },
    DemoTxn { date: "2024-02-05", txn_type: "Bill", doc_number: "BILL-2024-103", name: "GitHub", account: "7200 - R&D Expenses", department: "Engineering", class: "Development", amount: 500.00, memo: "Development tools" },
    DemoTxn { date: "2024-02-05", txn_type: "Bill", doc_number: "BILL-2024-104", name: "AWS", account: "7200 - R&D Expenses", department: "Engineering", class: "Development", amount: 2000.00, memo: "Development infrastructure" },
    DemoTxn { date: "2024-02-10", txn_type: "Payroll", doc_number: "PR-2024-08", name: "Frank Castle", account: "8100 - S&M Salaries", department: "Sales", class: "SDR", amount: 8000.00, memo: "SDR base salary" },
    DemoTxn { date: "2024-02-10", txn_type: "Payroll", doc_number: "PR-2024-09", name: "Grace Hopper", account: "8100 - S&M Salaries", department: "Sales", class: "AE", amount: 10000.00, memo: "Account executive salary" },
    DemoTxn { date: "2024-02-10", txn_type: "Payroll", doc_number: "PR-2024-10", name: "Henry Ford", account: "8100 - S&M Salaries", department: "Marketing", class: "Marketing", amount: 12000.00, memo: "Marketing manager salary" },
    DemoTxn { date: "2024-02-10", txn_type: "Commission", doc_number: "COMM-2024-01", name: "Grace Hopper", account: "8100 - S&M Commission", department: "Sales", class: "AE", amount: 5000.00, memo: "Q1 sales commission" },
    DemoTxn { date: "2024-02-15", txn_type: "Bill", doc_number: "BILL-2024-105", name: "HubSpot", account: "8200 - S&M Expenses", department: "Marketing", class: "Marketing", amount: 3000.00, memo: "Marketing automation" },
    DemoTxn { date: "2024-02-15", txn_type: "Bill", doc_number: "BILL-2024-106", name: "LinkedIn", account: "8200 - S&M Expenses", department: "Marketing", class: "Advertising", amount: 2000.00, memo: "LinkedIn ads" },
    DemoTxn { date: "2024-02-20", txn_type: "Bill", doc_number: "BILL-2024-107", name: "Salesforce", account: "8200 - S&M Expenses", department: "Sales", class: "CRM", amount: 1500.00, memo: "CRM subscription" },
    DemoTxn { date: "2024-02-20", txn_type: "Bill", doc_number: "BILL-2024-108", name: "Wilson Sonsini", account: "6300 - G&A Legal", department: "Legal", class: "Legal Services", amount: 5000.00, memo: "Legal counsel" },
    DemoTxn { date: "2024-02-25", txn_type: "Bill", doc_number: "BILL-2024-109", name: "WeWork", account: "6400 - G&A Facilities", department: "Facilities", class: "Office", amount: 8000.00, memo: "Office rent" },
    DemoTxn { date: "2024-02-25", txn_type: "Bill", doc_number: "BILL-2024-110", name: "PG&E", account: "6400 - G&A Facilities", department: "Facilities", class: "Utilities", amount: 1000.00, memo: "Electricity and utilities" },
];

/// Sample transaction-detail rows covering every category.
pub fn sample_transactions() -> Vec<Transaction> {
    SAMPLE
        .iter()
        .map(|t| Transaction {
            date: t.date.to_string(),
            txn_type: t.txn_type.to_string(),
            doc_number: t.doc_number.to_string(),
            name: t.name.to_string(),
            account: t.account.to_string(),
            department: t.department.to_string(),
            class: t.class.to_string(),
            amount: t.amount,
            memo: t.memo.to_string(),
        })
        .collect()
}

pub fn run(json: bool) -> Result<()> {
    let settings = load_settings();
    let transactions = sample_transactions();
    let summary = ImportSummary {
        rows: transactions.len(),
        bad_amounts: 0,
    };
    super::pnl::print_pnl(&transactions, &summary, super::wants_json(json, &settings))
}
