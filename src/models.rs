use std::collections::BTreeMap;

use serde::Serialize;

/// One row of a transaction-detail export, after column lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub doc_number: String,
    pub name: String,
    pub account: String,
    pub department: String,
    pub class: String,
    pub amount: f64,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlSubcategory {
    pub name: String,
    pub headcount: f64,
    pub non_headcount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlCategory {
    pub name: String,
    pub total: f64,
    pub headcount: f64,
    pub non_headcount: f64,
    pub subcategories: BTreeMap<String, PlSubcategory>,
}

impl PlCategory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlReport {
    pub revenue: f64,
    pub cogs: PlCategory,
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub opex: BTreeMap<String, PlCategory>,
    pub total_opex: f64,
    pub ebitda: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentData {
    pub department: String,
    pub line_items: BTreeMap<String, f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyReport {
    pub company_name: String,
    pub period: String,
    pub departments: BTreeMap<String, DepartmentData>,
    pub revenue_total: f64,
    pub summary: BTreeMap<String, f64>,
}

/// Where a department's numbers live in the income statement grid.
/// Columns are 0-indexed and the span is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentColumn {
    pub name: String,
    pub start_column: usize,
    pub end_column: usize,
    pub total_column: usize,
    pub rule: &'static str,
}

/// Diagnostics gathered while extracting a quarterly report.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionTrace {
    pub total_rows: usize,
    pub header_row: Vec<String>,
    pub sub_header_row: Vec<String>,
    pub strategy: String,
    pub departments: Vec<DepartmentColumn>,
    pub rows_processed: usize,
    pub values_found: usize,
    pub samples: Vec<String>,
    pub notes: Vec<String>,
}
