use serde::Serialize;

use crate::models::Transaction;
use crate::rules::{
    contains_any, first_match, COGS_KEYWORDS, COGS_SUBCATEGORIES, GA_FALLBACK_KEYWORDS,
    GA_SUBCATEGORIES, HEADCOUNT_KEYWORDS, MAIN_DEPARTMENTS, OPEX_RULES, RD_SUBCATEGORIES,
    REVENUE_EXCLUSION, REVENUE_KEYWORDS, SM_SUBCATEGORIES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Revenue,
    Cogs,
    SalesMarketing,
    ResearchDevelopment,
    GeneralAdministrative,
}

impl Category {
    pub const OPEX: [Category; 3] = [
        Category::GeneralAdministrative,
        Category::ResearchDevelopment,
        Category::SalesMarketing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Cogs => "COGS",
            Self::SalesMarketing => "S&M",
            Self::ResearchDevelopment => "R&D",
            Self::GeneralAdministrative => "G&A",
        }
    }

    fn subcategory_rules(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Revenue => &[],
            Self::Cogs => COGS_SUBCATEGORIES,
            Self::SalesMarketing => SM_SUBCATEGORIES,
            Self::ResearchDevelopment => RD_SUBCATEGORIES,
            Self::GeneralAdministrative => GA_SUBCATEGORIES,
        }
    }

    fn fallback_subcategory(&self) -> Option<&'static str> {
        match self {
            Self::Revenue => None,
            Self::Cogs => Some("Other COGS"),
            Self::SalesMarketing => Some("Other S&M"),
            Self::ResearchDevelopment => Some("Other R&D"),
            Self::GeneralAdministrative => Some("Other G&A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    /// `None` for revenue, which is not broken down.
    pub subcategory: Option<&'static str>,
    pub headcount: bool,
}

/// Classify one row from its free-text fields. `None` means the row matches
/// no rule and is left out of the P&L.
pub fn classify(account: &str, department: &str, class: &str, memo: &str) -> Option<Classification> {
    let account = account.to_lowercase();
    let department = department.to_lowercase();
    let class = class.to_lowercase();
    let memo = memo.to_lowercase();

    let headcount = contains_any(&format!("{account} {memo}"), HEADCOUNT_KEYWORDS);

    let category = if is_revenue(&account) {
        Category::Revenue
    } else if contains_any(&format!("{account} {department}"), COGS_KEYWORDS) {
        Category::Cogs
    } else {
        opex_bucket(&account, &department, &class)?
    };

    let sub_text = format!("{department} {class} {account}");
    let subcategory = first_match(category.subcategory_rules(), &sub_text)
        .or_else(|| category.fallback_subcategory());

    Some(Classification {
        category,
        subcategory,
        headcount,
    })
}

pub fn classify_transaction(txn: &Transaction) -> Option<Classification> {
    classify(&txn.account, &txn.department, &txn.class, &txn.memo)
}

fn is_revenue(account: &str) -> bool {
    contains_any(account, REVENUE_KEYWORDS) && !account.contains(REVENUE_EXCLUSION)
}

fn opex_bucket(account: &str, department: &str, class: &str) -> Option<Category> {
    let text = format!("{account} {department} {class}");
    first_match(OPEX_RULES, &text).or_else(|| {
        contains_any(account, GA_FALLBACK_KEYWORDS).then_some(Category::GeneralAdministrative)
    })
}

/// Whether an income statement header names a top-level department group.
pub fn is_main_department(header: &str) -> bool {
    let header = header.trim().to_lowercase();
    !header.is_empty() && contains_any(&header, MAIN_DEPARTMENTS)
}
