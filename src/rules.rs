//! Keyword tables driving classification.
//!
//! Every table is an ordered list; the first keyword found (by substring
//! match on lower-cased text) decides the outcome. Bump `RULES_VERSION`
//! whenever a table changes so report consumers can tell rule sets apart.

use crate::categorizer::Category;

pub const RULES_VERSION: u32 = 1;

/// Account keywords marking revenue, unless `REVENUE_EXCLUSION` is present.
pub const REVENUE_KEYWORDS: &[&str] = &["revenue", "sales", "income"];
pub const REVENUE_EXCLUSION: &str = "deferred";

/// Checked against account and department text.
pub const COGS_KEYWORDS: &[&str] = &["cogs", "cost of goods", "cost of sales", "cost of revenue"];

/// OpEx buckets in priority order: S&M, then R&D, then G&A.
pub const OPEX_RULES: &[(&str, Category)] = &[
    ("sales", Category::SalesMarketing),
    ("marketing", Category::SalesMarketing),
    ("sales & marketing", Category::SalesMarketing),
    ("s&m", Category::SalesMarketing),
    ("customer success", Category::SalesMarketing),
    ("customer support", Category::SalesMarketing),
    ("sdr", Category::SalesMarketing),
    ("ae", Category::SalesMarketing),
    ("account executive", Category::SalesMarketing),
    ("r&d", Category::ResearchDevelopment),
    ("research", Category::ResearchDevelopment),
    ("development", Category::ResearchDevelopment),
    ("engineering", Category::ResearchDevelopment),
    ("product", Category::ResearchDevelopment),
    ("g&a", Category::GeneralAdministrative),
    ("general", Category::GeneralAdministrative),
    ("administrative", Category::GeneralAdministrative),
    ("finance", Category::GeneralAdministrative),
    ("accounting", Category::GeneralAdministrative),
    ("legal", Category::GeneralAdministrative),
    ("hr", Category::GeneralAdministrative),
    ("human resources", Category::GeneralAdministrative),
    ("facilities", Category::GeneralAdministrative),
];

/// Account keywords that send an otherwise unmatched row to G&A.
pub const GA_FALLBACK_KEYWORDS: &[&str] = &["expense", "payroll"];

pub const COGS_SUBCATEGORIES: &[(&str, &str)] = &[
    ("support", "Customer Support"),
    ("customer success", "Customer Support"),
    ("services", "Professional Services"),
    ("professional services", "Professional Services"),
    ("hosting", "Infrastructure"),
    ("infrastructure", "Infrastructure"),
];

pub const SM_SUBCATEGORIES: &[(&str, &str)] = &[
    ("sdr", "SDRs"),
    ("ae", "AEs"),
    ("account executive", "AEs"),
    ("marketing", "Marketing"),
    ("customer success", "Customer Support"),
    ("support", "Customer Support"),
];

pub const RD_SUBCATEGORIES: &[(&str, &str)] = &[
    ("engineering", "Engineering"),
    ("product", "Product"),
];

pub const GA_SUBCATEGORIES: &[(&str, &str)] = &[
    ("finance", "Finance & Accounting"),
    ("accounting", "Finance & Accounting"),
    ("legal", "Legal"),
    ("hr", "HR"),
    ("human resources", "HR"),
    ("facilities", "Facilities"),
];

/// Account or memo keywords marking personnel cost.
pub const HEADCOUNT_KEYWORDS: &[&str] = &[
    "salary",
    "salaries",
    "wages",
    "payroll",
    "compensation",
    "benefits",
    "bonus",
    "commission",
    "stock",
    "equity",
    "401k",
    "insurance",
    "health",
    "dental",
    "vision",
    "pto",
    "vacation",
    "severance",
    "recruiting",
    "recruitment",
];

/// Header phrases naming a top-level department group in an income
/// statement, matched by containment.
pub const MAIN_DEPARTMENTS: &[&str] = &[
    "general and administrative",
    "general & administrative",
    "g&a",
    "marketing",
    "research & development",
    "research and development",
    "r&d",
    "revenue",
    "sales",
    "cost of revenue",
    "cogs",
];

/// First `(keyword, target)` pair whose keyword occurs in `text`.
pub fn first_match<T: Copy>(table: &[(&str, T)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(kw, _)| text.contains(kw))
        .map(|(_, target)| *target)
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
