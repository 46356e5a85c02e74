use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LedgerError, Result};

fn currency_symbols() -> &'static Regex {
    static CURRENCY: OnceLock<Regex> = OnceLock::new();
    CURRENCY.get_or_init(|| Regex::new(r"\p{Sc}").expect("currency pattern is valid"))
}

/// Strip separators and currency symbols, returning the cleaned text and
/// whether it was wrapped in parentheses.
fn clean(raw: &str) -> (String, bool) {
    let s = raw.trim().replace(',', "");
    let s = currency_symbols().replace_all(&s, "");
    let s = s.trim();
    match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (inner.trim().to_string(), true),
        None => (s.to_string(), false),
    }
}

/// Parse an accounting amount: `$1,234.56`, `(500)`, `-$50.00`.
///
/// Blank input (or input made only of separators and symbols) is `0`.
/// Anything else that isn't a number is an error.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let (s, negative) = clean(raw);
    if s.is_empty() {
        return Ok(0.0);
    }
    let val: f64 = s
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(raw.trim().to_string()))?;
    if !val.is_finite() {
        return Err(LedgerError::InvalidAmount(raw.trim().to_string()));
    }
    Ok(if negative { -val } else { val })
}

/// Lenient variant used for income statement cells: placeholders (`-`) and
/// unparsable text become `0`.
pub fn parse_amount_or_zero(raw: &str) -> f64 {
    let (s, _) = clean(raw);
    if s == "-" {
        return 0.0;
    }
    parse_amount(raw).unwrap_or(0.0)
}
