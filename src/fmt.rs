/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = format!("{:.2}", val.abs());
    let negative = val < 0.0 && cents != "0.00";
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Plain number with thousands separators and no currency sign, for
/// statement line items whose unit is unknown.
pub fn amount(val: f64) -> String {
    money(val).replacen('$', "", 1)
}

/// One decimal place and a percent sign: 80.0%
pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
    }

    #[test]
    fn test_money_rounds_tiny_negatives_to_zero() {
        assert_eq!(money(-0.001), "$0.00");
    }

    #[test]
    fn test_amount_and_percent() {
        assert_eq!(amount(-19500.0), "-19,500.00");
        assert_eq!(amount(150000.0), "150,000.00");
        assert_eq!(percent(80.0), "80.0%");
        assert_eq!(percent(75.3333), "75.3%");
    }
}
