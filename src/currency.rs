//! Display-currency formatting.
//!
//! USD values render as `$` plus a thousands-grouped amount with two
//! decimals. The secondary currency is derived from the USD value with a
//! fixed configured rate, rendered with no decimals.

#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    code: String,
    symbol: String,
    rate_per_usd: f64,
}

impl CurrencyFormatter {
    pub fn new(code: &str, symbol: &str, rate_per_usd: f64) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            rate_per_usd,
        }
    }

    /// Currency code for table headers, e.g. "PKR".
    pub fn code(&self) -> &str {
        &self.code
    }

    /// "$50,000.00"
    pub fn format_usd(&self, value: f64) -> String {
        format!("${}", group_thousands(&format!("{value:.2}")))
    }

    /// "Rs 28,000" — USD value converted at the fixed rate, zero decimals.
    pub fn format_secondary(&self, usd_value: f64) -> String {
        let converted = usd_value * self.rate_per_usd;
        format!(
            "{} {}",
            self.symbol,
            group_thousands(&format!("{converted:.0}"))
        )
    }
}

/// Inserts `,` separators into the integer part of an already formatted
/// decimal string.
fn group_thousands(formatted: &str) -> String {
    let (number, sign) = match formatted.strip_prefix('-') {
        Some(rest) => (rest, "-"),
        None => (formatted, ""),
    };
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        let formatter = CurrencyFormatter::new("PKR", "Rs", 280.0);
        assert_eq!(formatter.format_usd(100.0), "$100.00");
        assert_eq!(formatter.format_usd(1234.56), "$1,234.56");
        assert_eq!(formatter.format_usd(50000.0), "$50,000.00");
        assert_eq!(formatter.format_usd(0.0), "$0.00");
        assert_eq!(formatter.format_usd(0.5), "$0.50");
        assert_eq!(formatter.format_usd(1000000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_secondary() {
        let formatter = CurrencyFormatter::new("PKR", "Rs", 280.0);
        assert_eq!(formatter.format_secondary(100.0), "Rs 28,000");
        assert_eq!(formatter.format_secondary(100000.0), "Rs 28,000,000");
        assert_eq!(formatter.format_secondary(0.0), "Rs 0");
    }

    #[test]
    fn test_format_secondary_rounds_to_whole_units() {
        let formatter = CurrencyFormatter::new("PKR", "Rs", 280.0);
        // 1.234 * 280 = 345.52
        assert_eq!(formatter.format_secondary(1.234), "Rs 346");
    }

    #[test]
    fn test_custom_symbol_and_rate() {
        let formatter = CurrencyFormatter::new("INR", "₹", 83.0);
        assert_eq!(formatter.format_secondary(100.0), "₹ 8,300");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456789"), "123,456,789");
        assert_eq!(group_thousands("1234.50"), "1,234.50");
        assert_eq!(group_thousands("-1234.50"), "-1,234.50");
    }
}
