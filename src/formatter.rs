//! Currency formatting for crypto prices
//!
//! Precision depends on magnitude: two fraction digits from 1 upwards, up to
//! four between 0.01 and 1, and up to eight below that. Digits past the limit
//! are truncated, never rounded up.

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
}

impl Currency {
    /// Currency sign used as prefix
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Output for values that cannot be formatted
    pub fn fallback(&self) -> &'static str {
        match self {
            Currency::Usd => "$0.00",
            Currency::Eur => "€0.00",
        }
    }
}

/// Formats a USD amount, e.g. `$45,000.50`
pub fn format_usd(value: f64) -> String {
    format(value, Currency::Usd)
}

/// Formats a EUR amount, e.g. `€41,500.25`
pub fn format_eur(value: f64) -> String {
    format(value, Currency::Eur)
}

/// Formats an amount in the given currency
pub fn format(value: f64, currency: Currency) -> String {
    if !value.is_finite() {
        return currency.fallback().to_string();
    }

    let (min, max) = fraction_digits(value);
    let Some((negative, digits)) = format_fixed(value, min, max) else {
        return currency.fallback().to_string();
    };
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}", sign, currency.symbol(), digits)
}

/// Formats a plain number with exactly `places` fraction digits
pub fn format_decimal(value: f64, places: u32) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }

    let Some((negative, digits)) = format_fixed(value, places, places) else {
        return "--".to_string();
    };
    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Parses a grouped decimal string such as `1,234.50`
pub fn parse(value: &str) -> Option<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn fraction_digits(value: f64) -> (u32, u32) {
    if value >= 1.0 {
        (2, 2)
    } else if value >= 0.01 {
        (2, 4)
    } else {
        (2, 8)
    }
}

/// Truncates `value` to `max` fraction digits, keeping at least `min`
///
/// Returns whether a minus sign is needed and the grouped digits, or `None`
/// when the scaled value does not fit in a `u128`.
fn format_fixed(value: f64, min: u32, max: u32) -> Option<(bool, String)> {
    let scale = 10u128.checked_pow(max)?;
    // Nudge by a few ulps so exact decimals like 0.29 survive the multiply.
    let scaled = (value.abs() * scale as f64 * (1.0 + 4.0 * f64::EPSILON)).floor();
    if scaled >= u128::MAX as f64 {
        return None;
    }
    let scaled = scaled as u128;

    let integer = scaled / scale;
    let fraction = scaled % scale;

    let mut fraction_text = format!("{:0width$}", fraction, width = max as usize);
    while fraction_text.len() > min as usize && fraction_text.ends_with('0') {
        fraction_text.pop();
    }

    let mut text = group_thousands(integer);
    if !fraction_text.is_empty() {
        text.push('.');
        text.push_str(&fraction_text);
    }

    Some((value < 0.0 && scaled > 0, text))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_large_values() {
        assert_eq!(format_usd(45000.50), "$45,000.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(1.0001), "$1.00");
    }

    #[test]
    fn test_format_usd_small_values() {
        assert_eq!(format_usd(0.5), "$0.50");
        assert_eq!(format_usd(0.29), "$0.29");
        assert_eq!(format_usd(0.0912), "$0.0912");
        assert_eq!(format_usd(0.12345), "$0.1234");
        assert_eq!(format_usd(0.00000845), "$0.00000845");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn test_format_rounds_down() {
        assert_eq!(format_usd(19.999), "$19.99");
        assert_eq!(format_eur(1234.567), "€1,234.56");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(41500.25), "€41,500.25");
        assert_eq!(format(2950.40, Currency::Eur), "€2,950.40");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_usd(f64::NAN), "$0.00");
        assert_eq!(format_eur(f64::INFINITY), "€0.00");
        assert_eq!(format_usd(-12.5), "-$12.50");
    }

    #[test]
    fn test_out_of_range_values_use_fallback() {
        assert_eq!(format_usd(1e40), "$0.00");
        assert_eq!(format_eur(-1e40), "€0.00");
        assert_eq!(format_decimal(1e40, 2), "--");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1.5, 3), "1.500");
        assert_eq!(format_decimal(1234.5678, 2), "1,234.56");
        assert_eq!(format_decimal(7.9, 0), "7");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("1,234.50"), Some(1234.5));
        assert_eq!(parse(" 0.25 "), Some(0.25));
        assert_eq!(parse("abc"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345678), "12,345,678");
    }
}
