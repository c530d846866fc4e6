//! Display formatting for prices, market figures and percentages

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Symbol prefix for a reference currency code
///
/// Unknown codes are rendered as the upper-case code followed by a space.
pub fn currency_prefix(currency: &str) -> String {
    let symbol = match currency.to_ascii_lowercase().as_str() {
        "usd" => "$",
        "eur" => "€",
        "gbp" => "£",
        "jpy" | "cny" => "¥",
        "inr" => "₹",
        "krw" => "₩",
        "rub" => "₽",
        "btc" => "₿",
        _ => return format!("{} ", currency.to_ascii_uppercase()),
    };
    symbol.to_string()
}

/// Format a price: grouped thousands, two decimals at most above 1,
/// below 1 up to six decimals or three significant digits, whichever is
/// longer; trailing zeros dropped
pub fn format_price(value: Decimal, currency: &str) -> String {
    let abs = value.abs();
    let dp = price_decimals(abs);
    let rounded = abs
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}",
        sign,
        currency_prefix(currency),
        group_thousands(&rounded.to_string())
    )
}

/// Fraction digits shown for a non-negative price
fn price_decimals(abs: Decimal) -> u32 {
    if abs >= Decimal::ONE {
        return 2;
    }
    if abs.is_zero() {
        return 6;
    }

    // Zeros between the decimal point and the first significant digit
    let mut leading_zeros = 0;
    let mut scaled = abs;
    while scaled < dec!(0.1) {
        scaled *= Decimal::TEN;
        leading_zeros += 1;
    }
    (leading_zeros + 3).max(6)
}

/// Format a large figure with a T/B/M/K suffix and two decimals
pub fn format_large_number(value: Decimal, currency: &str) -> String {
    let abs = value.abs();
    let scaled = [
        (dec!(1000000000000), "T"),
        (dec!(1000000000), "B"),
        (dec!(1000000), "M"),
        (dec!(1000), "K"),
    ]
    .into_iter()
    .find(|(unit, _)| abs >= *unit);

    match scaled {
        Some((unit, suffix)) => {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            let figure = (abs / unit)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{}{}{:.2}{}", sign, currency_prefix(currency), figure, suffix)
        }
        None => format_price(value, currency),
    }
}

/// Format a percentage change: `+2.50%`, `-1.25%`, `N/A` when missing
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => {
            let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            let sign = if rounded > Decimal::ZERO { "+" } else { "" };
            format!("{}{:.2}%", sign, rounded)
        }
        None => "N/A".to_string(),
    }
}

/// Insert `,` separators into the integer part of a plain decimal string
fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_whole() {
        assert_eq!(format_price(dec!(65000), "usd"), "$65,000");
        assert_eq!(format_price(dec!(65000.00), "usd"), "$65,000");
        assert_eq!(format_price(dec!(1234567), "eur"), "€1,234,567");
    }

    #[test]
    fn test_format_price_fraction() {
        assert_eq!(format_price(dec!(3100.255), "usd"), "$3,100.26");
        assert_eq!(format_price(dec!(1.5), "gbp"), "£1.5");
        assert_eq!(format_price(dec!(0.00012345678), "usd"), "$0.000123");
        assert_eq!(format_price(dec!(0.5), "usd"), "$0.5");
    }

    #[test]
    fn test_format_price_small_values() {
        assert_eq!(format_price(dec!(0), "usd"), "$0");
        assert_eq!(format_price(dec!(999.999), "usd"), "$1,000");
        assert_eq!(format_price(dec!(-12.3), "usd"), "-$12.3");
    }

    #[test]
    fn test_format_price_micro_cap_keeps_significant_digits() {
        assert_eq!(format_price(dec!(0.0000001234), "usd"), "$0.000000123");
        assert_eq!(format_price(dec!(0.00000000004567), "usd"), "$0.0000000000457");
        assert_eq!(format_price(dec!(0.00000099996), "usd"), "$0.000001");
    }

    #[test]
    fn test_format_price_unknown_currency() {
        assert_eq!(format_price(dec!(1000), "chf"), "CHF 1,000");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(dec!(1200000000000), "usd"), "$1.20T");
        assert_eq!(format_large_number(dec!(35500000000), "usd"), "$35.50B");
        assert_eq!(format_large_number(dec!(2345678), "eur"), "€2.35M");
        assert_eq!(format_large_number(dec!(1750), "usd"), "$1.75K");
        assert_eq!(format_large_number(dec!(999), "usd"), "$999");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(dec!(2.5))), "+2.50%");
        assert_eq!(format_percent(Some(dec!(-1.254))), "-1.25%");
        assert_eq!(format_percent(Some(dec!(0))), "0.00%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456.78"), "123,456.78");
    }
}
