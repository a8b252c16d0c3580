//! Amount and count display formatting

use payweb_utils::format_number;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Currency shown with the `원` suffix instead of its code
const HOME_CURRENCY: &str = "KRW";

/// Numeric value of an amount string, used for ordering.
///
/// Blank counts as zero; anything that is not a finite number is `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Korean locale number: grouped thousands, at most three fraction digits
pub fn format_decimal(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let source = if trimmed.is_empty() { "0" } else { trimmed };
    let value = Decimal::from_str(source)
        .or_else(|_| Decimal::from_scientific(source))
        .ok()?;
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    Some(format_number(rounded))
}

/// Amount cell text, e.g. `15,000원` or `12.5 USD`; unparseable input as-is
pub fn format_amount(raw: &str, currency: &str) -> String {
    let number = match format_decimal(raw) {
        Some(number) => number,
        None => return raw.to_string(),
    };
    let currency = currency.trim();
    if currency.is_empty() || currency.eq_ignore_ascii_case(HOME_CURRENCY) {
        format!("{}원", number)
    } else {
        format!("{} {}", number, currency)
    }
}

/// Record count, e.g. `1,234건`
pub fn format_count(count: usize) -> String {
    format!("{}건", format_number(count))
}
