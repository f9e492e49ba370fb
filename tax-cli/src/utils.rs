use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// thousands separators and a leading currency symbol.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .trim_start_matches(['$', '£'])
        .replace(',', "")
}

/// Parses a command-line amount such as `50000`, `50,000.00` or `$1,234.56`.
///
/// Empty input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats `value` with a currency symbol, thousands separators and two
/// decimals, e.g. `$40,922.88`.
pub fn format_money(
    symbol: &str,
    value: Decimal,
) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{rounded:.2}");
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Formats a percentage with two decimals, e.g. `18.15%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value)
}
