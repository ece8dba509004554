//! Currency-aware parsing of displayed prices.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Separators a currency is conventionally displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub thousands: char,
    pub decimal: char,
}

impl CurrencyFormat {
    pub const DOT_DECIMAL: CurrencyFormat = CurrencyFormat {
        thousands: ',',
        decimal: '.',
    };

    pub fn for_code(code: Option<&str>) -> Self {
        match code.map(str::to_ascii_uppercase).as_deref() {
            Some("EUR") => CurrencyFormat {
                thousands: '.',
                decimal: ',',
            },
            Some("CHF") => CurrencyFormat {
                thousands: '\'',
                decimal: '.',
            },
            _ => Self::DOT_DECIMAL,
        }
    }
}

/// Parses a displayed price such as `"1.299,99 €"` into an amount.
///
/// Everything except digits, the decimal separator and a leading minus is
/// discarded. Returns `None` when the text contains no digits.
pub fn parse_amount(text: &str, currency: Option<&str>) -> Option<Decimal> {
    let format = CurrencyFormat::for_code(currency);

    let mut normalized = String::with_capacity(text.len());
    let mut seen_decimal = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            normalized.push(c);
        } else if c == format.decimal && !seen_decimal {
            normalized.push('.');
            seen_decimal = true;
        } else if c == '-' && normalized.is_empty() {
            normalized.push(c);
        }
    }

    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    // "12," leaves a dangling separator
    let trimmed = normalized.trim_end_matches('.');
    Decimal::from_str(trimmed).ok().map(|d| d.normalize())
}
