//! Display helpers for monetary amounts. Trips keep a single currency; these
//! functions only render numbers and never convert between currencies.

use serde::{Deserialize, Serialize};

const GROUPING_SEPARATOR: char = ',';

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        "BRL" => "R$".into(),
        _ => format!("{} ", code),
    }
}

/// Formats `value` with `precision` decimals and thousands grouping.
pub fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    format!("{}{}{}", sign, group_digits(digits), fraction)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders an amount such as `$1,234.50` or `-€12.00`. Values that round to
/// zero are shown without a sign.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, precision: u8) -> String {
    let scale = 10f64.powi(precision as i32);
    let amount = if (amount * scale).round() == 0.0 {
        0.0
    } else {
        amount
    };
    let body = format_number(amount.abs(), precision);
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code.as_str()), body)
}
