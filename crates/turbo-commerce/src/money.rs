//! Price formatting.
//!
//! Amounts arrive as `f64` and are rendered the way an `en-US` browser's
//! currency formatter renders them: the number is first written as its
//! shortest round-trip decimal (`1.005` stays `1.005`, not the
//! `1.00499999...` actually stored), then rounded half away from zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies prices are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Symbol used by the `en-US` locale.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A decimal number rounded to a fixed number of places, kept as digits.
///
/// There is no range limit, so very large floats format the same way a
/// browser prints them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedDecimal {
    /// Sign of the source value; `-0.0` and values rounding to zero keep it.
    pub negative: bool,
    /// Integer digits without grouping, at least `"0"`.
    pub integer: String,
    /// Fraction digits, exactly as many as requested.
    pub fraction: String,
}

impl RoundedDecimal {
    /// Round `value` half away from zero to `places` fraction digits.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64, places: u32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // `Display` for f64 is the shortest round-trip form, never exponential.
        let shortest = value.abs().to_string();
        let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

        let places = places as usize;
        let round_up = frac_part.as_bytes().get(places).is_some_and(|digit| *digit >= b'5');

        let mut digits: Vec<u8> = int_part.bytes().collect();
        digits.extend(frac_part.bytes().take(places));
        digits.resize(int_part.len() + places, b'0');
        if round_up {
            increment_digits(&mut digits);
        }

        let (integer, fraction) = digits.split_at(digits.len() - places);
        Some(Self {
            negative: value.is_sign_negative(),
            integer: String::from_utf8_lossy(integer).into_owned(),
            fraction: String::from_utf8_lossy(fraction).into_owned(),
        })
    }

    /// Render with a currency symbol, `,` grouping and `.` decimal mark.
    pub fn render(&self, symbol: &str) -> String {
        let sign = if self.negative { "-" } else { "" };
        let grouped = group_thousands(&self.integer);
        if self.fraction.is_empty() {
            format!("{sign}{symbol}{grouped}")
        } else {
            format!("{sign}{symbol}{grouped}.{}", self.fraction)
        }
    }
}

/// Add one to an ASCII digit string, growing it on overflow.
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a float amount in the given currency, `en-US` style.
///
/// ```
/// use turbo_commerce::money::{format_decimal, Currency};
/// assert_eq!(format_decimal(19.999, Currency::USD), "$20.00");
/// assert_eq!(format_decimal(-1234.5, Currency::USD), "-$1,234.50");
/// ```
pub fn format_decimal(amount: f64, currency: Currency) -> String {
    let symbol = currency.symbol();
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{symbol}\u{221e}");
    }
    match RoundedDecimal::from_f64(amount, currency.decimal_places()) {
        Some(rounded) => rounded.render(symbol),
        None => format!("{symbol}NaN"),
    }
}
