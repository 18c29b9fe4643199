//! Price formatting for page scripts.

use turbo_commerce::{format_decimal, Currency};

/// Locale prices are rendered in.
pub const LOCALE: &str = "en-US";

/// Currency prices are rendered in.
pub const CURRENCY: Currency = Currency::USD;

/// Format `amount` dollars, e.g. `19.999` as `"$20.00"`.
pub fn format_currency(amount: f64) -> String {
    format_decimal(amount, CURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(19.999), "$20.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-5.0), "-$5.00");
        assert_eq!(format_currency(f64::NAN), "$NaN");
    }
}
