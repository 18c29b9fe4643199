//! Currency types for TurboCommerce storefronts.
//!
//! Prices formatted on the page must match the prices an `en-US` browser
//! prints, so the rounding here follows the browser's currency formatter.
//!
//! # Example
//!
//! ```
//! use turbo_commerce::prelude::*;
//!
//! assert_eq!(format_decimal(1234.5, Currency::USD), "$1,234.50");
//! assert_eq!(format_decimal(1.005, Currency::USD), "$1.01");
//! ```

pub mod money;

pub use money::{format_decimal, Currency, RoundedDecimal};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::money::{format_decimal, Currency, RoundedDecimal};
}
