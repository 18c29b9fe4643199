//! Progressive-enhancement behaviors for TurboCommerce storefront pages.
//!
//! The server renders complete, working pages; this crate layers the small
//! interactive touches on top:
//!
//! - **Forms**: quantity floor, add-to-cart loading state, blank-search
//!   guard, cart-row update button reveal
//! - **Media**: lazy image loading, product image zoom
//! - **Widgets**: star rating, auto-dismissing alerts, smooth anchors
//! - **Helpers**: toast notifications and `en-US` price formatting
//!
//! Behaviors are written against the [`Dom`] trait. [`MemoryDom`] runs them
//! natively with a virtual clock; the `web` feature adds `WebDom` for the
//! browser.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use turbo_interactions::prelude::*;
//! use turbo_observability::StructuredLogger;
//!
//! let dom = Rc::new(MemoryDom::new());
//! let input = dom.element("input").class("quantity-input").value("2").in_body();
//!
//! let logger = StructuredLogger::new("/cart");
//! let storefront = Storefront::install(dom.clone(), InteractionConfig::default(), &logger);
//! assert_eq!(storefront.report().quantity_inputs, 1);
//!
//! dom.enter_value(input, "0");
//! assert_eq!(dom.value(&input), "1");
//!
//! storefront.notify("Added to cart", Severity::Success);
//! assert_eq!(Storefront::<MemoryDom>::format_currency(19.999), "$20.00");
//! ```

pub mod behaviors;
pub mod config;
pub mod currency;
pub mod dom;
pub mod error;
pub mod memory;
pub mod selector;
pub mod storefront;
#[cfg(feature = "web")]
pub mod web;

pub use behaviors::notification::{Notification, Notifier, Severity};
pub use config::InteractionConfig;
pub use currency::format_currency;
pub use dom::{Dom, DomEvent, EventKind};
pub use error::{InteractionError, Result};
pub use memory::{MemoryDom, NodeId};
pub use selector::Selector;
pub use storefront::{InstallReport, Storefront};
#[cfg(feature = "web")]
pub use web::WebDom;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::behaviors::lazy_images::{LoadState, LoadStrategy};
    pub use crate::behaviors::notification::{Notification, Notifier, Severity};
    pub use crate::config::InteractionConfig;
    pub use crate::currency::format_currency;
    pub use crate::dom::{Dom, DomEvent, EventKind};
    pub use crate::error::InteractionError;
    pub use crate::memory::{MemoryDom, NodeId};
    pub use crate::selector::Selector;
    pub use crate::storefront::{InstallReport, Storefront};
}
