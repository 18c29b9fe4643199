//! Behavior configuration.
//!
//! Every field has a default matching the storefront templates, so an empty
//! JSON object (or no configuration block at all) yields a working setup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selector::Selector;

fn selector(source: &str) -> Selector {
    Selector::parse(source).expect("built-in selector must parse")
}

/// Markup hooks the behaviors bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub quantity_input: Selector,
    pub add_to_cart_form: Selector,
    pub submit_button: Selector,
    pub search_form: Selector,
    pub search_input: Selector,
    pub cart_update_form: Selector,
    pub cart_quantity_input: Selector,
    pub lazy_image: Selector,
    pub rating_container: Selector,
    pub rating_star: Selector,
    pub alert: Selector,
    pub anchor_link: Selector,
    pub zoomable_image: Selector,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quantity_input: selector(".quantity-input"),
            add_to_cart_form: selector(".add-to-cart-form"),
            submit_button: selector("button[type=\"submit\"]"),
            search_form: selector("#search-form"),
            search_input: selector("input[name=\"q\"]"),
            cart_update_form: selector(".cart-update-form"),
            cart_quantity_input: selector("input[name=\"quantity\"]"),
            lazy_image: selector("img[data-src]"),
            rating_container: selector(".rating-stars"),
            rating_star: selector(".star"),
            alert: selector(".alert"),
            anchor_link: selector("a[href^=\"#\"]"),
            zoomable_image: selector(".product-detail-image"),
        }
    }
}

/// Add-to-cart button loading state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddToCartConfig {
    /// Markup shown on the button while the form submits.
    pub loading_html: String,
    /// Delay before the button is restored.
    pub reset_ms: u64,
}

impl Default for AddToCartConfig {
    fn default() -> Self {
        Self {
            loading_html: "<span class=\"loading\"></span> Adding...".to_string(),
            reset_ms: 2000,
        }
    }
}

impl AddToCartConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }
}

/// Star rating widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Id of the hidden form field receiving the chosen rating.
    pub field_id: String,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            field_id: "id_rating".to_string(),
        }
    }
}

/// Auto-dismissing server alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub display_ms: u64,
    pub fade_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            display_ms: 5000,
            fade_ms: 500,
        }
    }
}

/// Toast notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Entry animation length.
    pub entry_ms: u64,
    /// Time on screen before the exit animation starts.
    pub display_ms: u64,
    /// Exit animation length; the element is removed afterwards.
    pub exit_ms: u64,
    pub top_px: u32,
    pub right_px: u32,
    pub min_width_px: u32,
    /// Vertical offset applied per notification already on screen.
    pub stack_offset_px: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            entry_ms: 300,
            display_ms: 3000,
            exit_ms: 300,
            top_px: 20,
            right_px: 20,
            min_width_px: 300,
            stack_offset_px: 72,
        }
    }
}

impl NotificationConfig {
    /// Upper bound on how long a notification stays in the document.
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.display_ms + self.exit_ms)
    }
}

/// Per-behavior switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorToggles {
    pub quantity: bool,
    pub add_to_cart: bool,
    pub search: bool,
    pub cart_update: bool,
    pub lazy_images: bool,
    pub rating: bool,
    pub alerts: bool,
    pub smooth_scroll: bool,
    pub image_zoom: bool,
}

impl Default for BehaviorToggles {
    fn default() -> Self {
        Self {
            quantity: true,
            add_to_cart: true,
            search: true,
            cart_update: true,
            lazy_images: true,
            rating: true,
            alerts: true,
            smooth_scroll: true,
            image_zoom: true,
        }
    }
}

/// Complete configuration for the storefront behaviors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub selectors: SelectorConfig,
    pub add_to_cart: AddToCartConfig,
    pub rating: RatingConfig,
    pub alerts: AlertConfig,
    pub notification: NotificationConfig,
    pub behaviors: BehaviorToggles,
}

impl InteractionConfig {
    /// Parse a JSON document. Missing fields take their defaults; selectors
    /// are validated while parsing.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InteractionError;

    #[test]
    fn test_defaults() {
        let config = InteractionConfig::default();
        assert_eq!(config.selectors.search_form.as_str(), "#search-form");
        assert_eq!(config.add_to_cart.reset_delay(), Duration::from_millis(2000));
        assert_eq!(config.notification.lifetime(), Duration::from_millis(3300));
        assert_eq!(config.rating.field_id, "id_rating");
        assert!(config.behaviors.image_zoom);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = InteractionConfig::from_json(
            r#"{
                "selectors": { "alert": ".flash" },
                "alerts": { "display_ms": 8000 },
                "behaviors": { "smooth_scroll": false }
            }"#,
        )
        .unwrap();
        assert_eq!(config.selectors.alert.as_str(), ".flash");
        assert_eq!(config.selectors.quantity_input.as_str(), ".quantity-input");
        assert_eq!(config.alerts.display_ms, 8000);
        assert_eq!(config.alerts.fade_ms, 500);
        assert!(!config.behaviors.smooth_scroll);
        assert!(config.behaviors.rating);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(InteractionConfig::from_json("  ").unwrap(), InteractionConfig::default());
        assert_eq!(InteractionConfig::from_json("{}").unwrap(), InteractionConfig::default());
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let err = InteractionConfig::from_json(r#"{ "selectors": { "alert": "div >" } }"#)
            .unwrap_err();
        assert!(matches!(err, InteractionError::InvalidConfig(_)));
        assert!(err.to_string().contains("div >"));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = InteractionConfig::default();
        config.notification.display_ms = 4500;
        let json = config.to_json().unwrap();
        assert_eq!(InteractionConfig::from_json(&json).unwrap(), config);
    }
}
