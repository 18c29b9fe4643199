//! Installation of every behavior on a page.

use std::rc::Rc;

use serde::Serialize;
use turbo_observability::StructuredLogger;

use crate::behaviors::lazy_images::LoadStrategy;
use crate::behaviors::notification::{Notification, Notifier, Severity};
use crate::behaviors::styles::StyleInjection;
use crate::behaviors::{
    add_to_cart, alerts, cart_update, image_zoom, lazy_images, quantity, rating, search,
    smooth_scroll, styles,
};
use crate::config::InteractionConfig;
use crate::currency;
use crate::dom::Dom;

/// What `install` bound, per behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Behaviors were already present on this document; nothing was bound.
    pub already_installed: bool,
    pub quantity_inputs: usize,
    pub add_to_cart_forms: usize,
    pub search_forms: usize,
    pub cart_update_forms: usize,
    pub lazy_images: usize,
    pub lazy_strategy: Option<LoadStrategy>,
    pub rating_widgets: usize,
    pub alerts: usize,
    pub anchor_links: usize,
    pub zoomable_images: usize,
}

/// The storefront behaviors installed on one document.
pub struct Storefront<D: Dom> {
    dom: Rc<D>,
    config: InteractionConfig,
    notifier: Notifier<D>,
    report: InstallReport,
}

impl<D: Dom> Storefront<D> {
    /// Inject the stylesheet and bind every enabled behavior.
    ///
    /// Installing twice on the same document binds nothing the second time;
    /// the injected stylesheet marks a document as done. A document that
    /// cannot hold the stylesheet still gets every behavior.
    pub fn install(dom: Rc<D>, config: InteractionConfig, logger: &StructuredLogger) -> Self {
        let notifier = Notifier::new(dom.clone(), config.notification.clone(), logger);
        let mut report = InstallReport::default();

        match styles::install(&*dom) {
            StyleInjection::Injected => {}
            StyleInjection::AlreadyPresent => {
                logger.warn("Storefront behaviors already installed, skipping");
                report.already_installed = true;
                return Self {
                    dom,
                    config,
                    notifier,
                    report,
                };
            }
            StyleInjection::Unavailable => {
                logger.warn("No head or body for the stylesheet, binding behaviors unstyled");
            }
        }

        let enabled = &config.behaviors;
        if enabled.quantity {
            report.quantity_inputs = quantity::install(&dom, &config, logger);
        }
        if enabled.add_to_cart {
            report.add_to_cart_forms = add_to_cart::install(&dom, &config, logger);
        }
        if enabled.search {
            report.search_forms = search::install(&dom, &config, logger);
        }
        if enabled.cart_update {
            report.cart_update_forms = cart_update::install(&dom, &config, logger);
        }
        if enabled.lazy_images {
            let (count, strategy) = lazy_images::install(&dom, &config, logger);
            report.lazy_images = count;
            report.lazy_strategy = Some(strategy);
        }
        if enabled.rating {
            report.rating_widgets = rating::install(&dom, &config, logger);
        }
        if enabled.alerts {
            report.alerts = alerts::install(&dom, &config, logger);
        }
        if enabled.smooth_scroll {
            report.anchor_links = smooth_scroll::install(&dom, &config, logger);
        }
        if enabled.image_zoom {
            report.zoomable_images = image_zoom::install(&dom, &config, logger);
        }

        logger
            .info_builder("Storefront behaviors installed")
            .field_json("report", &report)
            .emit();

        Self {
            dom,
            config,
            notifier,
            report,
        }
    }

    pub fn report(&self) -> &InstallReport {
        &self.report
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn dom(&self) -> &Rc<D> {
        &self.dom
    }

    /// Show a toast notification.
    pub fn notify(&self, message: &str, severity: Severity) -> Option<Notification<D::Node>> {
        self.notifier.notify(message, severity)
    }

    /// Format a dollar amount for display.
    pub fn format_currency(amount: f64) -> String {
        currency::format_currency(amount)
    }
}
