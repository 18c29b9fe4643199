//! Transient toast notifications.
//!
//! A notification slides in at the top right, stays for the display
//! interval, slides out, and removes itself. Each one owns its timers, so
//! any number can be on screen at once. Each new one takes the highest stack
//! position not already in use, so notifications never overlap.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_observability::StructuredLogger;

use crate::config::NotificationConfig;
use crate::dom::Dom;
use crate::error::InteractionError;
use crate::selector::Selector;

pub const NOTIFICATION_CLASS: &str = "notification";

/// Stack position of a notification on screen, `0` at the top.
const SLOT_ATTR: &str = "data-notification-slot";

/// Notification severity; selects the alert styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    /// Alert modifier class, e.g. `alert-success`.
    pub fn css_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            _ => Err(InteractionError::UnknownSeverity(s.to_string())),
        }
    }
}

/// A notification that was put on screen.
#[derive(Debug, Clone)]
pub struct Notification<N> {
    pub element: N,
    pub message: String,
    pub severity: Severity,
    /// Page time at creation, in milliseconds.
    pub created_at_ms: f64,
}

/// Shows notifications on one document.
pub struct Notifier<D: Dom> {
    dom: Rc<D>,
    config: NotificationConfig,
    logger: StructuredLogger,
    live: Selector,
}

impl<D: Dom> Notifier<D> {
    pub fn new(dom: Rc<D>, config: NotificationConfig, logger: &StructuredLogger) -> Self {
        Self {
            dom,
            config,
            logger: logger.for_component("notification"),
            live: Selector::class(NOTIFICATION_CLASS),
        }
    }

    /// Show `message`. Returns `None` (and does nothing) when the document
    /// has no body to mount on.
    pub fn notify(&self, message: &str, severity: Severity) -> Option<Notification<D::Node>> {
        let dom = &self.dom;
        let element = dom.create_element("div")?;

        let slot = self.free_slot();
        let top = self.config.top_px + slot * self.config.stack_offset_px;

        dom.add_class(&element, "alert");
        dom.add_class(&element, &severity.css_class());
        dom.add_class(&element, NOTIFICATION_CLASS);
        dom.set_attribute(&element, "role", "alert");
        dom.set_attribute(&element, SLOT_ATTR, &slot.to_string());
        dom.set_style(&element, "position", "fixed");
        dom.set_style(&element, "top", &format!("{}px", top));
        dom.set_style(&element, "right", &format!("{}px", self.config.right_px));
        dom.set_style(&element, "z-index", "9999");
        dom.set_style(&element, "min-width", &format!("{}px", self.config.min_width_px));
        dom.set_style(&element, "animation", &animation("slideIn", self.config.entry_ms));
        dom.set_text_content(&element, message);

        if !dom.append_to_body(&element) {
            self.logger.debug("No body to mount notification on");
            return None;
        }

        self.schedule_removal(element.clone());

        self.logger
            .debug_builder("Notification shown")
            .field("severity", severity.as_str())
            .field_i64("slot", i64::from(slot))
            .emit();

        Some(Notification {
            element,
            message: message.to_string(),
            severity,
            created_at_ms: dom.now(),
        })
    }

    /// Lowest stack position no notification on screen occupies.
    fn free_slot(&self) -> u32 {
        let taken: Vec<u32> = self
            .dom
            .query_all(&self.live)
            .iter()
            .filter_map(|node| self.dom.attribute(node, SLOT_ATTR))
            .filter_map(|slot| slot.parse().ok())
            .collect();
        (0..).find(|slot| !taken.contains(slot)).unwrap_or(0)
    }

    /// The timers keep the document alive until the notification is gone,
    /// so it is removed even if the notifier is dropped first.
    fn schedule_removal(&self, element: D::Node) {
        let dom = self.dom.clone();
        let exit_ms = self.config.exit_ms;

        self.dom.set_timeout(
            Duration::from_millis(self.config.display_ms),
            Box::new(move || {
                if !dom.is_attached(&element) {
                    return;
                }
                dom.set_style(&element, "animation", &animation("slideOut", exit_ms));

                let host = dom.clone();
                host.set_timeout(
                    Duration::from_millis(exit_ms),
                    Box::new(move || {
                        if dom.is_attached(&element) {
                            dom.detach(&element);
                        }
                    }),
                );
            }),
        );
    }
}

fn animation(name: &str, ms: u64) -> String {
    format!("{} {}s ease", name, ms as f64 / 1000.0)
}
