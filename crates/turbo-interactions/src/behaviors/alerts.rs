//! Server-rendered alerts fade out and disappear on their own.

use std::rc::Rc;
use std::time::Duration;

use turbo_observability::StructuredLogger;

use crate::config::{AlertConfig, InteractionConfig};
use crate::dom::Dom;

/// Schedule the fade-out and removal of one alert.
///
/// Both steps re-check attachment: an alert closed by the user first
/// leaves the timers running, but they find nothing to do.
pub fn schedule_dismissal<D: Dom>(dom: &Rc<D>, alert: D::Node, timing: &AlertConfig) {
    let weak = Rc::downgrade(dom);
    let fade = Duration::from_millis(timing.fade_ms);
    let transition = format!("opacity {}s", timing.fade_ms as f64 / 1000.0);

    dom.set_timeout(
        Duration::from_millis(timing.display_ms),
        Box::new(move || {
            let Some(dom) = weak.upgrade() else {
                return;
            };
            if !dom.is_attached(&alert) {
                return;
            }
            dom.set_style(&alert, "transition", &transition);
            dom.set_style(&alert, "opacity", "0");

            let weak = Rc::downgrade(&dom);
            dom.set_timeout(
                fade,
                Box::new(move || {
                    if let Some(dom) = weak.upgrade() {
                        if dom.is_attached(&alert) {
                            dom.detach(&alert);
                        }
                    }
                }),
            );
        }),
    );
}

/// Schedule dismissal of every alert currently on the page.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let alerts = dom.query_all(&config.selectors.alert);
    for alert in &alerts {
        schedule_dismissal(dom, alert.clone(), &config.alerts);
    }
    if !alerts.is_empty() {
        logger
            .for_component("alerts")
            .debug_builder("Alert dismissal scheduled")
            .field_i64("count", alerts.len() as i64)
            .field_i64("display_ms", config.alerts.display_ms as i64)
            .emit();
    }
    alerts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn test_alert_fades_then_is_removed() {
        let dom = Rc::new(MemoryDom::new());
        let alert = dom.element("div").class("alert").class("alert-info").text("Saved").in_body();
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 1);

        dom.advance_ms(4999);
        assert_eq!(dom.style(&alert, "opacity"), None);

        dom.advance_ms(1);
        assert_eq!(dom.style(&alert, "opacity").as_deref(), Some("0"));
        assert_eq!(dom.style(&alert, "transition").as_deref(), Some("opacity 0.5s"));
        assert!(dom.is_attached(&alert));

        dom.advance_ms(500);
        assert!(!dom.is_attached(&alert));
    }

    #[test]
    fn test_alert_removed_early_is_left_alone() {
        let dom = Rc::new(MemoryDom::new());
        let alert = dom.element("div").class("alert").in_body();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.detach(&alert);
        dom.advance_ms(6000);
        assert_eq!(dom.style(&alert, "opacity"), None);
        assert_eq!(dom.pending_timers(), 0);
    }
}
