//! Loading state on add-to-cart buttons.
//!
//! The form still submits normally; the button is only disabled and
//! relabelled until the reset delay passes.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

/// Bind every add-to-cart form. Returns how many were bound.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("add_to_cart");
    let forms = dom.query_all(&config.selectors.add_to_cart_form);

    for form in &forms {
        let weak = Rc::downgrade(dom);
        let node = form.clone();
        let button_selector = config.selectors.submit_button.clone();
        let settings = config.add_to_cart.clone();
        let logger = logger.clone();

        dom.listen(
            form,
            EventKind::Submit,
            Rc::new(move |_: &DomEvent<D::Node>| {
                let Some(dom) = weak.upgrade() else {
                    return;
                };
                let Some(button) = dom.query_first_within(&node, &button_selector) else {
                    return;
                };
                // Already showing the loading label from an earlier submit.
                if dom.is_disabled(&button) {
                    return;
                }

                let original = dom.inner_html(&button);
                dom.set_disabled(&button, true);
                dom.set_inner_html(&button, &settings.loading_html);
                logger.debug("Add to cart submitted");

                let weak = Rc::downgrade(&dom);
                dom.set_timeout(
                    settings.reset_delay(),
                    Box::new(move || {
                        if let Some(dom) = weak.upgrade() {
                            dom.set_disabled(&button, false);
                            dom.set_inner_html(&button, &original);
                        }
                    }),
                );
            }),
        );
    }

    forms.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    fn page() -> (Rc<MemoryDom>, crate::memory::NodeId, crate::memory::NodeId) {
        let dom = Rc::new(MemoryDom::new());
        let form = dom.element("form").class("add-to-cart-form").in_body();
        let button = dom
            .element("button")
            .attr("type", "submit")
            .html("<i class=\"bi bi-cart\"></i> Add to cart")
            .child_of(form);
        (dom, form, button)
    }

    #[test]
    fn test_submit_shows_loading_then_restores() {
        let (dom, form, button) = page();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        assert!(dom.submit(form), "submission must not be prevented");
        assert!(dom.is_disabled(&button));
        assert_eq!(
            dom.inner_html(&button),
            "<span class=\"loading\"></span> Adding..."
        );

        dom.advance_ms(1999);
        assert!(dom.is_disabled(&button));

        dom.advance_ms(1);
        assert!(!dom.is_disabled(&button));
        assert_eq!(dom.inner_html(&button), "<i class=\"bi bi-cart\"></i> Add to cart");
    }

    #[test]
    fn test_double_submit_keeps_original_label() {
        let (dom, form, button) = page();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.submit(form);
        dom.advance_ms(500);
        dom.submit(form);
        dom.advance_ms(2000);

        assert_eq!(dom.inner_html(&button), "<i class=\"bi bi-cart\"></i> Add to cart");
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn test_form_without_button_is_ignored() {
        let dom = Rc::new(MemoryDom::new());
        let form = dom.element("form").class("add-to-cart-form").in_body();
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 1);
        assert!(dom.submit(form));
        assert_eq!(dom.pending_timers(), 0);
    }
}
