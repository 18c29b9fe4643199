//! Blank searches are not submitted.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Bind the search form. Returns 1 if the page has one.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("search");
    let Some(form) = dom.query_first(&config.selectors.search_form) else {
        return 0;
    };

    let weak = Rc::downgrade(dom);
    let node = form.clone();
    let input_selector = config.selectors.search_input.clone();
    dom.listen(
        &form,
        EventKind::Submit,
        Rc::new(move |event: &DomEvent<D::Node>| {
            let Some(dom) = weak.upgrade() else {
                return;
            };
            let Some(input) = dom.query_first_within(&node, &input_selector) else {
                return;
            };
            if is_blank_query(&dom.value(&input)) {
                event.prevent_default();
                dom.focus(&input);
                logger.debug("Blank search blocked");
            }
        }),
    );

    1
}
