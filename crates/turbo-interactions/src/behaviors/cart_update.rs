//! Cart rows reveal their update button once the quantity changes.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

/// Bind every cart row that has both a quantity field and a submit button.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("cart_update");
    let mut bound = 0;

    for form in dom.query_all(&config.selectors.cart_update_form) {
        let input = dom.query_first_within(&form, &config.selectors.cart_quantity_input);
        let button = dom.query_first_within(&form, &config.selectors.submit_button);
        let (Some(input), Some(button)) = (input, button) else {
            logger.debug("Cart row without quantity field or button skipped");
            continue;
        };

        let weak = Rc::downgrade(dom);
        dom.listen(
            &input,
            EventKind::Change,
            Rc::new(move |_: &DomEvent<D::Node>| {
                if let Some(dom) = weak.upgrade() {
                    dom.set_style(&button, "display", "inline-block");
                }
            }),
        );
        bound += 1;
    }

    bound
}
