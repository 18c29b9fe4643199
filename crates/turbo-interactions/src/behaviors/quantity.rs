//! Quantity inputs never go below one.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

/// Value a quantity field must be reset to, if any.
///
/// Follows the browser's numeric comparison: blank counts as zero,
/// anything below one becomes `"1"`, and text that is not a number is left
/// for the server to reject.
pub fn coerce_quantity(raw: &str) -> Option<&'static str> {
    match parse_number(raw) {
        Some(n) if n < 1.0 => Some("1"),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust also accepts "inf" and "nan", which are not numbers to a form.
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return None;
    }
    trimmed.parse().ok()
}

/// Bind every quantity input. Returns how many were bound.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("quantity");
    let inputs = dom.query_all(&config.selectors.quantity_input);

    for input in &inputs {
        let weak = Rc::downgrade(dom);
        let node = input.clone();
        let logger = logger.clone();
        dom.listen(
            input,
            EventKind::Change,
            Rc::new(move |_: &DomEvent<D::Node>| {
                let Some(dom) = weak.upgrade() else {
                    return;
                };
                let current = dom.value(&node);
                if let Some(fixed) = coerce_quantity(&current) {
                    dom.set_value(&node, fixed);
                    logger
                        .debug_builder("Quantity raised to minimum")
                        .field("entered", current)
                        .emit();
                }
            }),
        );
    }

    inputs.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;
    use proptest::prelude::*;

    #[test]
    fn test_coerce_below_one() {
        assert_eq!(coerce_quantity("0"), Some("1"));
        assert_eq!(coerce_quantity("-4"), Some("1"));
        assert_eq!(coerce_quantity("0.5"), Some("1"));
        assert_eq!(coerce_quantity(""), Some("1"));
        assert_eq!(coerce_quantity("  "), Some("1"));
        assert_eq!(coerce_quantity("-Infinity"), Some("1"));
    }

    #[test]
    fn test_leave_valid_and_non_numeric() {
        assert_eq!(coerce_quantity("1"), None);
        assert_eq!(coerce_quantity("12"), None);
        assert_eq!(coerce_quantity("1.5"), None);
        assert_eq!(coerce_quantity("1e3"), None);
        assert_eq!(coerce_quantity("abc"), None);
        assert_eq!(coerce_quantity("-inf"), None);
        assert_eq!(coerce_quantity("NaN"), None);
    }

    #[test]
    fn test_change_event_coerces_value() {
        let dom = Rc::new(MemoryDom::new());
        let input = dom.element("input").class("quantity-input").value("2").in_body();
        let logger = StructuredLogger::new("test");

        assert_eq!(install(&dom, &InteractionConfig::default(), &logger), 1);

        dom.enter_value(input, "0");
        assert_eq!(dom.value(&input), "1");

        dom.enter_value(input, "3");
        assert_eq!(dom.value(&input), "3");
    }

    proptest! {
        #[test]
        fn prop_integers_below_one_become_one(n in i64::MIN / 2..1) {
            prop_assert_eq!(coerce_quantity(&n.to_string()), Some("1"));
        }

        #[test]
        fn prop_integers_from_one_untouched(n in 1_i64..i64::MAX / 2) {
            prop_assert_eq!(coerce_quantity(&n.to_string()), None);
        }
    }
}
