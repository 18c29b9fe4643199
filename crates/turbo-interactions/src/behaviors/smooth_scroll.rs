//! In-page anchors scroll smoothly instead of jumping.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

/// Element id named by an in-page link, `None` for a bare `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Bind every in-page anchor. Returns how many were bound.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("smooth_scroll");
    let anchors = dom.query_all(&config.selectors.anchor_link);

    for anchor in &anchors {
        let weak = Rc::downgrade(dom);
        let node = anchor.clone();
        let logger = logger.clone();
        dom.listen(
            anchor,
            EventKind::Click,
            Rc::new(move |event: &DomEvent<D::Node>| {
                event.prevent_default();
                let Some(dom) = weak.upgrade() else {
                    return;
                };
                let href = dom.attribute(&node, "href").unwrap_or_default();
                let Some(target) = fragment_target(&href).and_then(|id| dom.element_by_id(id))
                else {
                    return;
                };
                dom.scroll_into_view(&target);
                logger.debug_builder("Scrolled to anchor").field("href", href.clone()).emit();
            }),
        );
    }

    anchors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn test_fragment_target() {
        assert_eq!(fragment_target("#reviews"), Some("reviews"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/cart"), None);
    }

    #[test]
    fn test_click_scrolls_to_target() {
        let dom = Rc::new(MemoryDom::new());
        let link = dom.element("a").attr("href", "#reviews").in_body();
        let reviews = dom.element("section").id("reviews").in_body();
        dom.element("a").attr("href", "/cart").in_body();

        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 1);
        assert!(!dom.click(link));
        assert_eq!(dom.scroll_log(), vec![reviews]);
    }

    #[test]
    fn test_missing_target_only_prevents_navigation() {
        let dom = Rc::new(MemoryDom::new());
        let bare = dom.element("a").attr("href", "#").in_body();
        let dangling = dom.element("a").attr("href", "#nowhere").in_body();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        assert!(!dom.click(bare));
        assert!(!dom.click(dangling));
        assert!(dom.scroll_log().is_empty());
    }
}
