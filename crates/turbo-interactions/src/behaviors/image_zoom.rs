//! Product image zoom overlay.

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

pub const MODAL_CLASS: &str = "image-modal";

const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background", "rgba(0,0,0,0.9)"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "9999"),
    ("cursor", "pointer"),
];

const IMAGE_STYLE: &[(&str, &str)] = &[
    ("max-width", "90%"),
    ("max-height", "90%"),
    ("object-fit", "contain"),
];

fn apply_style<D: Dom>(dom: &D, node: &D::Node, style: &[(&str, &str)]) {
    for (property, value) in style {
        dom.set_style(node, property, value);
    }
}

/// Show `src` full-screen. The overlay removes itself when clicked.
///
/// Returns the overlay, or `None` if it could not be mounted.
pub fn open<D: Dom>(dom: &Rc<D>, src: &str) -> Option<D::Node> {
    let modal = dom.create_element("div")?;
    let image = dom.create_element("img")?;

    dom.add_class(&modal, MODAL_CLASS);
    apply_style(&**dom, &modal, OVERLAY_STYLE);
    dom.set_attribute(&image, "src", src);
    apply_style(&**dom, &image, IMAGE_STYLE);
    dom.append_child(&modal, &image);

    if !dom.append_to_body(&modal) {
        return None;
    }

    let weak = Rc::downgrade(dom);
    let node = modal.clone();
    dom.listen(
        &modal,
        EventKind::Click,
        Rc::new(move |_: &DomEvent<D::Node>| {
            if let Some(dom) = weak.upgrade() {
                dom.detach(&node);
            }
        }),
    );
    Some(modal)
}

/// Bind the first zoomable product image. Returns 1 if the page has one.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("image_zoom");
    let Some(product_image) = dom.query_first(&config.selectors.zoomable_image) else {
        return 0;
    };

    let weak = Rc::downgrade(dom);
    let node = product_image.clone();
    dom.listen(
        &product_image,
        EventKind::Click,
        Rc::new(move |_: &DomEvent<D::Node>| {
            let Some(dom) = weak.upgrade() else {
                return;
            };
            let Some(src) = dom.attribute(&node, "src").filter(|s| !s.is_empty()) else {
                return;
            };
            if open(&dom, &src).is_some() {
                logger.debug("Zoom overlay opened");
            }
        }),
    );

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;
    use crate::selector::Selector;

    #[test]
    fn test_click_opens_and_closes_overlay() {
        let dom = Rc::new(MemoryDom::new());
        let img = dom
            .element("img")
            .class("product-detail-image")
            .attr("src", "/media/shoe-large.jpg")
            .in_body();
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 1);

        dom.click(img);
        let modals = dom.query_all(&Selector::class(MODAL_CLASS));
        assert_eq!(modals.len(), 1);
        let modal = modals[0];
        assert_eq!(dom.parent(modal), Some(dom.body()));
        assert_eq!(dom.style(&modal, "position").as_deref(), Some("fixed"));
        assert_eq!(dom.style(&modal, "z-index").as_deref(), Some("9999"));

        let zoomed = dom.children(modal)[0];
        assert_eq!(dom.tag_name(zoomed), "img");
        assert_eq!(dom.attribute(&zoomed, "src").as_deref(), Some("/media/shoe-large.jpg"));
        assert_eq!(dom.style(&zoomed, "object-fit").as_deref(), Some("contain"));

        // Clicking the zoomed picture bubbles to the overlay.
        dom.click(zoomed);
        assert!(!dom.is_attached(&modal));
    }

    #[test]
    fn test_image_without_source_does_nothing() {
        let dom = Rc::new(MemoryDom::new());
        let img = dom.element("img").class("product-detail-image").in_body();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.click(img);
        assert!(dom.query_all(&Selector::class(MODAL_CLASS)).is_empty());
    }

    #[test]
    fn test_page_without_product_image() {
        let dom = Rc::new(MemoryDom::new());
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 0);
    }
}
