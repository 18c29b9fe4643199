//! Deferred images load when they scroll into view.
//!
//! A marker is an image carrying its real URL in `data-src`. Loading copies
//! the URL into `src` and clears the marker, so a marker loads at most once
//! no matter how often the host reports it visible. Hosts without
//! visibility detection load every marker immediately.

use std::rc::Rc;

use serde::Serialize;
use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::Dom;

/// Attribute holding the pending image URL.
pub const PENDING_SOURCE_ATTR: &str = "data-src";

const LAZY_CLASS: &str = "lazy";
const LOADED_CLASS: &str = "loaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Pending,
    Loaded,
}

/// How the markers on a page were handled at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStrategy {
    /// Markers wait for the visibility observer.
    Observed,
    /// Host lacks visibility detection; everything loaded up front.
    Eager,
}

pub fn load_state<D: Dom>(dom: &D, image: &D::Node) -> LoadState {
    if dom.attribute(image, PENDING_SOURCE_ATTR).is_some() {
        LoadState::Pending
    } else {
        LoadState::Loaded
    }
}

/// Swap in the pending source. Returns false if the image was already loaded.
pub fn load_image<D: Dom>(dom: &D, image: &D::Node) -> bool {
    let Some(url) = dom.attribute(image, PENDING_SOURCE_ATTR) else {
        return false;
    };
    dom.set_attribute(image, "src", &url);
    dom.remove_attribute(image, PENDING_SOURCE_ATTR);
    dom.remove_class(image, LAZY_CLASS);
    dom.add_class(image, LOADED_CLASS);
    dom.unobserve_visibility(image);
    true
}

/// Bind every deferred image. Returns how many markers were found and how
/// they are being loaded.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> (usize, LoadStrategy) {
    let logger = logger.for_component("lazy_images");
    let images = dom.query_all(&config.selectors.lazy_image);

    let weak = Rc::downgrade(dom);
    let on_visible_logger = logger.clone();
    let on_visible = Rc::new(move |image: &D::Node| {
        let Some(dom) = weak.upgrade() else {
            return;
        };
        if load_image(&*dom, image) {
            on_visible_logger.debug("Deferred image loaded");
        }
    });

    if dom.observe_visibility(&images, on_visible) {
        return (images.len(), LoadStrategy::Observed);
    }

    logger
        .debug_builder("Visibility detection unavailable, loading all images")
        .field_i64("count", images.len() as i64)
        .emit();
    for image in &images {
        load_image(&**dom, image);
    }
    (images.len(), LoadStrategy::Eager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    fn image(dom: &MemoryDom, url: &str) -> NodeId {
        dom.element("img")
            .class("lazy")
            .attr("data-src", url)
            .attr("src", "/static/placeholder.svg")
            .in_body()
    }

    #[test]
    fn test_loads_when_revealed() {
        let dom = Rc::new(MemoryDom::new());
        let first = image(&dom, "/media/shoe.jpg");
        let second = image(&dom, "/media/boot.jpg");

        let (count, strategy) =
            install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));
        assert_eq!((count, strategy), (2, LoadStrategy::Observed));
        assert_eq!(load_state(&*dom, &first), LoadState::Pending);

        dom.reveal(first);
        assert_eq!(dom.attribute(&first, "src").as_deref(), Some("/media/shoe.jpg"));
        assert_eq!(load_state(&*dom, &first), LoadState::Loaded);
        assert!(!dom.has_class(&first, "lazy"));
        assert!(dom.has_class(&first, "loaded"));
        assert!(!dom.is_observed(first));

        assert_eq!(load_state(&*dom, &second), LoadState::Pending);
        assert_eq!(
            dom.attribute(&second, "src").as_deref(),
            Some("/static/placeholder.svg")
        );
    }

    #[test]
    fn test_second_visibility_report_is_ignored() {
        let dom = Rc::new(MemoryDom::new());
        let img = image(&dom, "/media/shoe.jpg");
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.reveal(img);
        dom.set_attribute(&img, "src", "/media/zoomed.jpg");
        assert!(!load_image(&*dom, &img));
        assert_eq!(dom.attribute(&img, "src").as_deref(), Some("/media/zoomed.jpg"));
    }

    #[test]
    fn test_eager_fallback_without_observer() {
        let dom = Rc::new(MemoryDom::without_visibility_api());
        let img = image(&dom, "/media/shoe.jpg");

        let (_, strategy) =
            install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));
        assert_eq!(strategy, LoadStrategy::Eager);
        assert_eq!(dom.attribute(&img, "src").as_deref(), Some("/media/shoe.jpg"));
        assert_eq!(load_state(&*dom, &img), LoadState::Loaded);
    }
}
