//! Stylesheet the widgets depend on, injected once per document.

use crate::dom::Dom;

pub const STYLE_ELEMENT_ID: &str = "turbo-interactions-styles";

pub const STYLESHEET: &str = r#"
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.star {
    cursor: pointer;
    transition: color 0.2s;
}

.star.filled,
.star.hover {
    color: #ffc107;
}

.lazy {
    opacity: 0;
    transition: opacity 0.3s;
}

.lazy.loaded {
    opacity: 1;
}
"#;

/// Result of [`install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleInjection {
    Injected,
    /// An earlier install left the stylesheet in place.
    AlreadyPresent,
    /// The document has neither head nor body to hold it.
    Unavailable,
}

/// Add the stylesheet unless it is already there. It goes in `head`, or in
/// `body` when the document has no head.
pub fn install<D: Dom>(dom: &D) -> StyleInjection {
    if dom.element_by_id(STYLE_ELEMENT_ID).is_some() {
        return StyleInjection::AlreadyPresent;
    }
    let Some(style) = dom.create_element("style") else {
        return StyleInjection::Unavailable;
    };
    dom.set_attribute(&style, "id", STYLE_ELEMENT_ID);
    dom.set_text_content(&style, STYLESHEET);
    if dom.append_to_head(&style) || dom.append_to_body(&style) {
        StyleInjection::Injected
    } else {
        StyleInjection::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn test_injected_once() {
        let dom = MemoryDom::new();
        assert_eq!(install(&dom), StyleInjection::Injected);
        assert_eq!(install(&dom), StyleInjection::AlreadyPresent);

        let head = dom.head();
        let styles = dom.children(head);
        assert_eq!(styles.len(), 1);
        assert!(dom.text_content(&styles[0]).contains("@keyframes slideOut"));
    }

    #[test]
    fn test_falls_back_to_body_without_head() {
        let dom = MemoryDom::new();
        let head = dom.head();
        dom.detach(&head);

        assert_eq!(install(&dom), StyleInjection::Injected);
        let style = dom.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(dom.parent(style), Some(dom.body()));
        assert_eq!(install(&dom), StyleInjection::AlreadyPresent);
    }

    #[test]
    fn test_unavailable_without_head_or_body() {
        let dom = MemoryDom::new();
        let (head, body) = (dom.head(), dom.body());
        dom.detach(&head);
        dom.detach(&body);
        assert_eq!(install(&dom), StyleInjection::Unavailable);
    }
}
