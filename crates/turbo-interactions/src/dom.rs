//! Host document abstraction.
//!
//! Behaviors are written once against [`Dom`] and run on any host that
//! implements it: the browser (`WebDom`, feature `web`) or the in-memory
//! document used by tests and server-side previews ([`MemoryDom`]).
//!
//! [`MemoryDom`]: crate::memory::MemoryDom

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::selector::Selector;

/// DOM events the behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
    Submit,
    Click,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Input => "input",
            Self::Submit => "submit",
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    /// Whether the event propagates to ancestors.
    pub fn bubbles(&self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event delivered to a listener.
#[derive(Debug)]
pub struct DomEvent<N> {
    kind: EventKind,
    target: N,
    default_prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    pub fn new(kind: EventKind, target: N) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Element the event was dispatched on.
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Cancel the host's default action (navigation, form submission).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Event listener.
pub type Listener<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// Deferred callback run once by [`Dom::set_timeout`].
pub type Task = Box<dyn FnOnce()>;

/// Called with each observed element that enters the viewport.
pub type VisibilityCallback<N> = Rc<dyn Fn(&N)>;

/// The operations page behaviors perform on a document.
///
/// All methods are infallible: hosts swallow failures the way the browser
/// does for best-effort DOM mutation. Callbacks handed to the host
/// (listeners, timers, visibility) run later on the same thread and must
/// not assume the node is still attached.
pub trait Dom: 'static {
    /// Handle to an element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Attached elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Node>;

    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: &Self::Node, selector: &Selector) -> Vec<Self::Node>;

    fn query_first(&self, selector: &Selector) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    fn query_first_within(&self, root: &Self::Node, selector: &Selector) -> Option<Self::Node> {
        self.query_within(root, selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Current value of a form control.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);

    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn text_content(&self, node: &Self::Node) -> String;
    /// Replace the content with literal text (never parsed as markup).
    fn set_text_content(&self, node: &Self::Node, text: &str);

    fn is_disabled(&self, node: &Self::Node) -> bool;
    fn set_disabled(&self, node: &Self::Node, disabled: bool);

    /// Inline style property, `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn focus(&self, node: &Self::Node);
    /// Smoothly scroll `node` to the top of the viewport.
    fn scroll_into_view(&self, node: &Self::Node);

    /// Create a detached element; `None` if the host rejects the tag.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Append to the document body. Returns false when there is no body.
    fn append_to_body(&self, node: &Self::Node) -> bool;
    /// Append to the document head. Returns false when there is no head.
    fn append_to_head(&self, node: &Self::Node) -> bool;
    /// Remove from its parent. Returns false if it had none.
    fn detach(&self, node: &Self::Node) -> bool;
    /// Whether the node is part of the live document.
    fn is_attached(&self, node: &Self::Node) -> bool;

    fn listen(&self, node: &Self::Node, kind: EventKind, listener: Listener<Self::Node>);

    /// Run `task` once after `delay`. Fire-and-forget: there is no handle.
    fn set_timeout(&self, delay: Duration, task: Task);

    /// Milliseconds since the page started.
    fn now(&self) -> f64;

    /// Report `nodes` to `on_visible` as they enter the viewport.
    ///
    /// Returns false, registering nothing, when the host cannot detect
    /// visibility.
    fn observe_visibility(
        &self,
        nodes: &[Self::Node],
        on_visible: VisibilityCallback<Self::Node>,
    ) -> bool;

    fn unobserve_visibility(&self, node: &Self::Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_prevent_default() {
        let event = DomEvent::new(EventKind::Submit, 7_usize);
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(*event.target(), 7);
    }

    #[test]
    fn test_pointer_events_do_not_bubble() {
        assert!(EventKind::Click.bubbles());
        assert!(EventKind::Submit.bubbles());
        assert!(!EventKind::MouseEnter.bubbles());
        assert!(!EventKind::MouseLeave.bubbles());
        assert_eq!(EventKind::MouseLeave.to_string(), "mouseleave");
    }
}
