//! In-memory document with a virtual clock.
//!
//! `MemoryDom` runs page behaviors without a browser: events are dispatched
//! synchronously, timers fire only when the clock is advanced, and
//! visibility is simulated with [`MemoryDom::reveal`]. Used by the test
//! suites and for rendering previews on native hosts.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::dom::{Dom, DomEvent, EventKind, Listener, Task, VisibilityCallback};
use crate::selector::{ElementTree, Selector};

/// Handle to an element in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    value: Option<String>,
    content: Content,
    style: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: None,
            content: Content::Empty,
            style: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug)]
struct Tree {
    elements: Vec<Element>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            elements: vec![Element::new("html")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        tree.head = tree.create("head");
        tree.body = tree.create("body");
        tree.append(tree.root, tree.head);
        tree.append(tree.root, tree.body);
        tree
    }

    fn get(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.elements[id.0]
    }

    fn create(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element::new(tag));
        NodeId(self.elements.len() - 1)
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        if parent == child {
            return;
        }
        self.detach(child);
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).parent else {
            return false;
        };
        self.get_mut(parent).children.retain(|c| *c != id);
        self.get_mut(id).parent = None;
        true
    }

    fn clear_children(&mut self, id: NodeId) {
        for child in std::mem::take(&mut self.get_mut(id).children) {
            self.get_mut(child).parent = None;
        }
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            current = parent;
        }
        current == self.root
    }

    /// Descendants of `id` in document order, excluding `id`.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.get(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.get(next).children.iter().rev().copied());
        }
        out
    }

    fn text(&self, id: NodeId) -> String {
        let element = self.get(id);
        let mut out = match &element.content {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Html(html) => strip_tags(html),
        };
        for child in &element.children {
            out.push_str(&self.text(*child));
        }
        out
    }

    fn inner_html(&self, id: NodeId) -> String {
        let element = self.get(id);
        let mut out = match &element.content {
            Content::Empty => String::new(),
            Content::Text(text) => escape_html(text),
            Content::Html(html) => html.clone(),
        };
        for child in &element.children {
            out.push_str(&self.outer_html(*child));
        }
        out
    }

    fn outer_html(&self, id: NodeId) -> String {
        let element = self.get(id);
        let mut out = format!("<{}", element.tag);
        for (name, value) in &element.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        if !element.style.is_empty() {
            let css: Vec<String> = element
                .style
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape_html(&css.join(" "))));
        }
        out.push('>');
        out.push_str(&self.inner_html(id));
        out.push_str(&format!("</{}>", element.tag));
        out
    }
}

impl ElementTree for Tree {
    type Id = NodeId;

    fn tag_name(&self, node: NodeId) -> &str {
        &self.get(node).tag
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).attr(name)
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).parent
    }
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

struct Registration {
    node: NodeId,
    kind: EventKind,
    listener: Listener<NodeId>,
}

/// An in-memory document: `html > (head, body)`.
pub struct MemoryDom {
    tree: RefCell<Tree>,
    listeners: RefCell<Vec<Registration>>,
    timers: RefCell<Vec<Timer>>,
    next_seq: Cell<u64>,
    clock: Cell<Duration>,
    visibility_supported: bool,
    observed: RefCell<Vec<(NodeId, VisibilityCallback<NodeId>)>>,
    focused: Cell<Option<NodeId>>,
    scrolled: RefCell<Vec<NodeId>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document with visibility detection available.
    pub fn new() -> Self {
        Self {
            tree: RefCell::new(Tree::new()),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
            clock: Cell::new(Duration::ZERO),
            visibility_supported: true,
            observed: RefCell::new(Vec::new()),
            focused: Cell::new(None),
            scrolled: RefCell::new(Vec::new()),
        }
    }

    /// Empty document on a host without visibility detection.
    pub fn without_visibility_api() -> Self {
        Self {
            visibility_supported: false,
            ..Self::new()
        }
    }

    pub fn document_element(&self) -> NodeId {
        self.tree.borrow().root
    }

    pub fn head(&self) -> NodeId {
        self.tree.borrow().head
    }

    pub fn body(&self) -> NodeId {
        self.tree.borrow().body
    }

    /// Start building a detached element.
    pub fn element(&self, tag: &str) -> ElementBuilder<'_> {
        let node = self.tree.borrow_mut().create(tag);
        ElementBuilder { dom: self, node }
    }

    pub fn tag_name(&self, node: NodeId) -> String {
        self.tree.borrow().get(node).tag.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().get(node).parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().get(node).children.clone()
    }

    /// Serialized markup of `node` and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        self.tree.borrow().outer_html(node)
    }

    /// Dispatch an event at `target`. Returns false if a listener prevented
    /// the default action.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> bool {
        let event = DomEvent::new(kind, target);

        let mut path = vec![target];
        if kind.bubbles() {
            let mut current = self.parent(target);
            while let Some(node) = current {
                path.push(node);
                current = self.parent(node);
            }
        }

        for node in path {
            let listeners: Vec<Listener<NodeId>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|r| r.node == node && r.kind == kind)
                .map(|r| r.listener.clone())
                .collect();
            for listener in listeners {
                listener(&event);
            }
        }

        !event.default_prevented()
    }

    /// Registered listeners across the document.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn click(&self, node: NodeId) -> bool {
        self.dispatch(node, EventKind::Click)
    }

    pub fn submit(&self, form: NodeId) -> bool {
        self.dispatch(form, EventKind::Submit)
    }

    pub fn hover(&self, node: NodeId) {
        self.dispatch(node, EventKind::MouseEnter);
    }

    pub fn leave(&self, node: NodeId) {
        self.dispatch(node, EventKind::MouseLeave);
    }

    /// Type `value` into a control and commit it, firing `input` then `change`.
    pub fn enter_value(&self, node: NodeId, value: &str) {
        self.set_value(&node, value);
        self.dispatch(node, EventKind::Input);
        self.dispatch(node, EventKind::Change);
    }

    /// Move the virtual clock forward, running every timer that falls due,
    /// in expiry order (ties in scheduling order).
    pub fn advance(&self, by: Duration) {
        let target = self.clock.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.clock.set(timer.due);
            (timer.task)();
        }
        self.clock.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Simulate `node` scrolling into the viewport.
    pub fn reveal(&self, node: NodeId) {
        if !self.is_attached(&node) {
            return;
        }
        let callbacks: Vec<VisibilityCallback<NodeId>> = self
            .observed
            .borrow()
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&node);
        }
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.borrow().iter().any(|(n, _)| *n == node)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    /// Elements scrolled into view, oldest first.
    pub fn scroll_log(&self) -> Vec<NodeId> {
        self.scrolled.borrow().clone()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        std::iter::once(tree.root)
            .chain(tree.descendants(tree.root))
            .filter(|id| selector.matches(&*tree, *id))
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &Selector) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(*root)
            .into_iter()
            .filter(|id| selector.matches(&*tree, *id))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(tree.root)
            .into_iter()
            .find(|node| tree.get(*node).attr("id") == Some(id))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().get(*node).attr(name).map(str::to_string)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.tree.borrow_mut().get_mut(*node).set_attr(name, value);
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.tree
            .borrow_mut()
            .get_mut(*node)
            .attributes
            .retain(|(k, _)| k != name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .get(*node)
            .attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut tree = self.tree.borrow_mut();
        let element = tree.get_mut(*node);
        let classes = match element.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        element.set_attr("class", &classes);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let element = tree.get_mut(*node);
        let remaining = element.attr("class").map(|existing| {
            existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ")
        });
        if let Some(remaining) = remaining {
            element.set_attr("class", &remaining);
        }
    }

    fn value(&self, node: &NodeId) -> String {
        let tree = self.tree.borrow();
        let element = tree.get(*node);
        element
            .value
            .clone()
            .or_else(|| element.attr("value").map(str::to_string))
            .unwrap_or_default()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.tree.borrow_mut().get_mut(*node).value = Some(value.to_string());
    }

    fn inner_html(&self, node: &NodeId) -> String {
        self.tree.borrow().inner_html(*node)
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        let mut tree = self.tree.borrow_mut();
        tree.clear_children(*node);
        tree.get_mut(*node).content = Content::Html(html.to_string());
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.tree.borrow().text(*node)
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        tree.clear_children(*node);
        tree.get_mut(*node).content = Content::Text(text.to_string());
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        self.tree.borrow().get(*node).attr("disabled").is_some()
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .get(*node)
            .style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let style = &mut tree.get_mut(*node).style;
        style.retain(|(k, _)| k != property);
        if !value.is_empty() {
            style.push((property.to_string(), value.to_string()));
        }
    }

    fn focus(&self, node: &NodeId) {
        if self.is_attached(node) {
            self.focused.set(Some(*node));
        }
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.scrolled.borrow_mut().push(*node);
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.tree.borrow_mut().create(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.tree.borrow_mut().append(*parent, *child);
    }

    fn append_to_body(&self, node: &NodeId) -> bool {
        let mut tree = self.tree.borrow_mut();
        let body = tree.body;
        if !tree.is_connected(body) {
            return false;
        }
        tree.append(body, *node);
        true
    }

    fn append_to_head(&self, node: &NodeId) -> bool {
        let mut tree = self.tree.borrow_mut();
        let head = tree.head;
        if !tree.is_connected(head) {
            return false;
        }
        tree.append(head, *node);
        true
    }

    /// Listeners and visibility registrations on the removed subtree are
    /// discarded with it; nothing can reach a discarded element again.
    fn detach(&self, node: &NodeId) -> bool {
        let subtree: Vec<NodeId> = {
            let mut tree = self.tree.borrow_mut();
            if !tree.detach(*node) {
                return false;
            }
            std::iter::once(*node).chain(tree.descendants(*node)).collect()
        };

        self.listeners
            .borrow_mut()
            .retain(|r| !subtree.contains(&r.node));
        self.observed
            .borrow_mut()
            .retain(|(n, _)| !subtree.contains(n));
        if self.focused.get().is_some_and(|f| subtree.contains(&f)) {
            self.focused.set(None);
        }
        true
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.tree.borrow().is_connected(*node)
    }

    fn listen(&self, node: &NodeId, kind: EventKind, listener: Listener<NodeId>) {
        self.listeners.borrow_mut().push(Registration {
            node: *node,
            kind,
            listener,
        });
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.clock.get() + delay,
            seq,
            task,
        });
    }

    fn now(&self) -> f64 {
        self.clock.get().as_secs_f64() * 1000.0
    }

    fn observe_visibility(
        &self,
        nodes: &[NodeId],
        on_visible: VisibilityCallback<NodeId>,
    ) -> bool {
        if !self.visibility_supported {
            return false;
        }
        let mut observed = self.observed.borrow_mut();
        for node in nodes {
            observed.push((*node, on_visible.clone()));
        }
        true
    }

    fn unobserve_visibility(&self, node: &NodeId) {
        self.observed.borrow_mut().retain(|(n, _)| n != node);
    }
}

/// Fluent construction of elements for tests and previews.
pub struct ElementBuilder<'a> {
    dom: &'a MemoryDom,
    node: NodeId,
}

impl<'a> ElementBuilder<'a> {
    pub fn id(self, id: &str) -> Self {
        self.dom.set_attribute(&self.node, "id", id);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.dom.add_class(&self.node, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom.set_attribute(&self.node, name, value);
        self
    }

    pub fn value(self, value: &str) -> Self {
        self.dom.set_value(&self.node, value);
        self
    }

    pub fn html(self, html: &str) -> Self {
        self.dom.set_inner_html(&self.node, html);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.dom.set_text_content(&self.node, text);
        self
    }

    /// Attach under `parent` and return the handle.
    pub fn child_of(self, parent: NodeId) -> NodeId {
        self.dom.append_child(&parent, &self.node);
        self.node
    }

    /// Attach under `body` and return the handle.
    pub fn in_body(self) -> NodeId {
        let body = self.dom.body();
        self.child_of(body)
    }

    /// Return the handle, leaving the element detached.
    pub fn build(self) -> NodeId {
        self.node
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_query_in_document_order() {
        let dom = MemoryDom::new();
        let list = dom.element("ul").class("items").in_body();
        let a = dom.element("li").class("item").child_of(list);
        let b = dom.element("li").class("item").child_of(list);
        let _detached = dom.element("li").class("item").build();

        let sel = Selector::parse(".items .item").unwrap();
        assert_eq!(dom.query_all(&sel), vec![a, b]);
        assert_eq!(dom.query_within(&list, &Selector::parse("li").unwrap()), vec![a, b]);
        assert_eq!(dom.query_first(&sel), Some(a));
    }

    #[test]
    fn test_class_manipulation() {
        let dom = MemoryDom::new();
        let el = dom.element("span").class("star").in_body();
        dom.add_class(&el, "filled");
        dom.add_class(&el, "filled");
        assert_eq!(dom.attribute(&el, "class").as_deref(), Some("star filled"));
        dom.remove_class(&el, "star");
        assert!(!dom.has_class(&el, "star"));
        assert!(dom.has_class(&el, "filled"));
    }

    #[test]
    fn test_events_bubble_and_report_prevention() {
        let dom = Rc::new(MemoryDom::new());
        let form = dom.element("form").in_body();
        let input = dom.element("input").child_of(form);
        let seen = Rc::new(Cell::new(0));

        let counter = seen.clone();
        dom.listen(
            &form,
            EventKind::Click,
            Rc::new(move |event: &DomEvent<NodeId>| {
                counter.set(counter.get() + 1);
                event.prevent_default();
            }),
        );
        assert!(!dom.click(input));
        assert_eq!(seen.get(), 1);

        let counter = seen.clone();
        dom.listen(
            &form,
            EventKind::MouseEnter,
            Rc::new(move |_: &DomEvent<NodeId>| counter.set(counter.get() + 10)),
        );
        dom.hover(input);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_timers_fire_in_expiry_order() {
        let dom = Rc::new(MemoryDom::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "b"), (100, "a"), (300, "c")] {
            let log = log.clone();
            dom.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }

        let nested_log = log.clone();
        let weak = Rc::downgrade(&dom);
        dom.set_timeout(
            Duration::from_millis(50),
            Box::new(move || {
                let log = nested_log.clone();
                if let Some(dom) = weak.upgrade() {
                    dom.set_timeout(
                        Duration::from_millis(100),
                        Box::new(move || log.borrow_mut().push("nested")),
                    );
                }
            }),
        );

        dom.advance_ms(200);
        assert_eq!(*log.borrow(), vec!["a", "nested"]);
        assert_eq!(dom.now(), 200.0);

        dom.advance_ms(100);
        assert_eq!(*log.borrow(), vec!["a", "nested", "b", "c"]);
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn test_detach_and_attachment() {
        let dom = MemoryDom::new();
        let div = dom.element("div").in_body();
        assert!(dom.is_attached(&div));
        assert!(dom.detach(&div));
        assert!(!dom.detach(&div));
        assert!(!dom.is_attached(&div));

        let body = dom.body();
        dom.detach(&body);
        let orphan = dom.element("div").build();
        assert!(!dom.append_to_body(&orphan));
    }

    #[test]
    fn test_detach_discards_subtree_registrations() {
        let dom = MemoryDom::new();
        let overlay = dom.element("div").in_body();
        let image = dom.element("img").child_of(overlay);
        let kept = dom.element("button").in_body();
        let hits = Rc::new(Cell::new(0));

        for node in [overlay, image, kept] {
            let counter = hits.clone();
            dom.listen(
                &node,
                EventKind::Click,
                Rc::new(move |_: &DomEvent<NodeId>| counter.set(counter.get() + 1)),
            );
        }
        dom.observe_visibility(&[image], Rc::new(|_: &NodeId| {}));
        dom.focus(&image);
        assert_eq!(dom.listener_count(), 3);

        assert!(dom.detach(&overlay));
        assert_eq!(dom.listener_count(), 1);
        assert!(dom.click(image));
        assert_eq!(hits.get(), 0);
        assert_eq!(dom.focused(), None);
        assert!(!dom.is_observed(image));

        dom.click(kept);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_content_serialization() {
        let dom = MemoryDom::new();
        let button = dom
            .element("button")
            .attr("type", "submit")
            .html("<i class=\"icon\"></i> Add &amp; go")
            .in_body();
        assert_eq!(dom.text_content(&button), " Add & go");

        let note = dom.element("div").text("<b>hi</b>").in_body();
        assert_eq!(dom.inner_html(&note), "&lt;b&gt;hi&lt;/b&gt;");
        dom.set_style(&note, "top", "20px");
        assert_eq!(
            dom.outer_html(note),
            "<div style=\"top: 20px;\">&lt;b&gt;hi&lt;/b&gt;</div>"
        );
    }

    #[test]
    fn test_visibility_simulation() {
        let dom = MemoryDom::new();
        let img = dom.element("img").in_body();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        assert!(dom.observe_visibility(
            &[img],
            Rc::new(move |_: &NodeId| counter.set(counter.get() + 1))
        ));
        dom.reveal(img);
        assert_eq!(hits.get(), 1);
        dom.unobserve_visibility(&img);
        dom.reveal(img);
        assert_eq!(hits.get(), 1);

        let legacy = MemoryDom::without_visibility_api();
        assert!(!legacy.observe_visibility(&[], Rc::new(|_: &NodeId| {})));
    }
}
