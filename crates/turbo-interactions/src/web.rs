//! Browser host backed by `web-sys`.
//!
//! Closures handed to the browser live as long as the page, so they are
//! leaked with `Closure::forget` once registered.

use std::cell::RefCell;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::dom::{Dom, DomEvent, EventKind, Listener, Task, VisibilityCallback};
use crate::selector::Selector;

/// The live browser document.
pub struct WebDom {
    window: Window,
    document: Document,
    observers: RefCell<Vec<IntersectionObserver>>,
}

impl WebDom {
    /// Bind to the current window. `None` outside a browser main thread.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn supports_intersection_observer(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }
}

fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        collect(self.document.query_selector_all(selector.as_str()))
    }

    fn query_within(&self, root: &Element, selector: &Selector) -> Vec<Element> {
        collect(root.query_selector_all(selector.as_str()))
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            node.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else {
            let _ = node.set_attribute("value", value);
        }
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn is_disabled(&self, node: &Element) -> bool {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.disabled()
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.disabled()
        } else {
            node.has_attribute("disabled")
        }
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            let _ = node.set_attribute("disabled", "");
        } else {
            let _ = node.remove_attribute("disabled");
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        let element = node.dyn_ref::<HtmlElement>()?;
        element
            .style()
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn append_to_body(&self, node: &Element) -> bool {
        match self.document.body() {
            Some(body) => body.append_child(node).is_ok(),
            None => false,
        }
    }

    fn append_to_head(&self, node: &Element) -> bool {
        match self.document.head() {
            Some(head) => head.append_child(node).is_ok(),
            None => false,
        }
    }

    fn detach(&self, node: &Element) -> bool {
        if node.parent_node().is_none() {
            return false;
        }
        node.remove();
        true
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn listen(&self, node: &Element, kind: EventKind, listener: Listener<Element>) {
        let target = node.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let dom_event = DomEvent::new(kind, target.clone());
            listener(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });
        let _ =
            node.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let _ = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        );
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn observe_visibility(
        &self,
        nodes: &[Element],
        on_visible: VisibilityCallback<Element>,
    ) -> bool {
        if !self.supports_intersection_observer() {
            return false;
        }

        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible(&entry.target());
                    }
                }
            },
        );
        let Ok(observer) = IntersectionObserver::new(closure.as_ref().unchecked_ref()) else {
            return false;
        };
        closure.forget();

        for node in nodes {
            observer.observe(node);
        }
        self.observers.borrow_mut().push(observer);
        true
    }

    fn unobserve_visibility(&self, node: &Element) {
        for observer in self.observers.borrow().iter() {
            observer.unobserve(node);
        }
    }
}
