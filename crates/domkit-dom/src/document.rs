//! Document - High-level document API
//!
//! Owns the tree, the listener registry and the platform profile, and
//! exposes the host primitives (`querySelector`, `setAttribute`,
//! `createEvent`, ...) the extension layer delegates to.

use std::sync::Arc;

use serde_json::Value;

use crate::events::EventListeners;
use crate::{
    ComputedStyle, CssStyleDeclaration, DomError, DomResult, DomTree, Event, EventTarget,
    Listener, NodeData, NodeId, NodeList, Platform, SelectorList, is_truthy, serialize,
    to_js_string,
};

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Interfaces accepted by `createEvent`
const EVENT_INTERFACES: &[&str] = &[
    "event",
    "events",
    "htmlevents",
    "uievent",
    "uievents",
    "mouseevent",
    "mouseevents",
    "touchevent",
    "customevent",
];

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    url: String,
    platform: Platform,
    listeners: EventListeners,
    ready_state: ReadyState,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        Self::with_platform(url, Platform::default())
    }

    /// Create a structured document for a specific platform
    pub fn with_platform(url: &str, platform: Platform) -> Self {
        let mut document = Self::empty(url, platform);
        let tree = &mut document.tree;
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        // Fresh nodes under a fresh root cannot violate hierarchy rules
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        document.finalize();
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str, platform: Platform) -> Self {
        let tree = DomTree::with_style_support(Arc::new(platform.style.clone()));
        Self {
            tree,
            url: url.to_string(),
            platform,
            listeners: EventListeners::new(),
            ready_state: ReadyState::Loading,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built
    pub fn finalize(&mut self) {
        let find_child = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|(_, n)| n.as_element().is_some_and(|e| e.tag_name == tag))
                .map(|(id, _)| id)
                .unwrap_or(NodeId::NONE)
        };
        self.html_element = find_child(&self.tree, NodeId::ROOT, "html");
        self.head_element = find_child(&self.tree, self.html_element, "head");
        self.body_element = find_child(&self.tree, self.html_element, "body");
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host platform profile
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.to_option()
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.to_option()
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.to_option()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    // ---- node creation and insertion ----

    /// `createElement`; rejects names that are not valid tag names
    pub fn create_element(&mut self, tag_name: &str) -> DomResult<NodeId> {
        let valid = tag_name.starts_with(|c: char| c.is_ascii_alphabetic())
            && tag_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if !valid {
            return Err(DomError::InvalidCharacter(tag_name.to_string()));
        }
        Ok(self.tree.create_element(tag_name))
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.tree.create_comment(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.tree.insert_before(parent, child, reference)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.remove_child(parent, child)
    }

    /// Native `ParentNode.prepend` (single node)
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let first = self.tree.first_child(parent);
        self.tree.insert_before(parent, child, first)
    }

    /// Native `ParentNode.append` (single node)
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.first_child(id)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.last_child(id)
    }

    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent_element(id)
    }

    // ---- selection ----

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.get_attr("id")) == Some(id))
    }

    /// First descendant of `scope` matching `selector`
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(scope)
            .into_iter()
            .find(|&n| list.matches(&self.tree, n)))
    }

    /// All descendants of `scope` matching `selector`, in tree order
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<NodeList> {
        let list = SelectorList::parse(selector)?;
        let nodes = self
            .tree
            .descendants(scope)
            .into_iter()
            .filter(|&n| list.matches(&self.tree, n))
            .collect();
        Ok(NodeList::from_vec(nodes))
    }

    /// `Element.matches`
    pub fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        let list = SelectorList::parse(selector)?;
        Ok(list.matches(&self.tree, element))
    }

    /// Legacy WebKit name for `matches`
    pub fn webkit_matches_selector(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        self.matches(element, selector)
    }

    /// Legacy Gecko name for `matches`
    pub fn moz_matches_selector(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        self.matches(element, selector)
    }

    /// Legacy Trident name for `matches`
    pub fn ms_matches_selector(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        self.matches(element, selector)
    }

    /// Legacy Presto name for `matches`
    pub fn o_matches_selector(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        self.matches(element, selector)
    }

    /// Native `Element.closest`
    pub fn closest(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let mut current = Some(element).filter(|&e| self.tree.is_element(e));
        while let Some(id) = current {
            if list.matches(&self.tree, id) {
                return Ok(Some(id));
            }
            current = self.tree.parent_element(id);
        }
        Ok(None)
    }

    // ---- attributes and properties ----

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.element(id).map(|e| e.tag_name.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree
            .element(id)
            .and_then(|e| e.get_attr(&name.to_ascii_lowercase()))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// `setAttribute`; the name is lowercased like in HTML documents
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || "\"'>/=".contains(c)) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            elem.style.set_css_text(value);
        }
        elem.attrs.set_attribute(&name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.tree.element_mut(id) {
            let name = name.to_ascii_lowercase();
            if name == "style" {
                elem.style.set_css_text("");
            }
            elem.attrs.remove_named_item(&name);
        }
    }

    /// `className` getter
    pub fn class_name(&self, id: NodeId) -> &str {
        self.tree.element(id).map(|e| e.class_name()).unwrap_or("")
    }

    /// `className` setter
    pub fn set_class_name(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.set_attribute(id, "class", value)
    }

    /// Property assignment (`element[name] = value`)
    pub fn set_property(&mut self, id: NodeId, name: &str, value: &Value) -> DomResult<()> {
        match name {
            "className" => self.set_attribute(id, "class", &to_js_string(value)),
            "id" | "title" | "lang" | "dir" => self.set_attribute(id, name, &to_js_string(value)),
            "hidden" => {
                if is_truthy(value) {
                    self.set_attribute(id, "hidden", "")
                } else {
                    self.remove_attribute(id, "hidden");
                    Ok(())
                }
            }
            "textContent" => {
                let text = match value {
                    Value::Null => String::new(),
                    other => to_js_string(other),
                };
                self.set_text_content(id, &text)
            }
            _ => {
                let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType)?;
                elem.properties.insert(name.to_string(), value.clone());
                Ok(())
            }
        }
    }

    /// Property read (`element[name]`); `None` is `undefined`
    pub fn property(&self, id: NodeId, name: &str) -> Option<Value> {
        let elem = self.tree.element(id)?;
        let reflected = |attr: &str| Value::String(elem.get_attr(attr).unwrap_or("").to_string());
        match name {
            "className" => Some(reflected("class")),
            "id" | "title" | "lang" | "dir" => Some(reflected(name)),
            "hidden" => Some(Value::Bool(elem.get_attr("hidden").is_some())),
            "tagName" => Some(Value::String(elem.tag_name.to_ascii_uppercase())),
            "textContent" => Some(Value::String(self.tree.text_content(id))),
            _ => elem.properties.get(name).cloned(),
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if !self.tree.is_element(id) {
            return Err(DomError::InvalidNodeType);
        }
        self.tree.clear_children(id);
        if !text.is_empty() {
            let node = self.tree.create_text(text);
            self.tree.append_child(id, node)?;
        }
        Ok(())
    }

    /// `innerHTML` getter
    pub fn inner_html(&self, id: NodeId) -> String {
        serialize::inner_html(&self.tree, id)
    }

    /// `outerHTML` getter
    pub fn outer_html(&self, id: NodeId) -> String {
        serialize::outer_html(&self.tree, id)
    }

    // ---- style ----

    /// Inline style of an element
    pub fn style(&self, id: NodeId) -> Option<&CssStyleDeclaration> {
        self.tree.element(id).map(|e| &e.style)
    }

    /// Mutate the inline style of an element, then rewrite its `style`
    /// attribute from the declaration. An emptied declaration removes the
    /// attribute.
    pub fn update_style<R>(&mut self, id: NodeId, f: impl FnOnce(&mut CssStyleDeclaration) -> R) -> Option<R> {
        let elem = self.tree.element_mut(id)?;
        let result = f(&mut elem.style);
        if elem.style.is_empty() {
            elem.attrs.remove_named_item("style");
        } else {
            let text = elem.style.css_text();
            elem.attrs.set_attribute("style", &text);
        }
        Some(result)
    }

    /// `defaultView.getComputedStyle(element, null)`
    pub fn computed_style(&self, id: NodeId) -> Option<ComputedStyle<'_>> {
        self.tree
            .element(id)
            .map(|e| ComputedStyle::new(&e.tag_name, &e.style))
    }

    // ---- events ----

    /// `addEventListener`
    pub fn add_event_listener(&mut self, target: EventTarget, event_type: &str, listener: Listener) {
        self.listeners.add(target, event_type, listener);
    }

    /// `removeEventListener`
    pub fn remove_event_listener(
        &mut self,
        target: EventTarget,
        event_type: &str,
        listener: &Listener,
    ) {
        self.listeners.remove(target, event_type, listener);
    }

    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    /// Standards-track `document.createEvent(interface)`
    pub fn create_event(&self, interface: &str) -> DomResult<Event> {
        if !self.platform.events.create_event {
            return Err(DomError::NotSupported("document.createEvent".to_string()));
        }
        if !EVENT_INTERFACES.contains(&interface.to_ascii_lowercase().as_str()) {
            return Err(DomError::NotSupported(format!("event interface {interface:?}")));
        }
        Ok(Event::uninitialized(false))
    }

    /// Legacy `document.createEventObject()`
    pub fn create_event_object(&self) -> DomResult<Event> {
        if !self.platform.events.create_event_object {
            return Err(DomError::NotSupported("document.createEventObject".to_string()));
        }
        Ok(Event::uninitialized(true))
    }

    /// `dispatchEvent`; returns `false` if a listener prevented the default
    pub fn dispatch_event(&self, target: EventTarget, event: &mut Event) -> DomResult<bool> {
        if !event.is_initialized() {
            return Err(DomError::InvalidState("event is not initialized".to_string()));
        }
        let path = self.event_path(target)?;
        EventListeners::set_target(event, target);
        Ok(self.listeners.dispatch(&path, event))
    }

    /// Legacy `fireEvent("on" + type, eventObject)`; legacy events always bubble
    pub fn fire_event(
        &self,
        target: EventTarget,
        handler: &str,
        event: &mut Event,
    ) -> DomResult<bool> {
        if !self.platform.events.create_event_object {
            return Err(DomError::NotSupported("fireEvent".to_string()));
        }
        let event_type = handler
            .strip_prefix("on")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomError::InvalidCharacter(handler.to_string()))?;
        event.init_event(event_type, true, false);
        let path = self.event_path(target)?;
        EventListeners::set_target(event, target);
        Ok(self.listeners.dispatch(&path, event))
    }

    /// Target, its ancestors, the document, then the window
    fn event_path(&self, target: EventTarget) -> DomResult<Vec<EventTarget>> {
        let mut path = Vec::new();
        if let EventTarget::Node(id) = target {
            if self.tree.get(id).is_none() {
                return Err(DomError::NotFound);
            }
            let mut current = Some(id);
            while let Some(node) = current {
                path.push(EventTarget::Node(node));
                current = self.tree.parent(node);
            }
            // Detached subtrees do not reach the document or window
            if path.last() != Some(&EventTarget::DOCUMENT) {
                return Ok(path);
            }
        }
        path.push(EventTarget::Window);
        Ok(path)
    }

    /// Parser finished: fire `DOMContentLoaded` once, then mark complete
    pub fn finish_parsing(&mut self) {
        if self.ready_state != ReadyState::Loading {
            return;
        }
        self.ready_state = ReadyState::Interactive;
        tracing::debug!("DOMContentLoaded: {}", self.url);
        let mut event = Event::new("DOMContentLoaded", true, false);
        // The document node always exists, so the path cannot fail
        let _ = self.dispatch_event(EventTarget::DOCUMENT, &mut event);
        self.ready_state = ReadyState::Complete;
    }

    /// Node kind check used by the extension layer
    pub fn is_element(&self, id: NodeId) -> bool {
        self.tree.is_element(id)
    }

    /// Check whether `id` is the document node
    pub fn is_document(&self, id: NodeId) -> bool {
        matches!(self.tree.get(id).map(|n| &n.data), Some(NodeData::Document))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_basic_structure() {
        let doc = Document::default();
        assert!(doc.document_element().is_some());
        assert_eq!(doc.tag_name(doc.body().unwrap()), Some("body"));
        assert_eq!(doc.tag_name(doc.head().unwrap()), Some("head"));
        assert_eq!(doc.ready_state(), ReadyState::Loading);
    }

    #[test]
    fn test_create_element_validation() {
        let mut doc = Document::default();
        assert!(doc.create_element("my-widget").is_ok());
        assert_eq!(
            doc.create_element("1abc"),
            Err(DomError::InvalidCharacter("1abc".to_string()))
        );
        assert!(doc.create_element("").is_err());
        assert!(doc.create_element("a b").is_err());
    }

    #[test]
    fn test_query_selector_scoped() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let div = doc.create_element("div").unwrap();
        let span = doc.create_element("span").unwrap();
        doc.set_attribute(div, "id", "d").unwrap();
        doc.append_child(body, div).unwrap();
        doc.append_child(div, span).unwrap();

        assert_eq!(doc.query_selector(NodeId::ROOT, "div#d span").unwrap(), Some(span));
        assert_eq!(doc.query_selector(span, "span").unwrap(), None);
        // Scoped queries still see ancestors outside the scope
        assert_eq!(doc.query_selector(div, "body span").unwrap(), Some(span));
        assert_eq!(doc.get_element_by_id("d"), Some(div));
        assert!(doc.query_selector(NodeId::ROOT, "div[").is_err());
    }

    #[test]
    fn test_property_reflection() {
        let mut doc = Document::default();
        let div = doc.create_element("div").unwrap();
        doc.set_property(div, "className", &Value::from("a b")).unwrap();
        doc.set_property(div, "title", &Value::from("div 33")).unwrap();
        doc.set_property(div, "hidden", &Value::Bool(true)).unwrap();
        doc.set_property(div, "custom", &Value::from(7)).unwrap();

        assert_eq!(doc.class_name(div), "a b");
        assert_eq!(doc.get_attribute(div, "title"), Some("div 33"));
        assert!(doc.has_attribute(div, "hidden"));
        assert_eq!(doc.property(div, "custom"), Some(Value::from(7)));
        assert_eq!(doc.property(div, "tagName"), Some(Value::from("DIV")));
        assert_eq!(doc.property(div, "missing"), None);
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_attribute(body, "Data-Foo", "1").unwrap();
        assert_eq!(doc.get_attribute(body, "data-foo"), Some("1"));
        assert_eq!(doc.get_attribute(body, "DATA-FOO"), Some("1"));
        assert!(doc.set_attribute(body, "bad name", "x").is_err());
    }

    #[test]
    fn test_event_bubbles_to_window() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        doc.add_event_listener(EventTarget::Window, "ping", Rc::new(move |e: &mut Event| {
            assert_eq!(e.target(), Some(EventTarget::Node(body)));
            h.set(h.get() + 1);
        }));

        let mut event = doc.create_event("Event").unwrap();
        assert!(doc.dispatch_event(body.into(), &mut event).is_err());
        event.init_event("ping", true, false);
        assert!(doc.dispatch_event(body.into(), &mut event).unwrap());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_detached_target_does_not_reach_window() {
        let mut doc = Document::default();
        let orphan = doc.create_element("div").unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        doc.add_event_listener(EventTarget::Window, "ping", Rc::new(move |_: &mut Event| {
            h.set(h.get() + 1);
        }));
        let mut event = Event::new("ping", true, false);
        doc.dispatch_event(orphan.into(), &mut event).unwrap();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_legacy_event_api() {
        let doc = Document::with_platform("about:blank", Platform::legacy_ie());
        assert!(doc.create_event("Event").is_err());
        let mut event = doc.create_event_object().unwrap();
        assert!(event.is_legacy());
        assert!(doc.fire_event(EventTarget::DOCUMENT, "on", &mut event).is_err());
        assert!(doc.fire_event(EventTarget::DOCUMENT, "onclick", &mut event).unwrap());
        assert_eq!(event.event_type(), "click");
        assert!(event.bubbles);

        let standard = Document::default();
        assert!(standard.create_event_object().is_err());
    }

    #[test]
    fn test_dom_content_loaded_fires_once() {
        let mut doc = Document::default();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        doc.add_event_listener(EventTarget::DOCUMENT, "DOMContentLoaded", Rc::new(move |_: &mut Event| {
            h.set(h.get() + 1);
        }));
        doc.finish_parsing();
        doc.finish_parsing();
        assert_eq!(hits.get(), 1);
        assert_eq!(doc.ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_native_closest_and_prepend() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let ul = doc.create_element("ul").unwrap();
        let li = doc.create_element("li").unwrap();
        doc.append(body, li).unwrap();
        doc.prepend(body, ul).unwrap();
        assert_eq!(doc.first_child(body), Some(ul));
        assert_eq!(doc.last_child(body), Some(li));
        assert_eq!(doc.closest(li, "body").unwrap(), Some(body));
        assert_eq!(doc.closest(li, "table").unwrap(), None);
    }
}
