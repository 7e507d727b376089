//! Adapter handles
//!
//! Handles borrow a host object together with a [`CapabilityRegistry`] and
//! expose the installed operations as methods. Every method resolves its
//! implementation from the registry, so natives and earlier installs take
//! effect without the caller noticing.

use std::rc::Rc;

use domkit_dom::{Document, Event, EventTarget, Listener, NodeId, NodeList, Window};
use serde_json::{Map, Value};

use crate::attributes::{self, ATTR, AttrOps, DATA, DataOps, RemoveAttrFn, RemoveDataFn};
use crate::class_list::{self, ClassMutFn, HasClassFn};
use crate::device;
use crate::document::{self, FindAllFn, FindFn, FragmentFn};
use crate::events::{self, OffFn, OnFn, ReadyFn, TriggerFn};
use crate::style::{CSS, CssOps, parse_int};
use crate::traversal::{self, ClosestFn, InsertFn};
use crate::{CapabilityRegistry, Category, Result, capabilities};

/// Copy out a fn-pointer capability, falling back to the built-in one
fn op<T: Copy + 'static>(registry: &CapabilityRegistry, category: Category, name: &str, builtin: T) -> T {
    registry
        .resolve::<T>(category, name)
        .copied()
        .unwrap_or(builtin)
}

/// Extensions reachable from a [`Document`]
pub trait DocumentExt {
    /// Handle bound to the process-wide registry
    fn ext(&mut self) -> DocumentHandle<'_>;

    /// Handle bound to a specific registry
    fn ext_with<'a>(&'a mut self, registry: &'a CapabilityRegistry) -> DocumentHandle<'a>;

    /// Element handle bound to the process-wide registry
    fn el(&mut self, element: NodeId) -> ElementHandle<'_>;

    /// Element handle bound to a specific registry
    fn el_with<'a>(&'a mut self, element: NodeId, registry: &'a CapabilityRegistry) -> ElementHandle<'a>;
}

impl DocumentExt for Document {
    fn ext(&mut self) -> DocumentHandle<'_> {
        DocumentHandle::new(self, capabilities())
    }

    fn ext_with<'a>(&'a mut self, registry: &'a CapabilityRegistry) -> DocumentHandle<'a> {
        DocumentHandle::new(self, registry)
    }

    fn el(&mut self, element: NodeId) -> ElementHandle<'_> {
        ElementHandle::new(self, element, capabilities())
    }

    fn el_with<'a>(&'a mut self, element: NodeId, registry: &'a CapabilityRegistry) -> ElementHandle<'a> {
        ElementHandle::new(self, element, registry)
    }
}

/// Extensions reachable from a [`Window`]
pub trait WindowExt {
    fn ext(&mut self) -> WindowHandle<'_>;

    fn ext_with<'a>(&'a mut self, registry: &'a CapabilityRegistry) -> WindowHandle<'a>;
}

impl WindowExt for Window {
    fn ext(&mut self) -> WindowHandle<'_> {
        WindowHandle {
            window: self,
            registry: capabilities(),
        }
    }

    fn ext_with<'a>(&'a mut self, registry: &'a CapabilityRegistry) -> WindowHandle<'a> {
        WindowHandle {
            window: self,
            registry,
        }
    }
}

/// Document-level operations
pub struct DocumentHandle<'a> {
    document: &'a mut Document,
    registry: &'a CapabilityRegistry,
}

impl<'a> DocumentHandle<'a> {
    pub fn new(document: &'a mut Document, registry: &'a CapabilityRegistry) -> Self {
        Self { document, registry }
    }

    pub fn document(&mut self) -> &mut Document {
        self.document
    }

    pub fn registry(&self) -> &'a CapabilityRegistry {
        self.registry
    }

    /// Handle for an element of this document
    pub fn el(&mut self, element: NodeId) -> ElementHandle<'_> {
        ElementHandle::new(self.document, element, self.registry)
    }

    pub fn on(&mut self, event_type: &str, listener: Listener) -> &mut Self {
        let on = op(self.registry, Category::Document, "on", Document::add_event_listener as OnFn);
        on(self.document, EventTarget::DOCUMENT, event_type, listener);
        self
    }

    pub fn off(&mut self, event_type: &str, listener: &Listener) -> &mut Self {
        let off = op(self.registry, Category::Document, "off", Document::remove_event_listener as OffFn);
        off(self.document, EventTarget::DOCUMENT, event_type, listener);
        self
    }

    /// First element matching `selector`
    pub fn find(&self, selector: &str) -> Result<Option<NodeId>> {
        let find = op(self.registry, Category::Document, "find", Document::query_selector as FindFn);
        Ok(find(self.document, NodeId::ROOT, selector)?)
    }

    /// All elements matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> Result<NodeList> {
        let find_all = op(
            self.registry,
            Category::Document,
            "findAll",
            Document::query_selector_all as FindAllFn,
        );
        Ok(find_all(self.document, NodeId::ROOT, selector)?)
    }

    pub fn trigger(&mut self, event_type: &str) -> Result<&mut Self> {
        let trigger = op(self.registry, Category::Document, "trigger", events::trigger as TriggerFn);
        trigger(self.document, EventTarget::DOCUMENT, event_type)?;
        Ok(self)
    }

    /// Run `f` when the document has finished parsing
    pub fn ready<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Event) + 'static,
    {
        let ready = op(self.registry, Category::Document, "ready", events::ready as ReadyFn);
        ready(self.document, Rc::new(f));
        self
    }

    /// Detached element built from `config`; `None` for an empty tag name
    pub fn fragment(&mut self, tag_name: &str, config: Option<&Map<String, Value>>) -> Result<Option<NodeId>> {
        let fragment = op(
            self.registry,
            Category::Document,
            "fragment",
            document::fragment as FragmentFn,
        );
        fragment(self.document, tag_name, config)
    }
}

/// Element-level operations
pub struct ElementHandle<'a> {
    document: &'a mut Document,
    element: NodeId,
    registry: &'a CapabilityRegistry,
}

impl<'a> ElementHandle<'a> {
    pub fn new(document: &'a mut Document, element: NodeId, registry: &'a CapabilityRegistry) -> Self {
        Self {
            document,
            element,
            registry,
        }
    }

    pub fn id(&self) -> NodeId {
        self.element
    }

    pub fn document(&mut self) -> &mut Document {
        self.document
    }

    fn op<T: Copy + 'static>(&self, name: &str, builtin: T) -> T {
        op(self.registry, Category::Element, name, builtin)
    }

    // ---- events ----

    pub fn on(&mut self, event_type: &str, listener: Listener) -> &mut Self {
        let on = self.op("on", Document::add_event_listener as OnFn);
        on(self.document, self.element.into(), event_type, listener);
        self
    }

    pub fn off(&mut self, event_type: &str, listener: &Listener) -> &mut Self {
        let off = self.op("off", Document::remove_event_listener as OffFn);
        off(self.document, self.element.into(), event_type, listener);
        self
    }

    pub fn trigger(&mut self, event_type: &str) -> Result<&mut Self> {
        let trigger = self.op("trigger", events::trigger as TriggerFn);
        trigger(self.document, self.element.into(), event_type)?;
        Ok(self)
    }

    // ---- selection and traversal ----

    /// First descendant matching `selector`
    pub fn find(&self, selector: &str) -> Result<Option<NodeId>> {
        let find = self.op("find", Document::query_selector as FindFn);
        Ok(find(self.document, self.element, selector)?)
    }

    /// All descendants matching `selector`
    pub fn find_all(&self, selector: &str) -> Result<NodeList> {
        let find_all = self.op("findAll", Document::query_selector_all as FindAllFn);
        Ok(find_all(self.document, self.element, selector)?)
    }

    /// Class-name snapshot taken at install time
    pub fn klass(&self) -> Option<&'a str> {
        self.registry
            .resolve::<Option<String>>(Category::Element, "klass")
            .and_then(|klass| klass.as_deref())
    }

    pub fn matches(&self, selector: &str) -> Result<bool> {
        let matches = traversal::resolve_matches(self.registry)?;
        Ok(matches(self.document, self.element, selector)?)
    }

    /// Nearest inclusive ancestor matching `selector`
    pub fn closest(&self, selector: &str) -> Result<Option<NodeId>> {
        let closest = self.op("closest", traversal::closest as ClosestFn);
        Ok(closest(self.registry, self.document, self.element, selector)?)
    }

    /// Insert `child` as the first child
    pub fn prepend(&mut self, child: NodeId) -> Result<&mut Self> {
        let prepend = self.op("prepend", traversal::prepend as InsertFn);
        prepend(self.document, self.element, child)?;
        Ok(self)
    }

    /// Insert `child` as the last child
    pub fn append(&mut self, child: NodeId) -> Result<&mut Self> {
        let append = self.op("append", traversal::append as InsertFn);
        append(self.document, self.element, child)?;
        Ok(self)
    }

    // ---- attributes ----

    pub fn attr(&self, name: &str) -> Option<String> {
        (self.op::<AttrOps>("attr", ATTR).get)(self.document, self.element, name)
    }

    /// Set an attribute; falsy values (`""`, `0`, `false`, `null`) are ignored
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let set = self.op::<AttrOps>("attr", ATTR).set;
        set(self.document, self.element, name, &value.into())?;
        Ok(self)
    }

    pub fn remove_attr(&mut self, name: &str) -> &mut Self {
        let remove = self.op("removeAttr", attributes::remove_attr as RemoveAttrFn);
        remove(self.document, self.element, name);
        self
    }

    /// Value of `data-<name>`; JSON text is decoded
    pub fn data(&self, name: &str) -> Result<Option<Value>> {
        (self.op::<DataOps>("data", DATA).get)(self.registry, self.document, self.element, name)
    }

    /// Store `value` under `data-<name>`; falsy values are ignored
    pub fn set_data(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let set = self.op::<DataOps>("data", DATA).set;
        set(self.registry, self.document, self.element, name, &value.into())?;
        Ok(self)
    }

    pub fn remove_data(&mut self, name: &str) -> &mut Self {
        let remove = self.op("removeData", attributes::remove_data as RemoveDataFn);
        remove(self.registry, self.document, self.element, name);
        self
    }

    // ---- classes ----

    pub fn has_class(&self, name: &str) -> bool {
        let has_class = self.op("hasClass", class_list::has_class as HasClassFn);
        has_class(self.document, self.element, name)
    }

    fn class_op(&mut self, name: &str, builtin: ClassMutFn, class: &str) -> Result<&mut Self> {
        let apply = self.op(name, builtin);
        apply(self.registry, self.document, self.element, class)?;
        Ok(self)
    }

    pub fn add_class(&mut self, name: &str) -> Result<&mut Self> {
        self.class_op("addClass", class_list::add_class, name)
    }

    pub fn remove_class(&mut self, name: &str) -> Result<&mut Self> {
        self.class_op("removeClass", class_list::remove_class, name)
    }

    pub fn toggle_class(&mut self, name: &str) -> Result<&mut Self> {
        self.class_op("toggleClass", class_list::toggle_class, name)
    }

    // ---- style ----

    /// Computed value of a CSS property (`font-size`)
    pub fn css(&self, property: &str) -> String {
        (self.op::<CssOps>("css", CSS).get)(self.document, self.element, property)
    }

    /// Computed value parsed as a leading integer, 0 when there is none
    pub fn css_number(&self, property: &str) -> i64 {
        parse_int(&self.css(property))
    }

    /// Assign several properties; keys may be CSS or camelCase names
    pub fn set_css(&mut self, properties: &[(&str, &str)]) -> Result<&mut Self> {
        let set = self.op::<CssOps>("css", CSS).set;
        set(self.registry, self.document, self.element, properties)?;
        Ok(self)
    }
}

/// Window-level operations
pub struct WindowHandle<'a> {
    window: &'a mut Window,
    registry: &'a CapabilityRegistry,
}

impl<'a> WindowHandle<'a> {
    pub fn window(&mut self) -> &mut Window {
        self.window
    }

    /// Handle for the window's document
    pub fn document(&mut self) -> DocumentHandle<'_> {
        DocumentHandle::new(self.window.document_mut(), self.registry)
    }

    pub fn on(&mut self, event_type: &str, listener: Listener) -> &mut Self {
        let on = op(self.registry, Category::Window, "on", Document::add_event_listener as OnFn);
        on(self.window.document_mut(), EventTarget::Window, event_type, listener);
        self
    }

    pub fn off(&mut self, event_type: &str, listener: &Listener) -> &mut Self {
        let off = op(self.registry, Category::Window, "off", Document::remove_event_listener as OffFn);
        off(self.window.document_mut(), EventTarget::Window, event_type, listener);
        self
    }

    pub fn trigger(&mut self, event_type: &str) -> Result<&mut Self> {
        let trigger = op(self.registry, Category::Window, "trigger", events::trigger as TriggerFn);
        trigger(self.window.document(), EventTarget::Window, event_type)?;
        Ok(self)
    }

    /// Touch input detected when the capabilities were installed.
    ///
    /// This is the registry's value, computed from the platform the
    /// registry was built for, not from this window's platform. Bind a
    /// registry built for the same profile with [`WindowExt::ext_with`]
    /// when they can differ.
    pub fn touch_support(&self) -> bool {
        let installed = self
            .registry
            .resolve::<bool>(Category::Window, "touchSupport")
            .copied()
            .unwrap_or(false);
        if installed != device::detect_touch_support(self.window.platform()) {
            tracing::warn!(
                "touchSupport = {} from the registry disagrees with window platform {}",
                installed,
                self.window.platform().name
            );
        }
        installed
    }
}
