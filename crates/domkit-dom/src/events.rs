//! DOM Events
//!
//! Event objects, listener storage and the synchronous dispatch loop.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Event listener callback
pub type Listener = Rc<dyn Fn(&mut Event)>;

/// Anything listeners can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The window object
    Window,
    /// A document or element node
    Node(NodeId),
}

impl EventTarget {
    /// The document node as a target
    pub const DOCUMENT: EventTarget = EventTarget::Node(NodeId::ROOT);

    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Window => None,
        }
    }
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    AtTarget,
    Bubbling,
}

/// Single touch point
#[derive(Debug, Clone, PartialEq)]
pub struct Touch {
    pub identifier: i64,
    pub target: EventTarget,
    pub client_x: f64,
    pub client_y: f64,
}

impl Touch {
    pub fn new(identifier: i64, target: EventTarget) -> Self {
        Self {
            identifier,
            target,
            client_x: 0.0,
            client_y: 0.0,
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
    pub timestamp: f64,
    target: Option<EventTarget>,
    current_target: Option<EventTarget>,
    phase: EventPhase,
    target_touches: Option<Vec<Touch>>,
    initialized: bool,
    legacy: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Construct an initialized event
    pub fn new(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        let mut event = Self::uninitialized(false);
        event.init_event(event_type, bubbles, cancelable);
        event
    }

    /// Event as returned by `createEvent` / `createEventObject`
    pub(crate) fn uninitialized(legacy: bool) -> Self {
        Self {
            event_type: String::new(),
            bubbles: false,
            cancelable: false,
            timestamp: 0.0,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            target_touches: None,
            initialized: false,
            legacy,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// `initEvent(type, bubbles, cancelable)`
    pub fn init_event(&mut self, event_type: &str, bubbles: bool, cancelable: bool) {
        self.event_type = event_type.to_string();
        self.bubbles = bubbles;
        self.cancelable = cancelable;
        self.initialized = true;
        self.default_prevented = false;
        self.propagation_stopped = false;
    }

    /// Attach a touch list (touch events)
    pub fn with_target_touches(mut self, touches: Vec<Touch>) -> Self {
        self.target_touches = Some(touches);
        self
    }

    /// Set the target ahead of dispatch (synthetic input)
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> Option<EventTarget> {
        self.target
    }

    pub fn current_target(&self) -> Option<EventTarget> {
        self.current_target
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    pub fn target_touches(&self) -> Option<&[Touch]> {
        self.target_touches.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Created through the legacy event-object API
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Listener registry keyed by target
#[derive(Default)]
pub struct EventListeners {
    entries: HashMap<EventTarget, Vec<(String, Listener)>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the same listener/type pair is only kept once
    pub fn add(&mut self, target: EventTarget, event_type: &str, listener: Listener) {
        let list = self.entries.entry(target).or_default();
        let present = list
            .iter()
            .any(|(t, l)| t == event_type && Rc::ptr_eq(l, &listener));
        if !present {
            list.push((event_type.to_string(), listener));
        }
    }

    /// Unregister a listener; unknown pairs are ignored
    pub fn remove(&mut self, target: EventTarget, event_type: &str, listener: &Listener) {
        if let Some(list) = self.entries.get_mut(&target) {
            list.retain(|(t, l)| !(t == event_type && Rc::ptr_eq(l, listener)));
        }
    }

    /// Listeners for a target/type, cloned so callbacks may run freely
    pub fn listeners_for(&self, target: EventTarget, event_type: &str) -> Vec<Listener> {
        self.entries
            .get(&target)
            .map(|list| {
                list.iter()
                    .filter(|(t, _)| t == event_type)
                    .map(|(_, l)| Rc::clone(l))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total registered listeners
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run listeners along `path` (target first). Returns `false` if the
    /// default action was prevented.
    pub(crate) fn dispatch(&self, path: &[EventTarget], event: &mut Event) -> bool {
        for (index, target) in path.iter().enumerate() {
            event.current_target = Some(*target);
            event.phase = if index == 0 {
                EventPhase::AtTarget
            } else {
                EventPhase::Bubbling
            };
            for listener in self.listeners_for(*target, &event.event_type) {
                listener(&mut *event);
            }
            if event.propagation_stopped || !event.bubbles {
                break;
            }
        }
        event.current_target = None;
        event.phase = EventPhase::None;
        !event.default_prevented
    }

    pub(crate) fn set_target(event: &mut Event, target: EventTarget) {
        event.target = Some(target);
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("targets", &self.entries.len())
            .field("listeners", &self.len())
            .finish()
    }
}
