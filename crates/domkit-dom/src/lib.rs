//! domkit DOM - host Document Object Model
//!
//! Arena-based DOM tree plus the host primitives the extension layer builds
//! on: selector matching, listener dispatch, inline and computed style, and a
//! configurable platform profile describing what the host natively exposes.

mod attributes;
mod document;
mod events;
mod node;
mod node_list;
mod operations;
mod platform;
mod selector;
mod serialize;
mod style;
mod tree;
mod value;
mod window;

pub use attributes::{Attr, NamedNodeMap};
pub use document::{Document, ReadyState};
pub use events::{Event, EventListeners, EventPhase, EventTarget, Listener, Touch};
pub use node::{ElementData, Node, NodeData};
pub use node_list::NodeList;
pub use operations::{DomError, DomResult};
pub use platform::{EventSupport, Interface, MatchesVariant, Platform, PrefixedMatches};
pub use selector::{AttributeMatcher, AttributeSelector, SelectorComponent, SelectorList};
pub use style::{ComputedStyle, CssStyleDeclaration, PropertySupport, to_camel_case, to_css_name};
pub use tree::DomTree;
pub use value::{is_truthy, to_js_string};
pub use window::Window;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a null link into `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}
