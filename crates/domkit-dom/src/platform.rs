//! Platform Profile
//!
//! Describes what the host exposes natively: capability names per
//! interface, prefixed `matches` variants, event construction APIs, style
//! properties and window event handler slots. Profiles are plain data and
//! can be loaded from JSON.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::PropertySupport;

/// Host object categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    Document,
    Element,
    Window,
    NodeList,
    CssStyleDeclaration,
    String,
    Event,
}

impl Interface {
    /// All categories, in declaration order
    pub const ALL: [Interface; 7] = [
        Self::Document,
        Self::Element,
        Self::Window,
        Self::NodeList,
        Self::CssStyleDeclaration,
        Self::String,
        Self::Event,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Element => "Element",
            Self::Window => "Window",
            Self::NodeList => "NodeList",
            Self::CssStyleDeclaration => "CSSStyleDeclaration",
            Self::String => "String",
            Self::Event => "Event",
        }
    }
}

/// Vendor-prefixed `matches` implementations, in probing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchesVariant {
    Webkit,
    Moz,
    Ms,
    O,
}

impl MatchesVariant {
    pub const ORDER: [MatchesVariant; 4] = [Self::Webkit, Self::Moz, Self::Ms, Self::O];

    /// Host method name
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Webkit => "webkitMatchesSelector",
            Self::Moz => "mozMatchesSelector",
            Self::Ms => "msMatchesSelector",
            Self::O => "oMatchesSelector",
        }
    }
}

/// Which prefixed `matches` variants the host exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixedMatches {
    pub webkit: bool,
    pub moz: bool,
    pub ms: bool,
    pub o: bool,
}

impl PrefixedMatches {
    pub fn has(&self, variant: MatchesVariant) -> bool {
        match variant {
            MatchesVariant::Webkit => self.webkit,
            MatchesVariant::Moz => self.moz,
            MatchesVariant::Ms => self.ms,
            MatchesVariant::O => self.o,
        }
    }

    /// First available variant in `webkit, moz, ms, o` order
    pub fn first(&self) -> Option<MatchesVariant> {
        MatchesVariant::ORDER.into_iter().find(|v| self.has(*v))
    }
}

/// Event construction APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSupport {
    /// Standards-track `document.createEvent`
    pub create_event: bool,
    /// Legacy `document.createEventObject` + `fireEvent`
    pub create_event_object: bool,
}

impl Default for EventSupport {
    fn default() -> Self {
        Self {
            create_event: true,
            create_event_object: false,
        }
    }
}

/// Host platform profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    /// Profile name for diagnostics
    pub name: String,
    /// Natively provided capability names per interface
    pub natives: BTreeMap<Interface, BTreeSet<String>>,
    /// Prefixed `matches` variants
    pub matches: PrefixedMatches,
    /// Event construction APIs
    pub events: EventSupport,
    /// Settable style properties
    pub style: PropertySupport,
    /// `on*` handler slots present on the window object
    pub window_event_handlers: BTreeSet<String>,
}

const COMMON_WINDOW_HANDLERS: &[&str] = &[
    "onblur", "onclick", "onerror", "onfocus", "onkeydown", "onkeyup", "onload", "onmousedown",
    "onmousemove", "onmouseup", "onresize", "onscroll", "onunload",
];

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Platform {
    /// Desktop engine with unprefixed `matches` and no touch input
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            natives: BTreeMap::from([(Interface::Element, names(&["matches"]))]),
            matches: PrefixedMatches::default(),
            events: EventSupport::default(),
            style: PropertySupport::standard(),
            window_event_handlers: names(COMMON_WINDOW_HANDLERS),
        }
    }

    /// Current engine that already ships `closest`, `prepend` and `append`
    pub fn modern() -> Self {
        let mut platform = Self::standard();
        platform.name = "modern".to_string();
        platform.natives.insert(
            Interface::Element,
            names(&["matches", "closest", "prepend", "append"]),
        );
        platform.window_event_handlers.insert("ontouchstart".to_string());
        platform
    }

    /// Older mobile WebKit: prefixed `matches` and style, touch input
    pub fn legacy_webkit() -> Self {
        let mut platform = Self::standard();
        platform.name = "legacy-webkit".to_string();
        platform.natives.clear();
        platform.matches = PrefixedMatches {
            webkit: true,
            ..PrefixedMatches::default()
        };
        platform.style = PropertySupport::legacy_webkit();
        platform.window_event_handlers.insert("ontouchstart".to_string());
        platform
    }

    /// Older Trident: `msMatchesSelector`, legacy events only, gesture input
    pub fn legacy_ie() -> Self {
        let mut platform = Self::standard();
        platform.name = "legacy-ie".to_string();
        platform.natives.clear();
        platform.matches = PrefixedMatches {
            ms: true,
            ..PrefixedMatches::default()
        };
        platform.events = EventSupport {
            create_event: false,
            create_event_object: true,
        };
        platform.style = PropertySupport::legacy_ie();
        platform.window_event_handlers.insert("onmsgesturechange".to_string());
        platform
    }

    /// Load a profile from JSON; missing fields come from `standard()`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check whether `interface` natively exposes `name`
    pub fn provides(&self, interface: Interface, name: &str) -> bool {
        self.natives
            .get(&interface)
            .is_some_and(|set| set.contains(name))
    }

    /// Check whether the window has an `on*` handler slot such as `ontouchstart`
    pub fn has_window_handler(&self, name: &str) -> bool {
        self.window_event_handlers.contains(name)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::standard()
    }
}
