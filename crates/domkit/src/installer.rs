//! Capability Installer
//!
//! Seeds the host's native operations from a [`Platform`], then installs the
//! library's operations per category. Anything already present is kept.

use std::sync::OnceLock;

use domkit_dom::{Document, Platform};

use crate::attributes::{self, ATTR, DATA, RemoveAttrFn, RemoveDataFn};
use crate::class_list::{self, ClassMutFn, HasClassFn};
use crate::device::{self, DeviceTargetFn};
use crate::document::{self, FindAllFn, FindFn, FragmentFn};
use crate::events::{self, OffFn, OnFn, ReadyFn, TriggerFn};
use crate::node_list::{self, EachFn, GetFn};
use crate::render::{self, RenderFn};
use crate::style::{self, CSS, StyleSetFn};
use crate::traversal::{self, ClosestFn, InsertFn, MatchesFn};
use crate::{CapabilityRegistry, Category, UnboundNative};

/// Version stamped on every installed capability
pub const CAPABILITY_VERSION: u32 = 1;

static REGISTRY: OnceLock<CapabilityRegistry> = OnceLock::new();

/// Install the capability set for `platform` once per process.
///
/// Later calls return the registry built by the first one, whatever
/// platform they pass.
pub fn install(platform: &Platform) -> &'static CapabilityRegistry {
    if let Some(registry) = REGISTRY.get() {
        tracing::debug!("Capabilities already installed, ignoring platform {}", platform.name);
        return registry;
    }
    REGISTRY.get_or_init(|| CapabilityRegistry::for_platform(platform))
}

/// The process-wide registry, installed for the default platform if
/// nothing installed it yet
pub fn capabilities() -> &'static CapabilityRegistry {
    REGISTRY.get_or_init(|| CapabilityRegistry::for_platform(&Platform::default()))
}

impl CapabilityRegistry {
    /// Standalone registry for `platform`
    pub fn for_platform(platform: &Platform) -> Self {
        let mut registry = Self::new(CAPABILITY_VERSION);
        registry.install_platform(platform);
        registry
    }

    /// Declare the platform's natives, then install every missing capability
    pub fn install_platform(&mut self, platform: &Platform) {
        tracing::debug!("Installing capabilities for platform {}", platform.name);
        self.declare_natives(platform);
        self.install_document();
        self.install_element(platform);
        self.install_window(platform);
        self.install_node_list();
        self.install_style();
        self.install_string();
        self.install_event();
        tracing::debug!("{} capabilities available", self.len());
    }

    fn declare_natives(&mut self, platform: &Platform) {
        for (&category, names) in &platform.natives {
            for name in names {
                match (category, name.as_str()) {
                    (Category::Element, "matches") => {
                        self.declare_native(category, name, Document::matches as MatchesFn)
                    }
                    (Category::Element, "closest") => {
                        self.declare_native(category, name, traversal::native_closest as ClosestFn)
                    }
                    (Category::Element, "prepend") => {
                        self.declare_native(category, name, Document::prepend as InsertFn)
                    }
                    (Category::Element, "append") => {
                        self.declare_native(category, name, Document::append as InsertFn)
                    }
                    _ => {
                        tracing::debug!("No host binding for native {}.{}", category.name(), name);
                        self.declare_native(category, name, UnboundNative);
                    }
                }
            }
        }
    }

    fn install_document(&mut self) {
        let category = Category::Document;
        self.install(category, "on", Document::add_event_listener as OnFn);
        self.install(category, "off", Document::remove_event_listener as OffFn);
        self.install(category, "find", Document::query_selector as FindFn);
        self.install(category, "findAll", Document::query_selector_all as FindAllFn);
        self.install(category, "trigger", events::trigger as TriggerFn);
        self.install(category, "ready", events::ready as ReadyFn);
        self.install(category, "fragment", document::fragment as FragmentFn);
    }

    fn install_element(&mut self, platform: &Platform) {
        let category = Category::Element;
        self.install(category, "on", Document::add_event_listener as OnFn);
        self.install(category, "off", Document::remove_event_listener as OffFn);
        self.install(category, "find", Document::query_selector as FindFn);
        self.install(category, "findAll", Document::query_selector_all as FindAllFn);
        // Element.className is an instance property, so the snapshot is empty
        self.install(category, "klass", None::<String>);
        self.install(category, "trigger", events::trigger as TriggerFn);

        if !self.provides(category, "matches") {
            match platform.matches.first() {
                Some(variant) => {
                    tracing::debug!("Using {} for Element.matches", variant.method_name());
                    self.install(category, "matches", traversal::prefixed_matches(variant));
                }
                None => tracing::debug!("No matches variant on platform {}", platform.name),
            }
        }
        self.install(category, "closest", traversal::closest as ClosestFn);
        self.install(category, "prepend", traversal::prepend as InsertFn);
        self.install(category, "append", traversal::append as InsertFn);

        self.install(category, "attr", ATTR);
        self.install(category, "removeAttr", attributes::remove_attr as RemoveAttrFn);
        self.install(category, "data", DATA);
        self.install(category, "removeData", attributes::remove_data as RemoveDataFn);

        self.install(category, "hasClass", class_list::has_class as HasClassFn);
        self.install(category, "addClass", class_list::add_class as ClassMutFn);
        self.install(category, "removeClass", class_list::remove_class as ClassMutFn);
        self.install(category, "toggleClass", class_list::toggle_class as ClassMutFn);

        self.install(category, "css", CSS);
    }

    fn install_window(&mut self, platform: &Platform) {
        let category = Category::Window;
        self.install(category, "on", Document::add_event_listener as OnFn);
        self.install(category, "off", Document::remove_event_listener as OffFn);
        self.install(category, "trigger", events::trigger as TriggerFn);
        let touch = device::detect_touch_support(platform);
        tracing::debug!("touchSupport = {}", touch);
        self.install(category, "touchSupport", touch);
    }

    fn install_node_list(&mut self) {
        self.install(Category::NodeList, "each", node_list::each as EachFn);
        self.install(Category::NodeList, "get", node_list::get as GetFn);
    }

    fn install_style(&mut self) {
        self.install(
            Category::CssStyleDeclaration,
            "set",
            style::set_properties as StyleSetFn,
        );
    }

    fn install_string(&mut self) {
        self.install(Category::String, "render", render::render as RenderFn);
    }

    fn install_event(&mut self) {
        self.install(Category::Event, "deviceTarget", device::device_target as DeviceTargetFn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Origin;

    const INSTALLED: Option<Origin> = Some(Origin::Installed {
        version: CAPABILITY_VERSION,
    });

    #[test]
    fn test_standard_platform() {
        let registry = CapabilityRegistry::for_platform(&Platform::standard());
        assert_eq!(registry.origin(Category::Element, "matches"), Some(Origin::Native));
        assert_eq!(registry.origin(Category::Element, "closest"), INSTALLED);
        assert_eq!(registry.resolve::<bool>(Category::Window, "touchSupport"), Some(&false));
        assert_eq!(
            registry.resolve::<Option<String>>(Category::Element, "klass"),
            Some(&None)
        );
        for category in Category::ALL {
            assert!(registry.names(category).count() > 0, "{category:?} is empty");
        }
    }

    #[test]
    fn test_modern_natives_are_kept() {
        let registry = CapabilityRegistry::for_platform(&Platform::modern());
        for name in ["matches", "closest", "prepend", "append"] {
            assert_eq!(registry.origin(Category::Element, name), Some(Origin::Native));
        }
        assert!(registry.resolve::<ClosestFn>(Category::Element, "closest").is_some());
        assert_eq!(registry.resolve::<bool>(Category::Window, "touchSupport"), Some(&true));
    }

    #[test]
    fn test_prefixed_matches_installed() {
        let registry = CapabilityRegistry::for_platform(&Platform::legacy_webkit());
        assert_eq!(registry.origin(Category::Element, "matches"), INSTALLED);
        assert!(registry.resolve::<MatchesFn>(Category::Element, "matches").is_some());
    }

    #[test]
    fn test_no_matches_variant() {
        let mut platform = Platform::legacy_webkit();
        platform.matches = Default::default();
        let registry = CapabilityRegistry::for_platform(&platform);
        assert!(!registry.provides(Category::Element, "matches"));
        assert!(registry.provides(Category::Element, "closest"));
    }

    #[test]
    fn test_reinstall_keeps_everything() {
        let mut registry = CapabilityRegistry::for_platform(&Platform::standard());
        let before = registry.len();
        registry.install_platform(&Platform::modern());
        assert_eq!(registry.len(), before);
        assert_eq!(registry.origin(Category::Element, "closest"), INSTALLED);
        assert_eq!(registry.resolve::<bool>(Category::Window, "touchSupport"), Some(&false));
    }

    #[test]
    fn test_earlier_install_wins() {
        fn never(_: &Document, _: domkit_dom::NodeId, _: &str) -> bool {
            false
        }
        let mut registry = CapabilityRegistry::new(CAPABILITY_VERSION);
        registry.install(Category::Element, "hasClass", never as HasClassFn);
        registry.install_platform(&Platform::standard());

        let has_class = registry.resolve::<HasClassFn>(Category::Element, "hasClass").unwrap();
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_class_name(body, "a").unwrap();
        assert!(!has_class(&doc, body, "a"));
    }

    #[test]
    fn test_unbound_native_is_not_overwritten() {
        let platform = Platform::from_json(r#"{"natives": {"document": ["ready"]}}"#).unwrap();
        let registry = CapabilityRegistry::for_platform(&platform);
        assert_eq!(registry.origin(Category::Document, "ready"), Some(Origin::Native));
        assert_eq!(
            registry.resolve::<UnboundNative>(Category::Document, "ready"),
            Some(&UnboundNative)
        );
        assert!(registry.resolve::<ReadyFn>(Category::Document, "ready").is_none());
        assert_eq!(registry.origin(Category::Document, "fragment"), INSTALLED);
    }
}
