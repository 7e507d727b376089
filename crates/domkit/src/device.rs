//! Device input helpers
//!
//! `deviceTarget` on events and the install-time `touchSupport` check.

use domkit_dom::{Event, EventTarget, Platform};

use crate::{CapabilityRegistry, Category, capabilities};

/// `deviceTarget`
pub type DeviceTargetFn = fn(&Event) -> Option<EventTarget>;

/// First touch target for touch events, else the event target
pub(crate) fn device_target(event: &Event) -> Option<EventTarget> {
    match event.target_touches() {
        Some([first, ..]) => Some(first.target),
        _ => event.target(),
    }
}

/// True when the window has an `ontouchstart` or `onmsgesturechange` slot
pub(crate) fn detect_touch_support(platform: &Platform) -> bool {
    platform.has_window_handler("ontouchstart") || platform.has_window_handler("onmsgesturechange")
}

/// `deviceTarget` on events
pub trait EventExt {
    fn device_target(&self) -> Option<EventTarget> {
        self.device_target_with(capabilities())
    }

    fn device_target_with(&self, registry: &CapabilityRegistry) -> Option<EventTarget>;
}

impl EventExt for Event {
    fn device_target_with(&self, registry: &CapabilityRegistry) -> Option<EventTarget> {
        let target_fn = registry
            .resolve::<DeviceTargetFn>(Category::Event, "deviceTarget")
            .copied()
            .unwrap_or(device_target);
        target_fn(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::{NodeId, Touch};

    #[test]
    fn test_touch_target_preferred() {
        let mut doc = domkit_dom::Document::default();
        let finger = doc.create_element("button").unwrap();
        let body = doc.body().unwrap();
        let event = Event::new("touchstart", true, true)
            .with_target(body.into())
            .with_target_touches(vec![Touch::new(0, finger.into()), Touch::new(1, body.into())]);
        assert_eq!(device_target(&event), Some(EventTarget::Node(finger)));
    }

    #[test]
    fn test_mouse_and_empty_touch_list() {
        let mouse = Event::new("click", true, true).with_target(NodeId::ROOT.into());
        assert_eq!(device_target(&mouse), Some(EventTarget::DOCUMENT));

        let lifted = Event::new("touchend", true, true)
            .with_target(EventTarget::Window)
            .with_target_touches(Vec::new());
        assert_eq!(device_target(&lifted), Some(EventTarget::Window));
    }

    #[test]
    fn test_detect_touch_support() {
        assert!(!detect_touch_support(&Platform::standard()));
        assert!(detect_touch_support(&Platform::modern()));
        assert!(detect_touch_support(&Platform::legacy_ie()));
    }
}
