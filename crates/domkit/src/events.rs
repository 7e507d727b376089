//! Event Bridge
//!
//! `trigger` synthesizes a bubbling, non-cancelable event with whichever
//! construction API the host has, plus the `on` / `off` / `ready` shortcuts.

use domkit_dom::{Document, DomResult, EventTarget, Listener};

/// `trigger`
pub type TriggerFn = fn(&Document, EventTarget, &str) -> DomResult<()>;

/// `on`
pub type OnFn = fn(&mut Document, EventTarget, &str, Listener);

/// `off`
pub type OffFn = fn(&mut Document, EventTarget, &str, &Listener);

/// `ready`
pub type ReadyFn = fn(&mut Document, Listener);

pub(crate) fn trigger(document: &Document, target: EventTarget, event_type: &str) -> DomResult<()> {
    let support = document.platform().events;
    if support.create_event {
        let mut event = document.create_event("Event")?;
        event.init_event(event_type, true, false);
        document.dispatch_event(target, &mut event)?;
    } else if support.create_event_object {
        let mut event = document.create_event_object()?;
        document.fire_event(target, &format!("on{event_type}"), &mut event)?;
    } else {
        tracing::debug!(
            "No event construction API on {}, dropping {}",
            document.platform().name,
            event_type
        );
    }
    Ok(())
}

pub(crate) fn ready(document: &mut Document, listener: Listener) {
    document.add_event_listener(EventTarget::DOCUMENT, "DOMContentLoaded", listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::{Event, EventSupport, Platform};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(doc: &mut Document, target: EventTarget) -> Rc<RefCell<Vec<(String, bool, bool)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        doc.add_event_listener(target, "ping", Rc::new(move |e: &mut Event| {
            l.borrow_mut()
                .push((e.event_type().to_string(), e.bubbles, e.cancelable));
        }));
        log
    }

    #[test]
    fn test_standard_trigger_bubbles() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let log = recorder(&mut doc, EventTarget::Window);
        trigger(&doc, body.into(), "ping").unwrap();
        assert_eq!(*log.borrow(), vec![("ping".to_string(), true, false)]);
    }

    #[test]
    fn test_legacy_trigger() {
        let mut doc = Document::with_platform("about:blank", Platform::legacy_ie());
        let body = doc.body().unwrap();
        let log = recorder(&mut doc, body.into());
        trigger(&doc, body.into(), "ping").unwrap();
        assert_eq!(*log.borrow(), vec![("ping".to_string(), true, false)]);
    }

    #[test]
    fn test_trigger_without_event_api() {
        let mut platform = Platform::standard();
        platform.events = EventSupport {
            create_event: false,
            create_event_object: false,
        };
        let mut doc = Document::with_platform("about:blank", platform);
        let log = recorder(&mut doc, EventTarget::DOCUMENT);
        trigger(&doc, EventTarget::DOCUMENT, "ping").unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_ready_runs_on_content_loaded() {
        let mut doc = Document::default();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        ready(&mut doc, Rc::new(move |_: &mut Event| *h.borrow_mut() += 1));
        assert_eq!(*hits.borrow(), 0);
        doc.finish_parsing();
        assert_eq!(*hits.borrow(), 1);
    }
}
