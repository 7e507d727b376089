//! Window
//!
//! Global object wrapping the active document.

use crate::{Document, Platform};

/// Browser window
#[derive(Default)]
pub struct Window {
    document: Document,
}

impl Window {
    /// Window with an empty structured document
    pub fn new(platform: Platform) -> Self {
        Self {
            document: Document::with_platform("about:blank", platform),
        }
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn platform(&self) -> &Platform {
        self.document.platform()
    }

    /// Whether the window exposes the `handler` slot, e.g. `ontouchstart`
    pub fn has_event_handler(&self, handler: &str) -> bool {
        self.platform().has_window_handler(handler)
    }
}
