//! Traversal Operations
//!
//! `closest` and the `prepend` / `append` insertion helpers.

use domkit_dom::{Document, DomError, DomResult, MatchesVariant, NodeId};

use crate::{CapabilityRegistry, Category};

/// `matches` and its vendor-prefixed variants
pub type MatchesFn = fn(&Document, NodeId, &str) -> DomResult<bool>;

/// `closest`
pub type ClosestFn = fn(&CapabilityRegistry, &Document, NodeId, &str) -> DomResult<Option<NodeId>>;

/// `prepend` / `append`
pub type InsertFn = fn(&mut Document, NodeId, NodeId) -> DomResult<()>;

/// Host method implementing a prefixed `matches` variant
pub(crate) fn prefixed_matches(variant: MatchesVariant) -> MatchesFn {
    match variant {
        MatchesVariant::Webkit => Document::webkit_matches_selector,
        MatchesVariant::Moz => Document::moz_matches_selector,
        MatchesVariant::Ms => Document::ms_matches_selector,
        MatchesVariant::O => Document::o_matches_selector,
    }
}

/// The `matches` capability, or the host's "not supported" error
pub(crate) fn resolve_matches(registry: &CapabilityRegistry) -> DomResult<MatchesFn> {
    registry
        .resolve::<MatchesFn>(Category::Element, "matches")
        .copied()
        .ok_or_else(|| DomError::NotSupported("Element.matches".to_string()))
}

/// Nearest inclusive ancestor element matching `selector`
pub(crate) fn closest(
    registry: &CapabilityRegistry,
    document: &Document,
    element: NodeId,
    selector: &str,
) -> DomResult<Option<NodeId>> {
    let matches = resolve_matches(registry)?;
    let mut current = Some(element).filter(|&id| document.is_element(id));
    while let Some(id) = current {
        if matches(document, id, selector)? {
            return Ok(Some(id));
        }
        current = document.parent_element(id);
    }
    Ok(None)
}

/// Host `Element.closest`
pub(crate) fn native_closest(
    _: &CapabilityRegistry,
    document: &Document,
    element: NodeId,
    selector: &str,
) -> DomResult<Option<NodeId>> {
    document.closest(element, selector)
}

pub(crate) fn prepend(document: &mut Document, parent: NodeId, child: NodeId) -> DomResult<()> {
    let first = document.first_child(parent);
    document.insert_before(parent, child, first)
}

pub(crate) fn append(document: &mut Document, parent: NodeId, child: NodeId) -> DomResult<()> {
    document.append_child(parent, child)
}
