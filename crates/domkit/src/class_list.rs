//! Class List Operations
//!
//! `hasClass`, `addClass`, `removeClass` and `toggleClass` over the raw
//! `class` attribute text. Names are compared as literal tokens.

use domkit_dom::{Document, DomResult, NodeId};

use crate::{CapabilityRegistry, Category};

/// `hasClass`
pub type HasClassFn = fn(&Document, NodeId, &str) -> bool;

/// `addClass` / `removeClass` / `toggleClass`
pub type ClassMutFn = fn(&CapabilityRegistry, &mut Document, NodeId, &str) -> DomResult<()>;

pub(crate) fn has_class(document: &Document, element: NodeId, name: &str) -> bool {
    document
        .class_name(element)
        .split_whitespace()
        .any(|token| token == name)
}

pub(crate) fn add_class(
    _: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    name: &str,
) -> DomResult<()> {
    let current = document.class_name(element);
    let updated = if current.is_empty() {
        name.to_string()
    } else {
        format!("{current} {name}")
    };
    document.set_class_name(element, &updated)
}

pub(crate) fn remove_class(
    registry: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    name: &str,
) -> DomResult<()> {
    if resolve_has_class(registry)(document, element, name) {
        let updated = strip_token(document.class_name(element), name);
        document.set_class_name(element, &updated)?;
    }
    Ok(())
}

pub(crate) fn toggle_class(
    registry: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    name: &str,
) -> DomResult<()> {
    if resolve_has_class(registry)(document, element, name) {
        let updated = strip_token(document.class_name(element), name);
        document.set_class_name(element, &updated)
    } else {
        add_class(registry, document, element, name)
    }
}

fn resolve_has_class(registry: &CapabilityRegistry) -> HasClassFn {
    registry
        .resolve::<HasClassFn>(Category::Element, "hasClass")
        .copied()
        .unwrap_or(has_class)
}

/// Remove every `name` token together with one adjacent whitespace run
/// (the preceding one when there is one). Other whitespace is kept as is.
fn strip_token(class_name: &str, name: &str) -> String {
    let mut runs: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in class_name.char_indices() {
        let space = c.is_whitespace();
        if in_space != Some(space) {
            if i > start {
                runs.push(&class_name[start..i]);
            }
            start = i;
            in_space = Some(space);
        }
    }
    if start < class_name.len() {
        runs.push(&class_name[start..]);
    }

    let is_space = |run: &str| run.starts_with(char::is_whitespace);
    let mut keep = vec![true; runs.len()];
    for i in 0..runs.len() {
        if is_space(runs[i]) || runs[i] != name {
            continue;
        }
        keep[i] = false;
        if i > 0 && keep[i - 1] {
            keep[i - 1] = false;
        } else if i + 1 < runs.len() {
            keep[i + 1] = false;
        }
    }

    runs.iter()
        .zip(keep)
        .filter(|(_, kept)| *kept)
        .map(|(run, _)| *run)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_token() {
        assert_eq!(strip_token("a b c", "b"), "a c");
        assert_eq!(strip_token("b a", "b"), "a");
        assert_eq!(strip_token("a b", "b"), "a");
        assert_eq!(strip_token("b", "b"), "");
        assert_eq!(strip_token("b b c", "b"), "c");
        assert_eq!(strip_token("a b c b", "b"), "a c");
    }

    #[test]
    fn test_strip_token_keeps_other_whitespace() {
        assert_eq!(strip_token("a  b  c", "b"), "a  c");
        assert_eq!(strip_token(" x  b", "x"), "  b");
        assert_eq!(strip_token("a\tb\nc", "b"), "a\nc");
    }

    #[test]
    fn test_strip_token_is_literal() {
        assert_eq!(strip_token("a.b ab", "a.b"), "ab");
        assert_eq!(strip_token("ab", "a"), "ab");
    }

    #[test]
    fn test_has_class_is_literal() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_class_name(body, "btn btn-primary a+b").unwrap();
        assert!(has_class(&doc, body, "btn"));
        assert!(has_class(&doc, body, "a+b"));
        assert!(!has_class(&doc, body, "btn-"));
        assert!(!has_class(&doc, body, "b.n"));
        assert!(!has_class(&doc, body, ".*"));
    }

    #[test]
    fn test_has_empty_class() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        assert!(!has_class(&doc, body, ""));
        doc.set_class_name(body, "a  b").unwrap();
        assert!(!has_class(&doc, body, ""));
    }

    #[test]
    fn test_add_class_appends_duplicates() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        add_class(&registry, &mut doc, body, "a").unwrap();
        add_class(&registry, &mut doc, body, "a").unwrap();
        assert_eq!(doc.class_name(body), "a a");
        remove_class(&registry, &mut doc, body, "a").unwrap();
        assert_eq!(doc.class_name(body), "");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_class_name(body, "x y").unwrap();
        toggle_class(&registry, &mut doc, body, "z").unwrap();
        assert_eq!(doc.class_name(body), "x y z");
        toggle_class(&registry, &mut doc, body, "z").unwrap();
        assert_eq!(doc.class_name(body), "x y");
    }
}
