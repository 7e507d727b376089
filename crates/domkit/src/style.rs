//! Style Resolver
//!
//! Batch assignment onto a style declaration with vendor-prefix probing,
//! and the element-level `css` accessor.

use domkit_dom::{CssStyleDeclaration, Document, DomError, DomResult, NodeId, to_camel_case};

use crate::{CapabilityRegistry, Category, capabilities};

/// Prefix probing order
pub const VENDOR_PREFIXES: [&str; 4] = ["webkit", "moz", "ms", "o"];

/// `CSSStyleDeclaration.set`
pub type StyleSetFn = fn(&mut CssStyleDeclaration, &[(&str, &str)]);

/// `css` getter and map setter
#[derive(Debug, Clone, Copy)]
pub struct CssOps {
    /// Computed value of a CSS property name (`margin-top`)
    pub get: fn(&Document, NodeId, &str) -> String,
    /// Camel-case the keys and apply them through `CSSStyleDeclaration.set`
    pub set: fn(&CapabilityRegistry, &mut Document, NodeId, &[(&str, &str)]) -> DomResult<()>,
}

pub(crate) const CSS: CssOps = CssOps {
    get: computed_value,
    set: set_camel_cased,
};

/// Name the declaration accepts for `property`: the literal name, else the
/// first accepted `webkit`/`moz`/`ms`/`o` variant
pub(crate) fn resolve_property(style: &CssStyleDeclaration, property: &str) -> Option<String> {
    if style.accepts(property) {
        return Some(property.to_string());
    }
    let capitalized = capitalize(property);
    VENDOR_PREFIXES
        .iter()
        .map(|prefix| format!("{prefix}{capitalized}"))
        .find(|candidate| style.accepts(candidate))
}

pub(crate) fn set_properties(style: &mut CssStyleDeclaration, properties: &[(&str, &str)]) {
    for (property, value) in properties {
        match resolve_property(style, property) {
            Some(name) => {
                style.assign(&name, value);
            }
            None => tracing::trace!("Dropping unsupported style property {}", property),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn computed_value(document: &Document, element: NodeId, property: &str) -> String {
    document
        .computed_style(element)
        .map(|style| style.get_property_value(property))
        .unwrap_or_default()
}

fn set_camel_cased(
    registry: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    properties: &[(&str, &str)],
) -> DomResult<()> {
    let set = registry
        .resolve::<StyleSetFn>(Category::CssStyleDeclaration, "set")
        .copied()
        .unwrap_or(set_properties);
    let camel_cased: Vec<(String, &str)> = properties
        .iter()
        .map(|(name, value)| (to_camel_case(name), *value))
        .collect();
    let pairs: Vec<(&str, &str)> = camel_cased
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();
    document
        .update_style(element, |style| set(style, &pairs))
        .ok_or(DomError::InvalidNodeType)
}

/// `parseInt(value, 10)`, with anything unparsable read as 0
pub fn parse_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    if negative { -magnitude } else { magnitude }
}

/// `set` on style declarations
pub trait StyleExt {
    /// Assign each property, probing vendor prefixes when the literal name
    /// is not accepted. Unsupported properties are dropped.
    fn set(&mut self, properties: &[(&str, &str)]) {
        self.set_with(capabilities(), properties)
    }

    fn set_with(&mut self, registry: &CapabilityRegistry, properties: &[(&str, &str)]);
}

impl StyleExt for CssStyleDeclaration {
    fn set_with(&mut self, registry: &CapabilityRegistry, properties: &[(&str, &str)]) {
        let set = registry
            .resolve::<StyleSetFn>(Category::CssStyleDeclaration, "set")
            .copied()
            .unwrap_or(set_properties);
        set(self, properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::PropertySupport;
    use std::sync::Arc;

    fn declaration(support: PropertySupport) -> CssStyleDeclaration {
        CssStyleDeclaration::new(Arc::new(support))
    }

    #[test]
    fn test_literal_name_wins() {
        let mut style = declaration(PropertySupport::standard());
        set_properties(&mut style, &[("transform", "none"), ("color", "red")]);
        assert_eq!(style.value("transform"), Some("none"));
        assert_eq!(style.value("color"), Some("red"));
    }

    #[test]
    fn test_prefix_probing() {
        let mut style = declaration(PropertySupport::legacy_webkit());
        set_properties(&mut style, &[("transform", "scale(2)"), ("bogus", "1")]);
        assert_eq!(style.value("webkitTransform"), Some("scale(2)"));
        assert_eq!(style.value("transform"), None);
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_probing_order() {
        let mut style = declaration(PropertySupport::from_names(["msFlex", "oFlex", "mozFlex"]));
        set_properties(&mut style, &[("flex", "1")]);
        assert_eq!(style.value("mozFlex"), Some("1"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_css_map_is_camel_cased() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        set_camel_cased(&registry, &mut doc, body, &[("margin-top", "3px"), ("Font-Size", "9px")])
            .unwrap();
        assert_eq!(computed_value(&doc, body, "margin-top"), "3px");
        assert_eq!(computed_value(&doc, body, "font-size"), "9px");
        assert!(set_camel_cased(&registry, &mut doc, NodeId::ROOT, &[("top", "0")]).is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("12px"), 12);
        assert_eq!(parse_int("  -4.5em"), -4);
        assert_eq!(parse_int("+7"), 7);
        assert_eq!(parse_int("auto"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
    }
}
