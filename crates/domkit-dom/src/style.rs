//! Inline and Computed Style
//!
//! `CssStyleDeclaration` only accepts the property names its platform
//! supports; anything else is not a string-typed slot and is rejected.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unprefixed properties every preset accepts
const COMMON_PROPERTIES: &[&str] = &[
    "alignItems",
    "background",
    "backgroundColor",
    "backgroundImage",
    "border",
    "borderColor",
    "borderRadius",
    "borderStyle",
    "borderWidth",
    "bottom",
    "boxSizing",
    "clear",
    "color",
    "cssFloat",
    "cursor",
    "display",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "height",
    "left",
    "lineHeight",
    "margin",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "marginTop",
    "maxHeight",
    "maxWidth",
    "minHeight",
    "minWidth",
    "opacity",
    "outline",
    "overflow",
    "padding",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
    "paddingTop",
    "position",
    "right",
    "textAlign",
    "textDecoration",
    "top",
    "verticalAlign",
    "visibility",
    "whiteSpace",
    "width",
    "zIndex",
];

/// Properties that older engines only expose behind a vendor prefix
const PREFIXABLE_PROPERTIES: &[&str] = &[
    "animation",
    "boxShadow",
    "flex",
    "transform",
    "transformOrigin",
    "transition",
    "userSelect",
];

/// Set of style property names (camelCase) a platform accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySupport {
    properties: BTreeSet<String>,
}

impl PropertySupport {
    /// Accept exactly the given names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Current engines: everything unprefixed
    pub fn standard() -> Self {
        Self::from_names(COMMON_PROPERTIES.iter().chain(PREFIXABLE_PROPERTIES).copied())
    }

    /// Older WebKit: newer properties only as `webkit*`
    pub fn legacy_webkit() -> Self {
        Self::legacy("webkit")
    }

    /// Older Trident: newer properties only as `ms*`
    pub fn legacy_ie() -> Self {
        Self::legacy("ms")
    }

    fn legacy(prefix: &str) -> Self {
        let prefixed = PREFIXABLE_PROPERTIES
            .iter()
            .map(|p| format!("{prefix}{}", capitalize(p)));
        Self::from_names(
            COMMON_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .chain(prefixed),
        )
    }

    /// Check if `property` is a settable (string-typed) slot
    pub fn accepts(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    /// Add a property name
    pub fn insert(&mut self, property: impl Into<String>) {
        self.properties.insert(property.into());
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Inline style declaration of one element
#[derive(Debug, Clone)]
pub struct CssStyleDeclaration {
    support: Arc<PropertySupport>,
    values: Vec<(String, String)>,
}

impl CssStyleDeclaration {
    /// Create an empty declaration
    pub fn new(support: Arc<PropertySupport>) -> Self {
        Self {
            support,
            values: Vec::new(),
        }
    }

    /// Check whether `property` is a string-typed slot on this declaration
    pub fn accepts(&self, property: &str) -> bool {
        self.support.accepts(property)
    }

    /// Assign a value; returns `false` if the property is not accepted
    pub fn assign(&mut self, property: &str, value: &str) -> bool {
        if !self.accepts(property) {
            return false;
        }
        if value.is_empty() {
            self.values.retain(|(name, _)| name != property);
            return true;
        }
        match self.values.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.values.push((property.to_string(), value.to_string())),
        }
        true
    }

    /// Current value of a property, if set
    pub fn value(&self, property: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, v)| v.as_str())
    }

    /// Number of set properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over set `(camelCase name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace all values from a `style` attribute (`color: red; top: 0`)
    pub fn set_css_text(&mut self, text: &str) {
        self.values.clear();
        for declaration in text.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let property = to_camel_case(name.trim().trim_start_matches('-'));
                self.assign(&property, value.trim());
            }
        }
    }

    /// Serialized declaration block
    pub fn css_text(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{}: {};", to_css_name(k), v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Read-only resolved style of an element
#[derive(Debug, Clone, Copy)]
pub struct ComputedStyle<'a> {
    tag_name: &'a str,
    inline: &'a CssStyleDeclaration,
}

impl<'a> ComputedStyle<'a> {
    pub(crate) fn new(tag_name: &'a str, inline: &'a CssStyleDeclaration) -> Self {
        Self { tag_name, inline }
    }

    /// Resolved value for a CSS property name (`font-size`); `""` if unknown
    pub fn get_property_value(&self, name: &str) -> String {
        let property = to_camel_case(name.trim_start_matches('-'));
        if let Some(value) = self.inline.value(&property) {
            return value.to_string();
        }
        initial_value(&property, self.tag_name).to_string()
    }
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "div", "dl", "fieldset", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "main",
    "nav", "ol", "p", "pre", "section", "table", "ul",
];

fn initial_value(property: &str, tag_name: &str) -> &'static str {
    match property {
        "display" => match tag_name {
            "head" | "script" | "style" | "template" | "title" | "meta" | "link" => "none",
            "li" => "list-item",
            t if BLOCK_ELEMENTS.contains(&t) => "block",
            _ => "inline",
        },
        "opacity" => "1",
        "visibility" => "visible",
        "position" => "static",
        "width" | "height" | "top" | "left" | "right" | "bottom" | "zIndex" => "auto",
        "marginTop" | "marginRight" | "marginBottom" | "marginLeft" | "paddingTop"
        | "paddingRight" | "paddingBottom" | "paddingLeft" => "0px",
        "color" => "rgb(0, 0, 0)",
        "backgroundColor" => "rgba(0, 0, 0, 0)",
        "fontSize" => "16px",
        "fontWeight" => "400",
        _ => "",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `background-color` -> `backgroundColor`. The input is lowercased first.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().flat_map(char::to_lowercase);
    while let Some(c) = chars.next() {
        if c == '-' {
            match chars.next() {
                Some(next) => result.extend(next.to_uppercase()),
                None => result.push('-'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// `webkitTransform` -> `-webkit-transform`, `fontSize` -> `font-size`
pub fn to_css_name(property: &str) -> String {
    let mut result = String::with_capacity(property.len() + 4);
    if ["webkit", "moz", "ms", "o"].iter().any(|p| {
        property
            .strip_prefix(p)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    }) {
        result.push('-');
    }
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
