//! Attribute Accessor
//!
//! Plain attribute access plus `data-*` attributes with JSON encoding for
//! structured values.

use domkit_dom::{Document, DomResult, NodeId, is_truthy, to_js_string};
use serde_json::Value;

use crate::{CapabilityRegistry, Category, Result};

/// `attr` getter and setter
#[derive(Debug, Clone, Copy)]
pub struct AttrOps {
    pub get: fn(&Document, NodeId, &str) -> Option<String>,
    /// Falsy values leave the attribute untouched
    pub set: fn(&mut Document, NodeId, &str, &Value) -> DomResult<()>,
}

/// `removeAttr` / `removeData`
pub type RemoveAttrFn = fn(&mut Document, NodeId, &str);
pub type RemoveDataFn = fn(&CapabilityRegistry, &mut Document, NodeId, &str);

/// `data` getter and setter
#[derive(Debug, Clone, Copy)]
pub struct DataOps {
    pub get: fn(&CapabilityRegistry, &Document, NodeId, &str) -> Result<Option<Value>>,
    pub set: fn(&CapabilityRegistry, &mut Document, NodeId, &str, &Value) -> Result<()>,
}

pub(crate) const ATTR: AttrOps = AttrOps {
    get: get_attr,
    set: set_attr,
};

pub(crate) const DATA: DataOps = DataOps {
    get: get_data,
    set: set_data,
};

/// `fooBar` -> `data-foo-bar`: hyphen before every internal uppercase
/// letter, then lowercase the whole key
pub fn data_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 8);
    key.push_str("data-");
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            key.push('-');
        }
        key.extend(c.to_lowercase());
    }
    key
}

fn get_attr(document: &Document, element: NodeId, name: &str) -> Option<String> {
    document.get_attribute(element, name).map(str::to_string)
}

fn set_attr(document: &mut Document, element: NodeId, name: &str, value: &Value) -> DomResult<()> {
    if !is_truthy(value) {
        return Ok(());
    }
    document.set_attribute(element, name, &to_js_string(value))
}

pub(crate) fn remove_attr(document: &mut Document, element: NodeId, name: &str) {
    document.remove_attribute(element, name);
}

fn resolve_attr(registry: &CapabilityRegistry) -> AttrOps {
    registry
        .resolve::<AttrOps>(Category::Element, "attr")
        .copied()
        .unwrap_or(ATTR)
}

fn get_data(
    registry: &CapabilityRegistry,
    document: &Document,
    element: NodeId,
    name: &str,
) -> Result<Option<Value>> {
    let Some(text) = (resolve_attr(registry).get)(document, element, &data_key(name)) else {
        return Ok(None);
    };
    if text.starts_with(['[', '{']) {
        Ok(Some(serde_json::from_str(&text)?))
    } else {
        Ok(Some(Value::String(text)))
    }
}

fn set_data(
    registry: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    name: &str,
    value: &Value,
) -> Result<()> {
    if !is_truthy(value) {
        return Ok(());
    }
    let stored = match value {
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value)?,
        other => to_js_string(other),
    };
    (resolve_attr(registry).set)(document, element, &data_key(name), &Value::String(stored))?;
    Ok(())
}

pub(crate) fn remove_data(
    registry: &CapabilityRegistry,
    document: &mut Document,
    element: NodeId,
    name: &str,
) {
    let remove = registry
        .resolve::<RemoveAttrFn>(Category::Element, "removeAttr")
        .copied()
        .unwrap_or(remove_attr);
    remove(document, element, &data_key(name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_key() {
        assert_eq!(data_key("foo"), "data-foo");
        assert_eq!(data_key("fooBarBaz"), "data-foo-bar-baz");
        assert_eq!(data_key("Foo"), "data-foo");
        assert_eq!(data_key("aB1C"), "data-a-b1-c");
    }

    #[test]
    fn test_falsy_values_do_not_set() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        set_attr(&mut doc, body, "bar", &json!("baz")).unwrap();
        for falsy in [json!(""), json!(0), json!(false), json!(null)] {
            set_attr(&mut doc, body, "bar", &falsy).unwrap();
            assert_eq!(get_attr(&doc, body, "bar").as_deref(), Some("baz"));
        }
        set_attr(&mut doc, body, "bar", &json!(42)).unwrap();
        assert_eq!(get_attr(&doc, body, "bar").as_deref(), Some("42"));
    }

    #[test]
    fn test_data_encoding() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();

        set_data(&registry, &mut doc, body, "foo", &json!({"number": 16})).unwrap();
        assert_eq!(doc.get_attribute(body, "data-foo"), Some(r#"{"number":16}"#));
        set_data(&registry, &mut doc, body, "list", &json!([1, "a"])).unwrap();
        assert_eq!(doc.get_attribute(body, "data-list"), Some(r#"[1,"a"]"#));
        set_data(&registry, &mut doc, body, "count", &json!(7)).unwrap();
        assert_eq!(doc.get_attribute(body, "data-count"), Some("7"));

        let count = get_data(&registry, &doc, body, "count").unwrap();
        assert_eq!(count, Some(json!("7")));
        let foo = get_data(&registry, &doc, body, "foo").unwrap();
        assert_eq!(foo, Some(json!({"number": 16})));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_attribute(body, "data-broken", "{nope").unwrap();
        assert!(matches!(
            get_data(&registry, &doc, body, "broken"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_remove_data() {
        let registry = CapabilityRegistry::new(1);
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.set_attribute(body, "data-user-id", "5").unwrap();
        remove_data(&registry, &mut doc, body, "userId");
        assert_eq!(get_data(&registry, &doc, body, "userId").unwrap(), None);
    }
}
