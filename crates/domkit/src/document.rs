//! Document operations
//!
//! `find` / `findAll` shortcuts and `fragment` element construction.

use domkit_dom::{Document, DomResult, NodeId, NodeList, to_js_string};
use serde_json::{Map, Value};

use crate::Result;

/// `find`, scoped to the descendants of a node
pub type FindFn = fn(&Document, NodeId, &str) -> DomResult<Option<NodeId>>;

/// `findAll`, scoped to the descendants of a node
pub type FindAllFn = fn(&Document, NodeId, &str) -> DomResult<NodeList>;

/// `fragment`
pub type FragmentFn = fn(&mut Document, &str, Option<&Map<String, Value>>) -> Result<Option<NodeId>>;

/// Detached `tag_name` element configured from `config`.
///
/// The `html` key becomes inner markup with spaces turned into `&nbsp;`;
/// every other key is assigned as an element property. An empty tag name
/// yields `None`.
pub(crate) fn fragment(
    document: &mut Document,
    tag_name: &str,
    config: Option<&Map<String, Value>>,
) -> Result<Option<NodeId>> {
    if tag_name.is_empty() {
        return Ok(None);
    }
    let element = document.create_element(tag_name)?;
    for (key, value) in config.into_iter().flatten() {
        if key == "html" {
            let markup = to_js_string(value).replace(' ', "&nbsp;");
            domkit_html::set_inner_html(document, element, &markup)?;
        } else {
            document.set_property(element, key, value)?;
        }
    }
    Ok(Some(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::DomError;
    use serde_json::json;

    fn config(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_fragment_html_and_class() {
        let mut doc = Document::default();
        let cfg = config(json!({"html": "x y", "className": "c"}));
        let span = fragment(&mut doc, "span", Some(&cfg)).unwrap().unwrap();
        assert_eq!(doc.inner_html(span), "x&nbsp;y");
        assert_eq!(doc.class_name(span), "c");
        assert_eq!(doc.parent_element(span), None);
    }

    #[test]
    fn test_fragment_markup_and_properties() {
        let mut doc = Document::default();
        let cfg = config(json!({"html": "<b>bold</b>", "title": "t", "answer": 42}));
        let div = fragment(&mut doc, "div", Some(&cfg)).unwrap().unwrap();
        assert_eq!(doc.inner_html(div), "<b>bold</b>");
        assert_eq!(doc.get_attribute(div, "title"), Some("t"));
        assert_eq!(doc.property(div, "answer"), Some(json!(42)));
    }

    #[test]
    fn test_fragment_table_markup() {
        let mut doc = Document::default();
        let cfg = config(json!({"html": "<td>1</td>"}));
        let tr = fragment(&mut doc, "tr", Some(&cfg)).unwrap().unwrap();
        assert_eq!(doc.inner_html(tr), "<td>1</td>");

        let cfg = config(json!({"html": "<tr><td>1</td></tr>"}));
        let table = fragment(&mut doc, "table", Some(&cfg)).unwrap().unwrap();
        assert_eq!(doc.inner_html(table), "<tbody><tr><td>1</td></tr></tbody>");
    }

    #[test]
    fn test_fragment_sentinels() {
        let mut doc = Document::default();
        assert_eq!(fragment(&mut doc, "", None).unwrap(), None);
        assert!(fragment(&mut doc, "p", None).unwrap().is_some());
        assert!(matches!(
            fragment(&mut doc, "no spaces", None),
            Err(crate::Error::Dom(DomError::InvalidCharacter(_)))
        ));
    }
}
