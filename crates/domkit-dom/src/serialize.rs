//! HTML Serialization
//!
//! `innerHTML` / `outerHTML` getters.

use crate::{DomTree, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize the children of `id`
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for (child, _) in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize `id` including itself
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Document => out.push_str(&inner_html(tree, id)),
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(text) => {
            let raw = tree
                .parent_element(id)
                .and_then(|p| tree.element(p))
                .is_some_and(|e| matches!(e.tag_name.as_str(), "script" | "style"));
            if raw {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag_name);
            for attr in elem.attrs.iter() {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                if attr.name == "style" && !elem.style.is_empty() {
                    escape_into(&elem.style.css_text(), true, out);
                } else {
                    escape_into(&attr.value, true, out);
                }
                out.push('"');
            }
            if !elem.style.is_empty() && elem.get_attr("style").is_none() {
                out.push_str(" style=\"");
                escape_into(&elem.style.css_text(), true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&elem.tag_name.as_str()) {
                return;
            }
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&elem.tag_name);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let br = tree.create_element("br");
        let text = tree.create_text("a < b & c\u{a0}d");
        tree.element_mut(div).unwrap().attrs.set_attribute("title", "say \"hi\"");
        tree.append_child(div, text).unwrap();
        tree.append_child(div, br).unwrap();

        assert_eq!(inner_html(&tree, div), "a &lt; b &amp; c&nbsp;d<br>");
        assert_eq!(
            outer_html(&tree, div),
            "<div title=\"say &quot;hi&quot;\">a &lt; b &amp; c&nbsp;d<br></div>"
        );
    }
}
