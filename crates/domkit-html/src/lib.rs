//! domkit HTML Parser
//!
//! HTML5 parsing built on html5ever. Markup is parsed into html5ever's
//! `RcDom` and then imported into the domkit arena. Whole documents go
//! through the document parser; `innerHTML` assignment uses the fragment
//! parser with the target element as context.

use domkit_dom::{Document, DomError, NodeId, Platform};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML import errors
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum HtmlError {
    #[error("innerHTML target is not an element")]
    NotAnElement,

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Parse an HTML document for the default platform
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    parse_with_platform(html, "about:blank", Platform::default())
}

/// Parse an HTML document for a specific platform profile.
///
/// The returned document is still `Loading`; call
/// [`Document::finish_parsing`] once listeners are in place.
pub fn parse_with_platform(
    html: &str,
    url: &str,
    platform: Platform,
) -> Result<Document, HtmlError> {
    tracing::debug!("Parsing HTML document: {}", url);

    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut document = Document::empty(url, platform);
    for child in dom.document.children.borrow().iter() {
        import_node(child, &mut document, NodeId::ROOT)?;
    }
    document.finalize();

    tracing::debug!("Parsed {} nodes", document.tree().len());
    Ok(document)
}

/// `element.innerHTML = markup`: replace the children of `target` with the
/// markup parsed in the context of `target`.
pub fn set_inner_html(document: &mut Document, target: NodeId, markup: &str) -> Result<(), HtmlError> {
    let Some(tag_name) = document.tag_name(target) else {
        return Err(HtmlError::NotAnElement);
    };

    let context = QualName::new(None, ns!(html), LocalName::from(tag_name.to_ascii_lowercase()));
    let dom = parse_fragment(RcDom::default(), Default::default(), context, vec![], false).one(markup);
    document.tree_mut().clear_children(target);

    // The fragment parser puts the parsed nodes under a synthetic <html> root
    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|h| element_name(h) == Some("html"))
        .cloned();
    let Some(root) = root else {
        return Ok(());
    };
    for child in root.children.borrow().iter() {
        import_node(child, document, target)?;
    }

    tracing::trace!("innerHTML replaced children of {:?}", target);
    Ok(())
}

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        RcNodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Copy an RcDom subtree under `parent`
fn import_node(handle: &Handle, document: &mut Document, parent: NodeId) -> Result<(), HtmlError> {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                import_node(child, document, parent)?;
            }
        }
        RcNodeData::Doctype { name, .. } => {
            let id = document.tree_mut().create_doctype(name);
            document.append_child(parent, id)?;
        }
        RcNodeData::Text { contents } => {
            let id = document.create_text_node(&contents.borrow());
            document.append_child(parent, id)?;
        }
        RcNodeData::Comment { contents } => {
            let id = document.create_comment(contents);
            document.append_child(parent, id)?;
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = document.tree_mut().create_element(&name.local);
            for attr in attrs.borrow().iter() {
                if let Err(e) = document.set_attribute(id, &attr.name.local, &attr.value) {
                    tracing::debug!("Skipping attribute {:?}: {}", attr.name.local, e);
                }
            }
            document.append_child(parent, id)?;
            for child in handle.children.borrow().iter() {
                import_node(child, document, id)?;
            }
        }
        RcNodeData::ProcessingInstruction { .. } => {}
    }
    Ok(())
}
