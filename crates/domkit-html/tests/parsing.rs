//! Parsing tests for domkit-html

use domkit_dom::{NodeId, Platform, ReadyState};
use domkit_html::{parse, parse_with_platform, set_inner_html};

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    assert!(doc.document_element().is_some());
    assert!(doc.head().is_some());
    assert!(doc.body().is_some());
    assert_eq!(doc.ready_state(), ReadyState::Loading);
}

#[test]
fn test_parse_malformed_html() {
    let html = "<div><p>Unclosed paragraph<span>Unclosed span</div>";
    let doc = parse(html).unwrap();
    let body = doc.body().unwrap();
    assert_eq!(doc.query_selector_all(body, "div p span").unwrap().length(), 1);
    assert_eq!(doc.text_content(body), "Unclosed paragraphUnclosed span");
}

#[test]
fn test_attributes_and_inline_style() {
    let html = r#"<div id="main" class="a b" style="margin-top: 5px"></div>"#;
    let doc = parse(html).unwrap();
    let div = doc.get_element_by_id("main").unwrap();
    assert_eq!(doc.class_name(div), "a b");
    let computed = doc.computed_style(div).unwrap();
    assert_eq!(computed.get_property_value("margin-top"), "5px");
}

#[test]
fn test_whitespace_and_comments_kept() {
    let doc = parse("<p>a <!-- note --> b</p>").unwrap();
    let p = doc.query_selector(NodeId::ROOT, "p").unwrap().unwrap();
    assert_eq!(doc.inner_html(p), "a <!-- note --> b");
}

#[test]
fn test_platform_style_support() {
    let doc = parse_with_platform(
        r#"<div style="-ms-transform: none; transform: none"></div>"#,
        "https://example.com/",
        Platform::legacy_ie(),
    )
    .unwrap();
    assert_eq!(doc.url(), "https://example.com/");
    let div = doc.query_selector(NodeId::ROOT, "div").unwrap().unwrap();
    let style = doc.style(div).unwrap();
    assert_eq!(style.value("msTransform"), Some("none"));
    assert_eq!(style.value("transform"), None);
}

#[test]
fn test_inner_html_head_content_kept() {
    let mut doc = parse("<div id=t></div>").unwrap();
    let t = doc.get_element_by_id("t").unwrap();
    set_inner_html(&mut doc, t, "<style>p{}</style><p>x</p>").unwrap();
    assert_eq!(doc.inner_html(t), "<style>p{}</style><p>x</p>");
}
