//! Tests for tree queries on a parsed document.

use pretty_assertions::assert_eq;
use trellis_core::dom::{parse_html, Node};

#[test]
fn test_text_content_skips_comments() {
    let doc = parse_html("<div>a<b>b</b><!--c-->d</div>");
    assert_eq!(doc.text_content(), "abd");
    assert_eq!(doc.elements_by_tag("div")[0].text_content(), "abd");
    assert_eq!(doc.len(), 7);
}

#[test]
fn test_elements_by_tag_preorder() {
    let doc = parse_html("<ul><li>1<ul><li>2</li></ul></li><li>3</li></ul>");
    let items: Vec<String> = doc
        .elements_by_tag("LI")
        .iter()
        .map(|li| li.text_content())
        .collect();
    assert_eq!(items, vec!["12", "2", "3"]);

    let outer = doc.elements_by_tag("ul")[0];
    assert_eq!(outer.elements_by_tag("ul").len(), 2);
    assert!(doc.elements_by_tag("table").is_empty());
}

#[test]
fn test_style_blocks_in_order() {
    let doc = parse_html("<style>p { color: red; }</style><div><style>.a{}</style></div>");
    assert_eq!(doc.style_blocks(), vec!["p { color: red; }", ".a{}"]);
}

#[test]
fn test_title() {
    let doc = parse_html("<head><title>  Hello &amp; bye </title></head>");
    assert_eq!(doc.title().as_deref(), Some("Hello & bye"));
    assert_eq!(parse_html("<p>x</p>").title(), None);
}

#[test]
fn test_node_accessors() {
    let doc = parse_html(r#"<p id="intro" class="lead  big">x</p><!--note-->"#);
    let p = doc.elements_by_tag("p")[0];
    assert!(p.is_element());
    assert_eq!(p.element_id(), Some("intro"));
    assert_eq!(p.classes().collect::<Vec<_>>(), vec!["lead", "big"]);
    assert_eq!(doc.parent_id(p.id()), Some(doc.root_id()));
    assert_eq!(p.id().index(), 1);

    let comment = doc.root().children().last().unwrap();
    assert!(!comment.is_element());
    assert_eq!(comment.node(), &Node::Comment("note".to_string()));
    assert_eq!(comment.tag_name(), None);
    assert_eq!(comment.attr("id"), None);
}

#[test]
fn test_try_get_rejects_foreign_ids() {
    let big = parse_html("<p>a</p><p>b</p><p>c</p>");
    let small = parse_html("<p>a</p>");
    let last = big.elements_by_tag("p")[2].id();
    assert!(small.try_get(last).is_none());
    assert_eq!(big.try_get(last).and_then(|n| n.tag_name()), Some("p"));
}

#[test]
fn test_descendants_preorder() {
    let doc = parse_html("<div><p>a</p><span>b</span></div><i>c</i>");
    let tags: Vec<&str> = doc
        .root()
        .descendants()
        .map(|n| n.tag_name().or(n.as_text()).unwrap_or("?"))
        .collect();
    assert_eq!(tags, vec!["html", "div", "p", "a", "span", "b", "i", "c"]);
}
