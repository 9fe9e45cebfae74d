//! Tests for markup parsing and its recovery rules.

use pretty_assertions::assert_eq;
use trellis_core::dom::{parse_html, Document, Node, NodeRef};

fn root_children(doc: &Document) -> Vec<NodeRef<'_>> {
    doc.root().children().collect()
}

fn text_of(node: &NodeRef<'_>) -> String {
    node.as_text().expect("expected a text node").to_string()
}

#[test]
fn test_well_formed_element() {
    let doc = parse_html(r#"<section data-kind="v">text</section>"#);
    assert_eq!(doc.root().tag_name(), Some("html"));

    let children = root_children(&doc);
    assert_eq!(children.len(), 1);
    let section = children[0];
    assert_eq!(section.tag_name(), Some("section"));
    assert_eq!(section.attr("data-kind"), Some("v"));

    let inner: Vec<_> = section.children().collect();
    assert_eq!(inner.len(), 1);
    assert_eq!(text_of(&inner[0]), "text");
}

#[test]
fn test_void_element_never_has_children() {
    let doc = parse_html(r#"<img src="x">stray</img>"#);
    let children = root_children(&doc);
    assert_eq!(children.len(), 2);

    assert_eq!(children[0].tag_name(), Some("img"));
    assert_eq!(children[0].attr("src"), Some("x"));
    assert_eq!(children[0].children().count(), 0);
    assert_eq!(text_of(&children[1]), "stray");
}

#[test]
fn test_void_elements_list() {
    let doc = parse_html("<p>a<br>b<hr>c<input type=text>d</p>");
    let p = doc.elements_by_tag("p")[0];
    let kinds: Vec<String> = p
        .children()
        .map(|c| match c.node() {
            Node::Element(e) => e.tag_name.clone(),
            Node::Text(t) => format!("'{t}'"),
            Node::Comment(_) => "comment".to_string(),
        })
        .collect();
    assert_eq!(kinds, vec!["'a'", "br", "'b'", "hr", "'c'", "input", "'d'"]);
}

#[test]
fn test_doctype_is_skipped() {
    for html in ["<!DOCTYPE html><p>a</p>", "  <!doctype html>\n<p>a</p>"] {
        let doc = parse_html(html);
        let children = root_children(&doc);
        assert_eq!(children.len(), 1, "input: {html}");
        assert_eq!(children[0].tag_name(), Some("p"));
    }
}

#[test]
fn test_names_are_lowercased_values_are_not() {
    let doc = parse_html(r#"<DIV ID="Main" Class="Big">x</DIV><p>y</p>"#);
    let children = root_children(&doc);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].tag_name(), Some("div"));
    assert_eq!(children[0].attr("id"), Some("Main"));
    assert_eq!(children[0].attr("class"), Some("Big"));
    assert_eq!(children[1].tag_name(), Some("p"));
}

#[test]
fn test_duplicate_attribute_last_wins() {
    let doc = parse_html(r#"<a href="1" title="t" href="2">x</a>"#);
    let a = doc.elements_by_tag("a")[0];
    let attrs = &a.as_element().unwrap().attributes;
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("href"), Some("2"));
    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["href", "title"]);
}

#[test]
fn test_attribute_value_forms() {
    let doc = parse_html(r#"<input type=text disabled value='a b' title = "q">"#);
    let input = doc.elements_by_tag("input")[0];
    assert_eq!(input.attr("type"), Some("text"));
    assert_eq!(input.attr("disabled"), Some(""));
    assert_eq!(input.attr("value"), Some("a b"));
    assert_eq!(input.attr("title"), Some("q"));
}

#[test]
fn test_entities_decoded_in_text_and_attributes() {
    let doc = parse_html(r#"<p title="&lt;hi&gt;">Tom &amp; Jerry</p>"#);
    let p = doc.elements_by_tag("p")[0];
    assert_eq!(p.attr("title"), Some("<hi>"));
    assert_eq!(p.text_content(), "Tom & Jerry");
}

#[test]
fn test_self_closing_element() {
    let doc = parse_html("<div/>after");
    let children = root_children(&doc);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].tag_name(), Some("div"));
    assert_eq!(children[0].children().count(), 0);
    assert_eq!(text_of(&children[1]), "after");
}

#[test]
fn test_comments() {
    let doc = parse_html("<!-- note --><p>x</p><!-- oops");
    let children = root_children(&doc);
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].node(), &Node::Comment(" note ".to_string()));
    assert_eq!(children[1].tag_name(), Some("p"));
    assert_eq!(children[2].node(), &Node::Comment(" oops".to_string()));
}

#[test]
fn test_orphan_closing_tags_are_dropped() {
    let doc = parse_html("</span><div>a</span>b</div>");
    let children = root_children(&doc);
    assert_eq!(children.len(), 1);

    let texts: Vec<String> = children[0].children().map(|c| text_of(&c)).collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn test_closing_tag_matches_case_insensitively() {
    let doc = parse_html("<p>one</P><p>two</p>");
    assert_eq!(root_children(&doc).len(), 2);
}

#[test]
fn test_unterminated_element_ends_at_end_of_input() {
    let doc = parse_html("<div><p>hello");
    let div = root_children(&doc)[0];
    let p = div.children().next().unwrap();
    assert_eq!(p.tag_name(), Some("p"));
    assert_eq!(p.text_content(), "hello");
}

#[test]
fn test_mismatched_close_leaves_outer_open() {
    // </div> inside <p> is an orphan there, so <p> runs to the end.
    let doc = parse_html("<div><p>a</div><span>b</span>");
    let div = root_children(&doc)[0];
    let p = div.children().next().unwrap();
    assert_eq!(p.tag_name(), Some("p"));
    assert_eq!(p.children().count(), 2);
    assert_eq!(root_children(&doc).len(), 1);
}

#[test]
fn test_leading_whitespace_skipped_trailing_kept() {
    let doc = parse_html("<p>  Hello <b>world</b></p>");
    let p = doc.elements_by_tag("p")[0];
    let first = p.children().next().unwrap();
    assert_eq!(text_of(&first), "Hello ");
}

#[test]
fn test_stray_less_than_is_text() {
    let doc = parse_html("a < b <!x> c <");
    assert_eq!(doc.text_content(), "a < b <!x> c <");
    assert!(root_children(&doc).iter().all(|c| c.as_text().is_some()));
}

#[test]
fn test_empty_input() {
    let doc = parse_html("");
    assert_eq!(doc.root().tag_name(), Some("html"));
    assert!(doc.is_empty());
    assert_eq!(root_children(&doc).len(), 0);

    let doc = parse_html("   \n\t ");
    assert!(doc.is_empty());
}

#[test]
fn test_garbage_never_panics() {
    let inputs = [
        "<",
        "</",
        "<a",
        "<a href=",
        "<a href=\"unterminated",
        "<<<>>>",
        "<!---->",
        "<p/ >x",
        "<p =x>y</p>",
        "<div><div><div>",
        "&&&;;;",
    ];
    for html in inputs {
        let doc = parse_html(html);
        assert_eq!(doc.root().tag_name(), Some("html"), "input: {html}");
    }
}

#[test]
fn test_parent_back_reference() {
    let doc = parse_html(r#"<a href="/home"><b>x</b></a><p>y</p>"#);
    let b = doc.elements_by_tag("b")[0];
    let text = b.children().next().unwrap();

    assert_eq!(text.parent().unwrap().id(), b.id());
    let chain: Vec<&str> = text.ancestors().filter_map(|a| a.tag_name()).collect();
    assert_eq!(chain, vec!["b", "a", "html"]);
    assert!(text.is_inside("a"));
    assert_eq!(text.closest("a").and_then(|a| a.attr("href")), Some("/home"));

    let p_text = doc.elements_by_tag("p")[0].children().next().unwrap();
    assert!(!p_text.is_inside("a"));
    assert!(doc.root().parent().is_none());
}

#[test]
fn test_deep_nesting_parses_without_recursion() {
    let depth = 100_000;
    let doc = parse_html(&"<div>".repeat(depth));
    assert_eq!(doc.len(), depth + 1);

    let divs = doc.elements_by_tag("div");
    assert_eq!(divs.len(), depth);
    assert_eq!(divs[depth - 1].ancestors().count(), depth);
    assert_eq!(divs[depth - 1].children().count(), 0);
    assert_eq!(doc.text_content(), "");
}

#[test]
fn test_closing_tags_unwind_one_level_at_a_time() {
    let doc = parse_html(&format!("{}x{}y", "<b>".repeat(3), "</b>".repeat(2)));
    let outer = root_children(&doc)[0];
    let kinds: Vec<String> = outer
        .children()
        .map(|c| c.tag_name().map_or_else(|| text_of(&c), str::to_string))
        .collect();
    assert_eq!(kinds, vec!["b", "y"]);
}
