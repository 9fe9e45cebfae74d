//! Tests for style sheet parsing and selector scoring.

use pretty_assertions::assert_eq;
use trellis_core::css::{specificity, PropertyMap, Stylesheet, Stylist, DEFAULT_STYLESHEET};

fn declarations(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs.iter().copied().collect()
}

#[test]
fn test_multi_line_rule() {
    let mut sheet = Stylesheet::new();
    let added = sheet.parse(
        "p {
            color: red;
            margin: 0;
        }",
    );
    assert_eq!(added, 1);

    let rule = &sheet.rules()[0];
    assert_eq!(rule.selector, "p");
    assert_eq!(rule.declarations, declarations(&[("color", "red"), ("margin", "0")]));
    assert_eq!(rule.specificity, 1);
}

#[test]
fn test_single_line_rules() {
    let mut sheet = Stylesheet::new();
    sheet.parse("p { color: red; }\n.highlight { color: blue; font-size: 20px; }");
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules()[1].selector, ".highlight");
    assert_eq!(
        sheet.rules()[1].declarations,
        declarations(&[("color", "blue"), ("font-size", "20px")])
    );
}

#[test]
fn test_comment_lines_skipped() {
    let mut sheet = Stylesheet::new();
    sheet.parse(
        "// line comment
         /* block comment */
         p {
           /* inside */
           color: red;
         }",
    );
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules()[0].declarations, declarations(&[("color", "red")]));
}

#[test]
fn test_block_comment_only_skips_its_first_line() {
    let mut sheet = Stylesheet::new();
    sheet.parse("/* start\np { color: red; }\nend */");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules()[0].selector, "p");
}

#[test]
fn test_value_keeps_colons() {
    let mut sheet = Stylesheet::new();
    sheet.parse(
        "a {
            background: url(http://example.com/a.png);
            transition-delay: 00:01;
        }",
    );
    let decls = &sheet.rules()[0].declarations;
    assert_eq!(decls.get("background"), Some("url(http://example.com/a.png)"));
    assert_eq!(decls.get("transition-delay"), Some("00:01"));
}

#[test]
fn test_semicolons_inside_quotes_and_parens_stay_in_value() {
    let mut sheet = Stylesheet::new();
    sheet.parse(
        "p {
            content: \"a;b\";
            background: url(data:image/png;base64,AAAA);
        }
        q { quotes: '«;' '»'; color: red; }",
    );
    let decls = &sheet.rules()[0].declarations;
    assert_eq!(decls.get("content"), Some("\"a;b\""));
    assert_eq!(decls.get("background"), Some("url(data:image/png;base64,AAAA)"));
    assert_eq!(
        sheet.rules()[1].declarations,
        declarations(&[("quotes", "'«;' '»'"), ("color", "red")])
    );
}

#[test]
fn test_property_lowercased_value_kept() {
    let mut sheet = Stylesheet::new();
    sheet.parse("p {\n  COLOR :  Red ;\n}");
    assert_eq!(sheet.rules()[0].declarations.get("color"), Some("Red"));
}

#[test]
fn test_important_is_stripped() {
    let mut sheet = Stylesheet::new();
    sheet.parse("p { color: red !important; }");
    assert_eq!(sheet.rules()[0].declarations.get("color"), Some("red"));
}

#[test]
fn test_later_declaration_overwrites() {
    let mut sheet = Stylesheet::new();
    sheet.parse("p {\ncolor: red;\nmargin: 1px;\ncolor: blue;\n}");
    assert_eq!(
        sheet.rules()[0].declarations,
        declarations(&[("color", "blue"), ("margin", "1px")])
    );
}

#[test]
fn test_parse_calls_accumulate_in_order() {
    let mut sheet = Stylesheet::new();
    assert_eq!(sheet.parse("h1 { color: red; }"), 1);
    assert_eq!(sheet.parse("h2 { color: red; }\nh3 { color: red; }"), 2);
    let selectors: Vec<&str> = sheet.rules().iter().map(|r| r.selector.as_str()).collect();
    assert_eq!(selectors, vec!["h1", "h2", "h3"]);
}

#[test]
fn test_selector_groups_split() {
    let mut sheet = Stylesheet::new();
    sheet.parse("strong, b, .x { font-weight: bold; }");
    let selectors: Vec<&str> = sheet.rules().iter().map(|r| r.selector.as_str()).collect();
    assert_eq!(selectors, vec!["strong", "b", ".x"]);
    assert_eq!(sheet.rules()[2].specificity, 10);
}

#[test]
fn test_at_rules_open_no_rule() {
    let mut sheet = Stylesheet::new();
    sheet.parse(
        "@media screen {
            p {
                color: red;
            }
        }
        @font-face {
            font-family: x;
        }",
    );
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules()[0].selector, "p");
}

#[test]
fn test_unclosed_and_empty_rules() {
    let mut sheet = Stylesheet::new();
    sheet.parse("{ color: red; }\np {\ncolor: red;");
    assert!(sheet.is_empty());
}

#[test]
fn test_declarations_outside_rules_ignored() {
    let mut sheet = Stylesheet::new();
    sheet.parse("color: red;\n}\np { }");
    assert_eq!(sheet.len(), 1);
    assert!(sheet.rules()[0].declarations.is_empty());
}

#[test]
fn test_specificity_formula() {
    assert_eq!(specificity("p"), 1);
    assert_eq!(specificity(".a"), 10);
    assert_eq!(specificity("#x"), 100);
    assert_eq!(specificity("ul li"), 2);
    // `div.note` is one element token and one class.
    assert_eq!(specificity("div.note"), 11);
    assert_eq!(specificity("#a .b p"), 111);
    assert_eq!(specificity("#a#b"), 200);
}

#[test]
fn test_builtin_stylesheet_loaded_first() {
    let stylist = Stylist::new();
    let mut builtin = Stylesheet::new();
    builtin.parse(DEFAULT_STYLESHEET);
    assert!(builtin.len() > 20);
    assert_eq!(stylist.rules(), builtin.rules());

    let mut stylist = Stylist::new();
    stylist.add_stylesheet("p { color: red; }");
    assert_eq!(stylist.rules().len(), builtin.len() + 1);
    assert_eq!(stylist.rules().last().unwrap().selector, "p");

    assert!(Stylist::empty().rules().is_empty());
}
