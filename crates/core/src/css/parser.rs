//! Line-oriented style sheet parser.
//!
//! This is not a CSS tokenizer. Each trimmed line either opens a rule
//! (contains `{`), closes one (contains `}`), or contributes declarations.
//! Block comments are only recognised when a line starts with `/*`.

use super::{PropertyMap, Rule};
use log::{debug, trace};

/// The running rule list. Each [`Stylesheet::parse`] call appends, so rules
/// keep their insertion order across calls.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

struct OpenRule {
    selector: String,
    declarations: PropertyMap,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse `css` and append its rules. Returns how many were added.
    pub fn parse(&mut self, css: &str) -> usize {
        let before = self.rules.len();
        let mut open: Option<OpenRule> = None;
        for line in css.lines() {
            self.parse_line(line, &mut open);
        }
        if let Some(rule) = open {
            trace!("rule `{}` never closed, dropped", rule.selector);
        }
        let added = self.rules.len() - before;
        debug!("parsed {added} rules ({} total)", self.rules.len());
        added
    }

    fn parse_line(&mut self, line: &str, open: &mut Option<OpenRule>) {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with("/*") {
            return;
        }

        match line.find('{') {
            Some(brace) => {
                let selector = line[..brace].trim();
                *open = if selector.starts_with('@') {
                    trace!("skipped at-rule `{selector}`");
                    None
                } else {
                    Some(OpenRule {
                        selector: selector.to_string(),
                        declarations: PropertyMap::new(),
                    })
                };
                self.parse_body(&line[brace + 1..], open);
            }
            None => self.parse_body(line, open),
        }
    }

    /// Declarations up to an optional `}` that closes the open rule.
    fn parse_body(&mut self, text: &str, open: &mut Option<OpenRule>) {
        match text.find('}') {
            Some(close) => {
                if let Some(rule) = open.as_mut() {
                    parse_declarations(&text[..close], &mut rule.declarations);
                }
                if let Some(rule) = open.take() {
                    self.close_rule(rule);
                }
                let rest = &text[close + 1..];
                if !rest.trim().is_empty() {
                    self.parse_line(rest, open);
                }
            }
            None => {
                if let Some(rule) = open.as_mut() {
                    parse_declarations(text, &mut rule.declarations);
                }
            }
        }
    }

    fn close_rule(&mut self, rule: OpenRule) {
        for selector in rule.selector.split(',').map(str::trim) {
            if selector.is_empty() {
                continue;
            }
            self.rules.push(Rule::new(selector, rule.declarations.clone()));
        }
    }
}

/// Reads `property: value` pieces separated by `;` into `out`.
///
/// The property is split off at the first colon only, so values such as
/// `url(http://x)` or `12:30` survive intact. A `;` inside quotes or
/// parentheses belongs to the value.
pub(crate) fn parse_declarations(text: &str, out: &mut PropertyMap) {
    for piece in split_declarations(text) {
        let Some((property, value)) = piece.split_once(':') else {
            continue;
        };
        let property = property.trim().to_lowercase();
        if property.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value.strip_suffix("!important").unwrap_or(value).trim();
        out.set(property, value);
    }
}

/// Splits on `;` outside quoted strings and parentheses.
fn split_declarations(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut parens = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => parens += 1,
            (None, ')') => parens = parens.saturating_sub(1),
            (None, ';') if parens == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}
