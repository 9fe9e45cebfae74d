/// The only references the decoder knows. Replacement runs in table order.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", "\u{a0}"),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
    ("&#60;", "<"),
    ("&#62;", ">"),
];

/// Replace the fixed set of character references in `text`.
///
/// Each table entry is substituted across the whole string before the next
/// one is tried, so `&amp;lt;` becomes `&lt;` while `&amp;#39;` goes all the
/// way to `'`.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, literal)| {
            if acc.contains(entity) {
                acc.replace(entity, literal)
            } else {
                acc
            }
        })
}
