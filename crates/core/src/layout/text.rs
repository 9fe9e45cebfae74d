//! Approximate font metrics and word wrapping.
//!
//! There are no real fonts here: every glyph is assumed to be a fixed
//! fraction of the font size wide, picked by weight and family.

use crate::css::{ComputedStyle, FontWeight};

/// Size of a measured text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub lines: usize,
    /// Width of the widest line.
    pub width: f32,
    pub height: f32,
}

/// Advance width of one character for `style`.
pub fn char_width(style: &ComputedStyle) -> f32 {
    let monospace = style
        .font_family()
        .is_some_and(|family| family.to_ascii_lowercase().contains("monospace"));
    let factor = if monospace {
        0.6
    } else {
        match style.font_weight() {
            FontWeight::Light => 0.48,
            FontWeight::Normal => 0.5,
            FontWeight::Bold => 0.55,
        }
    };
    style.font_size() * factor
}

/// Height of one line box for `style`.
pub fn line_height(style: &ComputedStyle) -> f32 {
    style.font_size() * style.line_height()
}

/// Lay `text` out in lines no wider than `max_width`.
///
/// Words are never split: a word wider than the line gets a line of its own.
/// With `white-space: pre` lines break only at newlines.
pub fn measure_text(text: &str, style: &ComputedStyle, max_width: f32) -> TextMetrics {
    let advance = char_width(style);
    let widths: Vec<f32> = if style.preserves_whitespace() {
        text.trim_matches('\n')
            .split('\n')
            .map(|line| line.chars().count() as f32 * advance)
            .collect()
    } else {
        wrap_words(text, advance, max_width)
    };

    let lines = widths.len();
    TextMetrics {
        lines,
        width: widths.iter().copied().fold(0.0, f32::max),
        height: lines as f32 * line_height(style),
    }
}

/// Greedy line filling. Returns the width of each line.
fn wrap_words(text: &str, advance: f32, max_width: f32) -> Vec<f32> {
    let mut lines = Vec::new();
    let mut current: Option<f32> = None;
    for word in text.split_whitespace() {
        let word_width = word.chars().count() as f32 * advance;
        current = match current {
            Some(width) if width + advance + word_width <= max_width => {
                Some(width + advance + word_width)
            }
            Some(width) => {
                lines.push(width);
                Some(word_width)
            }
            None => Some(word_width),
        };
    }
    lines.extend(current);
    lines
}
