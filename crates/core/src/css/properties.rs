//! Typed views over a computed property map.
//!
//! Nothing is cached: every accessor re-reads the raw string, so a
//! [`ComputedStyle`] is exactly its map. Unparsable values fall back to the
//! property's default instead of failing.

use super::PropertyMap;

/// Font size when none is set, and the px size of `1em`.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// The flattened style of one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    properties: PropertyMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    None,
}

impl Display {
    pub fn is_inline(self) -> bool {
        matches!(self, Display::Inline | Display::InlineBlock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#RRGGBB` or one of the named colors. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let color = match value.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "lime" => Color::rgb(0, 255, 0),
            "blue" => Color::rgb(0, 0, 255),
            "navy" => Color::rgb(0, 0, 128),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "maroon" => Color::rgb(128, 0, 0),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "silver" => Color::rgb(192, 192, 192),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    Normal,
    Bold,
}

impl FontWeight {
    fn parse(value: &str) -> Option<FontWeight> {
        match value {
            "normal" => Some(FontWeight::Normal),
            "bold" | "bolder" => Some(FontWeight::Bold),
            "lighter" => Some(FontWeight::Light),
            _ => match value.parse::<u16>().ok()? {
                100..=399 => Some(FontWeight::Light),
                400..=599 => Some(FontWeight::Normal),
                600..=900 => Some(FontWeight::Bold),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Four box sides in px.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn uniform(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Expand a 1, 2 or 4 value shorthand. Any other count is all zero.
    ///
    /// With four values the second one lands on the left side and the
    /// fourth on the right.
    pub fn parse(value: &str) -> Edges {
        let parts: Vec<f32> = value
            .split_whitespace()
            .map(|part| parse_length(part).unwrap_or(0.0))
            .collect();
        match parts.as_slice() {
            [all] => Edges::uniform(*all),
            [vertical, horizontal] => Edges {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, left, bottom, right] => Edges {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            _ => Edges::zero(),
        }
    }
}

/// A declared `width` or `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Px(f32),
    /// Fraction of the containing size, `50%` is `0.5`.
    Percent(f32),
}

impl Dimension {
    pub fn resolve(self, container: f32) -> f32 {
        match self {
            Dimension::Px(v) => v,
            Dimension::Percent(f) => container * f,
        }
    }
}

/// Parse a px length: `12px`, `1.5em` / `rem` (times 16) or a bare number.
pub fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(rem) = value.strip_suffix("rem") {
        return rem.trim().parse::<f32>().ok().map(|v| v * DEFAULT_FONT_SIZE);
    }
    if let Some(em) = value.strip_suffix("em") {
        return em.trim().parse::<f32>().ok().map(|v| v * DEFAULT_FONT_SIZE);
    }
    value.parse().ok()
}

fn parse_dimension(value: &str) -> Option<Dimension> {
    let value = value.trim();
    if value == "auto" || value.is_empty() {
        return None;
    }
    if let Some(percent) = value.strip_suffix('%') {
        return Some(
            percent
                .trim()
                .parse::<f32>()
                .map(|v| Dimension::Percent(v / 100.0))
                .unwrap_or(Dimension::Px(0.0)),
        );
    }
    Some(Dimension::Px(parse_length(value).unwrap_or(0.0)))
}

impl ComputedStyle {
    pub fn new(properties: PropertyMap) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Raw value of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property)
    }

    fn keyword(&self, property: &str) -> Option<String> {
        self.get(property).map(|v| v.trim().to_ascii_lowercase())
    }

    pub fn display(&self) -> Display {
        match self.keyword("display").as_deref() {
            Some("none") => Display::None,
            Some("inline") => Display::Inline,
            Some("inline-block") => Display::InlineBlock,
            _ => Display::Block,
        }
    }

    pub fn color(&self) -> Color {
        self.get("color")
            .and_then(Color::parse)
            .unwrap_or(Color::BLACK)
    }

    pub fn background_color(&self) -> Color {
        self.get("background-color")
            .and_then(Color::parse)
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Font size in px. `em` is relative to 16px; a percentage is divided by
    /// 100 as is.
    pub fn font_size(&self) -> f32 {
        let Some(value) = self.keyword("font-size") else {
            return DEFAULT_FONT_SIZE;
        };
        let parsed = if let Some(percent) = value.strip_suffix('%') {
            percent.trim().parse::<f32>().ok().map(|v| v / 100.0)
        } else {
            parse_length(&value)
        };
        parsed.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font_weight(&self) -> FontWeight {
        self.keyword("font-weight")
            .and_then(|v| FontWeight::parse(&v))
            .unwrap_or(FontWeight::Normal)
    }

    pub fn font_style(&self) -> FontStyle {
        match self.keyword("font-style").as_deref() {
            Some("italic") => FontStyle::Italic,
            Some("oblique") => FontStyle::Oblique,
            _ => FontStyle::Normal,
        }
    }

    pub fn font_family(&self) -> Option<&str> {
        self.get("font-family")
    }

    /// Line height as a multiple of the font size.
    pub fn line_height(&self) -> f32 {
        let Some(value) = self.keyword("line-height") else {
            return DEFAULT_LINE_HEIGHT;
        };
        if let Ok(multiplier) = value.parse::<f32>() {
            return multiplier;
        }
        if let Some(percent) = value.strip_suffix('%') {
            if let Ok(v) = percent.trim().parse::<f32>() {
                return v / 100.0;
            }
        }
        if let Some(em) = value.strip_suffix("em") {
            if let Ok(v) = em.trim().parse::<f32>() {
                return v;
            }
        }
        match parse_length(&value) {
            Some(px) if self.font_size() > 0.0 => px / self.font_size(),
            _ => DEFAULT_LINE_HEIGHT,
        }
    }

    pub fn text_align(&self) -> TextAlign {
        match self.keyword("text-align").as_deref() {
            Some("center") => TextAlign::Center,
            Some("right") => TextAlign::Right,
            Some("justify") => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self.keyword("visibility").as_deref() {
            Some("hidden") | Some("collapse") => Visibility::Hidden,
            _ => Visibility::Visible,
        }
    }

    /// Whether whitespace runs are kept as written.
    pub fn preserves_whitespace(&self) -> bool {
        matches!(
            self.keyword("white-space").as_deref(),
            Some("pre") | Some("pre-wrap")
        )
    }

    pub fn list_style_type(&self) -> Option<&str> {
        self.get("list-style-type")
    }

    pub fn margin(&self) -> Edges {
        self.edges("margin")
    }

    pub fn padding(&self) -> Edges {
        self.edges("padding")
    }

    /// Shorthand first, then any `-top`/`-right`/`-bottom`/`-left` longhand.
    fn edges(&self, property: &str) -> Edges {
        let mut edges = self.get(property).map(Edges::parse).unwrap_or_default();
        let side = |name: &str| {
            self.get(&format!("{property}-{name}"))
                .map(|v| parse_length(v).unwrap_or(0.0))
        };
        if let Some(v) = side("top") {
            edges.top = v;
        }
        if let Some(v) = side("right") {
            edges.right = v;
        }
        if let Some(v) = side("bottom") {
            edges.bottom = v;
        }
        if let Some(v) = side("left") {
            edges.left = v;
        }
        edges
    }

    pub fn border_width(&self) -> f32 {
        if let Some(value) = self.get("border-width") {
            return border_length(value).unwrap_or(0.0);
        }
        self.get("border")
            .and_then(|value| value.split_whitespace().find_map(border_length))
            .unwrap_or(0.0)
    }

    pub fn width(&self) -> Option<Dimension> {
        self.get("width").and_then(parse_dimension)
    }

    pub fn height(&self) -> Option<Dimension> {
        self.get("height").and_then(parse_dimension)
    }
}

fn border_length(value: &str) -> Option<f32> {
    match value.trim() {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        "none" => Some(0.0),
        other => parse_length(other),
    }
}
