//! Style template and overlay semantics.
//!
//! Every window and screen object owns its own [`Style`]. A style is always
//! fully populated: it starts from the template ([`Style::default`]) and only
//! the keys named in a [`StyleOverrides`] replace template values.

use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;

/// RGBA8 color, serialized as a `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

/// A complete style: the four keys the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Style {
    /// Foreground color (text glyphs).
    pub color: Color,
    /// Fill color for shapes, text panels and window backgrounds.
    pub background_color: Color,
    /// Font size in pixels, never 0 once deserialized.
    #[serde(deserialize_with = "positive_font_size")]
    pub font_size: u32,
    /// Logical font name, resolved through the font registry.
    pub font_family: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            font_size: 24,
            font_family: "Inter".to_string(),
        }
    }
}

impl Style {
    /// Build a style from the template with `overrides` laid on top.
    pub fn from_overrides(overrides: &StyleOverrides) -> Self {
        Self::default().merged(overrides)
    }

    /// Replace this style wholesale.
    ///
    /// Keys absent from `overrides` go back to their template values, not to
    /// whatever this style held before.
    pub fn apply(&mut self, overrides: &StyleOverrides) {
        *self = Self::from_overrides(overrides);
    }

    /// Copy of this style with every key present in `overrides` replaced.
    pub fn merged(&self, overrides: &StyleOverrides) -> Self {
        let mut style = self.clone();
        if let Some(color) = overrides.color {
            style.color = color;
        }
        if let Some(background_color) = overrides.background_color {
            style.background_color = background_color;
        }
        if let Some(font_size) = overrides.font_size {
            style.font_size = font_size.get();
        }
        if let Some(font_family) = &overrides.font_family {
            style.font_family = font_family.clone();
        }
        style
    }
}

/// Style built from the template with `supplied` overlaid.
///
/// Nothing held by `current` survives unless `supplied` names it again.
pub fn apply_style(_current: &Style, supplied: &StyleOverrides) -> Style {
    Style::from_overrides(supplied)
}

fn positive_font_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    NonZeroU32::deserialize(deserializer).map(NonZeroU32::get)
}

/// A partial style: only the keys a caller explicitly supplies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<NonZeroU32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Supply a font size. `0` is not a size and leaves the key unset.
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = NonZeroU32::new(size);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// True when no key is supplied.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.background_color.is_none()
            && self.font_size.is_none()
            && self.font_family.is_none()
    }
}

impl From<&Style> for StyleOverrides {
    fn from(style: &Style) -> Self {
        Self {
            color: Some(style.color),
            background_color: Some(style.background_color),
            font_size: NonZeroU32::new(style.font_size),
            font_family: Some(style.font_family.clone()),
        }
    }
}
