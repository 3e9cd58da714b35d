//! Text style: font, leading, justification and paint.
//!
//! A style does not know who owns it. Owners learn about edits through
//! [`StyleObserver`], fed by [`TextStyle::diff`] when an edit scope closes.

use std::fmt;

use crate::config::TextConfig;
use crate::primitives::{Color, Point};

/// Horizontal alignment of each line around the anchor x-coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

/// Numeric font weight (CSS scale, 100-900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NORMAL => f.write_str("normal"),
            Self::BOLD => f.write_str("bold"),
            FontWeight(w) => write!(f, "{w}"),
        }
    }
}

/// A resolved font description.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub weight: FontWeight,
    pub size: f32,
}

impl fmt::Display for Font {
    /// CSS shorthand, e.g. `normal 12px sans-serif`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}

/// What kind of style property changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleChange {
    /// Family, weight or size; affects measurement.
    Font,
    Justification,
    Leading,
    /// Fill, stroke or shadow.
    Paint,
}

/// Receives style edits from the owner side.
pub trait StyleObserver {
    fn style_changed(&mut self, change: StyleChange);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font: Font,
    /// `None` means `leading_ratio * font size`.
    leading: Option<f32>,
    leading_ratio: f32,
    justification: Justification,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    stroke_width: f32,
    stroke_scaling: bool,
    shadow_color: Option<Color>,
    shadow_blur: f32,
    shadow_offset: Point,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::from_config(&TextConfig::default())
    }
}

impl TextStyle {
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            font: Font {
                family: config.font_family.clone(),
                weight: FontWeight(config.font_weight),
                size: config.font_size,
            },
            leading: None,
            leading_ratio: config.leading_ratio,
            justification: Justification::Left,
            fill_color: Some(Color::BLACK),
            stroke_color: None,
            stroke_width: 1.0,
            stroke_scaling: true,
            shadow_color: None,
            shadow_blur: 0.0,
            shadow_offset: Point::ORIGIN,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// CSS font shorthand handed to drawing backends.
    pub fn font_descriptor(&self) -> String {
        self.font.to_string()
    }

    pub fn font_size(&self) -> f32 {
        self.font.size
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn leading(&self) -> f32 {
        self.leading.unwrap_or(self.font.size * self.leading_ratio)
    }

    pub fn leading_ratio(&self) -> f32 {
        self.leading_ratio
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke_color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_scaling(&self) -> bool {
        self.stroke_scaling
    }

    pub fn shadow_color(&self) -> Option<Color> {
        self.shadow_color
    }

    pub fn shadow_blur(&self) -> f32 {
        self.shadow_blur
    }

    pub fn shadow_offset(&self) -> Point {
        self.shadow_offset
    }

    pub fn has_fill(&self) -> bool {
        self.fill_color.is_some_and(|c| c.is_visible())
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && self.stroke_color.is_some_and(|c| c.is_visible())
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow_color.is_some_and(|c| c.is_visible())
            && (self.shadow_blur > 0.0 || self.shadow_offset != Point::ORIGIN)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font.family = family.into();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font.weight = weight;
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font.size = size;
    }

    /// `None` restores the font-relative default.
    pub fn set_leading(&mut self, leading: Option<f32>) {
        self.leading = leading;
    }

    /// Multiplier used while no explicit leading is set.
    pub fn set_leading_ratio(&mut self, ratio: f32) {
        self.leading_ratio = ratio;
    }

    pub fn set_justification(&mut self, justification: Justification) {
        self.justification = justification;
    }

    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Option<Color>) {
        self.stroke_color = color;
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    pub fn set_stroke_scaling(&mut self, scaling: bool) {
        self.stroke_scaling = scaling;
    }

    pub fn set_shadow_color(&mut self, color: Option<Color>) {
        self.shadow_color = color;
    }

    pub fn set_shadow_blur(&mut self, blur: f32) {
        self.shadow_blur = blur;
    }

    pub fn set_shadow_offset(&mut self, offset: Point) {
        self.shadow_offset = offset;
    }

    /// Change kinds between `before` and `self`, each reported at most once.
    pub fn diff(&self, before: &TextStyle) -> Vec<StyleChange> {
        let mut changes = Vec::new();
        if self.font != before.font {
            changes.push(StyleChange::Font);
        }
        if self.justification != before.justification {
            changes.push(StyleChange::Justification);
        }
        if self.leading != before.leading || self.leading_ratio != before.leading_ratio {
            changes.push(StyleChange::Leading);
        }
        if self.fill_color != before.fill_color
            || self.stroke_color != before.stroke_color
            || self.stroke_width != before.stroke_width
            || self.stroke_scaling != before.stroke_scaling
            || self.shadow_color != before.shadow_color
            || self.shadow_blur != before.shadow_blur
            || self.shadow_offset != before.shadow_offset
        {
            changes.push(StyleChange::Paint);
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_descriptor_shorthand() {
        let style = TextStyle::default();
        assert_eq!(style.font_descriptor(), "normal 12px sans-serif");

        let mut style = style;
        style.set_font_weight(FontWeight(600));
        style.set_font_size(16.5);
        style.set_font_family("Inter");
        assert_eq!(style.font_descriptor(), "600 16.5px Inter");
    }

    #[test]
    fn leading_follows_font_size_until_set() {
        let mut style = TextStyle::default();
        style.set_font_size(10.0);
        assert!((style.leading() - 12.0).abs() < 1e-5);

        style.set_leading(Some(30.0));
        style.set_font_size(20.0);
        assert_eq!(style.leading(), 30.0);
    }

    #[test]
    fn config_leading_ratio() {
        let config = TextConfig {
            font_size: 10.0,
            leading_ratio: 2.0,
            ..TextConfig::default()
        };
        assert_eq!(TextStyle::from_config(&config).leading(), 20.0);
    }

    #[test]
    fn config_leading_ratio_survives_font_edit() {
        let config = TextConfig {
            font_size: 10.0,
            leading_ratio: 2.0,
            ..TextConfig::default()
        };
        let mut style = TextStyle::from_config(&config);
        style.set_font_size(20.0);
        assert_eq!(style.leading(), 40.0);

        style.set_leading(Some(15.0));
        assert_eq!(style.leading(), 15.0);
        style.set_leading(None);
        assert_eq!(style.leading(), 40.0);
    }

    #[test]
    fn leading_ratio_edit_reports_leading() {
        let before = TextStyle::default();
        let mut after = before.clone();
        after.set_leading_ratio(1.5);
        assert_eq!(after.diff(&before), vec![StyleChange::Leading]);
    }

    #[test]
    fn fill_and_stroke_flags() {
        let mut style = TextStyle::default();
        assert!(style.has_fill());
        assert!(!style.has_stroke());

        style.set_fill_color(Some(Color::TRANSPARENT));
        assert!(!style.has_fill());

        style.set_stroke_color(Some(Color::RED));
        assert!(style.has_stroke());
        style.set_stroke_width(0.0);
        assert!(!style.has_stroke());
    }

    #[test]
    fn shadow_needs_color_and_extent() {
        let mut style = TextStyle::default();
        style.set_shadow_color(Some(Color::BLACK));
        assert!(!style.has_shadow());
        style.set_shadow_blur(4.0);
        assert!(style.has_shadow());
    }

    #[test]
    fn diff_reports_each_kind_once() {
        let before = TextStyle::default();
        let mut after = before.clone();
        after.set_font_size(20.0);
        after.set_font_family("serif");
        after.set_justification(Justification::Right);
        after.set_stroke_color(Some(Color::RED));
        after.set_shadow_blur(2.0);

        assert_eq!(
            after.diff(&before),
            vec![StyleChange::Font, StyleChange::Justification, StyleChange::Paint]
        );
        assert!(before.diff(&before.clone()).is_empty());
    }
}
