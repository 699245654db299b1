//! Structured style values for elements and the canvas background.

use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Theme surface color used as the default element fill.
    pub const CARD: Self = Self::opaque(30, 41, 59);

    /// Theme page color used as the default canvas fill.
    pub const PAGE: Self = Self::opaque(15, 23, 42);

    /// Default text color on card surfaces.
    pub const TEXT: Self = Self::opaque(226, 232, 240);

    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Scale the alpha channel by `factor` (clamped to 0..=1).
    pub fn faded(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * factor) as u8,
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` hex notation.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().strip_prefix('#')?;
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::opaque(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::opaque(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha omitted when fully opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Direction of a two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    ToRight,
    ToBottom,
    ToBottomRight,
    ToTopRight,
}

impl GradientDirection {
    /// Gradient axis endpoints in unit-square coordinates (start, end).
    pub fn axis(self) -> ((f64, f64), (f64, f64)) {
        match self {
            GradientDirection::ToRight => ((0.0, 0.0), (1.0, 0.0)),
            GradientDirection::ToBottom => ((0.0, 0.0), (0.0, 1.0)),
            GradientDirection::ToBottomRight => ((0.0, 0.0), (1.0, 1.0)),
            GradientDirection::ToTopRight => ((0.0, 1.0), (1.0, 0.0)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradientDirection::ToRight => "Right",
            GradientDirection::ToBottom => "Down",
            GradientDirection::ToBottomRight => "Diagonal down",
            GradientDirection::ToTopRight => "Diagonal up",
        }
    }

    pub const ALL: [GradientDirection; 4] = [
        GradientDirection::ToRight,
        GradientDirection::ToBottom,
        GradientDirection::ToBottomRight,
        GradientDirection::ToTopRight,
    ];
}

/// Background paint: a solid color or a two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    Solid(Rgba),
    Gradient {
        start: Rgba,
        end: Rgba,
        direction: GradientDirection,
    },
}

impl FillStyle {
    pub fn is_gradient(&self) -> bool {
        matches!(self, FillStyle::Gradient { .. })
    }

    /// The solid color, or the gradient's start stop when a gradient is set.
    pub fn base_color(&self) -> Rgba {
        match *self {
            FillStyle::Solid(color) => color,
            FillStyle::Gradient { start, .. } => start,
        }
    }

    /// Turn this fill into a gradient, seeding missing stops from the solid color.
    pub fn into_gradient(self) -> Self {
        match self {
            FillStyle::Solid(color) => FillStyle::Gradient {
                start: color,
                end: Rgba::PAGE,
                direction: GradientDirection::default(),
            },
            gradient => gradient,
        }
    }

    /// Turn this fill into a solid color, keeping the gradient's start stop.
    pub fn into_solid(self) -> Self {
        FillStyle::Solid(self.base_color())
    }
}

/// Shadow depth below an element, from a closed set of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowLevel {
    None,
    #[default]
    Sm,
    Md,
    Lg,
}

impl ShadowLevel {
    /// Vertical offset of the painted shadow in pixels.
    pub fn y_offset(self) -> f64 {
        match self {
            ShadowLevel::None => 0.0,
            ShadowLevel::Sm => 2.0,
            ShadowLevel::Md => 4.0,
            ShadowLevel::Lg => 8.0,
        }
    }

    /// Shadow alpha in 0..=1.
    pub fn alpha(self) -> f64 {
        match self {
            ShadowLevel::None => 0.0,
            ShadowLevel::Sm => 0.18,
            ShadowLevel::Md => 0.28,
            ShadowLevel::Lg => 0.38,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShadowLevel::None => "None",
            ShadowLevel::Sm => "Small",
            ShadowLevel::Md => "Medium",
            ShadowLevel::Lg => "Large",
        }
    }

    pub const ALL: [ShadowLevel; 4] = [
        ShadowLevel::None,
        ShadowLevel::Sm,
        ShadowLevel::Md,
        ShadowLevel::Lg,
    ];
}

/// Text weight, from a closed set the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn label(self) -> &'static str {
        match self {
            FontWeight::Normal => "Normal",
            FontWeight::Medium => "Medium",
            FontWeight::Semibold => "Semibold",
            FontWeight::Bold => "Bold",
        }
    }

    pub const ALL: [FontWeight; 4] = [
        FontWeight::Normal,
        FontWeight::Medium,
        FontWeight::Semibold,
        FontWeight::Bold,
    ];
}

/// Entry transition played when an element first appears outside edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAnimation {
    #[default]
    None,
    Fade,
    SlideUp,
    SlideDown,
    Zoom,
}

impl EntryAnimation {
    pub fn label(self) -> &'static str {
        match self {
            EntryAnimation::None => "None",
            EntryAnimation::Fade => "Fade in",
            EntryAnimation::SlideUp => "Slide up",
            EntryAnimation::SlideDown => "Slide down",
            EntryAnimation::Zoom => "Zoom in",
        }
    }

    pub const ALL: [EntryAnimation; 5] = [
        EntryAnimation::None,
        EntryAnimation::Fade,
        EntryAnimation::SlideUp,
        EntryAnimation::SlideDown,
        EntryAnimation::Zoom,
    ];
}

/// Style properties of a single element.
///
/// Every field carries a serde default so documents written before a field
/// existed still decode to the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default = "default_fill")]
    pub fill: FillStyle,
    #[serde(default = "default_text_color")]
    pub text_color: Rgba,
    /// Border color (None = no border).
    #[serde(default)]
    pub border_color: Option<Rgba>,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub shadow: ShadowLevel,
}

fn default_fill() -> FillStyle {
    FillStyle::Solid(Rgba::CARD)
}

fn default_text_color() -> Rgba {
    Rgba::TEXT
}

fn default_corner_radius() -> f64 {
    12.0
}

fn default_padding() -> f64 {
    16.0
}

fn default_font_size() -> f64 {
    14.0
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            text_color: default_text_color(),
            border_color: None,
            corner_radius: default_corner_radius(),
            padding: default_padding(),
            font_size: default_font_size(),
            font_weight: FontWeight::default(),
            opacity: default_opacity(),
            shadow: ShadowLevel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgba::opaque(59, 130, 246);
        assert_eq!(Rgba::from_hex(&color.to_hex()), Some(color));
    }

    #[test]
    fn test_hex_short_form() {
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(Rgba::from_hex("#000"), Some(Rgba::opaque(0, 0, 0)));
    }

    #[test]
    fn test_hex_with_alpha() {
        let color = Rgba::from_hex("#3b82f680").unwrap();
        assert_eq!(color.a, 128);
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Rgba::from_hex("not-a-color"), None);
        assert_eq!(Rgba::from_hex("#12345"), None);
    }

    #[test]
    fn test_fill_gradient_round_trip() {
        let solid = FillStyle::Solid(Rgba::CARD);
        let gradient = solid.into_gradient();
        assert!(gradient.is_gradient());
        assert_eq!(gradient.base_color(), Rgba::CARD);
        assert_eq!(gradient.into_solid(), solid);
    }

    #[test]
    fn test_style_defaults_survive_missing_fields() {
        let style: ElementStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(style.corner_radius, 12.0);
        assert_eq!(style.padding, 16.0);
        assert_eq!(style.font_size, 14.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.shadow, ShadowLevel::Sm);
        assert_eq!(style.fill, FillStyle::Solid(Rgba::CARD));
    }
}
