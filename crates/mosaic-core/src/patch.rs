//! Partial-update commands issued by the settings panels.
//!
//! A patch carries only the fields being changed; applying it merges those
//! fields into a copy of the target, leaving everything else untouched. An
//! empty patch is a structural no-op.

use crate::element::{
    Element, ElementContent, ElementStyle, EntryAnimation, FillStyle, FontWeight, Rgba,
    ShadowLevel,
};
use crate::layout::GlobalStyle;
use kurbo::{Point, Size};

/// Partial update for an element's style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub fill: Option<FillStyle>,
    pub text_color: Option<Rgba>,
    /// `Some(None)` clears the border; `Some(Some(c))` sets it.
    pub border_color: Option<Option<Rgba>>,
    pub corner_radius: Option<f64>,
    pub padding: Option<f64>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub opacity: Option<f64>,
    pub shadow: Option<ShadowLevel>,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        *self == StylePatch::default()
    }

    pub fn apply(&self, style: &mut ElementStyle) {
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(text_color) = self.text_color {
            style.text_color = text_color;
        }
        if let Some(border_color) = self.border_color {
            style.border_color = border_color;
        }
        if let Some(corner_radius) = self.corner_radius {
            style.corner_radius = corner_radius;
        }
        if let Some(padding) = self.padding {
            style.padding = padding;
        }
        if let Some(font_size) = self.font_size {
            style.font_size = font_size;
        }
        if let Some(font_weight) = self.font_weight {
            style.font_weight = font_weight;
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(shadow) = self.shadow {
            style.shadow = shadow;
        }
    }
}

/// Partial update for a single element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub content: Option<ElementContent>,
    pub animation: Option<EntryAnimation>,
    pub style: StylePatch,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        *self == ElementPatch::default()
    }

    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn content(content: ElementContent) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn animation(animation: EntryAnimation) -> Self {
        Self {
            animation: Some(animation),
            ..Default::default()
        }
    }

    pub fn style(style: StylePatch) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn apply(&self, element: &mut Element) {
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(size) = self.size {
            element.size = size;
        }
        if let Some(content) = &self.content {
            element.content = content.clone();
        }
        if let Some(animation) = self.animation {
            element.animation = animation;
        }
        self.style.apply(&mut element.style);
    }
}

/// Partial update for the canvas-wide style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalStylePatch {
    pub fill: Option<FillStyle>,
    pub grid_columns: Option<u32>,
    pub grid_gap: Option<f64>,
}

impl GlobalStylePatch {
    pub fn is_empty(&self) -> bool {
        *self == GlobalStylePatch::default()
    }

    pub fn fill(fill: FillStyle) -> Self {
        Self {
            fill: Some(fill),
            ..Default::default()
        }
    }

    pub fn apply(&self, style: &mut GlobalStyle) {
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(grid_columns) = self.grid_columns {
            style.grid_columns = grid_columns;
        }
        if let Some(grid_gap) = self.grid_gap {
            style.grid_gap = grid_gap;
        }
    }
}
