//! Element definitions for the dashboard canvas.

mod content;
mod style;

pub use content::ElementContent;
pub use style::{
    ElementStyle, EntryAnimation, FillStyle, FontWeight, GradientDirection, Rgba, ShadowLevel,
};

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Position where freshly added elements spawn on the canvas.
pub const SPAWN_POSITION: Point = Point::new(40.0, 40.0);

/// The closed set of element kinds. Unknown tags fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Card,
    Text,
    Image,
    Stat,
    Button,
    Divider,
    Spacer,
}

impl ElementKind {
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Card => "Card",
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::Stat => "Stat",
            ElementKind::Button => "Button",
            ElementKind::Divider => "Divider",
            ElementKind::Spacer => "Spacer",
        }
    }

    /// Default size for a freshly added element of this kind.
    pub fn default_size(self) -> Size {
        match self {
            ElementKind::Card => Size::new(320.0, 200.0),
            ElementKind::Text => Size::new(320.0, 80.0),
            ElementKind::Image => Size::new(320.0, 200.0),
            ElementKind::Stat => Size::new(240.0, 140.0),
            ElementKind::Button => Size::new(180.0, 56.0),
            ElementKind::Divider => Size::new(320.0, 50.0),
            ElementKind::Spacer => Size::new(320.0, 64.0),
        }
    }

    /// Default content for a freshly added element of this kind.
    pub fn default_content(self) -> ElementContent {
        match self {
            ElementKind::Card => ElementContent::new_card(),
            ElementKind::Text => ElementContent::new_text(),
            ElementKind::Image => ElementContent::new_image(),
            ElementKind::Stat => ElementContent::new_stat(),
            ElementKind::Button => ElementContent::new_button(),
            ElementKind::Divider | ElementKind::Spacer => ElementContent::None,
        }
    }

    /// Dividers and spacers ignore padding, corner radius and text styling.
    pub fn is_structural(self) -> bool {
        matches!(self, ElementKind::Divider | ElementKind::Spacer)
    }

    pub const ALL: [ElementKind; 7] = [
        ElementKind::Card,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Stat,
        ElementKind::Button,
        ElementKind::Divider,
        ElementKind::Spacer,
    ];
}

/// One positioned, typed, styleable unit on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Top-left corner relative to the canvas origin, in pixels.
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub content: ElementContent,
    #[serde(default)]
    pub style: ElementStyle,
    #[serde(default)]
    pub animation: EntryAnimation,
}

impl Element {
    /// Create a kind default at the fixed spawn position.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position: SPAWN_POSITION,
            size: kind.default_size(),
            content: kind.default_content(),
            style: ElementStyle::default(),
            animation: EntryAnimation::default(),
        }
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Check if a canvas-space point is inside this element.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Clone with a fresh id, offset by (+dx, +dy). Used by duplicate/paste.
    pub fn cloned_offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::new(self.position.x + dx, self.position.y + dy),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_defaults() {
        let element = Element::new(ElementKind::Card);
        assert_eq!(element.position, SPAWN_POSITION);
        assert_eq!(element.size, ElementKind::Card.default_size());
        assert!(matches!(element.content, ElementContent::Card { .. }));
        assert_eq!(element.style.corner_radius, 12.0);
    }

    #[test]
    fn test_structural_kinds_have_no_content() {
        assert_eq!(
            Element::new(ElementKind::Divider).content,
            ElementContent::None
        );
        assert_eq!(
            Element::new(ElementKind::Spacer).content,
            ElementContent::None
        );
    }

    #[test]
    fn test_hit_test() {
        let element = Element::new(ElementKind::Card);
        assert!(element.hit_test(Point::new(50.0, 50.0)));
        assert!(!element.hit_test(Point::new(1000.0, 50.0)));
    }

    #[test]
    fn test_cloned_offset_gets_fresh_id() {
        let element = Element::new(ElementKind::Stat);
        let clone = element.cloned_offset(20.0, 20.0);
        assert_ne!(clone.id, element.id);
        assert_eq!(clone.position.x, element.position.x + 20.0);
        assert_eq!(clone.position.y, element.position.y + 20.0);
        assert_eq!(clone.content, element.content);
        assert_eq!(clone.style, element.style);
    }

    #[test]
    fn test_unknown_kind_tag_is_rejected() {
        let json = r#"{
            "id": "9f4c2f04-9c6a-4b8e-b7d6-2a4c8f0e1d22",
            "kind": "carousel",
            "position": {"x": 0.0, "y": 0.0},
            "size": {"width": 100.0, "height": 50.0}
        }"#;
        assert!(serde_json::from_str::<Element>(json).is_err());
    }

    #[test]
    fn test_partial_element_decodes_with_defaults() {
        let json = r#"{
            "id": "9f4c2f04-9c6a-4b8e-b7d6-2a4c8f0e1d22",
            "kind": "text",
            "position": {"x": 10.0, "y": 20.0},
            "size": {"width": 200.0, "height": 80.0}
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.content, ElementContent::None);
        assert_eq!(element.style.opacity, 1.0);
        assert_eq!(element.animation, EntryAnimation::None);
    }
}
