//! Gesture geometry: classifying pointer-downs and turning pointer movement
//! into clamped model coordinates.
//!
//! All positions are canvas-space (pointer position relative to the canvas
//! origin); the host translates from whatever its input surface reports.

use crate::element::{Element, ElementId};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum element width after a resize, in pixels.
pub const MIN_ELEMENT_WIDTH: f64 = 100.0;
/// Minimum element height after a resize, in pixels.
pub const MIN_ELEMENT_HEIGHT: f64 = 50.0;
/// Side length of the square resize grip anchored at the bottom-right corner.
pub const RESIZE_GRIP: f64 = 16.0;

/// Kind of gesture in progress. Dragging and resizing are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Move,
    Resize,
}

/// State of an active gesture, captured on pointer-down.
#[derive(Debug, Clone)]
pub struct ActiveGesture {
    pub element_id: ElementId,
    pub kind: GestureKind,
    /// Pointer offset from the reference point captured at gesture start:
    /// the element origin for a move, the bottom-right corner for a resize.
    pub grab_offset: Vec2,
    /// Element state at gesture start, restored on cancel.
    pub original: Element,
}

impl ActiveGesture {
    /// Capture a gesture on `element` starting at `pointer`.
    pub fn begin(element: &Element, kind: GestureKind, pointer: Point) -> Self {
        let reference = match kind {
            GestureKind::Move => element.position,
            GestureKind::Resize => {
                let bounds = element.bounds();
                Point::new(bounds.x1, bounds.y1)
            }
        };
        Self {
            element_id: element.id,
            kind,
            grab_offset: pointer - reference,
            original: element.clone(),
        }
    }

    /// New element origin for the current pointer position (move gestures).
    pub fn moved_position(&self, pointer: Point) -> Point {
        clamp_position(pointer - self.grab_offset)
    }

    /// New element size for the current pointer position (resize gestures).
    pub fn resized_size(&self, pointer: Point) -> Size {
        let corner = pointer - self.grab_offset;
        clamp_size(Size::new(
            corner.x - self.original.position.x,
            corner.y - self.original.position.y,
        ))
    }
}

/// The resize grip region of an element, in canvas coordinates.
pub fn resize_grip_rect(element: &Element) -> Rect {
    let bounds = element.bounds();
    Rect::new(
        bounds.x1 - RESIZE_GRIP,
        bounds.y1 - RESIZE_GRIP,
        bounds.x1,
        bounds.y1,
    )
}

/// Classify a pointer-down inside an element: grip region starts a resize,
/// anywhere else in the body starts a move. `None` when the point misses.
pub fn classify(element: &Element, pointer: Point) -> Option<GestureKind> {
    if resize_grip_rect(element).contains(pointer) {
        Some(GestureKind::Resize)
    } else if element.hit_test(pointer) {
        Some(GestureKind::Move)
    } else {
        None
    }
}

/// Clamp an element origin to the canvas (x, y >= 0).
pub fn clamp_position(position: Point) -> Point {
    Point::new(position.x.max(0.0), position.y.max(0.0))
}

/// Clamp an element size to the minimum dimensions.
pub fn clamp_size(size: Size) -> Size {
    Size::new(
        size.width.max(MIN_ELEMENT_WIDTH),
        size.height.max(MIN_ELEMENT_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn element_at(x: f64, y: f64, w: f64, h: f64) -> Element {
        let mut element = Element::new(ElementKind::Card);
        element.position = Point::new(x, y);
        element.size = Size::new(w, h);
        element
    }

    #[test]
    fn test_classify_body_starts_move() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            classify(&element, Point::new(150.0, 150.0)),
            Some(GestureKind::Move)
        );
    }

    #[test]
    fn test_classify_grip_starts_resize() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        // Bottom-right corner is (300, 200); the grip extends 16px inward.
        assert_eq!(
            classify(&element, Point::new(295.0, 195.0)),
            Some(GestureKind::Resize)
        );
    }

    #[test]
    fn test_classify_miss() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        assert_eq!(classify(&element, Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        let gesture = ActiveGesture::begin(&element, GestureKind::Move, Point::new(130.0, 120.0));

        let position = gesture.moved_position(Point::new(230.0, 170.0));
        assert_eq!(position, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_move_clamps_to_canvas_origin() {
        let element = element_at(10.0, 10.0, 200.0, 100.0);
        let gesture = ActiveGesture::begin(&element, GestureKind::Move, Point::new(15.0, 15.0));

        let position = gesture.moved_position(Point::new(-500.0, -500.0));
        assert_eq!(position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_resize_tracks_bottom_right() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        let gesture = ActiveGesture::begin(&element, GestureKind::Resize, Point::new(298.0, 198.0));

        let size = gesture.resized_size(Point::new(398.0, 248.0));
        assert_eq!(size, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let element = element_at(100.0, 100.0, 200.0, 100.0);
        let gesture = ActiveGesture::begin(&element, GestureKind::Resize, Point::new(300.0, 200.0));

        let size = gesture.resized_size(Point::new(0.0, 0.0));
        assert_eq!(size, Size::new(MIN_ELEMENT_WIDTH, MIN_ELEMENT_HEIGHT));
    }
}
