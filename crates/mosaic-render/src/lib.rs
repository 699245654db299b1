//! Mosaic Render Library
//!
//! A pure mapping from `(Element, edit_mode)` to a platform-neutral visual
//! description. The host translates the description into its own drawing
//! primitives; nothing here touches the model or any UI toolkit.

mod visual;

pub use visual::{
    element_visual, ElementVisual, Frame, Primitive, TextRole, TextRun, PLACEHOLDER_ALPHA,
};
