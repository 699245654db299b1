//! The persisted layout document.

use crate::element::{Element, ElementId, FillStyle, Rgba};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Canvas-wide styling shared by all elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStyle {
    #[serde(default = "default_page_fill")]
    pub fill: FillStyle,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u32,
    #[serde(default = "default_grid_gap")]
    pub grid_gap: f64,
}

fn default_page_fill() -> FillStyle {
    FillStyle::Solid(Rgba::PAGE)
}

fn default_grid_columns() -> u32 {
    12
}

fn default_grid_gap() -> f64 {
    16.0
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            fill: default_page_fill(),
            grid_columns: default_grid_columns(),
            grid_gap: default_grid_gap(),
        }
    }
}

/// The dashboard document: a canvas of elements plus global styling.
///
/// Element order is z-order only (back to front); it carries no other
/// semantics. Element ids are unique within a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub global_style: GlobalStyle,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
    /// Last persisted-write time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: u64,
}

impl Default for Layout {
    fn default() -> Self {
        Self::empty()
    }
}

impl Layout {
    /// Create the empty default document installed when nothing is persisted.
    pub fn empty() -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Dashboard".to_string(),
            elements: Vec::new(),
            global_style: GlobalStyle::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Get an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by id.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Topmost element at a canvas-space point (front of the z-order wins).
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point))
            .map(|e| e.id)
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
