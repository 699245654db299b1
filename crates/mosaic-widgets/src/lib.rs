//! Reusable egui widget components for the Mosaic settings panels.
//!
//! - **Buttons**: toolbar text buttons and on/off toggles
//! - **Forms**: labeled color rows, drag-value rows, section labels
//! - **Layout**: panel frames, separators

pub mod buttons;
pub mod forms;
pub mod layout;

pub use buttons::{TextButton, ToggleButton};
pub use forms::{color_row, drag_value_row, slider_row, text_row};
pub use layout::{panel_frame, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Toolbar button height
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Label column width in form rows
    pub const FORM_LABEL_WIDTH: f32 = 96.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color on panels
    pub const TEXT: Color32 = Color32::from_rgb(226, 232, 240);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 163, 184);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85);
    /// Selection/active color
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(30, 41, 59);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(15, 23, 42);
    /// Danger/destructive action color
    pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
}
