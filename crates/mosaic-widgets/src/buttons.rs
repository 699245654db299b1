//! Button components: toolbar text buttons and on/off toggles.

use egui::{vec2, Color32, CornerRadius, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// A compact text button with optional accent/danger styling.
pub struct TextButton<'a> {
    label: &'a str,
    tooltip: Option<&'a str>,
    accent: bool,
    danger: bool,
    enabled: bool,
}

impl<'a> TextButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            tooltip: None,
            accent: false,
            danger: false,
            enabled: true,
        }
    }

    /// Solid accent background (primary actions).
    pub fn accent(mut self) -> Self {
        self.accent = true;
        self
    }

    /// Danger styling (destructive actions).
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Tooltip shown on hover (e.g. the keyboard shortcut).
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let text_width = self.label.len() as f32 * 7.0 + 20.0;
        let size = vec2(text_width.max(48.0), sizing::BUTTON_HEIGHT);
        let sense = if self.enabled {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let (bg, fg) = if !self.enabled {
                (Color32::TRANSPARENT, theme::TEXT_MUTED)
            } else if self.danger {
                (theme::DANGER, Color32::WHITE)
            } else if self.accent {
                (theme::ACCENT, Color32::WHITE)
            } else if response.hovered() {
                (theme::HOVER_BG, theme::TEXT)
            } else {
                (Color32::TRANSPARENT, theme::TEXT)
            };

            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg);
            if !self.accent && !self.danger && self.enabled {
                ui.painter().rect_stroke(
                    rect,
                    radius,
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Inside,
                );
            }
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(13.0),
                fg,
            );
        }

        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        self.enabled && response.clicked()
    }
}

/// An on/off toggle rendered as a pill button.
pub struct ToggleButton<'a> {
    label: &'a str,
    on: bool,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, on: bool) -> Self {
        Self { label, on }
    }

    /// Show the toggle and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(self.label.len() as f32 * 7.0 + 24.0, sizing::BUTTON_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg, fg) = if self.on {
                (theme::ACCENT, Color32::WHITE)
            } else if response.hovered() {
                (theme::HOVER_BG, theme::TEXT)
            } else {
                (Color32::TRANSPARENT, theme::TEXT_MUTED)
            };
            let radius = CornerRadius::same(sizing::CORNER_RADIUS * 3);
            ui.painter().rect_filled(rect, radius, bg);
            if !self.on {
                ui.painter().rect_stroke(
                    rect,
                    radius,
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Inside,
                );
            }
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(13.0),
                fg,
            );
        }

        response.clicked()
    }
}
