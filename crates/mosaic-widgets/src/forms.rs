//! Labeled form rows for the settings panels.
//!
//! Each row reports whether the user changed the value this frame, so the
//! caller can issue an immediate partial update; the widgets hold no state of
//! their own.

use egui::{Color32, Ui};

use crate::{sizing, theme};

fn row_label(ui: &mut Ui, label: &str) {
    let text = egui::RichText::new(label).size(12.0).color(theme::TEXT_MUTED);
    ui.add_sized(
        [sizing::FORM_LABEL_WIDTH, sizing::BUTTON_HEIGHT],
        egui::Label::new(text),
    );
}

/// Labeled single-line text field. Returns true when the text changed.
pub fn text_row(ui: &mut Ui, label: &str, value: &mut String) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        row_label(ui, label);
        changed = ui
            .add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY))
            .changed();
    });
    changed
}

/// Labeled color swatch. Returns true when the color changed.
pub fn color_row(ui: &mut Ui, label: &str, color: &mut Color32) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        row_label(ui, label);
        changed = ui.color_edit_button_srgba(color).changed();
    });
    changed
}

/// Labeled drag value. Returns true when the value changed.
pub fn drag_value_row(ui: &mut Ui, label: &str, value: &mut f64, range: std::ops::RangeInclusive<f64>) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        row_label(ui, label);
        changed = ui
            .add(egui::DragValue::new(value).range(range).speed(1.0))
            .changed();
    });
    changed
}

/// Labeled slider. Returns true when the value changed.
pub fn slider_row(ui: &mut Ui, label: &str, value: &mut f64, range: std::ops::RangeInclusive<f64>) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        row_label(ui, label);
        changed = ui.add(egui::Slider::new(value, range)).changed();
    });
    changed
}
