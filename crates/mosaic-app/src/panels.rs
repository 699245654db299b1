//! Toolbar and settings panels.
//!
//! The panels hold no draft state: every form is derived from the model each
//! frame and every edited field immediately issues a one-field patch.

use egui::{Context, Frame, Margin, RichText, Ui};
use mosaic_core::{
    BuilderStore, Element, ElementContent, ElementKind, ElementPatch, EntryAnimation, FillStyle,
    FontWeight, GlobalStylePatch, GradientDirection, Rgba, ShadowLevel, StylePatch,
};
use mosaic_widgets::{
    color_row, drag_value_row, section_label, separator, slider_row, text_row, theme, TextButton,
    ToggleButton,
};

use crate::paint;
use crate::shortcuts;

/// Default border color offered when a border is first enabled.
const DEFAULT_BORDER: Rgba = Rgba::opaque(71, 85, 105);

/// Top toolbar. Returns true when the user asked to save.
pub fn toolbar(ctx: &Context, store: &mut BuilderStore, show_global_styles: &mut bool) -> bool {
    let mut save_clicked = false;
    egui::TopBottomPanel::top("toolbar")
        .frame(
            Frame::new()
                .fill(theme::PANEL_BG)
                .inner_margin(Margin::symmetric(12, 6)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Mosaic").size(16.0).strong().color(theme::TEXT));
                ui.add_space(12.0);

                if store.editor().edit_mode {
                    ui.menu_button("Add element", |ui| {
                        for kind in ElementKind::ALL {
                            if ui.button(kind.label()).clicked() {
                                store.add_element(kind);
                            }
                        }
                    });
                    if TextButton::new("Undo")
                        .enabled(store.can_undo())
                        .tooltip("Ctrl+Z")
                        .show(ui)
                    {
                        store.undo();
                    }
                    if TextButton::new("Redo")
                        .enabled(store.can_redo())
                        .tooltip("Ctrl+Shift+Z")
                        .show(ui)
                    {
                        store.redo();
                    }
                    if ToggleButton::new("Page style", *show_global_styles).show(ui) {
                        *show_global_styles = !*show_global_styles;
                    }
                    if TextButton::new("Save")
                        .accent()
                        .enabled(!store.is_saving())
                        .tooltip("Ctrl+S")
                        .show(ui)
                    {
                        save_clicked = true;
                    }
                    if store.is_saving() {
                        ui.spinner();
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if store.is_admin() {
                        let edit_mode = store.editor().edit_mode;
                        let label = if edit_mode { "Done editing" } else { "Edit" };
                        if ToggleButton::new(label, edit_mode).show(ui) {
                            store.toggle_edit_mode();
                            *show_global_styles = false;
                        }
                    }
                    if store.editor().edit_mode {
                        ui.menu_button("Shortcuts", |ui| {
                            for shortcut in shortcuts::ALL {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(shortcut.keys)
                                            .monospace()
                                            .color(theme::TEXT),
                                    );
                                    ui.label(
                                        RichText::new(shortcut.description)
                                            .color(theme::TEXT_MUTED),
                                    );
                                });
                            }
                        });
                    }
                    if store.is_loading() {
                        ui.spinner();
                    }
                });
            });
        });
    save_clicked
}

/// Right-hand settings panel for the selected element.
pub fn element_settings(ctx: &Context, store: &mut BuilderStore) {
    if !store.editor().edit_mode {
        return;
    }
    let Some(element) = store.selected_element().cloned() else {
        return;
    };

    egui::SidePanel::right("element_settings")
        .resizable(false)
        .exact_width(280.0)
        .frame(
            Frame::new()
                .fill(theme::PANEL_BG)
                .inner_margin(Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.label(
                RichText::new(element.kind.label())
                    .size(15.0)
                    .strong()
                    .color(theme::TEXT),
            );
            ui.add_space(8.0);

            content_section(ui, store, &element);
            style_section(ui, store, &element);
            actions_section(ui, store, &element);
        });
}

fn content_section(ui: &mut Ui, store: &mut BuilderStore, element: &Element) {
    let id = element.id;
    match element.content.clone() {
        ElementContent::Card {
            mut title,
            mut description,
            mut icon,
            mut badge,
        } => {
            section_label(ui, "CONTENT");
            let mut changed = text_row(ui, "Title", &mut title);
            changed |= text_row(ui, "Description", &mut description);
            changed |= text_row(ui, "Icon", &mut icon);
            changed |= text_row(ui, "Badge", &mut badge);
            if changed {
                store.update_element(
                    id,
                    ElementPatch::content(ElementContent::Card {
                        title,
                        description,
                        icon,
                        badge,
                    }),
                );
            }
        }
        ElementContent::Text { mut text } => {
            section_label(ui, "CONTENT");
            if ui
                .add(egui::TextEdit::multiline(&mut text).desired_rows(3))
                .changed()
            {
                store.update_element(id, ElementPatch::content(ElementContent::Text { text }));
            }
        }
        ElementContent::Image { mut url } => {
            section_label(ui, "CONTENT");
            if text_row(ui, "Image URL", &mut url) {
                store.update_element(id, ElementPatch::content(ElementContent::Image { url }));
            }
        }
        ElementContent::Stat {
            mut value,
            mut label,
        } => {
            section_label(ui, "CONTENT");
            let mut changed = text_row(ui, "Value", &mut value);
            changed |= text_row(ui, "Label", &mut label);
            if changed {
                store.update_element(
                    id,
                    ElementPatch::content(ElementContent::Stat { value, label }),
                );
            }
        }
        ElementContent::Button {
            mut label,
            mut link,
        } => {
            section_label(ui, "CONTENT");
            let mut changed = text_row(ui, "Label", &mut label);
            changed |= text_row(ui, "Link", &mut link);
            if changed {
                store.update_element(
                    id,
                    ElementPatch::content(ElementContent::Button { label, link }),
                );
            }
        }
        ElementContent::None => {}
    }
}

fn style_section(ui: &mut Ui, store: &mut BuilderStore, element: &Element) {
    let id = element.id;
    let style = element.style.clone();
    let structural = element.kind.is_structural();

    ui.add_space(8.0);
    separator(ui);
    section_label(ui, "STYLE");

    fill_controls(ui, style.fill, |fill| {
        store.update_element(
            id,
            ElementPatch::style(StylePatch {
                fill: Some(fill),
                ..Default::default()
            }),
        );
    });

    if !structural {
        let mut text_color = paint::color32(style.text_color);
        if color_row(ui, "Text", &mut text_color) {
            store.update_element(
                id,
                ElementPatch::style(StylePatch {
                    text_color: Some(paint::rgba(text_color)),
                    ..Default::default()
                }),
            );
        }

        let mut has_border = style.border_color.is_some();
        if ui.checkbox(&mut has_border, "Border").changed() {
            let border = if has_border {
                Some(DEFAULT_BORDER)
            } else {
                None
            };
            store.update_element(
                id,
                ElementPatch::style(StylePatch {
                    border_color: Some(border),
                    ..Default::default()
                }),
            );
        }
        if let Some(border) = style.border_color {
            let mut border32 = paint::color32(border);
            if color_row(ui, "Border color", &mut border32) {
                store.update_element(
                    id,
                    ElementPatch::style(StylePatch {
                        border_color: Some(Some(paint::rgba(border32))),
                        ..Default::default()
                    }),
                );
            }
        }

        let mut corner_radius = style.corner_radius;
        if drag_value_row(ui, "Radius", &mut corner_radius, 0.0..=48.0) {
            store.update_element(
                id,
                ElementPatch::style(StylePatch {
                    corner_radius: Some(corner_radius),
                    ..Default::default()
                }),
            );
        }

        let mut padding = style.padding;
        if drag_value_row(ui, "Padding", &mut padding, 0.0..=64.0) {
            store.update_element(
                id,
                ElementPatch::style(StylePatch {
                    padding: Some(padding),
                    ..Default::default()
                }),
            );
        }

        let mut font_size = style.font_size;
        if drag_value_row(ui, "Font size", &mut font_size, 8.0..=72.0) {
            store.update_element(
                id,
                ElementPatch::style(StylePatch {
                    font_size: Some(font_size),
                    ..Default::default()
                }),
            );
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new("Weight").size(12.0).color(theme::TEXT_MUTED));
            egui::ComboBox::from_id_salt(("font_weight", id))
                .selected_text(style.font_weight.label())
                .show_ui(ui, |ui| {
                    for weight in FontWeight::ALL {
                        if ui
                            .selectable_label(style.font_weight == weight, weight.label())
                            .clicked()
                        {
                            store.update_element(
                                id,
                                ElementPatch::style(StylePatch {
                                    font_weight: Some(weight),
                                    ..Default::default()
                                }),
                            );
                        }
                    }
                });
        });
    }

    let mut opacity = style.opacity;
    if slider_row(ui, "Opacity", &mut opacity, 0.0..=1.0) {
        store.update_element(
            id,
            ElementPatch::style(StylePatch {
                opacity: Some(opacity),
                ..Default::default()
            }),
        );
    }

    if !structural {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Shadow").size(12.0).color(theme::TEXT_MUTED));
            egui::ComboBox::from_id_salt(("shadow", id))
                .selected_text(style.shadow.label())
                .show_ui(ui, |ui| {
                    for level in ShadowLevel::ALL {
                        if ui
                            .selectable_label(style.shadow == level, level.label())
                            .clicked()
                        {
                            store.update_element(
                                id,
                                ElementPatch::style(StylePatch {
                                    shadow: Some(level),
                                    ..Default::default()
                                }),
                            );
                        }
                    }
                });
        });
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new("Entrance").size(12.0).color(theme::TEXT_MUTED));
        egui::ComboBox::from_id_salt(("animation", id))
            .selected_text(element.animation.label())
            .show_ui(ui, |ui| {
                for animation in EntryAnimation::ALL {
                    if ui
                        .selectable_label(element.animation == animation, animation.label())
                        .clicked()
                    {
                        store.update_element(id, ElementPatch::animation(animation));
                    }
                }
            });
    });
}

fn actions_section(ui: &mut Ui, store: &mut BuilderStore, element: &Element) {
    let id = element.id;
    ui.add_space(8.0);
    separator(ui);
    section_label(ui, "ACTIONS");
    ui.horizontal(|ui| {
        if TextButton::new("Duplicate").show(ui) {
            store.duplicate_element(id);
        }
        if TextButton::new("Copy").show(ui) {
            store.copy_element(id);
        }
        if TextButton::new("Paste").enabled(store.editor().copied.is_some()).show(ui) {
            store.paste_element();
        }
    });
    if TextButton::new("Delete").danger().tooltip("Delete key").show(ui) {
        store.delete_element(id);
    }
}

/// Shared fill controls: solid color, or gradient stops + direction when the
/// gradient flag is on.
fn fill_controls(ui: &mut Ui, fill: FillStyle, mut on_change: impl FnMut(FillStyle)) {
    let mut gradient_on = fill.is_gradient();
    if ui.checkbox(&mut gradient_on, "Gradient fill").changed() {
        let next = if gradient_on {
            fill.into_gradient()
        } else {
            fill.into_solid()
        };
        on_change(next);
        return;
    }

    match fill {
        FillStyle::Solid(color) => {
            let mut color32 = paint::color32(color);
            if color_row(ui, "Fill", &mut color32) {
                on_change(FillStyle::Solid(paint::rgba(color32)));
            }
        }
        FillStyle::Gradient {
            start,
            end,
            direction,
        } => {
            let mut start32 = paint::color32(start);
            if color_row(ui, "From", &mut start32) {
                on_change(FillStyle::Gradient {
                    start: paint::rgba(start32),
                    end,
                    direction,
                });
            }
            let mut end32 = paint::color32(end);
            if color_row(ui, "To", &mut end32) {
                on_change(FillStyle::Gradient {
                    start,
                    end: paint::rgba(end32),
                    direction,
                });
            }
            ui.horizontal(|ui| {
                ui.label(RichText::new("Direction").size(12.0).color(theme::TEXT_MUTED));
                egui::ComboBox::from_id_salt("gradient_direction")
                    .selected_text(direction.label())
                    .show_ui(ui, |ui| {
                        for candidate in GradientDirection::ALL {
                            if ui
                                .selectable_label(direction == candidate, candidate.label())
                                .clicked()
                            {
                                on_change(FillStyle::Gradient {
                                    start,
                                    end,
                                    direction: candidate,
                                });
                            }
                        }
                    });
            });
        }
    }
}

/// Floating window for the canvas-wide style.
pub fn global_styles_window(ctx: &Context, store: &mut BuilderStore, open: &mut bool) {
    let global = store.layout().global_style.clone();

    let mut keep_open = *open;
    egui::Window::new("Page style")
        .open(&mut keep_open)
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            fill_controls(ui, global.fill, |fill| {
                store.update_global_styles(GlobalStylePatch::fill(fill));
            });

            let mut columns = global.grid_columns;
            ui.horizontal(|ui| {
                ui.label(RichText::new("Grid columns").size(12.0).color(theme::TEXT_MUTED));
                if ui
                    .add(egui::DragValue::new(&mut columns).range(1..=24))
                    .changed()
                {
                    store.update_global_styles(GlobalStylePatch {
                        grid_columns: Some(columns),
                        ..Default::default()
                    });
                }
            });

            let mut gap = global.grid_gap;
            if drag_value_row(ui, "Grid gap", &mut gap, 0.0..=64.0) {
                store.update_global_styles(GlobalStylePatch {
                    grid_gap: Some(gap),
                    ..Default::default()
                });
            }
        });
    *open = keep_open;
}
