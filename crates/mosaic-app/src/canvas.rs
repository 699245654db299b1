//! The canvas: paints elements through the renderer and routes pointer input
//! into the gesture engine.

use egui::{Align2, Color32, Context, CursorIcon, Painter, Rect, Sense, Ui};
use kurbo::Point;
use mosaic_core::{gesture, BuilderStore, ElementId, EntryAnimation, RESIZE_GRIP};
use mosaic_render::{element_visual, ElementVisual, Primitive, TextRole, TextRun};
use mosaic_widgets::theme;

use crate::app::FallbackContent;
use crate::paint;

pub fn show(ctx: &Context, store: &mut BuilderStore, fallback: Option<&FallbackContent>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::new())
        .show(ctx, |ui| {
            let canvas_rect = ui.max_rect();
            paint::fill_rect(
                ui.painter(),
                canvas_rect,
                &store.layout().global_style.fill,
                paint::corner_radius(0.0),
                1.0,
            );

            if store.layout().is_empty() {
                show_empty(ui, canvas_rect, store, fallback);
                return;
            }

            handle_pointer(ui, canvas_rect, store);
            draw_elements(ui, canvas_rect, store);
        });
}

/// Zero elements: dashed affordance while editing, fallback content otherwise.
fn show_empty(ui: &mut Ui, canvas_rect: Rect, store: &BuilderStore, fallback: Option<&FallbackContent>) {
    if store.editor().edit_mode {
        let affordance = Rect::from_center_size(canvas_rect.center(), egui::vec2(380.0, 160.0));
        paint::dashed_rect(ui.painter(), affordance, Color32::from_white_alpha(70));
        ui.painter().text(
            affordance.center(),
            Align2::CENTER_CENTER,
            "Empty canvas. Use Add element to get started",
            paint::font(14.0),
            Color32::from_white_alpha(130),
        );
    } else if let Some(fallback) = fallback {
        fallback(ui);
    } else {
        ui.painter().text(
            canvas_rect.center(),
            Align2::CENTER_CENTER,
            "Nothing to show yet",
            paint::font(14.0),
            theme::TEXT_MUTED,
        );
    }
}

fn to_canvas(canvas_rect: Rect, pos: egui::Pos2) -> Point {
    Point::new(
        f64::from(pos.x - canvas_rect.left()),
        f64::from(pos.y - canvas_rect.top()),
    )
}

/// Selected element wins the hit test (it is raised above the others), then
/// front-to-back z-order.
fn hit_test(store: &BuilderStore, point: Point) -> Option<ElementId> {
    if let Some(selected) = store.selected_element() {
        if selected.hit_test(point) {
            return Some(selected.id);
        }
    }
    store.layout().element_at(point)
}

fn handle_pointer(ui: &mut Ui, canvas_rect: Rect, store: &mut BuilderStore) {
    if !store.editor().edit_mode {
        return;
    }
    let response = ui.interact(canvas_rect, ui.id().with("canvas"), Sense::click_and_drag());

    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            let point = to_canvas(canvas_rect, pos);
            match hit_test(store, point) {
                Some(id) => {
                    store.gesture_start(id, point);
                }
                None => store.select_element(None),
            }
        }
    } else if response.dragged() {
        if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
            store.gesture_move(to_canvas(canvas_rect, pos));
        }
    }
    if response.drag_stopped() {
        store.gesture_end();
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let point = to_canvas(canvas_rect, pos);
            store.select_element(hit_test(store, point));
        }
    }

    if let Some(pos) = response.hover_pos() {
        let point = to_canvas(canvas_rect, pos);
        let over_grip = store
            .selected_element()
            .is_some_and(|element| gesture::resize_grip_rect(element).contains(point));
        if over_grip || store.editor().is_resizing {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeNwSe);
        } else if store.editor().is_dragging {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if hit_test(store, point).is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
    }
}

fn draw_elements(ui: &mut Ui, canvas_rect: Rect, store: &BuilderStore) {
    let edit_mode = store.editor().edit_mode;
    let selected = store.editor().selected;

    // The selected element is painted last (raised) without reordering the
    // underlying document.
    let mut order: Vec<ElementId> = store
        .layout()
        .elements
        .iter()
        .map(|e| e.id)
        .filter(|id| Some(*id) != selected)
        .collect();
    if let Some(id) = selected {
        if store.layout().contains(id) {
            order.push(id);
        }
    }

    let mut clicked_link: Option<String> = None;
    for id in order {
        let Some(element) = store.layout().element(id) else {
            continue;
        };
        let visual = element_visual(element, edit_mode);
        let rect = draw_visual(ui, canvas_rect, id, &visual);

        if edit_mode && selected == Some(id) {
            draw_selection(ui, rect);
        }

        if let Some(link) = &visual.link {
            let response = ui
                .interact(rect, ui.id().with(("element-link", id)), Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand);
            if response.clicked() {
                clicked_link = Some(link.clone());
            }
        }
    }

    if let Some(link) = clicked_link {
        ui.ctx().open_url(egui::OpenUrl::same_tab(link));
    }
}

/// Paint one element visual; returns its (possibly animated) screen rect.
fn draw_visual(ui: &Ui, canvas_rect: Rect, id: ElementId, visual: &ElementVisual) -> Rect {
    let frame = &visual.frame;
    let mut rect = Rect::from_min_size(
        egui::pos2(
            canvas_rect.left() + frame.rect.x0 as f32,
            canvas_rect.top() + frame.rect.y0 as f32,
        ),
        egui::vec2(frame.rect.width() as f32, frame.rect.height() as f32),
    );
    let mut opacity = frame.opacity;

    if let Some(entry) = visual.entry {
        let anim_id = egui::Id::new(("entry", id));
        // The animation must start from zero the first time the element is
        // seen; egui otherwise jumps straight to the target value.
        let first_seen = ui.ctx().data_mut(|d| {
            let seen = d.get_temp::<bool>(anim_id).unwrap_or(false);
            if !seen {
                d.insert_temp(anim_id, true);
            }
            !seen
        });
        if first_seen {
            ui.ctx().animate_bool_with_time(anim_id, false, 0.0);
        }
        let t = f64::from(ui.ctx().animate_bool_with_time(anim_id, true, 0.45));
        match entry {
            EntryAnimation::Fade => opacity *= t,
            EntryAnimation::SlideUp => {
                rect = rect.translate(egui::vec2(0.0, ((1.0 - t) * 24.0) as f32));
                opacity *= t;
            }
            EntryAnimation::SlideDown => {
                rect = rect.translate(egui::vec2(0.0, (-(1.0 - t) * 24.0) as f32));
                opacity *= t;
            }
            EntryAnimation::Zoom => {
                let scale = 0.9 + 0.1 * t as f32;
                rect = Rect::from_center_size(rect.center(), rect.size() * scale);
                opacity *= t;
            }
            EntryAnimation::None => {}
        }
    }

    let radius = paint::corner_radius(frame.corner_radius);
    let painter = ui.painter();
    if let Some(fill) = &frame.fill {
        paint::shadow(painter, rect, radius, frame.shadow, opacity);
        paint::fill_rect(painter, rect, fill, radius, opacity);
    }
    if let Some(border) = frame.border {
        painter.rect_stroke(
            rect,
            radius,
            egui::Stroke::new(1.0, paint::with_opacity(border, opacity)),
            egui::StrokeKind::Inside,
        );
    }

    draw_primitives(painter, rect.shrink(frame.padding as f32), &visual.primitives, opacity);
    rect
}

fn draw_primitives(painter: &Painter, content: Rect, primitives: &[Primitive], opacity: f64) {
    let mut cursor_y = content.top();
    for primitive in primitives {
        match primitive {
            Primitive::Text(run) => {
                cursor_y = draw_text_run(painter, content, cursor_y, run, opacity);
            }
            Primitive::Icon { name, color } => {
                let icon_rect = Rect::from_min_size(
                    egui::pos2(content.left(), cursor_y),
                    egui::vec2(20.0, 20.0),
                );
                painter.rect_filled(
                    icon_rect,
                    paint::corner_radius(6.0),
                    paint::with_opacity(color.faded(0.25), opacity),
                );
                let initial = name
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .unwrap_or_default();
                painter.text(
                    icon_rect.center(),
                    Align2::CENTER_CENTER,
                    initial,
                    paint::font(12.0),
                    paint::with_opacity(*color, opacity),
                );
                cursor_y += 26.0;
            }
            Primitive::Badge { text, color } => {
                let width = text.len() as f32 * 6.5 + 14.0;
                let badge_rect = Rect::from_min_size(
                    egui::pos2(content.right() - width, content.top()),
                    egui::vec2(width, 18.0),
                );
                painter.rect_filled(
                    badge_rect,
                    paint::corner_radius(9.0),
                    paint::with_opacity(color.faded(0.2), opacity),
                );
                painter.text(
                    badge_rect.center(),
                    Align2::CENTER_CENTER,
                    text,
                    paint::font(11.0),
                    paint::with_opacity(*color, opacity),
                );
            }
            Primitive::Image { url } => {
                painter.rect_stroke(
                    content,
                    paint::corner_radius(4.0),
                    egui::Stroke::new(1.0, Color32::from_white_alpha(60)),
                    egui::StrokeKind::Inside,
                );
                let name = url.rsplit('/').next().unwrap_or(url.as_str());
                painter.text(
                    content.center(),
                    Align2::CENTER_CENTER,
                    name,
                    paint::font(12.0),
                    Color32::from_white_alpha(110),
                );
            }
            Primitive::Bar { color } => {
                let y = content.center().y;
                painter.rect_filled(
                    Rect::from_min_max(
                        egui::pos2(content.left(), y - 1.0),
                        egui::pos2(content.right(), y + 1.0),
                    ),
                    paint::corner_radius(0.0),
                    paint::with_opacity(*color, opacity),
                );
            }
            Primitive::Placeholder { label } => {
                paint::dashed_rect(painter, content, Color32::from_white_alpha(60));
                painter.text(
                    content.center(),
                    Align2::CENTER_CENTER,
                    label,
                    paint::font(12.0),
                    Color32::from_white_alpha(110),
                );
            }
        }
    }
}

fn draw_text_run(painter: &Painter, content: Rect, cursor_y: f32, run: &TextRun, opacity: f64) -> f32 {
    let color = paint::with_opacity(run.color, opacity);
    let font_id = paint::font(run.size);
    match run.role {
        TextRole::ButtonLabel => {
            paint::text_weighted(
                painter,
                content.center(),
                Align2::CENTER_CENTER,
                &run.text,
                font_id,
                run.weight,
                color,
            );
            cursor_y
        }
        TextRole::Title | TextRole::Body | TextRole::Value | TextRole::Label => {
            paint::text_weighted(
                painter,
                egui::pos2(content.left(), cursor_y),
                Align2::LEFT_TOP,
                &run.text,
                font_id,
                run.weight,
                color,
            );
            cursor_y + (run.size * 1.45) as f32
        }
    }
}

fn draw_selection(ui: &Ui, rect: Rect) {
    let painter = ui.painter();
    painter.rect_stroke(
        rect.expand(1.0),
        paint::corner_radius(2.0),
        egui::Stroke::new(2.0, theme::ACCENT),
        egui::StrokeKind::Outside,
    );
    let grip = RESIZE_GRIP as f32;
    let grip_rect = Rect::from_min_size(
        egui::pos2(rect.right() - grip, rect.bottom() - grip),
        egui::vec2(grip, grip),
    );
    painter.rect_filled(grip_rect, paint::corner_radius(3.0), theme::ACCENT);
}
