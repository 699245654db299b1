//! Translation from the structured style values to egui paint primitives.

use egui::{Align2, Color32, CornerRadius, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke};
use mosaic_core::{FillStyle, FontWeight, GradientDirection, Rgba, ShadowLevel};

pub fn color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn rgba(color: Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba::new(r, g, b, a)
}

/// Color with an extra opacity factor applied to its alpha.
pub fn with_opacity(color: Rgba, opacity: f64) -> Color32 {
    color32(color.faded(opacity))
}

pub fn corner_radius(radius: f64) -> CornerRadius {
    CornerRadius::same(radius.clamp(0.0, 255.0) as u8)
}

pub fn font(size: f64) -> FontId {
    FontId::proportional(size as f32)
}

/// Paint a fill (solid or gradient) into `rect`.
pub fn fill_rect(painter: &Painter, rect: Rect, fill: &FillStyle, radius: CornerRadius, opacity: f64) {
    match *fill {
        FillStyle::Solid(color) => {
            painter.rect_filled(rect, radius, with_opacity(color, opacity));
        }
        FillStyle::Gradient {
            start,
            end,
            direction,
        } => {
            painter.add(gradient_mesh(
                rect,
                with_opacity(start, opacity),
                with_opacity(end, opacity),
                direction,
            ));
        }
    }
}

/// Two-stop linear gradient as a vertex-colored quad.
pub fn gradient_mesh(rect: Rect, start: Color32, end: Color32, direction: GradientDirection) -> Mesh {
    let ((ax, ay), (bx, by)) = direction.axis();
    let len_sq = (bx - ax).powi(2) + (by - ay).powi(2);
    let corner_color = |u: f64, v: f64| {
        let t = (((u - ax) * (bx - ax) + (v - ay) * (by - ay)) / len_sq).clamp(0.0, 1.0);
        lerp_color(start, end, t as f32)
    };

    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), corner_color(0.0, 0.0));
    mesh.colored_vertex(rect.right_top(), corner_color(1.0, 0.0));
    mesh.colored_vertex(rect.right_bottom(), corner_color(1.0, 1.0));
    mesh.colored_vertex(rect.left_bottom(), corner_color(0.0, 1.0));
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let [ar, ag, ab, aa] = a.to_srgba_unmultiplied();
    let [br, bg, bb, ba] = b.to_srgba_unmultiplied();
    let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Color32::from_rgba_unmultiplied(lerp(ar, br), lerp(ag, bg), lerp(ab, bb), lerp(aa, ba))
}

/// Paint the drop shadow below an element surface.
pub fn shadow(painter: &Painter, rect: Rect, radius: CornerRadius, level: ShadowLevel, opacity: f64) {
    if level == ShadowLevel::None {
        return;
    }
    let alpha = (level.alpha() * opacity * 255.0).clamp(0.0, 255.0) as u8;
    let offset = level.y_offset() as f32;
    painter.rect_filled(
        rect.translate(egui::vec2(0.0, offset)).expand(offset * 0.5),
        radius,
        Color32::from_black_alpha(alpha),
    );
}

/// Dashed rectangle outline, used for empty-state affordances.
pub fn dashed_rect(painter: &Painter, rect: Rect, color: Color32) {
    let stroke = Stroke::new(1.0, color);
    let corners: [Pos2; 5] = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    for pair in corners.windows(2) {
        painter.extend(Shape::dashed_line(pair, stroke, 6.0, 4.0));
    }
}

/// Draw a text run, simulating heavier weights with a second offset pass.
pub fn text_weighted(
    painter: &Painter,
    pos: Pos2,
    anchor: Align2,
    text: &str,
    font_id: FontId,
    weight: FontWeight,
    color: Color32,
) {
    painter.text(pos, anchor, text, font_id.clone(), color);
    if matches!(weight, FontWeight::Semibold | FontWeight::Bold) {
        painter.text(pos + egui::vec2(0.4, 0.0), anchor, text, font_id, color);
    }
}
