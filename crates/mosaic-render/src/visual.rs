//! The element-to-visual mapping.

use kurbo::Rect;
use mosaic_core::{
    Element, ElementContent, ElementKind, EntryAnimation, FillStyle, FontWeight, Rgba, ShadowLevel,
};

/// Alpha factor applied to muted/placeholder text.
pub const PLACEHOLDER_ALPHA: f64 = 0.55;

/// The painted background of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Element bounds in canvas coordinates.
    pub rect: Rect,
    /// Background paint (None for structural elements, which draw no surface).
    pub fill: Option<FillStyle>,
    pub corner_radius: f64,
    pub border: Option<Rgba>,
    pub shadow: ShadowLevel,
    pub opacity: f64,
    /// Content inset from the frame edge.
    pub padding: f64,
}

/// The role a text run plays inside its element, for host-side layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Body,
    Value,
    Label,
    ButtonLabel,
}

/// One run of text with resolved styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub size: f64,
    pub weight: FontWeight,
    pub color: Rgba,
    pub role: TextRole,
}

/// A drawable piece of element content.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextRun),
    /// Named icon from the host's icon set.
    Icon { name: String, color: Rgba },
    /// Short badge rendered in the element corner.
    Badge { text: String, color: Rgba },
    Image { url: String },
    /// Horizontal filled bar (dividers).
    Bar { color: Rgba },
    /// Dashed empty-state affordance with a muted label.
    Placeholder { label: String },
}

/// Everything the host needs to draw one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementVisual {
    pub frame: Frame,
    pub primitives: Vec<Primitive>,
    /// Navigation target; present only when the element is clickable
    /// (buttons outside edit mode, with a non-empty link).
    pub link: Option<String>,
    /// Entry transition; present only outside edit mode.
    pub entry: Option<EntryAnimation>,
}

/// Map an element to its visual description. Pure: never mutates the model,
/// and tolerates absent content via documented defaults.
pub fn element_visual(element: &Element, edit_mode: bool) -> ElementVisual {
    let style = &element.style;
    let structural = element.kind.is_structural();

    let frame = Frame {
        rect: element.bounds(),
        fill: if structural { None } else { Some(style.fill) },
        corner_radius: if structural { 0.0 } else { style.corner_radius },
        border: if structural { None } else { style.border_color },
        shadow: if structural {
            ShadowLevel::None
        } else {
            style.shadow
        },
        opacity: style.opacity,
        padding: if structural { 0.0 } else { style.padding },
    };

    let primitives = content_primitives(element, edit_mode);

    let link = match (&element.content, edit_mode) {
        (ElementContent::Button { link, .. }, false) if !link.is_empty() => Some(link.clone()),
        _ => None,
    };

    let entry = (!edit_mode && element.animation != EntryAnimation::None).then_some(element.animation);

    ElementVisual {
        frame,
        primitives,
        link,
        entry,
    }
}

fn content_primitives(element: &Element, edit_mode: bool) -> Vec<Primitive> {
    let style = &element.style;
    let text_color = style.text_color;
    let muted = text_color.faded(PLACEHOLDER_ALPHA);
    let mut primitives = Vec::new();

    match &element.content {
        ElementContent::Card {
            title,
            description,
            icon,
            badge,
        } => {
            if !icon.is_empty() {
                primitives.push(Primitive::Icon {
                    name: icon.clone(),
                    color: text_color,
                });
            }
            primitives.push(Primitive::Text(TextRun {
                text: title.clone(),
                size: style.font_size + 2.0,
                weight: bump_weight(style.font_weight),
                color: text_color,
                role: TextRole::Title,
            }));
            if !description.is_empty() {
                primitives.push(Primitive::Text(TextRun {
                    text: description.clone(),
                    size: style.font_size,
                    weight: style.font_weight,
                    color: muted,
                    role: TextRole::Body,
                }));
            }
            if !badge.is_empty() {
                primitives.push(Primitive::Badge {
                    text: badge.clone(),
                    color: text_color,
                });
            }
        }
        ElementContent::Text { text } => {
            if text.is_empty() {
                if edit_mode {
                    primitives.push(Primitive::Placeholder {
                        label: "Click to add text".to_string(),
                    });
                }
            } else {
                primitives.push(Primitive::Text(TextRun {
                    text: text.clone(),
                    size: style.font_size,
                    weight: style.font_weight,
                    color: text_color,
                    role: TextRole::Body,
                }));
            }
        }
        ElementContent::Image { url } => {
            if url.is_empty() {
                primitives.push(Primitive::Placeholder {
                    label: "No image".to_string(),
                });
            } else {
                primitives.push(Primitive::Image { url: url.clone() });
            }
        }
        ElementContent::Stat { value, label } => {
            primitives.push(Primitive::Text(TextRun {
                text: value.clone(),
                size: style.font_size * 2.4,
                weight: FontWeight::Bold,
                color: text_color,
                role: TextRole::Value,
            }));
            if !label.is_empty() {
                primitives.push(Primitive::Text(TextRun {
                    text: label.clone(),
                    size: style.font_size,
                    weight: style.font_weight,
                    color: muted,
                    role: TextRole::Label,
                }));
            }
        }
        ElementContent::Button { label, .. } => {
            primitives.push(Primitive::Text(TextRun {
                text: label.clone(),
                size: style.font_size,
                weight: bump_weight(style.font_weight),
                color: text_color,
                role: TextRole::ButtonLabel,
            }));
        }
        ElementContent::None => match element.kind {
            ElementKind::Divider => {
                primitives.push(Primitive::Bar {
                    color: style.fill.base_color(),
                });
            }
            ElementKind::Spacer => {
                if edit_mode {
                    primitives.push(Primitive::Placeholder {
                        label: "Spacer".to_string(),
                    });
                }
            }
            // Content was absent on a content-bearing kind (partial
            // document); render nothing rather than guessing.
            _ => {}
        },
    }

    primitives
}

fn bump_weight(weight: FontWeight) -> FontWeight {
    match weight {
        FontWeight::Normal => FontWeight::Semibold,
        FontWeight::Medium => FontWeight::Semibold,
        FontWeight::Semibold => FontWeight::Bold,
        FontWeight::Bold => FontWeight::Bold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::{ElementPatch, ElementStyle};

    fn element(kind: ElementKind) -> Element {
        Element::new(kind)
    }

    #[test]
    fn test_mapping_never_mutates_the_element() {
        let card = element(ElementKind::Card);
        let before = card.clone();
        let _ = element_visual(&card, true);
        let _ = element_visual(&card, false);
        assert_eq!(card, before);
    }

    #[test]
    fn test_card_shows_title_and_badge() {
        let mut card = element(ElementKind::Card);
        card.content = ElementContent::Card {
            title: "Revenue".to_string(),
            description: "Quarterly".to_string(),
            icon: "chart".to_string(),
            badge: "Q3".to_string(),
        };

        let visual = element_visual(&card, false);
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Text(run) if run.role == TextRole::Title && run.text == "Revenue")));
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Badge { text, .. } if text == "Q3")));
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Icon { name, .. } if name == "chart")));
    }

    #[test]
    fn test_empty_text_placeholder_only_in_edit_mode() {
        let text = element(ElementKind::Text);

        let editing = element_visual(&text, true);
        assert!(editing
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Placeholder { .. })));

        let viewing = element_visual(&text, false);
        assert!(viewing.primitives.is_empty());
    }

    #[test]
    fn test_image_placeholder_when_url_absent() {
        let image = element(ElementKind::Image);
        let visual = element_visual(&image, false);
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Placeholder { .. })));

        let mut image = element(ElementKind::Image);
        image.content = ElementContent::Image {
            url: "https://example.com/a.png".to_string(),
        };
        let visual = element_visual(&image, false);
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Image { url } if url == "https://example.com/a.png")));
    }

    #[test]
    fn test_stat_value_is_prominent() {
        let stat = element(ElementKind::Stat);
        let visual = element_visual(&stat, false);

        let value = visual
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Text(run) if run.role == TextRole::Value => Some(run),
                _ => None,
            })
            .expect("stat renders its value");
        assert!(value.size > stat.style.font_size);
        assert_eq!(value.weight, FontWeight::Bold);
    }

    #[test]
    fn test_button_link_only_outside_edit_mode() {
        let mut button = element(ElementKind::Button);
        button.content = ElementContent::Button {
            label: "Open".to_string(),
            link: "https://example.com".to_string(),
        };

        assert_eq!(element_visual(&button, true).link, None);
        assert_eq!(
            element_visual(&button, false).link,
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_button_with_empty_link_is_not_clickable() {
        let button = element(ElementKind::Button);
        assert_eq!(element_visual(&button, false).link, None);
    }

    #[test]
    fn test_divider_renders_a_bar_and_no_surface() {
        let divider = element(ElementKind::Divider);
        let visual = element_visual(&divider, false);

        assert_eq!(visual.frame.fill, None);
        assert_eq!(visual.frame.shadow, ShadowLevel::None);
        assert!(visual
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Bar { .. })));
    }

    #[test]
    fn test_spacer_placeholder_only_in_edit_mode() {
        let spacer = element(ElementKind::Spacer);
        assert!(element_visual(&spacer, false).primitives.is_empty());
        assert!(element_visual(&spacer, true)
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Placeholder { label } if label == "Spacer")));
    }

    #[test]
    fn test_entry_animation_only_outside_edit_mode() {
        let mut card = element(ElementKind::Card);
        card.animation = EntryAnimation::Fade;

        assert_eq!(element_visual(&card, true).entry, None);
        assert_eq!(
            element_visual(&card, false).entry,
            Some(EntryAnimation::Fade)
        );

        card.animation = EntryAnimation::None;
        assert_eq!(element_visual(&card, false).entry, None);
    }

    #[test]
    fn test_absent_content_renders_with_defaults() {
        let mut card = element(ElementKind::Card);
        card.content = ElementContent::None;
        card.style = ElementStyle::default();

        let visual = element_visual(&card, false);
        assert!(visual.primitives.is_empty());
        assert_eq!(visual.frame.corner_radius, 12.0);
        assert_eq!(visual.frame.padding, 16.0);
    }

    #[test]
    fn test_patch_then_render_reflects_style() {
        let mut card = element(ElementKind::Card);
        ElementPatch::style(mosaic_core::StylePatch {
            opacity: Some(0.4),
            corner_radius: Some(4.0),
            ..Default::default()
        })
        .apply(&mut card);

        let visual = element_visual(&card, false);
        assert_eq!(visual.frame.opacity, 0.4);
        assert_eq!(visual.frame.corner_radius, 4.0);
    }
}
