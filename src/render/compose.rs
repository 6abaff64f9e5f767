use crate::assets::store::{AssetId, AssetState, AssetStore};
use crate::config::{CategoryColors, EditorConfig};
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Rect, Size};
use crate::foundation::error::PostResult;
use crate::render::draw_list::{
    DrawList, DrawOp, DrawSource, Geometry, Layer, OverlayKind, TextRun,
};
use crate::render::ornament::{decoration_geometry, swirl};
use crate::render::text::TextMeasure;
use crate::scene::model::{
    Decoration, DecorationKind, ElementId, ElementKind, ElementRef, ImageElement, TextAlign,
    TextLabel,
};
use crate::scene::slide::{Project, Slide, SlideKind};
use crate::transform::placement::{BoxGeom, local_affine};

/// Corner radius of text label background boxes.
pub const LABEL_CORNER_RADIUS: f64 = 8.0;

/// Corner radius of the story box.
const STORY_CORNER_RADIUS: f64 = 16.0;

/// Opacity of start-slide swirl ornaments.
const ORNAMENT_OPACITY: f32 = 0.35;

/// Distance of the rotation anchor above the selection outline, in screen pixels.
const ROTATER_OFFSET: f64 = 50.0;

/// Inputs the compositor reads besides the slide itself.
#[derive(Clone, Copy, Debug)]
pub struct ComposeOptions<'a> {
    /// Palette, fonts and overlay styling.
    pub config: &'a EditorConfig,
    /// Decoded photos and logos.
    pub assets: &'a AssetStore,
    /// Element to draw selection chrome around.
    pub selection: Option<ElementId>,
    /// Screen pixels per canvas unit; only sizes the chrome.
    pub display_scale: f64,
}

/// Resolved handle box of any element.
///
/// Text boxes are the measured glyph run plus padding on every side, measured on each call.
pub fn element_box(el: ElementRef<'_>, measure: &mut dyn TextMeasure) -> BoxGeom {
    match el {
        ElementRef::Image(img) => img.placement.to_box(),
        ElementRef::Text(label) => label_box(label, measure),
        ElementRef::Decoration(d) => d.placement().to_box(),
    }
}

/// Background box of a text label.
pub fn label_box(label: &TextLabel, measure: &mut dyn TextMeasure) -> BoxGeom {
    let glyphs = measure.measure(&label.text, &label.font_family, label.font_size, None);
    BoxGeom {
        x: label.x,
        y: label.y,
        width: glyphs.width + 2.0 * label.padding,
        height: glyphs.height + 2.0 * label.padding,
        rotation: label.rotation,
    }
}

/// Colors of the project's category, falling back to the first configured category.
pub fn category_colors(config: &EditorConfig, category_id: &str) -> PostResult<CategoryColors> {
    match config.category(category_id) {
        Some(c) => Ok(c.colors),
        None => Ok(config.default_category()?.colors),
    }
}

/// Build the layered draw list of slide `index`.
///
/// Order: background, slide-type ornaments, decorations, images, text labels, dynamic
/// overlays, then selection chrome. The result depends only on the inputs.
#[tracing::instrument(skip_all, fields(slide = index))]
pub fn compose_slide(
    project: &Project,
    index: usize,
    opts: &ComposeOptions<'_>,
    measure: &mut dyn TextMeasure,
) -> PostResult<DrawList> {
    let slide = project.slide(index)?;
    let canvas = project.canvas();
    let colors = category_colors(opts.config, &project.category_id)?;
    let mut list = DrawList::new(canvas);

    list.push(
        Layer::Background,
        DrawSource::Background,
        DrawOp::Fill {
            transform: Affine::IDENTITY,
            geometry: Geometry::Rect(canvas.rect()),
            color: slide.background,
        },
    );

    if slide.kind == SlideKind::Start {
        push_ornaments(&mut list, colors);
    }
    for deco in &slide.decorations {
        push_decoration(&mut list, deco, opts.assets, colors);
    }
    for img in &slide.images {
        push_image(&mut list, img, opts);
    }
    for label in &slide.text_labels {
        push_label(&mut list, label, measure);
    }
    push_overlays(&mut list, project, slide, opts.config, colors, measure);

    if let Some(id) = opts.selection
        && let Some(el) = slide.find(id)
    {
        push_chrome(&mut list, id, el, opts, measure);
    }

    tracing::debug!(items = list.items.len(), "slide composed");
    Ok(list)
}

fn push_ornaments(list: &mut DrawList, colors: CategoryColors) {
    let size = DecorationKind::Swirl.size();
    let (w, h) = (list.canvas.w(), list.canvas.h());
    let color = colors.primary.with_opacity(ORNAMENT_OPACITY);
    let spots = [
        Point::new(w * 0.03, h * 0.03),
        Point::new(w * 0.97 - size.width, h * 0.97 - size.height),
    ];
    for at in spots {
        list.push(
            Layer::Decoration,
            DrawSource::Overlay(OverlayKind::Ornament),
            DrawOp::Fill {
                transform: Affine::translate(at.to_vec2()),
                geometry: Geometry::Path(swirl(size)),
                color,
            },
        );
    }
}

fn asset_ready(assets: &AssetStore, id: AssetId) -> bool {
    matches!(assets.state(id), Some(AssetState::Ready(_)))
}

fn push_decoration(
    list: &mut DrawList,
    deco: &Decoration,
    assets: &AssetStore,
    colors: CategoryColors,
) {
    let placement = deco.placement();
    let size = deco.kind.size();
    let source = DrawSource::Element(deco.id);
    let op = match deco.source {
        Some(asset) if asset_ready(assets, asset) => DrawOp::Image {
            transform: placement.affine(),
            asset,
            size,
            corner_radius: 0.0,
            opacity: deco.opacity.clamp(0.0, 1.0),
        },
        _ => DrawOp::Fill {
            transform: placement.affine(),
            geometry: decoration_geometry(deco.kind, size),
            color: deco
                .tint
                .unwrap_or(colors.primary)
                .with_opacity(deco.opacity),
        },
    };
    list.push(Layer::Decoration, source, op);
}

fn push_image(list: &mut DrawList, img: &ImageElement, opts: &ComposeOptions<'_>) {
    if !asset_ready(opts.assets, img.source) {
        tracing::debug!(id = %img.id, asset = %img.source, "image asset not ready, skipped");
        return;
    }
    let tr = img.placement.affine();
    let size = Size::new(img.placement.width, img.placement.height);
    let rect = Rect::from_origin_size(Point::ZERO, size);
    let source = DrawSource::Element(img.id);
    let style = &opts.config.image_style;

    if img.shadow {
        let (dx, dy) = style.shadow_offset;
        list.push(
            Layer::Image,
            source,
            DrawOp::Fill {
                transform: Affine::translate((dx, dy)) * tr,
                geometry: Geometry::RoundedRect {
                    rect,
                    radius: img.corner_radius,
                },
                color: style.shadow_color,
            },
        );
    }
    list.push(
        Layer::Image,
        source,
        DrawOp::Image {
            transform: tr,
            asset: img.source,
            size,
            corner_radius: img.corner_radius,
            opacity: 1.0,
        },
    );
    if let Some(border) = img.border
        && border.width > 0.0
    {
        let ring = Geometry::RoundedRect {
            rect,
            radius: img.corner_radius,
        }
        .stroke_outline(border.width);
        list.push(
            Layer::Image,
            source,
            DrawOp::Fill {
                transform: tr,
                geometry: Geometry::Path(ring),
                color: border.color,
            },
        );
    }
}

fn push_label(list: &mut DrawList, label: &TextLabel, measure: &mut dyn TextMeasure) {
    let glyphs = measure.measure(&label.text, &label.font_family, label.font_size, None);
    let group = local_affine(label.origin(), label.rotation, kurbo::Vec2::new(1.0, 1.0));
    let source = DrawSource::Element(label.id);

    if let Some(bg) = label.background {
        let rect = Rect::new(
            0.0,
            0.0,
            glyphs.width + 2.0 * label.padding,
            glyphs.height + 2.0 * label.padding,
        );
        list.push(
            Layer::Text,
            source,
            DrawOp::Fill {
                transform: group,
                geometry: Geometry::RoundedRect {
                    rect,
                    radius: LABEL_CORNER_RADIUS,
                },
                color: bg.with_opacity(label.background_opacity),
            },
        );
    }
    list.push(
        Layer::Text,
        source,
        DrawOp::Text {
            transform: group * Affine::translate((label.padding, label.padding)),
            run: TextRun {
                text: label.text.clone(),
                family: label.font_family.clone(),
                size: label.font_size,
                fill: label.fill,
                stroke: label.stroke,
                align: label.align,
                box_size: glyphs,
                wrap: None,
            },
        },
    );
}

struct OverlayText<'a> {
    kind: OverlayKind,
    text: String,
    family: &'a str,
    size: f64,
    fill: Color,
    align: TextAlign,
    wrap: Option<f64>,
}

fn push_overlay_text(
    list: &mut DrawList,
    at: Point,
    t: OverlayText<'_>,
    measure: &mut dyn TextMeasure,
) -> Size {
    let glyphs = measure.measure(&t.text, t.family, t.size, t.wrap);
    list.push(
        Layer::Overlay,
        DrawSource::Overlay(t.kind),
        DrawOp::Text {
            transform: Affine::translate(at.to_vec2()),
            run: TextRun {
                text: t.text,
                family: t.family.to_string(),
                size: t.size,
                fill: t.fill,
                stroke: None,
                align: t.align,
                box_size: glyphs,
                wrap: t.wrap,
            },
        },
    );
    glyphs
}

fn push_overlays(
    list: &mut DrawList,
    project: &Project,
    slide: &Slide,
    config: &EditorConfig,
    colors: CategoryColors,
    measure: &mut dyn TextMeasure,
) {
    let style = &config.overlays;
    let fonts = &config.fonts;
    let (w, h) = (list.canvas.w(), list.canvas.h());

    match slide.kind {
        SlideKind::Start => {
            let (fx, fy) = style.name_origin_frac;
            let mut y = h * fy;
            if !project.animal_name.trim().is_empty() {
                let size = push_overlay_text(
                    list,
                    Point::new(w * fx, y),
                    OverlayText {
                        kind: OverlayKind::AnimalName,
                        text: project.animal_name.clone(),
                        family: &fonts.headline,
                        size: style.name_font_size,
                        fill: colors.secondary,
                        align: TextAlign::Left,
                        wrap: None,
                    },
                    measure,
                );
                y += size.height;
            }
            if let Some(since) = project.animal_info.since.as_deref()
                && !since.trim().is_empty()
            {
                push_overlay_text(
                    list,
                    Point::new(w * fx, y + style.since_font_size * 0.25),
                    OverlayText {
                        kind: OverlayKind::Since,
                        text: format!("{} {}", style.since_prefix, since.trim()),
                        family: &fonts.body,
                        size: style.since_font_size,
                        fill: colors.text,
                        align: TextAlign::Left,
                        wrap: None,
                    },
                    measure,
                );
            }
        }
        SlideKind::Content => {
            let Some(story) = slide.story_text.as_deref().filter(|s| !s.trim().is_empty()) else {
                return;
            };
            let box_w = w * style.story_width_frac;
            let pad = style.story_padding;
            let wrap = (box_w - 2.0 * pad).max(1.0);
            let glyphs =
                measure.measure(story, &fonts.body, style.story_font_size, Some(wrap));
            let box_h = glyphs.height + 2.0 * pad;
            let origin = Point::new((w - box_w) * 0.5, h - box_h - h * 0.05);
            list.push(
                Layer::Overlay,
                DrawSource::Overlay(OverlayKind::Story),
                DrawOp::Fill {
                    transform: Affine::translate(origin.to_vec2()),
                    geometry: Geometry::RoundedRect {
                        rect: Rect::new(0.0, 0.0, box_w, box_h),
                        radius: STORY_CORNER_RADIUS,
                    },
                    color: colors.accent.with_opacity(0.9),
                },
            );
            push_overlay_text(
                list,
                origin + kurbo::Vec2::new(pad, pad),
                OverlayText {
                    kind: OverlayKind::Story,
                    text: story.to_string(),
                    family: &fonts.body,
                    size: style.story_font_size,
                    fill: colors.text,
                    align: TextAlign::Left,
                    wrap: Some(wrap),
                },
                measure,
            );
        }
        SlideKind::End => {
            let wrap = w * 0.8;
            let mut y = h * 0.4;
            let lines = [
                (OverlayKind::Quote, &style.end_quote, colors.text),
                (OverlayKind::Thanks, &style.end_thanks, colors.secondary),
            ];
            for (kind, text, fill) in lines {
                if text.trim().is_empty() {
                    continue;
                }
                let glyphs =
                    measure.measure(text, &fonts.headline, style.end_font_size, Some(wrap));
                push_overlay_text(
                    list,
                    Point::new((w - glyphs.width) * 0.5, y),
                    OverlayText {
                        kind,
                        text: text.clone(),
                        family: &fonts.headline,
                        size: style.end_font_size,
                        fill,
                        align: TextAlign::Center,
                        wrap: Some(wrap),
                    },
                    measure,
                );
                y += glyphs.height + h * 0.05;
            }
        }
    }
}

fn push_chrome(
    list: &mut DrawList,
    id: ElementId,
    el: ElementRef<'_>,
    opts: &ComposeOptions<'_>,
    measure: &mut dyn TextMeasure,
) {
    let style = &opts.config.chrome;
    let ds = if opts.display_scale > 0.0 {
        opts.display_scale
    } else {
        1.0
    };
    let b = element_box(el, measure);
    let tr = b.affine();
    let source = DrawSource::Chrome(id);
    let stroke_w = style.stroke_width / ds;

    list.push(
        Layer::Chrome,
        source,
        DrawOp::Fill {
            transform: tr,
            geometry: Geometry::Path(
                Geometry::Rect(Rect::new(0.0, 0.0, b.width, b.height)).stroke_outline(stroke_w),
            ),
            color: style.stroke,
        },
    );

    let (w, h) = (b.width, b.height);
    let mut anchors: Vec<Point> = match el.kind() {
        ElementKind::Image => vec![
            Point::new(0.0, 0.0),
            Point::new(w * 0.5, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h * 0.5),
            Point::new(w, h),
            Point::new(w * 0.5, h),
            Point::new(0.0, h),
            Point::new(0.0, h * 0.5),
        ],
        ElementKind::Text => vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ],
        ElementKind::Decoration => Vec::new(),
    };
    anchors.push(Point::new(w * 0.5, -ROTATER_OFFSET / ds));

    let half = style.anchor_size / ds * 0.5;
    for p in anchors {
        let rect = Rect::new(p.x - half, p.y - half, p.x + half, p.y + half);
        list.push(
            Layer::Chrome,
            source,
            DrawOp::Fill {
                transform: tr,
                geometry: Geometry::Rect(rect),
                color: style.anchor_fill,
            },
        );
        list.push(
            Layer::Chrome,
            source,
            DrawOp::Fill {
                transform: tr,
                geometry: Geometry::Path(Geometry::Rect(rect).stroke_outline(stroke_w)),
                color: style.stroke,
            },
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
