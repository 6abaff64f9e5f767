use kurbo::{PathEl, Shape};

use crate::assets::store::AssetId;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Canvas, Rect, Size};
use crate::foundation::math::Fnv1a64;
use crate::scene::model::{ElementId, TextAlign, TextStroke};

/// Compositing layer. Items are always emitted in ascending layer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Slide background fill.
    Background,
    /// Slide-type ornaments and user decorations.
    Decoration,
    /// Photos.
    Image,
    /// Text labels.
    Text,
    /// Slide-type dynamic texts (name, since caption, story box, end texts).
    Overlay,
    /// Selection outline and anchors; never present in exports.
    Chrome,
}

/// Dynamic overlay drawn by slide type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Start-slide swirl ornament.
    Ornament,
    /// Start-slide animal name.
    AnimalName,
    /// Start-slide "since" caption.
    Since,
    /// Content-slide story box.
    Story,
    /// End-slide quote.
    Quote,
    /// End-slide thanks line.
    Thanks,
}

/// What produced a draw item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawSource {
    /// The slide background.
    Background,
    /// A slide element.
    Element(ElementId),
    /// A slide-type overlay.
    Overlay(OverlayKind),
    /// Selection chrome around an element.
    Chrome(ElementId),
}

/// Fillable geometry in local units.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with uniformly rounded corners.
    RoundedRect {
        /// Outer rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
    },
    /// Arbitrary path.
    Path(BezPath),
}

impl Geometry {
    /// Path form of the geometry.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Rect(r) => r.to_path(0.1),
            Self::RoundedRect { rect, radius } if *radius > 0.0 => {
                let r = radius.min(rect.width() * 0.5).min(rect.height() * 0.5);
                kurbo::RoundedRect::from_rect(*rect, r).to_path(0.1)
            }
            Self::RoundedRect { rect, .. } => rect.to_path(0.1),
            Self::Path(p) => p.clone(),
        }
    }

    /// Outline of the geometry stroked at `width`, as a fillable path.
    pub fn stroke_outline(&self, width: f64) -> BezPath {
        kurbo::stroke(
            self.to_path(),
            &kurbo::Stroke::new(width),
            &kurbo::StrokeOpts::default(),
            0.1,
        )
    }
}

/// A text run positioned at the top-left of its glyph box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Content.
    pub text: String,
    /// Font family or CSS-style stack.
    pub family: String,
    /// Font size.
    pub size: f64,
    /// Glyph fill.
    pub fill: Color,
    /// Optional glyph outline.
    pub stroke: Option<TextStroke>,
    /// Alignment of lines inside `box_width`.
    pub align: TextAlign,
    /// Measured glyph box the run was laid out for.
    pub box_size: Size,
    /// Wrap width, when the run wraps.
    pub wrap: Option<f64>,
}

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Solid fill of a geometry.
    Fill {
        /// Local-to-canvas transform.
        transform: Affine,
        /// Geometry in local units.
        geometry: Geometry,
        /// Fill color, alpha included.
        color: Color,
    },
    /// Raster or SVG asset stretched onto `size`, clipped to rounded corners.
    Image {
        /// Local-to-canvas transform.
        transform: Affine,
        /// Asset to draw.
        asset: AssetId,
        /// Target size in local units.
        size: Size,
        /// Corner radius; `0` for square corners.
        corner_radius: f64,
        /// Opacity in `[0, 1]`.
        opacity: f32,
    },
    /// Shaped text.
    Text {
        /// Local-to-canvas transform of the glyph box origin.
        transform: Affine,
        /// The run.
        run: TextRun,
    },
}

/// One entry of a draw list.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Compositing layer.
    pub layer: Layer,
    /// Producer of the item.
    pub source: DrawSource,
    /// Primitive.
    pub op: DrawOp,
}

/// Layered, ordered draw list for one slide at its logical resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    /// Logical canvas the coordinates live in.
    pub canvas: Canvas,
    /// Items bottom to top.
    pub items: Vec<DrawItem>,
}

impl DrawList {
    /// Empty list on `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn push(&mut self, layer: Layer, source: DrawSource, op: DrawOp) {
        self.items.push(DrawItem { layer, source, op });
    }

    /// Layer of every item, in order.
    pub fn layers(&self) -> Vec<Layer> {
        self.items.iter().map(|i| i.layer).collect()
    }

    /// `true` when no item lies on a lower layer than the one before it.
    pub fn is_layer_ordered(&self) -> bool {
        self.items.windows(2).all(|w| w[0].layer <= w[1].layer)
    }

    /// `true` when any selection chrome is present.
    pub fn has_chrome(&self) -> bool {
        self.items.iter().any(|i| i.layer == Layer::Chrome)
    }

    /// Element ids in the order their first item appears.
    pub fn element_order(&self) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = Vec::new();
        for item in &self.items {
            if let DrawSource::Element(id) = item.source
                && !out.contains(&id)
            {
                out.push(id);
            }
        }
        out
    }

    /// Stable content hash; equal lists hash equal across runs.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.canvas.width));
        h.write_u64(u64::from(self.canvas.height));
        for item in &self.items {
            h.write_u8(item.layer as u8);
            hash_source(&mut h, item.source);
            hash_op(&mut h, &item.op);
        }
        h.finish()
    }
}

fn hash_source(h: &mut Fnv1a64, s: DrawSource) {
    match s {
        DrawSource::Background => h.write_u8(0),
        DrawSource::Element(id) => {
            h.write_u8(1);
            h.write_u64(id.0);
        }
        DrawSource::Overlay(k) => {
            h.write_u8(2);
            h.write_u8(k as u8);
        }
        DrawSource::Chrome(id) => {
            h.write_u8(3);
            h.write_u64(id.0);
        }
    }
}

fn hash_color(h: &mut Fnv1a64, c: Color) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn hash_affine(h: &mut Fnv1a64, a: Affine) {
    for v in a.as_coeffs() {
        h.write_f64(v);
    }
}

fn hash_path(h: &mut Fnv1a64, p: &BezPath) {
    for el in p.elements() {
        match *el {
            PathEl::MoveTo(a) => {
                h.write_u8(0);
                h.write_f64(a.x);
                h.write_f64(a.y);
            }
            PathEl::LineTo(a) => {
                h.write_u8(1);
                h.write_f64(a.x);
                h.write_f64(a.y);
            }
            PathEl::QuadTo(a, b) => {
                h.write_u8(2);
                for q in [a, b] {
                    h.write_f64(q.x);
                    h.write_f64(q.y);
                }
            }
            PathEl::CurveTo(a, b, c) => {
                h.write_u8(3);
                for q in [a, b, c] {
                    h.write_f64(q.x);
                    h.write_f64(q.y);
                }
            }
            PathEl::ClosePath => h.write_u8(4),
        }
    }
}

fn hash_op(h: &mut Fnv1a64, op: &DrawOp) {
    match op {
        DrawOp::Fill {
            transform,
            geometry,
            color,
        } => {
            h.write_u8(0);
            hash_affine(h, *transform);
            hash_path(h, &geometry.to_path());
            hash_color(h, *color);
        }
        DrawOp::Image {
            transform,
            asset,
            size,
            corner_radius,
            opacity,
        } => {
            h.write_u8(1);
            hash_affine(h, *transform);
            h.write_u64(u64::from(asset.0));
            h.write_f64(size.width);
            h.write_f64(size.height);
            h.write_f64(*corner_radius);
            h.write_f64(f64::from(*opacity));
        }
        DrawOp::Text { transform, run } => {
            h.write_u8(2);
            hash_affine(h, *transform);
            h.write_str(&run.text);
            h.write_str(&run.family);
            h.write_f64(run.size);
            hash_color(h, run.fill);
            if let Some(s) = run.stroke {
                hash_color(h, s.color);
                h.write_f64(s.width);
            }
            h.write_u8(run.align as u8);
            h.write_f64(run.box_size.width);
            h.write_f64(run.box_size.height);
            h.write_f64(run.wrap.unwrap_or(-1.0));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw_list.rs"]
mod tests;
