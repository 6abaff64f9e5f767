use crate::assets::store::AssetId;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Size};
use crate::transform::placement::Placement;

/// Identifier of an element; unique within a project and never reused after deletion.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identifier of a slide; never reused after deletion.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlideId(pub u64);

/// Monotonic id source shared by a project's slides and elements.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Allocate a fresh element id.
    pub fn element(&mut self) -> ElementId {
        ElementId(self.bump())
    }

    /// Allocate a fresh slide id.
    pub fn slide(&mut self) -> SlideId {
        SlideId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// The three element variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Uploaded photo.
    Image,
    /// Text label with an optional background box.
    Text,
    /// Fixed-geometry ornament.
    Decoration,
}

/// Optional frame drawn around an image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Stroke width in canvas units.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
}

/// An uploaded photo placed on a slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageElement {
    /// Element id.
    pub id: ElementId,
    /// Decoded bitmap in the session's asset store.
    pub source: AssetId,
    /// Position, size, rotation and (transient) scale.
    pub placement: Placement,
    /// Corner rounding radius in canvas units; `0` draws square corners.
    #[serde(default)]
    pub corner_radius: f64,
    /// Optional border stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    /// Draw a soft drop shadow under the photo.
    #[serde(default)]
    pub shadow: bool,
}

/// Horizontal alignment of text inside its label box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Outline drawn around text glyphs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in canvas units.
    pub width: f64,
}

/// A text label.
///
/// Width and height are not stored: the label box is always the measured glyph run plus
/// padding on every side, see [`crate::TextMeasure`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLabel {
    /// Element id.
    pub id: ElementId,
    /// Text content; may contain line breaks.
    pub text: String,
    /// Font family name resolved through the renderer's font book.
    pub font_family: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Glyph fill color.
    pub fill: Color,
    /// Background box color; `None` draws no box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Background box opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub background_opacity: f32,
    /// Padding between the glyph run and the box edge.
    pub padding: f64,
    /// Optional glyph outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<TextStroke>,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: TextAlign,
    /// Group origin (top-left of the background box).
    pub x: f64,
    /// Group origin (top-left of the background box).
    pub y: f64,
    /// Rotation in degrees about the group origin.
    pub rotation: f64,
}

fn default_opacity() -> f32 {
    1.0
}

impl TextLabel {
    /// Group origin.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Built-in ornament shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    /// Brand logo (paw print unless a logo asset is attached).
    Logo,
    /// Small paw icon.
    Icon,
    /// Filled circle.
    Shape,
    /// Spiral ornament.
    Swirl,
    /// Pointing arrow.
    Arrow,
}

impl DecorationKind {
    /// Fixed geometry of the kind.
    pub fn size(self) -> Size {
        match self {
            Self::Logo => Size::new(180.0, 180.0),
            Self::Icon => Size::new(64.0, 64.0),
            Self::Shape => Size::new(120.0, 120.0),
            Self::Swirl => Size::new(160.0, 160.0),
            Self::Arrow => Size::new(200.0, 80.0),
        }
    }
}

/// A fixed-geometry ornament.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decoration {
    /// Element id.
    pub id: ElementId,
    /// Shape kind; determines the fixed size.
    pub kind: DecorationKind,
    /// Optional raster or SVG logo drawn instead of the built-in glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AssetId>,
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// Rotation in degrees about the origin.
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Fill tint for built-in glyphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Color>,
}

impl Decoration {
    /// The decoration's placement (its size is fixed by its kind).
    pub fn placement(&self) -> Placement {
        let s = self.kind.size();
        Placement::new(self.x, self.y, s.width, s.height, self.rotation)
    }
}

/// Owned element of any variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Image variant.
    Image(ImageElement),
    /// Text label variant.
    Text(TextLabel),
    /// Decoration variant.
    Decoration(Decoration),
}

impl Element {
    /// Id of the wrapped element.
    pub fn id(&self) -> ElementId {
        match self {
            Self::Image(e) => e.id,
            Self::Text(e) => e.id,
            Self::Decoration(e) => e.id,
        }
    }

    /// Variant tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Image(_) => ElementKind::Image,
            Self::Text(_) => ElementKind::Text,
            Self::Decoration(_) => ElementKind::Decoration,
        }
    }
}

/// Borrowed element of any variant.
#[derive(Clone, Copy, Debug)]
pub enum ElementRef<'a> {
    /// Image variant.
    Image(&'a ImageElement),
    /// Text label variant.
    Text(&'a TextLabel),
    /// Decoration variant.
    Decoration(&'a Decoration),
}

impl ElementRef<'_> {
    /// Variant tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Image(_) => ElementKind::Image,
            Self::Text(_) => ElementKind::Text,
            Self::Decoration(_) => ElementKind::Decoration,
        }
    }
}

/// Partial update for an image: only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub corner_radius: Option<f64>,
    /// `Some(None)` (JSON `null`) removes the border.
    #[serde(deserialize_with = "explicit_null")]
    pub border: Option<Option<Border>>,
    pub shadow: Option<bool>,
}

impl ImagePatch {
    /// Merge into `img`, leaving unspecified attributes untouched.
    pub fn apply_to(&self, img: &mut ImageElement) {
        let p = &mut img.placement;
        merge(&mut p.x, self.x);
        merge(&mut p.y, self.y);
        merge(&mut p.width, self.width);
        merge(&mut p.height, self.height);
        merge(&mut p.rotation, self.rotation);
        merge(&mut p.scale_x, self.scale_x);
        merge(&mut p.scale_y, self.scale_y);
        merge(&mut img.corner_radius, self.corner_radius);
        merge(&mut img.border, self.border);
        merge(&mut img.shadow, self.shadow);
    }

    /// `true` when the patch touches width, height or scale.
    pub fn touches_size(&self) -> bool {
        self.width.is_some()
            || self.height.is_some()
            || self.scale_x.is_some()
            || self.scale_y.is_some()
    }

    /// `true` when every numeric field present is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation,
            self.scale_x,
            self.scale_y,
            self.corner_radius,
        ]
        .into_iter()
        .flatten()
        .all(f64::is_finite)
    }
}

/// Partial update for a text label: only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextPatch {
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub fill: Option<Color>,
    /// `Some(None)` (JSON `null`) removes the background box.
    #[serde(deserialize_with = "explicit_null")]
    pub background: Option<Option<Color>>,
    pub background_opacity: Option<f32>,
    pub padding: Option<f64>,
    /// `Some(None)` (JSON `null`) removes the stroke.
    #[serde(deserialize_with = "explicit_null")]
    pub stroke: Option<Option<TextStroke>>,
    pub align: Option<TextAlign>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
}

impl TextPatch {
    /// Merge into `label`, leaving unspecified attributes untouched.
    pub fn apply_to(&self, label: &mut TextLabel) {
        merge(&mut label.text, self.text.clone());
        merge(&mut label.font_family, self.font_family.clone());
        merge(&mut label.font_size, self.font_size);
        merge(&mut label.fill, self.fill);
        merge(&mut label.background, self.background);
        merge(&mut label.background_opacity, self.background_opacity);
        merge(&mut label.padding, self.padding);
        merge(&mut label.stroke, self.stroke);
        merge(&mut label.align, self.align);
        merge(&mut label.x, self.x);
        merge(&mut label.y, self.y);
        merge(&mut label.rotation, self.rotation);
    }
}

/// Partial update for a decoration: only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecorationPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f32>,
    /// `Some(None)` (JSON `null`) removes the tint.
    #[serde(deserialize_with = "explicit_null")]
    pub tint: Option<Option<Color>>,
}

impl DecorationPatch {
    /// Merge into `deco`, leaving unspecified attributes untouched.
    pub fn apply_to(&self, deco: &mut Decoration) {
        merge(&mut deco.x, self.x);
        merge(&mut deco.y, self.y);
        merge(&mut deco.rotation, self.rotation);
        merge(&mut deco.opacity, self.opacity);
        merge(&mut deco.tint, self.tint);
    }
}

// A present key maps to `Some`, so `null` survives as `Some(None)`; absent keys hit `default`.
fn explicit_null<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(d).map(Some)
}

fn merge<T>(dst: &mut T, src: Option<T>) {
    if let Some(v) = src {
        *dst = v;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
