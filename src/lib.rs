//! pawpost is the headless core of a pet social-media post editor.
//!
//! Photos, text labels and decorations live on the slides of a [`Project`]. All editing goes
//! through one [`EditorSession`]:
//!
//! - Configure brand colors, fonts, categories and layouts with an [`EditorConfig`]
//! - Apply [`Command`]s and read back an [`Outcome`]
//! - Compose a slide into a layered [`DrawList`] and rasterize it with [`CpuBackend`]
//! - Export PNGs into an [`ExportSink`], one slide at a time or the whole project
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod editor;
pub(crate) mod export;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod transform;

/// Injected configuration.
pub mod config;
/// JSON command scripts.
pub mod script;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, CanvasFormat, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{PostError, PostResult};

pub use crate::transform::fit::{
    IMAGE_FLOOR, TEXT_FLOOR, below_floor, clamp_min_size, fit_within_aspect_ratio,
};
pub use crate::transform::placement::{
    BoxGeom, Placement, local_affine, normalize_degrees, snap_rotation,
};

pub use crate::scene::model::{
    Border, Decoration, DecorationKind, DecorationPatch, Element, ElementId, ElementKind,
    ElementRef, IdAllocator, ImageElement, ImagePatch, SlideId, TextAlign, TextLabel, TextPatch,
    TextStroke,
};
pub use crate::scene::slide::{AnimalInfo, Project, Slide, SlideKind};

pub use crate::assets::decode::{decode_image, parse_svg};
pub use crate::assets::store::{
    Asset, AssetId, AssetKind, AssetState, AssetStore, DecodeReport, DecodedImage, VectorLogo,
};
pub use crate::assets::upload::{Screened, UploadFile, UploadRejection, is_supported, screen};

pub use crate::editor::command::{Command, Notice, Outcome};
pub use crate::editor::gesture::{TransformGesture, floor_for};
pub use crate::editor::layout::{
    Arrangement, SLOT_TILT_DEG, place_image, slot_box, slot_rotation,
};
pub use crate::editor::session::{EditorSession, PendingPlacement, UploadSummary};

pub use crate::render::backend::{FrameRGBA, RenderBackend, scaled_dim};
pub use crate::render::compose::{
    ComposeOptions, LABEL_CORNER_RADIUS, category_colors, compose_slide, element_box, label_box,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::draw_list::{
    DrawItem, DrawList, DrawOp, DrawSource, Geometry, Layer, OverlayKind, TextRun,
};
pub use crate::render::ornament::{arrow, decoration_geometry, paw, swirl};
pub use crate::render::text::{APPROX_ADVANCE, ApproxMeasure, FontBook, TextEngine, TextMeasure};
pub use crate::render::viewport::{FALLBACK_CONTAINER_HEIGHT, Viewport};

pub use crate::export::naming::{project_file_name, slide_file_name};
pub use crate::export::png::encode_png;
pub use crate::export::sequence::{ExportSequence, ExportState, SettlePolicy};
pub use crate::export::sink::{DirSink, ExportSink, InMemorySink};

pub use crate::config::EditorConfig;
