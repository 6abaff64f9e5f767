use std::fmt;

use crate::assets::store::{AssetId, AssetKind, AssetState, AssetStore, DecodeReport};
use crate::assets::upload::{UploadFile, UploadRejection, screen};
use crate::config::EditorConfig;
use crate::editor::command::{Command, Notice, Outcome};
use crate::editor::gesture::TransformGesture;
use crate::editor::layout::{Arrangement, place_image};
use crate::export::naming::{project_file_name, slide_file_name};
use crate::export::sequence::{ExportSequence, SettlePolicy};
use crate::export::sink::ExportSink;
use crate::foundation::color::Color;
use crate::foundation::core::{CanvasFormat, Point, Size};
use crate::foundation::error::{PostError, PostResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::compose::{ComposeOptions, compose_slide, element_box};
use crate::render::draw_list::DrawList;
use crate::render::text::{ApproxMeasure, TextMeasure};
use crate::render::viewport::Viewport;
use crate::scene::model::{
    Decoration, DecorationKind, DecorationPatch, Element, ElementId, ElementKind, IdAllocator,
    ImageElement, ImagePatch, SlideId, TextAlign, TextLabel, TextPatch,
};
use crate::scene::slide::{Project, Slide, SlideKind};
use crate::transform::fit::{IMAGE_FLOOR, TEXT_FLOOR, below_floor};
use crate::transform::placement::{BoxGeom, Placement};

const DEFAULT_PROJECT_NAME: &str = "Neuer Post";

/// An uploaded photo waiting for its natural size before it can be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPlacement {
    /// Asset being decoded.
    pub asset: AssetId,
    /// Slide the photo was dropped on.
    pub slide: SlideId,
    /// Slot index within the arrangement.
    pub slot: usize,
    /// Slot count the arrangement subdivides into.
    pub capacity: usize,
    /// Arrangement chosen at upload time.
    pub arrangement: Arrangement,
}

/// What happened to an upload batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Assets registered for decoding, in slot order.
    pub accepted: Vec<AssetId>,
    /// Files turned away by format or size.
    pub rejected: Vec<UploadRejection>,
    /// Valid files dropped because the slide was full.
    pub truncated: usize,
}

/// The editor's single context object.
///
/// Owns the project, the active slide index, the one selection, the chosen layout, the display
/// scale and the asset store. Every mutation goes through [`EditorSession::apply`]; commands
/// never fail the session and report an [`Outcome`] instead.
///
/// The active index always points at an existing slide, and the selection always names an
/// element on the active slide (or is empty).
pub struct EditorSession {
    config: EditorConfig,
    project: Project,
    active: usize,
    selection: Option<ElementId>,
    layout: String,
    viewport: Viewport,
    dark_mode: bool,
    assets: AssetStore,
    ids: IdAllocator,
    pending: Vec<PendingPlacement>,
    notices: Vec<Notice>,
    measure: Box<dyn TextMeasure>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("project", &self.project.name)
            .field("slides", &self.project.slides.len())
            .field("active", &self.active)
            .field("selection", &self.selection)
            .field("layout", &self.layout)
            .field("display_scale", &self.viewport.display_scale)
            .field("assets", &self.assets.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Start a session with one start slide in the first category's colors.
    pub fn new(config: EditorConfig) -> PostResult<Self> {
        config.validate()?;
        let mut ids = IdAllocator::default();
        let project = fresh_project(&config, &mut ids, None, config.default_format)?;
        let viewport = Viewport::new(project.canvas(), 1.0);
        Ok(Self {
            layout: config.default_layout.clone(),
            config,
            project,
            active: 0,
            selection: None,
            viewport,
            dark_mode: false,
            assets: AssetStore::new(),
            ids,
            pending: Vec::new(),
            notices: Vec::new(),
            measure: Box::new(ApproxMeasure),
        })
    }

    /// Use `measure` for text boxes (hit testing, gestures, composing).
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Replace the project with a fresh one, optionally in another category.
    ///
    /// The asset store and id allocator survive so ids are never reused.
    pub fn reset(&mut self, category: Option<&str>) -> PostResult<()> {
        self.project = fresh_project(&self.config, &mut self.ids, category, self.project.format)?;
        self.active = 0;
        self.selection = None;
        self.pending.clear();
        self.notices.clear();
        tracing::debug!(category = %self.project.category_id, "session reset");
        Ok(())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_slide(&self) -> &Slide {
        &self.project.slides[self.active]
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Id of the layout used for future placements.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fit the stage into a host container.
    pub fn fit_to_container(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::fit(width, height, self.project.canvas());
    }

    /// Set the display scale directly.
    pub fn set_display_scale(&mut self, scale: f64) {
        self.viewport = Viewport::new(self.project.canvas(), scale);
    }

    /// Placements still waiting for their asset to decode.
    pub fn pending_placements(&self) -> &[PendingPlacement] {
        &self.pending
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain notices for the UI.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Accept photos onto the active slide.
    ///
    /// Files pass the format and size checks, the batch is truncated to the free slots, and
    /// each accepted file gets a slot. Placement waits for [`EditorSession::pump_decodes`].
    pub fn upload_images(&mut self, files: Vec<UploadFile>) -> UploadSummary {
        let slide_id = self.active_slide().id;
        let current = self.active_slide().images.len()
            + self.pending.iter().filter(|p| p.slide == slide_id).count();
        let screened = screen(files, &self.config.upload, current);

        for r in &screened.rejected {
            tracing::warn!(reason = %r, "upload rejected");
            self.notices.push(Notice::UploadRejected(r.clone()));
        }

        let (arrangement, slots) = self.arrangement();
        let capacity = slots.max(current + screened.accepted.len());
        let mut accepted = Vec::with_capacity(screened.accepted.len());
        for (i, file) in screened.accepted.into_iter().enumerate() {
            let asset = self
                .assets
                .insert_pending(file.name, file.bytes, AssetKind::Raster);
            self.pending.push(PendingPlacement {
                asset,
                slide: slide_id,
                slot: current + i,
                capacity,
                arrangement,
            });
            accepted.push(asset);
        }

        UploadSummary {
            accepted,
            rejected: screened.rejected,
            truncated: screened.truncated,
        }
    }

    /// Register a logo for decorations; `.svg` files are parsed as vectors.
    pub fn add_logo(&mut self, file: UploadFile) -> AssetId {
        let is_svg = std::path::Path::new(&file.name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let kind = if is_svg {
            AssetKind::Svg
        } else {
            AssetKind::Raster
        };
        self.assets.insert_pending(file.name, file.bytes, kind)
    }

    /// Decode every pending asset and place the photos whose size is now known.
    ///
    /// Returns the number of images placed. Failed decodes add no element and raise
    /// [`Notice::DecodeFailed`].
    #[tracing::instrument(skip_all)]
    pub fn pump_decodes(&mut self) -> usize {
        for id in self.assets.pending_ids() {
            if let DecodeReport::Failed(reason) = self.assets.decode(id) {
                let name = self.assets.name(id).unwrap_or_default().to_string();
                self.notices.push(Notice::DecodeFailed { name, reason });
            }
        }

        let mut placed = 0;
        for p in std::mem::take(&mut self.pending) {
            let natural = match self.assets.state(p.asset) {
                Some(AssetState::Ready(asset)) => asset.natural_size(),
                Some(AssetState::Pending { .. }) => {
                    self.pending.push(p);
                    continue;
                }
                _ => continue,
            };
            let canvas = self.project.canvas();
            let Some(slide) = self.project.slides.iter_mut().find(|s| s.id == p.slide) else {
                tracing::debug!(asset = %p.asset, "slide gone before decode finished");
                continue;
            };
            let style = &self.config.image_style;
            slide.images.push(ImageElement {
                id: self.ids.element(),
                source: p.asset,
                placement: place_image(natural, p.arrangement, canvas, p.slot, p.capacity),
                corner_radius: style.corner_radius,
                border: None,
                shadow: style.shadow,
            });
            placed += 1;
        }
        placed
    }

    /// `true` when nothing slide `index` draws is still waiting for decode.
    pub fn is_settled(&self, index: usize) -> bool {
        let Some(slide) = self.project.slides.get(index) else {
            return true;
        };
        let placing = self.pending.iter().any(|p| p.slide == slide.id);
        let logos = slide
            .decorations
            .iter()
            .filter_map(|d| d.source)
            .chain(slide.images.iter().map(|i| i.source))
            .any(|id| self.assets.is_pending(id));
        !placing && !logos
    }

    /// Apply one command through the reducer.
    #[tracing::instrument(skip_all, fields(op = cmd.name()))]
    pub fn apply(&mut self, cmd: Command) -> Outcome {
        let outcome = match cmd {
            Command::Select { id } => self.select(id),
            Command::Move { id, x, y } => self.move_to(id, x, y),
            Command::Transform { id, node } => self.transform(id, node),
            Command::Resize {
                id,
                width,
                height,
                rotation,
            } => self.resize(id, width, height, rotation),
            Command::Delete { id } => self.delete(id),
            Command::AddText { preset } => self.add_text(preset.as_deref()),
            Command::AddDecoration { kind, logo } => self.add_decoration(kind, logo),
            Command::UpdateImage { id, patch } => self.update_image(id, &patch),
            Command::UpdateText { id, patch } => self.update_text(id, &patch),
            Command::UpdateDecoration { id, patch } => self.update_decoration(id, &patch),
            Command::SetBackground { color } => self.set_background(color),
            Command::SetStoryText { text } => {
                let text = text.filter(|t| !t.trim().is_empty());
                replace(&mut self.project.slides[self.active].story_text, text)
            }
            Command::SetAnimalName { name } => replace(&mut self.project.animal_name, name),
            Command::SetAnimalSince { since } => {
                replace(&mut self.project.animal_info.since, since)
            }
            Command::SetFormat { format } => self.set_format(format),
            Command::SetLayout { layout } => self.set_layout(layout),
            Command::SetCategory { category } => self.set_category(&category),
            Command::AddSlide { kind } => self.add_slide(kind),
            Command::DeleteSlide { index } => self.delete_slide(index),
            Command::SetActiveSlide { index } => self.set_active_slide(index),
            Command::SetDarkMode { enabled } => replace(&mut self.dark_mode, enabled),
        };
        match &outcome {
            Outcome::Applied => {}
            Outcome::Unchanged => tracing::debug!("no-op"),
            Outcome::Rejected(reason) => tracing::debug!(%reason, "rejected"),
            Outcome::Refused(reason) => tracing::warn!(%reason, "refused"),
        }
        outcome
    }

    /// Resolved handle box of an element on the active slide.
    pub fn element_box(&mut self, id: ElementId) -> Option<BoxGeom> {
        let el = self.project.slides[self.active].find(id)?;
        Some(element_box(el, self.measure.as_mut()))
    }

    /// Topmost element of the active slide under a canvas point.
    pub fn hit_test(&mut self, point: Point) -> Option<ElementId> {
        let slide = &self.project.slides[self.active];
        slide.z_order().into_iter().rev().find(|&id| {
            slide
                .find(id)
                .is_some_and(|el| element_box(el, self.measure.as_mut()).contains(point))
        })
    }

    /// Select what is under a canvas point; empty canvas clears the selection.
    pub fn click(&mut self, point: Point) -> Outcome {
        let id = self.hit_test(point);
        self.apply(Command::Select { id })
    }

    /// [`EditorSession::click`] with a point in stage (screen) pixels.
    pub fn click_screen(&mut self, screen: Point) -> Outcome {
        let point = self.viewport.to_canvas(screen);
        self.click(point)
    }

    /// Start resizing/rotating the selected element.
    pub fn begin_transform(&mut self) -> Option<TransformGesture> {
        let id = self.selection?;
        let el = self.project.slides[self.active].find(id)?;
        let kind = el.kind();
        let start = element_box(el, self.measure.as_mut());
        Some(TransformGesture::begin(
            id,
            kind,
            start,
            self.config.snapping.clone(),
        ))
    }

    /// Draw list of slide `index` as shown on screen (with selection chrome on the active slide).
    pub fn compose(&mut self, index: usize) -> PostResult<DrawList> {
        let selection = if index == self.active {
            self.selection
        } else {
            None
        };
        let opts = ComposeOptions {
            config: &self.config,
            assets: &self.assets,
            selection,
            display_scale: self.viewport.display_scale,
        };
        compose_slide(&self.project, index, &opts, self.measure.as_mut())
    }

    /// Export the active slide as `{prefix}-{name}-{format}.png`.
    ///
    /// Clears the selection first so no chrome reaches the raster.
    pub fn export_current<B, S>(&mut self, backend: &mut B, sink: &mut S) -> PostResult<String>
    where
        B: RenderBackend + TextMeasure,
        S: ExportSink + ?Sized,
    {
        self.selection = None;
        self.settle(self.active);
        let frame = self.rasterize(self.active, backend)?;
        let policy = &self.config.export;
        let name = project_file_name(
            &policy.file_prefix,
            &self.project.animal_name,
            &policy.fallback_name,
            self.project.format,
        );
        sink.begin(1)?;
        sink.push(&name, &frame)?;
        sink.end()?;
        Ok(name)
    }

    /// Export every slide in order as `{name}-slide-{n}.png`.
    ///
    /// Each step switches the active slide, waits for it to settle and rasterizes it. The
    /// previously active slide is restored afterwards, also when a step fails.
    pub fn export_all<B, S>(&mut self, backend: &mut B, sink: &mut S) -> PostResult<Vec<String>>
    where
        B: RenderBackend + TextMeasure,
        S: ExportSink + ?Sized,
    {
        self.selection = None;
        let mut seq = ExportSequence::new(self.project.slides.len(), self.active);
        let result = self.run_sequence(&mut seq, backend, sink);
        self.active = seq.restore_index();
        result
    }

    fn run_sequence<B, S>(
        &mut self,
        seq: &mut ExportSequence,
        backend: &mut B,
        sink: &mut S,
    ) -> PostResult<Vec<String>>
    where
        B: RenderBackend + TextMeasure,
        S: ExportSink + ?Sized,
    {
        sink.begin(seq.total())?;
        let mut names = Vec::with_capacity(seq.total());
        let mut next = seq.start();
        while let Some(index) = next {
            self.active = index;
            self.settle(index);
            let frame = self.rasterize(index, backend)?;
            let name = slide_file_name(
                &self.project.animal_name,
                &self.config.export.fallback_name,
                index,
            );
            sink.push(&name, &frame)?;
            names.push(name);
            next = seq.advance();
        }
        sink.end()?;
        Ok(names)
    }

    fn settle(&mut self, index: usize) {
        match self.config.export.settle {
            SettlePolicy::Ready => {
                if !self.is_settled(index) {
                    self.pump_decodes();
                }
            }
            policy @ SettlePolicy::FixedDelay { .. } => {
                std::thread::sleep(policy.delay());
                self.pump_decodes();
            }
        }
        if !self.is_settled(index) {
            tracing::warn!(slide = index, "slide still loading at rasterization");
        }
    }

    #[tracing::instrument(skip(self, backend), fields(slide = index))]
    fn rasterize<B>(&mut self, index: usize, backend: &mut B) -> PostResult<FrameRGBA>
    where
        B: RenderBackend + TextMeasure,
    {
        let opts = ComposeOptions {
            config: &self.config,
            assets: &self.assets,
            selection: None,
            display_scale: self.viewport.display_scale,
        };
        let list = compose_slide(&self.project, index, &opts, &mut *backend)?;
        // The stage is canvas * display_scale, so this is always one pixel per canvas unit.
        let pixel_scale = self.viewport.display_scale * self.viewport.export_pixel_ratio();
        backend.render(&list, &self.assets, pixel_scale)
    }

    fn arrangement(&self) -> (Arrangement, usize) {
        self.config
            .layout(&self.layout)
            .or_else(|| self.config.layouts.first())
            .map_or((Arrangement::default(), 1), |l| (l.arrangement, l.images))
    }

    fn active_mut(&mut self) -> &mut Slide {
        &mut self.project.slides[self.active]
    }

    fn kind_of(&self, id: ElementId) -> Option<ElementKind> {
        self.active_slide().find(id).map(|el| el.kind())
    }

    fn select(&mut self, id: Option<ElementId>) -> Outcome {
        if let Some(id) = id
            && !self.active_slide().contains(id)
        {
            return missing(id);
        }
        replace(&mut self.selection, id)
    }

    fn move_to(&mut self, id: ElementId, x: f64, y: f64) -> Outcome {
        if !x.is_finite() || !y.is_finite() {
            return Outcome::Refused("position must be finite".to_string());
        }
        let slide = self.active_mut();
        if let Some(img) = slide.image_mut(id) {
            let mut next = img.placement;
            next.x = x;
            next.y = y;
            return replace(&mut img.placement, next);
        }
        if let Some(label) = slide.text_mut(id) {
            let mut next = label.clone();
            next.x = x;
            next.y = y;
            return replace(label, next);
        }
        if let Some(deco) = slide.decoration_mut(id) {
            let mut next = deco.clone();
            next.x = x;
            next.y = y;
            return replace(deco, next);
        }
        missing(id)
    }

    fn transform(&mut self, id: ElementId, node: Placement) -> Outcome {
        let values = [
            node.x,
            node.y,
            node.width,
            node.height,
            node.rotation,
            node.scale_x,
            node.scale_y,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Outcome::Refused("transform must be finite".to_string());
        }
        let Some(kind) = self.kind_of(id) else {
            return missing(id);
        };
        let resolved = node.effective_size();
        let min_font = self.config.text_defaults.min_font_size;
        let slide = self.active_mut();

        match kind {
            ElementKind::Image => {
                if below_floor(resolved, IMAGE_FLOOR) {
                    return too_small(kind, resolved.width, resolved.height);
                }
                let Some(img) = slide.image_mut(id) else {
                    return missing(id);
                };
                let next = Placement::new(
                    node.x,
                    node.y,
                    resolved.width,
                    resolved.height,
                    node.rotation,
                );
                replace(&mut img.placement, next)
            }
            ElementKind::Text => {
                if below_floor(resolved, TEXT_FLOOR) {
                    return too_small(kind, resolved.width, resolved.height);
                }
                let Some(label) = slide.text_mut(id) else {
                    return missing(id);
                };
                let mut next = label.clone();
                next.font_size = (label.font_size * node.scale_x).round().max(min_font);
                next.x = node.x;
                next.y = node.y;
                next.rotation = node.rotation;
                replace(label, next)
            }
            ElementKind::Decoration => {
                let Some(deco) = slide.decoration_mut(id) else {
                    return missing(id);
                };
                let mut next = deco.clone();
                next.x = node.x;
                next.y = node.y;
                next.rotation = node.rotation;
                replace(deco, next)
            }
        }
    }

    fn resize(&mut self, id: ElementId, width: f64, height: f64, rotation: f64) -> Outcome {
        if ![width, height, rotation].iter().all(|v| v.is_finite()) {
            return Outcome::Refused("size must be finite".to_string());
        }
        match self.kind_of(id) {
            None => missing(id),
            Some(ElementKind::Text) => {
                Outcome::Refused("text size is derived from its content".to_string())
            }
            Some(ElementKind::Decoration) => {
                Outcome::Refused("decorations have fixed geometry".to_string())
            }
            Some(kind @ ElementKind::Image) => {
                if below_floor(Size::new(width, height), IMAGE_FLOOR) {
                    return too_small(kind, width, height);
                }
                let Some(img) = self.active_mut().image_mut(id) else {
                    return missing(id);
                };
                let p = img.placement;
                replace(
                    &mut img.placement,
                    Placement::new(p.x, p.y, width, height, rotation),
                )
            }
        }
    }

    fn delete(&mut self, id: ElementId) -> Outcome {
        if self.active_mut().remove(id).is_none() {
            return missing(id);
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        Outcome::Applied
    }

    fn add_text(&mut self, preset: Option<&str>) -> Outcome {
        let d = &self.config.text_defaults;
        let (text, background, fill) = match preset {
            None => (d.text.clone(), d.background, d.fill),
            Some(label) => match self.config.text_preset(label) {
                Some(p) => (p.label.clone(), p.background, p.fill),
                None => return Outcome::Refused(format!("unknown text preset \"{label}\"")),
            },
        };
        let canvas = self.project.canvas();
        let label = TextLabel {
            id: self.ids.element(),
            text,
            font_family: self.config.fonts.label.clone(),
            font_size: d.font_size,
            fill,
            background: Some(background),
            background_opacity: 1.0,
            padding: d.padding,
            stroke: None,
            align: TextAlign::Left,
            x: canvas.w() * d.origin_frac.0,
            y: canvas.h() * d.origin_frac.1,
            rotation: 0.0,
        };
        let id = label.id;
        self.active_mut().push(Element::Text(label));
        self.selection = Some(id);
        Outcome::Applied
    }

    fn add_decoration(&mut self, kind: DecorationKind, logo: Option<AssetId>) -> Outcome {
        if let Some(asset) = logo
            && self.assets.state(asset).is_none()
        {
            return Outcome::Refused(format!("unknown logo asset {asset}"));
        }
        let canvas = self.project.canvas();
        let size = kind.size();
        let deco = Decoration {
            id: self.ids.element(),
            kind,
            source: logo,
            x: (canvas.w() - size.width) / 2.0,
            y: (canvas.h() - size.height) / 2.0,
            rotation: 0.0,
            opacity: 1.0,
            tint: None,
        };
        let id = deco.id;
        self.active_mut().push(Element::Decoration(deco));
        self.selection = Some(id);
        Outcome::Applied
    }

    fn update_image(&mut self, id: ElementId, patch: &ImagePatch) -> Outcome {
        if !patch.is_finite() {
            return Outcome::Refused("image patch must be finite".to_string());
        }
        let Some(img) = self.active_mut().image_mut(id) else {
            return missing(id);
        };
        let mut next = img.clone();
        patch.apply_to(&mut next);
        let size = next.placement.effective_size();
        if patch.touches_size() && below_floor(size, IMAGE_FLOOR) {
            return too_small(ElementKind::Image, size.width, size.height);
        }
        let p = next.placement;
        next.placement = Placement::new(p.x, p.y, size.width, size.height, p.rotation);
        replace(img, next)
    }

    fn update_text(&mut self, id: ElementId, patch: &TextPatch) -> Outcome {
        let Some(label) = self.active_mut().text_mut(id) else {
            return missing(id);
        };
        let mut next = label.clone();
        patch.apply_to(&mut next);
        if !(next.font_size.is_finite() && next.font_size > 0.0) {
            return Outcome::Rejected("font size must be positive".to_string());
        }
        let edited = replace(label, next);
        let selected = replace(&mut self.selection, Some(id));
        if edited.is_applied() || selected.is_applied() {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    fn update_decoration(&mut self, id: ElementId, patch: &DecorationPatch) -> Outcome {
        let Some(deco) = self.active_mut().decoration_mut(id) else {
            return missing(id);
        };
        let mut next = deco.clone();
        patch.apply_to(&mut next);
        next.opacity = next.opacity.clamp(0.0, 1.0);
        replace(deco, next)
    }

    fn set_background(&mut self, color: Color) -> Outcome {
        replace(&mut self.active_mut().background, color)
    }

    fn set_format(&mut self, format: CanvasFormat) -> Outcome {
        if self.project.format == format {
            return Outcome::Unchanged;
        }
        self.project.format = format;
        let canvas = format.canvas();
        let (arrangement, slots) = self.arrangement();
        for slide in &mut self.project.slides {
            let capacity = slots.max(slide.images.len());
            for (slot, img) in slide.images.iter_mut().enumerate() {
                let natural = self
                    .assets
                    .get(img.source)
                    .map_or_else(|| img.placement.effective_size(), |a| a.natural_size());
                img.placement = place_image(natural, arrangement, canvas, slot, capacity);
            }
        }
        self.viewport = Viewport::new(canvas, self.viewport.display_scale);
        self.selection = None;
        Outcome::Applied
    }

    fn set_layout(&mut self, layout: String) -> Outcome {
        if self.config.layout(&layout).is_none() {
            return Outcome::Refused(format!("unknown layout \"{layout}\""));
        }
        replace(&mut self.layout, layout)
    }

    fn set_category(&mut self, category: &str) -> Outcome {
        let Some(c) = self.config.category(category) else {
            return Outcome::Refused(format!("unknown category \"{category}\""));
        };
        if self.project.category_id == category {
            return Outcome::Unchanged;
        }
        let background = c.colors.background;
        self.project.category_id = category.to_string();
        for slide in &mut self.project.slides {
            slide.background = background;
        }
        self.selection = None;
        Outcome::Applied
    }

    fn add_slide(&mut self, kind: SlideKind) -> Outcome {
        let background = match self.config.category(&self.project.category_id) {
            Some(c) => c.colors.background,
            None => self.active_slide().background,
        };
        let slide = Slide::new(self.ids.slide(), kind, background);
        let end = self.project.slides.len();
        self.active = self.project.insert_slide(end, slide);
        self.selection = None;
        Outcome::Applied
    }

    fn delete_slide(&mut self, index: usize) -> Outcome {
        let removed = match self.project.remove_slide(index) {
            Ok(s) => s,
            Err(e) => return Outcome::Refused(e.to_string()),
        };
        self.pending.retain(|p| p.slide != removed.id);
        if index == self.active {
            self.selection = None;
            self.active = self.active.min(self.project.slides.len() - 1);
        } else if index < self.active {
            self.active -= 1;
        }
        Outcome::Applied
    }

    fn set_active_slide(&mut self, index: usize) -> Outcome {
        if index >= self.project.slides.len() {
            return Outcome::Refused(format!(
                "slide index {index} out of range (project has {})",
                self.project.slides.len()
            ));
        }
        if index == self.active {
            return Outcome::Unchanged;
        }
        self.active = index;
        self.selection = None;
        Outcome::Applied
    }
}

fn fresh_project(
    config: &EditorConfig,
    ids: &mut IdAllocator,
    category: Option<&str>,
    format: CanvasFormat,
) -> PostResult<Project> {
    let category = match category {
        Some(id) => config.category(id).ok_or_else(|| {
            PostError::validation(format!("unknown category \"{id}\""))
        })?,
        None => config.default_category()?,
    };
    let first = Slide::new(ids.slide(), SlideKind::Start, category.colors.background);
    Ok(Project::new(
        DEFAULT_PROJECT_NAME,
        category.id.clone(),
        format,
        first,
    ))
}

fn replace<T: PartialEq>(slot: &mut T, next: T) -> Outcome {
    if *slot == next {
        Outcome::Unchanged
    } else {
        *slot = next;
        Outcome::Applied
    }
}

fn missing(id: ElementId) -> Outcome {
    Outcome::Refused(format!("no element {id} on the active slide"))
}

fn too_small(kind: ElementKind, width: f64, height: f64) -> Outcome {
    let floor = match kind {
        ElementKind::Text => TEXT_FLOOR,
        _ => IMAGE_FLOOR,
    };
    Outcome::Rejected(format!(
        "{width:.1}x{height:.1} is below the {}x{} minimum",
        floor.width, floor.height
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
