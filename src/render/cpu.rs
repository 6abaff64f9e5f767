use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::store::{Asset, AssetId, AssetStore, DecodedImage};
use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_params};
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Rect, Size};
use crate::foundation::error::{PostError, PostResult};
use crate::render::backend::{FrameRGBA, RenderBackend, scaled_dim};
use crate::render::draw_list::{DrawList, DrawOp, Geometry, TextRun};
use crate::render::text::{FontBook, TextBrush, TextEngine, TextMeasure};
use crate::scene::model::TextAlign;

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// CPU rasterizer powered by `vello_cpu`.
///
/// Decoded bitmaps and SVG rasters are cached per asset; the render context is reused while the
/// output size stays the same.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    text: TextEngine,
    image_cache: HashMap<AssetId, ImagePaint>,
    svg_cache: HashMap<(AssetId, u32, u32), vello_cpu::Image>,
    warned_fonts: BTreeSet<String>,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(FontBook::default())
    }
}

impl CpuBackend {
    /// Backend shaping text with the fonts in `book`.
    pub fn new(book: FontBook) -> Self {
        Self {
            ctx: None,
            text: TextEngine::new(book),
            image_cache: HashMap::new(),
            svg_cache: HashMap::new(),
            warned_fonts: BTreeSet::new(),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PostResult<R>,
    ) -> PostResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn image_paint_for(&mut self, id: AssetId, img: &DecodedImage) -> PostResult<ImagePaint> {
        if let Some(p) = self.image_cache.get(&id) {
            return Ok(p.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        let out = ImagePaint {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: img.width,
            h: img.height,
        };
        self.image_cache.insert(id, out.clone());
        Ok(out)
    }

    fn svg_paint_for(
        &mut self,
        id: AssetId,
        tree: &usvg::Tree,
        w: u32,
        h: u32,
    ) -> PostResult<vello_cpu::Image> {
        if let Some(img) = self.svg_cache.get(&(id, w, h)) {
            return Ok(img.clone());
        }
        let rgba = rasterize_svg_to_premul_rgba8(tree, w, h)?;
        let pixmap = pixmap_from_premul_bytes(&rgba, w, h)?;
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.svg_cache.insert((id, w, h), img.clone());
        Ok(img)
    }

    fn draw_fill(
        ctx: &mut vello_cpu::RenderContext,
        tr: Affine,
        geometry: &Geometry,
        color: Color,
    ) {
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        match geometry {
            Geometry::Rect(r) => ctx.fill_rect(&rect_to_cpu(*r)),
            other => ctx.fill_path(&bezpath_to_cpu(&other.to_path())),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        assets: &AssetStore,
        tr: Affine,
        id: AssetId,
        size: Size,
        corner_radius: f64,
        opacity: f32,
    ) -> PostResult<()> {
        let Some(asset) = assets.get(id) else {
            tracing::debug!(asset = %id, "asset not ready at raster time, skipped");
            return Ok(());
        };
        if size.width <= 0.0 || size.height <= 0.0 {
            return Ok(());
        }
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        match asset {
            Asset::Image(img) => {
                let p = self.image_paint_for(id, img)?;
                ctx.set_transform(affine_to_cpu(tr));
                ctx.set_paint_transform(affine_to_cpu(Affine::scale_non_uniform(
                    size.width / f64::from(p.w.max(1)),
                    size.height / f64::from(p.h.max(1)),
                )));
                ctx.set_paint(p.paint);
                let clip = Geometry::RoundedRect {
                    rect: Rect::from_origin_size((0.0, 0.0), size),
                    radius: corner_radius,
                };
                ctx.fill_path(&bezpath_to_cpu(&clip.to_path()));
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            }
            Asset::Svg(logo) => {
                let (w, h, adjust) = svg_raster_params(&logo.tree, size, tr)?;
                let paint = self.svg_paint_for(id, &logo.tree, w, h)?;
                ctx.set_transform(affine_to_cpu(adjust));
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(w),
                    f64::from(h),
                ));
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        tr: Affine,
        run: &TextRun,
    ) -> PostResult<()> {
        let brush = TextBrush {
            r: run.fill.r,
            g: run.fill.g,
            b: run.fill.b,
            a: run.fill.a,
        };
        let Some(shaped) = self
            .text
            .shape(&run.text, &run.family, run.size, brush, run.wrap)?
        else {
            if self.warned_fonts.insert(run.family.clone()) {
                tracing::warn!(family = %run.family, "no font registered, glyphs skipped");
            }
            return Ok(());
        };

        let factor = match run.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => 0.5,
            TextAlign::Right => 1.0,
        };
        let box_w = run.wrap.unwrap_or(run.box_size.width) as f32;

        ctx.set_transform(affine_to_cpu(tr));
        for line in shaped.layout.lines() {
            let dx = (box_w - line.metrics().advance).max(0.0) * factor as f32;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset() + dx;
                let y = glyph_run.baseline();
                let font_size = glyph_run.run().font_size();
                let glyphs: Vec<vello_cpu::Glyph> = glyph_run
                    .glyphs()
                    .map(|g| {
                        let out = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: y - g.y,
                        };
                        x += g.advance;
                        out
                    })
                    .collect();

                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    run.fill.r, run.fill.g, run.fill.b, run.fill.a,
                ));
                ctx.glyph_run(&shaped.font)
                    .font_size(font_size)
                    .fill_glyphs(glyphs.clone().into_iter());

                if let Some(stroke) = run.stroke
                    && stroke.width > 0.0
                {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        stroke.color.r,
                        stroke.color.g,
                        stroke.color.b,
                        stroke.color.a,
                    ));
                    ctx.glyph_run(&shaped.font)
                        .font_size(font_size)
                        .stroke_glyphs(glyphs.into_iter());
                }
            }
        }
        Ok(())
    }
}

impl TextMeasure for CpuBackend {
    fn measure(&mut self, text: &str, family: &str, size: f64, max_width: Option<f64>) -> Size {
        self.text.measure(text, family, size, max_width)
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(w = list.canvas.width, h = list.canvas.height, pixel_scale = pixel_scale))]
    fn render(
        &mut self,
        list: &DrawList,
        assets: &AssetStore,
        pixel_scale: f64,
    ) -> PostResult<FrameRGBA> {
        if !pixel_scale.is_finite() || pixel_scale <= 0.0 {
            return Err(PostError::render("pixel scale must be finite and > 0"));
        }
        let width = scaled_dim(list.canvas.width, pixel_scale);
        let height = scaled_dim(list.canvas.height, pixel_scale);
        let w16: u16 = width
            .try_into()
            .map_err(|_| PostError::render("output width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| PostError::render("output height exceeds u16"))?;
        let root = Affine::scale_non_uniform(
            f64::from(width) / list.canvas.w(),
            f64::from(height) / list.canvas.h(),
        );

        let data = self.with_ctx_mut(w16, h16, |this, ctx| {
            for item in &list.items {
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                match &item.op {
                    DrawOp::Fill {
                        transform,
                        geometry,
                        color,
                    } => Self::draw_fill(ctx, root * *transform, geometry, *color),
                    DrawOp::Image {
                        transform,
                        asset,
                        size,
                        corner_radius,
                        opacity,
                    } => this.draw_image(
                        ctx,
                        assets,
                        root * *transform,
                        *asset,
                        *size,
                        *corner_radius,
                        *opacity,
                    )?,
                    DrawOp::Text { transform, run } => {
                        this.draw_text(ctx, root * *transform, run)?
                    }
                }
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        Ok(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PostResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PostError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PostError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PostError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
