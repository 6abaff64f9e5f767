use crate::foundation::core::{Affine, Size};
use crate::foundation::error::{PostError, PostResult};

/// Largest raster edge produced for a logo.
const MAX_DIM: u32 = 8_192;

/// Raster size for drawing an SVG into a `target` box under `transform`.
///
/// Returns the pixel size to rasterize at and the draw transform that maps those pixels back
/// onto the target box, so logos stay crisp at any export pixel scale.
pub fn svg_raster_params(
    tree: &usvg::Tree,
    target: Size,
    transform: Affine,
) -> PostResult<(u32, u32, Affine)> {
    let size = tree.size();
    let (sw, sh) = (f64::from(size.width()), f64::from(size.height()));
    if !(sw.is_finite() && sw > 0.0 && sh.is_finite() && sh > 0.0) {
        return Err(PostError::render("svg has invalid width/height"));
    }
    if !(target.width > 0.0 && target.height > 0.0) {
        return Err(PostError::render("svg target box must be non-empty"));
    }

    let [a, b, c, d, _e, _f] = transform.as_coeffs();
    let sx = (a * a + b * b).sqrt().max(1e-6);
    let sy = (c * c + d * d).sqrt().max(1e-6);

    let w = (target.width * sx).ceil().max(1.0) as u32;
    let h = (target.height * sy).ceil().max(1.0) as u32;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(PostError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let back = Affine::scale_non_uniform(
        target.width / f64::from(w),
        target.height / f64::from(h),
    );
    Ok((w, h, transform * back))
}

/// Rasterize `tree` stretched onto a `width`×`height` premultiplied RGBA8 buffer.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PostResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PostError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
