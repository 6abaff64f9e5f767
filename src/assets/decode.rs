use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::{DecodedImage, VectorLogo};
use crate::foundation::error::PostResult;
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode JPEG/PNG/WebP bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PostResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse an SVG logo.
pub fn parse_svg(bytes: &[u8]) -> PostResult<VectorLogo> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(VectorLogo {
        tree: Arc::new(tree),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
