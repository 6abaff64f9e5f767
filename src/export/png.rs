use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{PostError, PostResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// Encode a frame as PNG bytes with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> PostResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(PostError::export(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| PostError::export("frame buffer does not match its dimensions"))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode PNG")?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
