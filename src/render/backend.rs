use crate::assets::store::AssetStore;
use crate::foundation::error::PostResult;
use crate::render::draw_list::DrawList;

/// A rasterized slide as RGBA8 pixels.
///
/// Backends produce **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Rasterizes draw lists.
pub trait RenderBackend {
    /// Rasterize `list` at `pixel_scale` output pixels per canvas unit.
    fn render(
        &mut self,
        list: &DrawList,
        assets: &AssetStore,
        pixel_scale: f64,
    ) -> PostResult<FrameRGBA>;
}

/// Output pixel size of a canvas dimension at `pixel_scale`.
pub fn scaled_dim(units: u32, pixel_scale: f64) -> u32 {
    ((f64::from(units) * pixel_scale).round() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
