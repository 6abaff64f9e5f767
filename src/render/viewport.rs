use crate::foundation::core::{Affine, Canvas, Point};

/// Container height assumed when the host reports none.
pub const FALLBACK_CONTAINER_HEIGHT: f64 = 500.0;

/// Margin factor applied to the fitted scale.
const FIT_MARGIN: f64 = 0.9;

/// On-screen presentation of a canvas.
///
/// The display scale only maps canvas units to screen pixels; authoring coordinates and export
/// resolution never depend on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Canvas being displayed.
    pub canvas: Canvas,
    /// Screen pixels per canvas unit.
    pub display_scale: f64,
}

impl Viewport {
    /// Viewport with an explicit display scale (non-positive or non-finite scales become `1`).
    pub fn new(canvas: Canvas, display_scale: f64) -> Self {
        let display_scale = if display_scale.is_finite() && display_scale > 0.0 {
            display_scale
        } else {
            1.0
        };
        Self {
            canvas,
            display_scale,
        }
    }

    /// Fit `canvas` into a container, never upscaling past `1.0` and leaving a 10% margin.
    pub fn fit(container_w: f64, container_h: f64, canvas: Canvas) -> Self {
        let ch = if container_h.is_finite() && container_h > 0.0 {
            container_h
        } else {
            FALLBACK_CONTAINER_HEIGHT
        };
        let sx = container_w / canvas.w();
        let sy = ch / canvas.h();
        Self::new(canvas, sx.min(sy).min(1.0) * FIT_MARGIN)
    }

    /// Canvas-to-screen transform.
    pub fn to_screen(&self) -> Affine {
        Affine::scale(self.display_scale)
    }

    /// Map a screen point (relative to the stage origin) into canvas units.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.display_scale, screen.y / self.display_scale)
    }

    /// Pixel ratio that rasterizes the on-screen stage at full logical resolution.
    pub fn export_pixel_ratio(&self) -> f64 {
        1.0 / self.display_scale
    }

    /// On-screen stage size in pixels.
    pub fn stage_size(&self) -> (f64, f64) {
        (
            self.canvas.w() * self.display_scale,
            self.canvas.h() * self.display_scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
