use crate::foundation::core::{Canvas, Rect, Size};
use crate::transform::fit::fit_within_aspect_ratio;
use crate::transform::placement::Placement;

/// Image arrangement chosen for a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrangement {
    /// One photo filling most of the canvas.
    Single,
    /// Two photos next to each other.
    #[default]
    SideBySide,
    /// Two photos on top of each other.
    Stacked,
    /// Even grid subdivision.
    Grid,
}

/// Tilt of the pinned-photo look, alternating by slot.
pub const SLOT_TILT_DEG: f64 = 3.0;

/// Fraction of a grid cell left empty on every side.
const GRID_INSET: f64 = 0.05;

/// Target box for `slot` before aspect fitting.
///
/// `capacity` is the arrangement's image count and only matters for single/grid, where the
/// canvas is subdivided into `ceil(sqrt(n))` columns; slots past the capacity wrap around.
pub fn slot_box(arrangement: Arrangement, canvas: Canvas, slot: usize, capacity: usize) -> Rect {
    let (w, h) = (canvas.w(), canvas.h());
    match arrangement {
        Arrangement::SideBySide => {
            let x = if slot % 2 == 0 { w * 0.02 } else { w * 0.52 };
            Rect::from_origin_size((x, h * 0.15), (w * 0.45, h * 0.7))
        }
        Arrangement::Stacked => {
            let y = if slot % 2 == 0 { h * 0.05 } else { h * 0.5 };
            Rect::from_origin_size((w * 0.1, y), (w * 0.8, h * 0.4))
        }
        Arrangement::Single | Arrangement::Grid => {
            let n = capacity.max(1);
            let cols = (n as f64).sqrt().ceil() as usize;
            let rows = n.div_ceil(cols);
            let i = slot % n;
            let (cw, ch) = (w / cols as f64, h / rows as f64);
            let (col, row) = ((i % cols) as f64, (i / cols) as f64);
            Rect::from_origin_size(
                (col * cw + cw * GRID_INSET, row * ch + ch * GRID_INSET),
                (cw * (1.0 - 2.0 * GRID_INSET), ch * (1.0 - 2.0 * GRID_INSET)),
            )
        }
    }
}

/// Rotation for `slot`: even slots tilt left, odd slots tilt right.
pub fn slot_rotation(slot: usize) -> f64 {
    if slot % 2 == 0 {
        -SLOT_TILT_DEG
    } else {
        SLOT_TILT_DEG
    }
}

/// Initial placement of a freshly decoded image.
///
/// The slot box keeps its origin; the asset is fitted inside it without recentering.
pub fn place_image(
    natural: Size,
    arrangement: Arrangement,
    canvas: Canvas,
    slot: usize,
    capacity: usize,
) -> Placement {
    let target = slot_box(arrangement, canvas, slot, capacity);
    let fitted = fit_within_aspect_ratio(natural, target.size());
    Placement::new(
        target.x0,
        target.y0,
        fitted.width,
        fitted.height,
        slot_rotation(slot),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/editor/layout.rs"]
mod tests;
