use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};

/// Affine placement of an element: top-left origin, size, rotation and scale.
///
/// Rotation is stored in degrees and applied about the element's own origin (its top-left
/// corner). Scale multiplies the stored size and is normalized back to `1.0` whenever a
/// transform gesture commits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Origin x in canvas units.
    pub x: f64,
    /// Origin y in canvas units.
    pub y: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Rotation in degrees, clockwise in canvas space (y points down).
    pub rotation: f64,
    /// Horizontal scale factor.
    #[serde(default = "one")]
    pub scale_x: f64,
    /// Vertical scale factor.
    #[serde(default = "one")]
    pub scale_y: f64,
}

fn one() -> f64 {
    1.0
}

impl Placement {
    /// Unscaled placement at `(x, y)` with the given size and rotation.
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Local-to-canvas transform: translate, then rotate about the origin, then scale.
    pub fn affine(&self) -> Affine {
        local_affine(
            Point::new(self.x, self.y),
            self.rotation,
            Vec2::new(self.scale_x, self.scale_y),
        )
    }

    /// Effective on-canvas size (`size * scale`).
    pub fn effective_size(&self) -> Size {
        Size::new(self.width * self.scale_x, self.height * self.scale_y)
    }

    /// The resolved box a transform handle operates on.
    pub fn to_box(&self) -> BoxGeom {
        let s = self.effective_size();
        BoxGeom {
            x: self.x,
            y: self.y,
            width: s.width,
            height: s.height,
            rotation: self.rotation,
        }
    }

    /// `true` when `p` (canvas units) lies inside the rotated element rectangle.
    pub fn contains(&self, p: Point) -> bool {
        self.to_box().contains(p)
    }
}

/// Transform-handle box: origin, effective size and rotation (degrees).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxGeom {
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// Effective width.
    pub width: f64,
    /// Effective height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl BoxGeom {
    /// Effective size of the box.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Local-to-canvas transform of the box (no scale; size is already effective).
    pub fn affine(&self) -> Affine {
        local_affine(Point::new(self.x, self.y), self.rotation, Vec2::new(1.0, 1.0))
    }

    /// Corners in canvas space, clockwise from the origin corner.
    pub fn corners(&self) -> [Point; 4] {
        let a = self.affine();
        [
            a * Point::new(0.0, 0.0),
            a * Point::new(self.width, 0.0),
            a * Point::new(self.width, self.height),
            a * Point::new(0.0, self.height),
        ]
    }

    /// Axis-aligned bounds of the rotated box.
    pub fn bounding_box(&self) -> Rect {
        self.affine()
            .transform_rect_bbox(Rect::new(0.0, 0.0, self.width, self.height))
    }

    /// `true` when `p` lies inside the rotated box.
    pub fn contains(&self, p: Point) -> bool {
        let local = self.affine().inverse() * p;
        Rect::new(0.0, 0.0, self.width, self.height)
            .abs()
            .contains(local)
    }
}

/// Translate to `origin`, rotate by `rotation_deg` about it, then scale.
pub fn local_affine(origin: Point, rotation_deg: f64, scale: Vec2) -> Affine {
    Affine::translate(origin.to_vec2())
        * Affine::rotate(rotation_deg.to_radians())
        * Affine::scale_non_uniform(scale.x, scale.y)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Snap `deg` onto the nearest angle in `snaps` when within `tolerance` degrees.
///
/// The winding of the input is kept: `362` snaps to `360`, not `0`.
pub fn snap_rotation(deg: f64, snaps: &[f64], tolerance: f64) -> f64 {
    if !deg.is_finite() || tolerance <= 0.0 {
        return deg;
    }
    let norm = normalize_degrees(deg);
    let mut best: Option<f64> = None;
    for &snap in snaps {
        let target = normalize_degrees(snap);
        let mut diff = target - norm;
        if diff > 180.0 {
            diff -= 360.0;
        } else if diff < -180.0 {
            diff += 360.0;
        }
        if diff.abs() <= tolerance && best.is_none_or(|b| diff.abs() < b.abs()) {
            best = Some(diff);
        }
    }
    match best {
        Some(diff) => deg + diff,
        None => deg,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/placement.rs"]
mod tests;
