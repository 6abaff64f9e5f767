use crate::config::RotationSnap;
use crate::editor::command::Command;
use crate::foundation::core::Size;
use crate::scene::model::{ElementId, ElementKind};
use crate::transform::fit::{IMAGE_FLOOR, TEXT_FLOOR, clamp_min_size};
use crate::transform::placement::{BoxGeom, Placement, snap_rotation};

/// Minimum resolved size of a resizable element kind; decorations have fixed geometry.
pub fn floor_for(kind: ElementKind) -> Option<Size> {
    match kind {
        ElementKind::Image => Some(IMAGE_FLOOR),
        ElementKind::Text => Some(TEXT_FLOOR),
        ElementKind::Decoration => None,
    }
}

/// An in-flight resize/rotate of the selected element.
///
/// Every intermediate frame goes through [`TransformGesture::update`], which plays the role of
/// a bounding-box callback: boxes under the floor are rejected and the previous box is kept,
/// so the handles never snap back on release.
#[derive(Clone, Debug)]
pub struct TransformGesture {
    id: ElementId,
    kind: ElementKind,
    start: BoxGeom,
    current: BoxGeom,
    snap: RotationSnap,
    rejected_frames: usize,
}

impl TransformGesture {
    /// Start a gesture from the element's resolved box.
    pub fn begin(id: ElementId, kind: ElementKind, start: BoxGeom, snap: RotationSnap) -> Self {
        Self {
            id,
            kind,
            start,
            current: start,
            snap,
            rejected_frames: 0,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Box the gesture started from.
    pub fn start(&self) -> BoxGeom {
        self.start
    }

    /// Box currently shown.
    pub fn current(&self) -> BoxGeom {
        self.current
    }

    /// Number of frames refused so far.
    pub fn rejected_frames(&self) -> usize {
        self.rejected_frames
    }

    /// Feed one proposed frame; returns the box to display.
    pub fn update(&mut self, proposed: BoxGeom) -> BoxGeom {
        let mut next = proposed;
        if ![next.x, next.y, next.rotation].iter().all(|v| v.is_finite()) {
            return self.reject("non-finite frame");
        }
        if self.snap.enabled {
            next.rotation = snap_rotation(next.rotation, &self.snap.angles, self.snap.tolerance_deg);
        }
        match floor_for(self.kind) {
            None => {
                next.width = self.start.width;
                next.height = self.start.height;
            }
            Some(floor) => {
                if clamp_min_size(self.current.size(), next.size(), floor) != next.size() {
                    return self.reject("below minimum size");
                }
            }
        }
        self.current = next;
        next
    }

    fn reject(&mut self, why: &'static str) -> BoxGeom {
        self.rejected_frames += 1;
        tracing::debug!(element = %self.id, why, "gesture frame rejected");
        self.current
    }

    /// End the gesture as a transform commit.
    ///
    /// The node keeps the starting size and expresses the gesture as a scale, the way a
    /// scene-graph transformer leaves it; the commit folds that scale back into the geometry.
    pub fn finish(self) -> Command {
        let ratio = |now: f64, was: f64| if was > 0.0 { now / was } else { 1.0 };
        Command::Transform {
            id: self.id,
            node: Placement {
                x: self.current.x,
                y: self.current.y,
                width: self.start.width,
                height: self.start.height,
                rotation: self.current.rotation,
                scale_x: ratio(self.current.width, self.start.width),
                scale_y: ratio(self.current.height, self.start.height),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/gesture.rs"]
mod tests;
