use crate::foundation::core::Size;

/// Smallest image box a resize may produce.
pub const IMAGE_FLOOR: Size = Size::new(50.0, 50.0);

/// Smallest text group box a resize may produce.
pub const TEXT_FLOOR: Size = Size::new(30.0, 20.0);

/// Largest size with the natural aspect ratio that fits inside `bounds`.
///
/// Wider-than-box assets are width-constrained (height shrinks); all others are
/// height-constrained (width shrinks). Degenerate natural sizes return `bounds` unchanged.
pub fn fit_within_aspect_ratio(natural: Size, bounds: Size) -> Size {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(natural.width) || !valid(natural.height) {
        return bounds;
    }
    if !valid(bounds.width) || !valid(bounds.height) {
        return Size::ZERO;
    }

    let aspect = natural.width / natural.height;
    if aspect > bounds.width / bounds.height {
        Size::new(bounds.width, bounds.width / aspect)
    } else {
        Size::new(bounds.height * aspect, bounds.height)
    }
}

/// Hard floor for interactive resizing.
///
/// A proposal with either dimension under the floor (or not finite) is rejected outright and
/// the prior size is kept; it is never clamped up to the floor.
pub fn clamp_min_size(prior: Size, proposed: Size, floor: Size) -> Size {
    if below_floor(proposed, floor) {
        prior
    } else {
        proposed
    }
}

/// `true` when `size` violates `floor` on either axis.
pub fn below_floor(size: Size, floor: Size) -> bool {
    !size.width.is_finite()
        || !size.height.is_finite()
        || size.width < floor.width
        || size.height < floor.height
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fit.rs"]
mod tests;
