use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Size};
use crate::render::draw_list::Geometry;
use crate::scene::model::DecorationKind;

/// Built-in vector glyph of a decoration, fitted to `size`.
pub fn decoration_geometry(kind: DecorationKind, size: Size) -> Geometry {
    match kind {
        DecorationKind::Logo | DecorationKind::Icon => Geometry::Path(paw(size)),
        DecorationKind::Shape => Geometry::Path(
            kurbo::Ellipse::from_rect(Rect::from_origin_size(Point::ZERO, size)).to_path(0.1),
        ),
        DecorationKind::Swirl => Geometry::Path(swirl(size)),
        DecorationKind::Arrow => Geometry::Path(arrow(size)),
    }
}

/// Paw print: one main pad and four toes.
pub fn paw(size: Size) -> BezPath {
    let (w, h) = (size.width, size.height);
    let mut path = kurbo::Ellipse::new((w * 0.5, h * 0.68), (w * 0.26, h * 0.22), 0.0).to_path(0.1);
    let toes = [
        (0.17, 0.40, 0.10),
        (0.36, 0.20, 0.11),
        (0.64, 0.20, 0.11),
        (0.83, 0.40, 0.10),
    ];
    for (fx, fy, fr) in toes {
        let toe = kurbo::Ellipse::new((w * fx, h * fy), (w * fr, h * fr * 1.2), 0.0);
        path.extend(toe.path_elements(0.1));
    }
    path
}

/// Archimedean spiral of three turns, stroked into a fillable outline.
pub fn swirl(size: Size) -> BezPath {
    const TURNS: f64 = 3.0;
    const STEPS: usize = 96;

    let c = Point::new(size.width * 0.5, size.height * 0.5);
    let r_max = size.width.min(size.height) * 0.46;
    let theta_max = TURNS * std::f64::consts::TAU;

    let mut spine = BezPath::new();
    for i in 0..=STEPS {
        let t = theta_max * i as f64 / STEPS as f64;
        let r = r_max * t / theta_max;
        let p = Point::new(c.x + r * t.cos(), c.y + r * t.sin());
        if i == 0 {
            spine.move_to(p);
        } else {
            spine.line_to(p);
        }
    }
    let width = size.width.min(size.height) * 0.06;
    kurbo::stroke(
        spine,
        &kurbo::Stroke::new(width).with_caps(kurbo::Cap::Round),
        &kurbo::StrokeOpts::default(),
        0.1,
    )
}

/// Right-pointing arrow filling the box.
pub fn arrow(size: Size) -> BezPath {
    let (w, h) = (size.width, size.height);
    let shaft = h * 0.3;
    let head = w * 0.35;
    let mut p = BezPath::new();
    p.move_to((0.0, (h - shaft) * 0.5));
    p.line_to((w - head, (h - shaft) * 0.5));
    p.line_to((w - head, 0.0));
    p.line_to((w, h * 0.5));
    p.line_to((w - head, h));
    p.line_to((w - head, (h + shaft) * 0.5));
    p.line_to((0.0, (h + shaft) * 0.5));
    p.close_path();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/ornament.rs"]
mod tests;
