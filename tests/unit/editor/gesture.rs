use super::*;

fn geom(x: f64, y: f64, w: f64, h: f64, rot: f64) -> BoxGeom {
    BoxGeom {
        x,
        y,
        width: w,
        height: h,
        rotation: rot,
    }
}

fn no_snap() -> RotationSnap {
    RotationSnap {
        enabled: false,
        ..RotationSnap::default()
    }
}

#[test]
fn frames_under_the_image_floor_keep_the_prior_box() {
    let start = geom(10.0, 10.0, 200.0, 100.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(1), ElementKind::Image, start, no_snap());

    let ok = geom(10.0, 10.0, 120.0, 60.0, 0.0);
    assert_eq!(g.update(ok), ok);

    let too_small = geom(10.0, 10.0, 49.0, 60.0, 0.0);
    assert_eq!(g.update(too_small), ok);
    assert_eq!(g.update(too_small), ok);
    assert_eq!(g.current(), ok);
    assert_eq!(g.rejected_frames(), 2);
}

#[test]
fn non_finite_sizes_are_rejected_like_undersized_ones() {
    let start = geom(0.0, 0.0, 200.0, 100.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(1), ElementKind::Image, start, no_snap());
    assert_eq!(g.update(geom(0.0, 0.0, f64::NAN, 100.0, 0.0)), start);
    assert_eq!(g.update(geom(0.0, 0.0, 200.0, f64::INFINITY, 0.0)), start);
    assert_eq!(g.rejected_frames(), 2);
}

#[test]
fn text_floor_is_thirty_by_twenty() {
    let start = geom(0.0, 0.0, 100.0, 50.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(2), ElementKind::Text, start, no_snap());
    let fine = geom(0.0, 0.0, 30.0, 20.0, 0.0);
    assert_eq!(g.update(fine), fine);
    assert_eq!(g.update(geom(0.0, 0.0, 29.0, 40.0, 0.0)), fine);
    assert_eq!(g.update(geom(0.0, 0.0, 40.0, 19.5, 0.0)), fine);
}

#[test]
fn decorations_only_move_and_rotate() {
    let start = geom(0.0, 0.0, 160.0, 160.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(3), ElementKind::Decoration, start, no_snap());
    let shown = g.update(geom(5.0, 6.0, 10.0, 500.0, 30.0));
    assert_eq!(shown, geom(5.0, 6.0, 160.0, 160.0, 30.0));
    assert_eq!(g.rejected_frames(), 0);
}

#[test]
fn rotation_snaps_within_tolerance() {
    let start = geom(0.0, 0.0, 100.0, 100.0, 0.0);
    let mut g =
        TransformGesture::begin(ElementId(1), ElementKind::Image, start, RotationSnap::default());
    assert_eq!(g.update(geom(0.0, 0.0, 100.0, 100.0, 88.5)).rotation, 90.0);
    assert_eq!(g.update(geom(0.0, 0.0, 100.0, 100.0, 45.0)).rotation, 45.0);
}

#[test]
fn non_finite_frames_are_ignored() {
    let start = geom(0.0, 0.0, 100.0, 100.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(1), ElementKind::Image, start, no_snap());
    assert_eq!(g.update(geom(f64::NAN, 0.0, 100.0, 100.0, 0.0)), start);
}

#[test]
fn finish_expresses_the_resize_as_scale() {
    let start = geom(10.0, 20.0, 200.0, 100.0, 0.0);
    let mut g = TransformGesture::begin(ElementId(7), ElementKind::Image, start, no_snap());
    g.update(geom(12.0, 22.0, 300.0, 50.0, 15.0));
    let Command::Transform { id, node } = g.finish() else {
        panic!("expected transform");
    };
    assert_eq!(id, ElementId(7));
    assert_eq!((node.x, node.y, node.rotation), (12.0, 22.0, 15.0));
    assert_eq!((node.width, node.height), (200.0, 100.0));
    assert_eq!((node.scale_x, node.scale_y), (1.5, 0.5));
    assert_eq!(node.effective_size(), Size::new(300.0, 50.0));
}
