use super::*;

fn tree() -> usvg::Tree {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#ff0000"/></svg>"##;
    usvg::Tree::from_data(svg, &usvg::Options::default()).unwrap()
}

#[test]
fn params_follow_target_box_and_transform_scale() {
    let (w, h, adjust) =
        svg_raster_params(&tree(), Size::new(180.0, 90.0), Affine::scale(2.0)).unwrap();
    assert_eq!((w, h), (360, 180));
    let p = adjust * kurbo::Point::new(360.0, 180.0);
    assert!((p.x - 360.0).abs() < 1e-9 && (p.y - 180.0).abs() < 1e-9);
}

#[test]
fn empty_target_is_rejected() {
    assert!(svg_raster_params(&tree(), Size::ZERO, Affine::IDENTITY).is_err());
}

#[test]
fn rasterized_pixels_are_opaque_red() {
    let px = rasterize_svg_to_premul_rgba8(&tree(), 4, 2).unwrap();
    assert_eq!(px.len(), 4 * 2 * 4);
    assert_eq!(&px[..4], &[255, 0, 0, 255]);
}
