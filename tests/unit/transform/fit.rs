use super::*;

fn assert_fits(natural: Size, bounds: Size) {
    let out = fit_within_aspect_ratio(natural, bounds);
    let eps = 1e-9;
    assert!(out.width <= bounds.width + eps, "{out:?} wider than {bounds:?}");
    assert!(out.height <= bounds.height + eps, "{out:?} taller than {bounds:?}");
    let ratio_in = natural.width / natural.height;
    let ratio_out = out.width / out.height;
    assert!((ratio_in - ratio_out).abs() < 1e-9 * ratio_in.max(1.0));
    assert!(
        (out.width - bounds.width).abs() < eps || (out.height - bounds.height).abs() < eps,
        "{out:?} touches neither edge of {bounds:?}"
    );
}

#[test]
fn fit_preserves_aspect_and_touches_one_edge() {
    let naturals = [
        (4000.0, 3000.0),
        (3000.0, 4000.0),
        (1.0, 1.0),
        (1920.0, 1080.0),
        (17.0, 911.0),
        (911.0, 17.0),
    ];
    let boxes = [(486.0, 756.0), (864.0, 432.0), (100.0, 100.0), (1.0, 500.0)];
    for (nw, nh) in naturals {
        for (bw, bh) in boxes {
            assert_fits(Size::new(nw, nh), Size::new(bw, bh));
        }
    }
}

#[test]
fn fit_width_constrained_for_wide_assets() {
    let out = fit_within_aspect_ratio(Size::new(4000.0, 2000.0), Size::new(486.0, 756.0));
    assert_eq!(out, Size::new(486.0, 243.0));
}

#[test]
fn fit_height_constrained_for_tall_assets() {
    let out = fit_within_aspect_ratio(Size::new(1000.0, 2000.0), Size::new(864.0, 432.0));
    assert_eq!(out, Size::new(216.0, 432.0));
}

#[test]
fn fit_degenerate_inputs_do_not_produce_nan() {
    let b = Size::new(10.0, 20.0);
    assert_eq!(fit_within_aspect_ratio(Size::new(0.0, 5.0), b), b);
    assert_eq!(fit_within_aspect_ratio(Size::new(f64::NAN, 5.0), b), b);
    assert_eq!(
        fit_within_aspect_ratio(Size::new(5.0, 5.0), Size::new(0.0, 5.0)),
        Size::ZERO
    );
}

#[test]
fn floor_rejects_instead_of_clamping() {
    let prior = Size::new(120.0, 80.0);
    assert_eq!(
        clamp_min_size(prior, Size::new(49.9, 300.0), IMAGE_FLOOR),
        prior
    );
    assert_eq!(
        clamp_min_size(prior, Size::new(300.0, 10.0), IMAGE_FLOOR),
        prior
    );
    assert_eq!(
        clamp_min_size(prior, Size::new(50.0, 50.0), IMAGE_FLOOR),
        Size::new(50.0, 50.0)
    );
    assert_eq!(
        clamp_min_size(prior, Size::new(f64::INFINITY, 60.0), IMAGE_FLOOR),
        prior
    );
}

#[test]
fn text_floor_is_thirty_by_twenty() {
    let prior = Size::new(100.0, 56.0);
    assert_eq!(clamp_min_size(prior, Size::new(29.0, 40.0), TEXT_FLOOR), prior);
    assert_eq!(clamp_min_size(prior, Size::new(40.0, 19.0), TEXT_FLOOR), prior);
    assert_eq!(
        clamp_min_size(prior, Size::new(30.0, 20.0), TEXT_FLOOR),
        Size::new(30.0, 20.0)
    );
}
