use super::*;

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn scaled_dim_rounds_and_never_hits_zero() {
    assert_eq!(scaled_dim(1080, 1.0), 1080);
    assert_eq!(scaled_dim(1080, 1.0 / 0.45 * 0.45), 1080);
    assert_eq!(scaled_dim(630, 0.5), 315);
    assert_eq!(scaled_dim(3, 0.01), 1);
}
