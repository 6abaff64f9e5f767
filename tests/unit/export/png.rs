use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn premultiplied_frames_are_written_straight() {
    let f = frame(vec![128, 0, 0, 128, 0, 0, 255, 255], true);
    let bytes = encode_png(&f).unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Png
    );

    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn straight_frames_pass_through() {
    let f = frame(vec![10, 20, 30, 40, 1, 2, 3, 255], false);
    let back = image::load_from_memory(&encode_png(&f).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [10, 20, 30, 40]);
}

#[test]
fn short_buffers_are_export_errors() {
    let err = encode_png(&frame(vec![0; 4], true)).unwrap_err();
    assert!(err.to_string().starts_with("export error:"));
}
