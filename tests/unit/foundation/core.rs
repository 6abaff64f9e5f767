use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(3, 4).unwrap().rect(), Rect::new(0.0, 0.0, 3.0, 4.0));
}

#[test]
fn format_presets_have_fixed_sizes() {
    assert_eq!(
        CanvasFormat::Instagram.canvas(),
        Canvas {
            width: 1080,
            height: 1080
        }
    );
    assert_eq!(
        CanvasFormat::Facebook.canvas(),
        Canvas {
            width: 1200,
            height: 630
        }
    );
    assert_eq!(
        CanvasFormat::Story.canvas(),
        Canvas {
            width: 1080,
            height: 1920
        }
    );
}

#[test]
fn format_parses_ids_and_aliases() {
    assert_eq!(
        "story".parse::<CanvasFormat>().unwrap(),
        CanvasFormat::Story
    );
    assert_eq!(
        " Landscape ".parse::<CanvasFormat>().unwrap(),
        CanvasFormat::Facebook
    );
    assert!("poster".parse::<CanvasFormat>().is_err());
    let json = serde_json::to_string(&CanvasFormat::Instagram).unwrap();
    assert_eq!(json, "\"instagram\"");
}

#[test]
fn premultiply_rounds_to_nearest() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 0),
        Rgba8Premul::transparent()
    );
}
