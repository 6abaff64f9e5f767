use super::*;

#[test]
fn parses_all_hex_forms() {
    assert_eq!(Color::from_hex("#9333ea").unwrap(), Color::rgb(0x93, 0x33, 0xea));
    assert_eq!(Color::from_hex("FFF").unwrap(), Color::WHITE);
    assert_eq!(
        Color::from_hex("#820B7980").unwrap(),
        Color::rgba(0x82, 0x0b, 0x79, 0x80)
    );
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
    assert!(Color::from_hex("#ääa").is_err());
}

#[test]
fn hex_round_trips_through_serde() {
    let c: Color = serde_json::from_str("\"#CDDB62\"").unwrap();
    assert_eq!(c.to_hex(), "#cddb62");
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#cddb62\"");
    let arr: Color = serde_json::from_str("[1,2,3,4]").unwrap();
    assert_eq!(arr, Color::rgba(1, 2, 3, 4));
    assert_eq!(arr.to_hex(), "#01020304");
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Color::rgb(10, 20, 30).with_opacity(0.5);
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
    assert_eq!(c.a, 128);
    assert_eq!(Color::WHITE.with_opacity(f32::NAN), Color::WHITE);
    assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
}
