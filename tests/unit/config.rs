use super::*;

#[test]
fn default_config_is_valid_and_carries_brand_values() {
    let cfg = EditorConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.default_category().unwrap().id, "gluecksstreunerpost");
    assert_eq!(cfg.palette.lila.to_hex(), "#820b79");
    assert_eq!(cfg.text_defaults.background.to_hex(), "#9333ea");
    assert_eq!(cfg.layout("grid-4").unwrap().images, 4);
    assert_eq!(cfg.text_preset("nachher").unwrap().fill, cfg.palette.dark);
    assert_eq!(cfg.upload.max_file_bytes, 10 * 1024 * 1024);
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r##"{
        "default_layout": "stacked",
        "upload": { "max_images_per_slide": 2 },
        "palette": { "lila": "#000" }
    }"##;
    let cfg = EditorConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.default_layout, "stacked");
    assert_eq!(cfg.upload.max_images_per_slide, 2);
    assert_eq!(cfg.upload.max_file_bytes, 10 * 1024 * 1024);
    assert_eq!(cfg.palette.lila, Color::BLACK);
    assert_eq!(cfg.palette.gruen, BrandPalette::default().gruen);
}

#[test]
fn unknown_default_layout_is_rejected() {
    let err = EditorConfig::from_reader(r#"{"default_layout": "mosaic"}"#.as_bytes())
        .unwrap_err()
        .to_string();
    assert!(err.starts_with("validation error:"), "{err}");
    assert!(err.contains("mosaic"));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = EditorConfig::from_reader("{".as_bytes()).unwrap_err().to_string();
    assert!(err.starts_with("serialization error:"), "{err}");
}
