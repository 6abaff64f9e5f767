use std::io::Cursor;

use super::*;
use crate::config::EditorConfig;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([90, 160, 220, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pawpost-script-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn steps_dispatch_on_op() {
    let script: Script = serde_json::from_str(
        r#"{"steps": [
            {"op": "decode"},
            {"op": "add_text", "preset": "jetzt"},
            {"op": "click", "x": 1, "y": 2}
        ]}"#,
    )
    .unwrap();
    assert_eq!(script.steps[0], Step::Script(ScriptOp::Decode));
    assert_eq!(
        script.steps[1],
        Step::Command(Command::AddText {
            preset: Some("jetzt".to_string())
        })
    );
    assert_eq!(
        script.steps[2],
        Step::Script(ScriptOp::Click { x: 1.0, y: 2.0 })
    );
}

#[test]
fn unknown_ops_and_missing_ops_fail_to_parse() {
    assert!(Script::from_reader(r#"{"steps": [{"op": "fly"}]}"#.as_bytes()).is_err());
    let err = Script::from_reader(r#"{"steps": [{"x": 1}]}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("op"));
}

#[test]
fn run_replays_uploads_commands_and_gestures() {
    let dir = scratch_dir("run");
    std::fs::write(dir.join("bello.png"), png(400, 300)).unwrap();

    let script: Script = serde_json::from_str(
        r#"{"steps": [
            {"op": "set_animal_name", "name": "Bello"},
            {"op": "upload", "files": ["bello.png"]},
            {"op": "decode"},
            {"op": "click", "x": 300, "y": 400},
            {"op": "gesture", "width": 243, "height": 182.25},
            {"op": "gesture", "width": 10},
            {"op": "delete_slide", "index": 0}
        ]}"#,
    )
    .unwrap();

    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    let report = script.run(&mut session, &dir).unwrap();

    let img = &session.active_slide().images[0];
    assert_eq!(session.selection(), Some(img.id));
    assert!((img.placement.width - 243.0).abs() < 1e-6);
    assert!((img.placement.height - 182.25).abs() < 1e-6);
    assert_eq!(img.placement.scale_x, 1.0);
    assert_eq!(session.project().animal_name, "Bello");
    // name, upload, decode, click, first gesture
    assert_eq!(report.applied, 5);
    // second gesture keeps the prior box and commits it unchanged
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.refused, 1);
    assert!(report.notices.is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_inputs_are_errors() {
    let dir = scratch_dir("missing");
    let script: Script =
        serde_json::from_str(r#"{"steps": [{"op": "upload", "files": ["nope.png"]}]}"#).unwrap();
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    assert!(script.run(&mut session, &dir).is_err());
    assert_eq!(session.active_slide().images.len(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}
