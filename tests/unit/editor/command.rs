use super::*;

#[test]
fn commands_use_an_op_tag() {
    let cmd: Command =
        serde_json::from_str(r#"{"op": "move", "id": 3, "x": 10.5, "y": 20}"#).unwrap();
    assert_eq!(
        cmd,
        Command::Move {
            id: ElementId(3),
            x: 10.5,
            y: 20.0
        }
    );

    let cmd: Command = serde_json::from_str(r#"{"op": "add_text"}"#).unwrap();
    assert_eq!(cmd, Command::AddText { preset: None });

    let cmd: Command =
        serde_json::from_str(r##"{"op": "set_background", "color": "#bef264"}"##).unwrap();
    assert_eq!(
        cmd,
        Command::SetBackground {
            color: Color::rgb(0xbe, 0xf2, 0x64)
        }
    );
}

#[test]
fn partial_patch_deserializes_sparse_fields() {
    let cmd: Command = serde_json::from_str(
        r#"{"op": "update_text", "id": 1, "patch": {"text": "jetzt", "background": null}}"#,
    )
    .unwrap();
    let Command::UpdateText { patch, .. } = cmd else {
        panic!("wrong variant");
    };
    assert_eq!(patch.text.as_deref(), Some("jetzt"));
    assert_eq!(patch.background, Some(None));
    assert!(patch.stroke.is_none());
    assert!(patch.font_size.is_none());
}

#[test]
fn transform_node_defaults_scale_to_one() {
    let cmd: Command = serde_json::from_str(
        r#"{"op": "transform", "id": 2, "node": {"x": 1, "y": 2, "width": 60, "height": 70, "rotation": 5}}"#,
    )
    .unwrap();
    let Command::Transform { node, .. } = cmd else {
        panic!("wrong variant");
    };
    assert_eq!((node.scale_x, node.scale_y), (1.0, 1.0));
}

#[test]
fn notices_render_for_users() {
    let n = Notice::DecodeFailed {
        name: "a.png".to_string(),
        reason: "bad header".to_string(),
    };
    assert_eq!(n.to_string(), "could not load 'a.png': bad header");
    assert!(Outcome::Applied.is_applied());
    assert!(!Outcome::Unchanged.is_applied());
}
