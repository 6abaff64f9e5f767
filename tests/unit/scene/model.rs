use super::*;

fn label() -> TextLabel {
    TextLabel {
        id: ElementId(7),
        text: "Text".to_string(),
        font_family: "Arial".to_string(),
        font_size: 32.0,
        fill: Color::WHITE,
        background: Some(Color::rgb(0x93, 0x33, 0xea)),
        background_opacity: 1.0,
        padding: 12.0,
        stroke: None,
        align: TextAlign::Left,
        x: 108.0,
        y: 108.0,
        rotation: 0.0,
    }
}

#[test]
fn allocator_never_reuses_ids() {
    let mut ids = IdAllocator::default();
    let a = ids.element();
    let s = ids.slide();
    let b = ids.element();
    assert_eq!(a, ElementId(1));
    assert_eq!(s, SlideId(2));
    assert_eq!(b, ElementId(3));
}

#[test]
fn text_patch_only_touches_supplied_fields() {
    let mut l = label();
    TextPatch {
        text: Some("jetzt".to_string()),
        background: Some(None),
        ..TextPatch::default()
    }
    .apply_to(&mut l);
    assert_eq!(l.text, "jetzt");
    assert_eq!(l.background, None);
    assert_eq!(l.font_size, 32.0);
    assert_eq!(l.fill, Color::WHITE);
    assert_eq!((l.x, l.y), (108.0, 108.0));
}

#[test]
fn image_patch_merges_placement() {
    let mut img = ImageElement {
        id: ElementId(1),
        source: AssetId(0),
        placement: Placement::new(1.0, 2.0, 300.0, 200.0, -3.0),
        corner_radius: 15.0,
        border: None,
        shadow: true,
    };
    let patch = ImagePatch {
        x: Some(50.0),
        border: Some(Some(Border {
            width: 4.0,
            color: Color::WHITE,
        })),
        ..ImagePatch::default()
    };
    assert!(!patch.touches_size());
    assert!(patch.is_finite());
    let scaled = ImagePatch {
        scale_y: Some(2.0),
        ..ImagePatch::default()
    };
    assert!(scaled.touches_size());
    patch.apply_to(&mut img);
    assert_eq!(img.placement.x, 50.0);
    assert_eq!(img.placement.y, 2.0);
    assert_eq!(img.placement.rotation, -3.0);
    assert_eq!(img.border.map(|b| b.width), Some(4.0));
    assert!(img.shadow);
}

#[test]
fn decoration_geometry_is_fixed_by_kind() {
    let d = Decoration {
        id: ElementId(2),
        kind: DecorationKind::Arrow,
        source: None,
        x: 5.0,
        y: 6.0,
        rotation: 10.0,
        opacity: 1.0,
        tint: None,
    };
    let p = d.placement();
    assert_eq!((p.width, p.height), (200.0, 80.0));
    assert_eq!((p.x, p.y, p.rotation), (5.0, 6.0, 10.0));
}

#[test]
fn element_serializes_with_kind_tag() {
    let json = serde_json::to_value(Element::Text(label())).unwrap();
    assert_eq!(json["kind"], "text");
    assert_eq!(json["fill"], "#ffffff");
    let back: Element = serde_json::from_value(json).unwrap();
    assert_eq!(back.id(), ElementId(7));
    assert_eq!(back.kind(), ElementKind::Text);
}
