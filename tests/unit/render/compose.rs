use std::sync::Arc;

use super::*;
use crate::assets::store::{Asset, AssetKind, DecodedImage};
use crate::foundation::core::CanvasFormat;
use crate::render::text::ApproxMeasure;
use crate::scene::model::IdAllocator;
use crate::transform::placement::Placement;

fn ready_image(store: &mut AssetStore) -> AssetId {
    store.insert_ready(
        "p.png",
        Asset::Image(DecodedImage {
            width: 2,
            height: 2,
            rgba8_premul: Arc::new(vec![255; 16]),
        }),
    )
}

fn label(id: ElementId, text: &str) -> TextLabel {
    TextLabel {
        id,
        text: text.to_string(),
        font_family: "Arial".to_string(),
        font_size: 32.0,
        fill: Color::WHITE,
        background: Some(Color::rgb(0x93, 0x33, 0xea)),
        background_opacity: 1.0,
        padding: 12.0,
        stroke: None,
        align: TextAlign::Left,
        x: 100.0,
        y: 50.0,
        rotation: 0.0,
    }
}

struct Fixture {
    project: Project,
    assets: AssetStore,
    config: EditorConfig,
    image: ElementId,
    text: ElementId,
    deco: ElementId,
}

fn fixture(kind: SlideKind) -> Fixture {
    let mut ids = IdAllocator::default();
    let mut assets = AssetStore::new();
    let asset = ready_image(&mut assets);
    let mut slide = Slide::new(ids.slide(), kind, Color::rgb(0xcd, 0xdb, 0x62));
    let (text, image, deco) = (ids.element(), ids.element(), ids.element());
    // Insert text first to prove the collection order does not leak into layering.
    slide.text_labels.push(label(text, "Text"));
    slide.images.push(ImageElement {
        id: image,
        source: asset,
        placement: Placement::new(20.0, 30.0, 200.0, 100.0, -3.0),
        corner_radius: 15.0,
        border: None,
        shadow: true,
    });
    slide.decorations.push(Decoration {
        id: deco,
        kind: DecorationKind::Arrow,
        source: None,
        x: 10.0,
        y: 10.0,
        rotation: 0.0,
        opacity: 1.0,
        tint: None,
    });
    Fixture {
        project: Project::new("p", "gluecksstreunerpost", CanvasFormat::Instagram, slide),
        assets,
        config: EditorConfig::default(),
        image,
        text,
        deco,
    }
}

fn compose(f: &Fixture, selection: Option<ElementId>) -> DrawList {
    let opts = ComposeOptions {
        config: &f.config,
        assets: &f.assets,
        selection,
        display_scale: 0.5,
    };
    compose_slide(&f.project, 0, &opts, &mut ApproxMeasure).unwrap()
}

#[test]
fn layers_follow_fixed_order_and_are_deterministic() {
    let f = fixture(SlideKind::Content);
    let a = compose(&f, None);
    let b = compose(&f, None);
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert!(a.is_layer_ordered());
    assert_eq!(a.items[0].layer, Layer::Background);
    assert_eq!(a.element_order(), vec![f.deco, f.image, f.text]);
    assert!(!a.has_chrome());
}

#[test]
fn label_background_is_measured_text_plus_padding() {
    let f = fixture(SlideKind::Content);
    let list = compose(&f, None);
    let bg = list
        .items
        .iter()
        .find(|i| i.source == DrawSource::Element(f.text))
        .unwrap();
    let DrawOp::Fill {
        geometry: Geometry::RoundedRect { rect, radius },
        ..
    } = &bg.op
    else {
        panic!("expected rounded background, got {:?}", bg.op);
    };
    assert_eq!(*radius, LABEL_CORNER_RADIUS);
    assert!((rect.width() - (4.0 * 0.6 * 32.0 + 24.0)).abs() < 1e-9);
    assert!((rect.height() - 56.0).abs() < 1e-9);

    let b = label_box(&f.project.slides[0].text_labels[0], &mut ApproxMeasure);
    assert_eq!((b.x, b.y), (100.0, 50.0));
    assert!((b.width - rect.width()).abs() < 1e-9);
}

#[test]
fn image_emits_shadow_then_bitmap() {
    let f = fixture(SlideKind::Content);
    let list = compose(&f, None);
    let ops: Vec<&DrawOp> = list
        .items
        .iter()
        .filter(|i| i.source == DrawSource::Element(f.image))
        .map(|i| &i.op)
        .collect();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], DrawOp::Fill { .. }));
    assert!(matches!(ops[1], DrawOp::Image { corner_radius, .. } if *corner_radius == 15.0));
}

#[test]
fn pending_images_are_not_drawn() {
    let mut f = fixture(SlideKind::Content);
    let pending = f.assets.insert_pending("later.png", vec![1, 2, 3], AssetKind::Raster);
    f.project.slides[0].images[0].source = pending;
    let list = compose(&f, None);
    assert!(!list.element_order().contains(&f.image));
}

#[test]
fn chrome_only_for_existing_selection() {
    let f = fixture(SlideKind::Content);
    let with = compose(&f, Some(f.image));
    assert!(with.has_chrome());
    assert!(with.is_layer_ordered());
    assert_eq!(with.items.last().unwrap().layer, Layer::Chrome);
    // outline + 9 anchors (8 resize, 1 rotate), each anchor fill + stroke
    let chrome = with.items.iter().filter(|i| i.layer == Layer::Chrome).count();
    assert_eq!(chrome, 1 + 9 * 2);

    let stale = compose(&f, Some(ElementId(999)));
    assert!(!stale.has_chrome());
}

#[test]
fn start_slide_draws_ornaments_and_name() {
    let mut f = fixture(SlideKind::Start);
    f.project.animal_name = "Pünktchen".to_string();
    f.project.animal_info.since = Some("2021".to_string());
    let list = compose(&f, None);
    let overlays: Vec<DrawSource> = list
        .items
        .iter()
        .filter(|i| matches!(i.source, DrawSource::Overlay(_)))
        .map(|i| i.source)
        .collect();
    assert_eq!(
        overlays,
        vec![
            DrawSource::Overlay(OverlayKind::Ornament),
            DrawSource::Overlay(OverlayKind::Ornament),
            DrawSource::Overlay(OverlayKind::AnimalName),
            DrawSource::Overlay(OverlayKind::Since),
        ]
    );
    assert!(list.is_layer_ordered());
    let since = list
        .items
        .iter()
        .find_map(|i| match &i.op {
            DrawOp::Text { run, .. } if i.source == DrawSource::Overlay(OverlayKind::Since) => {
                Some(run.text.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(since, "Bei uns seit 2021");
}

#[test]
fn content_story_box_and_end_texts() {
    let mut f = fixture(SlideKind::Content);
    f.project.slides[0].story_text = Some("Ein langer Text über die Reise".to_string());
    let list = compose(&f, None);
    let story: Vec<_> = list
        .items
        .iter()
        .filter(|i| i.source == DrawSource::Overlay(OverlayKind::Story))
        .collect();
    assert_eq!(story.len(), 2);
    let DrawOp::Text { run, .. } = &story[1].op else {
        panic!("story text expected");
    };
    assert_eq!(run.wrap, Some(1080.0 * 0.9 - 48.0));

    let f = fixture(SlideKind::End);
    let list = compose(&f, None);
    assert!(list
        .items
        .iter()
        .any(|i| i.source == DrawSource::Overlay(OverlayKind::Thanks)));
    assert!(!list
        .items
        .iter()
        .any(|i| i.source == DrawSource::Overlay(OverlayKind::AnimalName)));
}
